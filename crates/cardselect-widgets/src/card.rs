#![forbid(unsafe_code)]

//! Card content model.
//!
//! A [`Card`] is an immutable description of what the carousel and the
//! focused-card panel display for one item. Hosts build cards on demand in
//! their [`CardProvider`](crate::provider::CardProvider); the control clones
//! them into its buffers but never modifies them.
//!
//! # Example
//!
//! ```
//! use cardselect_widgets::card::{Card, CardAction, ImageRef};
//!
//! let card = Card::new("Half Dome", ImageRef::new("https://example.com/dome.jpg"))
//!     .with_dial_label("H")
//!     .with_detail_lines("Yosemite", "8,839 ft")
//!     .with_action_one(CardAction::new("Directions").unwrap());
//! assert_eq!(card.dial_label(), "H");
//! assert!(card.action_two().is_none());
//! ```

use std::fmt;

/// Opaque reference to an image: a URL or an asset name the host resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap an image location.
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// The image location as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Why a [`CardAction`] could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardActionError {
    /// The action title was empty.
    EmptyTitle,
}

impl fmt::Display for CardActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("card action title must not be empty"),
        }
    }
}

impl std::error::Error for CardActionError {}

/// A button offered on the focused card. The title is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CardAction {
    title: String,
}

impl CardAction {
    /// Create an action.
    ///
    /// # Errors
    ///
    /// Returns [`CardActionError::EmptyTitle`] when `title` is empty.
    pub fn new(title: impl Into<String>) -> Result<Self, CardActionError> {
        let title = title.into();
        if title.is_empty() {
            return Err(CardActionError::EmptyTitle);
        }
        Ok(Self { title })
    }

    /// The button title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl TryFrom<String> for CardAction {
    type Error = CardActionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardAction> for String {
    fn from(action: CardAction) -> Self {
        action.title
    }
}

/// Which of the focused card's two action buttons was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionSlot {
    /// The first (leading) action.
    One,
    /// The second (trailing) action.
    Two,
}

/// Display content for one card.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    image: ImageRef,
    #[cfg_attr(feature = "serde", serde(default))]
    placeholder: Option<ImageRef>,
    title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    dial_label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    detail_line_one: String,
    #[cfg_attr(feature = "serde", serde(default))]
    detail_line_two: String,
    #[cfg_attr(feature = "serde", serde(default))]
    action_one: Option<CardAction>,
    #[cfg_attr(feature = "serde", serde(default))]
    action_two: Option<CardAction>,
}

impl Card {
    /// Create a card with a title and an image; everything else is empty.
    pub fn new(title: impl Into<String>, image: ImageRef) -> Self {
        Self {
            image,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Image shown while `image` loads (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: ImageRef) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Short label shown on the dial when this card is centered (builder).
    #[must_use]
    pub fn with_dial_label(mut self, label: impl Into<String>) -> Self {
        self.dial_label = label.into();
        self
    }

    /// The two detail lines under the title (builder).
    #[must_use]
    pub fn with_detail_lines(mut self, one: impl Into<String>, two: impl Into<String>) -> Self {
        self.detail_line_one = one.into();
        self.detail_line_two = two.into();
        self
    }

    /// First action button (builder).
    #[must_use]
    pub fn with_action_one(mut self, action: CardAction) -> Self {
        self.action_one = Some(action);
        self
    }

    /// Second action button (builder).
    #[must_use]
    pub fn with_action_two(mut self, action: CardAction) -> Self {
        self.action_two = Some(action);
        self
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn placeholder(&self) -> Option<&ImageRef> {
        self.placeholder.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dial_label(&self) -> &str {
        &self.dial_label
    }

    pub fn detail_line_one(&self) -> &str {
        &self.detail_line_one
    }

    pub fn detail_line_two(&self) -> &str {
        &self.detail_line_two
    }

    pub fn action_one(&self) -> Option<&CardAction> {
        self.action_one.as_ref()
    }

    pub fn action_two(&self) -> Option<&CardAction> {
        self.action_two.as_ref()
    }

    /// The action in `slot`, if the card offers one.
    pub fn action(&self, slot: ActionSlot) -> Option<&CardAction> {
        match slot {
            ActionSlot::One => self.action_one(),
            ActionSlot::Two => self.action_two(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_action_title_is_rejected() {
        assert_eq!(CardAction::new(""), Err(CardActionError::EmptyTitle));
        assert_eq!(
            CardActionError::EmptyTitle.to_string(),
            "card action title must not be empty"
        );
    }

    #[test]
    fn action_keeps_title() {
        let action = CardAction::new("Call").unwrap();
        assert_eq!(action.title(), "Call");
        assert_eq!(String::from(action), "Call");
    }

    #[test]
    fn action_lookup_by_slot() {
        let card = Card::new("A", ImageRef::new("a.png"))
            .with_action_two(CardAction::new("Share").unwrap());
        assert!(card.action(ActionSlot::One).is_none());
        assert_eq!(card.action(ActionSlot::Two).map(CardAction::title), Some("Share"));
    }

    #[test]
    fn builder_fills_fields() {
        let card = Card::new("Title", ImageRef::new("img"))
            .with_placeholder(ImageRef::new("ph"))
            .with_dial_label("T")
            .with_detail_lines("one", "two");
        assert_eq!(card.title(), "Title");
        assert_eq!(card.image().as_str(), "img");
        assert_eq!(card.placeholder().map(ImageRef::as_str), Some("ph"));
        assert_eq!(card.dial_label(), "T");
        assert_eq!(card.detail_line_one(), "one");
        assert_eq!(card.detail_line_two(), "two");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn card_reads_minimal_json() {
        let card: Card = serde_json::from_str(r#"{"image":"a.png","title":"A"}"#).unwrap();
        assert_eq!(card.title(), "A");
        assert_eq!(card.image().as_str(), "a.png");
        assert!(card.action_one().is_none());
    }

    #[test]
    fn empty_action_title_is_rejected() {
        let json = r#"{"image":"a.png","title":"A","action_one":""}"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }
}
