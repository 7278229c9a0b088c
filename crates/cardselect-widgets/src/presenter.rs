#![forbid(unsafe_code)]

//! Double-buffered focused-card presentation.
//!
//! Two [`BufferSlot`]s hold the focused-card content. One is active (what the
//! user sees at rest); the other is where the next card is staged. A
//! transition fills the inactive slot, animates both, then empties the old
//! active slot and swaps the flag.
//!
//! # Invariants
//!
//! 1. At rest the active slot is fully visible at the resting x and the
//!    inactive slot is empty and hidden ([`DualBufferPresenter::is_settled`]).
//! 2. Only the transition engine swaps the active flag.
//! 3. Every content change is mirrored by a `LoadImage`/`ClearImage` request
//!    for the slot's image view.

use crate::card::Card;
use crate::event::{CardSelectionEvent, ImageTarget};
use crate::selection::{BufferId, IndexPath};

/// How a slot is currently drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// Opacity in [0.0, 1.0].
    pub alpha: f32,
    /// Leading x of the slot's view.
    pub x: f32,
    /// Whether the view is hidden outright.
    pub hidden: bool,
}

impl VisualState {
    /// Fully visible at `x`.
    pub const fn shown(x: f32) -> Self {
        Self {
            alpha: 1.0,
            x,
            hidden: false,
        }
    }

    /// Hidden at `x`.
    pub const fn hidden(x: f32) -> Self {
        Self {
            alpha: 0.0,
            x,
            hidden: true,
        }
    }

    /// Visible with full opacity.
    pub fn is_fully_visible(&self) -> bool {
        !self.hidden && self.alpha >= 1.0
    }
}

/// One focused-card buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSlot {
    card: Option<Card>,
    index: Option<IndexPath>,
    visual: VisualState,
    is_active: bool,
}

impl BufferSlot {
    fn new(visual: VisualState, is_active: bool) -> Self {
        Self {
            card: None,
            index: None,
            visual,
            is_active,
        }
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    /// Index of the card held, if any.
    pub fn index(&self) -> Option<IndexPath> {
        self.index
    }

    pub fn visual(&self) -> VisualState {
        self.visual
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }
}

/// Owner of the two focused-card buffers and the active flag.
#[derive(Debug, Clone)]
pub struct DualBufferPresenter {
    slots: [BufferSlot; 2],
    active: BufferId,
}

impl DualBufferPresenter {
    /// Both slots empty; A active and visible at `resting_x`, B hidden.
    pub fn new(resting_x: f32) -> Self {
        Self {
            slots: [
                BufferSlot::new(VisualState::shown(resting_x), true),
                BufferSlot::new(VisualState::hidden(resting_x), false),
            ],
            active: BufferId::A,
        }
    }

    pub fn active_id(&self) -> BufferId {
        self.active
    }

    pub fn inactive_id(&self) -> BufferId {
        self.active.other()
    }

    pub fn slot(&self, id: BufferId) -> &BufferSlot {
        &self.slots[id.index()]
    }

    pub fn active_slot(&self) -> &BufferSlot {
        self.slot(self.active)
    }

    pub fn inactive_slot(&self) -> &BufferSlot {
        self.slot(self.inactive_id())
    }

    /// Put `card` (or nothing) into slot `id` and request its image.
    pub fn populate(
        &mut self,
        id: BufferId,
        card: Option<Card>,
        index: Option<IndexPath>,
        out: &mut Vec<CardSelectionEvent>,
    ) {
        let target = ImageTarget::Focused(id);
        match &card {
            Some(card) => out.push(CardSelectionEvent::LoadImage {
                target,
                image: card.image().clone(),
                placeholder: card.placeholder().cloned(),
            }),
            None => out.push(CardSelectionEvent::ClearImage { target }),
        }
        let slot = &mut self.slots[id.index()];
        slot.index = card.as_ref().and(index);
        slot.card = card;
    }

    /// Empty slot `id` and hide it. Returns `false`, touching nothing, when
    /// the slot was already empty.
    pub fn clear(&mut self, id: BufferId, out: &mut Vec<CardSelectionEvent>) -> bool {
        debug_assert_ne!(id, self.active, "the active slot is never cleared");
        let slot = &mut self.slots[id.index()];
        if slot.card.is_none() {
            return false;
        }
        slot.visual = VisualState::hidden(slot.visual.x);
        slot.card = None;
        slot.index = None;
        out.push(CardSelectionEvent::ClearImage {
            target: ImageTarget::Focused(id),
        });
        true
    }

    pub fn set_visual(&mut self, id: BufferId, visual: VisualState) {
        self.slots[id.index()].visual = visual;
    }

    /// Flip which slot is active.
    pub(crate) fn swap_active(&mut self) {
        self.active = self.active.other();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.is_active = i == self.active.index();
        }
    }

    /// Empty both slots and return to the initial arrangement (the active
    /// flag is kept).
    pub(crate) fn reset(&mut self, resting_x: f32, out: &mut Vec<CardSelectionEvent>) {
        for id in [BufferId::A, BufferId::B] {
            let slot = &mut self.slots[id.index()];
            if slot.card.take().is_some() {
                out.push(CardSelectionEvent::ClearImage {
                    target: ImageTarget::Focused(id),
                });
            }
            slot.index = None;
            slot.visual = if id == self.active {
                VisualState::shown(resting_x)
            } else {
                VisualState::hidden(resting_x)
            };
        }
    }

    /// The at-rest arrangement holds: the active slot is fully shown at
    /// `resting_x`, and the inactive slot is empty and hidden.
    pub fn is_settled(&self, resting_x: f32) -> bool {
        let active = self.active_slot();
        let inactive = self.inactive_slot();
        active.is_active
            && !inactive.is_active
            && active.visual == VisualState::shown(resting_x)
            && inactive.is_empty()
            && inactive.visual.hidden
            && inactive.visual.alpha == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::ImageRef;

    fn card(name: &str) -> Card {
        Card::new(name, ImageRef::new(format!("{name}.png")))
    }

    #[test]
    fn starts_settled_and_empty() {
        let presenter = DualBufferPresenter::new(75.0);
        assert_eq!(presenter.active_id(), BufferId::A);
        assert!(presenter.active_slot().is_empty());
        assert!(presenter.is_settled(75.0));
    }

    #[test]
    fn populate_requests_image() {
        let mut presenter = DualBufferPresenter::new(75.0);
        let mut out = Vec::new();
        let c = card("a").with_placeholder(ImageRef::new("ph"));
        presenter.populate(BufferId::B, Some(c.clone()), Some(IndexPath::row(2)), &mut out);
        assert_eq!(presenter.slot(BufferId::B).card(), Some(&c));
        assert_eq!(presenter.slot(BufferId::B).index(), Some(IndexPath::row(2)));
        assert_eq!(
            out,
            vec![CardSelectionEvent::LoadImage {
                target: ImageTarget::Focused(BufferId::B),
                image: ImageRef::new("a.png"),
                placeholder: Some(ImageRef::new("ph")),
            }]
        );
    }

    #[test]
    fn populate_none_clears_content() {
        let mut presenter = DualBufferPresenter::new(75.0);
        let mut out = Vec::new();
        presenter.populate(BufferId::B, Some(card("a")), Some(IndexPath::row(0)), &mut out);
        presenter.populate(BufferId::B, None, Some(IndexPath::row(0)), &mut out);
        assert!(presenter.slot(BufferId::B).is_empty());
        assert_eq!(presenter.slot(BufferId::B).index(), None);
    }

    #[test]
    fn clear_reports_whether_content_was_removed() {
        let mut presenter = DualBufferPresenter::new(75.0);
        let mut out = Vec::new();
        presenter.populate(BufferId::B, Some(card("a")), Some(IndexPath::row(0)), &mut out);
        presenter.set_visual(BufferId::B, VisualState::shown(75.0));
        out.clear();

        assert!(presenter.clear(BufferId::B, &mut out));
        assert!(presenter.slot(BufferId::B).visual().hidden);
        assert_eq!(out.len(), 1);

        assert!(!presenter.clear(BufferId::B, &mut out));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn full_visibility_needs_opacity_and_unhidden() {
        assert!(VisualState::shown(75.0).is_fully_visible());
        assert!(!VisualState::hidden(75.0).is_fully_visible());
        let fading = VisualState {
            alpha: 0.4,
            ..VisualState::shown(75.0)
        };
        assert!(!fading.is_fully_visible());
    }

    #[test]
    fn swap_moves_active_marker() {
        let mut presenter = DualBufferPresenter::new(75.0);
        presenter.swap_active();
        assert_eq!(presenter.active_id(), BufferId::B);
        assert!(presenter.slot(BufferId::B).is_active());
        assert!(!presenter.slot(BufferId::A).is_active());
    }

    #[test]
    fn unsettled_while_both_visible() {
        let mut presenter = DualBufferPresenter::new(75.0);
        let mut out = Vec::new();
        presenter.populate(BufferId::B, Some(card("a")), Some(IndexPath::row(0)), &mut out);
        presenter.set_visual(BufferId::B, VisualState::shown(75.0));
        assert!(!presenter.is_settled(75.0));
    }

    #[test]
    fn reset_empties_both() {
        let mut presenter = DualBufferPresenter::new(75.0);
        let mut out = Vec::new();
        presenter.populate(BufferId::A, Some(card("a")), Some(IndexPath::row(0)), &mut out);
        presenter.populate(BufferId::B, Some(card("b")), Some(IndexPath::row(1)), &mut out);
        out.clear();
        presenter.reset(75.0, &mut out);
        assert_eq!(out.len(), 2);
        assert!(presenter.active_slot().is_empty());
        assert!(presenter.is_settled(75.0));
    }
}
