#![forbid(unsafe_code)]

//! Control configuration.
//!
//! All fixed spacing and timing values live here as named fields with the
//! defaults the control was designed around. Configuration is handed to
//! [`SelectionController::new`](crate::controller::SelectionController::new)
//! once; the transition style in particular cannot change afterwards.

use std::time::Duration;

use crate::card::ImageRef;
use crate::transition::TransitionStyle;

/// Spacing and sizing of the control's pieces, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutMetrics {
    /// Gap between the top of the view and the focused card.
    pub top_space: f32,
    /// Gap between the focused card and the collection.
    pub bottom_space: f32,
    /// Horizontal inset of the focused card from each view edge.
    pub horizontal_space: f32,
    /// Leading edge of the host view.
    pub view_min_x: f32,
    /// Width of the host view.
    pub view_width: f32,
    /// Distance of the dial's top edge above the view's bottom edge.
    pub dial_top_inset: f32,
    /// How much wider than the view the tracking ring is.
    pub ring_extra_diameter: f32,
    /// Distance of the tracking ring's top edge above the view's bottom edge.
    pub ring_top_inset: f32,
    /// Collection height as a fraction of the screen height.
    pub collection_height_fraction: f32,
    /// Previous/next accessory button width.
    pub accessory_width: f32,
    /// Previous/next accessory button height.
    pub accessory_height: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            top_space: 74.0,
            bottom_space: 20.0,
            horizontal_space: 75.0,
            view_min_x: 0.0,
            view_width: 375.0,
            dial_top_inset: 60.0,
            ring_extra_diameter: 15.0,
            ring_top_inset: 67.5,
            collection_height_fraction: 1.0 / 3.0,
            accessory_width: 44.0,
            accessory_height: 64.0,
        }
    }
}

impl LayoutMetrics {
    /// Set the host view width (builder).
    #[must_use]
    pub fn with_view_width(mut self, width: f32) -> Self {
        self.view_width = width;
        self
    }

    /// Set the focused card's horizontal inset (builder).
    #[must_use]
    pub fn with_horizontal_space(mut self, space: f32) -> Self {
        self.horizontal_space = space;
        self
    }

    /// Focused card width. Never negative.
    pub fn card_width(&self) -> f32 {
        (self.view_width - self.horizontal_space * 2.0).max(0.0)
    }

    /// Leading x of a focused card at rest.
    pub fn resting_x(&self) -> f32 {
        self.view_min_x + self.horizontal_space
    }

    /// Leading x that puts a card fully beyond the view's leading edge.
    pub fn leading_offscreen_x(&self) -> f32 {
        self.view_min_x - self.card_width()
    }

    /// Leading x that puts a card fully beyond the view's trailing edge.
    pub fn trailing_offscreen_x(&self) -> f32 {
        self.view_min_x + self.view_width
    }

    /// Diameter of the rotating tracking ring.
    pub fn ring_diameter(&self) -> f32 {
        self.view_width + self.ring_extra_diameter
    }

    /// Height of the card collection for a given screen height.
    pub fn collection_height(&self, screen_height: f32) -> f32 {
        screen_height * self.collection_height_fraction
    }
}

/// Durations and curve parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransitionTiming {
    /// Crossfade length for [`TransitionStyle::Fade`].
    pub fade: Duration,
    /// Spring length for [`TransitionStyle::Slide`].
    pub slide: Duration,
    /// Spring damping ratio; 1.0 is critically damped.
    pub spring_damping: f32,
    /// Spring initial velocity, in travel distances per second.
    pub spring_velocity: f32,
    /// Crossfade length when a background override is set.
    pub background_override: Duration,
    /// Length of the shake nudge.
    pub shake: Duration,
    /// Horizontal reach of the shake nudge, in points.
    pub shake_amplitude: f32,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            fade: Duration::from_millis(500),
            slide: Duration::from_millis(800),
            spring_damping: 0.8,
            spring_velocity: 0.9,
            background_override: Duration::from_millis(300),
            shake: Duration::from_millis(500),
            shake_amplitude: 10.0,
        }
    }
}

impl TransitionTiming {
    /// Length of a transition in the given style.
    pub fn duration_for(&self, style: TransitionStyle) -> Duration {
        match style {
            TransitionStyle::Fade => self.fade,
            TransitionStyle::Slide => self.slide,
        }
    }
}

/// Everything the controller needs up front.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardSelectionConfig {
    /// How the focused card changes.
    pub style: TransitionStyle,
    /// Static background; when set, the per-card background crossfade is
    /// bypassed.
    pub background_image: Option<ImageRef>,
    pub layout: LayoutMetrics,
    pub timing: TransitionTiming,
    /// How far (in points) a card's center may be from the collection's
    /// center and still count as centered for the dial.
    pub dial_tolerance: f32,
}

impl Default for CardSelectionConfig {
    fn default() -> Self {
        Self {
            style: TransitionStyle::default(),
            background_image: None,
            layout: LayoutMetrics::default(),
            timing: TransitionTiming::default(),
            dial_tolerance: 20.0,
        }
    }
}

impl CardSelectionConfig {
    /// Set the transition style.
    #[must_use]
    pub fn with_style(mut self, style: TransitionStyle) -> Self {
        self.style = style;
        self
    }

    /// Set a static background image.
    #[must_use]
    pub fn with_background_image(mut self, image: ImageRef) -> Self {
        self.background_image = Some(image);
        self
    }

    /// Set the layout metrics.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutMetrics) -> Self {
        self.layout = layout;
        self
    }

    /// Set the timing parameters.
    #[must_use]
    pub fn with_timing(mut self, timing: TransitionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set the dial centering tolerance.
    #[must_use]
    pub fn with_dial_tolerance(mut self, tolerance: f32) -> Self {
        self.dial_tolerance = tolerance;
        self
    }
}
