#![forbid(unsafe_code)]

//! Dial synchronization.
//!
//! The dial follows the collection's scroll position continuously: its
//! pointer rotates with the offset, and its label switches to whichever card
//! is sitting at the collection's center. This runs on every scroll
//! notification and is independent of focused-card transitions.

use std::f32::consts::FRAC_PI_2;

use crate::logging::trace;
use crate::selection::IndexPath;

/// Dial rotation, in radians, for a scroll offset.
///
/// The full scrollable width maps onto a quarter turn. Returns 0.0 when the
/// content is no wider than the inset.
pub fn rotation_for(offset: f32, content_width: f32, inset: f32) -> f32 {
    let span = content_width - inset;
    if span.is_nan() || span <= 0.0 {
        return 0.0;
    }
    offset / (span / FRAC_PI_2)
}

/// A card cell currently on screen, as the host lays it out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleCard<'a> {
    pub index: IndexPath,
    /// Cell center x in the collection's visible coordinate space.
    pub center_x: f32,
    pub label: &'a str,
}

/// The visible card closest to `center_x`, if any lies within `tolerance`.
///
/// Equal distances go to the later card in `visible`.
pub fn nearest_centered_card<'v, 'a>(
    visible: &'v [VisibleCard<'a>],
    center_x: f32,
    tolerance: f32,
) -> Option<&'v VisibleCard<'a>> {
    let mut best: Option<(&VisibleCard<'a>, f32)> = None;
    for card in visible {
        let distance = (card.center_x - center_x).abs();
        if distance.is_nan() || distance > tolerance {
            continue;
        }
        match best {
            Some((_, nearest)) if distance > nearest => {}
            _ => best = Some((card, distance)),
        }
    }
    best.map(|(card, _)| card)
}

/// One scroll notification from the host.
#[derive(Debug, Clone, Copy)]
pub struct ScrollSnapshot<'a> {
    pub offset_x: f32,
    pub content_width: f32,
    /// Horizontal section insets, summed.
    pub section_inset: f32,
    /// The collection's visible center x.
    pub center_x: f32,
    pub visible: &'a [VisibleCard<'a>],
}

/// What a scroll notification changed.
#[derive(Debug, Clone, PartialEq)]
pub struct DialUpdate {
    pub rotation: f32,
    /// The new label, when the centered card's label differs from the last.
    pub label_changed: Option<String>,
}

/// Last rotation and label shown by the dial.
#[derive(Debug, Clone, PartialEq)]
pub struct DialSync {
    tolerance: f32,
    rotation: f32,
    label: Option<String>,
}

impl DialSync {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            rotation: 0.0,
            label: None,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Track a scroll notification.
    pub fn on_scroll(&mut self, snapshot: &ScrollSnapshot<'_>) -> DialUpdate {
        self.rotation = rotation_for(
            snapshot.offset_x,
            snapshot.content_width,
            snapshot.section_inset,
        );
        let label_changed = nearest_centered_card(snapshot.visible, snapshot.center_x, self.tolerance)
            .filter(|card| self.label.as_deref() != Some(card.label))
            .map(|card| {
                trace!(row = card.index.row, label = card.label, "dial label changed");
                card.label.to_owned()
            });
        if let Some(label) = &label_changed {
            self.label = Some(label.clone());
        }
        DialUpdate {
            rotation: self.rotation,
            label_changed,
        }
    }

    /// Forget the last label so the next centered card is reported again.
    pub fn reset(&mut self) {
        self.rotation = 0.0;
        self.label = None;
    }
}
