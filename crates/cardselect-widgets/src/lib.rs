#![forbid(unsafe_code)]

//! Card carousel selection control.
//!
//! A horizontally scrolling card collection paired with a focused-card panel
//! and a dial. The focused panel is double buffered so cards can crossfade
//! or slide into place; the dial follows the scroll offset on its own.
//!
//! The control draws nothing. Hosts feed it commands, frame ticks and scroll
//! notifications through [`SelectionController`], read the buffer and
//! background state back for drawing, and act on the queued
//! [`CardSelectionEvent`]s.

pub mod background;
pub mod card;
pub mod config;
pub mod controller;
pub mod dial;
pub mod event;
#[doc(hidden)]
pub mod logging;
pub mod presenter;
pub mod provider;
pub mod selection;
pub mod transition;

pub use card::{ActionSlot, Card, CardAction, CardActionError, ImageRef};
pub use config::{CardSelectionConfig, LayoutMetrics, TransitionTiming};
pub use controller::SelectionController;
pub use dial::{DialSync, DialUpdate, ScrollSnapshot, VisibleCard};
pub use event::{CardSelectionEvent, ImageTarget};
pub use provider::{CardProvider, CardSelectionDelegate};
pub use selection::{BufferId, IndexPath, SelectionState};
pub use transition::{SlideDirection, TransitionPhase, TransitionStyle};
