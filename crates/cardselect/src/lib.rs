#![forbid(unsafe_code)]

//! Card carousel selection control: public facade.
//!
//! Re-exports the control and its model types from the internal crates and
//! offers a small prelude for hosts.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cardselect_core::animation::{Animation, Fade, Keyframes, Spring};

// --- Control re-exports ----------------------------------------------------

pub use cardselect_widgets::card::{ActionSlot, Card, CardAction, CardActionError, ImageRef};
pub use cardselect_widgets::config::{CardSelectionConfig, LayoutMetrics, TransitionTiming};
pub use cardselect_widgets::controller::SelectionController;
pub use cardselect_widgets::dial::{DialUpdate, ScrollSnapshot, VisibleCard, rotation_for};
pub use cardselect_widgets::event::{CardSelectionEvent, ImageTarget};
pub use cardselect_widgets::presenter::{BufferSlot, VisualState};
pub use cardselect_widgets::provider::{CardProvider, CardSelectionDelegate};
pub use cardselect_widgets::selection::{BufferId, IndexPath};
pub use cardselect_widgets::transition::{SlideDirection, TransitionPhase, TransitionStyle};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A card action could not be built.
    CardAction(CardActionError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardAction(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CardAction(err) => Some(err),
        }
    }
}

impl From<CardActionError> for Error {
    fn from(err: CardActionError) -> Self {
        Self::CardAction(err)
    }
}

/// Standard result type for cardselect APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ActionSlot, Card, CardAction, CardProvider, CardSelectionConfig, CardSelectionDelegate,
        CardSelectionEvent, Error, ImageRef, IndexPath, Result, ScrollSnapshot,
        SelectionController, TransitionStyle, VisibleCard,
    };

    pub use crate::{core, widgets};
}

pub use cardselect_core as core;
pub use cardselect_widgets as widgets;
