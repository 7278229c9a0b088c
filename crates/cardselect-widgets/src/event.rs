#![forbid(unsafe_code)]

//! Requests and notifications for the host.
//!
//! The control never loads images or scrolls the collection itself. It
//! queues [`CardSelectionEvent`]s while handling commands and ticks, and the
//! host drains them with
//! [`SelectionController::drain_events`](crate::controller::SelectionController::drain_events),
//! in order, after each call.

use crate::card::ImageRef;
use crate::selection::{BufferId, IndexPath};
use crate::transition::{SlideDirection, TransitionStyle};

/// Which image view an image request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageTarget {
    /// The image inside a focused-card buffer.
    Focused(BufferId),
    /// One of the two stacked background images.
    Background(BufferId),
    /// The static background override.
    Override,
}

/// Something the host should do or may want to know.
#[derive(Debug, Clone, PartialEq)]
pub enum CardSelectionEvent {
    /// Load `image` into `target`, showing `placeholder` until it arrives.
    LoadImage {
        target: ImageTarget,
        image: ImageRef,
        placeholder: Option<ImageRef>,
    },
    /// Drop whatever image `target` holds.
    ClearImage { target: ImageTarget },
    /// Scroll the collection so `index` is centered.
    ScrollToItem { index: IndexPath, animated: bool },
    /// A transition toward `index` began.
    TransitionStarted {
        index: IndexPath,
        style: TransitionStyle,
        direction: SlideDirection,
    },
    /// A transition toward `index` committed; `active` now shows it.
    TransitionCommitted { index: IndexPath, active: BufferId },
    /// The transition toward `index` was cut short by a newer request and
    /// committed in its final state.
    TransitionSuperseded { index: IndexPath },
    /// The dial should point at a new label.
    DialLabelChanged { label: String },
}
