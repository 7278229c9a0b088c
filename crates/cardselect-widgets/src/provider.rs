#![forbid(unsafe_code)]

//! Host-supplied content and action handling.

use crate::card::{Card, CardAction};
use crate::selection::IndexPath;

/// Source of the cards shown by the control.
///
/// Cards are requested each time they are needed and never cached, so a
/// provider may hand out fresh values after its data changes (follow up with
/// [`SelectionController::reload_data`](crate::controller::SelectionController::reload_data)).
pub trait CardProvider {
    /// Number of cards. The control shows a single section, section 0.
    fn card_count(&self) -> usize;

    /// The card at `index`, or `None` if there is none.
    fn card_at(&self, index: IndexPath) -> Option<Card>;
}

impl CardProvider for Vec<Card> {
    fn card_count(&self) -> usize {
        self.len()
    }

    fn card_at(&self, index: IndexPath) -> Option<Card> {
        self.get(index.row).cloned()
    }
}

impl CardProvider for [Card] {
    fn card_count(&self) -> usize {
        self.len()
    }

    fn card_at(&self, index: IndexPath) -> Option<Card> {
        self.get(index.row).cloned()
    }
}

/// Receiver of the user's taps on the focused card.
pub trait CardSelectionDelegate {
    /// One of the focused card's action buttons was pressed.
    fn did_select_card_action(&mut self, action: &CardAction, index: IndexPath);

    /// The focused card's detail area was pressed.
    fn did_select_detail_action(&mut self, index: IndexPath);
}
