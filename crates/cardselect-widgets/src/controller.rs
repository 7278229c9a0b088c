#![forbid(unsafe_code)]

//! The selection controller.
//!
//! [`SelectionController`] is the control's public face. It turns navigation
//! commands into transitions, feeds scroll notifications to the dial, routes
//! taps on the focused card to the delegate, and collects everything the host
//! has to act on as [`CardSelectionEvent`]s.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use cardselect_widgets::card::{Card, ImageRef};
//! use cardselect_widgets::config::CardSelectionConfig;
//! use cardselect_widgets::controller::SelectionController;
//!
//! let cards = vec![
//!     Card::new("Monday", ImageRef::new("mon.png")),
//!     Card::new("Tuesday", ImageRef::new("tue.png")),
//! ];
//! let mut control = SelectionController::new(CardSelectionConfig::default());
//! control.set_provider(cards);
//! control.reload_data();
//!
//! assert!(control.select_next());
//! for _ in 0..40 {
//!     control.tick(Duration::from_millis(16));
//! }
//! assert_eq!(control.focused_card().map(Card::title), Some("Tuesday"));
//! let events = control.drain_events();
//! assert!(!events.is_empty());
//! ```
//!
//! Navigation never fails loudly: out-of-range requests, a missing provider,
//! and re-selecting the current target all return `false` and change nothing.

use std::fmt;
use std::time::Duration;

use crate::card::{ActionSlot, Card, ImageRef};
use crate::config::CardSelectionConfig;
use crate::dial::{DialSync, DialUpdate, ScrollSnapshot};
use crate::event::CardSelectionEvent;
use crate::logging::{debug, trace};
use crate::presenter::DualBufferPresenter;
use crate::provider::{CardProvider, CardSelectionDelegate};
use crate::selection::{IndexPath, SelectionState};
use crate::transition::{Commit, TransitionEngine, TransitionOutcome, TransitionPhase};

/// Card carousel selection control.
pub struct SelectionController {
    config: CardSelectionConfig,
    provider: Option<Box<dyn CardProvider>>,
    delegate: Option<Box<dyn CardSelectionDelegate>>,
    selection: SelectionState,
    engine: TransitionEngine,
    dial: DialSync,
    events: Vec<CardSelectionEvent>,
}

impl fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("config", &self.config)
            .field("has_provider", &self.provider.is_some())
            .field("has_delegate", &self.delegate.is_some())
            .field("selection", &self.selection)
            .field("phase", &self.engine.phase())
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(CardSelectionConfig::default())
    }
}

impl SelectionController {
    /// A control with no provider yet. Call [`reload_data`](Self::reload_data)
    /// after setting one.
    pub fn new(config: CardSelectionConfig) -> Self {
        let mut events = Vec::new();
        let engine = TransitionEngine::new(&config, &mut events);
        let dial = DialSync::new(config.dial_tolerance);
        Self {
            config,
            provider: None,
            delegate: None,
            selection: SelectionState::new(),
            engine,
            dial,
            events,
        }
    }

    pub fn set_provider<P: CardProvider + 'static>(&mut self, provider: P) {
        self.provider = Some(Box::new(provider));
    }

    pub fn set_delegate<D: CardSelectionDelegate + 'static>(&mut self, delegate: D) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn config(&self) -> &CardSelectionConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    pub fn presenter(&self) -> &DualBufferPresenter {
        self.engine.presenter()
    }

    pub fn dial(&self) -> &DialSync {
        &self.dial
    }

    pub fn phase(&self) -> TransitionPhase {
        self.engine.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    /// The card the user is heading to: the incoming card while animating,
    /// the shown card at rest.
    pub fn focused_card(&self) -> Option<&Card> {
        self.engine.focused_slot().card()
    }

    /// Number of cards, or 0 without a provider.
    pub fn card_count(&self) -> usize {
        self.provider.as_ref().map_or(0, |p| p.card_count())
    }

    /// Events queued since the last drain.
    pub fn pending_events(&self) -> &[CardSelectionEvent] {
        &self.events
    }

    /// Take the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<CardSelectionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Re-read the provider and show the selected card without animating.
    ///
    /// An in-flight transition is committed first. The selection is kept when
    /// still in range, clamped to the last card otherwise, and defaults to the
    /// first card.
    pub fn reload_data(&mut self) {
        let settled = self.engine.settle(&mut self.events);
        self.apply_commit(settled);

        let count = self.card_count();
        let index = match self.selection.current() {
            Some(current) => IndexPath {
                row: current.row.min(count.saturating_sub(1)),
                ..current
            },
            None => IndexPath::default(),
        };
        let card = match &self.provider {
            Some(provider) if count > 0 => provider.card_at(index),
            _ => None,
        };
        let Some(card) = card else {
            self.engine.clear_all(&mut self.events);
            self.selection.clear();
            self.dial.reset();
            debug!(count, "reloaded without cards");
            return;
        };

        self.engine.present(&card, index, &mut self.events);
        self.selection.settle_at(index);
        self.events.push(CardSelectionEvent::ScrollToItem {
            index,
            animated: false,
        });
        debug!(count, section = index.section, row = index.row, "reloaded");
    }

    /// Move to the card after the current target. Returns whether a
    /// transition started.
    pub fn select_next(&mut self) -> bool {
        match self.selection.next_candidate(self.card_count()) {
            Some(index) => self.begin(index),
            None => {
                trace!(previous = ?self.selection.previous(), "select_next ignored");
                false
            }
        }
    }

    /// Move to the card before the current target. Returns whether a
    /// transition started.
    pub fn select_previous(&mut self) -> bool {
        match self.selection.previous_candidate(self.card_count()) {
            Some(index) => self.begin(index),
            None => {
                trace!(previous = ?self.selection.previous(), "select_previous ignored");
                false
            }
        }
    }

    /// Jump to `index`. Out-of-range indices and the current target are
    /// ignored. The provider's count describes section 0 only, so any other
    /// section is out of range.
    pub fn select_index(&mut self, index: IndexPath) -> bool {
        if index.section != 0
            || index.row >= self.card_count()
            || self.selection.previous() == Some(index)
        {
            trace!(section = index.section, row = index.row, "select_index ignored");
            return false;
        }
        self.begin(index)
    }

    /// Advance animations by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let commit = self.engine.tick(dt, &mut self.events);
        self.apply_commit(commit);
    }

    /// Commit any in-flight transition now.
    pub fn settle(&mut self) {
        let commit = self.engine.settle(&mut self.events);
        self.apply_commit(commit);
    }

    /// Feed a scroll notification to the dial.
    pub fn on_scroll(&mut self, snapshot: &ScrollSnapshot<'_>) -> DialUpdate {
        let update = self.dial.on_scroll(snapshot);
        if let Some(label) = &update.label_changed {
            self.events.push(CardSelectionEvent::DialLabelChanged {
                label: label.clone(),
            });
        }
        update
    }

    /// Report a press of the focused card's action button to the delegate.
    /// Returns `false` when there is no such action, card or delegate.
    pub fn press_card_action(&mut self, slot: ActionSlot) -> bool {
        let focused = self.engine.focused_slot();
        let (Some(card), Some(index)) = (focused.card(), focused.index()) else {
            return false;
        };
        let (Some(action), Some(delegate)) = (card.action(slot), self.delegate.as_mut()) else {
            return false;
        };
        delegate.did_select_card_action(action, index);
        true
    }

    /// Report a press of the focused card's detail area to the delegate.
    pub fn press_detail_action(&mut self) -> bool {
        let Some(index) = self.engine.focused_slot().index() else {
            return false;
        };
        let Some(delegate) = self.delegate.as_mut() else {
            return false;
        };
        delegate.did_select_detail_action(index);
        true
    }

    /// Nudge the focused card. Returns `false` while animating or empty.
    pub fn shake(&mut self) -> bool {
        self.engine.shake()
    }

    /// Set or remove the static background image.
    pub fn set_background_image(&mut self, image: Option<ImageRef>) {
        self.config.background_image.clone_from(&image);
        self.engine.set_background_override(image, &mut self.events);
    }

    /// Relayout for a new host view width.
    pub fn set_view_width(&mut self, width: f32) {
        self.config.layout.view_width = width;
        self.engine.set_view_width(width);
    }

    fn begin(&mut self, index: IndexPath) -> bool {
        let Some(card) = self.provider.as_ref().and_then(|p| p.card_at(index)) else {
            trace!(row = index.row, "provider has no card");
            return false;
        };
        let mark = self.events.len();
        self.events.push(CardSelectionEvent::ScrollToItem {
            index,
            animated: true,
        });
        let previous = self.selection.previous();
        match self
            .engine
            .transition_to(&card, index, previous, &mut self.events)
        {
            TransitionOutcome::Started { superseded } => {
                self.apply_commit(superseded);
                self.selection.record_target(index);
                true
            }
            TransitionOutcome::Ignored => {
                self.events.truncate(mark);
                false
            }
        }
    }

    fn apply_commit(&mut self, commit: Option<Commit>) {
        if let Some(commit) = commit {
            self.selection.commit(commit.index, commit.active);
        }
    }
}
