#![forbid(unsafe_code)]

//! The focused-card transition state machine.
//!
//! [`TransitionEngine`] is either idle or animating exactly one transition.
//! A transition stages the new card in the inactive buffer, drives both
//! buffers (and the background crossfade) from one curve, and on completion
//! commits: the outgoing buffer is emptied and the active flag flips.
//!
//! # Reentrancy
//!
//! A request that arrives while animating supersedes the in-flight
//! transition. The old curve is interrupted and committed at once in its
//! final state, so the flip count always equals the number of transitions
//! accepted, then the new transition starts from that settled arrangement.
//! Asking again for the target already in flight is ignored.
//!
//! # Time
//!
//! Nothing advances on its own; the owner calls [`TransitionEngine::tick`]
//! once per frame.

use std::time::Duration;

use cardselect_core::animation::{
    Animation, Fade, Keyframes, Milestone, Milestones, Spring, ease_in_out, lerp,
};

use crate::background::BackgroundBuffers;
use crate::card::{Card, ImageRef};
use crate::config::{CardSelectionConfig, LayoutMetrics, TransitionTiming};
use crate::event::CardSelectionEvent;
use crate::logging::{debug, debug_span, trace};
use crate::presenter::{BufferSlot, DualBufferPresenter, VisualState};
use crate::selection::{BufferId, IndexPath};

/// How the focused card changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransitionStyle {
    /// Crossfade in place.
    #[default]
    Fade,
    /// Horizontal spring slide.
    Slide,
}

/// Which way a slide moves the cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideDirection {
    /// Cards move toward the leading edge; the new card enters from the
    /// trailing side.
    Left,
    /// Cards move toward the trailing edge; the new card enters from the
    /// leading side.
    Right,
}

impl SlideDirection {
    /// Direction of travel from `previous` to `target`: left when moving to a
    /// later row (or from nothing), right otherwise.
    pub fn between(previous: Option<IndexPath>, target: IndexPath) -> Self {
        match previous {
            Some(previous) if target.row <= previous.row => Self::Right,
            _ => Self::Left,
        }
    }
}

/// What the engine is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Animating {
        target: IndexPath,
        style: TransitionStyle,
        direction: SlideDirection,
    },
}

/// A committed transition: `index` is now shown by buffer `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub index: IndexPath,
    pub active: BufferId,
}

/// Result of [`TransitionEngine::transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// A transition began. `superseded` is the commit of the transition it
    /// cut short, if any.
    Started { superseded: Option<Commit> },
    /// The request named the target already in flight.
    Ignored,
}

/// The curve driving a transition.
#[derive(Debug, Clone)]
pub enum TransitionCurve {
    Fade(Fade),
    Spring(Spring),
}

impl TransitionCurve {
    fn for_style(style: TransitionStyle, timing: &TransitionTiming) -> Self {
        match style {
            TransitionStyle::Fade => Self::Fade(Fade::new(timing.fade).easing(ease_in_out)),
            TransitionStyle::Slide => Self::Spring(Spring::new(
                timing.slide,
                timing.spring_damping,
                timing.spring_velocity,
            )),
        }
    }

    /// Position along the transition. Unlike [`Animation::value`] this keeps
    /// spring overshoot.
    pub fn position(&self) -> f32 {
        match self {
            Self::Fade(fade) => fade.value(),
            Self::Spring(spring) => spring.raw_value(),
        }
    }
}

impl Animation for TransitionCurve {
    fn tick(&mut self, dt: Duration) {
        match self {
            Self::Fade(a) => a.tick(dt),
            Self::Spring(a) => a.tick(dt),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Fade(a) => a.is_complete(),
            Self::Spring(a) => a.is_complete(),
        }
    }

    fn value(&self) -> f32 {
        match self {
            Self::Fade(a) => a.value(),
            Self::Spring(a) => a.value(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Fade(a) => a.reset(),
            Self::Spring(a) => a.reset(),
        }
    }

    fn overshoot(&self) -> Duration {
        match self {
            Self::Fade(a) => a.overshoot(),
            Self::Spring(a) => a.overshoot(),
        }
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    target: IndexPath,
    incoming: BufferId,
    outgoing: BufferId,
    direction: SlideDirection,
    curve: Milestones<TransitionCurve>,
}

/// Start x of the incoming card and end x of the outgoing card for a slide.
fn slide_endpoints(layout: &LayoutMetrics, direction: SlideDirection) -> (f32, f32) {
    match direction {
        SlideDirection::Left => (layout.trailing_offscreen_x(), layout.leading_offscreen_x()),
        SlideDirection::Right => (layout.leading_offscreen_x(), layout.trailing_offscreen_x()),
    }
}

/// Drives the focused-card buffers and the background between selections.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    style: TransitionStyle,
    timing: TransitionTiming,
    layout: LayoutMetrics,
    presenter: DualBufferPresenter,
    background: BackgroundBuffers,
    in_flight: Option<InFlight>,
    shake: Option<Keyframes>,
}

impl TransitionEngine {
    /// Idle engine with empty buffers. A configured background image is
    /// requested immediately.
    pub fn new(config: &CardSelectionConfig, out: &mut Vec<CardSelectionEvent>) -> Self {
        let background = match &config.background_image {
            Some(image) => BackgroundBuffers::with_override(image.clone(), out),
            None => BackgroundBuffers::new(),
        };
        Self {
            style: config.style,
            timing: config.timing,
            layout: config.layout,
            presenter: DualBufferPresenter::new(config.layout.resting_x()),
            background,
            in_flight: None,
            shake: None,
        }
    }

    pub fn style(&self) -> TransitionStyle {
        self.style
    }

    pub fn layout(&self) -> &LayoutMetrics {
        &self.layout
    }

    pub fn presenter(&self) -> &DualBufferPresenter {
        &self.presenter
    }

    pub fn background(&self) -> &BackgroundBuffers {
        &self.background
    }

    pub fn phase(&self) -> TransitionPhase {
        match &self.in_flight {
            None => TransitionPhase::Idle,
            Some(flight) => TransitionPhase::Animating {
                target: flight.target,
                style: self.style,
                direction: flight.direction,
            },
        }
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Eased progress of the in-flight transition.
    pub fn progress(&self) -> Option<f32> {
        self.in_flight.as_ref().map(|flight| flight.curve.value())
    }

    /// The buffer showing the card the user is heading to: the incoming one
    /// while animating, the active one at rest.
    pub fn focused_slot(&self) -> &BufferSlot {
        match &self.in_flight {
            Some(flight) => self.presenter.slot(flight.incoming),
            None => self.presenter.active_slot(),
        }
    }

    /// Begin a transition to `card` at `index`. `previous` is the logical
    /// selection the transition departs from and decides the slide direction.
    pub fn transition_to(
        &mut self,
        card: &Card,
        index: IndexPath,
        previous: Option<IndexPath>,
        out: &mut Vec<CardSelectionEvent>,
    ) -> TransitionOutcome {
        let _span = debug_span!("transition_to", section = index.section, row = index.row).entered();

        if self.in_flight.as_ref().is_some_and(|flight| flight.target == index) {
            trace!(row = index.row, "target already in flight");
            return TransitionOutcome::Ignored;
        }
        let superseded = self.supersede(out);
        self.stop_shake();

        let direction = SlideDirection::between(previous, index);
        let incoming = self.presenter.inactive_id();
        let outgoing = self.presenter.active_id();
        self.presenter
            .populate(incoming, Some(card.clone()), Some(index), out);
        self.background.stage(card, out);

        let rest = self.layout.resting_x();
        match self.style {
            TransitionStyle::Fade => {
                self.presenter.set_visual(
                    incoming,
                    VisualState {
                        alpha: 0.0,
                        x: rest,
                        hidden: false,
                    },
                );
            }
            TransitionStyle::Slide => {
                let (start, _) = slide_endpoints(&self.layout, direction);
                self.presenter.set_visual(incoming, VisualState::shown(start));
            }
        }
        self.presenter.set_visual(outgoing, VisualState::shown(rest));

        self.in_flight = Some(InFlight {
            target: index,
            incoming,
            outgoing,
            direction,
            curve: Milestones::new(TransitionCurve::for_style(self.style, &self.timing)).on_finish(),
        });
        out.push(CardSelectionEvent::TransitionStarted {
            index,
            style: self.style,
            direction,
        });
        debug!(
            section = index.section,
            row = index.row,
            style = ?self.style,
            direction = ?direction,
            superseded = superseded.is_some(),
            "transition started"
        );
        TransitionOutcome::Started { superseded }
    }

    /// Advance by one frame. Returns the commit if the in-flight transition
    /// finished during this tick.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<CardSelectionEvent>) -> Option<Commit> {
        self.background.tick(dt, out);
        self.tick_shake(dt);

        let finished = {
            let flight = self.in_flight.as_mut()?;
            flight.curve.tick(dt);
            flight.curve.drain().contains(&Milestone::Finished)
        };
        self.apply_progress();
        if !finished {
            return None;
        }
        let flight = self.in_flight.take()?;
        Some(self.finish(flight, out))
    }

    /// Commit the in-flight transition immediately, if there is one.
    pub fn settle(&mut self, out: &mut Vec<CardSelectionEvent>) -> Option<Commit> {
        self.stop_shake();
        let mut flight = self.in_flight.take()?;
        flight.curve.interrupt();
        Some(self.finish(flight, out))
    }

    /// Show `card` at `index` in the active buffer without animating.
    pub fn present(&mut self, card: &Card, index: IndexPath, out: &mut Vec<CardSelectionEvent>) {
        debug_assert!(self.in_flight.is_none(), "present while animating");
        let rest = self.layout.resting_x();
        let active = self.presenter.active_id();
        self.presenter
            .populate(active, Some(card.clone()), Some(index), out);
        self.presenter.set_visual(active, VisualState::shown(rest));
        let inactive = self.presenter.inactive_id();
        self.presenter.clear(inactive, out);
        self.presenter.set_visual(inactive, VisualState::hidden(rest));
        self.background.show(card, out);
    }

    /// Drop all content: no transition, empty buffers, empty background
    /// layers.
    pub fn clear_all(&mut self, out: &mut Vec<CardSelectionEvent>) {
        self.in_flight = None;
        self.shake = None;
        self.presenter.reset(self.layout.resting_x(), out);
        self.background.clear(out);
    }

    /// Nudge the focused card side to side. Returns `false` (and does
    /// nothing) while animating or with nothing shown.
    pub fn shake(&mut self) -> bool {
        if self.in_flight.is_some() || self.presenter.active_slot().is_empty() {
            return false;
        }
        self.shake = Some(Keyframes::shake(
            self.timing.shake_amplitude,
            self.timing.shake,
        ));
        true
    }

    /// Relayout for a new host view width.
    pub fn set_view_width(&mut self, width: f32) {
        self.layout.view_width = width;
        if self.in_flight.is_some() {
            self.apply_progress();
        } else {
            let rest = self.layout.resting_x();
            let active = self.presenter.active_id();
            self.presenter.set_visual(active, VisualState::shown(rest));
            let inactive = self.presenter.inactive_id();
            self.presenter.set_visual(inactive, VisualState::hidden(rest));
        }
    }

    /// Set or remove the static background. Removing an existing override
    /// restores the focused card's image as the background; removing when
    /// none is set leaves the card crossfade untouched.
    pub fn set_background_override(
        &mut self,
        image: Option<ImageRef>,
        out: &mut Vec<CardSelectionEvent>,
    ) {
        if image.is_none() && !self.background.is_overridden() {
            return;
        }
        let removing = image.is_none();
        self.background
            .set_override(image, self.timing.background_override, out);
        if removing {
            if let Some(card) = self.focused_slot().card().cloned() {
                self.background.show(&card, out);
            }
        }
    }

    fn supersede(&mut self, out: &mut Vec<CardSelectionEvent>) -> Option<Commit> {
        let target = self.in_flight.as_ref()?.target;
        out.push(CardSelectionEvent::TransitionSuperseded { index: target });
        debug!(section = target.section, row = target.row, "transition superseded");
        self.settle(out)
    }

    fn finish(&mut self, flight: InFlight, out: &mut Vec<CardSelectionEvent>) -> Commit {
        let rest = self.layout.resting_x();
        self.presenter.swap_active();
        self.presenter.clear(flight.outgoing, out);
        self.presenter
            .set_visual(flight.outgoing, VisualState::hidden(rest));
        self.presenter
            .set_visual(flight.incoming, VisualState::shown(rest));
        self.background.commit(out);

        let commit = Commit {
            index: flight.target,
            active: flight.incoming,
        };
        out.push(CardSelectionEvent::TransitionCommitted {
            index: commit.index,
            active: commit.active,
        });
        debug!(
            section = commit.index.section,
            row = commit.index.row,
            active = ?commit.active,
            "transition committed"
        );
        commit
    }

    fn apply_progress(&mut self) {
        let Some(flight) = &self.in_flight else {
            return;
        };
        let rest = self.layout.resting_x();
        let progress = flight.curve.value();
        match self.style {
            TransitionStyle::Fade => {
                self.presenter.set_visual(
                    flight.incoming,
                    VisualState {
                        alpha: progress,
                        x: rest,
                        hidden: false,
                    },
                );
                self.presenter.set_visual(
                    flight.outgoing,
                    VisualState {
                        alpha: 1.0 - progress,
                        x: rest,
                        hidden: false,
                    },
                );
            }
            TransitionStyle::Slide => {
                let position = flight.curve.inner().position();
                let (start, end) = slide_endpoints(&self.layout, flight.direction);
                self.presenter
                    .set_visual(flight.incoming, VisualState::shown(lerp(start, rest, position)));
                self.presenter
                    .set_visual(flight.outgoing, VisualState::shown(lerp(rest, end, position)));
            }
        }
        self.background.blend(progress);
    }

    fn tick_shake(&mut self, dt: Duration) {
        let Some(shake) = self.shake.as_mut() else {
            return;
        };
        shake.tick(dt);
        let rest = self.layout.resting_x();
        let active = self.presenter.active_id();
        if shake.is_complete() {
            self.shake = None;
            self.presenter.set_visual(active, VisualState::shown(rest));
        } else {
            let x = rest + shake.offset();
            self.presenter.set_visual(active, VisualState::shown(x));
        }
    }

    fn stop_shake(&mut self) {
        if self.shake.take().is_some() {
            let active = self.presenter.active_id();
            self.presenter
                .set_visual(active, VisualState::shown(self.layout.resting_x()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn card(name: &str) -> Card {
        Card::new(name, ImageRef::new(format!("{name}.png")))
    }

    fn engine(style: TransitionStyle) -> (TransitionEngine, Vec<CardSelectionEvent>) {
        let mut out = Vec::new();
        let config = CardSelectionConfig::default().with_style(style);
        let mut engine = TransitionEngine::new(&config, &mut out);
        engine.present(&card("a"), IndexPath::row(0), &mut out);
        out.clear();
        (engine, out)
    }

    fn run_to_commit(engine: &mut TransitionEngine, out: &mut Vec<CardSelectionEvent>) -> Commit {
        for _ in 0..200 {
            if let Some(commit) = engine.tick(FRAME, out) {
                return commit;
            }
        }
        panic!("transition never committed");
    }

    #[test]
    fn direction_from_rows() {
        assert_eq!(
            SlideDirection::between(Some(IndexPath::row(1)), IndexPath::row(2)),
            SlideDirection::Left
        );
        assert_eq!(
            SlideDirection::between(Some(IndexPath::row(2)), IndexPath::row(1)),
            SlideDirection::Right
        );
        assert_eq!(
            SlideDirection::between(None, IndexPath::row(0)),
            SlideDirection::Left
        );
    }

    #[test]
    fn fade_crossfades_and_commits() {
        let (mut engine, mut out) = engine(TransitionStyle::Fade);
        let outcome = engine.transition_to(&card("b"), IndexPath::row(1), Some(IndexPath::row(0)), &mut out);
        assert_eq!(outcome, TransitionOutcome::Started { superseded: None });
        assert!(engine.is_animating());
        assert_eq!(engine.focused_slot().card(), Some(&card("b")));

        engine.tick(Duration::from_millis(250), &mut out);
        let incoming = engine.presenter().slot(BufferId::B).visual();
        let outgoing = engine.presenter().slot(BufferId::A).visual();
        assert!(incoming.alpha > 0.0 && incoming.alpha < 1.0);
        assert!((incoming.alpha + outgoing.alpha - 1.0).abs() < 1e-5);

        let commit = engine.tick(Duration::from_millis(250), &mut out);
        assert_eq!(
            commit,
            Some(Commit {
                index: IndexPath::row(1),
                active: BufferId::B
            })
        );
        assert!(!engine.is_animating());
        assert!(engine.presenter().is_settled(engine.layout().resting_x()));
        assert!(engine.presenter().slot(BufferId::A).is_empty());
    }

    #[test]
    fn slide_enters_from_trailing_side_when_moving_forward() {
        let (mut engine, mut out) = engine(TransitionStyle::Slide);
        engine.transition_to(&card("b"), IndexPath::row(1), Some(IndexPath::row(0)), &mut out);
        let layout = *engine.layout();
        assert_eq!(
            engine.presenter().slot(BufferId::B).visual().x,
            layout.trailing_offscreen_x()
        );

        engine.tick(Duration::from_millis(100), &mut out);
        let incoming = engine.presenter().slot(BufferId::B).visual().x;
        let outgoing = engine.presenter().slot(BufferId::A).visual().x;
        assert!(incoming < layout.trailing_offscreen_x());
        assert!(outgoing < layout.resting_x());

        let commit = run_to_commit(&mut engine, &mut out);
        assert_eq!(commit.active, BufferId::B);
        assert_eq!(
            engine.presenter().active_slot().visual(),
            VisualState::shown(layout.resting_x())
        );
    }

    #[test]
    fn slide_backwards_enters_from_leading_side() {
        let (mut engine, mut out) = engine(TransitionStyle::Slide);
        engine.transition_to(&card("z"), IndexPath::row(0), Some(IndexPath::row(3)), &mut out);
        assert_eq!(
            engine.presenter().slot(BufferId::B).visual().x,
            engine.layout().leading_offscreen_x()
        );
    }

    #[test]
    fn same_target_is_ignored() {
        let (mut engine, mut out) = engine(TransitionStyle::Fade);
        engine.transition_to(&card("b"), IndexPath::row(1), Some(IndexPath::row(0)), &mut out);
        let outcome = engine.transition_to(&card("b"), IndexPath::row(1), Some(IndexPath::row(1)), &mut out);
        assert_eq!(outcome, TransitionOutcome::Ignored);
    }

    #[test]
    fn new_request_supersedes_in_flight() {
        let (mut engine, mut out) = engine(TransitionStyle::Fade);
        engine.transition_to(&card("b"), IndexPath::row(1), Some(IndexPath::row(0)), &mut out);
        engine.tick(FRAME, &mut out);
        out.clear();

        let outcome = engine.transition_to(&card("c"), IndexPath::row(2), Some(IndexPath::row(1)), &mut out);
        let first = Commit {
            index: IndexPath::row(1),
            active: BufferId::B,
        };
        assert_eq!(outcome, TransitionOutcome::Started { superseded: Some(first) });
        assert_eq!(
            out.first(),
            Some(&CardSelectionEvent::TransitionSuperseded {
                index: IndexPath::row(1)
            })
        );
        assert!(out.contains(&CardSelectionEvent::TransitionCommitted {
            index: IndexPath::row(1),
            active: BufferId::B
        }));
        assert_eq!(engine.focused_slot().card(), Some(&card("c")));

        let second = run_to_commit(&mut engine, &mut out);
        assert_eq!(second.active, BufferId::A);
        assert_eq!(engine.presenter().active_slot().card(), Some(&card("c")));
    }

    #[test]
    fn settle_commits_immediately() {
        let (mut engine, mut out) = engine(TransitionStyle::Slide);
        engine.transition_to(&card("b"), IndexPath::row(1), Some(IndexPath::row(0)), &mut out);
        let commit = engine.settle(&mut out);
        assert_eq!(commit.map(|c| c.index), Some(IndexPath::row(1)));
        assert_eq!(engine.phase(), TransitionPhase::Idle);
        assert!(engine.settle(&mut out).is_none());
    }

    #[test]
    fn background_tracks_transition() {
        let (mut engine, mut out) = engine(TransitionStyle::Slide);
        engine.transition_to(&card("b"), IndexPath::row(1), Some(IndexPath::row(0)), &mut out);
        assert!(engine.background().is_staged());
        run_to_commit(&mut engine, &mut out);
        let bg = engine.background();
        assert_eq!(
            bg.layer(bg.active_id()).image(),
            Some(&ImageRef::new("b.png"))
        );
        assert!(!bg.is_staged());
    }

    #[test]
    fn shake_only_at_rest() {
        let (mut engine, mut out) = engine(TransitionStyle::Fade);
        assert!(engine.shake());
        engine.tick(Duration::from_millis(62), &mut out);
        let rest = engine.layout().resting_x();
        assert!(engine.presenter().active_slot().visual().x > rest);
        engine.tick(Duration::from_millis(500), &mut out);
        assert!(!engine.is_shaking());
        assert_eq!(engine.presenter().active_slot().visual().x, rest);

        engine.transition_to(&card("b"), IndexPath::row(1), Some(IndexPath::row(0)), &mut out);
        assert!(!engine.shake());
    }

    #[test]
    fn removing_override_restores_focused_background() {
        let (mut engine, mut out) = engine(TransitionStyle::Fade);
        engine.set_background_override(Some(ImageRef::new("static.png")), &mut out);
        engine.tick(Duration::from_millis(300), &mut out);
        assert!(engine.background().layer(BufferId::A).image().is_none());

        engine.set_background_override(None, &mut out);
        let bg = engine.background();
        assert_eq!(bg.layer(bg.active_id()).image(), Some(&ImageRef::new("a.png")));
    }

    #[test]
    fn view_width_moves_resting_position() {
        let (mut engine, _) = engine(TransitionStyle::Fade);
        engine.set_view_width(500.0);
        assert_eq!(engine.layout().card_width(), 350.0);
        assert!(engine.presenter().is_settled(75.0));
    }
}
