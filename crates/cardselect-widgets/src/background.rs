#![forbid(unsafe_code)]

//! Background image crossfade.
//!
//! Two stacked background layers swap the same way the focused-card buffers
//! do, but they always crossfade, whatever the transition style. The
//! transition engine drives them with its own progress so the background and
//! the focused card land together.
//!
//! A static override image bypasses the pair: it fades in over its own short
//! duration, after which both layers are emptied and navigation leaves the
//! background alone until the override is removed.

use std::time::Duration;

use cardselect_core::animation::{Animation, Fade, ease_in_out};

use crate::card::{Card, ImageRef};
use crate::event::{CardSelectionEvent, ImageTarget};
use crate::selection::BufferId;

/// One stacked background image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackgroundLayer {
    image: Option<ImageRef>,
    alpha: f32,
}

impl BackgroundLayer {
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// The two background layers plus the optional static override.
#[derive(Debug, Clone, Default)]
pub struct BackgroundBuffers {
    layers: [BackgroundLayer; 2],
    active: BufferId,
    staged: bool,
    override_image: Option<ImageRef>,
    override_alpha: f32,
    override_fade: Option<Fade>,
}

impl BackgroundBuffers {
    /// Empty layers, no override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `image` as a fully shown override.
    pub fn with_override(image: ImageRef, out: &mut Vec<CardSelectionEvent>) -> Self {
        out.push(CardSelectionEvent::LoadImage {
            target: ImageTarget::Override,
            image: image.clone(),
            placeholder: None,
        });
        Self {
            override_image: Some(image),
            override_alpha: 1.0,
            ..Self::default()
        }
    }

    pub fn layer(&self, id: BufferId) -> &BackgroundLayer {
        &self.layers[id.index()]
    }

    pub fn active_id(&self) -> BufferId {
        self.active
    }

    pub fn override_image(&self) -> Option<&ImageRef> {
        self.override_image.as_ref()
    }

    /// Opacity of the override image; 1.0 once its fade-in finished.
    pub fn override_alpha(&self) -> f32 {
        self.override_alpha
    }

    pub fn is_overridden(&self) -> bool {
        self.override_image.is_some()
    }

    /// Whether a crossfade is staged in the inactive layer.
    pub fn is_staged(&self) -> bool {
        self.staged
    }

    /// Show `card`'s image immediately in the active layer. Ignored while
    /// overridden.
    pub fn show(&mut self, card: &Card, out: &mut Vec<CardSelectionEvent>) {
        if self.is_overridden() {
            return;
        }
        let inactive = self.active.other();
        self.clear_layer(inactive, out);
        self.staged = false;
        self.load_layer(self.active, card, out);
        self.layers[self.active.index()].alpha = 1.0;
    }

    /// Load `card`'s image into the inactive layer, ready to fade in.
    /// Returns `false` (nothing staged) while overridden.
    pub fn stage(&mut self, card: &Card, out: &mut Vec<CardSelectionEvent>) -> bool {
        if self.is_overridden() {
            return false;
        }
        let inactive = self.active.other();
        self.load_layer(inactive, card, out);
        self.layers[inactive.index()].alpha = 0.0;
        self.staged = true;
        true
    }

    /// Crossfade toward the staged layer; `progress` in [0.0, 1.0].
    pub fn blend(&mut self, progress: f32) {
        if !self.staged {
            return;
        }
        let progress = progress.clamp(0.0, 1.0);
        self.layers[self.active.other().index()].alpha = progress;
        self.layers[self.active.index()].alpha = 1.0 - progress;
    }

    /// Finish the crossfade: the staged layer becomes active and the old one
    /// is emptied.
    pub fn commit(&mut self, out: &mut Vec<CardSelectionEvent>) {
        if !self.staged {
            return;
        }
        self.staged = false;
        let outgoing = self.active;
        self.active = outgoing.other();
        self.layers[self.active.index()].alpha = 1.0;
        self.clear_layer(outgoing, out);
    }

    /// Set or remove the static override.
    ///
    /// Setting fades the override in over `fade`; removing it drops the
    /// override at once and leaves the layers empty for the caller to refill.
    pub fn set_override(
        &mut self,
        image: Option<ImageRef>,
        fade: Duration,
        out: &mut Vec<CardSelectionEvent>,
    ) {
        match image {
            Some(image) => {
                if self.staged {
                    self.staged = false;
                    self.clear_layer(self.active.other(), out);
                }
                out.push(CardSelectionEvent::LoadImage {
                    target: ImageTarget::Override,
                    image: image.clone(),
                    placeholder: None,
                });
                self.override_image = Some(image);
                self.override_alpha = 0.0;
                self.override_fade = Some(Fade::new(fade).easing(ease_in_out));
            }
            None => {
                if self.override_image.take().is_some() {
                    out.push(CardSelectionEvent::ClearImage {
                        target: ImageTarget::Override,
                    });
                }
                self.override_alpha = 0.0;
                self.override_fade = None;
            }
        }
    }

    /// Advance the override fade-in, if one is running.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<CardSelectionEvent>) {
        let Some(fade) = self.override_fade.as_mut() else {
            return;
        };
        fade.tick(dt);
        self.override_alpha = fade.value();
        if fade.is_complete() {
            self.override_fade = None;
            self.override_alpha = 1.0;
            for id in [BufferId::A, BufferId::B] {
                self.clear_layer(id, out);
            }
        }
    }

    /// Whether the override is still fading in.
    pub fn is_fading(&self) -> bool {
        self.override_fade.is_some()
    }

    /// Empty both layers.
    pub fn clear(&mut self, out: &mut Vec<CardSelectionEvent>) {
        self.staged = false;
        for id in [BufferId::A, BufferId::B] {
            self.clear_layer(id, out);
        }
    }

    fn load_layer(&mut self, id: BufferId, card: &Card, out: &mut Vec<CardSelectionEvent>) {
        out.push(CardSelectionEvent::LoadImage {
            target: ImageTarget::Background(id),
            image: card.image().clone(),
            placeholder: card.placeholder().cloned(),
        });
        self.layers[id.index()].image = Some(card.image().clone());
    }

    fn clear_layer(&mut self, id: BufferId, out: &mut Vec<CardSelectionEvent>) {
        let layer = &mut self.layers[id.index()];
        layer.alpha = 0.0;
        if layer.image.take().is_some() {
            out.push(CardSelectionEvent::ClearImage {
                target: ImageTarget::Background(id),
            });
        }
    }
}
