//! Two-picture comparison session.
//!
//! A session has two fixed slots, [`Role::Bottom`] and [`Role::Top`], each
//! holding at most one [`PictureScaleModel`], plus the opacity of the top
//! layer. The bottom layer is always fully opaque.
//!
//! ## Pinch coupling
//!
//! A pinch only acts when both slots are occupied. Both pictures get the same
//! raw multiplier, and the top picture then takes the bottom picture's new
//! scale so the two layers stay in lock-step, even when the top picture's own
//! clamp range differs.
//!
//! ## Events
//!
//! A renderer that wants to react to changes passes an
//! [`mpsc::Sender<SessionEvent>`](std::sync::mpsc::Sender) at construction.
//! Every mutating call sends the matching [`SessionEvent`]; setting a new top
//! picture also re-announces the opacity so it gets applied to the new layer.
//! A dropped receiver is ignored.

use crate::geometry::Size;
use crate::scale::{PictureScaleModel, ScaleError, validate_frame};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::mpsc::Sender;
use tracing::debug;

/// Which of the two stacked layers a picture occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bottom,
    Top,
}

impl Role {
    /// Both roles in stacking order.
    pub const ALL: [Role; 2] = [Role::Bottom, Role::Top];

    /// The role of the other layer.
    pub fn other(self) -> Role {
        match self {
            Role::Bottom => Role::Top,
            Role::Top => Role::Bottom,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Bottom => f.write_str("bottom"),
            Role::Top => f.write_str("top"),
        }
    }
}

/// Scales of both layers after a pinch update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PinchOutcome {
    pub bottom_scale: f64,
    pub top_scale: f64,
}

/// State change notification for the rendering side.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PictureSet {
        role: Role,
        original_scale: f64,
        current_scale: f64,
    },
    PictureCleared {
        role: Role,
    },
    OpacityChanged {
        opacity: f64,
    },
    FrameChanged {
        frame: Size,
    },
    Pinched(PinchOutcome),
}

#[derive(Debug, Default)]
pub struct ComparisonSession {
    bottom: Option<PictureScaleModel>,
    top: Option<PictureScaleModel>,
    top_layer_opacity: f64,
    frame: Option<Size>,
    events: Option<Sender<SessionEvent>>,
}

impl ComparisonSession {
    /// Empty session with a fully transparent top layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty session that reports every change on `events`.
    pub fn with_events(events: Sender<SessionEvent>) -> Self {
        Self {
            events: Some(events),
            ..Self::default()
        }
    }

    /// Start from `opacity` instead of 0 (clamped like the setter).
    pub fn with_initial_opacity(mut self, opacity: f64) -> Self {
        self.top_layer_opacity = clamp_opacity(opacity);
        self
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            tx.send(event).ok();
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<PictureScaleModel> {
        match role {
            Role::Bottom => &mut self.bottom,
            Role::Top => &mut self.top,
        }
    }

    /// Fit `image` into `frame` and put it in `role`'s slot, replacing any
    /// previous picture there. `frame` becomes the session frame.
    ///
    /// Both layers share one frame: a picture already in the other slot is
    /// refitted to `frame` (losing its zoom) when its frame differs. On error
    /// neither slot changes.
    pub fn set_picture(
        &mut self,
        role: Role,
        image: Size,
        frame: Size,
    ) -> Result<&PictureScaleModel, ScaleError> {
        let model = PictureScaleModel::new(image, frame)?;
        let refitted = match self.picture(role.other()) {
            Some(other) if other.frame() != frame => {
                let mut other = other.clone();
                other.update_frame_size(frame)?;
                Some(other)
            }
            _ => None,
        };
        debug!(
            %role,
            %image,
            %frame,
            scale = model.original_scale(),
            "picture set"
        );
        self.frame = Some(frame);
        if let Some(other) = refitted {
            debug!(role = %role.other(), %frame, "picture refitted to shared frame");
            *self.slot_mut(role.other()) = Some(other);
            self.emit(SessionEvent::FrameChanged { frame });
        }
        self.emit(SessionEvent::PictureSet {
            role,
            original_scale: model.original_scale(),
            current_scale: model.current_scale(),
        });
        if role == Role::Top {
            self.emit(SessionEvent::OpacityChanged {
                opacity: self.top_layer_opacity,
            });
        }
        Ok(self.slot_mut(role).insert(model))
    }

    /// Like [`set_picture`](Self::set_picture), using the last known frame.
    ///
    /// Fails with [`ScaleError::FrameNotLaidOut`] before the first frame is known.
    pub fn set_picture_in_frame(
        &mut self,
        role: Role,
        image: Size,
    ) -> Result<&PictureScaleModel, ScaleError> {
        let frame = self.frame.ok_or(ScaleError::FrameNotLaidOut)?;
        self.set_picture(role, image, frame)
    }

    /// Empty `role`'s slot, returning the picture that was there.
    pub fn clear(&mut self, role: Role) -> Option<PictureScaleModel> {
        let previous = self.slot_mut(role).take();
        if previous.is_some() {
            debug!(%role, "picture cleared");
            self.emit(SessionEvent::PictureCleared { role });
        }
        previous
    }

    /// Store the top layer opacity, clamped to `[0, 1]`, and return it.
    pub fn set_top_layer_opacity(&mut self, value: f64) -> f64 {
        self.top_layer_opacity = clamp_opacity(value);
        self.emit(SessionEvent::OpacityChanged {
            opacity: self.top_layer_opacity,
        });
        self.top_layer_opacity
    }

    /// Refit every present picture to `frame`; zoom is reset.
    ///
    /// Nothing changes when `frame` is invalid.
    pub fn update_frame_size(&mut self, frame: Size) -> Result<(), ScaleError> {
        let frame = validate_frame(frame)?;
        for model in [self.bottom.as_mut(), self.top.as_mut()].into_iter().flatten() {
            model.update_frame_size(frame)?;
        }
        debug!(%frame, "frame updated");
        self.frame = Some(frame);
        self.emit(SessionEvent::FrameChanged { frame });
        Ok(())
    }

    /// Apply one pinch update to both pictures.
    ///
    /// Returns `None` and changes nothing unless both slots are occupied.
    pub fn apply_pinch(&mut self, raw: f64) -> Option<PinchOutcome> {
        let (Some(bottom), Some(top)) = (self.bottom.as_mut(), self.top.as_mut()) else {
            debug!(raw, "pinch ignored, both pictures are required");
            return None;
        };

        let bottom_scale = bottom.apply_pinch_delta(raw);
        top.apply_pinch_delta(raw);
        top.set_current_scale(bottom_scale);

        let outcome = PinchOutcome {
            bottom_scale,
            top_scale: top.current_scale(),
        };
        debug!(raw, scale = bottom_scale, "pinch applied");
        self.emit(SessionEvent::Pinched(outcome));
        Some(outcome)
    }

    pub fn picture(&self, role: Role) -> Option<&PictureScaleModel> {
        match role {
            Role::Bottom => self.bottom.as_ref(),
            Role::Top => self.top.as_ref(),
        }
    }

    pub fn bottom(&self) -> Option<&PictureScaleModel> {
        self.bottom.as_ref()
    }

    pub fn top(&self) -> Option<&PictureScaleModel> {
        self.top.as_ref()
    }

    pub fn top_layer_opacity(&self) -> f64 {
        self.top_layer_opacity
    }

    /// Opacity the renderer applies to `role`'s layer.
    pub fn opacity_for(&self, role: Role) -> f64 {
        match role {
            Role::Bottom => 1.0,
            Role::Top => self.top_layer_opacity,
        }
    }

    /// Last frame the session was laid out in, if any.
    pub fn frame(&self) -> Option<Size> {
        self.frame
    }

    pub fn is_ready_for_pinch(&self) -> bool {
        self.bottom.is_some() && self.top.is_some()
    }
}

fn clamp_opacity(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
