//! Form state machine.
//!
//! `Closed` carries no per-session data at all, so "message and delivery
//! target are unset while closed" holds by construction. Every `Closed -> Open`
//! transition, including an open while already open, re-seeds all fields.

use postreminder_types::{
    ComposerVariant, DEFAULT_TARGETED_MINUTES, DeliveryMode, DeliveryTarget, DurationInput,
    DurationUnit, EpochMillis, PostId, PreviewMode, parse_magnitude,
};
use thiserror::Error;

use crate::duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("the reminder form is closed")]
    Closed,
    #[error("{0} cannot be edited in the {1} composer")]
    Unsupported(&'static str, &'static str),
}

/// Variant-specific scheduling fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// Magnitude + unit, resolved lazily at submit time.
    Classic { duration: DurationInput },
    /// Minutes only; `fire_at` is recomputed on every magnitude edit.
    Targeted {
        minutes: u64,
        fire_at: EpochMillis,
        target: Option<DeliveryTarget>,
        mode: DeliveryMode,
    },
}

impl Schedule {
    fn seed(variant: ComposerVariant, now: EpochMillis) -> Self {
        match variant {
            ComposerVariant::Classic => Self::Classic {
                duration: DurationInput::default(),
            },
            ComposerVariant::Targeted => Self::Targeted {
                minutes: DEFAULT_TARGETED_MINUTES,
                fire_at: duration::resolve_minutes(DEFAULT_TARGETED_MINUTES, now),
                target: None,
                mode: DeliveryMode::DirectMessage,
            },
        }
    }

    #[must_use]
    pub fn variant(&self) -> ComposerVariant {
        match self {
            Self::Classic { .. } => ComposerVariant::Classic,
            Self::Targeted { .. } => ComposerVariant::Targeted,
        }
    }
}

/// Fields of an open session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenForm {
    post_id: PostId,
    message: String,
    preview: PreviewMode,
    attach_to_thread: bool,
    schedule: Schedule,
}

impl OpenForm {
    #[must_use]
    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn preview_mode(&self) -> PreviewMode {
        self.preview
    }

    #[must_use]
    pub fn attach_to_thread(&self) -> bool {
        self.attach_to_thread
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[must_use]
    pub fn variant(&self) -> ComposerVariant {
        self.schedule.variant()
    }

    /// Current magnitude field: the classic magnitude or the targeted minutes.
    #[must_use]
    pub fn magnitude(&self) -> u64 {
        match &self.schedule {
            Schedule::Classic { duration } => duration.magnitude,
            Schedule::Targeted { minutes, .. } => *minutes,
        }
    }

    /// Current unit; always minutes for the targeted composer.
    #[must_use]
    pub fn unit(&self) -> DurationUnit {
        match &self.schedule {
            Schedule::Classic { duration } => duration.unit,
            Schedule::Targeted { .. } => DurationUnit::Minutes,
        }
    }

    #[must_use]
    pub fn delivery_target(&self) -> Option<&DeliveryTarget> {
        match &self.schedule {
            Schedule::Targeted { target, .. } => target.as_ref(),
            Schedule::Classic { .. } => None,
        }
    }

    #[must_use]
    pub fn delivery_mode(&self) -> Option<DeliveryMode> {
        match &self.schedule {
            Schedule::Targeted { mode, .. } => Some(*mode),
            Schedule::Classic { .. } => None,
        }
    }

    /// The eagerly resolved fire time. `None` for the classic composer, which
    /// only resolves at submit time.
    #[must_use]
    pub fn resolved_fire_time(&self) -> Option<EpochMillis> {
        match &self.schedule {
            Schedule::Targeted { fire_at, .. } => Some(*fire_at),
            Schedule::Classic { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReminderForm {
    #[default]
    Closed,
    Open(OpenForm),
}

impl ReminderForm {
    /// Seed a fresh session.
    #[must_use]
    pub fn derive_on_open(
        variant: ComposerVariant,
        post_id: PostId,
        initial_message: impl Into<String>,
        now: EpochMillis,
    ) -> Self {
        Self::Open(OpenForm {
            post_id,
            message: initial_message.into(),
            preview: PreviewMode::Write,
            attach_to_thread: false,
            schedule: Schedule::seed(variant, now),
        })
    }

    /// Drop every per-session field.
    #[must_use]
    pub fn derive_on_close() -> Self {
        Self::Closed
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub fn as_open(&self) -> Option<&OpenForm> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }

    /// `None` is the closed-state sentinel; an open form always has a string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.as_open().map(OpenForm::message)
    }

    #[must_use]
    pub fn post_id(&self) -> Option<&PostId> {
        self.as_open().map(OpenForm::post_id)
    }

    #[must_use]
    pub fn preview_mode(&self) -> PreviewMode {
        self.as_open()
            .map_or(PreviewMode::Write, OpenForm::preview_mode)
    }

    #[must_use]
    pub fn delivery_target(&self) -> Option<&DeliveryTarget> {
        self.as_open().and_then(OpenForm::delivery_target)
    }

    #[must_use]
    pub fn delivery_mode(&self) -> Option<DeliveryMode> {
        self.as_open().and_then(OpenForm::delivery_mode)
    }

    fn open_mut(&mut self) -> Result<&mut OpenForm, FormError> {
        match self {
            Self::Open(form) => Ok(form),
            Self::Closed => Err(FormError::Closed),
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> Result<(), FormError> {
        self.open_mut()?.message = message.into();
        Ok(())
    }

    pub fn set_preview_mode(&mut self, mode: PreviewMode) -> Result<(), FormError> {
        self.open_mut()?.preview = mode;
        Ok(())
    }

    pub fn toggle_preview(&mut self) -> Result<PreviewMode, FormError> {
        let form = self.open_mut()?;
        form.preview = form.preview.toggle();
        Ok(form.preview)
    }

    pub fn set_attach_to_thread(&mut self, attach: bool) -> Result<(), FormError> {
        self.open_mut()?.attach_to_thread = attach;
        Ok(())
    }

    /// Set the duration magnitude. For the targeted composer this also
    /// re-resolves the fire time against `now`.
    pub fn set_magnitude(&mut self, magnitude: u64, now: EpochMillis) -> Result<(), FormError> {
        match &mut self.open_mut()?.schedule {
            Schedule::Classic { duration } => duration.magnitude = magnitude,
            Schedule::Targeted {
                minutes, fire_at, ..
            } => {
                *minutes = magnitude;
                *fire_at = duration::resolve_minutes(magnitude, now);
            }
        }
        Ok(())
    }

    /// Raw text from the magnitude field; see [`parse_magnitude`] for coercion.
    pub fn set_magnitude_input(&mut self, raw: &str, now: EpochMillis) -> Result<(), FormError> {
        self.set_magnitude(parse_magnitude(raw), now)
    }

    pub fn set_unit(&mut self, unit: DurationUnit) -> Result<(), FormError> {
        match &mut self.open_mut()?.schedule {
            Schedule::Classic { duration } => {
                duration.unit = unit;
                Ok(())
            }
            Schedule::Targeted { .. } => Err(FormError::Unsupported("duration unit", "targeted")),
        }
    }

    /// Raw selector value; unknown selectors land on hours.
    pub fn set_unit_selector(&mut self, raw: &str) -> Result<(), FormError> {
        self.set_unit(DurationUnit::from_selector(raw))
    }

    pub fn set_delivery_target(
        &mut self,
        target: Option<DeliveryTarget>,
    ) -> Result<(), FormError> {
        match &mut self.open_mut()?.schedule {
            Schedule::Targeted { target: slot, .. } => {
                *slot = target;
                Ok(())
            }
            Schedule::Classic { .. } => Err(FormError::Unsupported("delivery target", "classic")),
        }
    }

    /// Changing the mode never clears the message, even when the message
    /// panel becomes hidden.
    pub fn set_delivery_mode(&mut self, mode: DeliveryMode) -> Result<(), FormError> {
        match &mut self.open_mut()?.schedule {
            Schedule::Targeted { mode: slot, .. } => {
                *slot = mode;
                Ok(())
            }
            Schedule::Classic { .. } => Err(FormError::Unsupported("delivery mode", "classic")),
        }
    }
}
