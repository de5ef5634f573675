//! Core domain types for post reminders.
//!
//! This crate contains pure domain and wire types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod compose;
mod duration;
mod ids;
mod request;
mod text;
mod theme;
mod time;

pub use compose::{ComposerVariant, DeliveryMode, PreviewMode};
pub use duration::{DEFAULT_TARGETED_MINUTES, DurationInput, DurationUnit, parse_magnitude};
pub use ids::{DeliveryTarget, DeliveryTargetError, PostId, PostIdError};
pub use request::ReminderRequest;
pub use text::truncate_with_ellipsis;
pub use theme::{HostTheme, Rgb, ThemeError, change_opacity};
pub use time::EpochMillis;
