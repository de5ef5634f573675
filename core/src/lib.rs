//! Reminder composition workflow.
//!
//! The composer is the in-memory form that collects a reminder's message,
//! duration and (for the targeted variant) delivery options, turns them into
//! an absolute fire time, and emits exactly one creation request per open
//! session.
//!
//! ```text
//! trigger ──open(post)──> ModalStore ──> ReminderForm::derive_on_open
//!                                               │ field edits
//!                                               v
//!                              ComposerView (panels, submit button)
//!                                               │ submit
//!                                               v
//!              assemble_request ──> Dispatch (fire and forget) ──> close
//! ```
//!
//! # Known gaps
//!
//! These are reproduced on purpose and tracked as defects, not fixed here:
//!
//! - The submit button is disabled for an empty message, but [`Composer::submit`]
//!   still sends the request if called anyway.
//! - The creation call's outcome is never observed. A failed request is logged
//!   and dropped: no retry, no error shown, and the composer has already closed.
//! - Nothing waits for dispatched requests. One still in flight when the
//!   runtime shuts down is abandoned with it.

mod clock;
mod composer;
pub mod duration;
mod form;
mod store;
mod submit;
mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use composer::{Composer, ComposerOptions};
pub use form::{FormError, OpenForm, ReminderForm, Schedule};
pub use store::{ModalState, ModalStore};
pub use submit::{CreationEndpoint, Dispatch, EndpointError, SpawnDispatcher, assemble_request};
pub use view::{ComposerView, submit_enabled};

pub use postreminder_types;
