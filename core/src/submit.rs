//! Submission coordination.
//!
//! The creation call is fire and forget. [`Dispatch::dispatch`] returns `()`:
//! the caller never learns whether the backend stored the reminder, and the
//! composer closes immediately after dispatching. Failures end in a log line.

use std::{future::Future, sync::Arc};

use postreminder_types::{EpochMillis, ReminderRequest};
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::{
    duration,
    form::{OpenForm, Schedule},
};

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("creation endpoint returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("creation request failed: {0}")]
    Transport(String),
}

/// The backend that stores reminders.
pub trait CreationEndpoint: Send + Sync + 'static {
    fn create(
        &self,
        request: ReminderRequest,
    ) -> impl Future<Output = Result<(), EndpointError>> + Send;
}

/// Launches a creation request without waiting for it.
pub trait Dispatch {
    /// Result not awaited, not returned, not retried.
    fn dispatch(&self, request: ReminderRequest);
}

impl<D: Dispatch + ?Sized> Dispatch for &D {
    fn dispatch(&self, request: ReminderRequest) {
        (**self).dispatch(request);
    }
}

/// Spawns each request onto a tokio runtime and drops the join handle.
pub struct SpawnDispatcher<E> {
    endpoint: Arc<E>,
    runtime: Handle,
}

impl<E: CreationEndpoint> SpawnDispatcher<E> {
    #[must_use]
    pub fn new(endpoint: E, runtime: Handle) -> Self {
        Self {
            endpoint: Arc::new(endpoint),
            runtime,
        }
    }

    /// Uses the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn on_current_runtime(endpoint: E) -> Self {
        Self::new(endpoint, Handle::current())
    }
}

impl<E: CreationEndpoint> Dispatch for SpawnDispatcher<E> {
    fn dispatch(&self, request: ReminderRequest) {
        let endpoint = Arc::clone(&self.endpoint);
        let post_id = request.post_id.clone();
        info!(%post_id, remember_at = %request.remember_at, "Dispatching reminder");
        // Detached: the handle is dropped and the outcome only logged.
        drop(self.runtime.spawn(async move {
            match endpoint.create(request).await {
                Ok(()) => debug!(%post_id, "Reminder created"),
                Err(err) => warn!(%post_id, error = %err, "Reminder creation failed; not retried"),
            }
        }));
    }
}

/// Build the payload for the active variant.
///
/// Classic resolves its duration against `now` here. Targeted already holds
/// a fire time from its last magnitude edit and sends that unchanged.
#[must_use]
pub fn assemble_request(form: &OpenForm, now: EpochMillis) -> ReminderRequest {
    match form.schedule() {
        Schedule::Classic { duration } => ReminderRequest::classic(
            form.message(),
            form.post_id().clone(),
            duration::resolve(*duration, now),
        ),
        Schedule::Targeted {
            fire_at,
            target,
            mode,
            ..
        } => ReminderRequest::targeted(
            form.message(),
            form.post_id().clone(),
            *fire_at,
            target.clone(),
            *mode,
        ),
    }
}
