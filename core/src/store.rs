//! Application-scoped entry holding the composer's visibility.
//!
//! The trigger source and the composer both read it; it changes only through
//! [`ModalStore::open`] and [`ModalStore::close`].

use postreminder_types::PostId;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open { post_id: PostId },
}

impl ModalState {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    #[must_use]
    pub fn post_id(&self) -> Option<&PostId> {
        match self {
            Self::Open { post_id } => Some(post_id),
            Self::Closed => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ModalStore {
    state: ModalState,
}

impl ModalStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    #[must_use]
    pub fn post_id(&self) -> Option<&PostId> {
        self.state.post_id()
    }

    /// Show the composer for `post_id`. Opening while already open retargets.
    pub fn open(&mut self, post_id: PostId) {
        debug!(%post_id, reopen = self.is_visible(), "Reminder modal opened");
        self.state = ModalState::Open { post_id };
    }

    pub fn close(&mut self) {
        if self.is_visible() {
            debug!("Reminder modal closed");
        }
        self.state = ModalState::Closed;
    }
}
