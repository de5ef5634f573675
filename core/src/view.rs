//! Visibility and mode derivation.
//!
//! Pure functions of the form: nothing here is stored, so panels can never
//! disagree with the state they describe.

use postreminder_types::{ComposerVariant, DeliveryMode, PreviewMode};

use crate::form::{OpenForm, ReminderForm};

/// What the modal shows for an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerView<'a> {
    pub form: &'a OpenForm,
    pub write_panel_active: bool,
    pub preview_panel_active: bool,
    /// Targeted composer only: hidden while delivering as mark-as-unread.
    pub message_panel_visible: bool,
    pub submit_enabled: bool,
}

impl<'a> ComposerView<'a> {
    /// `None` while closed: the modal renders nothing.
    #[must_use]
    pub fn derive(form: &'a ReminderForm) -> Option<Self> {
        let open = form.as_open()?;
        let preview = open.preview_mode() == PreviewMode::Preview;
        let message_panel_visible = match open.variant() {
            ComposerVariant::Classic => true,
            ComposerVariant::Targeted => open.delivery_mode() == Some(DeliveryMode::DirectMessage),
        };
        Some(Self {
            form: open,
            write_panel_active: !preview,
            preview_panel_active: preview,
            message_panel_visible,
            submit_enabled: submit_enabled(form),
        })
    }
}

/// The submit button is enabled iff the message is a non-empty string.
///
/// This ignores delivery mode on purpose: with mark-as-unread selected the
/// message panel is hidden, yet an empty message still disables the button.
#[must_use]
pub fn submit_enabled(form: &ReminderForm) -> bool {
    form.message().is_some_and(|message| !message.is_empty())
}
