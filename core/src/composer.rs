//! The workflow object the host drives.

use postreminder_types::{
    ComposerVariant, DeliveryMode, DeliveryTarget, DurationUnit, PostId, PreviewMode,
};
use tracing::{debug, warn};

use crate::{
    clock::Clock,
    form::{FormError, ReminderForm},
    store::{ModalState, ModalStore},
    submit::{Dispatch, assemble_request},
    view::ComposerView,
};

#[derive(Debug, Clone, Default)]
pub struct ComposerOptions {
    pub variant: ComposerVariant,
    /// Message the editor starts with on every open.
    pub initial_message: String,
}

/// Single process-wide reminder composer.
///
/// Owns the modal store entry and the form. Every visibility change goes
/// through [`Composer::open`], [`Composer::cancel`] or [`Composer::submit`],
/// each of which mutates the store and then re-derives the form from it.
pub struct Composer<C, D> {
    options: ComposerOptions,
    store: ModalStore,
    form: ReminderForm,
    clock: C,
    dispatcher: D,
}

impl<C: Clock, D: Dispatch> Composer<C, D> {
    pub fn new(options: ComposerOptions, clock: C, dispatcher: D) -> Self {
        Self {
            options,
            store: ModalStore::new(),
            form: ReminderForm::Closed,
            clock,
            dispatcher,
        }
    }

    #[must_use]
    pub fn variant(&self) -> ComposerVariant {
        self.options.variant
    }

    #[must_use]
    pub fn store(&self) -> &ModalStore {
        &self.store
    }

    #[must_use]
    pub fn form(&self) -> &ReminderForm {
        &self.form
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.store.is_visible()
    }

    #[must_use]
    pub fn view(&self) -> Option<ComposerView<'_>> {
        ComposerView::derive(&self.form)
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Menu action: start composing a reminder for `post_id`.
    pub fn open(&mut self, post_id: PostId) {
        let message = self.options.initial_message.clone();
        self.open_with_message(post_id, message);
    }

    pub fn open_with_message(&mut self, post_id: PostId, initial_message: impl Into<String>) {
        self.store.open(post_id);
        self.on_visibility_change(initial_message.into());
    }

    /// Explicit cancel (Esc, close button).
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Send the reminder and close.
    ///
    /// The request goes out even when the message is empty; only the submit
    /// button guards against that. The dispatch result is not awaited and the
    /// close happens regardless of whether the backend accepts the reminder.
    pub fn submit(&mut self) {
        let Some(open) = self.form.as_open() else {
            debug!("Submit ignored: reminder composer is closed");
            return;
        };
        if open.message().is_empty() {
            warn!(post_id = %open.post_id(), "Submitting reminder with an empty message");
        }
        let request = assemble_request(open, self.clock.now());
        self.dispatcher.dispatch(request);
        self.close();
    }

    fn close(&mut self) {
        self.store.close();
        self.on_visibility_change(String::new());
    }

    fn on_visibility_change(&mut self, initial_message: String) {
        self.form = match self.store.state() {
            ModalState::Open { post_id } => ReminderForm::derive_on_open(
                self.options.variant,
                post_id.clone(),
                initial_message,
                self.clock.now(),
            ),
            ModalState::Closed => ReminderForm::derive_on_close(),
        };
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> Result<(), FormError> {
        self.form.set_message(message)
    }

    pub fn set_magnitude(&mut self, magnitude: u64) -> Result<(), FormError> {
        let now = self.clock.now();
        self.form.set_magnitude(magnitude, now)
    }

    pub fn set_magnitude_input(&mut self, raw: &str) -> Result<(), FormError> {
        let now = self.clock.now();
        self.form.set_magnitude_input(raw, now)
    }

    pub fn set_unit(&mut self, unit: DurationUnit) -> Result<(), FormError> {
        self.form.set_unit(unit)
    }

    pub fn set_unit_selector(&mut self, raw: &str) -> Result<(), FormError> {
        self.form.set_unit_selector(raw)
    }

    pub fn set_delivery_target(&mut self, target: Option<DeliveryTarget>) -> Result<(), FormError> {
        self.form.set_delivery_target(target)
    }

    pub fn set_delivery_mode(&mut self, mode: DeliveryMode) -> Result<(), FormError> {
        self.form.set_delivery_mode(mode)
    }

    pub fn set_preview_mode(&mut self, mode: PreviewMode) -> Result<(), FormError> {
        self.form.set_preview_mode(mode)
    }

    pub fn toggle_preview(&mut self) -> Result<PreviewMode, FormError> {
        self.form.toggle_preview()
    }

    pub fn set_attach_to_thread(&mut self, attach: bool) -> Result<(), FormError> {
        self.form.set_attach_to_thread(attach)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{Composer, ComposerOptions};
    use crate::{clock::FixedClock, form::FormError, submit::Dispatch};
    use postreminder_types::{
        ComposerVariant, DeliveryMode, DurationUnit, EpochMillis, PostId, PreviewMode,
        ReminderRequest,
    };

    #[derive(Default)]
    struct Recorder(RefCell<Vec<ReminderRequest>>);

    impl Dispatch for Recorder {
        fn dispatch(&self, request: ReminderRequest) {
            self.0.borrow_mut().push(request);
        }
    }

    const NOW: EpochMillis = EpochMillis::new(1_700_000_000_000);

    fn composer(variant: ComposerVariant, recorder: &Recorder) -> Composer<FixedClock, &Recorder> {
        Composer::new(
            ComposerOptions {
                variant,
                initial_message: String::new(),
            },
            FixedClock::at(NOW),
            recorder,
        )
    }

    fn post(id: &str) -> PostId {
        PostId::new(id).unwrap()
    }

    #[test]
    fn starts_closed_and_renders_nothing() {
        let recorder = Recorder::default();
        let composer = composer(ComposerVariant::Classic, &recorder);
        assert!(!composer.is_open());
        assert!(composer.view().is_none());
        assert_eq!(composer.form().message(), None);
    }

    #[test]
    fn open_seeds_store_and_form_together() {
        let recorder = Recorder::default();
        let mut composer = composer(ComposerVariant::Classic, &recorder);
        composer.open(post("p1"));
        assert_eq!(composer.store().post_id(), Some(&post("p1")));
        assert_eq!(composer.form().post_id(), Some(&post("p1")));
        assert_eq!(composer.form().message(), Some(""));
    }

    #[test]
    fn configured_initial_message_is_used() {
        let recorder = Recorder::default();
        let mut composer = Composer::new(
            ComposerOptions {
                variant: ComposerVariant::Classic,
                initial_message: "Follow up".to_string(),
            },
            FixedClock::at(NOW),
            &recorder,
        );
        composer.open(post("p"));
        assert_eq!(composer.form().message(), Some("Follow up"));
    }

    #[test]
    fn cancel_resets_without_dispatch() {
        let recorder = Recorder::default();
        let mut composer = composer(ComposerVariant::Targeted, &recorder);
        composer.open(post("p"));
        composer.set_message("draft").unwrap();
        composer.toggle_preview().unwrap();
        composer.set_delivery_mode(DeliveryMode::MarkAsUnread).unwrap();

        composer.cancel();
        assert!(!composer.is_open());
        assert_eq!(composer.form().message(), None);
        assert_eq!(composer.form().preview_mode(), PreviewMode::Write);
        assert_eq!(composer.form().delivery_target(), None);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn submit_dispatches_once_and_closes() {
        let recorder = Recorder::default();
        let mut composer = composer(ComposerVariant::Classic, &recorder);
        composer.open(post("p"));
        composer.set_message("Remember this").unwrap();
        composer.set_magnitude_input("2").unwrap();
        composer.set_unit_selector("days").unwrap();
        composer.submit();

        let sent = recorder.0.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].remember_at.millis_since(NOW), 172_800_000);
        assert!(!composer.is_open());
        assert_eq!(composer.form().message(), None);
    }

    #[test]
    fn submit_with_empty_message_still_dispatches() {
        let recorder = Recorder::default();
        let mut composer = composer(ComposerVariant::Classic, &recorder);
        composer.open(post("p"));
        assert!(!composer.view().unwrap().submit_enabled);
        composer.submit();
        assert_eq!(recorder.0.borrow().len(), 1);
        assert_eq!(recorder.0.borrow()[0].message, "");
    }

    #[test]
    fn submit_while_closed_is_noop() {
        let recorder = Recorder::default();
        let mut composer = composer(ComposerVariant::Classic, &recorder);
        composer.submit();
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn targeted_fire_time_follows_clock_at_edit() {
        let recorder = Recorder::default();
        let mut composer = composer(ComposerVariant::Targeted, &recorder);
        composer.open(post("p"));
        composer.set_message("x").unwrap();
        composer.clock().advance_millis(1_000);
        composer.set_magnitude_input("90").unwrap();
        composer.clock().advance_millis(30_000);
        composer.submit();

        let sent = recorder.0.borrow();
        assert_eq!(sent[0].remember_at.value(), NOW.value() + 1_000 + 5_400_000);
        assert_eq!(sent[0].reminder_type, Some(DeliveryMode::DirectMessage));
    }

    #[test]
    fn reentrant_open_reseeds() {
        let recorder = Recorder::default();
        let mut composer = composer(ComposerVariant::Classic, &recorder);
        composer.open(post("a"));
        composer.set_message("half written").unwrap();
        composer.set_unit(DurationUnit::Days).unwrap();
        composer.open(post("b"));

        let open = composer.form().as_open().unwrap();
        assert_eq!(open.post_id(), &post("b"));
        assert_eq!(open.message(), "");
        assert_eq!(open.unit(), DurationUnit::Hours);
    }

    #[test]
    fn edits_after_close_fail() {
        let recorder = Recorder::default();
        let mut composer = composer(ComposerVariant::Classic, &recorder);
        assert_eq!(composer.set_message("x"), Err(FormError::Closed));
    }
}
