//! Keyboard-driven composer flows through the host app

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use postreminder_tui::{Field, apply_key};
use postreminder_types::{ComposerVariant, DeliveryMode, PreviewMode};

use crate::common::{NOW, Recorder, host_app};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text<C, D>(app: &mut postreminder_tui::HostApp<C, D>, text: &str)
where
    C: postreminder_core::Clock,
    D: postreminder_core::Dispatch,
{
    for ch in text.chars() {
        apply_key(app, press(KeyCode::Char(ch)));
    }
}

#[test]
fn empty_message_keeps_submit_disabled() {
    let recorder = Recorder::default();
    let mut app = host_app(ComposerVariant::Classic, &recorder);
    apply_key(&mut app, press(KeyCode::Char('r')));

    let view = app.composer().view().unwrap();
    assert!(!view.submit_enabled);

    apply_key(&mut app, press(KeyCode::BackTab));
    assert_eq!(app.focus(), Field::Unit);
    apply_key(&mut app, press(KeyCode::Tab));
    apply_key(&mut app, press(KeyCode::Tab));
    assert_eq!(app.focus(), Field::Submit);
    apply_key(&mut app, press(KeyCode::Enter));
    assert!(recorder.requests().is_empty());
    assert!(app.composer().is_open());
}

#[test]
fn classic_two_days_submits_absolute_time() {
    let recorder = Recorder::default();
    let mut app = host_app(ComposerVariant::Classic, &recorder);
    apply_key(&mut app, press(KeyCode::Char('r')));
    type_text(&mut app, "Remember this");

    apply_key(&mut app, press(KeyCode::BackTab));
    apply_key(&mut app, press(KeyCode::Char('d')));
    apply_key(&mut app, press(KeyCode::BackTab));
    assert_eq!(app.focus(), Field::Magnitude);
    apply_key(&mut app, press(KeyCode::Backspace));
    apply_key(&mut app, press(KeyCode::Char('2')));
    assert!(app.composer().view().unwrap().submit_enabled);

    apply_key(&mut app, KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

    let sent = recorder.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "Remember this");
    assert_eq!(sent[0].post_id.as_str(), "post1");
    assert_eq!(sent[0].remember_at.millis_since(NOW), 172_800_000);
    assert_eq!(sent[0].send_to, None);
    assert!(!app.composer().is_open());
}

#[test]
fn targeted_ninety_minutes() {
    let recorder = Recorder::default();
    let mut app = host_app(ComposerVariant::Targeted, &recorder);
    apply_key(&mut app, press(KeyCode::Char('r')));
    type_text(&mut app, "Follow up");

    for _ in 0..3 {
        apply_key(&mut app, press(KeyCode::BackTab));
    }
    assert_eq!(app.focus(), Field::Magnitude);
    apply_key(&mut app, press(KeyCode::Backspace));
    apply_key(&mut app, press(KeyCode::Backspace));
    type_text(&mut app, "90");

    apply_key(&mut app, press(KeyCode::Tab));
    type_text(&mut app, "~town-square");

    apply_key(&mut app, KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

    let sent = recorder.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].remember_at.millis_since(NOW), 5_400_000);
    assert_eq!(
        sent[0].send_to.as_ref().map(|t| t.as_str()),
        Some("~town-square")
    );
    assert_eq!(sent[0].reminder_type, Some(DeliveryMode::DirectMessage));
}

#[test]
fn preview_round_trip_keeps_text() {
    let recorder = Recorder::default();
    let mut app = host_app(ComposerVariant::Classic, &recorder);
    apply_key(&mut app, press(KeyCode::Char('r')));
    type_text(&mut app, "_soon_");

    let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
    apply_key(&mut app, ctrl_p);
    let view = app.composer().view().unwrap();
    assert!(view.preview_panel_active);
    assert!(!view.write_panel_active);

    apply_key(&mut app, ctrl_p);
    let form = app.composer().form();
    assert_eq!(form.preview_mode(), PreviewMode::Write);
    assert_eq!(form.message(), Some("_soon_"));
}

#[test]
fn reopening_starts_fresh() {
    let recorder = Recorder::default();
    let mut app = host_app(ComposerVariant::Classic, &recorder);
    apply_key(&mut app, press(KeyCode::Char('r')));
    type_text(&mut app, "draft");
    apply_key(&mut app, press(KeyCode::Esc));
    assert_eq!(app.composer().form().message(), None);

    apply_key(&mut app, press(KeyCode::Char('r')));
    let open = app.composer().form().as_open().unwrap();
    assert_eq!(open.message(), "");
    assert_eq!(open.magnitude(), 1);
    assert!(recorder.requests().is_empty());
}
