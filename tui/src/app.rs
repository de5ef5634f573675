//! Host application state: the post list (trigger source) plus the composer.

use unicode_segmentation::UnicodeSegmentation;

use postreminder_core::{Clock, Composer, Dispatch, FormError};
use postreminder_types::{ComposerVariant, DeliveryTarget, PostId};

use crate::theme::Palette;

/// A post the user can attach a reminder to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub id: PostId,
    pub label: String,
}

impl PostEntry {
    /// Parse `<post-id>[=<label>]`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (id, label) = match raw.split_once('=') {
            Some((id, label)) => (id, label.trim()),
            None => (raw, ""),
        };
        let id = PostId::new(id).ok()?;
        let label = if label.is_empty() {
            id.to_string()
        } else {
            label.to_string()
        };
        Some(Self { id, label })
    }
}

/// Focusable controls inside the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Magnitude,
    Unit,
    Target,
    Mode,
    Message,
    Submit,
}

pub struct HostApp<C, D> {
    posts: Vec<PostEntry>,
    selected: usize,
    composer: Composer<C, D>,
    focus: Field,
    target_draft: String,
    palette: Palette,
    status: Option<String>,
    should_quit: bool,
}

impl<C: Clock, D: Dispatch> HostApp<C, D> {
    pub fn new(posts: Vec<PostEntry>, composer: Composer<C, D>, palette: Palette) -> Self {
        Self {
            posts,
            selected: 0,
            composer,
            focus: Field::Message,
            target_draft: String::new(),
            palette,
            status: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn posts(&self) -> &[PostEntry] {
        &self.posts
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn composer(&self) -> &Composer<C, D> {
        &self.composer
    }

    #[must_use]
    pub fn focus(&self) -> Field {
        self.focus
    }

    #[must_use]
    pub fn target_draft(&self) -> &str {
        &self.target_draft
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn select_next(&mut self) {
        if !self.posts.is_empty() {
            self.selected = (self.selected + 1) % self.posts.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.posts.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.posts.len() - 1);
        }
    }

    /// "Add Reminder" menu action on the selected post.
    pub fn open_selected(&mut self) {
        let Some(post) = self.posts.get(self.selected) else {
            return;
        };
        self.composer.open(post.id.clone());
        self.target_draft.clear();
        self.status = None;
        self.focus = Field::Message;
    }

    /// Controls in tab order for the current variant and mode.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Magnitude];
        match self.composer.variant() {
            ComposerVariant::Classic => fields.push(Field::Unit),
            ComposerVariant::Targeted => fields.extend([Field::Target, Field::Mode]),
        }
        if self
            .composer
            .view()
            .is_some_and(|view| view.message_panel_visible)
        {
            fields.push(Field::Message);
        }
        fields.push(Field::Submit);
        fields
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let fields = self.fields();
        let len = fields.len() as isize;
        let next = match fields.iter().position(|f| *f == self.focus) {
            Some(idx) => (idx as isize + step).rem_euclid(len),
            None => 0,
        };
        self.focus = fields[next as usize];
    }

    fn normalize_focus(&mut self) {
        if !self.fields().contains(&self.focus) {
            self.focus = Field::Submit;
        }
    }

    fn apply(&mut self, result: Result<(), FormError>) {
        if let Err(err) = result {
            tracing::debug!(%err, focus = ?self.focus, "Form edit rejected");
        }
    }

    pub fn type_char(&mut self, ch: char) {
        let Some(open) = self.composer.form().as_open() else {
            return;
        };
        match self.focus {
            Field::Magnitude => {
                let raw = format!("{}{ch}", open.magnitude());
                let result = self.composer.set_magnitude_input(&raw);
                self.apply(result);
            }
            Field::Unit => {
                let selector = match ch.to_ascii_lowercase() {
                    'm' => "minutes",
                    'h' => "hours",
                    'd' => "days",
                    _ => return,
                };
                let result = self.composer.set_unit_selector(selector);
                self.apply(result);
            }
            Field::Target => {
                self.target_draft.push(ch);
                self.sync_target();
            }
            Field::Mode => {
                if ch == ' ' {
                    self.cycle(true);
                }
            }
            Field::Message if self.message_editable() => {
                let mut message = open.message().to_string();
                message.push(ch);
                let result = self.composer.set_message(message);
                self.apply(result);
            }
            Field::Message | Field::Submit => {}
        }
    }

    pub fn paste(&mut self, text: &str) {
        let Some(open) = self.composer.form().as_open() else {
            return;
        };
        match self.focus {
            Field::Message if self.message_editable() => {
                let message = format!("{}{text}", open.message());
                let result = self.composer.set_message(message);
                self.apply(result);
            }
            Field::Target => {
                self.target_draft.push_str(text.trim_end_matches(['\r', '\n']));
                self.sync_target();
            }
            Field::Magnitude => {
                let raw = format!("{}{}", open.magnitude(), text.trim());
                let result = self.composer.set_magnitude_input(&raw);
                self.apply(result);
            }
            Field::Message | Field::Unit | Field::Mode | Field::Submit => {}
        }
    }

    pub fn backspace(&mut self) {
        let Some(open) = self.composer.form().as_open() else {
            return;
        };
        match self.focus {
            Field::Magnitude => {
                let mut raw = open.magnitude().to_string();
                raw.pop();
                let result = self.composer.set_magnitude_input(&raw);
                self.apply(result);
            }
            Field::Target => {
                self.target_draft.pop();
                self.sync_target();
            }
            Field::Message if self.message_editable() => {
                let message = open.message();
                let keep = message
                    .grapheme_indices(true)
                    .next_back()
                    .map_or(0, |(idx, _)| idx);
                let trimmed = message[..keep].to_string();
                let result = self.composer.set_message(trimmed);
                self.apply(result);
            }
            Field::Message | Field::Unit | Field::Mode | Field::Submit => {}
        }
    }

    /// Enter: newline in the editor, submit on the button, else next field.
    pub fn enter(&mut self) {
        match self.focus {
            Field::Message => self.type_char('\n'),
            Field::Submit => self.try_submit(),
            _ => self.focus_next(),
        }
    }

    /// Left/Right on a selector.
    pub fn cycle(&mut self, forward: bool) {
        let Some(open) = self.composer.form().as_open() else {
            return;
        };
        match self.focus {
            Field::Unit => {
                let unit = if forward {
                    open.unit().next()
                } else {
                    open.unit().prev()
                };
                let result = self.composer.set_unit(unit);
                self.apply(result);
            }
            Field::Mode => {
                if let Some(mode) = open.delivery_mode() {
                    let result = self.composer.set_delivery_mode(mode.toggle());
                    self.apply(result);
                    self.normalize_focus();
                }
            }
            _ => {}
        }
    }

    pub fn toggle_preview(&mut self) {
        if let Err(err) = self.composer.toggle_preview() {
            tracing::debug!(%err, "Preview toggle ignored");
        }
    }

    /// Submit if the button is enabled. The button is the only guard
    /// against an empty message.
    pub fn try_submit(&mut self) {
        let Some(view) = self.composer.view() else {
            return;
        };
        if !view.submit_enabled {
            self.status = Some("Write a reminder message first".to_string());
            return;
        }
        let post_id = view.form.post_id().clone();
        self.composer.submit();
        self.target_draft.clear();
        self.status = Some(format!("Reminder requested for post {post_id}"));
    }

    pub fn cancel(&mut self) {
        self.composer.cancel();
        self.target_draft.clear();
    }

    /// The editor only takes input while the write panel is showing.
    fn message_editable(&self) -> bool {
        self.composer
            .view()
            .is_some_and(|view| view.write_panel_active)
    }

    fn sync_target(&mut self) {
        let target = DeliveryTarget::new(self.target_draft.as_str()).ok();
        let result = self.composer.set_delivery_target(target);
        self.apply(result);
    }
}
