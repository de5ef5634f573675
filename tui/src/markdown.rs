//! Markdown to ratatui rendering for the reminder preview.
//!
//! Opaque to the composer: it only decides *when* the preview is shown.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Render `content` into lines using `base_style` for body text and `code`
/// as the foreground for inline code and code blocks.
#[must_use]
pub fn render_markdown(content: &str, base_style: Style, code: Color) -> Vec<Line<'static>> {
    MarkdownRenderer::new(base_style, code).render(content)
}

struct MarkdownRenderer {
    base_style: Style,
    code_color: Color,
    lines: Vec<Line<'static>>,
    current_spans: Vec<Span<'static>>,

    // Counters, not booleans, so nested emphasis unwinds correctly.
    bold_count: usize,
    italic_count: usize,
    strike_count: usize,
    quote_depth: usize,

    in_code_block: bool,
    list_stack: Vec<Option<u64>>,
}

impl MarkdownRenderer {
    fn new(base_style: Style, code_color: Color) -> Self {
        Self {
            base_style,
            code_color,
            lines: Vec::new(),
            current_spans: Vec::new(),
            bold_count: 0,
            italic_count: 0,
            strike_count: 0,
            quote_depth: 0,
            in_code_block: false,
            list_stack: Vec::new(),
        }
    }

    fn render(mut self, content: &str) -> Vec<Line<'static>> {
        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        for event in Parser::new_ext(content, options) {
            self.handle_event(event);
        }
        self.flush_line();
        self.lines
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.handle_text(&text),
            Event::Code(code) => {
                let style = self.base_style.fg(self.code_color).add_modifier(Modifier::BOLD);
                self.current_spans.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak => self.current_spans.push(Span::styled(" ", self.base_style)),
            Event::HardBreak => self.flush_line(),
            Event::Html(html) | Event::InlineHtml(html) => self.handle_text(&html),
            Event::TaskListMarker(done) => {
                let marker = if done { "[x] " } else { "[ ] " };
                self.current_spans.push(Span::styled(marker, self.base_style));
            }
            Event::Rule => {
                self.flush_line();
                self.lines
                    .push(Line::from(Span::styled("────────", self.base_style)));
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { .. } | Tag::Strong => self.bold_count += 1,
            Tag::Emphasis => self.italic_count += 1,
            Tag::Strikethrough => self.strike_count += 1,
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush_line();
                self.list_stack.push(start);
            }
            Tag::Item => {
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(Some(idx)) => {
                        let m = format!("{indent}{idx}. ");
                        *idx += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.current_spans.push(Span::styled(marker, self.base_style));
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Tag::Paragraph => {
                if !self.lines.is_empty() && self.list_stack.is_empty() {
                    self.lines.push(Line::from(""));
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.bold_count = self.bold_count.saturating_sub(1);
                self.flush_line();
            }
            TagEnd::Strong => self.bold_count = self.bold_count.saturating_sub(1),
            TagEnd::Emphasis => self.italic_count = self.italic_count.saturating_sub(1),
            TagEnd::Strikethrough => self.strike_count = self.strike_count.saturating_sub(1),
            TagEnd::CodeBlock => self.in_code_block = false,
            TagEnd::List(_) => {
                self.list_stack.pop();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::Item | TagEnd::Paragraph => self.flush_line(),
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &str) {
        if self.in_code_block {
            let style = self.base_style.fg(self.code_color);
            for line in text.lines() {
                self.lines.push(Line::from(vec![
                    Span::styled("  ", self.base_style),
                    Span::styled(line.to_string(), style),
                ]));
            }
            return;
        }
        let style = self.current_style();
        self.current_spans.push(Span::styled(text.to_string(), style));
    }

    fn current_style(&self) -> Style {
        let mut style = self.base_style;
        if self.bold_count > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic_count > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strike_count > 0 {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        style
    }

    fn flush_line(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current_spans.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled("│ ".repeat(self.quote_depth), self.base_style));
        }
        spans.append(&mut self.current_spans);
        self.lines.push(Line::from(spans));
    }
}
