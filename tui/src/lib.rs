//! Terminal host for the post reminder composer, using ratatui.
//!
//! The host owns a list of posts standing in for the chat channel. Pressing
//! `r` on a post is the "Add Reminder" menu action; the composer modal is
//! drawn on top of the list while it is open.

mod app;
mod input;
pub mod markdown;
mod theme;

pub use app::{Field, HostApp, PostEntry};
pub use input::{InputPump, apply_event, apply_key, handle_events};
pub use theme::{Palette, styles};

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use postreminder_core::{Clock, ComposerView, Dispatch};
use postreminder_types::{ComposerVariant, EpochMillis, truncate_with_ellipsis};

use self::markdown::render_markdown;

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 26;
const HELP_TEXT: &str =
    "Adding a Reminder will send you a reminder via DM after a certain amount of time.";
const MESSAGE_PLACEHOLDER: &str = "What would you like to be reminded of?";
const TARGET_PLACEHOLDER: &str = "@user or ~channel";

/// Main draw function
pub fn draw<C: Clock, D: Dispatch>(frame: &mut Frame, app: &HostApp<C, D>) {
    let palette = app.palette();
    let bg_block = Block::default().style(Style::default().bg(palette.bg));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Posts
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_posts(frame, app, chunks[0]);
    draw_status_bar(frame, app, chunks[1]);

    if let Some(view) = app.composer().view() {
        draw_modal(frame, app, &view);
    }
}

fn draw_posts<C: Clock, D: Dispatch>(frame: &mut Frame, app: &HostApp<C, D>, area: Rect) {
    let palette = app.palette();
    let lines: Vec<Line> = if app.posts().is_empty() {
        vec![Line::from(Span::styled(
            "No posts. Pass post ids on the command line.",
            styles::help(palette),
        ))]
    } else {
        app.posts()
            .iter()
            .enumerate()
            .map(|(idx, post)| {
                let selected = idx == app.selected();
                let marker = if selected { "> " } else { "  " };
                Line::from(vec![
                    Span::styled(marker, styles::field(palette, selected)),
                    Span::styled(post.label.clone(), styles::field(palette, selected)),
                    Span::styled(format!("  {}", post.id), styles::help(palette)),
                ])
            })
            .collect()
    };

    let block = Block::default()
        .title(" Posts ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette))
        .padding(Padding::horizontal(1));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(styles::text(palette)),
        area,
    );
}

fn draw_status_bar<C: Clock, D: Dispatch>(frame: &mut Frame, app: &HostApp<C, D>, area: Rect) {
    let palette = app.palette();
    let hints = if app.composer().is_open() {
        "Tab next · Ctrl-P preview · Ctrl-S add · Esc cancel"
    } else {
        "r add reminder · j/k move · q quit"
    };
    let mut spans = vec![Span::styled(hints, styles::help(palette))];
    if let Some(status) = app.status() {
        spans.push(Span::styled("  │  ", styles::help(palette)));
        spans.push(Span::styled(status.to_string(), styles::text(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_modal<C: Clock, D: Dispatch>(frame: &mut Frame, app: &HostApp<C, D>, view: &ComposerView) {
    let palette = app.palette();
    let area = centered_rect(frame.area(), MODAL_WIDTH, MODAL_HEIGHT);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" Add a Reminder ", styles::heading(palette)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette))
        .style(styles::text(palette))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let focus = app.focus();
    let form = view.form;
    let mut lines = vec![
        Line::from(Span::styled(
            "When do you want to be reminded?",
            styles::heading(palette),
        )),
    ];

    match form.variant() {
        ComposerVariant::Classic => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[ {} ]", form.magnitude()),
                    styles::field(palette, focus == Field::Magnitude),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("‹ {} ›", form.unit().label()),
                    styles::field(palette, focus == Field::Unit),
                ),
            ]));
        }
        ComposerVariant::Targeted => {
            let mut row = vec![
                Span::raw("In "),
                Span::styled(
                    format!("[ {} ]", form.magnitude()),
                    styles::field(palette, focus == Field::Magnitude),
                ),
                Span::raw(" minutes"),
            ];
            if let Some(fire_at) = form.resolved_fire_time() {
                row.push(Span::styled(
                    format!("  ({})", format_fire_time(fire_at)),
                    styles::help(palette),
                ));
            }
            lines.push(Line::from(row));
            lines.push(Line::default());

            let target_width = usize::from(inner.width).saturating_sub(12);
            let target = if app.target_draft().is_empty() {
                Span::styled(TARGET_PLACEHOLDER, styles::help(palette))
            } else {
                Span::styled(
                    truncate_with_ellipsis(app.target_draft(), target_width),
                    styles::field(palette, focus == Field::Target),
                )
            };
            lines.push(Line::from(vec![
                Span::styled("Send to: ", styles::field(palette, focus == Field::Target)),
                target,
            ]));
            if let Some(mode) = form.delivery_mode() {
                lines.push(Line::from(vec![
                    Span::raw("Deliver: "),
                    Span::styled(
                        format!("‹ {} ›", mode.label()),
                        styles::field(palette, focus == Field::Mode),
                    ),
                ]));
            }
        }
    }
    lines.push(Line::default());

    if view.message_panel_visible {
        lines.push(Line::from(vec![
            Span::styled("Reminder Message  ", styles::heading(palette)),
            Span::styled(" Write ", styles::tab(palette, view.write_panel_active)),
            Span::raw(" "),
            Span::styled(" Preview ", styles::tab(palette, view.preview_panel_active)),
        ]));
        let editor_style = styles::field(palette, focus == Field::Message);
        if view.preview_panel_active {
            if form.message().trim().is_empty() {
                lines.push(Line::from(Span::styled(
                    "Nothing to preview",
                    styles::help(palette),
                )));
            } else {
                lines.extend(render_markdown(
                    form.message(),
                    styles::text(palette),
                    palette.code,
                ));
            }
        } else if form.message().is_empty() {
            lines.push(Line::from(Span::styled(
                MESSAGE_PLACEHOLDER,
                styles::help(palette),
            )));
        } else {
            for line in form.message().split('\n') {
                lines.push(Line::from(Span::styled(line.to_string(), editor_style)));
            }
        }
        lines.push(Line::default());
    }

    let label = " Add Reminder ";
    let focused = if focus == Field::Submit { "▸" } else { " " };
    let pad = usize::from(inner.width).saturating_sub(label.width() + 1) / 2;
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(focused, styles::field(palette, true)),
        Span::styled(label, styles::button(palette, view.submit_enabled)),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "What does this do?",
        styles::heading(palette),
    )));
    lines.push(Line::from(Span::styled(HELP_TEXT, styles::help(palette))));

    frame.render_widget(
        Paragraph::new(lines)
            .style(styles::text(palette))
            .wrap(Wrap { trim: false }),
        inner,
    );
}

/// Local wall-clock rendering of a fire time.
#[must_use]
pub fn format_fire_time(at: EpochMillis) -> String {
    DateTime::from_timestamp_millis(at.value()).map_or_else(
        || "out of range".to_string(),
        |utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
