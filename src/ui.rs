//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. The
//! screen is a header, a status box, the file list beside the player pane,
//! and a controls footer. Alerts, the folder prompt and the metadata window
//! are drawn as popups on top.

mod preview;

pub use preview::{Preview, PreviewCache};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, PlaybackState};
use crate::config::UiSettings;
use crate::library::display::{details_text, duration_text, provenance_line, summary_line};
use crate::library::{LoopState, MediaEntry};

/// Rows used by one entry in the file list.
const ITEM_HEIGHT: usize = 3;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "select");
    map.insert("space/p", "play selected");
    map.insert("x", "stop");
    map.insert("o", "pick folder");
    map.insert("r", "toggle loop playback");
    map.insert("K", "metadata");
    map.insert("q", "quit");
    map
});

fn controls_text() -> String {
    let order = ["j/k", "gg/G", "enter", "space/p", "x", "o", "r", "K", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded() -> Block<'static> {
    Block::bordered().padding(Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    })
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    match &app.current_dir {
        Some(dir) => parts.push(format!("Dir: {}", dir.display())),
        None => parts.push("Dir: -".to_string()),
    }

    let loop_text = match app.loop_state() {
        LoopState::Looping => "LOOP: On",
        LoopState::Idle => "LOOP: Off",
    };
    parts.push(loop_text.to_string());

    if let Some(dir) = app.scanning_dir() {
        parts.push(format!(
            "Scanning {}... {} found",
            dir.display(),
            app.scan_found
        ));
    }

    if let Some(msg) = &app.status_message {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

fn entry_item(entry: &MediaEntry, selected: bool) -> ListItem<'static> {
    let marker = if selected { "● " } else { "  " };
    let lines = vec![
        Line::from(vec![
            Span::raw(marker),
            Span::styled(
                entry.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("  {}", summary_line(entry))).dim(),
        Line::from(format!("  {}", provenance_line(entry))).dim(),
    ];
    ListItem::new(Text::from(lines))
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let store = app.library();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" videos ({}) ", store.len()));

    if store.is_empty() {
        let hint = if store.is_loading() {
            "Scanning..."
        } else {
            "No videos. Press o to pick a folder."
        };
        let empty = Paragraph::new(hint)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Only build items for the visible window, keeping the cursor centered.
    let total = store.len();
    let visible = (area.height.saturating_sub(2) as usize / ITEM_HEIGHT).max(1);
    let cursor = app.cursor.min(total - 1);
    let (start, end) = if total <= visible {
        (0, total)
    } else {
        let half = visible / 2;
        let mut start = cursor.saturating_sub(half);
        if start + visible > total {
            start = total - visible;
        }
        (start, start + visible)
    };

    let selected = store.selected();
    let items: Vec<ListItem> = store.entries()[start..end]
        .iter()
        .map(|e| entry_item(e, selected == Some(e)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(cursor - start));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player(
    frame: &mut Frame,
    app: &App,
    preview: Option<&Preview>,
    ui_settings: &UiSettings,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL).title(" player ");

    let Some(entry) = app.library().selected() else {
        let empty = Paragraph::new("No video selected.")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    let state = match app.playback {
        PlaybackState::Playing => "Playing",
        PlaybackState::Finished => "Finished",
        PlaybackState::Stopped => "Stopped",
    };
    let mut info = vec![
        Line::from(Span::styled(
            entry.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{state} • {}", duration_text(entry.duration_secs))),
    ];
    if app.loop_state() == LoopState::Looping {
        info.push(Line::from("Loop playback on").italic());
    }
    frame.render_widget(
        Paragraph::new(info)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    if !ui_settings.show_thumbnails {
        return;
    }
    let thumb_area = chunks[1];
    match preview {
        Some(p) => {
            let lines = p.lines(thumb_area.width, thumb_area.height);
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                thumb_area,
            );
        }
        None => {
            frame.render_widget(
                Paragraph::new("(no thumbnail)")
                    .alignment(Alignment::Center)
                    .dim(),
                thumb_area,
            );
        }
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, preview: Option<&Preview>, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" reel ")
                .title_alignment(Alignment::Center)
                .title_bottom(
                    Line::from(" [o] pick folder  [r] toggle loop playback ").right_aligned(),
                ),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app))
        .block(left_padded().title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);
    draw_list(frame, app, panes[0]);
    draw_player(frame, app, preview, ui_settings, panes[1]);

    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 10, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let meta = app
            .cursor_entry()
            .map(details_text)
            .unwrap_or_else(|| "No video under the cursor".to_string());
        let meta_paragraph = Paragraph::new(meta)
            .block(left_padded().title(" metadata (K closes) "))
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    if let Some(input) = &app.prompt {
        let popup_area = centered_rect_sized(64, 5, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let prompt = Paragraph::new(format!("> {input}_"))
            .block(left_padded().title(" open folder (enter/esc) "))
            .wrap(Wrap { trim: false });
        frame.render_widget(prompt, popup_area);
    }

    if let Some(msg) = &app.alert {
        let popup_area = centered_rect_sized(60, 7, frame.area());
        frame.render_widget(Clear, popup_area);
        let alert = Paragraph::new(format!("{msg}\n\n(press any key)"))
            .alignment(Alignment::Center)
            .block(left_padded().title(" alert ").red())
            .wrap(Wrap { trim: true });
        frame.render_widget(alert, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(left_padded().title(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_list_every_binding_in_order() {
        let text = controls_text();
        assert!(text.starts_with("[j/k] up/down | [gg/G] top/bottom"));
        assert!(text.contains("[r] toggle loop playback"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn popup_stays_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect_sized(72, 9, area);
        assert_eq!(r.width, 38);
        assert_eq!(r.height, 8);
        assert_eq!((r.x, r.y), (1, 1));
    }
}
