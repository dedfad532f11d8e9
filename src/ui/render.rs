//! UI renderer implementation.
//!
//! Contains the top-level [render] entry point used by the terminal loop and the
//! layout helper that splits the screen into the two panes, the console and the
//! status line.
//!
//! Rendering only reads [AppState]; it never mutates it.

use crate::app::{AppState, LineEditor, Operation, PanelId, PanelState};
use crate::core::FileEntry;
use crate::ui::widgets::{centered_rect, fit_to_width, input_field_view};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const ACCENT: Color = Color::Cyan;
const PROMPT: &str = "$ ";

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutChunks {
    pub left: Rect,
    pub right: Rect,
    pub console: Rect,
    pub status: Rect,
}

/// Splits `area` for a console of `console_height` rows.
///
/// The panes get whatever the console and the one-row status line leave over.
pub fn layout_chunks(area: Rect, console_height: u16) -> LayoutChunks {
    let console_height = console_height.min(area.height.saturating_sub(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(console_height),
            Constraint::Length(1),
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    LayoutChunks {
        left: panes[0],
        right: panes[1],
        console: rows[1],
        status: rows[2],
    }
}

/// Renders the entire terminal UI of twinpane for one frame.
pub fn render(frame: &mut Frame, app: &AppState) {
    let chunks = layout_chunks(frame.area(), app.animator().current());

    draw_panel(frame, app, PanelId::Left, chunks.left);
    draw_panel(frame, app, PanelId::Right, chunks.right);
    if chunks.console.height > 0 {
        draw_console(frame, app, chunks.console);
    }
    draw_status_line(frame, app, chunks.status);

    if app.rename().is_some() {
        draw_rename_popup(frame, app);
    }
}

fn entry_style(entry: &FileEntry, selected: bool) -> Style {
    let mut style = if entry.is_error() {
        Style::default().fg(Color::Red)
    } else if entry.is_dir() {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else if entry.is_symlink() {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };
    if entry.is_hidden() {
        style = style.add_modifier(Modifier::DIM);
    }
    if selected {
        style = style.fg(Color::Yellow);
    }
    style
}

fn draw_panel(frame: &mut Frame, app: &AppState, id: PanelId, area: Rect) {
    let panel: &PanelState = app.panel(id);
    let is_active = app.active() == id && !app.is_console_focused();
    let border_style = if is_active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = shorten_home_path(panel.dir(), app.home());
    let title = fit_to_width(&title, area.width.saturating_sub(4) as usize);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", title.trim_end()), border_style));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let rows = inner.height as usize;
    let lines: Vec<Line> = panel
        .entries()
        .iter()
        .enumerate()
        .skip(panel.scroll())
        .take(rows)
        .map(|(idx, entry)| {
            let selected = panel.is_selected(entry.name());
            let marker = if selected { "* " } else { "  " };
            let suffix = if entry.is_dir() { "/" } else { "" };
            let text = fit_to_width(&format!("{marker}{}{suffix}", entry.name_str()), width);

            let mut style = entry_style(entry, selected);
            if idx == panel.cursor() {
                style = if is_active {
                    style.add_modifier(Modifier::REVERSED)
                } else {
                    style.add_modifier(Modifier::UNDERLINED)
                };
            }
            Line::from(Span::styled(text, style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_console(frame: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.is_console_focused();
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Too small for a border: show only the prompt.
    let inner = if area.height >= 3 {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(" Console ", border_style));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    } else {
        area
    };
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let width = inner.width as usize;
    let log_rows = inner.height.saturating_sub(1) as usize;
    let mut lines: Vec<Line> = app
        .console()
        .tail(log_rows)
        .iter()
        .map(|l| Line::raw(fit_to_width(l, width)))
        .collect();

    let input = app.console_input();
    let field_width = width.saturating_sub(PROMPT.len() + 1);
    let (view, cursor_col) = input_field_view(input.value(), input.cursor(), field_width);
    lines.push(Line::from(vec![
        Span::styled(PROMPT, border_style),
        Span::raw(view.to_string()),
    ]));

    let prompt_y = inner.y + lines.len().saturating_sub(1) as u16;
    frame.render_widget(Paragraph::new(lines), inner);

    if focused && app.rename().is_none() {
        frame.set_cursor_position((inner.x + (PROMPT.len() + cursor_col) as u16, prompt_y));
    }
}

fn draw_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut parts = Vec::new();

    let panel = app.active_panel();
    let total = panel.entries().len();
    let position = if total == 0 { 0 } else { panel.cursor() + 1 };
    parts.push(format!(
        "{} {}/{}",
        match app.active() {
            PanelId::Left => "[L]",
            PanelId::Right => "[R]",
        },
        position,
        total
    ));

    if !panel.selected().is_empty() {
        parts.push(format!("{} selected", panel.selected().len()));
    }

    let clip = app.clipboard();
    match clip.operation() {
        Operation::Copy => parts.push(format!("clipboard: copy {}", clip.sources().len())),
        Operation::Move => parts.push(format!("clipboard: move {}", clip.sources().len())),
        Operation::None => {}
    }

    if app.pending_copies() > 0 {
        parts.push(format!("copying: {}", app.pending_copies()));
    }
    if panel.show_hidden() {
        parts.push("hidden shown".to_string());
    }
    parts.push(format!("console: {}", app.console_mode().label()));
    if let Some(flash) = app.flash() {
        parts.push(flash.to_string());
    }

    let text = fit_to_width(&parts.join(" | "), area.width as usize);
    let style = Style::default().fg(Color::Black).bg(ACCENT);
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}

fn draw_rename_popup(frame: &mut Frame, app: &AppState) {
    let Some(rename) = app.rename() else {
        return;
    };

    let area = centered_rect(frame.area(), 50, 5);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Rename ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let from = rename
        .target()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let field_width = (inner.width as usize).saturating_sub(1);
    let editor = rename.editor();
    let (view, cursor_col) = input_field_view(editor.value(), editor.cursor(), field_width);

    let lines = vec![
        Line::styled(
            fit_to_width(&format!("from: {from}"), inner.width as usize),
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(view.to_string()),
        Line::styled(
            "Enter: confirm  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    if inner.height > 1 {
        frame.set_cursor_position((inner.x + cursor_col as u16, inner.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_chunks_split() {
        let chunks = layout_chunks(Rect::new(0, 0, 100, 30), 6);
        assert_eq!(chunks.status, Rect::new(0, 29, 100, 1));
        assert_eq!(chunks.console, Rect::new(0, 23, 100, 6));
        assert_eq!(chunks.left.height, 23);
        assert_eq!(chunks.left.width + chunks.right.width, 100);
    }

    #[test]
    fn test_layout_chunks_hidden_console() {
        let chunks = layout_chunks(Rect::new(0, 0, 40, 10), 0);
        assert_eq!(chunks.console.height, 0);
        assert_eq!(chunks.left.height, 9);
    }

    #[test]
    fn test_hidden_entries_dimmed() {
        let hidden = FileEntry::new(".profile".into(), FileEntry::IS_HIDDEN);
        let plain = FileEntry::new("profile".into(), 0);
        assert!(entry_style(&hidden, false).add_modifier.contains(Modifier::DIM));
        assert!(!entry_style(&plain, false).add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_layout_console_never_eats_status() {
        let chunks = layout_chunks(Rect::new(0, 0, 40, 5), 50);
        assert_eq!(chunks.status.height, 1);
        assert_eq!(chunks.left.height, 0);
    }
}
