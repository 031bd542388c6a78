//! Shared UI components (pager line, status bar, modals).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::AppState;
use crate::app::keymap::KeyAction;

/// "Page x of y" line with the page-change keys.
pub fn render_pager(f: &mut Frame, area: Rect, app: &AppState) {
    let d = &app.dashboard;
    let total = d.total_pages().max(1);
    let prev = if d.current_page() > 1 { "◀ prev" } else { "      " };
    let next = if d.current_page() < total { "next ▶" } else { "      " };
    let msg = format!("{prev}   Page {} of {total}   {next}", d.current_page());
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.text));
    f.render_widget(p, area);
}

/// Render the bottom status bar with mode, counts and the last message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        crate::app::InputMode::Normal => "TABLE",
        crate::app::InputMode::Form => "FORM",
        crate::app::InputMode::RowEdit => "EDIT",
        crate::app::InputMode::Modal => "MODAL",
    };
    let sort = app.dashboard.sort_state();
    let mut msg = format!(
        "mode: {mode}  users:{}  rows/page:{}  sort:{} {}",
        app.dashboard.store().len(),
        app.dashboard.page_size(),
        sort.key.label().to_lowercase(),
        sort.direction.indicator(),
    );
    if let Some(status) = &app.status {
        msg.push_str("  | ");
        msg.push_str(status);
    }
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let width = 50u16.min(area.width.saturating_sub(4)).max(20);
    let inner_w = width.saturating_sub(4).max(10) as usize;
    let lines = (message.len() / inner_w) as u16 + 1;
    let rect = centered_rect(width, (lines + 4).min(area.height), area);
    let p = Paragraph::new(message.to_string()).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Info")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Table keybindings from the live keymap, plus the fixed text-entry keys.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let key_style = Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text);
    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)))
    };

    let mut lines = vec![section("Table")];
    for action in [
        KeyAction::FocusForm,
        KeyAction::EditRow,
        KeyAction::DeleteRow,
        KeyAction::SortByName,
        KeyAction::SortByEmail,
        KeyAction::SortByRole,
        KeyAction::MoveUp,
        KeyAction::MoveDown,
        KeyAction::PrevPage,
        KeyAction::NextPage,
        KeyAction::OpenHelp,
        KeyAction::Quit,
    ] {
        let keys = app.keymap.keys_for(action);
        if keys.is_empty() {
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<20}", keys.join(", ")), key_style),
            Span::styled(action.description(), text_style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(section("Form / row edit"));
    for (keys, what) in [
        ("Tab, Up, Down", "Change field"),
        ("Space, Left, Right", "Switch role"),
        ("Enter", "Save"),
        ("Esc", "Leave form / cancel edit"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<20}"), key_style),
            Span::styled(what, text_style),
        ]));
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = centered_rect(60, height, area);
    let p = Paragraph::new(lines).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
