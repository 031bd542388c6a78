//! The "New user" form pane.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{AppState, InputMode};
use crate::model::Field;

pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.input_mode == InputMode::Form;
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();

    for field in Field::ALL {
        let active = focused && app.form.field == field;
        let label_style = if active {
            Style::default().fg(theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.title)
        };
        let value = match field {
            Field::Name => app.form.values.name.clone(),
            Field::Email => app.form.values.email.clone(),
            Field::Role => match app.form.values.role {
                Some(role) => format!("< {role} >"),
                None => "< - >".to_string(),
            },
        };
        let cursor = if active && field != Field::Role { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {:<6}", if active { "▶" } else { " " }, field.label()), label_style),
            Span::styled(format!("{value}{cursor}"), Style::default().fg(theme.text)),
        ]));
        if let Some(msg) = app.form.field_error(field) {
            lines.push(Line::from(Span::styled(format!("         {msg}"), Style::default().fg(theme.error_fg))));
        }
        lines.push(Line::from(""));
    }

    if let Some(msg) = app.form.duplicate_error() {
        lines.push(Line::from(Span::styled(msg, Style::default().fg(theme.error_fg))));
    }
    lines.push(Line::from(Span::styled(
        if focused { "[ Save: Enter ]" } else { "[ n to add a user ]" },
        Style::default().fg(theme.muted),
    )));

    let border = if focused { theme.highlight_fg } else { theme.border };
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("New user")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}
