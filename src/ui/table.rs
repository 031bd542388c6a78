use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::app::{AppState, InputMode};
use crate::model::{Field, UserRecord};

fn header_label(app: &AppState, field: Field) -> String {
    let sort = app.dashboard.sort_state();
    if sort.key == field {
        format!("{} {}", field.label(), sort.direction.indicator())
    } else {
        field.label().to_string()
    }
}

/// Cells of a row; the row under edit shows its buffer with the active column marked.
fn row_cells(app: &AppState, user: &UserRecord) -> Vec<Cell<'static>> {
    let editing = app
        .dashboard
        .edit_session()
        .filter(|s| s.id == user.id)
        .map(|s| &s.buffer);
    match editing {
        Some(buf) => Field::ALL
            .iter()
            .map(|&field| {
                let text = buf.field_value(field).to_string();
                let style = Style::default().fg(app.theme.editing_fg);
                if field == app.edit_field {
                    let shown = if field == Field::Role { format!("< {text} >") } else { format!("{text}_") };
                    Cell::from(shown).style(style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD))
                } else {
                    Cell::from(text).style(style)
                }
            })
            .collect(),
        None => Field::ALL
            .iter()
            .map(|&field| Cell::from(user.field_value(field).to_string()))
            .collect(),
    }
}

/// Current page of the sorted collection, with the sort marker on the active column.
pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    app.clamp_selection();
    let app: &AppState = app;
    let rows_view = app.dashboard.page_view();
    let table_focused = matches!(app.input_mode, InputMode::Normal | InputMode::RowEdit);

    let rows = rows_view.iter().enumerate().map(|(i, u)| {
        let style = if table_focused && i == app.selected_row {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(row_cells(app, u)).style(style)
    });

    let widths = [Constraint::Percentage(35), Constraint::Percentage(45), Constraint::Percentage(20)];
    let header = Row::new(Field::ALL.map(|field| header_label(app, field))).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let mut title = format!("Users ({})", app.dashboard.store().len());
    if let Some(err) = &app.row_error {
        title.push_str(&format!(" - {err}"));
    }
    let border = if table_focused { app.theme.highlight_fg } else { app.theme.border };
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(border)))
        .column_spacing(1);

    f.render_widget(table, area);
}
