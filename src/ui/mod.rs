pub mod components;
pub mod form;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(root[1]);

    let hint = match app.input_mode {
        InputMode::Normal => "n: new user  e: edit  d: delete  1/2/3: sort  ←/→: page  ?: help  q: quit",
        InputMode::Form => "type to fill  Tab/↑/↓: field  Space: role  Enter: save  Esc: back to table",
        InputMode::RowEdit => "type to edit  Tab: next column  Space: role  Enter: save  Esc: cancel",
        InputMode::Modal => "Esc: close",
    };
    let header = Paragraph::new(hint)
        .block(
            Block::default()
                .title("User Management Dashboard")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(header, root[0]);

    form::render_form(f, body[0], app);
    table::render_users_table(f, body[1], app);
    components::render_pager(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::Help => components::render_help_modal(f, f.area(), app),
            ModalState::Info { message } => components::render_info_modal(f, f.area(), app, &message),
        }
    }
}
