use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::dashboard::Submitted;
use crate::model::Field;
use crate::ui;

/// What the loop should do after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: AppState) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::render(f, &mut app))
            .context("draw frame")?;

        if event::poll(Duration::from_millis(100)).context("poll terminal events")? {
            if let Event::Key(key) = event::read().context("read terminal event")? {
                if key.kind == KeyEventKind::Press && handle_key(&mut app, key) == Flow::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Apply one key press to the state.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Normal => return handle_table_key(app, key),
        InputMode::Form => handle_form_key(app, key.code),
        InputMode::RowEdit => handle_row_edit_key(app, key.code),
        InputMode::Modal => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => app.close_modal(),
            _ => {}
        },
    }
    Flow::Continue
}

fn handle_table_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::Ignore => {}
        KeyAction::OpenHelp => app.open_modal(ModalState::Help),
        KeyAction::FocusForm => app.input_mode = InputMode::Form,
        KeyAction::EditRow => {
            let Some(id) = app.selected_id() else { return Flow::Continue };
            match app.dashboard.begin_edit(&id) {
                Ok(()) => {
                    app.edit_field = Field::Name;
                    app.row_error = None;
                    app.input_mode = InputMode::RowEdit;
                }
                Err(e) => app.open_modal(ModalState::Info { message: e.to_string() }),
            }
        }
        KeyAction::DeleteRow => {
            let Some(id) = app.selected_id() else { return Flow::Continue };
            let name = app.dashboard.store().get(&id).map(|u| u.name.clone()).unwrap_or_default();
            app.dashboard.request_delete(&id);
            app.status = Some(format!("Deleted {name}"));
            app.clamp_selection();
        }
        KeyAction::SortByName => sort(app, Field::Name),
        KeyAction::SortByEmail => sort(app, Field::Email),
        KeyAction::SortByRole => sort(app, Field::Role),
        KeyAction::MoveUp => app.selected_row = app.selected_row.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.selected_row + 1 < app.dashboard.page_view().len() {
                app.selected_row += 1;
            }
        }
        KeyAction::PrevPage => {
            app.dashboard.prev_page();
            app.selected_row = 0;
        }
        KeyAction::NextPage => {
            app.dashboard.next_page();
            app.selected_row = 0;
        }
    }
    Flow::Continue
}

fn sort(app: &mut AppState, key: Field) {
    app.dashboard.request_sort(key);
    let state = app.dashboard.sort_state();
    app.status = Some(format!("Sorted by {} {}", key.label().to_lowercase(), state.direction.indicator()));
}

fn handle_form_key(app: &mut AppState, code: KeyCode) {
    let field = app.form.field;
    match code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Tab | KeyCode::Down => app.form.field = field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.field = field.prev(),
        KeyCode::Enter => {
            let values = app.form.values.clone();
            match app.dashboard.submit(values) {
                Ok(Submitted::Added(u)) | Ok(Submitted::Updated(u)) => {
                    app.status = Some(format!("Saved {}", u.name));
                    app.form.reset();
                    app.clamp_selection();
                }
                Err(e) => app.form.error = Some(e),
            }
        }
        KeyCode::Backspace => match app.form.values.text_mut(field) {
            Some(text) => {
                text.pop();
            }
            None => app.form.values.role = None,
        },
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if field == Field::Role => {
            app.form.values.role = Some(app.form.values.role.unwrap_or_default().cycle());
        }
        KeyCode::Char(c) => {
            if let Some(text) = app.form.values.text_mut(field) {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn handle_row_edit_key(app: &mut AppState, code: KeyCode) {
    let field = app.edit_field;
    match code {
        KeyCode::Esc => {
            app.dashboard.cancel_edit();
            app.row_error = None;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => match app.dashboard.save_edit() {
            Ok(u) => {
                app.status = Some(format!("Saved {}", u.name));
                app.row_error = None;
                app.input_mode = InputMode::Normal;
                app.clamp_selection();
            }
            Err(e) => app.row_error = Some(e.to_string()),
        },
        KeyCode::Tab => app.edit_field = field.next(),
        KeyCode::BackTab => app.edit_field = field.prev(),
        other => {
            let Some(buffer) = app.dashboard.edit_buffer_mut() else {
                app.input_mode = InputMode::Normal;
                return;
            };
            match (field, other) {
                (Field::Role, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                    buffer.role = buffer.role.cycle();
                }
                (Field::Name, KeyCode::Backspace) => {
                    buffer.name.pop();
                }
                (Field::Email, KeyCode::Backspace) => {
                    buffer.email.pop();
                }
                (Field::Name, KeyCode::Char(c)) => buffer.name.push(c),
                (Field::Email, KeyCode::Char(c)) => buffer.email.push(c),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut AppState, code: KeyCode) -> Flow {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn form_submit_adds_and_resets() {
        let mut app = AppState::default();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Form);
        type_str(&mut app, "Amy Lee");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "amy@example.com");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.dashboard.store().len(), 3);
        assert!(app.form.values.name.is_empty());
        assert!(app.form.error.is_none());
    }

    #[test]
    fn role_field_cycles_and_clears() {
        let mut app = AppState::default();
        app.input_mode = InputMode::Form;
        press(&mut app, KeyCode::Up);
        assert_eq!(app.form.field, Field::Role);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.form.values.role, Some(Role::Admin));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form.values.role, None);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.field_error(Field::Role), Some("Role is required"));
        assert_eq!(app.form.field_error(Field::Name), Some("Name is required"));
    }

    #[test]
    fn row_edit_cancel_leaves_record() {
        let mut app = AppState::default();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.input_mode, InputMode::RowEdit);
        type_str(&mut app, "zzz");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.dashboard.store().records().iter().all(|u| !u.name.ends_with("zzz")));
    }

    #[test]
    fn q_quits_only_from_table() {
        let mut app = AppState::default();
        app.input_mode = InputMode::Form;
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Continue);
        assert_eq!(app.form.values.name, "q");
        press(&mut app, KeyCode::Esc);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
    }
}
