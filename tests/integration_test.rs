// Integration tests for user-dashboard

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use user_dashboard::app::update::{Flow, handle_key};
use user_dashboard::app::{AppState, InputMode, ModalState};
use user_dashboard::model::Field;
use user_dashboard::sort::SortDirection;
use user_dashboard::{Dashboard, FormValues, Role, Submitted, UserStore, ValidationError};

fn press(app: &mut AppState, code: KeyCode) -> Flow {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_str(app: &mut AppState, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn fill_form(app: &mut AppState, name: &str, email: &str) {
    press(app, KeyCode::Char('n'));
    type_str(app, name);
    press(app, KeyCode::Tab);
    type_str(app, email);
    press(app, KeyCode::Enter);
}

// 1) Seeded scenario through the dashboard contract
#[test]
fn seeded_name_collision_then_success() {
    let mut d = Dashboard::default();
    let rejected = d.submit(FormValues::new("John Doe", "new@example.com", Some(Role::User)));
    assert_eq!(rejected, Err(ValidationError::Duplicate));
    assert_eq!(d.store().len(), 2);

    let added = d
        .submit(FormValues::new("Amy Lee", "amy@example.com", Some(Role::User)))
        .expect("Amy is unique");
    let Submitted::Added(amy) = added else { panic!("expected an add") };
    assert_eq!(d.store().len(), 3);
    assert_eq!(d.store().get(&amy.id), Some(&amy));
}

// 2) Same scenario typed into the form
#[test]
fn form_shows_duplicate_message_and_keeps_values() {
    let mut app = AppState::default();
    fill_form(&mut app, "John Doe", "new@example.com");
    assert_eq!(app.input_mode, InputMode::Form);
    assert_eq!(app.form.duplicate_error().as_deref(), Some("This name or email already exists."));
    assert_eq!(app.form.values.name, "John Doe");
    assert_eq!(app.dashboard.store().len(), 2);

    // fix the name and resubmit
    press(&mut app, KeyCode::Up);
    for _ in 0.."John Doe".len() {
        press(&mut app, KeyCode::Backspace);
    }
    type_str(&mut app, "Amy Lee");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.dashboard.store().len(), 3);
    assert!(app.form.error.is_none());
    assert!(app.form.values.name.is_empty());
}

// 3) Inline edit save goes through the store and keeps the id
#[test]
fn inline_edit_save_keeps_id() {
    let mut app = AppState::default();
    // default view is name ascending: Jane Smith, John Doe
    press(&mut app, KeyCode::Down);
    let id = app.selected_id().unwrap();
    assert_eq!(id.as_str(), "1");

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.input_mode, InputMode::RowEdit);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.edit_field, Field::Role);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.input_mode, InputMode::Normal);
    let john = app.dashboard.store().get(&id).unwrap();
    assert_eq!(john.role, Role::User);
    assert_eq!(john.name, "John Doe");
    assert!(app.dashboard.edit_session().is_none());
}

// 4) Blank save is refused and the row stays in edit mode
#[test]
fn inline_edit_blank_name_is_refused() {
    let mut app = AppState::default();
    press(&mut app, KeyCode::Enter);
    for _ in 0..20 {
        press(&mut app, KeyCode::Backspace);
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input_mode, InputMode::RowEdit);
    assert_eq!(app.row_error.as_deref(), Some("Name is required"));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.dashboard.store().records()[1].name, "Jane Smith");
}

// 5) Sort keys toggle direction and reorder the page
#[test]
fn sort_keys_toggle() {
    let mut app = AppState::default();
    press(&mut app, KeyCode::Char('1'));
    assert_eq!(app.dashboard.sort_state().direction, SortDirection::Desc);
    assert_eq!(app.dashboard.page_view()[0].name, "John Doe");

    press(&mut app, KeyCode::Char('3'));
    let s = app.dashboard.sort_state();
    assert_eq!((s.key, s.direction), (Field::Role, SortDirection::Asc));
    assert_eq!(app.dashboard.page_view()[0].role, Role::Admin);
}

// 6) Paging across a larger collection, then delete clamps the page
#[test]
fn paging_and_delete_on_last_page() {
    let mut app = AppState::with_dashboard(Dashboard::new(UserStore::seeded(), 2));
    fill_form(&mut app, "Amy Lee", "amy@example.com");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.dashboard.total_pages(), 2);

    press(&mut app, KeyCode::Right);
    assert_eq!(app.dashboard.current_page(), 2);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.dashboard.current_page(), 2);
    assert_eq!(app.dashboard.page_view().len(), 1);

    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.dashboard.store().len(), 2);
    assert_eq!(app.dashboard.current_page(), 1);
    assert_eq!(app.selected_row, 0);
    assert!(app.selected_id().is_some());
}

// 7) Deleting everything leaves an empty, navigable table
#[test]
fn delete_all_rows() {
    let mut app = AppState::default();
    press(&mut app, KeyCode::Delete);
    press(&mut app, KeyCode::Delete);
    press(&mut app, KeyCode::Delete);
    assert!(app.dashboard.store().is_empty());
    assert!(app.selected_id().is_none());
    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.dashboard.total_pages(), 0);
}

// 8) Help modal opens and closes; q quits from the table
#[test]
fn help_and_quit() {
    let mut app = AppState::default();
    press(&mut app, KeyCode::Char('?'));
    assert_eq!(app.modal, Some(ModalState::Help));
    assert_eq!(press(&mut app, KeyCode::Esc), Flow::Continue);
    assert!(app.modal.is_none());
    assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
}

// 9) Theme and keybinding files are created on first load and read back
#[test]
fn config_files_init_and_reload() {
    use std::time::{SystemTime, UNIX_EPOCH};
    use user_dashboard::app::{Keymap, Theme};

    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let dir = std::env::temp_dir().join(format!("udash_{}_{}", std::process::id(), nonce));
    std::fs::create_dir_all(&dir).unwrap();
    let theme_path = dir.join("theme.conf");
    let keys_path = dir.join("keybinds.conf");

    let t = Theme::load_or_init(&theme_path);
    assert!(theme_path.exists());
    assert_eq!(Theme::from_file(&theme_path), Some(t));

    std::fs::write(&keys_path, "Quit = x\n").unwrap();
    let km = Keymap::load_or_init(&keys_path);
    let ev = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    assert_eq!(km.resolve(&ev), Some(user_dashboard::app::keymap::KeyAction::Quit));

    let _ = std::fs::remove_dir_all(&dir);
}

// 10) Rendering does not panic on a small terminal
#[test]
fn render_into_test_backend() {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    let mut app = AppState::default();
    press(&mut app, KeyCode::Char('e'));
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal.draw(|f| user_dashboard::ui::render(f, &mut app)).unwrap();
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('?'));
    terminal.draw(|f| user_dashboard::ui::render(f, &mut app)).unwrap();

    let mut tiny = Terminal::new(TestBackend::new(10, 4)).unwrap();
    tiny.draw(|f| user_dashboard::ui::render(f, &mut app)).unwrap();
}
