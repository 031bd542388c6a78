//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only table navigation goes through the keymap. Text entry in the form and in an
//! inline row edit reads raw key codes so every printable character reaches the field.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic actions available while browsing the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Show the keybindings reference.
    OpenHelp,
    /// Move focus to the new-user form.
    FocusForm,
    /// Start inline editing of the selected row.
    EditRow,
    /// Delete the selected row.
    DeleteRow,
    /// Sort by name (toggles direction when already active).
    SortByName,
    /// Sort by email.
    SortByEmail,
    /// Sort by role.
    SortByRole,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    /// Swallow the key.
    Ignore,
}

impl KeyAction {
    const ALL: [KeyAction; 13] = [
        KeyAction::Quit,
        KeyAction::OpenHelp,
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
        KeyAction::Ignore,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KeyAction::Quit => "Quit",
            KeyAction::OpenHelp => "OpenHelp",
            KeyAction::FocusForm => "FocusForm",
            KeyAction::EditRow => "EditRow",
            KeyAction::DeleteRow => "DeleteRow",
            KeyAction::SortByName => "SortByName",
            KeyAction::SortByEmail => "SortByEmail",
            KeyAction::SortByRole => "SortByRole",
            KeyAction::MoveUp => "MoveUp",
            KeyAction::MoveDown => "MoveDown",
            KeyAction::PrevPage => "PrevPage",
            KeyAction::NextPage => "NextPage",
            KeyAction::Ignore => "Ignore",
        }
    }

    /// Human label used in the help modal.
    pub fn description(self) -> &'static str {
        match self {
            KeyAction::Quit => "Quit",
            KeyAction::OpenHelp => "Show this help",
            KeyAction::FocusForm => "New user (focus form)",
            KeyAction::EditRow => "Edit selected row",
            KeyAction::DeleteRow => "Delete selected row",
            KeyAction::SortByName => "Sort by name",
            KeyAction::SortByEmail => "Sort by email",
            KeyAction::SortByRole => "Sort by role",
            KeyAction::MoveUp => "Move up",
            KeyAction::MoveDown => "Move down",
            KeyAction::PrevPage => "Previous page",
            KeyAction::NextPage => "Next page",
            KeyAction::Ignore => "Ignored",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == s.trim())
    }
}

/// Mapping from `(modifiers, code)` to [`KeyAction`].
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Char('n')), KeyAction::FocusForm);
        bindings.insert((M::NONE, Tab), KeyAction::FocusForm);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditRow);
        bindings.insert((M::NONE, Enter), KeyAction::EditRow);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteRow);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteRow);
        bindings.insert((M::NONE, Char('1')), KeyAction::SortByName);
        bindings.insert((M::NONE, Char('2')), KeyAction::SortByEmail);
        bindings.insert((M::NONE, Char('3')), KeyAction::SortByRole);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        Self { bindings }
    }

    /// Load `path`, or write the defaults there when it does not exist yet.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default keybindings");
        }
        km
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|c| Self::parse(&c))
    }

    /// Parse `Action = KeySpec` lines on top of the defaults. `KeySpec = Action` is accepted too.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else { continue };
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            let binding = match (KeyAction::parse(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => Some((key, action)),
                _ => parse_key(lhs).zip(KeyAction::parse(rhs)),
            };
            match binding {
                Some((key, action)) => {
                    map.bindings.insert(key, action);
                }
                None => tracing::debug!(line, "ignoring unrecognized keybinding"),
            }
        }
        map
    }

    /// Current bindings in file format, sorted by action then key.
    pub fn to_config(&self) -> String {
        let mut buf = String::from("# user-dashboard keybindings\n# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Tab, BackTab, Up, Down, Left, Right, PageUp, PageDown, Delete\n");
        buf.push_str("# Actions: ");
        buf.push_str(&KeyAction::ALL.map(KeyAction::name).join(", "));
        buf.push_str("\n\n");
        let mut lines: Vec<(usize, String)> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| {
                let rank = KeyAction::ALL.iter().position(|a| a == action).unwrap_or(usize::MAX);
                (rank, format!("{} = {}", action.name(), Self::format_key(*mods, *code)))
            })
            .collect();
        lines.sort();
        for (_, line) in lines {
            buf.push_str(&line);
            buf.push('\n');
        }
        buf
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_config())
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys
    }

    /// Format a key like "Ctrl+q" or "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        let base = match code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            other => format!("{other:?}"),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{base}")
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    let spec = spec.trim();
    let (mods, rest) = match spec.strip_prefix("Ctrl+") {
        Some(rest) => (KeyModifiers::CONTROL, rest),
        None => (KeyModifiers::NONE, spec),
    };
    let code = match rest {
        "Enter" => KeyCode::Enter,
        "Delete" => KeyCode::Delete,
        "Esc" | "Escape" => KeyCode::Esc,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}
