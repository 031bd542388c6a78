//! Command-line options and config file locations.

use std::path::PathBuf;

use clap::Parser;

use crate::dashboard::{DEFAULT_PAGE_SIZE, EditPolicy};

/// Terminal dashboard for creating, editing, sorting and paging user records.
#[derive(Parser, Debug, Clone)]
#[command(name = "user-dashboard", version, about)]
pub struct Args {
    /// Rows per table page.
    #[arg(long, env = "USER_DASHBOARD_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Theme file (key = color). Defaults to theme.conf in the config directory.
    #[arg(long)]
    pub theme: Option<PathBuf>,

    /// Keybindings file (Action = KeySpec). Defaults to keybinds.conf in the config directory.
    #[arg(long)]
    pub keybinds: Option<PathBuf>,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, env = "USER_DASHBOARD_LOG")]
    pub log_file: Option<PathBuf>,

    /// Reject edits that reuse another user's name or email.
    #[arg(long)]
    pub strict_edits: bool,

    /// Start with no users instead of the two sample records.
    #[arg(long)]
    pub empty: bool,
}

impl Args {
    pub fn edit_policy(&self) -> EditPolicy {
        if self.strict_edits { EditPolicy::Strict } else { EditPolicy::Lenient }
    }

    pub fn theme_path(&self) -> PathBuf {
        resolve(self.theme.as_ref(), "theme.conf")
    }

    pub fn keybinds_path(&self) -> PathBuf {
        resolve(self.keybinds.as_ref(), "keybinds.conf")
    }
}

/// Explicit path, else an existing config file, else where a new one should go.
fn resolve(explicit: Option<&PathBuf>, name: &str) -> PathBuf {
    explicit
        .cloned()
        .or_else(|| config_file_read_path(name))
        .unwrap_or_else(|| config_file_write_path(name))
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// `$XDG_CONFIG_HOME/user-dashboard`, falling back to `$HOME/.config/user-dashboard`.
pub fn config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("user-dashboard"))
}

/// Existing config file `name`, checking the config directory then the working directory.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    config_dir()
        .map(|d| d.join(name))
        .into_iter()
        .chain(std::iter::once(PathBuf::from(name)))
        .find(|p| p.is_file())
}

/// Where a fresh config file `name` should be written. Creates the config directory when possible.
pub fn config_file_write_path(name: &str) -> PathBuf {
    match config_dir() {
        Some(dir) if std::fs::create_dir_all(&dir).is_ok() => dir.join(name),
        _ => PathBuf::from(name),
    }
}
