//! Color theme and its `theme.conf` file format.

use std::path::Path;

use ratatui::style::Color;

/// Color palette for the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error_fg: Color,
    pub editing_fg: Color,
}

impl Theme {
    /// Plain palette using terminal named colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error_fg: Color::Red,
            editing_fg: Color::Green,
        }
    }

    /// Catppuccin Mocha; the default.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            error_fg: Color::Rgb(0xf3, 0x8b, 0xa8),
            editing_fg: Color::Rgb(0xa6, 0xe3, 0xa1),
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "error_fg" => &mut self.error_fg,
            "editing_fg" => &mut self.editing_fg,
            _ => return None,
        })
    }

    fn entries(&self) -> [(&'static str, Color); 12] {
        [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("error_fg", self.error_fg),
            ("editing_fg", self.editing_fg),
        ]
    }

    /// Parse `key = color` lines over the mocha defaults. Unknown keys and bad colors are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else { continue };
            if let (Some(slot), Some(color)) = (theme.slot_mut(key.trim()), parse_color(val)) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|c| Self::parse(&c))
    }

    /// Serialize in the same format [`Theme::parse`] reads.
    pub fn to_config(&self) -> String {
        let mut buf = String::from("# user-dashboard theme\n# Colors: #RRGGBB, RRGGBB or 'reset'\n\n");
        for (key, color) in self.entries() {
            buf.push_str(&format!("{key} = {}\n", color_to_hex(color)));
        }
        buf
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_config())
    }

    /// Load `path`, writing the default theme there first if it does not exist.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let theme = Self::mocha();
        if let Err(e) = theme.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_hex(c: Color) -> String {
    let (r, g, b) = match c {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Reset => return "reset".to_string(),
        Color::Black => (0x00, 0x00, 0x00),
        Color::Red => (0xff, 0x00, 0x00),
        Color::Green => (0x00, 0xff, 0x00),
        Color::Yellow => (0xff, 0xff, 0x00),
        Color::Blue => (0x00, 0x00, 0xff),
        Color::Magenta => (0xff, 0x00, 0xff),
        Color::Cyan => (0x00, 0xff, 0xff),
        Color::Gray => (0xb3, 0xb3, 0xb3),
        Color::DarkGray => (0x4d, 0x4d, 0x4d),
        Color::LightRed => (0xff, 0x66, 0x66),
        Color::LightGreen => (0x66, 0xff, 0x66),
        Color::LightYellow => (0xff, 0xff, 0x66),
        Color::LightBlue => (0x66, 0x66, 0xff),
        Color::LightMagenta => (0xff, 0x66, 0xff),
        Color::LightCyan => (0x66, 0xff, 0xff),
        Color::White => (0xff, 0xff, 0xff),
        // no hex form; fall back to the terminal default
        Color::Indexed(_) => return "reset".to_string(),
    };
    format!("#{r:02X}{g:02X}{b:02X}")
}
