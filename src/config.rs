//! User configuration: key bindings, initial grid, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/col-grid/config.toml` (default `~/.config/col-grid/config.toml`).

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::GRID_COLUMNS;

const DEFAULT_ITEMS: u32 = 3;
const DEFAULT_SPAN: u8 = 4;
const MAX_ITEMS: u32 = 64;

// ───────────────────────────────────────── actions ───────────

/// All configurable keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectPrev,
    SelectNext,
    MoveLeft,
    MoveRight,
    Widen,
    Narrow,
    Cancel,
    Quit,
}

impl Action {
    /// Every action, in config-file order.
    pub const ALL: &[Action] = &[
        Action::SelectPrev,
        Action::SelectNext,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Widen,
        Action::Narrow,
        Action::Cancel,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::SelectPrev => "select_prev",
            Action::SelectNext => "select_next",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Widen => "widen",
            Action::Narrow => "narrow",
            Action::Cancel => "cancel",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared, and SHIFT is ignored for punctuation since terminals
    /// disagree on whether `+` arrives with it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        if matches!(event.code, KeyCode::Char(c) if !c.is_alphanumeric()) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for the status bar (e.g. `"⇧←"`, `"+"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push('^');
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("M-");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push('⇧');
        }
        s.push_str(&match self.code {
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Shift+Left"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Left"`, `"q"`, `"Esc"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let (mods, key_part) = match s.rsplit_once('+') {
            // A bare "+" or a trailing "+" (as in "Shift++") names the plus key.
            Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
            Some((mods, key)) => (mods, key),
            None => ("", s),
        };

        for part in mods.split('+').filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            k if k.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Number of items the grid starts with.
    pub initial_items: u32,
    /// Column span every item starts with.
    pub initial_span: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            initial_items: DEFAULT_ITEMS,
            initial_span: DEFAULT_SPAN,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(SelectPrev, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(SelectNext, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(MoveLeft, vec![KeyBind::new(Left, shift), KeyBind::new(Char('H'), shift)]);
        m.insert(MoveRight, vec![KeyBind::new(Right, shift), KeyBind::new(Char('L'), shift)]);
        m.insert(Widen, vec![KeyBind::new(Char('+'), n), KeyBind::new(Char('='), n)]);
        m.insert(Narrow, vec![KeyBind::new(Char('-'), n)]);
        m.insert(Cancel, vec![KeyBind::new(Esc, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, count)| mc > count) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "drag: move | drag ┃: resize | {}/{}: select | {}/{}: move | {}/{}: width | {}: quit",
            self.short_binding(Action::SelectPrev),
            self.short_binding(Action::SelectNext),
            self.short_binding(Action::MoveLeft),
            self.short_binding(Action::MoveRight),
            self.short_binding(Action::Narrow),
            self.short_binding(Action::Widen),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.  On first run the
    /// defaults are written out so there is a file to edit.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse(&contents)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                match config.save_to(path) {
                    Ok(()) => tracing::info!("wrote default config to {}", path.display()),
                    Err(err) => tracing::warn!(%err, "cannot write default config"),
                }
                config
            }
            Err(err) => {
                tracing::warn!(%err, "cannot read {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        std::fs::write(path, self.serialise())
            .with_context(|| format!("cannot write {}", path.display()))?;
        Ok(())
    }

    /// Parse the `key = value` format.  Unknown keys and bad values are
    /// skipped, leaving the default in place.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "initial_items" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.initial_items = v.clamp(1, MAX_ITEMS);
                    }
                    continue;
                }
                "initial_span" => {
                    if let Ok(v) = value.parse::<u8>() {
                        config.initial_span = v.clamp(1, GRID_COLUMNS);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# col-grid configuration".to_string(),
            String::new(),
            "# Initial grid".to_string(),
            format!("initial_items = {}", self.initial_items),
            format!("initial_span = {}", self.initial_span),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/col-grid/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("col-grid").join("config.toml")
}
