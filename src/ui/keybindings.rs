//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the keys the walkthrough reacts to. Consumed by
//! `HelpDialog` for display and by [`action_for_key`] for dispatch.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative keys (e.g., vi-style letters for an arrow key)
    pub alt_keys: &'static [KeyCode],
    /// Display text overriding the key list (e.g., "1-9")
    pub label: Option<&'static str>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Short word for the status line; shortcuts without one stay out of it
    pub hint: Option<&'static str>,
    /// Category for grouping in help
    pub category: ShortcutCategory,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Selector,
}

impl ShortcutCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navigation",
            ShortcutCategory::Selector => "Step Selector",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::Navigation,
            ShortcutCategory::Selector,
            ShortcutCategory::General,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Tab", "→/l/n")
    pub fn key_display(&self) -> String {
        if let Some(label) = self.label {
            return label.to_string();
        }
        std::iter::once(&self.key)
            .chain(self.alt_keys)
            .map(format_keycode)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether this shortcut is bound to `key`
    pub fn matches(&self, key: KeyCode) -> bool {
        self.key == key || self.alt_keys.contains(&key)
    }

    /// Format key for help dialog (left-padded to 10 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<10}", self.key_display())
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // Navigation
    Shortcut {
        key: KeyCode::Left,
        alt_keys: &[KeyCode::Char('h'), KeyCode::Char('p')],
        label: None,
        description: "Previous step",
        hint: Some("prev"),
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::Right,
        alt_keys: &[KeyCode::Char('l'), KeyCode::Char('n')],
        label: None,
        description: "Next step",
        hint: Some("next"),
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::Home,
        alt_keys: &[],
        label: None,
        description: "First step",
        hint: None,
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::End,
        alt_keys: &[],
        label: None,
        description: "Last step",
        hint: None,
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::Char('1'),
        alt_keys: &[
            KeyCode::Char('2'),
            KeyCode::Char('3'),
            KeyCode::Char('4'),
            KeyCode::Char('5'),
            KeyCode::Char('6'),
            KeyCode::Char('7'),
            KeyCode::Char('8'),
            KeyCode::Char('9'),
        ],
        label: Some("1-9"),
        description: "Jump to step by number",
        hint: Some("jump"),
        category: ShortcutCategory::Navigation,
    },
    // Selector
    Shortcut {
        key: KeyCode::Tab,
        alt_keys: &[KeyCode::BackTab],
        label: None,
        description: "Highlight next / previous step button",
        hint: Some("select"),
        category: ShortcutCategory::Selector,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_keys: &[],
        label: None,
        description: "Show highlighted step",
        hint: None,
        category: ShortcutCategory::Selector,
    },
    // General
    Shortcut {
        key: KeyCode::Char('?'),
        alt_keys: &[],
        label: None,
        description: "Toggle help",
        hint: Some("help"),
        category: ShortcutCategory::General,
    },
    Shortcut {
        key: KeyCode::Char('q'),
        alt_keys: &[KeyCode::Esc],
        label: None,
        description: "Quit",
        hint: Some("quit"),
        category: ShortcutCategory::General,
    },
];

/// Get shortcuts grouped by category, in display order
pub fn shortcuts_by_category() -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

/// One-line key summary for the status line, e.g. `[?] help  [q/Esc] quit`
pub fn footer_hints() -> String {
    SHORTCUTS
        .iter()
        .filter_map(|s| s.hint.map(|hint| format!("[{}] {}", s.key_display(), hint)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// What a key press asks the walkthrough to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Previous,
    Next,
    First,
    Last,
    /// Jump straight to a step index (already validated against the catalog size)
    Jump(usize),
    SelectorNext,
    SelectorPrevious,
    SelectorCommit,
    ToggleHelp,
    Quit,
}

/// Map a key to an action. Digit keys past the end of the catalog map to nothing.
pub fn action_for_key(key: KeyCode, step_count: usize) -> Option<Action> {
    match key {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => Some(Action::Previous),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => Some(Action::Next),
        KeyCode::Home => Some(Action::First),
        KeyCode::End => Some(Action::Last),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            (index < step_count).then_some(Action::Jump(index))
        }
        KeyCode::Tab => Some(Action::SelectorNext),
        KeyCode::BackTab => Some(Action::SelectorPrevious),
        KeyCode::Enter => Some(Action::SelectorCommit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
