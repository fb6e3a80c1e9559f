use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::steps::{StepCatalog, StepNavigator};
use crate::ui::dialogs::HelpDialog;
use crate::ui::keybindings::{action_for_key, Action};
use crate::ui::step_view::StepView;
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};

/// Interactive walkthrough: one navigator, a selector highlight, and the help overlay.
pub struct App {
    config: Config,
    navigator: StepNavigator,
    /// Step button highlighted in the selector bar; committed with Enter
    selector: usize,
    help_dialog: HelpDialog,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, catalog: Arc<StepCatalog>) -> Self {
        Self {
            config,
            navigator: StepNavigator::new(catalog),
            selector: 0,
            help_dialog: HelpDialog::new(),
            should_quit: false,
        }
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn selector(&self) -> usize {
        self.selector
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn help_visible(&self) -> bool {
        self.help_dialog.visible
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let _guard = TerminalGuard::new()?;

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        tracing::info!(
            steps = self.navigator.catalog().step_count(),
            "Walkthrough started"
        );

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code)?;
                    }
                }
            }
        }

        tracing::info!(
            last_step = %self.navigator.current().name,
            "Walkthrough closed"
        );
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        StepView {
            navigator: &self.navigator,
            selector: self.selector,
            show_step_bar: self.config.ui.show_step_bar,
            show_key_hints: self.config.ui.show_key_hints,
        }
        .render(frame);
        self.help_dialog.render(frame);
    }

    /// Apply one key press. Errors are wiring bugs and end the session.
    pub fn handle_key(&mut self, key: KeyCode) -> Result<()> {
        if self.help_dialog.visible {
            if matches!(key, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.help_dialog.close();
            }
            return Ok(());
        }

        let step_count = self.navigator.catalog().step_count();
        let Some(action) = action_for_key(key, step_count) else {
            return Ok(());
        };

        match action {
            Action::Previous => {
                self.navigator.go_to_previous();
            }
            Action::Next => {
                self.navigator.go_to_next();
            }
            Action::First => {
                self.navigator.go_to_index(0)?;
            }
            Action::Last => {
                self.navigator.go_to_index(step_count - 1)?;
            }
            Action::Jump(index) => {
                self.navigator.go_to_index(index)?;
            }
            Action::SelectorNext => {
                self.selector = (self.selector + 1) % step_count;
                return Ok(());
            }
            Action::SelectorPrevious => {
                self.selector = (self.selector + step_count - 1) % step_count;
                return Ok(());
            }
            Action::SelectorCommit => {
                self.navigator.go_to_index(self.selector)?;
            }
            Action::ToggleHelp => {
                self.help_dialog.toggle();
                return Ok(());
            }
            Action::Quit => {
                self.should_quit = true;
                return Ok(());
            }
        }

        // Selector highlight follows the active step after any navigation
        self.selector = self.navigator.current_index();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(
            Config::default(),
            Arc::new(StepCatalog::transformer_layer()),
        )
    }

    #[test]
    fn test_arrow_keys_move_and_clamp() {
        let mut app = app();
        app.handle_key(KeyCode::Left).unwrap();
        assert_eq!(app.navigator().current_index(), 0);

        app.handle_key(KeyCode::Right).unwrap();
        app.handle_key(KeyCode::Char('l')).unwrap();
        assert_eq!(app.navigator().current_index(), 2);

        for _ in 0..10 {
            app.handle_key(KeyCode::Right).unwrap();
        }
        assert_eq!(app.navigator().current_index(), 7);
        assert_eq!(app.selector(), 7);
    }

    #[test]
    fn test_digit_jumps() {
        let mut app = app();
        app.handle_key(KeyCode::Char('4')).unwrap();
        assert_eq!(app.navigator().current().name, "Residual Connection 1");

        // Past the last step: ignored by the key map
        app.handle_key(KeyCode::Char('9')).unwrap();
        assert_eq!(app.navigator().current_index(), 3);
    }

    #[test]
    fn test_home_and_end() {
        let mut app = app();
        app.handle_key(KeyCode::End).unwrap();
        assert!(app.navigator().at_end());
        app.handle_key(KeyCode::Home).unwrap();
        assert!(app.navigator().at_start());
    }

    #[test]
    fn test_selector_moves_without_navigating() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        assert_eq!(app.selector(), 2);
        assert_eq!(app.navigator().current_index(), 0);

        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.navigator().current().name, "Multi-Head Attention");
    }

    #[test]
    fn test_selector_wraps() {
        let mut app = app();
        app.handle_key(KeyCode::BackTab).unwrap();
        assert_eq!(app.selector(), 7);
        app.handle_key(KeyCode::Tab).unwrap();
        assert_eq!(app.selector(), 0);
    }

    #[test]
    fn test_help_swallows_keys_until_closed() {
        let mut app = app();
        app.handle_key(KeyCode::Char('?')).unwrap();
        assert!(app.help_visible());

        app.handle_key(KeyCode::Right).unwrap();
        assert_eq!(app.navigator().current_index(), 0);

        app.handle_key(KeyCode::Esc).unwrap();
        assert!(!app.help_visible());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q')).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_with_help_overlay() {
        let mut app = app();
        app.handle_key(KeyCode::Char('?')).unwrap();

        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Keyboard Shortcuts"));
    }
}
