//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Recomputing the index after every edit

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::ScoringService;
use crate::config::AppConfig;
use crate::domain::ScoreView;

use super::ui::{
    about::render_about,
    exam_form::{render_exam_form, ExamFormState},
    render_disclaimer, render_header, render_key_hints,
    results::{render_results, ResultsState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Calculator,
    About,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,
    scoring: ScoringService,
    form: ExamFormState,
    /// Always reflects the current form contents
    results: ResultsState,
}

impl App {
    /// Create the application with an empty form.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::with_service(ScoringService::new(config.view))
    }

    /// Create the application around a pre-configured scoring service.
    #[must_use]
    pub fn with_service(scoring: ScoringService) -> Self {
        let mut app = Self {
            screen: Screen::Calculator,
            should_quit: false,
            scoring,
            form: ExamFormState::default(),
            results: ResultsState::InputError(String::new()),
        };
        app.recompute();
        app
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn view(&self) -> ScoreView {
        self.scoring.view()
    }

    /// Plain-text readout of the current form, or the input error.
    #[must_use]
    pub fn report(&self) -> String {
        match &self.results {
            ResultsState::Assessed(assessment) => self.scoring.render_report(assessment),
            ResultsState::InputError(message) => message.clone(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore the terminal even when the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // Header
                        Constraint::Min(0),    // Content
                        Constraint::Length(2), // Key hints
                        Constraint::Length(2), // Disclaimer
                    ])
                    .split(f.area());

                render_header(f, chunks[0], self.scoring.view());

                match self.screen {
                    Screen::Calculator => {
                        let panes = Layout::default()
                            .direction(Direction::Horizontal)
                            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
                            .split(chunks[1]);
                        render_exam_form(f, panes[0], &self.form);
                        render_results(f, panes[1], &self.results, self.scoring.view());
                    }
                    Screen::About => render_about(f, chunks[1]),
                }

                render_key_hints(f, chunks[2]);
                render_disclaimer(f, chunks[3]);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Calculator => self.handle_calculator_key(key),
            Screen::About => self.handle_about_key(key),
        }
    }

    fn handle_calculator_key(&mut self, key: KeyCode) {
        let changed = match key {
            KeyCode::Up | KeyCode::BackTab => {
                self.form.prev_field();
                false
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
                self.form.next_field();
                false
            }
            KeyCode::Char(c) if c.is_ascii_digit() => self.form.input_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.clear_field(),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form.load_sample_data();
                true
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.form.reset();
                true
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                let view = self.scoring.view().toggled();
                self.scoring.set_view(view);
                tracing::info!(%view, "Score view changed");
                false
            }
            KeyCode::Char('?') => {
                self.screen = Screen::About;
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            _ => false,
        };

        if changed {
            self.recompute();
        }
    }

    fn handle_about_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => {
                self.screen = Screen::Calculator;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Re-evaluate from the form contents. Nothing carries over from the last pass.
    fn recompute(&mut self) {
        self.results = match self.form.to_exam_counts() {
            Ok(counts) => ResultsState::Assessed(self.scoring.assess(&counts)),
            Err(message) => ResultsState::InputError(message),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key, KeyModifiers::NONE);
        }
    }

    fn type_digits(app: &mut App, digits: &str) {
        for c in digits.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_starts_with_zero_scores() {
        let app = App::new(&AppConfig::default());
        assert_eq!(app.screen(), Screen::Calculator);
        let report = app.report();
        assert!(report.contains("Total Available Surfaces (S_total): 128"));
        assert!(report.contains("SACI-total: 0.00%"));
    }

    #[test]
    fn test_every_keystroke_recomputes() {
        let mut app = App::new(&AppConfig::default());
        type_digits(&mut app, "4");
        assert!(app.report().contains("Weighted Active Caries Score (Dₐ):  2.00"));

        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert!(app.report().contains("Weighted Active Caries Score (Dₐ):  0.00"));
    }

    #[test]
    fn test_sample_data_key() {
        let mut app = App::new(&AppConfig::default());
        press(&mut app, &[KeyCode::Char('s')]);
        assert!(app.report().contains("SACI-total: 7.03%"));

        press(&mut app, &[KeyCode::Char('r')]);
        assert!(app.report().contains("SACI-total: 0.00%"));
    }

    #[test]
    fn test_non_caries_loss_trips_guard() {
        let mut app = App::new(&AppConfig::default());
        // Tab to NMnc_ant (index 8), enter 20; then NMnc_post, enter 10.
        press(&mut app, &[KeyCode::Tab; 8]);
        type_digits(&mut app, "20");
        press(&mut app, &[KeyCode::Tab]);
        type_digits(&mut app, "10");

        let report = app.report();
        assert!(report.contains("Total Available Surfaces (S_total): -2"));
        assert!(report.contains("Invalid total surface count"));

        // Fix it by clearing the posterior count.
        press(&mut app, &[KeyCode::Delete]);
        assert!(app.report().contains("Total Available Surfaces (S_total): 48"));
    }

    #[test]
    fn test_view_toggle() {
        let mut app = App::new(&AppConfig::default());
        assert_eq!(app.view(), ScoreView::Breakdown);
        press(&mut app, &[KeyCode::Char('v')]);
        assert_eq!(app.view(), ScoreView::Composite);
        assert!(!app.report().contains("SACI-active"));
    }

    #[test]
    fn test_about_screen_and_quit() {
        let mut app = App::new(&AppConfig::default());
        press(&mut app, &[KeyCode::Char('?')]);
        assert_eq!(app.screen(), Screen::About);
        // Digits do nothing outside the form.
        type_digits(&mut app, "5");
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen(), Screen::Calculator);
        assert!(app.report().contains("SACI-total: 0.00%"));
        assert!(!app.should_quit());

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }
}
