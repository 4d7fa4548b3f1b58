use crate::config::Config;
use crate::export::{write_export, ExportRecord};
use crate::output::format_missing;
use crate::scoring::{ITEMS, MAX_ANSWER};
use crate::session::{Session, SessionError, SessionState};
use crate::tui::theme::ThemeColors;
use chrono::Local;
use std::time::Instant;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Questionnaire,
    Results,
    About,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Questionnaire, Tab::Results, Tab::About];

    pub fn index(self) -> usize {
        match self {
            Tab::Questionnaire => 0,
            Tab::Results => 1,
            Tab::About => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    ConfirmReset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

pub struct App {
    pub session: Session,
    pub config: Config,
    pub theme: ThemeColors,
    pub current_tab: Tab,
    pub input_mode: InputMode,
    /// Index into `ITEMS` of the highlighted item
    pub selected_item: usize,
    pub about_scroll: u16,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, config: Config, theme: ThemeColors) -> Self {
        Self {
            session,
            config,
            theme,
            current_tab: Tab::Questionnaire,
            input_mode: InputMode::Normal,
            selected_item: 0,
            about_scroll: 0,
            flash_message: None,
            should_quit: false,
        }
    }

    pub fn selected_item_id(&self) -> u8 {
        ITEMS[self.selected_item].id
    }

    pub fn next_item(&mut self) {
        self.selected_item = (self.selected_item + 1) % ITEMS.len();
    }

    pub fn previous_item(&mut self) {
        self.selected_item = if self.selected_item == 0 {
            ITEMS.len() - 1
        } else {
            self.selected_item - 1
        };
    }

    /// Raise the highlighted answer by one. An unanswered item starts at the
    /// configured default.
    pub fn increment_selected(&mut self) {
        let next = match self.session.answer(self.selected_item_id()) {
            Some(value) => (value + 1).min(MAX_ANSWER),
            None => self.config.default_response(),
        };
        self.set_selected(next);
    }

    pub fn decrement_selected(&mut self) {
        let next = match self.session.answer(self.selected_item_id()) {
            Some(value) => value.saturating_sub(1),
            None => self.config.default_response(),
        };
        self.set_selected(next);
    }

    pub fn set_selected(&mut self, value: u8) {
        let id = self.selected_item_id();
        if let Err(e) = self.session.set_response(id, value) {
            self.report_session_error(e);
        }
    }

    pub fn clear_selected(&mut self) {
        let id = self.selected_item_id();
        if let Err(e) = self.session.clear_response(id) {
            self.report_session_error(e);
        }
    }

    /// Submit the answers. On success the Results tab opens; otherwise the
    /// cursor jumps to the first unanswered item.
    pub fn submit(&mut self) {
        let result = self.session.submit().map(|_| ());
        match result {
            Ok(()) => {
                self.select_tab(Tab::Results);
                self.show_flash("Submitted".to_string(), FlashKind::Success);
            }
            Err(SessionError::Incomplete(err)) => {
                let ids = err.item_ids();
                if let Some(first) = ids.first() {
                    if let Some(pos) = ITEMS.iter().position(|item| item.id == *first) {
                        self.selected_item = pos;
                    }
                }
                self.show_flash(
                    format!("Unanswered: {}", format_missing(&ids)),
                    FlashKind::Error,
                );
            }
            Err(e) => self.report_session_error(e),
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        if tab == Tab::Results && self.session.state() == SessionState::Submitted {
            // Cannot fail: a submission exists in the Submitted state
            let _ = self.session.begin_review();
        }
    }

    pub fn next_tab(&mut self) {
        let next = Tab::ALL[(self.current_tab.index() + 1) % Tab::ALL.len()];
        self.select_tab(next);
    }

    pub fn previous_tab(&mut self) {
        let len = Tab::ALL.len();
        let previous = Tab::ALL[(self.current_tab.index() + len - 1) % len];
        self.select_tab(previous);
    }

    /// Write the submitted answers as CSV into the configured directory.
    pub fn export_results(&mut self) {
        let Some(submission) = self.session.submission() else {
            self.show_flash("Nothing to export yet".to_string(), FlashKind::Error);
            return;
        };

        let record = ExportRecord::new(Local::now(), &submission.report, &submission.responses);
        match write_export(&self.config.export_dir(), &record, self.config.locale) {
            Ok(path) => self.show_flash(format!("Exported: {}", path.display()), FlashKind::Success),
            Err(e) => {
                tracing::warn!("export failed: {:#}", e);
                self.show_flash(format!("Export failed: {}", e), FlashKind::Error);
            }
        }
    }

    /// Back to the questionnaire with the submitted answers kept.
    pub fn revise(&mut self) {
        match self.session.revise() {
            Ok(()) => {
                self.current_tab = Tab::Questionnaire;
                self.show_flash("Editing answers".to_string(), FlashKind::Info);
            }
            Err(e) => self.report_session_error(e),
        }
    }

    pub fn start_reset(&mut self) {
        if self.session.answered_count() > 0 || self.session.submission().is_some() {
            self.input_mode = InputMode::ConfirmReset;
        }
    }

    pub fn confirm_reset(&mut self) {
        self.session.reset();
        self.selected_item = 0;
        self.current_tab = Tab::Questionnaire;
        self.input_mode = InputMode::Normal;
        self.show_flash("Started a new assessment".to_string(), FlashKind::Info);
    }

    pub fn cancel_reset(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn scroll_about_down(&mut self) {
        self.about_scroll = self.about_scroll.saturating_add(1);
    }

    pub fn scroll_about_up(&mut self) {
        self.about_scroll = self.about_scroll.saturating_sub(1);
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    fn report_session_error(&mut self, err: SessionError) {
        let msg = match err {
            SessionError::NotCollecting(_) => {
                "Answers are locked after submitting. Press r on Results to revise".to_string()
            }
            other => other.to_string(),
        };
        self.show_flash(msg, FlashKind::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::UTF8_BOM;
    use std::env;

    fn test_app() -> App {
        App::new(Session::new(), Config::default(), ThemeColors::dark())
    }

    fn answer_all(app: &mut App, value: u8) {
        for _ in 0..ITEMS.len() {
            app.set_selected(value);
            app.next_item();
        }
    }

    fn flash_text(app: &App) -> &str {
        app.flash_message.as_ref().map(|(m, _, _)| m.as_str()).unwrap_or("")
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = test_app();
        app.previous_item();
        assert_eq!(app.selected_item_id(), 9);
        app.next_item();
        assert_eq!(app.selected_item_id(), 1);
    }

    #[test]
    fn test_increment_starts_at_default() {
        let mut app = test_app();
        app.increment_selected();
        assert_eq!(app.session.answer(1), Some(3));
        app.increment_selected();
        app.increment_selected();
        app.increment_selected();
        assert_eq!(app.session.answer(1), Some(6));
    }

    #[test]
    fn test_decrement_saturates() {
        let mut app = test_app();
        app.set_selected(1);
        app.decrement_selected();
        app.decrement_selected();
        assert_eq!(app.session.answer(1), Some(0));
    }

    #[test]
    fn test_configured_default_response() {
        let config = Config {
            default_response: Some(5),
            ..Config::default()
        };
        let mut app = App::new(Session::new(), config, ThemeColors::dark());
        app.decrement_selected();
        assert_eq!(app.session.answer(1), Some(5));
    }

    #[test]
    fn test_incomplete_submit_jumps_to_missing() {
        let mut app = test_app();
        app.set_selected(4);
        app.next_item();
        app.next_item();
        app.set_selected(4); // Q3 answered, Q2 missing
        app.submit();

        assert_eq!(app.session.state(), SessionState::Collecting);
        assert_eq!(app.selected_item_id(), 2);
        assert_eq!(app.current_tab, Tab::Questionnaire);
        assert!(flash_text(&app).starts_with("Unanswered: Q2, Q4"));
    }

    #[test]
    fn test_submit_opens_results_for_review() {
        let mut app = test_app();
        answer_all(&mut app, 4);
        app.submit();
        assert_eq!(app.current_tab, Tab::Results);
        assert_eq!(app.session.state(), SessionState::Reviewing);
        assert_eq!(app.session.report().map(|r| r.overall), Some(4.0));
    }

    #[test]
    fn test_edit_after_submit_is_rejected() {
        let mut app = test_app();
        answer_all(&mut app, 2);
        app.submit();
        app.set_selected(6);
        assert_eq!(app.session.submitted_responses().and_then(|r| r.get(1)), Some(2));
        assert!(flash_text(&app).contains("revise"));
    }

    #[test]
    fn test_revise_and_reset() {
        let mut app = test_app();
        answer_all(&mut app, 5);
        app.submit();
        app.revise();
        assert_eq!(app.current_tab, Tab::Questionnaire);
        assert_eq!(app.session.answered_count(), 9);

        app.start_reset();
        assert_eq!(app.input_mode, InputMode::ConfirmReset);
        app.confirm_reset();
        assert_eq!(app.session.answered_count(), 0);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_reset_on_fresh_session_needs_no_confirmation() {
        let mut app = test_app();
        app.start_reset();
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = test_app();
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Results);
        app.next_tab();
        assert_eq!(app.current_tab, Tab::About);
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Questionnaire);
        app.previous_tab();
        assert_eq!(app.current_tab, Tab::About);
    }

    #[test]
    fn test_export_without_submission() {
        let mut app = test_app();
        app.export_results();
        assert_eq!(flash_text(&app), "Nothing to export yet");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = env::temp_dir().join("uwes_check_test_app_export");
        let _ = std::fs::remove_dir_all(&dir);
        let config = Config {
            export_dir: Some(dir.display().to_string()),
            ..Config::default()
        };
        let mut app = App::new(Session::new(), config, ThemeColors::dark());
        answer_all(&mut app, 1);
        app.submit();
        app.export_results();

        assert!(flash_text(&app).starts_with("Exported: "));
        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 1);
        let path = files[0].as_ref().unwrap().path();
        assert!(std::fs::read(path).unwrap().starts_with(UTF8_BOM));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
