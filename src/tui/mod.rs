pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use app::{InputMode, Tab};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250); // 250ms tick

    let result = loop {
        // Draw UI
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        // Handle events
        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Resize => {}
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Tab switching
                KeyCode::Tab => app.next_tab(),
                KeyCode::BackTab => app.previous_tab(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                // Start over
                KeyCode::Char('R') => app.start_reset(),

                _ => match app.current_tab {
                    Tab::Questionnaire => handle_questionnaire_key(app, key),
                    Tab::Results => handle_results_key(app, key),
                    Tab::About => handle_about_key(app, key),
                },
            }
        }
        InputMode::ConfirmReset => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_reset(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_reset(),
            _ => {}
        },
        InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

fn handle_questionnaire_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.next_item(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_item(),

        // Answer adjustment
        KeyCode::Char('l') | KeyCode::Right => app.increment_selected(),
        KeyCode::Char('h') | KeyCode::Left => app.decrement_selected(),
        KeyCode::Char(c @ '0'..='6') => {
            if let Some(value) = c.to_digit(10) {
                app.set_selected(value as u8);
            }
        }
        KeyCode::Backspace | KeyCode::Delete => app.clear_selected(),

        KeyCode::Enter => app.submit(),
        _ => {}
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') => app.export_results(),
        KeyCode::Char('r') => app.revise(),
        _ => handle_tab_digit(app, key),
    }
}

fn handle_about_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_about_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_about_up(),
        _ => handle_tab_digit(app, key),
    }
}

fn handle_tab_digit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('1') => app.select_tab(Tab::Questionnaire),
        KeyCode::Char('2') => app.select_tab(Tab::Results),
        KeyCode::Char('3') => app.select_tab(Tab::About),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::{Session, SessionState};

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn test_app() -> App {
        App::new(Session::new(), Config::default(), ThemeColors::dark())
    }

    #[test]
    fn test_digits_set_answers_on_questionnaire() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.session.answer(1), Some(5));
        assert_eq!(app.session.answer(2), Some(0));
        assert_eq!(app.current_tab, Tab::Questionnaire);
    }

    #[test]
    fn test_backspace_clears_answer() {
        let mut app = test_app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.answer(1), Some(3));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.answer(1), None);
    }

    #[test]
    fn test_full_questionnaire_flow() {
        let mut app = test_app();
        for _ in 0..9 {
            press(&mut app, KeyCode::Char('4'));
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_tab, Tab::Results);
        assert_eq!(app.session.state(), SessionState::Reviewing);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.current_tab, Tab::Questionnaire);
        assert_eq!(app.session.state(), SessionState::Collecting);
    }

    #[test]
    fn test_digit_switches_tab_outside_questionnaire() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_tab, Tab::Results);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_tab, Tab::About);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.current_tab, Tab::Questionnaire);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_tab, Tab::About);
    }

    #[test]
    fn test_reset_confirmation() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('R'));
        assert_eq!(app.input_mode, InputMode::ConfirmReset);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_mode, InputMode::ConfirmReset);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.answer(1), Some(2));

        press(&mut app, KeyCode::Char('R'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.answer(1), None);
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);

        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_about_scroll() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('3')); // sets Q1 on the Questionnaire tab
        app.select_tab(Tab::About);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.about_scroll, 1);
        assert_eq!(app.session.answer(1), Some(3));
    }
}
