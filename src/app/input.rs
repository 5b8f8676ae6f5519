// src/app/input.rs
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::app::config::{self, options_for, Include, TestBy};
use crate::app::state::{App, Mode};
use crate::tracker::ErrorPolicy;

/// What the event loop should do after a key was handled.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Route a key press to the app.
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> KeyOutcome {
    let KeyEvent { code, modifiers, .. } = key;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Quit;
    }
    if code == KeyCode::Esc {
        if app.show_help {
            app.show_help = false;
        } else {
            app.restart();
        }
        return KeyOutcome::Continue;
    }

    match app.mode {
        Mode::Insert => {
            if edit_input(&mut app.input, code, modifiers) {
                app.on_input(now);
            }
        }
        Mode::View | Mode::Finished => match code {
            KeyCode::Enter => {
                app.show_help = false;
                app.start_test(now);
            }
            KeyCode::Char('?') => app.show_help = !app.show_help,
            other => handle_nav(app, other),
        },
    }
    KeyOutcome::Continue
}

/// Apply an editing key to the input buffer. Returns whether it changed.
pub fn edit_input(input: &mut String, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char('w') | KeyCode::Char('h') if ctrl => delete_word(input),
        KeyCode::Backspace if ctrl || modifiers.contains(KeyModifiers::ALT) => delete_word(input),
        KeyCode::Backspace => input.pop().is_some(),
        KeyCode::Char(c) if !ctrl => {
            input.push(c);
            true
        }
        _ => false,
    }
}

/// Delete back to the start of the current (or previous, when sitting right
/// after a space) word.
fn delete_word(input: &mut String) -> bool {
    if input.is_empty() {
        return false;
    }
    let trimmed = input.trim_end_matches(' ').len();
    let cut = input[..trimmed].rfind(' ').map(|i| i + 1).unwrap_or(0);
    input.truncate(cut);
    true
}

/// Navigation keys on the config screen. Ignored while a test is running.
pub fn handle_nav(app: &mut App, code: KeyCode) {
    if app.mode == Mode::Insert {
        return;
    }

    let before = app.config.clone();
    let cfg = &mut app.config;
    match code {
        KeyCode::Char('1') => cfg.test_by = TestBy::Time,
        KeyCode::Char('2') => cfg.test_by = TestBy::Words,
        KeyCode::Left => {
            let idx = cfg.value_index();
            if idx > 0 {
                cfg.value = cfg.options()[idx - 1];
            }
        }
        KeyCode::Right => {
            let idx = cfg.value_index();
            if let Some(&next) = cfg.options().get(idx + 1) {
                cfg.value = next;
            }
        }
        KeyCode::Char('p') => cfg.toggle_include(Include::Punctuation),
        KeyCode::Char('n') => cfg.toggle_include(Include::Numbers),
        KeyCode::Char('l') => cfg.live_wpm = !cfg.live_wpm,
        KeyCode::Char('r') => {
            cfg.error_policy = match cfg.error_policy {
                ErrorPolicy::Sticky => ErrorPolicy::Reversible,
                ErrorPolicy::Reversible => ErrorPolicy::Sticky,
            }
        }
        _ => {}
    }

    if cfg.test_by != before.test_by {
        // keep the position in the option list when switching modes
        let idx = options_for(before.test_by)
            .iter()
            .position(|&v| v == before.value)
            .unwrap_or(0);
        let opts = cfg.options();
        cfg.value = opts[idx.min(opts.len() - 1)];
    }

    if app.config != before {
        if app.mode == Mode::Finished {
            app.mode = Mode::View;
            app.summary = None;
        }
        app.refresh_preview();
        if let Some(path) = &app.config_path {
            if let Err(err) = config::write_selection_to(&app.config, path) {
                warn!(error = %err, path = %path.display(), "could not persist config");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::{load_config_from, TestConfig};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn app_at(cfg: TestConfig, dir: &TempDir) -> App {
        App::new(cfg).with_config_path(dir.path().join("config.toml"))
    }

    #[rstest]
    #[case("hello wor", "hello ")]
    #[case("hello ", "")]
    #[case("hello world  ", "hello ")]
    #[case("solo", "")]
    fn ctrl_w_deletes_a_word(#[case] before: &str, #[case] after: &str) {
        let mut input = before.to_string();
        assert!(edit_input(&mut input, KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(input, after);
    }

    #[test]
    fn plain_editing() {
        let mut input = String::new();
        assert!(edit_input(&mut input, KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(edit_input(&mut input, KeyCode::Char('B'), KeyModifiers::SHIFT));
        assert_eq!(input, "aB");
        assert!(edit_input(&mut input, KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(input, "a");
        assert!(!edit_input(&mut input, KeyCode::Left, KeyModifiers::NONE));
        input.clear();
        assert!(!edit_input(&mut input, KeyCode::Backspace, KeyModifiers::NONE));
    }

    #[test]
    fn typing_drives_the_tracker() {
        let now = Instant::now();
        let mut app = App::new(TestConfig::default());
        app.start_with_text("ab", now);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE), now);
        assert_eq!(app.tracker.cursor(), 1);
        handle_key(&mut app, KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE), now);
        assert_eq!(app.tracker.cursor(), 0);
    }

    #[test]
    fn nav_is_locked_while_typing() {
        let now = Instant::now();
        let mut app = App::new(TestConfig::default());
        app.start_with_text("ab", now);
        handle_nav(&mut app, KeyCode::Char('2'));
        assert_eq!(app.config.test_by, TestBy::Time);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::new(TestConfig::default());
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, key, Instant::now()), KeyOutcome::Quit);
    }

    #[rstest]
    #[case(TestBy::Time, 60, '2', TestBy::Words, 50)]
    #[case(TestBy::Words, 10, '1', TestBy::Time, 15)]
    #[case(TestBy::Words, 100, '1', TestBy::Time, 120)]
    fn switching_mode_keeps_option_position(
        #[case] by: TestBy,
        #[case] value: u16,
        #[case] key: char,
        #[case] new_by: TestBy,
        #[case] new_value: u16,
    ) {
        let dir = TempDir::new().unwrap();
        let mut app = app_at(TestConfig { test_by: by, value, ..TestConfig::default() }, &dir);
        handle_nav(&mut app, KeyCode::Char(key));
        assert_eq!((app.config.test_by, app.config.value), (new_by, new_value));

        let saved = load_config_from(&dir.path().join("config.toml"));
        assert_eq!((saved.test_by, saved.value), (new_by, new_value));
    }

    #[rstest]
    #[case(TestBy::Time, 15, KeyCode::Left)]
    #[case(TestBy::Time, 120, KeyCode::Right)]
    #[case(TestBy::Words, 10, KeyCode::Left)]
    #[case(TestBy::Words, 100, KeyCode::Right)]
    fn value_stops_at_the_ends(#[case] by: TestBy, #[case] value: u16, #[case] key: KeyCode) {
        let dir = TempDir::new().unwrap();
        let mut app = app_at(TestConfig { test_by: by, value, ..TestConfig::default() }, &dir);
        handle_nav(&mut app, key);
        assert_eq!(app.config.value, value);
        // nothing changed, nothing written
        assert!(!dir.path().join("config.toml").exists());
    }

    #[test]
    fn arrows_step_through_options() {
        let dir = TempDir::new().unwrap();
        let mut app = app_at(TestConfig { test_by: TestBy::Words, value: 25, ..TestConfig::default() }, &dir);
        handle_nav(&mut app, KeyCode::Right);
        assert_eq!(app.config.value, 50);
        assert_eq!(app.tracker.passage().word_count(), 50);
        handle_nav(&mut app, KeyCode::Left);
        handle_nav(&mut app, KeyCode::Left);
        assert_eq!(app.config.value, 10);
        assert_eq!(app.tracker.passage().word_count(), 10);
    }

    #[test]
    fn toggles_are_saved() {
        let dir = TempDir::new().unwrap();
        let mut app = app_at(TestConfig::default(), &dir);
        for key in ['p', 'n', 'l', 'r'] {
            handle_nav(&mut app, KeyCode::Char(key));
        }
        handle_nav(&mut app, KeyCode::Char('n'));

        let saved = load_config_from(&dir.path().join("config.toml"));
        assert_eq!(saved.include, vec![Include::Punctuation]);
        assert!(!saved.live_wpm);
        assert_eq!(saved.error_policy, ErrorPolicy::Reversible);
        assert_eq!(saved, app.config);
    }

    #[test]
    fn change_on_results_screen_returns_to_view() {
        let dir = TempDir::new().unwrap();
        let mut app = app_at(TestConfig::default(), &dir);
        app.mode = Mode::Finished;
        handle_nav(&mut app, KeyCode::Char('l'));
        assert_eq!(app.mode, Mode::View);
        assert!(app.summary.is_none());
    }

    #[test]
    fn no_config_path_writes_nothing() {
        let mut app = App::new(TestConfig::default());
        handle_nav(&mut app, KeyCode::Char('2'));
        assert_eq!(app.config.test_by, TestBy::Words);
        assert_eq!(app.config_path, None);
    }
}
