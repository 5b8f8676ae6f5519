use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use rstest::rstest;

use passage_typist::app::config::{TestBy, TestConfig};
use passage_typist::app::input::handle_key;
use passage_typist::app::state::{App, FinishReason, Mode};
use passage_typist::tracker::ErrorPolicy;
use passage_typist::wpm::TestResult;

fn press(app: &mut App, code: KeyCode, at: Instant) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), at);
}

fn type_keys(app: &mut App, text: &str, at: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), at);
    }
}

#[rstest]
#[case(ErrorPolicy::Sticky, TestResult { wpm: 2, accuracy: 87 })]
#[case(ErrorPolicy::Reversible, TestResult { wpm: 2, accuracy: 100 })]
fn corrected_typo_scores_by_policy(#[case] policy: ErrorPolicy, #[case] expected: TestResult) {
    let t0 = Instant::now();
    let cfg = TestConfig { test_by: TestBy::Words, value: 10, error_policy: policy, ..TestConfig::default() };
    let mut app = App::new(cfg);
    app.start_with_text("cat dog", t0);

    let later = t0 + Duration::from_secs(30);
    type_keys(&mut app, "cat ", later);
    press(&mut app, KeyCode::Char('x'), later);
    press(&mut app, KeyCode::Backspace, later);
    type_keys(&mut app, "dog", later);

    assert_eq!(app.mode, Mode::Finished);
    let summary = app.summary.clone().unwrap();
    assert_eq!(summary.reason, FinishReason::Completed);
    // 7 correct letters over half a minute
    assert_eq!(summary.result, expected);
    assert_eq!(
        summary.test_type,
        vec!["test by words".to_string(), "test of 10 words".to_string()]
    );
}

#[test]
fn timed_test_runs_to_the_clock() {
    let t0 = Instant::now();
    let cfg = TestConfig { test_by: TestBy::Time, value: 15, ..TestConfig::default() };
    let mut app = App::new(cfg);
    app.start_with_text("the quick brown fox jumps over the lazy dog", t0);

    for s in 1..=14u64 {
        app.tick(t0 + Duration::from_secs(s));
        assert_eq!(app.mode, Mode::Insert);
    }
    assert_eq!(app.live_timer, "0:01");
    type_keys(&mut app, "the quick", t0 + Duration::from_millis(14_500));
    app.tick(t0 + Duration::from_secs(15));

    assert_eq!(app.mode, Mode::Finished);
    let summary = app.summary.as_ref().unwrap();
    assert_eq!(summary.reason, FinishReason::TimeUp);
    assert_eq!(summary.elapsed_label, "0:15");
    assert_eq!(summary.result, TestResult { wpm: 7, accuracy: 100 });
    assert_eq!(app.samples.len(), 15);
}

#[test]
fn enter_after_results_starts_again() {
    let t0 = Instant::now();
    let mut app = App::new(TestConfig::default());
    app.start_with_text("go", t0);
    type_keys(&mut app, "go", t0 + Duration::from_secs(1));
    assert_eq!(app.mode, Mode::Finished);

    // typing on the results screen does nothing to the finished test
    type_keys(&mut app, "zz", t0 + Duration::from_secs(2));
    assert_eq!(app.mode, Mode::Finished);

    press(&mut app, KeyCode::Enter, t0 + Duration::from_secs(3));
    assert_eq!(app.mode, Mode::Insert);
    assert!(app.summary.is_none());
    assert_eq!(app.live_timer, "00:00");
    assert!(!app.tracker.passage().is_empty());
}

#[test]
fn escape_abandons_a_running_test() {
    let t0 = Instant::now();
    let mut app = App::new(TestConfig::default());
    app.start_with_text("abandon me", t0);
    type_keys(&mut app, "aban", t0);
    press(&mut app, KeyCode::Esc, t0);
    assert_eq!(app.mode, Mode::View);
    assert!(app.summary.is_none());
    assert!(!app.ticker.is_running());
}
