// src/app/state.rs
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::app::config::{TestBy, TestConfig};
use crate::generator::{self, ParagraphSource};
use crate::letters::Passage;
use crate::timer::{elapsed_whole_secs, Ticker};
use crate::tracker::Tracker;
use crate::wpm::{self, TestResult, IDLE_TIMER_LABEL};

/// Current application mode: selecting, typing, or finished.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    View,
    Insert,
    Finished,
}

/// Why a running test stopped.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FinishReason {
    TimeUp,
    WordCount,
    Completed,
}

/// Everything shown on the results screen.
#[derive(Debug, Clone)]
pub struct Summary {
    pub result: TestResult,
    pub elapsed_secs: u64,
    pub elapsed_label: String,
    pub test_type: Vec<String>,
    pub raw_wpm: f64,
    pub correct: usize,
    pub wrong: usize,
    pub consistency: Option<f64>,
    pub reason: FinishReason,
    pub finished_at: DateTime<Local>,
}

/// Lines describing how the test was configured, in display order.
pub fn test_type_info(cfg: &TestConfig) -> Vec<String> {
    let mut info = vec![format!("test by {}", cfg.test_by.label())];
    info.extend(cfg.include.iter().map(|inc| format!("include {}", inc.label())));
    info.push(match cfg.test_by {
        TestBy::Words => format!("test of {} words", cfg.value),
        TestBy::Time => format!("chosen time {}s", cfg.value),
    });
    info
}

/// Application state: the running test, its clock and the live displays.
pub struct App {
    pub config: TestConfig,
    /// Where config-screen changes are saved; nothing is written when unset.
    pub config_path: Option<PathBuf>,
    pub source: ParagraphSource,
    pub mode: Mode,
    pub tracker: Tracker,
    /// What the user has typed so far; the tracker diffs against this.
    pub input: String,
    pub start: Option<Instant>,
    pub ticker: Ticker,
    pub allow_input: bool,
    pub words_completed: usize,
    pub samples: Vec<(u64, f64)>,
    pub error_secs: Vec<u64>,
    pub live_timer: String,
    pub live_wpm: u32,
    pub summary: Option<Summary>,
    pub notice: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(config: TestConfig) -> Self {
        let source = ParagraphSource::from_config(&config);
        let policy = config.error_policy;
        let mut app = App {
            config,
            config_path: None,
            source,
            mode: Mode::View,
            tracker: Tracker::new(Passage::default(), policy),
            input: String::new(),
            start: None,
            ticker: Ticker::every_second(),
            allow_input: false,
            words_completed: 0,
            samples: Vec::new(),
            error_secs: Vec::new(),
            live_timer: IDLE_TIMER_LABEL.to_string(),
            live_wpm: 0,
            summary: None,
            notice: None,
            show_help: false,
        };
        app.refresh_preview();
        app
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Regenerate the passage shown before a test starts.
    pub fn refresh_preview(&mut self) {
        let text = generator::generate_for_config(&self.source, &self.config);
        self.tracker = Tracker::new(Passage::from_text(&text), self.config.error_policy);
    }

    fn reset_live_displays(&mut self) {
        self.live_timer = IDLE_TIMER_LABEL.to_string();
        self.live_wpm = 0;
    }

    /// Begin a new test: fetch paragraphs, build the passage and start the clock.
    pub fn start_test(&mut self, now: Instant) {
        let text = generator::generate_for_config(&self.source, &self.config);
        self.start_with_text(&text, now);
    }

    /// Same as `start_test` with a fixed passage.
    pub fn start_with_text(&mut self, text: &str, now: Instant) {
        self.reset_live_displays();
        let passage = Passage::from_text(text);
        if passage.is_empty() {
            warn!(source = ?self.source, "no passage available, test not started");
            self.notice = Some("No paragraphs available".into());
            self.mode = Mode::View;
            return;
        }

        info!(
            test_by = self.config.test_by.label(),
            value = self.config.value,
            letters = passage.len(),
            words = passage.word_count(),
            "test started"
        );
        self.tracker = Tracker::new(passage, self.config.error_policy);
        self.input.clear();
        self.words_completed = 0;
        self.samples.clear();
        self.error_secs.clear();
        self.summary = None;
        self.notice = None;
        self.start = Some(now);
        self.ticker.start(now);
        self.mode = Mode::Insert;
        self.allow_input = true;
    }

    pub fn is_running(&self) -> bool {
        self.mode == Mode::Insert && self.start.is_some()
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.start.map(|s| elapsed_whole_secs(s, now)).unwrap_or(0)
    }

    /// Feed the current input buffer to the tracker.
    pub fn on_input(&mut self, now: Instant) {
        if !self.is_running() || !self.allow_input {
            return;
        }

        let progress = self.tracker.apply_snapshot(&self.input, self.elapsed_secs(now));
        self.error_secs = self.tracker.mistake_secs();
        self.words_completed = self.tracker.words_completed();
        self.update_live_wpm(now);

        if progress.finished {
            self.finish(now, FinishReason::Completed);
        } else if self.config.test_by == TestBy::Words
            && self.words_completed >= usize::from(self.config.value)
        {
            self.finish(now, FinishReason::WordCount);
        }
    }

    fn update_live_wpm(&mut self, now: Instant) {
        let elapsed = self.elapsed_secs(now);
        self.live_wpm =
            wpm::calculate_result(self.tracker.correct_count(), self.tracker.wrong_count(), elapsed).wpm;
    }

    /// The once-a-second refresh: timer label, live WPM, chart samples and
    /// the time limit.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_running() || !self.ticker.poll(now) {
            return;
        }
        let elapsed = self.elapsed_secs(now);

        let remaining = match self.config.test_by {
            TestBy::Time => {
                let remaining = u64::from(self.config.value).saturating_sub(elapsed);
                self.live_timer = wpm::format_elapsed(remaining);
                Some(remaining)
            }
            TestBy::Words => {
                self.live_timer = wpm::format_elapsed(elapsed);
                None
            }
        };

        self.update_live_wpm(now);
        if elapsed > 0 && self.samples.last().map_or(true, |&(t, _)| elapsed > t) {
            self.samples.push((elapsed, f64::from(self.live_wpm)));
        }

        if remaining == Some(0) {
            self.finish(now, FinishReason::TimeUp);
        }
    }

    /// Stop the clock, score the test and get ready for another run.
    pub fn finish(&mut self, now: Instant, reason: FinishReason) {
        self.ticker.stop();
        let elapsed = self.elapsed_secs(now);
        let correct = self.tracker.correct_count();
        let wrong = self.tracker.wrong_count();
        let result = wpm::calculate_result(correct, wrong, elapsed);

        info!(?reason, wpm = result.wpm, accuracy = result.accuracy, elapsed, "test finished");

        self.summary = Some(Summary {
            result,
            elapsed_secs: elapsed,
            elapsed_label: wpm::format_elapsed(elapsed),
            test_type: test_type_info(&self.config),
            raw_wpm: wpm::gross_wpm(correct + wrong, elapsed as f64),
            correct,
            wrong,
            consistency: wpm::consistency(&self.samples),
            reason,
            finished_at: Local::now(),
        });
        self.reinit();
        self.mode = Mode::Finished;
    }

    fn reinit(&mut self) {
        self.input.clear();
        self.tracker = Tracker::new(Passage::default(), self.config.error_policy);
        self.words_completed = 0;
        self.allow_input = false;
        self.start = None;
    }

    /// Back to the config screen with a fresh preview.
    pub fn restart(&mut self) {
        debug!("restart");
        self.ticker.stop();
        self.reinit();
        self.reset_live_displays();
        self.summary = None;
        self.samples.clear();
        self.error_secs.clear();
        self.mode = Mode::View;
        self.refresh_preview();
    }
}
