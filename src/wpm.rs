// src/wpm.rs

/// Label shown on the live timer before a test is running.
pub const IDLE_TIMER_LABEL: &str = "00:00";

/// Final (or live) score of a test, rounded down to whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestResult {
    pub wpm: u32,
    pub accuracy: u32,
}

/// Standard WPM and accuracy.
///
/// WPM counts only correct characters: `(correct / 5) / minutes`. Accuracy is
/// correct over everything typed, where "everything" includes the mistake log.
/// Nothing typed yet means 0% rather than a flattering 100%.
pub fn calculate_result(correct: usize, wrong: usize, elapsed_secs: u64) -> TestResult {
    let minutes = elapsed_secs as f64 / 60.0;
    let wpm = if minutes > 0.0 {
        ((correct as f64 / 5.0) / minutes).floor().max(0.0) as u32
    } else {
        0
    };

    let total = correct + wrong;
    let accuracy = if total > 0 {
        ((correct as f64 / total as f64) * 100.0).floor().max(0.0) as u32
    } else {
        0
    };

    TestResult { wpm, accuracy }
}

/// Gross WPM: total keystrokes (correct + incorrect) ÷ 5, divided by minutes.
pub fn gross_wpm(chars_typed: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    let minutes = elapsed_secs / 60.0;
    (chars_typed as f64 / 5.0) / minutes
}

/// How steady the per-second WPM samples were, as a percentage.
/// Needs at least two samples.
pub fn consistency(samples: &[(u64, f64)]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&(_, w)| w).sum::<f64>() / n;
    let var = samples.iter().map(|&(_, w)| (w - mean).powi(2)).sum::<f64>() / n;
    Some(((1.0 - var.sqrt() / (mean + 1.0)).max(0.0)) * 100.0)
}

/// `m:ss`, minutes unpadded.
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
