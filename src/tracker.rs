// src/tracker.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::letters::{LetterState, Passage};

/// What happens to a logged mistake when the user deletes it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Every wrong keystroke stays counted, even once fixed.
    #[default]
    Sticky,
    /// Deleting a wrong letter also removes it from the mistake log.
    Reversible,
}

/// Outcome of feeding one input snapshot to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub advanced: usize,
    pub retreated: usize,
    pub finished: bool,
}

/// Compares successive snapshots of the user's input against a passage and
/// keeps a cursor plus per-letter judgements up to date.
#[derive(Debug, Clone)]
pub struct Tracker {
    passage: Passage,
    cursor: usize,
    correct: usize,
    /// Letter index and elapsed second of every logged mistake.
    wrong_log: Vec<(usize, u64)>,
    policy: ErrorPolicy,
}

impl Tracker {
    pub fn new(passage: Passage, policy: ErrorPolicy) -> Self {
        Tracker { passage, cursor: 0, correct: 0, wrong_log: Vec::new(), policy }
    }

    /// Diff `snapshot` (the whole input so far) against the judged prefix.
    /// Anything the snapshot no longer agrees with is rewound first, then
    /// every new character is judged in order. New mistakes are stamped
    /// with `at_secs`.
    pub fn apply_snapshot(&mut self, snapshot: &str, at_secs: u64) -> Progress {
        let input: Vec<char> = snapshot.chars().collect();
        let mut progress = Progress::default();

        let reach = self.cursor.min(input.len());
        let keep = (0..reach)
            .find(|&i| self.passage.letter(i).and_then(|l| l.typed) != Some(input[i]))
            .unwrap_or(reach);

        while self.cursor > keep {
            self.cursor -= 1;
            self.unjudge(self.cursor);
            progress.retreated += 1;
        }

        while self.cursor < input.len() && self.cursor < self.passage.len() {
            let typed = input[self.cursor];
            if let Some(letter) = self.passage.letter_mut(self.cursor) {
                match letter.judge(typed) {
                    LetterState::Correct => self.correct += 1,
                    LetterState::Wrong => self.wrong_log.push((self.cursor, at_secs)),
                    LetterState::Pending => {}
                }
            }
            self.cursor += 1;
            progress.advanced += 1;
        }

        progress.finished = self.is_finished();
        progress
    }

    fn unjudge(&mut self, i: usize) {
        let Some(letter) = self.passage.letter_mut(i) else {
            return;
        };
        match letter.state {
            LetterState::Correct => self.correct = self.correct.saturating_sub(1),
            LetterState::Wrong if self.policy == ErrorPolicy::Reversible => {
                if let Some(pos) = self.wrong_log.iter().rposition(|&(w, _)| w == i) {
                    self.wrong_log.remove(pos);
                }
            }
            _ => {}
        }
        letter.reset();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        !self.passage.is_empty() && self.cursor >= self.passage.len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    /// Number of logged mistakes; depends on the policy whether fixed ones
    /// are still in here.
    pub fn wrong_count(&self) -> usize {
        self.wrong_log.len()
    }

    /// When each logged mistake was made, oldest first.
    pub fn mistake_secs(&self) -> Vec<u64> {
        self.wrong_log.iter().map(|&(_, secs)| secs).collect()
    }

    pub fn words_completed(&self) -> usize {
        if self.is_finished() {
            self.passage.word_count()
        } else {
            self.passage.word_of(self.cursor).saturating_sub(1)
        }
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }
}
