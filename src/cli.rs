// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::app::config::{Include, TestBy, TestConfig};
use crate::tracker::ErrorPolicy;

/// Terminal typing-speed test.
#[derive(Parser, Debug, Default)]
#[command(name = "passage-typist", version, about)]
pub struct Cli {
    /// JSON file holding an array of paragraphs
    #[arg(long, value_name = "PATH")]
    pub paragraphs: Option<PathBuf>,

    /// End the test by time or by word count
    #[arg(long, value_enum)]
    pub by: Option<TestBy>,

    /// Seconds or words, depending on --by
    #[arg(long)]
    pub value: Option<u16>,

    /// Extra characters to include, comma separated
    #[arg(long, value_enum, value_delimiter = ',')]
    pub include: Option<Vec<Include>>,

    /// Whether fixed mistakes still count against accuracy
    #[arg(long, value_enum)]
    pub policy: Option<ErrorPolicy>,

    /// Hide the WPM display while typing
    #[arg(long)]
    pub no_live_wpm: bool,

    /// Print one generated passage and exit
    #[arg(long)]
    pub print_passage: bool,

    /// Log filter, e.g. "debug" or "passage_typist=trace"
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Layer the command line on top of the stored config.
    pub fn apply(&self, cfg: &mut TestConfig) {
        if let Some(path) = &self.paragraphs {
            cfg.paragraphs = Some(path.clone());
        }
        if let Some(by) = self.by {
            cfg.test_by = by;
        }
        if let Some(value) = self.value {
            cfg.value = value;
        }
        if let Some(include) = &self.include {
            cfg.include = include.clone();
            cfg.include.dedup();
        }
        if let Some(policy) = self.policy {
            cfg.error_policy = policy;
        }
        if self.no_live_wpm {
            cfg.live_wpm = false;
        }
        cfg.clamp_value();
    }
}
