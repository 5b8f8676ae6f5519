// src/app/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TypistError};
use crate::tracker::ErrorPolicy;

pub const TIME_OPTIONS: &[u16] = &[15, 30, 60, 120];
pub const WORD_OPTIONS: &[u16] = &[10, 25, 50, 100];

/// How a test is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TestBy {
    #[default]
    Time,
    Words,
}

impl TestBy {
    pub fn label(self) -> &'static str {
        match self {
            TestBy::Time => "time",
            TestBy::Words => "words",
        }
    }
}

/// Extra character classes mixed into the passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Include {
    Punctuation,
    Numbers,
}

impl Include {
    pub fn label(self) -> &'static str {
        match self {
            Include::Punctuation => "punctuation",
            Include::Numbers => "numbers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub test_by: TestBy,
    /// Seconds for a timed test, word count otherwise.
    pub value: u16,
    pub include: Vec<Include>,
    pub live_wpm: bool,
    pub error_policy: ErrorPolicy,
    /// External paragraph file; the bundled list is used when unset.
    pub paragraphs: Option<PathBuf>,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            test_by: TestBy::Time,
            value: 30,
            include: Vec::new(),
            live_wpm: true,
            error_policy: ErrorPolicy::Sticky,
            paragraphs: None,
        }
    }
}

pub fn options_for(test_by: TestBy) -> &'static [u16] {
    match test_by {
        TestBy::Time => TIME_OPTIONS,
        TestBy::Words => WORD_OPTIONS,
    }
}

impl TestConfig {
    pub fn options(&self) -> &'static [u16] {
        options_for(self.test_by)
    }

    /// Index of the current value inside `options()`.
    pub fn value_index(&self) -> usize {
        self.options().iter().position(|&v| v == self.value).unwrap_or(0)
    }

    /// Snap `value` onto the nearest allowed option for the current mode.
    pub fn clamp_value(&mut self) {
        let opts = self.options();
        if opts.contains(&self.value) {
            return;
        }
        if let Some(&nearest) = opts
            .iter()
            .min_by_key(|&&o| (i32::from(o) - i32::from(self.value)).abs())
        {
            self.value = nearest;
        }
    }

    pub fn includes(&self, inc: Include) -> bool {
        self.include.contains(&inc)
    }

    pub fn toggle_include(&mut self, inc: Include) {
        if let Some(pos) = self.include.iter().position(|&i| i == inc) {
            self.include.remove(pos);
        } else {
            self.include.push(inc);
        }
    }
}

/// ~/.config/passage-typist
pub fn config_dir() -> Result<PathBuf> {
    let mut dir = dirs::config_dir().ok_or(TypistError::NoConfigDir)?;
    dir.push("passage-typist");
    Ok(dir)
}

/// ~/.config/passage-typist/config.toml
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Read the config from the user's config directory. A missing file is
/// created with defaults, a broken one is reported and replaced by defaults
/// in memory only.
pub fn load_config() -> TestConfig {
    match config_file() {
        Ok(path) => load_config_from(&path),
        Err(err) => {
            warn!(error = %err, "using default config");
            TestConfig::default()
        }
    }
}

pub fn load_config_from(path: &Path) -> TestConfig {
    if !path.exists() {
        let cfg = TestConfig::default();
        if let Err(err) = save_config_to(&cfg, path) {
            warn!(error = %err, path = %path.display(), "could not write default config");
        }
        return cfg;
    }

    match read_config(path) {
        Ok(mut cfg) => {
            cfg.clamp_value();
            debug!(path = %path.display(), ?cfg, "config loaded");
            cfg
        }
        Err(err) => {
            warn!(error = %err, "malformed config, falling back to defaults");
            TestConfig::default()
        }
    }
}

fn read_config(path: &Path) -> Result<TestConfig> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| TypistError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist what the config screen can change, leaving the rest of the file
/// (the paragraph path) as it was.
pub fn write_selection_to(cfg: &TestConfig, path: &Path) -> Result<()> {
    let mut stored = if path.exists() { read_config(path)? } else { TestConfig::default() };
    stored.test_by = cfg.test_by;
    stored.value = cfg.value;
    stored.include = cfg.include.clone();
    stored.live_wpm = cfg.live_wpm;
    stored.error_policy = cfg.error_policy;
    save_config_to(&stored, path)
}

pub fn save_config_to(cfg: &TestConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(cfg)?;
    fs::write(path, add_config_comments(&body))?;
    Ok(())
}

fn add_config_comments(toml_content: &str) -> String {
    format!(
        r#"# passage-typist configuration
#
# test_by      = "time" | "words"
# value        = seconds (15, 30, 60, 120) or words (10, 25, 50, 100)
# include      = any of ["punctuation", "numbers"]
# live_wpm     = show WPM while typing
# error_policy = "sticky" (fixed mistakes still count) | "reversible"
# paragraphs   = path to a JSON array of paragraphs (optional)

{}"#,
        toml_content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_config_from(&path);
        assert_eq!(cfg, TestConfig::default());
        assert!(path.exists());
        assert_eq!(load_config_from(&path), TestConfig::default());
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = TestConfig {
            test_by: TestBy::Words,
            value: 50,
            include: vec![Include::Numbers],
            live_wpm: false,
            error_policy: ErrorPolicy::Reversible,
            paragraphs: Some(PathBuf::from("/tmp/p.json")),
        };
        save_config_to(&cfg, &path).unwrap();
        assert_eq!(load_config_from(&path), cfg);
    }

    #[test]
    fn selection_keeps_paragraph_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let stored = TestConfig { paragraphs: Some(PathBuf::from("mine.json")), ..TestConfig::default() };
        save_config_to(&stored, &path).unwrap();

        let session = TestConfig {
            test_by: TestBy::Words,
            value: 100,
            paragraphs: Some(PathBuf::from("from-cli.json")),
            ..TestConfig::default()
        };
        write_selection_to(&session, &path).unwrap();

        let cfg = load_config_from(&path);
        assert_eq!(cfg.test_by, TestBy::Words);
        assert_eq!(cfg.value, 100);
        assert_eq!(cfg.paragraphs, Some(PathBuf::from("mine.json")));
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "test_by = [").unwrap();
        assert_eq!(load_config_from(&path), TestConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "test_by = \"words\"\nvalue = 25\n").unwrap();
        let cfg = load_config_from(&path);
        assert_eq!(cfg.test_by, TestBy::Words);
        assert_eq!(cfg.value, 25);
        assert!(cfg.live_wpm);
    }

    #[rstest]
    #[case(TestBy::Time, 45, 30)]
    #[case(TestBy::Time, 1000, 120)]
    #[case(TestBy::Words, 25, 25)]
    #[case(TestBy::Words, 0, 10)]
    fn clamp_snaps_to_nearest(#[case] by: TestBy, #[case] value: u16, #[case] expected: u16) {
        let mut cfg = TestConfig { test_by: by, value, ..TestConfig::default() };
        cfg.clamp_value();
        assert_eq!(cfg.value, expected);
    }

    #[test]
    fn toggle_include_adds_then_removes() {
        let mut cfg = TestConfig::default();
        cfg.toggle_include(Include::Punctuation);
        assert!(cfg.includes(Include::Punctuation));
        cfg.toggle_include(Include::Punctuation);
        assert!(cfg.include.is_empty());
    }
}
