// src/generator.rs
use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error};

use crate::app::config::{Include, TestBy, TestConfig};
use crate::error::{Result, TypistError};

const BUILTIN_JSON: &str = include_str!("../assets/paragraphs.json");

/// Timed tests get this many words per second of test time so the text
/// outlasts the clock for anyone below 180 WPM.
const WORDS_PER_SECOND: usize = 3;

static BUILTIN: Lazy<Vec<String>> = Lazy::new(|| match parse_paragraphs(BUILTIN_JSON) {
    Ok(p) => p,
    Err(err) => {
        error!(error = %err, "bundled paragraphs are broken");
        Vec::new()
    }
});

/// Where passages come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphSource {
    Builtin,
    File(PathBuf),
}

impl ParagraphSource {
    pub fn from_config(cfg: &TestConfig) -> Self {
        match &cfg.paragraphs {
            Some(path) => ParagraphSource::File(path.clone()),
            None => ParagraphSource::Builtin,
        }
    }
}

/// Parse a JSON array of paragraph strings.
pub fn parse_paragraphs(json: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let items = value
        .as_array()
        .ok_or_else(|| TypistError::Malformed("expected a JSON array".into()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| TypistError::Malformed(format!("entry {i} is not a string")))
        })
        .collect()
}

fn read_paragraphs(source: &ParagraphSource) -> Result<Vec<String>> {
    match source {
        ParagraphSource::Builtin => Ok(BUILTIN.clone()),
        ParagraphSource::File(path) => {
            let body = fs::read_to_string(path)?;
            parse_paragraphs(&body)
        }
    }
}

/// Fetch the paragraph list. Any failure is logged and yields an empty list,
/// the caller decides what an empty passage means.
pub fn load_paragraphs(source: &ParagraphSource) -> Vec<String> {
    match read_paragraphs(source) {
        Ok(paragraphs) => {
            debug!(?source, count = paragraphs.len(), "paragraphs loaded");
            paragraphs
        }
        Err(err) => {
            error!(?source, error = %err, "failed to load paragraphs");
            Vec::new()
        }
    }
}

/// Drop the character classes the test does not include.
pub fn normalize(paragraph: &str, include: &[Include]) -> String {
    let punctuation = include.contains(&Include::Punctuation);
    let numbers = include.contains(&Include::Numbers);

    let kept: String = paragraph
        .chars()
        .filter(|c| punctuation || !c.is_ascii_punctuation())
        .filter(|c| numbers || !c.is_ascii_digit())
        .collect();

    let text = if punctuation { kept } else { kept.to_lowercase() };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Assemble the text for one test from the paragraph list.
pub fn build_passage<R: Rng + ?Sized>(paragraphs: &[String], cfg: &TestConfig, rng: &mut R) -> String {
    let mut pool: Vec<Vec<String>> = paragraphs
        .iter()
        .map(|p| normalize(p, &cfg.include))
        .map(|p| p.split(' ').filter(|w| !w.is_empty()).map(str::to_string).collect::<Vec<_>>())
        .filter(|words| !words.is_empty())
        .collect();

    if pool.is_empty() {
        return String::new();
    }
    pool.shuffle(rng);

    let target = match cfg.test_by {
        TestBy::Words => usize::from(cfg.value),
        TestBy::Time => (usize::from(cfg.value) * WORDS_PER_SECOND).max(pool[0].len()),
    };

    let words: Vec<&str> = pool
        .iter()
        .cycle()
        .flat_map(|p| p.iter().map(String::as_str))
        .take(target)
        .collect();
    words.join(" ")
}

/// Load from `source` and build a passage in one go; used when a test starts.
pub fn generate_for_config(source: &ParagraphSource, cfg: &TestConfig) -> String {
    let paragraphs = load_paragraphs(source);
    build_passage(&paragraphs, cfg, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;
    use std::io::Write;

    fn words_cfg(n: u16) -> TestConfig {
        TestConfig { test_by: TestBy::Words, value: n, ..TestConfig::default() }
    }

    #[test]
    fn builtin_list_parses() {
        assert!(!load_paragraphs(&ParagraphSource::Builtin).is_empty());
    }

    #[rstest]
    #[case("{\"a\": 1}")]
    #[case("[\"ok\", 3]")]
    #[case("not json")]
    fn malformed_json_is_rejected(#[case] body: &str) {
        assert!(parse_paragraphs(body).is_err());
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let src = ParagraphSource::File(PathBuf::from("/definitely/not/here.json"));
        assert!(load_paragraphs(&src).is_empty());
    }

    #[test]
    fn file_source_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[\"alpha beta\", \"gamma\"]").unwrap();
        let src = ParagraphSource::File(file.path().to_path_buf());
        assert_eq!(load_paragraphs(&src), vec!["alpha beta".to_string(), "gamma".to_string()]);
    }

    #[rstest]
    #[case(&[], "hello world its 2 am", "hello world its am")]
    #[case(&[Include::Numbers], "Hello, world! It's 2 AM.", "hello world its 2 am")]
    #[case(&[Include::Punctuation], "Hello, world! It's 2 AM.", "Hello, world! It's AM.")]
    #[case(&[Include::Punctuation, Include::Numbers], "Hello, 2 AM.", "Hello, 2 AM.")]
    fn normalize_respects_includes(
        #[case] include: &[Include],
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(normalize(input, include), expected);
    }

    #[test]
    fn words_mode_gives_exact_count() {
        let paragraphs = vec!["one two three".to_string(), "four five".to_string()];
        let mut rng = StdRng::seed_from_u64(7);
        let text = build_passage(&paragraphs, &words_cfg(12), &mut rng);
        assert_eq!(text.split(' ').count(), 12);
    }

    #[test]
    fn time_mode_outlasts_the_clock() {
        let paragraphs = vec!["a b c".to_string()];
        let cfg = TestConfig { test_by: TestBy::Time, value: 15, ..TestConfig::default() };
        let mut rng = StdRng::seed_from_u64(1);
        let text = build_passage(&paragraphs, &cfg, &mut rng);
        assert_eq!(text.split(' ').count(), 45);
    }

    #[test]
    fn nothing_to_build_from() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(build_passage(&[], &words_cfg(10), &mut rng), "");
        let only_digits = vec!["123 456".to_string()];
        assert_eq!(build_passage(&only_digits, &words_cfg(10), &mut rng), "");
    }
}
