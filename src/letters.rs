// src/letters.rs

/// Judgement of a single passage letter.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LetterState {
    Pending,
    Correct,
    Wrong,
}

/// One character of the passage together with what the user typed there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub ch: char,
    /// 1-based id of the word this letter belongs to. A separating space
    /// belongs to the word before it.
    pub word: usize,
    pub typed: Option<char>,
    pub state: LetterState,
}

impl Letter {
    fn new(ch: char, word: usize) -> Self {
        Letter { ch, word, typed: None, state: LetterState::Pending }
    }

    pub(crate) fn judge(&mut self, typed: char) -> LetterState {
        self.typed = Some(typed);
        self.state = if typed == self.ch { LetterState::Correct } else { LetterState::Wrong };
        self.state
    }

    pub(crate) fn reset(&mut self) {
        self.typed = None;
        self.state = LetterState::Pending;
    }
}

/// The target text, split into letters grouped by word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passage {
    letters: Vec<Letter>,
    word_count: usize,
}

impl Passage {
    /// Build a passage from free text. Whitespace runs collapse into a single
    /// space and leading/trailing whitespace is dropped.
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut letters = Vec::with_capacity(text.len());

        for (idx, word) in words.iter().enumerate() {
            let id = idx + 1;
            letters.extend(word.chars().map(|c| Letter::new(c, id)));
            if id < words.len() {
                letters.push(Letter::new(' ', id));
            }
        }

        Passage { letters, word_count: words.len() }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn letter(&self, i: usize) -> Option<&Letter> {
        self.letters.get(i)
    }

    pub(crate) fn letter_mut(&mut self, i: usize) -> Option<&mut Letter> {
        self.letters.get_mut(i)
    }

    /// Word id of the letter at `i`; past the end this is `word_count + 1`.
    pub fn word_of(&self, i: usize) -> usize {
        self.letters.get(i).map(|l| l.word).unwrap_or(self.word_count + 1)
    }

    pub fn as_text(&self) -> String {
        self.letters.iter().map(|l| l.ch).collect()
    }
}
