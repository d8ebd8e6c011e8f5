//! Splitting documents into alignment tokens.
//!
//! Tokens are borrowed slices of the input. Concatenating the tokens of a
//! document in order always yields the document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The unit two documents are aligned over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One token per Unicode scalar value.
    #[default]
    Char,
    /// Runs of word characters, runs of whitespace, and single punctuation.
    Word,
    /// One token per line, including its terminating `\n`.
    Line,
}

impl Granularity {
    /// The lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Char => "char",
            Granularity::Word => "word",
            Granularity::Line => "line",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" | "chars" => Ok(Granularity::Char),
            "word" | "words" => Ok(Granularity::Word),
            "line" | "lines" => Ok(Granularity::Line),
            other => Err(format!("unknown granularity: {other}")),
        }
    }
}

/// Split `text` into tokens at the given granularity.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Char => chars(text),
        Granularity::Word => words(text),
        Granularity::Line => text.split_inclusive('\n').collect(),
    }
}

fn chars(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(start, c)| &text[start..start + c.len_utf8()])
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Other,
}

fn classify(c: char) -> CharClass {
    if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Other
    }
}

fn words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (idx, c) in text.char_indices() {
        let class = classify(c);
        // Punctuation never joins a run.
        let joins = current == Some(class) && class != CharClass::Other;
        if !joins && current.is_some() {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        current = Some(class);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
