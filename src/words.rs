use anyhow::{bail, Context, Result};
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::Rng;
use std::fs;
use std::path::Path;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/words");

const DEFAULT_LIST: &str = "english.txt";

/// A flat, newline-delimited word corpus. Loaded once at startup; any
/// read failure or empty list is fatal before a session exists.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// The built-in english list shipped inside the binary.
    pub fn embedded() -> Result<Self> {
        let file = WORDS_DIR
            .get_file(DEFAULT_LIST)
            .with_context(|| format!("embedded word list {DEFAULT_LIST} missing"))?;
        let contents = file
            .contents_utf8()
            .with_context(|| format!("embedded word list {DEFAULT_LIST} is not utf-8"))?;
        Self::parse(contents, DEFAULT_LIST)
    }

    /// A user-supplied list, one word per line.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read word list {}", path.display()))?;
        Self::parse(&contents, &path.display().to_string())
    }

    fn parse(contents: &str, origin: &str) -> Result<Self> {
        let words: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if words.is_empty() {
            bail!("word list {origin} contains no usable words");
        }

        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Build a ghost text of `count` words drawn uniformly with
    /// replacement, joined by single spaces.
    pub fn generate_ghost_text(&self, count: usize) -> String {
        let mut rng = rand::thread_rng();

        (0..count)
            .map(|_| self.words[rng.gen_range(0..self.words.len())].as_str())
            .join(" ")
    }
}
