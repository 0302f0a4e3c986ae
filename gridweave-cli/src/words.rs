use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{ensure, Context, Result};

/// Reads words from the file at the given path: one word per line, trimmed, upper-cased, blank
/// lines ignored. Deduplication is left to the problem construction.
pub fn load(path: &Path) -> Result<Vec<String>> {
    let file =
        File::open(path).with_context(|| format!("word file not found at '{}'", path.display()))?;
    let mut words = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("failed reading '{}'", path.display()))?;
        let word = line.trim().to_uppercase();
        if !word.is_empty() {
            words.push(word);
        }
    }
    ensure!(!words.is_empty(), "no words found in '{}'", path.display());
    Ok(words)
}
