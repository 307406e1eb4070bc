use crate::error::ScoreError;
use crate::score::{Score, ScoreHeader, compile};
use anyhow::{Context, Result};
use std::path::Path;

pub struct ScoreParser {}

pub fn parse_score(content: &str) -> Result<Score, ScoreError> {
    let mut parser = ScoreParser::new();
    parser.parse(content)
}

/// Reads and compiles the score at `path`.
pub fn read_score(path: impl AsRef<Path>) -> Result<Score> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read score file: {}", path.display()))?;
    let score = parse_score(&content)
        .with_context(|| format!("Failed to parse score file: {}", path.display()))?;
    log::info!(
        "Compiled {} chords from {}",
        score.chords.len(),
        path.display()
    );
    Ok(score)
}

impl Default for ScoreParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreParser {
    pub fn new() -> Self {
        Self {}
    }

    pub fn parse(&mut self, content: &str) -> Result<Score, ScoreError> {
        let mut lines = content.lines();
        let header = ScoreHeader::parse(lines.next().unwrap_or_default())?;
        Ok(compile(header.tempo, header.looping, lines, 2))
    }
}
