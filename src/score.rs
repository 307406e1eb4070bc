use crate::chord_parser::parse_chord_line;
use crate::error::ScoreError;
use crate::types::chord::Chord;
use crate::types::tempo::Tempo;
use std::fmt;
use std::time::Duration;

/// First line of a score: `<bpm> [loop]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreHeader {
    pub tempo: Tempo,
    pub looping: bool,
}

impl ScoreHeader {
    pub fn parse(line: &str) -> Result<Self, ScoreError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(bpm) = parts.first() else {
            return Err(ScoreError::MissingHeader);
        };
        let tempo: Tempo = bpm.parse()?;
        let looping = parts.get(1) == Some(&"loop");
        Ok(Self { tempo, looping })
    }
}

impl fmt::Display for ScoreHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.looping {
            write!(f, "{} loop", self.tempo)
        } else {
            write!(f, "{}", self.tempo)
        }
    }
}

/// A compiled score, ready to play.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub tempo: Tempo,
    pub looping: bool,
    pub chords: Vec<Chord>,
}

impl Score {
    pub fn new(tempo: Tempo, looping: bool) -> Self {
        Self {
            tempo,
            looping,
            chords: Vec::new(),
        }
    }

    pub fn header(&self) -> ScoreHeader {
        ScoreHeader {
            tempo: self.tempo,
            looping: self.looping,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Offset of the latest chord.
    pub fn duration(&self) -> Option<Duration> {
        self.chords.iter().map(|chord| chord.offset).max()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for chord in &self.chords {
            writeln!(f, "{}", chord)?;
        }
        Ok(())
    }
}

/// Compiles body lines into a [`Score`]. A line that fails to parse is
/// reported and dropped; the rest still compile.
///
/// `first_line_number` is the 1-based number of the first body line and is
/// only used in log messages.
pub fn compile<'a>(
    tempo: Tempo,
    looping: bool,
    lines: impl IntoIterator<Item = &'a str>,
    first_line_number: usize,
) -> Score {
    let mut score = Score::new(tempo, looping);

    for (idx, line) in lines.into_iter().enumerate() {
        let line_number = first_line_number + idx;
        if line.trim().is_empty() {
            log::debug!("Line #{}: blank, skipped", line_number);
            continue;
        }
        match parse_chord_line(tempo, line) {
            Ok(chord) => score.chords.push(chord),
            Err(e) => log::error!("Line #{}: unable to parse \"{}\": {}", line_number, line, e),
        }
    }

    score
}
