use thiserror::Error;

/// Problems with the score as a whole. Playback never starts when one of
/// these is returned.
#[derive(Error, Debug, PartialEq)]
pub enum ScoreError {
    #[error("Missing header line (expected \"<bpm> [loop]\")")]
    MissingHeader,

    #[error("Invalid tempo \"{0}\": bpm must be an integer")]
    InvalidTempo(String),

    #[error("Invalid tempo {0}: bpm must be greater than zero")]
    NonPositiveTempo(i64),

    #[error("Invalid tempo {0}: bpm is too large")]
    TempoOutOfRange(i64),
}

/// Problems with a single body line. The line is dropped and the rest of the
/// score still compiles.
#[derive(Error, Debug, PartialEq)]
pub enum LineError {
    #[error("Line has no offset")]
    Empty,

    #[error("Invalid offset \"{0}\"")]
    InvalidOffset(String),

    #[error("Offset \"{0}\" must be a finite, non-negative number of beats")]
    OffsetOutOfRange(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum PitchError {
    #[error("Invalid note letter '{0}'")]
    InvalidLetter(char),

    #[error("Invalid pitch \"{0}\"")]
    InvalidPitch(String),
}

/// Failures reported by an [`crate::sink::OutputSink`].
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output rejected: {0}")]
    Rejected(String),
}
