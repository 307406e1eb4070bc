//! lyre - play plain-text scores as timed keystrokes
//!
//! A score is a header line with the tempo and an optional `loop` flag,
//! followed by one line per chord: a beat offset and the notes to press.
//!
//! ```text
//! 120 loop
//! 0 C4 E4 G4
//! 1 A5
//! 1.5 rest
//! ```
//!
//! The score compiles to a list of [`Chord`]s, each a time offset and the
//! keys of a 21-key lyre layout. A [`Player`] then sends those keys to an
//! [`OutputSink`] in real time.

pub mod chord_parser;
pub mod error;
pub mod instrument;
pub mod parser;
pub mod player;
pub mod score;
pub mod sink;
pub mod types;
pub mod util;

// Re-export commonly used types
pub use chord_parser::parse_chord_line;
pub use error::{LineError, PitchError, ScoreError, SinkError};
pub use parser::{parse_score, read_score};
pub use player::{
    PlaybackOutcome, PlaybackState, Player, PlayerConfig, StopHandle, StopSignal, Waiter,
};
pub use score::{Score, ScoreHeader, compile};
pub use sink::{KeystrokeWriter, OutputSink};
pub use types::chord::Chord;
pub use types::pitch::{Letter, Pitch, parse_pitches};
pub use types::tempo::Tempo;
