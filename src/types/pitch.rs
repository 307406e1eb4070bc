use crate::error::PitchError;
use regex::{Matches, Regex};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Letter name of a natural note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Letter {
    /// Case-insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Letter {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or(PitchError::InvalidLetter(c)),
            _ => Err(PitchError::InvalidPitch(s.to_string())),
        }
    }
}

/// A letter and an octave, e.g. `C4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub letter: Letter,
    pub octave: u8,
}

impl Pitch {
    pub const fn new(letter: Letter, octave: u8) -> Self {
        Self { letter, octave }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(letter), Some(octave), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PitchError::InvalidPitch(s.to_string()));
        };
        let octave = octave
            .to_digit(10)
            .ok_or_else(|| PitchError::InvalidPitch(s.to_string()))?;
        let letter = Letter::from_char(letter).ok_or(PitchError::InvalidLetter(letter))?;
        Ok(Pitch::new(letter, octave as u8))
    }
}

// Any ASCII letter is captured so that tokens like "H4" can be reported
// instead of vanishing silently.
static PITCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z][0-9]").expect("pitch pattern is valid")
});

/// Lazily scans `text` for pitches. See [`parse_pitches`].
pub struct Pitches<'t> {
    matches: Matches<'static, 't>,
}

impl Iterator for Pitches<'_> {
    type Item = Pitch;

    fn next(&mut self) -> Option<Pitch> {
        for found in self.matches.by_ref() {
            let token = found.as_str();
            match token.parse::<Pitch>() {
                Ok(pitch) => return Some(pitch),
                Err(e) => log::error!("Unable to parse {}: {}", token, e),
            }
        }
        None
    }
}

/// Every letter immediately followed by a digit, in order of occurrence.
/// Anything else in `text` is ignored.
pub fn parse_pitches(text: &str) -> Pitches<'_> {
    Pitches {
        matches: PITCH_PATTERN.find_iter(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(letter: Letter, octave: u8) -> Pitch {
        Pitch::new(letter, octave)
    }

    #[test]
    fn test_letter() {
        assert_eq!(Letter::from_char('c'), Some(Letter::C));
        assert_eq!(Letter::from_char('G'), Some(Letter::G));
        assert_eq!(Letter::from_char('h'), None);
        assert_eq!("b".parse::<Letter>(), Ok(Letter::B));
        assert_eq!("H".parse::<Letter>(), Err(PitchError::InvalidLetter('H')));
        assert!("AB".parse::<Letter>().is_err());
    }

    #[test]
    fn test_pitch_from_str() {
        assert_eq!("C4".parse::<Pitch>(), Ok(p(Letter::C, 4)));
        assert_eq!(" a6 ".parse::<Pitch>(), Ok(p(Letter::A, 6)));
        assert_eq!("X4".parse::<Pitch>(), Err(PitchError::InvalidLetter('X')));
        assert!("C".parse::<Pitch>().is_err());
        assert!("C44".parse::<Pitch>().is_err());
        assert!("4C".parse::<Pitch>().is_err());
        assert_eq!(p(Letter::F, 5).to_string(), "F5");
    }

    #[test]
    fn test_parse_pitches() {
        let pitches: Vec<Pitch> = parse_pitches("C4E4G4").collect();
        assert_eq!(
            pitches,
            vec![p(Letter::C, 4), p(Letter::E, 4), p(Letter::G, 4)]
        );

        let pitches: Vec<Pitch> = parse_pitches("[c4 - d5] (e3)").collect();
        assert_eq!(
            pitches,
            vec![p(Letter::C, 4), p(Letter::D, 5), p(Letter::E, 3)]
        );
    }

    #[test]
    fn test_parse_pitches_skips_noise() {
        assert_eq!(parse_pitches("").count(), 0);
        assert_eq!(parse_pitches("rest ... 44 C").count(), 0);
        // H is not a note letter; the token is dropped, scanning continues
        let pitches: Vec<Pitch> = parse_pitches("H4 A4").collect();
        assert_eq!(pitches, vec![p(Letter::A, 4)]);
        // only the first digit belongs to the pitch
        let pitches: Vec<Pitch> = parse_pitches("C45").collect();
        assert_eq!(pitches, vec![p(Letter::C, 4)]);
    }

    #[test]
    fn test_parse_pitches_keeps_duplicates() {
        let pitches: Vec<Pitch> = parse_pitches("G4 C4 G4").collect();
        assert_eq!(
            pitches,
            vec![p(Letter::G, 4), p(Letter::C, 4), p(Letter::G, 4)]
        );
    }

    #[test]
    fn test_parse_pitches_rescans() {
        let text = "D3F3";
        let first: Vec<Pitch> = parse_pitches(text).collect();
        let second: Vec<Pitch> = parse_pitches(text).collect();
        assert_eq!(first, second);
    }
}
