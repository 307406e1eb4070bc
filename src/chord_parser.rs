use crate::error::LineError;
use crate::instrument::keys_for;
use crate::types::chord::Chord;
use crate::types::pitch::parse_pitches;
use crate::types::tempo::Tempo;

fn parse_beat_offset(part: &str) -> Result<f64, LineError> {
    let beats: f64 = part
        .parse()
        .map_err(|_| LineError::InvalidOffset(part.to_string()))?;
    if !beats.is_finite() || beats < 0.0 {
        return Err(LineError::OffsetOutOfRange(part.to_string()));
    }
    // "-0" survives the check above
    Ok(beats.abs())
}

/// Parses one body line, `<beats> <note tokens...>`.
///
/// The note tokens are joined without separators before scanning, so
/// `C 4` reads as `C4`.
pub fn parse_chord_line(tempo: Tempo, line: &str) -> Result<Chord, LineError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((offset, notes)) = parts.split_first() else {
        return Err(LineError::Empty);
    };
    log::debug!("Matched time={} notes={:?}", offset, notes);

    let beats = parse_beat_offset(offset)?;
    let offset = tempo
        .offset_of(beats)
        .ok_or_else(|| LineError::OffsetOutOfRange(offset.to_string()))?;
    let notes = notes.concat();
    let symbols = keys_for(parse_pitches(&notes));

    Ok(Chord::new(offset, symbols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn tempo() -> Tempo {
        Tempo::new(120).unwrap()
    }

    #[test]
    fn test_single_note() {
        assert_eq!(
            parse_chord_line(tempo(), "1.0 C4"),
            Ok(Chord::new(Duration::from_millis(500), "a"))
        );
    }

    #[test]
    fn test_chords() {
        assert_eq!(
            parse_chord_line(tempo(), "0 C4 E4 G4"),
            Ok(Chord::new(Duration::ZERO, "adg"))
        );
        assert_eq!(
            parse_chord_line(tempo(), "  2.5   G3B4D4  "),
            Ok(Chord::new(Duration::from_millis(1250), "bms"))
        );
        assert_eq!(
            parse_chord_line(tempo(), "3 C 4"),
            Ok(Chord::new(Duration::from_millis(1500), "a"))
        );
        assert_eq!(
            parse_chord_line(tempo(), "4 e5 E5"),
            Ok(Chord::new(Duration::from_secs(2), "ee"))
        );
    }

    #[test]
    fn test_rests() {
        assert_eq!(
            parse_chord_line(tempo(), "1"),
            Ok(Chord::rest(Duration::from_millis(500)))
        );
        assert_eq!(
            parse_chord_line(tempo(), "1 rest"),
            Ok(Chord::rest(Duration::from_millis(500)))
        );
        // nothing on the instrument
        assert_eq!(
            parse_chord_line(tempo(), "1 C1 C7"),
            Ok(Chord::rest(Duration::from_millis(500)))
        );
    }

    #[test]
    fn test_unmapped_pitches_are_omitted() {
        assert_eq!(
            parse_chord_line(tempo(), "0 C4 C8 G4"),
            Ok(Chord::new(Duration::ZERO, "ag"))
        );
    }

    #[test]
    fn test_parse_error() {
        assert_eq!(parse_chord_line(tempo(), ""), Err(LineError::Empty));
        assert_eq!(parse_chord_line(tempo(), "   \t"), Err(LineError::Empty));
        assert_eq!(
            parse_chord_line(tempo(), "x C4"),
            Err(LineError::InvalidOffset("x".to_string()))
        );
        assert_eq!(
            parse_chord_line(tempo(), "C4 E4"),
            Err(LineError::InvalidOffset("C4".to_string()))
        );
        assert_eq!(
            parse_chord_line(tempo(), "1,5 C4"),
            Err(LineError::InvalidOffset("1,5".to_string()))
        );
        assert_eq!(
            parse_chord_line(tempo(), "-1 C4"),
            Err(LineError::OffsetOutOfRange("-1".to_string()))
        );
        assert_eq!(
            parse_chord_line(tempo(), "inf C4"),
            Err(LineError::OffsetOutOfRange("inf".to_string()))
        );
        assert_eq!(
            parse_chord_line(tempo(), "1e20 C4"),
            Err(LineError::OffsetOutOfRange("1e20".to_string()))
        );
        assert_eq!(
            parse_chord_line(tempo(), "NaN C4"),
            Err(LineError::OffsetOutOfRange("NaN".to_string()))
        );
    }
}
