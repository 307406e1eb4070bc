use crate::error::ScoreError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Beats per minute. Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo {
    bpm: u32,
}

impl Tempo {
    pub fn new(bpm: u32) -> Result<Self, ScoreError> {
        if bpm == 0 {
            return Err(ScoreError::NonPositiveTempo(0));
        }
        Ok(Self { bpm })
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Real-time length of one beat, `60s / bpm`.
    pub fn beat_duration(&self) -> Duration {
        Duration::from_secs(60) / self.bpm
    }

    /// Absolute time of a (possibly fractional) beat position, or `None`
    /// when it does not fit in a [`Duration`].
    pub fn offset_of(&self, beats: f64) -> Option<Duration> {
        Duration::try_from_secs_f64(self.beat_duration().as_secs_f64() * beats).ok()
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bpm)
    }
}

impl FromStr for Tempo {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bpm: i64 = s
            .parse()
            .map_err(|_| ScoreError::InvalidTempo(s.to_string()))?;
        if bpm <= 0 {
            return Err(ScoreError::NonPositiveTempo(bpm));
        }
        let bpm = u32::try_from(bpm).map_err(|_| ScoreError::TempoOutOfRange(bpm))?;
        let tempo = Tempo::new(bpm)?;
        log::info!(
            "Tempo = {}ms",
            tempo.beat_duration().as_secs_f64() * 1000.0
        );
        Ok(tempo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_duration() {
        let tempo: Tempo = "120".parse().unwrap();
        assert_eq!(tempo.beat_duration(), Duration::from_millis(500));
        assert_eq!(
            Tempo::new(60).unwrap().beat_duration(),
            Duration::from_secs(1)
        );
        assert_eq!(
            Tempo::new(7).unwrap().beat_duration(),
            Duration::from_nanos(8_571_428_571)
        );
        for bpm in [1, 30, 90, 100, 150, 240, 600, 1000] {
            let tempo = Tempo::new(bpm).unwrap();
            assert_eq!(
                tempo.beat_duration().as_millis(),
                60_000 / bpm as u128,
                "bpm={}",
                bpm
            );
        }
    }

    #[test]
    fn test_offset_of() {
        let tempo = Tempo::new(120).unwrap();
        assert_eq!(tempo.offset_of(0.0), Some(Duration::ZERO));
        assert_eq!(tempo.offset_of(1.0), Some(Duration::from_millis(500)));
        assert_eq!(tempo.offset_of(2.5), Some(Duration::from_millis(1250)));
        assert_eq!(tempo.offset_of(1e20), None);
        assert_eq!(tempo.offset_of(-1.0), None);
        assert_eq!(tempo.offset_of(f64::NAN), None);
    }

    #[test]
    fn test_parse_error() {
        assert_eq!("0".parse::<Tempo>(), Err(ScoreError::NonPositiveTempo(0)));
        assert_eq!(
            "-90".parse::<Tempo>(),
            Err(ScoreError::NonPositiveTempo(-90))
        );
        assert_eq!(
            "120.5".parse::<Tempo>(),
            Err(ScoreError::InvalidTempo("120.5".to_string()))
        );
        assert_eq!(
            "fast".parse::<Tempo>(),
            Err(ScoreError::InvalidTempo("fast".to_string()))
        );
        assert_eq!(
            "99999999999".parse::<Tempo>(),
            Err(ScoreError::TempoOutOfRange(99_999_999_999))
        );
        assert!(Tempo::new(0).is_err());
    }
}
