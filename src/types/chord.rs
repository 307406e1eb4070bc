use std::fmt;
use std::time::Duration;

/// Keys to press together at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    /// Time since the start of the play-through.
    pub offset: Duration,
    /// Output symbols in the order their pitches appeared. Empty for a rest.
    pub symbols: String,
}

impl Chord {
    pub fn new(offset: Duration, symbols: impl Into<String>) -> Self {
        Self {
            offset,
            symbols: symbols.into(),
        }
    }

    pub fn rest(offset: Duration) -> Self {
        Self::new(offset, String::new())
    }

    pub fn is_rest(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.chars().count()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.offset.as_secs_f64() * 1000.0;
        if self.is_rest() {
            write!(f, "{}ms rest", crate::util::format_millis(millis))
        } else {
            write!(
                f,
                "{}ms {}",
                crate::util::format_millis(millis),
                self.symbols
            )
        }
    }
}
