//! Where keystrokes go.
//!
//! Finding the target window and delivering keys to it is platform
//! specific and lives outside this crate. The player only needs something
//! that implements [`OutputSink`].

use crate::error::SinkError;
use std::io::Write;

pub trait OutputSink {
    /// Engages the target before the first chord.
    fn activate(&mut self) -> Result<(), SinkError>;

    /// Presses every key in `symbols` as a single emission.
    fn emit(&mut self, symbols: &str) -> Result<(), SinkError>;

    /// Disengages the target after playback.
    fn deactivate(&mut self) -> Result<(), SinkError>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn activate(&mut self) -> Result<(), SinkError> {
        (**self).activate()
    }

    fn emit(&mut self, symbols: &str) -> Result<(), SinkError> {
        (**self).emit(symbols)
    }

    fn deactivate(&mut self) -> Result<(), SinkError> {
        (**self).deactivate()
    }
}

pub const DEFAULT_ACTIVATE_KEY: &str = "z";
pub const DEFAULT_DEACTIVATE_KEY: &str = "{ESC}";

/// Writes keystroke strings to any writer, one emission per line.
#[derive(Debug)]
pub struct KeystrokeWriter<W: Write> {
    writer: W,
    activate_key: String,
    deactivate_key: String,
}

impl<W: Write> KeystrokeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_keys(writer, DEFAULT_ACTIVATE_KEY, DEFAULT_DEACTIVATE_KEY)
    }

    pub fn with_keys(
        writer: W,
        activate_key: impl Into<String>,
        deactivate_key: impl Into<String>,
    ) -> Self {
        Self {
            writer,
            activate_key: activate_key.into(),
            deactivate_key: deactivate_key.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn send(&mut self, keys: &str) -> Result<(), SinkError> {
        log::debug!("Sending {}", keys);
        writeln!(self.writer, "{}", keys)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputSink for KeystrokeWriter<W> {
    fn activate(&mut self) -> Result<(), SinkError> {
        let key = self.activate_key.clone();
        self.send(&key)
    }

    fn emit(&mut self, symbols: &str) -> Result<(), SinkError> {
        self.send(symbols)
    }

    fn deactivate(&mut self) -> Result<(), SinkError> {
        let key = self.deactivate_key.clone();
        self.send(&key)
    }
}
