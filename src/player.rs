//! Real-time playback of a compiled [`Score`].
//!
//! Playback moves through `Idle → Starting → Running → Stopping → Idle`.
//! Starting engages the sink and lets the target settle. Running waits for
//! each chord and emits its keys, restarting from the first chord when the
//! score loops. Stopping lets the target settle again and disengages the
//! sink. Stopping runs exactly once per [`Player::play`] call, whether
//! Running completed, was cancelled through a [`StopHandle`], or failed.
//!
//! Timing is estimate based: emitting a chord is assumed to take
//! `latency_per_symbol` for each of its keys, and that estimate is taken off
//! the wait before the next chord. Drift is never measured.

use crate::error::SinkError;
use crate::score::Score;
use crate::sink::OutputSink;
use crate::types::chord::Chord;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_LATENCY_PER_SYMBOL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Pause after activating and before deactivating the sink.
    pub settle_delay: Duration,
    /// Estimated time the sink needs to emit one key.
    pub latency_per_symbol: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            latency_per_symbol: DEFAULT_LATENCY_PER_SYMBOL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Starting,
    Running,
    Stopping,
}

/// How a successful [`Player::play`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Elapsed,
    Stopped,
}

/// Suspension points of the player.
pub trait Waiter {
    /// Waits for `duration` unless a stop is requested first. A zero
    /// duration still reports a pending stop.
    fn wait(&mut self, duration: Duration) -> Wait;

    /// Blocks until a stop is requested.
    fn wait_for_stop(&mut self);

    /// Waits for `duration` regardless of stop requests.
    fn settle(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Receiving end of a stop request. Once a stop has been seen it stays
/// stopped.
#[derive(Debug)]
pub struct StopSignal {
    // Held so the channel never disconnects while the signal is alive.
    sender: Sender<()>,
    receiver: Receiver<()>,
    stopped: bool,
}

/// Requests a stop from any thread. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StopHandle {
    sender: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        // A full channel already holds a stop request.
        let _ = self.sender.try_send(());
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        Self {
            sender,
            receiver,
            stopped: false,
        }
    }

    pub fn handle(&self) -> StopHandle {
        StopHandle {
            sender: self.sender.clone(),
        }
    }

    pub fn is_stopped(&mut self) -> bool {
        if !self.stopped {
            self.stopped = match self.receiver.try_recv() {
                Ok(()) => true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
            };
        }
        self.stopped
    }
}

impl Waiter for StopSignal {
    fn wait(&mut self, duration: Duration) -> Wait {
        if self.is_stopped() {
            return Wait::Stopped;
        }
        match self.receiver.recv_timeout(duration) {
            Ok(()) => {
                self.stopped = true;
                Wait::Stopped
            }
            Err(RecvTimeoutError::Timeout) => Wait::Elapsed,
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(duration);
                Wait::Elapsed
            }
        }
    }

    fn wait_for_stop(&mut self) {
        if !self.stopped && self.receiver.recv().is_ok() {
            self.stopped = true;
        }
    }
}

/// Wait before a chord at `offset`, given the previous chord of the same
/// play-through and the number of keys emitted last. Never negative.
pub fn next_interval(
    offset: Duration,
    previous_offset: Duration,
    last_symbol_count: usize,
    latency_per_symbol: Duration,
) -> Duration {
    let symbols = u32::try_from(last_symbol_count).unwrap_or(u32::MAX);
    let estimated_latency = latency_per_symbol.saturating_mul(symbols);
    offset
        .saturating_sub(previous_offset)
        .saturating_sub(estimated_latency)
}

/// Waits for one play-through of `chords`, starting with nothing emitted.
pub fn sleep_intervals(chords: &[Chord], latency_per_symbol: Duration) -> Vec<Duration> {
    let mut previous_offset = Duration::ZERO;
    let mut last_symbol_count = 0;
    chords
        .iter()
        .map(|chord| {
            let interval = next_interval(
                chord.offset,
                previous_offset,
                last_symbol_count,
                latency_per_symbol,
            );
            previous_offset = chord.offset;
            last_symbol_count = chord.symbol_count();
            interval
        })
        .collect()
}

pub struct Player<S: OutputSink, W: Waiter = StopSignal> {
    sink: S,
    waiter: W,
    config: PlayerConfig,
    state: PlaybackState,
}

impl<S: OutputSink, W: Waiter> Player<S, W> {
    pub fn new(sink: S, waiter: W, config: PlayerConfig) -> Self {
        Self {
            sink,
            waiter,
            config,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn transition(&mut self, state: PlaybackState) {
        log::debug!("{:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Plays `score` until it ends or a stop is requested. Looping scores
    /// only end on a stop request.
    ///
    /// The sink is always deactivated before returning. If emitting failed,
    /// that error is returned even when deactivation fails too.
    pub fn play(&mut self, score: &Score) -> Result<PlaybackOutcome, SinkError> {
        let mut session = Session::start(self);
        let outcome = session.run(score);
        let stopped = session.finish();

        match (outcome, stopped) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(stop_error)) => {
                log::error!("Deactivation failed after playback error: {}", stop_error);
                Err(e)
            }
        }
    }

    fn stop(&mut self) -> Result<(), SinkError> {
        self.transition(PlaybackState::Stopping);
        self.waiter.settle(self.config.settle_delay);
        let result = self.sink.deactivate();
        self.transition(PlaybackState::Idle);
        result
    }
}

/// State of one `play` call. Dropping an unfinished session (a panicking
/// sink) still stops the player.
struct Session<'p, S: OutputSink, W: Waiter> {
    player: &'p mut Player<S, W>,
    iteration: usize,
    last_symbol_count: usize,
    finished: bool,
}

impl<'p, S: OutputSink, W: Waiter> Session<'p, S, W> {
    fn start(player: &'p mut Player<S, W>) -> Self {
        player.transition(PlaybackState::Starting);
        Self {
            player,
            iteration: 0,
            last_symbol_count: 0,
            finished: false,
        }
    }

    fn run(&mut self, score: &Score) -> Result<PlaybackOutcome, SinkError> {
        self.player.sink.activate()?;
        let settle_delay = self.player.config.settle_delay;
        if self.player.waiter.wait(settle_delay) == Wait::Stopped {
            return Ok(PlaybackOutcome::Cancelled);
        }

        self.player.transition(PlaybackState::Running);
        loop {
            self.iteration += 1;
            log::debug!("Play-through #{}", self.iteration);
            if self.play_through(score)? == Wait::Stopped {
                return Ok(PlaybackOutcome::Cancelled);
            }
            if !score.looping {
                return Ok(PlaybackOutcome::Completed);
            }
            if score.is_empty() {
                // nothing to repeat; hold until asked to stop
                self.player.waiter.wait_for_stop();
                return Ok(PlaybackOutcome::Cancelled);
            }
        }
    }

    fn play_through(&mut self, score: &Score) -> Result<Wait, SinkError> {
        let latency = self.player.config.latency_per_symbol;
        let mut previous_offset = Duration::ZERO;

        for chord in &score.chords {
            let interval = next_interval(
                chord.offset,
                previous_offset,
                self.last_symbol_count,
                latency,
            );
            previous_offset = chord.offset;
            log::debug!("Sleeping {:?} then playing {:?}", interval, chord.symbols);

            if self.player.waiter.wait(interval) == Wait::Stopped {
                return Ok(Wait::Stopped);
            }
            self.last_symbol_count = chord.symbol_count();
            if !chord.is_rest() {
                self.player.sink.emit(&chord.symbols)?;
            }
        }

        Ok(Wait::Elapsed)
    }

    fn finish(mut self) -> Result<(), SinkError> {
        self.finished = true;
        self.player.stop()
    }
}

impl<S: OutputSink, W: Waiter> Drop for Session<'_, S, W> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.player.stop() {
                log::error!("Deactivation failed: {}", e);
            }
        }
    }
}
