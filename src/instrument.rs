//! Key layout of the 21-key lyre: three rows of seven keys.

use crate::types::pitch::{Letter, Pitch};
use std::collections::HashMap;
use std::sync::LazyLock;

const LAYOUT: [(Pitch, char); 21] = [
    (Pitch::new(Letter::C, 3), 'z'),
    (Pitch::new(Letter::D, 3), 'x'),
    (Pitch::new(Letter::E, 3), 'c'),
    (Pitch::new(Letter::F, 3), 'v'),
    (Pitch::new(Letter::G, 3), 'b'),
    (Pitch::new(Letter::A, 4), 'n'),
    (Pitch::new(Letter::B, 4), 'm'),
    (Pitch::new(Letter::C, 4), 'a'),
    (Pitch::new(Letter::D, 4), 's'),
    (Pitch::new(Letter::E, 4), 'd'),
    (Pitch::new(Letter::F, 4), 'f'),
    (Pitch::new(Letter::G, 4), 'g'),
    (Pitch::new(Letter::A, 5), 'h'),
    (Pitch::new(Letter::B, 5), 'j'),
    (Pitch::new(Letter::C, 5), 'q'),
    (Pitch::new(Letter::D, 5), 'w'),
    (Pitch::new(Letter::E, 5), 'e'),
    (Pitch::new(Letter::F, 5), 'r'),
    (Pitch::new(Letter::G, 5), 't'),
    (Pitch::new(Letter::A, 6), 'y'),
    (Pitch::new(Letter::B, 6), 'u'),
];

static KEYBOARD: LazyLock<HashMap<Pitch, char>> =
    LazyLock::new(|| LAYOUT.iter().copied().collect());

/// The key for `pitch`, or `None` when the instrument cannot play it.
pub fn lookup(pitch: &Pitch) -> Option<char> {
    KEYBOARD.get(pitch).copied()
}

/// Every playable pitch with its key, lowest row first.
pub fn layout() -> impl Iterator<Item = (Pitch, char)> {
    LAYOUT.iter().copied()
}

/// Keys for `pitches` in the same order. Unplayable pitches are reported and
/// left out.
pub fn keys_for(pitches: impl IntoIterator<Item = Pitch>) -> String {
    let mut keys = String::new();
    for pitch in pitches {
        match lookup(&pitch) {
            Some(key) => keys.push(key),
            None => log::warn!("Cannot get key for {}", pitch),
        }
    }
    keys
}
