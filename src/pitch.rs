//! Scientific pitch names for MIDI note numbers

use midly::num::u7;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Lowest representable note, `C-1`
pub const SKIP_LOW: u8 = 0;
/// Highest representable note, `G9`
pub const SKIP_HIGH: u8 = 127;

/// Name a key the way trackers do, with middle C (60) as `C4`.
pub fn key_name(key: u7) -> String {
    let n = key.as_int();
    let octave = i32::from(n / 12) - 1;
    format!("{}{octave}", NAMES[usize::from(n % 12)])
}

/// Whether the key is one of the two reserved skip markers.
pub fn is_skip_key(key: u7) -> bool {
    matches!(key.as_int(), SKIP_LOW | SKIP_HIGH)
}
