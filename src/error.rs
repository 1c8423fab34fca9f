//! Error types for MIDI to Lua conversion

use {midly::num::u7, thiserror::Error};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MIDI decode error: {0}")]
    Midi(#[from] midly::Error),

    /// Only metrical timing with a nonzero ticks-per-beat can be converted
    #[error("unsupported timing: {0}")]
    UnsupportedTiming(String),

    /// A note event needed a time conversion before any tempo message was seen
    #[error("note event in track {track} before any tempo change")]
    MissingTempoContext { track: usize },

    #[error("no time signature event found")]
    MissingTimeSignature,

    #[error("note off for key {key} in track {track} without a matching note on")]
    UnmatchedNoteOff { track: usize, key: u7 },

    #[error("note on for key {key} in track {track} while it is already sounding")]
    DuplicateNoteOn { track: usize, key: u7 },

    #[error("no notes were extracted")]
    EmptyResult,
}
