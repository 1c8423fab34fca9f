//! Note and skip extraction from decoded midi tracks

use {
    crate::{
        error::{Error, Result},
        pitch,
        timebase::{Timebase, us_per_beat_to_bpm},
    },
    midly::{MetaMessage, MidiMessage, Timing, TrackEventKind, num::u7},
    std::collections::HashMap,
    tracing::{debug, trace},
};

/// A playable note, timed in 60ths of a second
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub name: String,
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u32,
}

/// Everything the Lua table needs from one midi file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Beats per minute of the last tempo change seen
    pub tempo: u32,
    /// The earliest by absolute tick; ties go to the earlier track
    pub time_signature: TimeSignature,
    /// Start times of skip-key notes, in the order their note-offs arrived
    pub skips: Vec<u64>,
    /// Never empty
    pub notes: Vec<Note>,
}

impl Extraction {
    /// End time of the last note to finish in scan order
    pub fn last_note_time(&self) -> u64 {
        self.notes.last().map_or(0, |note| note.end)
    }
    /// The first two skip marks, or "from the start to the last note" without them.
    pub fn skip_range(&self) -> (u64, u64) {
        match self.skips[..] {
            [from, to, ..] => (from, to),
            _ => (0, self.last_note_time()),
        }
    }
}

/// Decode a standard midi file and extract its notes.
pub fn extract(mid_data: &[u8]) -> Result<Extraction> {
    let (header, track_iter) = midly::parse(mid_data)?;
    let tracks = track_iter.collect_tracks()?;
    let ticks_per_beat = match header.timing {
        Timing::Metrical(u15) if u15.as_int() > 0 => u15.as_int(),
        Timing::Metrical(_) => {
            return Err(Error::UnsupportedTiming("zero ticks per beat".into()));
        }
        Timing::Timecode(fps, subframe) => {
            return Err(Error::UnsupportedTiming(format!(
                "timecode at {} fps, {subframe} subframes",
                fps.as_f32()
            )));
        }
    };
    debug!(
        "{:?} file, {} tracks, {ticks_per_beat} ticks per beat",
        header.format,
        tracks.len()
    );
    extract_tracks(ticks_per_beat, &tracks)
}

/// Walk every track in order, pairing note-ons with note-offs.
///
/// The tick clock and the sounding notes are per track, but the tempo
/// carries over from track to track. Tempo messages don't advance the clock.
pub fn extract_tracks(ticks_per_beat: u16, tracks: &[midly::Track]) -> Result<Extraction> {
    let mut us_per_beat = None;
    let mut tempo = None;
    let mut time_signature = None;
    let mut skips = Vec::new();
    let mut notes = Vec::new();
    for (track_idx, track) in tracks.iter().enumerate() {
        let mut clock: u64 = 0;
        // Key -> start time, in 60ths of a second
        let mut sounding: HashMap<u7, u64> = HashMap::new();
        for event in track {
            if let TrackEventKind::Meta(MetaMessage::Tempo(u24)) = event.kind {
                us_per_beat = Some(u24.as_int());
                tempo = Some(us_per_beat_to_bpm(u24.as_int()));
                debug!("Tempo change in track {track_idx}: {u24} us per beat");
                continue;
            }
            clock += u64::from(event.delta.as_int());
            let timebase = || {
                us_per_beat
                    .map(|us_per_beat| Timebase {
                        ticks_per_beat,
                        us_per_beat,
                    })
                    .ok_or(Error::MissingTempoContext { track: track_idx })
            };
            match event.kind {
                TrackEventKind::Meta(MetaMessage::TimeSignature(num, pow, _, _)) => {
                    if time_signature.is_none_or(|(at, _)| clock < at) {
                        let sig = TimeSignature {
                            numerator: num,
                            denominator: 2u32.saturating_pow(u32::from(pow)),
                        };
                        time_signature = Some((clock, sig));
                    }
                }
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { key, vel },
                    ..
                } if vel.as_int() > 0 => {
                    let start = timebase()?.ticks_60(clock);
                    if sounding.insert(key, start).is_some() {
                        return Err(Error::DuplicateNoteOn {
                            track: track_idx,
                            key,
                        });
                    }
                }
                // NoteOn with velocity of 0 also means note off
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOff { key, .. } | MidiMessage::NoteOn { key, .. },
                    ..
                } => {
                    let start = sounding.remove(&key).ok_or(Error::UnmatchedNoteOff {
                        track: track_idx,
                        key,
                    })?;
                    let timebase = timebase()?;
                    let end = timebase.ticks_60(clock);
                    if pitch::is_skip_key(key) {
                        trace!("Skip mark at {start} from key {key}");
                        skips.push(start);
                    } else {
                        let name = pitch::key_name(key);
                        trace!("Note {name} {start}..{end}, off at {:.3}s", timebase.seconds(clock));
                        notes.push(Note { name, start, end });
                    }
                }
                _ => trace!("Unhandled event kind: {:?}", event.kind),
            }
        }
        if !sounding.is_empty() {
            debug!(
                "{} notes never released in track {track_idx}, dropping them",
                sounding.len()
            );
        }
    }
    let (_, time_signature) = time_signature.ok_or(Error::MissingTimeSignature)?;
    if notes.is_empty() {
        return Err(Error::EmptyResult);
    }
    Ok(Extraction {
        // Any extracted note implies a tempo was seen
        tempo: tempo.ok_or(Error::EmptyResult)?,
        time_signature,
        skips,
        notes,
    })
}
