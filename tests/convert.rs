//! End-to-end conversion of midi files written to a temp dir

use {
    mid2lua::{Error, convert_all, convert_file},
    midly::{
        Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
        num::{u4, u7, u15, u24, u28},
    },
    std::path::{Path, PathBuf},
};

fn ev(delta: u32, kind: TrackEventKind<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind,
    }
}

fn key(delta: u32, key: u8, vel: u8, on: bool) -> TrackEvent<'static> {
    let (key, vel) = (u7::new(key), u7::new(vel));
    let message = if on {
        MidiMessage::NoteOn { key, vel }
    } else {
        MidiMessage::NoteOff { key, vel }
    };
    ev(
        delta,
        TrackEventKind::Midi {
            channel: u4::new(0),
            message,
        },
    )
}

fn end() -> TrackEvent<'static> {
    ev(0, TrackEventKind::Meta(MetaMessage::EndOfTrack))
}

fn write_smf(path: &Path, tracks: Vec<Vec<TrackEvent<'static>>>) {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(480)),
    ));
    smf.tracks = tracks;
    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).unwrap();
    std::fs::write(path, bytes).unwrap();
}

fn conductor() -> Vec<TrackEvent<'static>> {
    vec![
        ev(0, TrackEventKind::Meta(MetaMessage::Tempo(u24::new(500_000)))),
        ev(0, TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, 24, 8))),
        end(),
    ]
}

fn song(dir: &Path, name: &str, notes: Vec<TrackEvent<'static>>) -> PathBuf {
    let path = dir.join(name);
    let mut track = notes;
    track.push(end());
    write_smf(&path, vec![conductor(), track]);
    path
}

#[test]
fn converts_a_song_with_skip_marks() {
    let dir = tempfile::tempdir().unwrap();
    let path = song(
        dir.path(),
        "loop.mid",
        vec![
            key(0, 60, 100, true),
            key(480, 60, 0, false),
            key(0, 0, 100, true),
            key(240, 0, 0, false),
            key(0, 64, 100, true),
            key(480, 64, 0, true),
            key(0, 127, 100, true),
            key(480, 127, 0, false),
        ],
    );
    let out = convert_file(&path).unwrap();
    assert_eq!(out, dir.path().join("loop.lua"));
    let lua = std::fs::read_to_string(&out).unwrap();
    let expected = format!(
        "-- Original file: \"{}\"\n\
         return {{\n\
         \ttempo = \"120\",\n\
         \tsignature = \"4/4\",\n\
         \tskips = {{30,75}},\n\
         \tnotes = {{\n\
         \t\t{{\"C4\",0}},\n\
         \t\t{{\"E4\",45}},\n\
         \t}}\n\
         }}\n",
        path.display()
    );
    assert_eq!(lua, expected);
}

#[test]
fn falls_back_to_last_note_without_skips() {
    let dir = tempfile::tempdir().unwrap();
    // 4800 ticks at 480 per beat and 120 bpm is 5 seconds
    let path = song(
        dir.path(),
        "plain.mid",
        vec![key(0, 72, 90, true), key(4800, 72, 0, false)],
    );
    let lua = std::fs::read_to_string(convert_file(&path).unwrap()).unwrap();
    assert!(lua.contains("\tskips = {0,300},\n"), "{lua}");
    assert!(lua.contains("\t\t{\"C5\",0},\n"), "{lua}");
}

#[test]
fn converting_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = song(
        dir.path(),
        "again.mid",
        vec![key(0, 50, 90, true), key(100, 50, 0, false)],
    );
    let first = std::fs::read(convert_file(&path).unwrap()).unwrap();
    let second = std::fs::read(convert_file(&path).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unmatched_note_off_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = song(
        dir.path(),
        "broken.mid",
        vec![key(0, 60, 100, true), key(480, 61, 0, false)],
    );
    let err = convert_file(&path).unwrap_err();
    assert!(matches!(err, Error::UnmatchedNoteOff { .. }), "{err}");
    assert!(!dir.path().join("broken.lua").exists());
}

#[test]
fn a_bad_file_does_not_stop_the_next() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("garbage.mid");
    std::fs::write(&garbage, b"not a midi file").unwrap();
    let good = song(
        dir.path(),
        "good.mid",
        vec![key(0, 60, 100, true), key(480, 60, 0, false)],
    );
    assert!(matches!(convert_file(&garbage), Err(Error::Midi(_))));
    assert_eq!(convert_all(&[garbage, good]), 1);
    assert!(!dir.path().join("garbage.lua").exists());
    assert!(dir.path().join("good.lua").exists());
}

#[test]
fn batch_of_good_files_has_no_failures() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<_> = ["a.mid", "b.mid"]
        .into_iter()
        .map(|name| song(dir.path(), name, vec![key(0, 62, 80, true), key(240, 62, 0, false)]))
        .collect();
    assert_eq!(convert_all(&paths), 0);
    assert!(dir.path().join("a.lua").exists());
    assert!(dir.path().join("b.lua").exists());
}

#[test]
fn no_input_is_not_a_failure() {
    assert_eq!(convert_all(&[]), 0);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(&dir.path().join("nope.mid")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
