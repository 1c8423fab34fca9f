//! Lua table output

use {
    crate::extract::Extraction,
    std::{
        fmt,
        path::{Path, PathBuf},
    },
};

/// `song.mid` -> `song.lua`, next to the input
pub fn output_path(midi_path: &Path) -> PathBuf {
    midi_path.with_extension("lua")
}

/// Render the extraction as a Lua module returning one table.
///
/// Notes only carry their start time; the player works out durations itself.
pub fn render(midi_path: &Path, extraction: &Extraction) -> String {
    LuaTable {
        midi_path,
        extraction,
    }
    .to_string()
}

struct LuaTable<'a> {
    midi_path: &'a Path,
    extraction: &'a Extraction,
}

impl fmt::Display for LuaTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ex = self.extraction;
        writeln!(
            f,
            "-- Original file: \"{}.mid\"",
            self.midi_path.with_extension("").display()
        )?;
        writeln!(f, "return {{")?;
        writeln!(f, "\ttempo = \"{}\",", ex.tempo)?;
        let sig = ex.time_signature;
        writeln!(f, "\tsignature = \"{}/{}\",", sig.numerator, sig.denominator)?;
        let (from, to) = ex.skip_range();
        writeln!(f, "\tskips = {{{from},{to}}},")?;
        writeln!(f, "\tnotes = {{")?;
        for note in &ex.notes {
            writeln!(f, "\t\t{{\"{}\",{}}},", note.name, note.start)?;
        }
        writeln!(f, "\t}}")?;
        writeln!(f, "}}")
    }
}
