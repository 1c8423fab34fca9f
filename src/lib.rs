//! Convert standard midi files into Lua note tables for a chiptune player.
//!
//! Each file becomes a `return { tempo, signature, skips, notes }` module.
//! Notes at the very bottom and top of the midi range (`C-1` and `G9`) are
//! not played; they mark the loop region as `skips` instead.

use {
    anyhow::Context,
    std::path::{Path, PathBuf},
    tracing::{error, info},
};

pub mod error;
pub mod extract;
pub mod lua;
pub mod pitch;
pub mod timebase;

pub use {
    error::{Error, Result},
    extract::{Extraction, Note, TimeSignature, extract},
};

/// Convert one midi file, writing the Lua table next to it.
///
/// Nothing is written unless the whole file converts.
pub fn convert_file(midi_path: &Path) -> Result<PathBuf> {
    let mid_data = std::fs::read(midi_path)?;
    let extraction = extract(&mid_data)?;
    let out_path = lua::output_path(midi_path);
    std::fs::write(&out_path, lua::render(midi_path, &extraction))?;
    info!(
        "Successfully converted {} into a Lua file...",
        midi_path.display()
    );
    Ok(out_path)
}

/// Convert each file in turn, logging failures without stopping.
///
/// Returns how many files failed.
pub fn convert_all(midi_paths: &[PathBuf]) -> usize {
    if midi_paths.is_empty() {
        info!("No files were given! Pass your .mid files to mid2lua.");
        return 0;
    }
    let mut failed = 0;
    for midi_path in midi_paths {
        let result = convert_file(midi_path)
            .with_context(|| format!("Failed to convert {}", midi_path.display()));
        if let Err(e) = result {
            error!("{e:#}");
            failed += 1;
        }
    }
    if failed > 0 {
        error!("{failed} of {} files failed", midi_paths.len());
    }
    failed
}
