//! Tempo and tick arithmetic

/// Microseconds per minute
const US_PER_MINUTE: u32 = 60_000_000;
const US_PER_SECOND: u128 = 1_000_000;
/// Output resolution of the playback engine
pub const TICKS_60_PER_SECOND: u128 = 60;

/// Whole beats per minute for a tempo message, rounding halves to even.
pub fn us_per_beat_to_bpm(us_per_beat: u32) -> u32 {
    (f64::from(US_PER_MINUTE) / f64::from(us_per_beat)).round_ties_even() as u32
}

/// Maps absolute midi ticks to wall time under a single tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timebase {
    pub ticks_per_beat: u16,
    pub us_per_beat: u32,
}

impl Timebase {
    pub fn seconds(&self, ticks: u64) -> f64 {
        ticks as f64 * (f64::from(self.us_per_beat) / f64::from(self.ticks_per_beat))
            / US_PER_SECOND as f64
    }
    /// `ceil(seconds * 60)`, computed exactly.
    pub fn ticks_60(&self, ticks: u64) -> u64 {
        let num = u128::from(ticks) * u128::from(self.us_per_beat) * TICKS_60_PER_SECOND;
        let den = u128::from(self.ticks_per_beat) * US_PER_SECOND;
        num.div_ceil(den) as u64
    }
}
