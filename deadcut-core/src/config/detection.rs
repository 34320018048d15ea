//! Detection configuration module
//!
//! Defines the parameters handed to ffmpeg's `freezedetect` and
//! `silencedetect` filters during the analysis pass.

/// Noise floor and minimum duration for one detection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Noise tolerance in dB (negative values, e.g. -60.0)
    pub noise_db: f64,

    /// Minimum length in seconds for an event to be reported
    pub min_duration_secs: f64,
}

impl DetectionParams {
    /// Frames closer than -60 dB for at least half a second count as frozen.
    pub const FREEZE: Self = Self {
        noise_db: -60.0,
        min_duration_secs: 0.5,
    };

    /// Audio below -30 dB for at least half a second counts as silent.
    pub const SILENCE: Self = Self {
        noise_db: -30.0,
        min_duration_secs: 0.5,
    };

    /// Renders the `freezedetect` filter expression.
    #[must_use]
    pub fn freezedetect_filter(&self) -> String {
        format!(
            "freezedetect=n={}dB:d={}",
            self.noise_db, self.min_duration_secs
        )
    }

    /// Renders the `silencedetect` filter expression.
    #[must_use]
    pub fn silencedetect_filter(&self) -> String {
        format!(
            "silencedetect=noise={}dB:d={}",
            self.noise_db, self.min_duration_secs
        )
    }
}
