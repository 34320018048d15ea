// ============================================================================
// deadcut-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Unset options fall back to the defaults
// in config/mod.rs; the two directory roots fall back to `in/` and `out/`.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{CoreConfig, DetectionParams};

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use deadcut_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/videos/in"))
///     .output_dir(PathBuf::from("/videos/out"))
///     .threads(2)
///     .force_encode(true)
///     .min_gap_secs(3.0)
///     .build();
///
/// assert_eq!(config.threads, 2);
/// assert!(config.force_encode);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input root.
    #[must_use]
    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.config.input_dir = input_dir;
        self
    }

    /// Sets the output root.
    #[must_use]
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.config.output_dir = output_dir;
        self
    }

    /// Sets the encode worker count.
    #[must_use]
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Sets whether files without gaps are re-encoded instead of copied.
    #[must_use]
    pub fn force_encode(mut self, force: bool) -> Self {
        self.config.force_encode = force;
        self
    }

    /// Sets whether ffmpeg output is surfaced.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Sets the minimum freeze/silence overlap that gets cut.
    #[must_use]
    pub fn min_gap_secs(mut self, secs: f64) -> Self {
        self.config.min_gap_secs = secs;
        self
    }

    /// Sets whether archives are unpacked before discovery.
    #[must_use]
    pub fn extract_archives(mut self, extract: bool) -> Self {
        self.config.extract_archives = extract;
        self
    }

    /// Overrides the freeze detection parameters.
    #[must_use]
    pub fn freeze_params(mut self, params: DetectionParams) -> Self {
        self.config.freeze_params = params;
        self
    }

    /// Overrides the silence detection parameters.
    #[must_use]
    pub fn silence_params(mut self, params: DetectionParams) -> Self {
        self.config.silence_params = params;
        self
    }

    /// Builds a CoreConfig instance from the builder.
    ///
    /// The result is not validated; call [`CoreConfig::validate`] before use.
    #[must_use]
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_config_defaults() {
        let built = CoreConfigBuilder::new().build();
        let default = CoreConfig::default();
        assert_eq!(built.input_dir, default.input_dir);
        assert_eq!(built.output_dir, default.output_dir);
        assert_eq!(built.threads, default.threads);
        assert_eq!(built.min_gap_secs, default.min_gap_secs);
    }

    #[test]
    fn test_builder_overrides() {
        let params = DetectionParams {
            noise_db: -50.0,
            min_duration_secs: 1.0,
        };
        let config = CoreConfigBuilder::new()
            .input_dir(PathBuf::from("a"))
            .output_dir(PathBuf::from("b"))
            .threads(8)
            .verbose(true)
            .extract_archives(false)
            .freeze_params(params)
            .silence_params(params)
            .build();

        assert_eq!(config.input_dir, PathBuf::from("a"));
        assert_eq!(config.output_dir, PathBuf::from("b"));
        assert_eq!(config.threads, 8);
        assert!(config.verbose);
        assert!(!config.extract_archives);
        assert_eq!(config.freeze_params, params);
        assert_eq!(config.silence_params, params);
    }
}
