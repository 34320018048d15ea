//! Encoding configuration module
//!
//! The output format is fixed: every re-encode, whether it is a straight
//! transcode or a trim-and-concat, uses the same parameters.

/// H.264 profile passed as `-profile:v`.
pub const ENCODE_PROFILE: &str = "high";

/// H.264 level passed as `-level`.
pub const ENCODE_LEVEL: &str = "4.2";

/// CRF used for both the force-encode path and the cut path.
pub const ENCODE_CRF: u8 = 30;

/// Encoder speed preset. Slower presets trade time for compression.
pub const ENCODE_PRESET: &str = "slower";

/// Container flags; `+faststart` moves the moov atom to the front.
pub const ENCODE_MOVFLAGS: &str = "+faststart";

/// Audio codec for the re-encoded output.
pub const AUDIO_CODEC: &str = "aac";

/// Audio bitrate for the re-encoded output.
pub const AUDIO_BITRATE: &str = "128k";

/// Returns the fixed output parameters in the order ffmpeg receives them.
#[must_use]
pub fn encode_output_args() -> Vec<String> {
    vec![
        "-profile:v".to_string(),
        ENCODE_PROFILE.to_string(),
        "-level".to_string(),
        ENCODE_LEVEL.to_string(),
        "-crf".to_string(),
        ENCODE_CRF.to_string(),
        "-movflags".to_string(),
        ENCODE_MOVFLAGS.to_string(),
        "-c:a".to_string(),
        AUDIO_CODEC.to_string(),
        "-b:a".to_string(),
        AUDIO_BITRATE.to_string(),
        "-preset".to_string(),
        ENCODE_PRESET.to_string(),
    ]
}
