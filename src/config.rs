//! File-layered runtime configuration.
//!
//! Every field has a default; a TOML file (path taken from
//! `LABELTRACK_CONFIG`) overrides selectively. Resolved values are validated
//! before use so a bad file fails at startup, not mid-session.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::classify::{ThrottleMode, VisionClientConfig};
use crate::integration::PipelineConfig;
use crate::language::TargetLanguage;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    language: Option<String>,
    lexicon_fallback: Option<bool>,
    tracker: Option<TrackerFile>,
    detector: Option<DetectorFile>,
    classify: Option<ClassifyFile>,
    snapshot: Option<SnapshotFile>,
    service: Option<ServiceFile>,
}

#[derive(Debug, Deserialize, Default)]
struct TrackerFile {
    smoothing: Option<f32>,
    grace_frames: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectorFile {
    score_thresh: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct ClassifyFile {
    mode: Option<String>,
    min_interval_ms: Option<u64>,
    default_backoff_secs: Option<u64>,
    empty_clear_delay_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct SnapshotFile {
    scale: Option<f32>,
    jpeg_quality: Option<u8>,
}

#[derive(Debug, Deserialize, Default)]
struct ServiceFile {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

/// Fully resolved configuration for a tracking session.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub pipeline: PipelineConfig,
    pub service: VisionClientConfig,
}

impl RuntimeConfig {
    /// Load configuration, honoring `LABELTRACK_CONFIG` when set.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var("LABELTRACK_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => {
                let cfg = Self::default();
                cfg.validate()?;
                Ok(cfg)
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(raw)?;
        let cfg = Self::resolve(file)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn resolve(file: ConfigFile) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(code) = file.language {
            cfg.pipeline.language = code
                .parse::<TargetLanguage>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        if let Some(fallback) = file.lexicon_fallback {
            cfg.pipeline.lexicon_fallback = fallback;
        }

        if let Some(tracker) = file.tracker {
            if let Some(smoothing) = tracker.smoothing {
                cfg.pipeline.tracker.smoothing = smoothing;
            }
            if let Some(grace_frames) = tracker.grace_frames {
                cfg.pipeline.tracker.grace_frames = grace_frames;
            }
        }

        if let Some(detector) = file.detector {
            if let Some(score_thresh) = detector.score_thresh {
                cfg.pipeline.detector.score_thresh = score_thresh;
            }
        }

        if let Some(classify) = file.classify {
            if let Some(mode) = classify.mode {
                let mode = match mode.as_str() {
                    "realtime" => ThrottleMode::Realtime,
                    "manual" => ThrottleMode::Manual,
                    other => {
                        return Err(ConfigError::Invalid(format!(
                            "unknown classify mode '{other}'; expected realtime or manual"
                        )))
                    }
                };
                cfg.pipeline.classify.min_interval = mode.min_interval();
            }
            // An explicit interval wins over the mode preset.
            if let Some(ms) = classify.min_interval_ms {
                cfg.pipeline.classify.min_interval = Duration::from_millis(ms);
            }
            if let Some(secs) = classify.default_backoff_secs {
                cfg.pipeline.classify.default_backoff = Duration::from_secs(secs);
            }
            if let Some(ms) = classify.empty_clear_delay_ms {
                cfg.pipeline.classify.empty_clear_delay = Duration::from_millis(ms);
            }
        }

        if let Some(snapshot) = file.snapshot {
            if let Some(scale) = snapshot.scale {
                cfg.pipeline.snapshot.scale = scale;
            }
            if let Some(quality) = snapshot.jpeg_quality {
                cfg.pipeline.snapshot.jpeg_quality = quality;
            }
        }

        if let Some(service) = file.service {
            if let Some(endpoint) = service.endpoint {
                cfg.service.endpoint = endpoint;
            }
            if let Some(secs) = service.timeout_secs {
                cfg.service.timeout = Duration::from_secs(secs);
            }
        }

        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pipeline;
        if !(p.tracker.smoothing > 0.0 && p.tracker.smoothing <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "tracker.smoothing must be in (0, 1], got {}",
                p.tracker.smoothing
            )));
        }
        if p.tracker.grace_frames == 0 {
            return Err(ConfigError::Invalid(
                "tracker.grace_frames must be at least 1".into(),
            ));
        }
        if !(p.snapshot.scale > 0.0 && p.snapshot.scale <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "snapshot.scale must be in (0, 1], got {}",
                p.snapshot.scale
            )));
        }
        if !(1..=100).contains(&p.snapshot.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "snapshot.jpeg_quality must be in 1..=100, got {}",
                p.snapshot.jpeg_quality
            )));
        }
        if p.classify.min_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "classify.min_interval_ms must be nonzero".into(),
            ));
        }
        if self.service.timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "service.timeout_secs must be nonzero".into(),
            ));
        }
        Ok(())
    }
}
