//! TOML configuration at `~/.coach/config.toml`.
//!
//! Every section and field is optional; defaults are applied when the merged
//! tuning is built, so a missing or partial file is always valid. A missing
//! file loads as `Ok(None)`, a present-but-broken file is an error the
//! caller can report before falling back to defaults.

use serde::Deserialize;
use std::{env, path::PathBuf};

use coach_types::{
    BaseScore, LengthThresholds, ScoringTuning, ThresholdError, TurnThreshold,
};

/// Environment variable consulted when `[generation]` has no `api_token`.
const TOKEN_ENV_VAR: &str = "COACH_API_TOKEN";

#[derive(Debug, Default, Deserialize)]
pub struct CoachConfig {
    pub scoring: Option<ScoringSection>,
    pub generation: Option<GenerationSection>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Overrides for the scoring heuristics and stage machine.
///
/// ```toml
/// [scoring]
/// base_score = 60
/// closing_threshold = 4
/// brief_words = 10
/// expand_words = 20
/// bonus_min_words = 30
/// bonus_max_words = 150
/// long_max_words = 200
/// deep_dive_words = 80
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ScoringSection {
    pub base_score: Option<u8>,
    pub closing_threshold: Option<u8>,
    pub brief_words: Option<usize>,
    pub expand_words: Option<usize>,
    pub bonus_min_words: Option<usize>,
    pub bonus_max_words: Option<usize>,
    pub long_max_words: Option<usize>,
    pub deep_dive_words: Option<usize>,
}

/// Remote text-generation settings.
///
/// ```toml
/// [generation]
/// enabled = true
/// api_token = "${HF_API_TOKEN}"
/// timeout_secs = 20
/// models = ["facebook/opt-350m", "gpt2"]
/// ```
#[derive(Default, Deserialize)]
pub struct GenerationSection {
    #[serde(default)]
    pub enabled: bool,
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub models: Option<Vec<String>>,
}

// Manual Debug impl to prevent leaking the API token in logs.
impl std::fmt::Debug for GenerationSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mask(opt: Option<&String>) -> &'static str {
            if opt.is_some() { "[REDACTED]" } else { "None" }
        }
        f.debug_struct("GenerationSection")
            .field("enabled", &self.enabled)
            .field("api_url", &self.api_url)
            .field("api_token", &mask(self.api_token.as_ref()))
            .field("timeout_secs", &self.timeout_secs)
            .field("models", &self.models)
            .finish()
    }
}

impl GenerationSection {
    /// Resolve the API token: the config value with `${VAR}` references
    /// expanded, falling back to `COACH_API_TOKEN`. Empty resolutions count
    /// as absent so a dangling reference does not authenticate as "".
    #[must_use]
    pub fn resolved_token(&self) -> Option<String> {
        let raw = match &self.api_token {
            Some(token) => expand_env_vars(token),
            None => env::var(TOKEN_ENV_VAR).unwrap_or_default(),
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl CoachConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| {
            tracing::warn!(path = %path.display(), %source, "Couldn't read config");
            ConfigError::Read {
                path: path.clone(),
                source,
            }
        })?;

        let config = toml::from_str(&content).map_err(|source| {
            tracing::warn!(path = %path.display(), %source, "Couldn't parse config");
            ConfigError::Parse {
                path: path.clone(),
                source,
            }
        })?;
        Ok(Some(config))
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Scoring tuning with config overrides merged over the defaults.
    ///
    /// Out-of-range values surface as [`ThresholdError`] so the caller can
    /// report them and fall back instead of silently mis-scoring.
    pub fn scoring_tuning(&self) -> Result<ScoringTuning, ThresholdError> {
        let defaults = ScoringTuning::default();
        let section = match &self.scoring {
            Some(section) => section,
            None => return Ok(defaults),
        };

        let base = match section.base_score {
            Some(value) => BaseScore::new(value)?,
            None => defaults.base,
        };
        let closing = match section.closing_threshold {
            Some(value) => TurnThreshold::new(value)?,
            None => defaults.closing,
        };
        let lengths = LengthThresholds::new(
            section.brief_words.unwrap_or(defaults.lengths.brief_words()),
            section
                .expand_words
                .unwrap_or(defaults.lengths.expand_words()),
            section
                .bonus_min_words
                .unwrap_or(defaults.lengths.bonus_min_words()),
            section
                .bonus_max_words
                .unwrap_or(defaults.lengths.bonus_max_words()),
            section
                .long_max_words
                .unwrap_or(defaults.lengths.long_max_words()),
            section
                .deep_dive_words
                .unwrap_or(defaults.lengths.deep_dive_words()),
        )?;

        Ok(ScoringTuning {
            base,
            closing,
            lengths,
            weights: defaults.weights,
        })
    }
}

/// Expand `${VAR}` references against the process environment. Unset
/// variables expand to nothing; an unclosed `${` passes through untouched.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find("${") {
        let Some(close) = rest[open + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let name = &rest[open + 2..open + 2 + close];
        if !name.is_empty()
            && let Ok(replacement) = env::var(name)
        {
            out.push_str(&replacement);
        }
        rest = &rest[open + 2 + close + 1..];
    }

    out.push_str(rest);
    out
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".coach").join("config.toml"))
}
