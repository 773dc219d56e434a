use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use tch::Device;

use crate::error::ConfigError;

/// Character budgets applied to the normalized text before display or inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisLimits {
    pub excerpt_chars: usize,
    pub summary_input_chars: usize,
    pub entity_input_chars: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            excerpt_chars: 1000,
            summary_input_chars: 1024,
            entity_input_chars: 1000,
        }
    }
}

impl AnalysisLimits {
    /// The longest prefix any step reads; text beyond it never affects a result.
    pub fn widest(&self) -> usize {
        self.excerpt_chars
            .max(self.summary_input_chars)
            .max(self.entity_input_chars)
    }
}

/// Generation bounds handed to the summarization capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryParams {
    pub min_length: i64,
    pub max_length: i64,
    pub do_sample: bool,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            min_length: 30,
            max_length: 130,
            do_sample: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreference {
    #[default]
    Auto,
    Cpu,
    Cuda,
}

impl DevicePreference {
    pub fn to_device(self) -> Device {
        match self {
            DevicePreference::Auto => Device::cuda_if_available(),
            DevicePreference::Cpu => Device::Cpu,
            DevicePreference::Cuda => Device::Cuda(0),
        }
    }
}

impl FromStr for DevicePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DevicePreference::Auto),
            "cpu" => Ok(DevicePreference::Cpu),
            "cuda" | "gpu" => Ok(DevicePreference::Cuda),
            other => Err(format!("unknown device '{other}', expected auto, cpu or cuda")),
        }
    }
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub limits: AnalysisLimits,
    pub summary: SummaryParams,
    pub max_upload_bytes: usize,
    pub device: DevicePreference,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            limits: AnalysisLimits::default(),
            summary: SummaryParams::default(),
            max_upload_bytes: 50 * 1024 * 1024,
            device: DevicePreference::default(),
        }
    }
}

impl Settings {
    /// Reads `LECTURA_*` variables from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let bind_addr = parse_or(&lookup, "LECTURA_BIND_ADDR", defaults.bind_addr)?;

        let limits = AnalysisLimits {
            excerpt_chars: parse_or(&lookup, "LECTURA_EXCERPT_CHARS", defaults.limits.excerpt_chars)?,
            summary_input_chars: parse_or(
                &lookup,
                "LECTURA_SUMMARY_INPUT_CHARS",
                defaults.limits.summary_input_chars,
            )?,
            entity_input_chars: parse_or(
                &lookup,
                "LECTURA_ENTITY_INPUT_CHARS",
                defaults.limits.entity_input_chars,
            )?,
        };

        let summary = SummaryParams {
            min_length: parse_or(&lookup, "LECTURA_SUMMARY_MIN_LENGTH", defaults.summary.min_length)?,
            max_length: parse_or(&lookup, "LECTURA_SUMMARY_MAX_LENGTH", defaults.summary.max_length)?,
            do_sample: false,
        };
        if summary.min_length < 0 || summary.min_length > summary.max_length {
            return Err(ConfigError::InvalidSummaryBounds {
                min: summary.min_length,
                max: summary.max_length,
            });
        }

        Ok(Self {
            bind_addr,
            limits,
            summary,
            max_upload_bytes: parse_or(&lookup, "LECTURA_MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            device: parse_or(&lookup, "LECTURA_DEVICE", defaults.device)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
