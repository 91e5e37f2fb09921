//! Runtime configuration for the scope worker.

use std::str::FromStr;

use scopekit_core::{ScopeOptions, VectorscopePolicy, WaveformMode};

/// Default request channel capacity.
const DEFAULT_QUEUE_DEPTH: usize = 16;

/// Environment variable selecting what `waveform` returns.
pub const ENV_WAVEFORM: &str = "SCOPEKIT_WAVEFORM";
/// Environment variable selecting the vectorscope coordinate policy.
pub const ENV_VECTORSCOPE: &str = "SCOPEKIT_VECTORSCOPE";
/// Environment variable for the request channel capacity.
pub const ENV_QUEUE_DEPTH: &str = "SCOPEKIT_QUEUE_DEPTH";

/// Runtime configuration for a `ScopeWorker`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    /// Default form of the `waveform` scope when a request doesn't say.
    pub waveform: WaveformMode,
    /// Default vectorscope policy when a request doesn't say.
    pub vectorscope: VectorscopePolicy,
    /// Requests that may queue before `submit` waits.
    pub queue_depth: usize,
}

impl WorkerConfig {
    /// Build from a variable lookup. Unset or unparseable values fall back
    /// to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            waveform: parse_or(&lookup, ENV_WAVEFORM, WaveformMode::default()),
            vectorscope: parse_or(&lookup, ENV_VECTORSCOPE, VectorscopePolicy::default()),
            queue_depth: parse_or(&lookup, ENV_QUEUE_DEPTH, DEFAULT_QUEUE_DEPTH).max(1),
        }
    }

    /// Scope variants requests start from.
    pub fn scope_options(&self) -> ScopeOptions {
        ScopeOptions {
            waveform: self.waveform,
            vectorscope: self.vectorscope,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("ignoring {name}={raw:?}: {e}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> WorkerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WorkerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.waveform, WaveformMode::Parade);
        assert_eq!(config.vectorscope, VectorscopePolicy::Rec709Yuv);
        assert_eq!(config.queue_depth, DEFAULT_QUEUE_DEPTH);
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            (ENV_WAVEFORM, "luma"),
            (ENV_VECTORSCOPE, "simple"),
            (ENV_QUEUE_DEPTH, "4"),
        ]);
        assert_eq!(config.waveform, WaveformMode::Luma);
        assert_eq!(config.vectorscope, VectorscopePolicy::SimpleChroma);
        assert_eq!(config.queue_depth, 4);
        assert_eq!(config.scope_options().vectorscope, VectorscopePolicy::SimpleChroma);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[(ENV_WAVEFORM, "sideways"), (ENV_QUEUE_DEPTH, "lots")]);
        assert_eq!(config.waveform, WaveformMode::Parade);
        assert_eq!(config.queue_depth, DEFAULT_QUEUE_DEPTH);
    }

    #[test]
    fn test_zero_queue_depth_is_raised_to_one() {
        assert_eq!(config_from(&[(ENV_QUEUE_DEPTH, "0")]).queue_depth, 1);
    }
}
