//! # Engine Configuration
//!
//! Tunables with sane defaults and environment overrides.

use std::env;

/// Default minimum number of sets per batch chunk.
///
/// Batch verification savings plateau around this size, and a failed batch
/// costs a per-job re-verify of everything in the chunk, so chunks are kept
/// near the inflection rather than maximized.
pub const DEFAULT_MIN_SETS_PER_CHUNK: usize = 16;

/// Smallest accepted chunk threshold.
pub const MIN_SETS_PER_CHUNK_FLOOR: usize = 1;

/// Largest accepted chunk threshold.
pub const MIN_SETS_PER_CHUNK_CEIL: usize = 1024;

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Minimum total sets a chunk accumulates before it is closed.
    /// Clamped to `[1, 1024]` when the service is built.
    pub min_sets_per_chunk: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            min_sets_per_chunk: DEFAULT_MIN_SETS_PER_CHUNK,
        }
    }
}

impl VerifierConfig {
    /// Configuration from environment variables, falling back to defaults.
    ///
    /// # Environment Variables
    ///
    /// - `BLSPOOL_MIN_SETS_PER_CHUNK`: chunk threshold (default: 16)
    pub fn from_env() -> Self {
        let min_sets_per_chunk = env::var("BLSPOOL_MIN_SETS_PER_CHUNK")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_MIN_SETS_PER_CHUNK);

        Self { min_sets_per_chunk }.clamped()
    }

    /// The same configuration with every field forced into its valid range.
    pub fn clamped(mut self) -> Self {
        self.min_sets_per_chunk = self
            .min_sets_per_chunk
            .clamp(MIN_SETS_PER_CHUNK_FLOOR, MIN_SETS_PER_CHUNK_CEIL);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(VerifierConfig::default().min_sets_per_chunk, 16);
    }

    #[test]
    fn test_clamp_floor_and_ceiling() {
        let low = VerifierConfig {
            min_sets_per_chunk: 0,
        };
        assert_eq!(low.clamped().min_sets_per_chunk, 1);

        let high = VerifierConfig {
            min_sets_per_chunk: 1_000_000,
        };
        assert_eq!(high.clamped().min_sets_per_chunk, 1024);
    }

    #[test]
    fn test_in_range_value_is_kept() {
        let config = VerifierConfig {
            min_sets_per_chunk: 64,
        };
        assert_eq!(config.clamped().min_sets_per_chunk, 64);
    }
}
