//! Reporter configuration
//!
//! [`ReporterConfig`] is the typed configuration the renderers consume.
//! [`ReporterFlags`] is its flag-style form as read from `reporter.toml` and the
//! command line; validation turns one into the other.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// How much detail the reporter prints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// One glyph per spec, collapsed hierarchies
    Succinct,
    /// Default detail
    #[default]
    Normal,
    /// Announce every spec before it runs
    Verbose,
    /// Like verbose, plus skipped and pending detail
    VeryVerbose,
}

/// Typed reporter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Output detail
    pub verbosity: Verbosity,
    /// Whether to emit terminal colors
    pub color: bool,
    /// Emit captured writer output for passing specs too
    pub always_emit_writer_output: bool,
    /// Print full stack traces for failures
    pub full_trace: bool,
    /// Specs at least this slow are flagged `[SLOW TEST]`
    pub slow_spec_threshold: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: true,
            always_emit_writer_output: false,
            full_trace: false,
            slow_spec_threshold: Duration::from_secs(default_slow_spec_threshold_secs()),
        }
    }
}

impl ReporterConfig {
    /// Default configuration at the given verbosity
    #[must_use]
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            ..Self::default()
        }
    }
}

const fn default_slow_spec_threshold_secs() -> u64 {
    5
}

const fn default_slow_spec_threshold() -> f64 {
    5.0
}

/// Flag-style reporter settings, as written in `reporter.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterFlags {
    /// Succinct output
    #[serde(default)]
    pub succinct: bool,
    /// Verbose output
    #[serde(default)]
    pub verbose: bool,
    /// Very verbose output
    #[serde(default)]
    pub very_verbose: bool,
    /// Disable colors
    #[serde(default)]
    pub no_color: bool,
    /// Emit writer output for passing specs
    #[serde(default)]
    pub always_emit_writer_output: bool,
    /// Print full stack traces
    #[serde(default)]
    pub full_trace: bool,
    /// Slow spec threshold in seconds (default: 5)
    #[serde(default = "default_slow_spec_threshold")]
    pub slow_spec_threshold: f64,
}

impl Default for ReporterFlags {
    fn default() -> Self {
        Self {
            succinct: false,
            verbose: false,
            very_verbose: false,
            no_color: false,
            always_emit_writer_output: false,
            full_trace: false,
            slow_spec_threshold: default_slow_spec_threshold(),
        }
    }
}

impl ReporterFlags {
    /// Parse a reporter.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse reporter.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let flags: Self = toml::from_str(content).context("Failed to parse reporter.toml")?;
        flags.validate()?;
        Ok(flags)
    }

    /// Validate and convert into a typed configuration
    pub fn into_config(self) -> Result<ReporterConfig> {
        self.validate()?;
        let verbosity = if self.succinct {
            Verbosity::Succinct
        } else if self.very_verbose {
            Verbosity::VeryVerbose
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        let slow_spec_threshold = Duration::try_from_secs_f64(self.slow_spec_threshold)
            .context("Invalid slow_spec_threshold")?;

        Ok(ReporterConfig {
            verbosity,
            color: !self.no_color,
            always_emit_writer_output: self.always_emit_writer_output,
            full_trace: self.full_trace,
            slow_spec_threshold,
        })
    }

    /// Validate the flags
    fn validate(&self) -> Result<()> {
        let chosen: Vec<&str> = [
            (self.succinct, "succinct"),
            (self.verbose, "verbose"),
            (self.very_verbose, "very_verbose"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();
        if chosen.len() > 1 {
            bail!(
                "Conflicting verbosity flags: {} (choose only one)",
                chosen.join(", ")
            );
        }

        if !self.slow_spec_threshold.is_finite() || self.slow_spec_threshold < 0.0 {
            bail!(
                "slow_spec_threshold must be a non-negative number of seconds, got {}",
                self.slow_spec_threshold
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = ReporterFlags::parse("").unwrap().into_config().unwrap();
        assert_eq!(config, ReporterConfig::default());
        assert_eq!(config.slow_spec_threshold, Duration::from_secs(5));
    }

    #[test]
    fn test_parse_all_fields() {
        let toml = r"
very_verbose = true
no_color = true
always_emit_writer_output = true
full_trace = true
slow_spec_threshold = 1.5
";
        let config = ReporterFlags::parse(toml).unwrap().into_config().unwrap();
        assert_eq!(config.verbosity, Verbosity::VeryVerbose);
        assert!(!config.color);
        assert!(config.always_emit_writer_output);
        assert!(config.full_trace);
        assert_eq!(config.slow_spec_threshold, Duration::from_millis(1500));
    }

    #[test]
    fn test_conflicting_verbosity_rejected() {
        let err = ReporterFlags::parse("succinct = true\nverbose = true\n").unwrap_err();
        assert!(
            err.to_string().contains("Conflicting verbosity flags: succinct, verbose"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_conflict_introduced_after_parse_is_rejected() {
        let mut flags = ReporterFlags::parse("verbose = true").unwrap();
        flags.very_verbose = true;
        assert!(flags.into_config().is_err());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = ReporterFlags::parse("slow_spec_threshold = -1.0").unwrap_err();
        assert!(err.to_string().contains("slow_spec_threshold"));
    }

    #[test]
    fn test_invalid_toml_has_context() {
        let err = ReporterFlags::parse("verbose = ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse reporter.toml"));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reporter.toml");
        std::fs::write(&path, "succinct = true\n").unwrap();

        let config = ReporterFlags::from_path(&path).unwrap().into_config().unwrap();
        assert_eq!(config.verbosity, Verbosity::Succinct);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ReporterFlags::from_path("/nonexistent/reporter.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Succinct < Verbosity::Normal);
        assert!(Verbosity::Verbose < Verbosity::VeryVerbose);
    }
}
