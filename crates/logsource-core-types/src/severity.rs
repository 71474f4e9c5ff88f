//! Severity vocabulary
//!
//! Two backend styles are bridged by this crate, and each has its own view
//! of "how important is this record":
//!
//! - [`Severity`] and [`SourceLevel`] belong to the severity-switch backend.
//!   A switch is configured with a [`SourceLevel`] and answers, per
//!   [`Severity`], whether a record passes.
//! - [`LogLevel`] belongs to the structured leveled logger.
//!
//! Severities are flags, not ordinals: each one owns a single bit so that a
//! set of enabled severities fits in a [`SeverityMask`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Set of severities, one bit per [`Severity`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SeverityMask: u32 {
        const CRITICAL    = 0x01;
        const ERROR       = 0x02;
        const WARNING     = 0x04;
        const INFORMATION = 0x08;
        const VERBOSE     = 0x10;
    }
}

/// Criticality of a single record emitted through a severity-switch backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Information,
    Verbose,
}

impl Severity {
    /// Every defined severity, most critical first
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Information,
        Severity::Verbose,
    ];

    /// The flag bit owned by this severity
    pub const fn bit(self) -> SeverityMask {
        match self {
            Severity::Critical => SeverityMask::CRITICAL,
            Severity::Error => SeverityMask::ERROR,
            Severity::Warning => SeverityMask::WARNING,
            Severity::Information => SeverityMask::INFORMATION,
            Severity::Verbose => SeverityMask::VERBOSE,
        }
    }

    /// The structured logger level a record of this severity is written at
    pub const fn log_level(self) -> LogLevel {
        match self {
            Severity::Critical => LogLevel::Critical,
            Severity::Error => LogLevel::Error,
            Severity::Warning => LogLevel::Warning,
            Severity::Information => LogLevel::Information,
            Severity::Verbose => LogLevel::Debug,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "information",
            Severity::Verbose => "verbose",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Switch setting of a severity-switch backend
///
/// Each level enables its own severity and every more critical one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceLevel {
    #[default]
    Off,
    Critical,
    Error,
    Warning,
    Information,
    Verbose,
    All,
}

impl SourceLevel {
    /// Severities that pass a switch set to this level
    pub const fn mask(self) -> SeverityMask {
        match self {
            SourceLevel::Off => SeverityMask::empty(),
            SourceLevel::Critical => SeverityMask::CRITICAL,
            SourceLevel::Error => SeverityMask::CRITICAL.union(SeverityMask::ERROR),
            SourceLevel::Warning => SeverityMask::CRITICAL
                .union(SeverityMask::ERROR)
                .union(SeverityMask::WARNING),
            SourceLevel::Information => SeverityMask::CRITICAL
                .union(SeverityMask::ERROR)
                .union(SeverityMask::WARNING)
                .union(SeverityMask::INFORMATION),
            SourceLevel::Verbose | SourceLevel::All => SeverityMask::all(),
        }
    }

    /// Check whether a record of `severity` passes this switch level
    pub const fn allows(self, severity: Severity) -> bool {
        self.mask().contains(severity.bit())
    }

    /// Derive a switch level from a structured logger's enabled predicate
    ///
    /// The most verbose enabled level wins: a logger with tracing enabled
    /// maps to [`SourceLevel::All`], one with only critical records enabled
    /// maps to [`SourceLevel::Critical`], and one with nothing enabled maps
    /// to [`SourceLevel::Off`].
    pub fn from_enabled<F>(is_enabled: F) -> SourceLevel
    where
        F: Fn(LogLevel) -> bool,
    {
        const PROBES: [(LogLevel, SourceLevel); 6] = [
            (LogLevel::Trace, SourceLevel::All),
            (LogLevel::Debug, SourceLevel::Verbose),
            (LogLevel::Information, SourceLevel::Information),
            (LogLevel::Warning, SourceLevel::Warning),
            (LogLevel::Error, SourceLevel::Error),
            (LogLevel::Critical, SourceLevel::Critical),
        ];

        PROBES
            .iter()
            .find(|(level, _)| is_enabled(*level))
            .map(|(_, source)| *source)
            .unwrap_or(SourceLevel::Off)
    }
}

/// Level vocabulary of the structured leveled logger
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
    None,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Information => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::None => "NONE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_bits_are_distinct() {
        let mut seen = SeverityMask::empty();
        for severity in Severity::ALL {
            assert!(!seen.intersects(severity.bit()), "{} reuses a bit", severity);
            seen |= severity.bit();
        }
        assert_eq!(seen, SeverityMask::all());
    }

    #[test]
    fn test_source_level_allows_more_critical() {
        assert!(SourceLevel::Warning.allows(Severity::Critical));
        assert!(SourceLevel::Warning.allows(Severity::Error));
        assert!(SourceLevel::Warning.allows(Severity::Warning));
        assert!(!SourceLevel::Warning.allows(Severity::Information));
        assert!(!SourceLevel::Warning.allows(Severity::Verbose));
    }

    #[test]
    fn test_off_and_all() {
        for severity in Severity::ALL {
            assert!(!SourceLevel::Off.allows(severity));
            assert!(SourceLevel::All.allows(severity));
        }
    }

    #[test]
    fn test_verbose_maps_to_debug() {
        assert_eq!(Severity::Verbose.log_level(), LogLevel::Debug);
        assert_eq!(Severity::Critical.log_level(), LogLevel::Critical);
    }

    #[test]
    fn test_from_enabled_picks_most_verbose() {
        let level = SourceLevel::from_enabled(|l| l >= LogLevel::Information);
        assert_eq!(level, SourceLevel::Information);

        let level = SourceLevel::from_enabled(|l| l >= LogLevel::Trace);
        assert_eq!(level, SourceLevel::All);

        let level = SourceLevel::from_enabled(|l| l == LogLevel::Critical);
        assert_eq!(level, SourceLevel::Critical);

        let level = SourceLevel::from_enabled(|_| false);
        assert_eq!(level, SourceLevel::Off);
    }

    #[test]
    fn test_source_level_deserializes_lowercase() {
        let level: SourceLevel = serde_json::from_str("\"information\"").unwrap();
        assert_eq!(level, SourceLevel::Information);
    }
}
