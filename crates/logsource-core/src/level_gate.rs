//! Precomputed "would this be logged?" checks
//!
//! A [`LevelGate`] asks a backend once, for every defined severity, whether
//! it is enabled and keeps the answers as a [`SeverityMask`]. Hot-path checks
//! are then a single bitwise AND.
//!
//! The mask is a snapshot. Changing the backend's switch afterwards does not
//! change the gate; only a gate computed later sees the new setting.

use crate::backend::Backend;
use logsource_core_types::{Severity, SeverityMask};

/// Immutable snapshot of the severities a backend had enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelGate {
    mask: SeverityMask,
}

impl LevelGate {
    /// Query `backend` for every severity and record the enabled ones
    pub fn compute(backend: &dyn Backend) -> Self {
        let mask = Severity::ALL
            .into_iter()
            .filter(|severity| backend.is_enabled(*severity))
            .fold(SeverityMask::empty(), |mask, severity| mask | severity.bit());
        Self { mask }
    }

    /// A gate with every severity closed
    pub const fn closed() -> Self {
        Self {
            mask: SeverityMask::empty(),
        }
    }

    #[inline]
    pub const fn should_emit(&self, severity: Severity) -> bool {
        self.mask.intersects(severity.bit())
    }

    pub const fn mask(&self) -> SeverityMask {
        self.mask
    }
}
