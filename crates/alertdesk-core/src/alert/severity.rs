//! Alert severity levels.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Criticality assigned to an alert by the backend classifier.
///
/// Variants are declared in ascending order so `Ord` follows criticality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    /// Routine alert, low risk.
    Low,
    /// Action recommended, moderate risk.
    Medium,
    /// Urgent action required, high risk of breach.
    High,
    /// Immediate action required, potential breach in progress.
    Critical,
}

impl Severity {
    /// Returns whether this severity gets elevated treatment.
    ///
    /// Elevated alerts are highlighted when rendered and trigger an
    /// automated response lookup after submission.
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}
