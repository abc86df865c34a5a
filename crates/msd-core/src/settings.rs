//! Apply preferences.

use serde::{Deserialize, Serialize};

use crate::types::ReconcileMode;

/// Operator preferences for apply runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplySettings {
    /// Reuse same-name, same-type destination fields instead of always
    /// creating new ones. Default is `true`.
    #[serde(default = "default_overwrite_existing")]
    pub overwrite_existing: bool,
}

fn default_overwrite_existing() -> bool {
    true
}

impl Default for ApplySettings {
    fn default() -> Self {
        Self {
            overwrite_existing: default_overwrite_existing(),
        }
    }
}

impl ApplySettings {
    /// The reconciliation mode these settings select.
    #[must_use]
    pub const fn mode(&self) -> ReconcileMode {
        ReconcileMode::from_overwrite(self.overwrite_existing)
    }
}
