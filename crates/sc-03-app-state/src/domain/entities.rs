use shared_types::VersionId;

/// Application state configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateConfig {
    /// How many versions of each store's history recovery inspects.
    ///
    /// A store further ahead of the others than this cannot be recovered
    /// automatically.
    pub recovery_depth: usize,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            recovery_depth: 1_024,
        }
    }
}

impl StateConfig {
    pub fn for_testing() -> Self {
        Self { recovery_depth: 16 }
    }
}

/// Outcome of a successful startup recovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoveryReport {
    /// Version every store reports after recovery.
    pub common_version: VersionId,
    /// Indices of the stores that were rolled back, ascending.
    pub rolled_back: Vec<usize>,
}

impl RecoveryReport {
    pub fn was_needed(&self) -> bool {
        !self.rolled_back.is_empty()
    }
}
