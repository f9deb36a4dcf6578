use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    CoordinatorInit,
    Analysis,
    Summary,
    QaReady,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::CoordinatorInit,
        Stage::Analysis,
        Stage::Summary,
        Stage::QaReady,
    ];

    /// The stage after this one, or `None` at `qa-ready`.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::CoordinatorInit => Some(Stage::Analysis),
            Stage::Analysis => Some(Stage::Summary),
            Stage::Summary => Some(Stage::QaReady),
            Stage::QaReady => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::QaReady
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::CoordinatorInit => "coordinator-init",
            Stage::Analysis => "analysis",
            Stage::Summary => "summary",
            Stage::QaReady => "qa-ready",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
