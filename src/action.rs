use serde::{Deserialize, Serialize};

/// Whether an insert/extract actually happens or only reports what would happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Execute,
    Simulate,
}

impl Action {
    pub fn execute(self) -> bool {
        self == Action::Execute
    }

    pub fn simulate(self) -> bool {
        self == Action::Simulate
    }
}
