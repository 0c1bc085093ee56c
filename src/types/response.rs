use serde::Serialize;

use crate::types::snapshot::{Snapshot, SubmitOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Submitted {
        #[serde(flatten)]
        outcome: SubmitOutcome,
        state: Snapshot,
    },
    State(Snapshot),
    Rejected {
        error: String,
    },
}
