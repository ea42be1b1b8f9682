use serde::{Deserialize, Serialize};

/// Query payload for the `flrig` endpoint. Field order matches the query
/// string the page emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RigCommand {
    pub freq: String,
    pub mode: String,
}

/// Query payload for the `logdata` endpoint: one POTA contact to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub call: String,
    pub freq: String,
    pub mode: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
}
