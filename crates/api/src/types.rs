use serde::Deserialize;

/// The slice of live stream data templates can reference.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub game_name: String,
}

/// One entry in a channel's blocked-term list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BlockedTerm {
    pub id: String,
    pub text: String,
}
