use serde::{Deserialize, Serialize};

/**
 * Read-only copy of a player owned by the Players service. Fetched per
 * request and never stored locally.
 */
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}
