use serde::{Deserialize, Serialize};

use crate::models::Track;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}
