use std::path::PathBuf;

pub const JIOSAAVN_API_URL: &str = "https://jiosaavnapi-six.vercel.app/api/search/songs";
pub const YTMUSIC_API_URL: &str = "http://localhost:5005";
pub const LYRICS_API_URL: &str = "https://api.lyrics.ovh";

pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Port the mock backend binds to, overridable via `RESONA_PORT`.
pub const SERVER_PORT: u16 = 3001;

pub fn server_port() -> u16 {
    std::env::var("RESONA_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(SERVER_PORT)
}

pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resona")
}

pub fn get_state_file_path() -> PathBuf {
    get_data_dir().join("state.json")
}
