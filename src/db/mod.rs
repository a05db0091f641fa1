//! Persistence layer (credential file).

pub mod token_store;

pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Default credential file name, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "strava_tokens.json";
