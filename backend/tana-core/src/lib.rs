pub mod config;
pub mod error;
pub mod orchestrator;
pub mod payload;
pub mod reporter;
pub mod tana_client;

#[cfg(test)]
mod tests;

pub const TANA_API_HOST: &str = "europe-west1-tagr-prod.cloudfunctions.net";
pub const TANA_API_PATH: &str = "addToNodeV2";
pub const TANA_API_URL: &str = const_format::concatcp!("https://", TANA_API_HOST, "/", TANA_API_PATH);
pub const TANA_API_TOKEN_ENV: &str = "TANA_API_TOKEN";
pub const INBOX_NODE_ID: &str = "INBOX";
