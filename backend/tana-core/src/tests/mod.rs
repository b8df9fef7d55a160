mod config;
mod payload;
mod tana_client;
