mod config;
mod env;
mod error;
mod helpers;
mod orchestrator;
mod tana_client;
