pub mod api;
pub mod commands;
pub mod config;
pub mod errors;
pub mod launcher;
pub mod links;
pub mod models;
pub mod vista_tx_builders;

pub use api::VistaClient;
pub use errors::{EtherfunError, Result};
pub use launcher::TokenLauncher;
pub use models::{LaunchParams, LaunchResult, LaunchSession, LaunchStatus, SessionStore};
