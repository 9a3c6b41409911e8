pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{
    CartSnapshotStore, ChannelNotifier, ConsoleNotifier, HttpStockClient, LocalStorage,
    MemoryStorage,
};
pub use config::Settings;
pub use crate::core::{Cart, CartManager, Notice, Outcome, Product, Rejection};
pub use utils::error::{CartError, Result};
