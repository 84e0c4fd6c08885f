pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::Settings;

pub use adapters::{LocalStorage, MemoryStorage};
pub use core::{session::Session, terminal::Terminal};
pub use domain::{Boat, BoatType, ExpenseOutcome, Fleet, Storage};
pub use utils::error::{FleetError, Result};
