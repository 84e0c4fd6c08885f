pub mod database;
pub mod session;
pub mod terminal;

pub use crate::domain::{Boat, BoatType, ExpenseOutcome, Fleet, Storage};
pub use crate::utils::error::Result;
