// Domain layer: boats, the fleet that owns them, and the storage port.

pub mod fleet;
pub mod model;
pub mod ports;

pub use fleet::Fleet;
pub use model::{Boat, BoatType, ExpenseOutcome};
pub use ports::Storage;
