mod chamber;
pub mod party;
pub mod state;

pub use chamber::{Chamber, OfficeMap};
pub use party::Winner;
