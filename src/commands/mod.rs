pub mod conform;
pub mod explore;
