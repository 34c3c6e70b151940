pub mod generate;
pub mod store;
pub mod tile;
