pub mod generate;
pub mod store;
