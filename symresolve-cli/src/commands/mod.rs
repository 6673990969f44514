pub mod common;
pub mod info;
pub mod lookup;
pub mod resolve;
pub mod types;
