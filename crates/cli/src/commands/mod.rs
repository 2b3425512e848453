//! Command implementations

pub mod generate;
pub mod info;
pub mod validate;
