//! Instruction handlers

pub mod admin;
pub mod seed;
pub mod sources;

pub use admin::*;
pub use seed::*;
pub use sources::*;
