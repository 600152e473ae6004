//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the mutations the engine supports

pub mod achievement;
pub mod activity;
pub mod battle;
pub mod mascot;
pub mod notification;
