//! Pure domain logic for the progression & gamification engine.
//!
//! No I/O lives here: requirement evaluation, leveling math, battle state
//! transitions and reward bundle types are all plain functions and data so
//! they can be tested exhaustively without a database.

pub mod activity;
pub mod battle;
pub mod error;
pub mod leveling;
pub mod requirement;
pub mod reward;
pub mod types;
