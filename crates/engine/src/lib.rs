//! Orchestration services for the progression & gamification engine.
//!
//! Each service is a stateless unit struct whose operations take the pool
//! and caller identifiers explicitly; the pure rules live in `edura-core`
//! and the SQL in `edura-db`. This layer owns transaction boundaries and
//! the engine's failure semantics.

pub mod battle;
pub mod error;
pub mod granter;
pub mod mascot;
pub mod rewards;

pub use battle::{BattleProgressResult, BattleService};
pub use error::EngineError;
pub use granter::{AchievementGranter, GrantedAchievement};
pub use mascot::MascotService;
pub use rewards::RewardDistributor;
