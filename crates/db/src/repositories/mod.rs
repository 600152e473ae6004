//! Repository layer: unit structs with static async fns over `&PgPool`.
//!
//! Operations that must be atomic with other writes expose `_in_tx` variants
//! taking `&mut PgConnection` so services can compose them inside one
//! transaction.

pub mod achievement_repo;
pub mod activity_repo;
pub mod battle_repo;
pub mod boss_repo;
pub mod mascot_item_repo;
pub mod mascot_repo;
pub mod notification_repo;
pub mod user_achievement_repo;

pub use achievement_repo::AchievementRepo;
pub use activity_repo::ActivityRepo;
pub use battle_repo::BattleRepo;
pub use boss_repo::BossRepo;
pub use mascot_item_repo::MascotItemRepo;
pub use mascot_repo::MascotRepo;
pub use notification_repo::NotificationRepo;
pub use user_achievement_repo::UserAchievementRepo;
