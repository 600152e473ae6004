pub mod achievements;
pub mod battles;
pub mod events;
pub mod mascot;
pub mod notification;
