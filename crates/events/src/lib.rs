//! In-process gamification event hub.
//!
//! - [`EventBus`] — publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`EngineEvent`] — the typed envelope for engine outcomes (grants,
//!   level-ups, battle results) consumed by surrounding systems.

pub mod bus;

pub use bus::{EngineEvent, EventBus};
