//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application; the
//! engine publishes an [`EngineEvent`] for every externally-interesting
//! outcome so downstream consumers (delivery channels, live UI feeds) can
//! react without coupling to the engine's storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use edura_core::types::DbId;

// ---------------------------------------------------------------------------
// EngineEvent
// ---------------------------------------------------------------------------

/// An outcome produced by the progression engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// An achievement was granted for the first time.
    AchievementUnlocked {
        user_id: DbId,
        achievement_id: DbId,
        name: String,
        points: i32,
        unlocked_at: DateTime<Utc>,
    },
    /// A mascot gained one or more levels.
    LevelUp {
        user_id: DbId,
        level: i32,
        levels_gained: i32,
    },
    /// A boss battle ended in victory.
    BattleWon {
        user_id: DbId,
        battle_id: DbId,
        boss_id: DbId,
    },
    /// A boss battle was abandoned by its user.
    BattleAbandoned {
        user_id: DbId,
        battle_id: DbId,
        progress: i32,
    },
}

impl EngineEvent {
    /// The id of the user this event concerns.
    pub fn user_id(&self) -> DbId {
        match self {
            Self::AchievementUnlocked { user_id, .. }
            | Self::LevelUp { user_id, .. }
            | Self::BattleWon { user_id, .. }
            | Self::BattleAbandoned { user_id, .. } => *user_id,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`EngineEvent`].
pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// engine outcomes are already durable (grant rows, notifications)
    /// before they are published here.
    pub fn publish(&self, event: EngineEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
