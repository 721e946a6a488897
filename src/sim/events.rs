//! Events emitted by the simulation for audio and UI feedback.
//!
//! The step never talks to a sound device. It records what happened and the
//! collaborators decide what to play.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Something noteworthy that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A ball was launched from the paddle
    BallSent,
    /// A wind gust started
    WindActivated { angle: f32, target_velocity: f32 },
    /// The ricochet field started channelling
    RicochetStarted,
    /// The ricochet field fired, turning `converted` enemy shots around
    RicochetReleased { converted: usize },
    /// A ball bounced off a breakable block (once per step)
    WallHit,
    /// A ball bounced off an indestructible block (once per step)
    IndestructibleHit,
    /// A ball bounced off the paddle
    PaddleHit,
    /// A ball left the world
    BallDisappeared { pos: Vec2 },
    /// A block was destroyed
    EnemyDestroyed { pos: Vec2 },
    /// An enemy shot struck the paddle
    PlayerHit,
    LevelWon,
    LevelLost,
}

impl GameEvent {
    /// Impact cues are merged so a multi-ball frame plays one sound
    #[inline]
    pub fn is_impact(&self) -> bool {
        matches!(self, GameEvent::WallHit | GameEvent::IndestructibleHit)
    }
}

/// Push an event, collapsing repeated impact cues within one step
pub fn push_event(events: &mut Vec<GameEvent>, event: GameEvent) {
    if event.is_impact() && events.contains(&event) {
        return;
    }
    events.push(event);
}
