//! Read-only per-frame view handed to the render collaborator

use glam::Vec2;
use serde::Serialize;

use super::rect::Rect;
use super::state::{GamePhase, GameSession};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickView {
    pub rect: Rect,
    pub hp: u8,
}

/// Everything a renderer/HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub paddle: Rect,
    pub ball: BallView,
    /// Live bricks only, in grid order
    pub bricks: Vec<BrickView>,
    pub score: u64,
    pub lives: u8,
    pub round: u32,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl GameSession {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paddle: self.paddle.rect(),
            ball: BallView {
                center: self.ball.pos,
                radius: self.ball.radius,
            },
            bricks: self
                .grid
                .live()
                .map(|b| BrickView {
                    rect: b.rect,
                    hp: b.hp,
                })
                .collect(),
            score: self.score,
            lives: self.lives,
            round: self.round,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::settings::Settings;
    use crate::sim::state::{GamePhase, GameSession};

    #[test]
    fn test_snapshot_hides_destroyed_bricks() {
        let mut session = GameSession::new(Settings::default(), 3).unwrap();
        session.grid.bricks[0].destroyed = true;
        session.grid.bricks[0].hp = 0;

        let snap = session.snapshot();
        assert_eq!(snap.bricks.len(), 59);
        assert_eq!(snap.bricks[0].rect, session.grid.bricks[1].rect);
        assert_eq!(snap.paddle, session.paddle.rect());
        assert_eq!(snap.ball.radius, 8.0);
        assert_eq!(snap.phase, GamePhase::Playing);
    }

    #[test]
    fn test_snapshot_json_tags_phase() {
        let mut session = GameSession::new(Settings::default(), 3).unwrap();
        session.phase = GamePhase::Win;
        let json = session.snapshot().to_json().unwrap();
        assert!(json.contains("\"phase\":\"Win\""));
        assert!(json.contains("\"lives\":3"));
    }
}
