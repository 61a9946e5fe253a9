//! HUD snapshots and end-of-round stats

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::Vec3;

use super::player::{Player, PlayerSlot};
use super::r#match::{MatchPhase, MatchState};
use super::weapon::WeaponType;

/// Per-player view for one half of the split screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub slot: PlayerSlot,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub health: f32,
    pub dead: bool,
    /// Seconds until respawn while dead
    pub respawn_in: f32,
    pub invulnerable: bool,
    pub weapon: WeaponType,
    pub mag: u32,
    pub reserve: u32,
    pub reloading: bool,
    pub charge: f32,
    pub task_level: u8,
    pub controls_locked: bool,
}

impl PlayerSnapshot {
    fn from_player(p: &Player) -> Self {
        Self {
            slot: p.slot,
            position: p.position,
            yaw: p.yaw,
            pitch: p.pitch,
            health: p.health,
            dead: p.dead,
            respawn_in: if p.dead { p.death_timer.max(0.0) } else { 0.0 },
            invulnerable: p.invulnerable(),
            weapon: p.weapon.weapon,
            mag: p.weapon.mag,
            reserve: p.weapon.reserve,
            reloading: p.weapon.is_reloading(),
            charge: p.weapon.charge,
            task_level: p.task_level,
            controls_locked: p.controls_locked,
        }
    }
}

/// Everything the HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub frame: u64,
    pub phase: MatchPhase,
    pub scores: [u32; 2],
    /// Seconds left before the elevator doors start moving
    pub elevator_countdown: f32,
    pub door_open: f32,
    pub banner_visible: bool,
    pub winner: Option<PlayerSlot>,
    pub players: [PlayerSnapshot; 2],
}

/// Builds HUD snapshots at a fixed frame interval
pub struct SnapshotBuilder {
    frames_since_snapshot: u32,
    snapshot_interval: u32,
}

impl SnapshotBuilder {
    pub fn new(snapshot_interval: u32) -> Self {
        Self {
            frames_since_snapshot: 0,
            snapshot_interval: snapshot_interval.max(1),
        }
    }

    /// Check if it's time for a snapshot
    pub fn should_send(&mut self) -> bool {
        self.frames_since_snapshot += 1;
        if self.frames_since_snapshot >= self.snapshot_interval {
            self.frames_since_snapshot = 0;
            true
        } else {
            false
        }
    }

    /// Force a snapshot on the next check (phase changes, kills)
    pub fn force_next(&mut self) {
        self.frames_since_snapshot = self.snapshot_interval;
    }

    pub fn build(&self, state: &MatchState) -> MatchSnapshot {
        let [one, two] = &state.players;
        MatchSnapshot {
            frame: state.frame,
            phase: state.phase,
            scores: state.scores,
            elevator_countdown: state.elevator_countdown,
            door_open: state.door_open,
            banner_visible: state.banner_started && state.banner_timer > 0.0,
            winner: state.winner,
            players: [PlayerSnapshot::from_player(one), PlayerSnapshot::from_player(two)],
        }
    }
}

/// End-of-round summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStats {
    pub match_id: Uuid,
    /// Seconds of live combat
    pub duration_secs: f32,
    pub winner: Option<PlayerSlot>,
    pub player_stats: Vec<PlayerMatchStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub slot: PlayerSlot,
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub task_level: u8,
}
