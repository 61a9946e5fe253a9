//! Presentation and audio triggers emitted by the simulation
//!
//! Events are fire-and-forget: the renderer and audio layers react to them,
//! but nothing in the simulation waits on or depends on their handling.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::util::Vec3;
use crate::world::PropId;

use super::player::PlayerSlot;
use super::r#match::MatchPhase;
use super::weapon::WeaponType;

/// Why a player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KillCause {
    Weapon(WeaponType),
    Splash(WeaponType),
    Hazard,
}

/// Game events (shots, damage, kills, phase changes, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged {
        from: MatchPhase,
        to: MatchPhase,
    },

    /// Elevator doors began opening; show the "FIGHT" banner
    FightBanner,

    /// Gun fired (one per trigger pull)
    Muzzle {
        shooter: PlayerSlot,
        weapon: WeaponType,
        origin: Vec3,
        direction: Vec3,
    },

    /// Visible path of one ray (one per pellet)
    Tracer {
        shooter: PlayerSlot,
        weapon: WeaponType,
        from: Vec3,
        to: Vec3,
    },

    /// Melee swing; `connected` distinguishes a hit from a whiff
    MeleeSwing {
        attacker: PlayerSlot,
        weapon: WeaponType,
        connected: bool,
    },

    /// Pulled the trigger on an empty magazine
    DryFire {
        shooter: PlayerSlot,
        weapon: WeaponType,
    },

    Damage {
        attacker: Option<PlayerSlot>,
        target: PlayerSlot,
        amount: f32,
        position: Vec3,
    },

    Kill {
        killer: Option<PlayerSlot>,
        victim: PlayerSlot,
        cause: KillCause,
        first_blood: bool,
    },

    PropExploded {
        prop: PropId,
        position: Vec3,
    },

    ReloadStarted {
        player: PlayerSlot,
        weapon: WeaponType,
    },

    ReloadFinished {
        player: PlayerSlot,
        weapon: WeaponType,
    },

    WeaponEquipped {
        player: PlayerSlot,
        weapon: WeaponType,
    },

    /// Melee pickup broke after landing its hit
    PickupBroken {
        player: PlayerSlot,
        reverted_to: WeaponType,
    },

    Respawned {
        player: PlayerSlot,
        position: Vec3,
    },

    TaskOpened {
        player: PlayerSlot,
        task: u8,
    },

    TaskCompleted {
        player: PlayerSlot,
        task: u8,
        new_level: u8,
    },

    TaskClosed {
        player: PlayerSlot,
    },

    RoundWon {
        winner: PlayerSlot,
        scores: [u32; 2],
    },
}

/// Receiver for simulation events, injected into each step
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Adapter so a closure can receive events
pub struct FnSink<F: FnMut(GameEvent)>(pub F);

impl<F: FnMut(GameEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: GameEvent) {
        (self.0)(event);
    }
}

/// Logs every event at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: GameEvent) {
        debug!(?event, "game event");
    }
}
