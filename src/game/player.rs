//! Player entity - kinematic state, health lifecycle, loadout

use serde::{Deserialize, Serialize};

use crate::util::{Aabb, Vec3};

use super::input::ControlScheme;
use super::weapon::{WeaponState, WeaponType};

pub const MAX_HEALTH: f32 = 100.0;
/// Seconds of blackout before a dead player respawns
pub const DEATH_BLACKOUT: f32 = 3.0;
/// Seconds of damage immunity after a respawn
pub const SPAWN_INVULNERABILITY: f32 = 2.0;
pub const MAX_PITCH: f32 = 1.35;
pub const MAX_TASK_LEVEL: u8 = 3;

/// Movement capsule
pub const PLAYER_RADIUS: f32 = 0.35;
pub const PLAYER_HEIGHT: f32 = 1.8;
pub const EYE_HEIGHT: f32 = 1.6;
/// Hit-volume half width (slightly wider than the movement capsule)
pub const HIT_HALF_WIDTH: f32 = 0.45;

/// One of the two seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Player one owns the pointer device, player two the keys-only scheme
    pub fn scheme(self) -> ControlScheme {
        match self {
            Self::One => ControlScheme::Pointer,
            Self::Two => ControlScheme::Keys,
        }
    }
}

/// Outcome of a damage application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Target dead or invulnerable; nothing changed
    Ignored,
    Wounded,
    /// Health crossed zero on this call
    Killed,
}

impl DamageResult {
    pub fn killed(self) -> bool {
        self == Self::Killed
    }
}

/// Running per-player counters for the end-of-round summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub kills: u32,
    pub deaths: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
}

/// Authoritative player state
#[derive(Debug, Clone)]
pub struct Player {
    pub slot: PlayerSlot,

    // Position and movement (position is the feet)
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
    /// A task UI owns this player's input
    pub controls_locked: bool,

    // Combat
    pub health: f32,
    pub dead: bool,
    pub death_timer: f32,
    pub invulnerable_timer: f32,
    pub weapon: WeaponState,
    /// Bonus weapon overriding the tier weapon until the next death
    pub bonus: Option<WeaponType>,
    /// Weapon to fall back to when a melee pickup breaks
    pub pre_pickup_weapon: Option<WeaponType>,

    // Progression
    pub task_level: u8,

    pub stats: PlayerStats,
}

impl Player {
    pub fn new(slot: PlayerSlot, position: Vec3, yaw: f32) -> Self {
        Self {
            slot,
            position,
            velocity: Vec3::ZERO,
            yaw,
            pitch: 0.0,
            on_ground: true,
            controls_locked: false,
            health: MAX_HEALTH,
            dead: false,
            death_timer: 0.0,
            invulnerable_timer: 0.0,
            weapon: WeaponState::new(WeaponType::for_tier(0)),
            bonus: None,
            pre_pickup_weapon: None,
            task_level: 0,
            stats: PlayerStats::default(),
        }
    }

    pub fn alive(&self) -> bool {
        !self.dead
    }

    pub fn invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    /// Controls are live: alive and no task UI open
    pub fn can_act(&self) -> bool {
        !self.dead && !self.controls_locked
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, EYE_HEIGHT, 0.0)
    }

    /// Body center, used for splash and spawn distance
    pub fn center(&self) -> Vec3 {
        self.position + Vec3::new(0.0, PLAYER_HEIGHT * 0.5, 0.0)
    }

    /// Movement bounds from the capsule radius and height
    pub fn body_aabb(&self) -> Aabb {
        Aabb::new(
            Vec3::new(
                self.position.x - PLAYER_RADIUS,
                self.position.y,
                self.position.z - PLAYER_RADIUS,
            ),
            Vec3::new(
                self.position.x + PLAYER_RADIUS,
                self.position.y + PLAYER_HEIGHT,
                self.position.z + PLAYER_RADIUS,
            ),
        )
    }

    /// Invisible proxy that rays target
    pub fn hit_volume(&self) -> Aabb {
        Aabb::new(
            Vec3::new(
                self.position.x - HIT_HALF_WIDTH,
                self.position.y,
                self.position.z - HIT_HALF_WIDTH,
            ),
            Vec3::new(
                self.position.x + HIT_HALF_WIDTH,
                self.position.y + PLAYER_HEIGHT,
                self.position.z + HIT_HALF_WIDTH,
            ),
        )
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Apply damage. Ignored while invulnerable or dead; health clamps at zero
    /// and the kill is reported exactly once.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        if self.dead || self.invulnerable() {
            return DamageResult::Ignored;
        }
        let amount = amount.max(0.0);
        self.health = (self.health - amount).max(0.0);
        self.stats.damage_taken += amount;

        if self.health <= 0.0 {
            self.die();
            DamageResult::Killed
        } else {
            DamageResult::Wounded
        }
    }

    fn die(&mut self) {
        self.dead = true;
        self.health = 0.0;
        self.death_timer = DEATH_BLACKOUT;
        self.velocity = Vec3::ZERO;
        self.bonus = None;
        self.pre_pickup_weapon = None;
        self.weapon.reset_charge();
        self.stats.deaths += 1;
    }

    /// Reposition in place: zero velocity, full health, start invulnerability
    pub fn respawn_at(&mut self, position: Vec3, yaw: f32) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.yaw = yaw;
        self.pitch = 0.0;
        self.on_ground = true;
        self.health = MAX_HEALTH;
        self.dead = false;
        self.death_timer = 0.0;
        self.invulnerable_timer = SPAWN_INVULNERABILITY;
    }

    /// Weapon the player should carry right now: bonus first, then tier
    pub fn loadout(&self) -> WeaponType {
        self.bonus
            .unwrap_or_else(|| WeaponType::for_tier(self.task_level))
    }

    pub fn equip(&mut self, weapon: WeaponType) {
        self.weapon.set_weapon(weapon);
    }

    /// Grant a bonus weapon. A melee pickup remembers what to revert to.
    pub fn grant_bonus(&mut self, weapon: WeaponType) {
        if weapon == WeaponType::Hammer {
            if self.weapon.weapon != WeaponType::Hammer {
                self.pre_pickup_weapon = Some(self.weapon.weapon);
            }
        } else {
            self.pre_pickup_weapon = None;
        }
        self.bonus = Some(weapon);
        self.equip(weapon);
    }

    /// A melee pickup broke on use: go back to the previous weapon
    pub fn break_pickup(&mut self) -> WeaponType {
        let previous = self
            .pre_pickup_weapon
            .take()
            .unwrap_or_else(|| WeaponType::for_tier(self.task_level));
        self.bonus = if previous.is_bonus() { Some(previous) } else { None };
        self.equip(previous);
        previous
    }

    /// Tick the blackout and invulnerability timers
    pub fn tick_timers(&mut self, dt: f32) {
        self.invulnerable_timer = (self.invulnerable_timer - dt).max(0.0);
        if self.dead {
            self.death_timer = (self.death_timer - dt).max(0.0);
        }
    }

    pub fn ready_to_respawn(&self) -> bool {
        self.dead && self.death_timer <= 0.0
    }

    /// Full per-round reset at a neutral spot
    pub fn reset_for_round(&mut self, position: Vec3, yaw: f32) {
        self.respawn_at(position, yaw);
        self.invulnerable_timer = 0.0;
        self.controls_locked = false;
        self.task_level = 0;
        self.bonus = None;
        self.pre_pickup_weapon = None;
        self.equip(WeaponType::for_tier(0));
        self.stats = PlayerStats::default();
    }
}
