//! Weapon model - stat table, ammo, reload, cooldown and charge

use serde::{Deserialize, Serialize};

/// Exponential smoothing rate for the precision weapon's charge (per second)
pub const CHARGE_RATE: f32 = 10.0;
/// Charge above which the precision weapon counts as zoomed
pub const ZOOMED_CHARGE: f32 = 0.5;

/// Every weapon a player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    /// Tier 0 melee
    Knife,
    /// Tier 1 sidearm
    Pistol,
    /// Tier 2 automatic rifle
    Rifle,
    /// Tier 3 precision rifle, hold to zoom and release to fire
    Sniper,
    /// Bonus: multi-pellet spread
    Shotgun,
    /// Bonus: direct hit plus splash
    Beam,
    /// Bonus: one-hit melee pickup that breaks on use
    Hammer,
}

impl WeaponType {
    /// Weapon unlocked by a task level (0..=3)
    pub fn for_tier(level: u8) -> Self {
        match level {
            0 => Self::Knife,
            1 => Self::Pistol,
            2 => Self::Rifle,
            _ => Self::Sniper,
        }
    }

    pub fn is_bonus(self) -> bool {
        matches!(self, Self::Shotgun | Self::Beam | Self::Hammer)
    }

    pub fn is_melee(self) -> bool {
        matches!(self, Self::Knife | Self::Hammer)
    }

    pub fn stats(self) -> &'static WeaponStats {
        WeaponStats::for_type(self)
    }
}

/// How trigger input turns into shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireMode {
    /// Fires every frame while held, limited by cooldown
    FullAuto,
    /// Fires once per discrete press
    PressToFire,
    /// Holding charges, releasing while aiming fires once
    ChargeRelease,
    /// Short-range swing on press
    MeleePress,
}

/// Distance-tiered damage (shotgun)
#[derive(Debug, Clone, Copy)]
pub struct DamageFalloff {
    pub near_range: f32,
    pub near_damage: f32,
    pub far_damage: f32,
}

/// Area damage around the impact point (beam)
#[derive(Debug, Clone, Copy)]
pub struct Splash {
    pub radius: f32,
    pub damage: f32,
}

/// Constant per-type weapon parameters
#[derive(Debug, Clone, Copy)]
pub struct WeaponStats {
    pub fire_mode: FireMode,
    /// Magazine capacity; `None` for melee
    pub magazine: Option<u32>,
    /// Reserve ammo granted on equip
    pub reserve: u32,
    /// Reload duration (seconds)
    pub reload_time: f32,
    /// Damage per hit
    pub damage: f32,
    /// Cooldown between shots or swings (seconds)
    pub cooldown: f32,
    /// Maximum ray distance
    pub range: f32,
    /// Rays per trigger pull
    pub pellets: u32,
    /// Max angular jitter per pellet (radians)
    pub spread: f32,
    pub falloff: Option<DamageFalloff>,
    pub splash: Option<Splash>,
    /// Movement speed multiplier while held
    pub move_speed_scale: f32,
}

const KNIFE: WeaponStats = WeaponStats {
    fire_mode: FireMode::MeleePress,
    magazine: None,
    reserve: 0,
    reload_time: 0.0,
    damage: 35.0,
    cooldown: 0.45,
    range: 2.0,
    pellets: 1,
    spread: 0.0,
    falloff: None,
    splash: None,
    move_speed_scale: 1.0,
};

const PISTOL: WeaponStats = WeaponStats {
    fire_mode: FireMode::PressToFire,
    magazine: Some(12),
    reserve: 48,
    reload_time: 1.2,
    damage: 25.0,
    cooldown: 0.2,
    range: 100.0,
    pellets: 1,
    spread: 0.0,
    falloff: None,
    splash: None,
    move_speed_scale: 1.0,
};

const RIFLE: WeaponStats = WeaponStats {
    fire_mode: FireMode::FullAuto,
    magazine: Some(30),
    reserve: 90,
    reload_time: 1.8,
    damage: 14.0,
    cooldown: 0.1,
    range: 100.0,
    pellets: 1,
    spread: 0.0,
    falloff: None,
    splash: None,
    move_speed_scale: 1.0,
};

const SNIPER: WeaponStats = WeaponStats {
    fire_mode: FireMode::ChargeRelease,
    magazine: Some(5),
    reserve: 15,
    reload_time: 2.5,
    damage: 100.0,
    cooldown: 1.0,
    range: 200.0,
    pellets: 1,
    spread: 0.0,
    falloff: None,
    splash: None,
    // applied only while zoomed
    move_speed_scale: 0.5,
};

const SHOTGUN: WeaponStats = WeaponStats {
    fire_mode: FireMode::PressToFire,
    magazine: Some(6),
    reserve: 24,
    reload_time: 2.0,
    damage: 70.0,
    cooldown: 0.8,
    range: 40.0,
    pellets: 8,
    spread: 0.08,
    falloff: Some(DamageFalloff {
        near_range: 8.0,
        near_damage: 70.0,
        far_damage: 30.0,
    }),
    splash: None,
    move_speed_scale: 1.0,
};

const BEAM: WeaponStats = WeaponStats {
    fire_mode: FireMode::PressToFire,
    magazine: Some(3),
    reserve: 6,
    reload_time: 2.2,
    damage: 60.0,
    cooldown: 0.8,
    range: 60.0,
    pellets: 1,
    spread: 0.0,
    falloff: None,
    splash: Some(Splash {
        radius: 3.5,
        damage: 30.0,
    }),
    move_speed_scale: 1.0,
};

const HAMMER: WeaponStats = WeaponStats {
    fire_mode: FireMode::MeleePress,
    magazine: None,
    reserve: 0,
    reload_time: 0.0,
    damage: 100.0,
    cooldown: 0.6,
    range: 2.5,
    pellets: 1,
    spread: 0.0,
    falloff: None,
    splash: None,
    move_speed_scale: 1.15,
};

impl WeaponStats {
    pub fn for_type(weapon: WeaponType) -> &'static WeaponStats {
        match weapon {
            WeaponType::Knife => &KNIFE,
            WeaponType::Pistol => &PISTOL,
            WeaponType::Rifle => &RIFLE,
            WeaponType::Sniper => &SNIPER,
            WeaponType::Shotgun => &SHOTGUN,
            WeaponType::Beam => &BEAM,
            WeaponType::Hammer => &HAMMER,
        }
    }

    /// Damage for a hit at `distance` (tiered for the shotgun)
    pub fn damage_at(&self, distance: f32) -> f32 {
        match self.falloff {
            Some(f) if distance <= f.near_range => f.near_damage,
            Some(f) => f.far_damage,
            None => self.damage,
        }
    }
}

/// Per-player weapon state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponState {
    pub weapon: WeaponType,
    pub mag: u32,
    pub reserve: u32,
    /// > 0 while reloading
    pub reload_timer: f32,
    /// > 0 while cooling down
    pub cooldown: f32,
    /// Precision weapon: charge input is held
    pub aiming: bool,
    /// Precision weapon zoom, 0..=1
    pub charge: f32,
}

impl WeaponState {
    pub fn new(weapon: WeaponType) -> Self {
        let mut state = Self {
            weapon,
            mag: 0,
            reserve: 0,
            reload_timer: 0.0,
            cooldown: 0.0,
            aiming: false,
            charge: 0.0,
        };
        state.set_weapon(weapon);
        state
    }

    pub fn stats(&self) -> &'static WeaponStats {
        self.weapon.stats()
    }

    /// Re-equip: always a complete reset to the type's defaults
    pub fn set_weapon(&mut self, weapon: WeaponType) {
        let stats = weapon.stats();
        self.weapon = weapon;
        self.mag = stats.magazine.unwrap_or(0);
        self.reserve = stats.reserve;
        self.reload_timer = 0.0;
        self.cooldown = 0.0;
        self.aiming = false;
        self.charge = 0.0;
    }

    pub fn uses_ammo(&self) -> bool {
        self.stats().magazine.is_some()
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_timer > 0.0
    }

    /// Magazine-fed and out of rounds
    pub fn is_empty(&self) -> bool {
        self.uses_ammo() && self.mag == 0
    }

    pub fn zoomed(&self) -> bool {
        self.weapon == WeaponType::Sniper && self.charge > ZOOMED_CHARGE
    }

    pub fn can_fire(&self) -> bool {
        if self.is_reloading() || self.cooldown > 0.0 {
            return false;
        }
        !self.is_empty()
    }

    /// Begin a timed reload. No-op (false) for melee, while reloading,
    /// with a full magazine, or with an empty reserve.
    pub fn start_reload(&mut self) -> bool {
        let max = match self.stats().magazine {
            Some(max) => max,
            None => return false,
        };
        if self.is_reloading() || self.mag >= max || self.reserve == 0 {
            return false;
        }
        self.reload_timer = self.stats().reload_time;
        // Reloading drops the zoom
        self.aiming = false;
        true
    }

    /// Advance timers. Returns true when a reload completed this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.cooldown = (self.cooldown - dt).max(0.0);

        let target = if self.aiming { 1.0 } else { 0.0 };
        self.charge += (target - self.charge) * (1.0 - (-CHARGE_RATE * dt).exp());
        self.charge = self.charge.clamp(0.0, 1.0);

        if self.reload_timer > 0.0 {
            self.reload_timer -= dt;
            if self.reload_timer <= 0.0 {
                self.reload_timer = 0.0;
                let max = self.stats().magazine.unwrap_or(0);
                let moved = self.reserve.min(max.saturating_sub(self.mag));
                self.mag += moved;
                self.reserve -= moved;
                return true;
            }
        }
        false
    }

    /// Spend one shot: magazine minus one (melee has none) and start the cooldown
    pub fn consume_shot(&mut self) {
        if self.uses_ammo() {
            self.mag = self.mag.saturating_sub(1);
        }
        self.cooldown = self.stats().cooldown;
    }

    /// Drop the precision charge after a release
    pub fn reset_charge(&mut self) {
        self.aiming = false;
        self.charge = 0.0;
    }
}
