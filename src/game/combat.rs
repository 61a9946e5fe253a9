//! Combat system - trigger handling, raycast hits, damage and kills

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::util::Vec3;
use crate::world::{HazardVolume, RayTarget, World};

use super::events::{EventSink, GameEvent, KillCause};
use super::input::ButtonState;
use super::physics::aim_vector;
use super::player::{DamageResult, Player, PlayerSlot};
use super::weapon::{FireMode, WeaponState, WeaponType};

/// What a traced ray ended on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotTarget {
    /// The opposing player's hit-volume
    Player,
    Prop(crate::world::PropId),
    Geometry,
    /// Nothing within range
    Miss,
}

/// Nearest impact along one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub point: Vec3,
    pub distance: f32,
    pub target: ShotTarget,
}

/// A death caused this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillRecord {
    pub killer: Option<PlayerSlot>,
    pub victim: PlayerSlot,
    pub cause: KillCause,
}

/// Result of one fire attempt
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FireOutcome {
    /// A shot was consumed
    pub fired: bool,
    /// Damage landed on the opponent
    pub hit: bool,
    /// An empty magazine triggered an automatic reload
    pub reload_started: bool,
    pub kill: Option<KillRecord>,
}

/// Combat system for trigger routing and hit resolution
pub struct CombatSystem;

impl CombatSystem {
    /// Turn this frame's trigger state into a fire request for the held weapon.
    /// Updates the precision weapon's aim flag as a side effect.
    pub fn trigger_requested(weapon: &mut WeaponState, fire: ButtonState) -> bool {
        match weapon.stats().fire_mode {
            FireMode::FullAuto => fire.down,
            FireMode::PressToFire | FireMode::MeleePress => fire.pressed,
            FireMode::ChargeRelease => {
                if fire.pressed && !weapon.is_reloading() {
                    weapon.aiming = true;
                }
                if fire.released && weapon.aiming {
                    // Strict press -> hold -> release; the charge is spent either way
                    weapon.reset_charge();
                    return true;
                }
                false
            }
        }
    }

    /// Trace a ray against the world and, if alive, the opposing player's hit-volume
    pub fn trace(
        origin: Vec3,
        direction: Vec3,
        range: f32,
        target: Option<&Player>,
        world: &dyn World,
    ) -> Impact {
        let mut impact = Impact {
            point: origin + direction * range,
            distance: range,
            target: ShotTarget::Miss,
        };

        if let Some(hit) = world.cast_ray(origin, direction, range) {
            impact = Impact {
                point: hit.point,
                distance: hit.distance,
                target: match hit.target {
                    RayTarget::Prop(id) => ShotTarget::Prop(id),
                    RayTarget::Geometry(_) => ShotTarget::Geometry,
                },
            };
        }

        if let Some(player) = target.filter(|p| p.alive()) {
            if let Some(t) = player.hit_volume().ray_distance(origin, direction, range) {
                if t < impact.distance {
                    impact = Impact {
                        point: origin + direction * t,
                        distance: t,
                        target: ShotTarget::Player,
                    };
                }
            }
        }

        impact
    }

    /// Fire the shooter's weapon once. Handles auto-reload on an empty
    /// magazine, consumes exactly one shot, resolves hits per weapon type.
    pub fn fire(
        shooter_slot: PlayerSlot,
        players: &mut [Player; 2],
        world: &mut dyn World,
        rng: &mut ChaCha8Rng,
        sink: &mut dyn EventSink,
    ) -> FireOutcome {
        let (shooter, target) = split_pair(players, shooter_slot);
        let mut outcome = FireOutcome::default();

        if !shooter.can_act() {
            return outcome;
        }

        if !shooter.weapon.can_fire() {
            if shooter.weapon.is_empty() && !shooter.weapon.is_reloading() {
                let weapon = shooter.weapon.weapon;
                if shooter.weapon.start_reload() {
                    outcome.reload_started = true;
                    sink.emit(GameEvent::ReloadStarted {
                        player: shooter_slot,
                        weapon,
                    });
                } else {
                    sink.emit(GameEvent::DryFire {
                        shooter: shooter_slot,
                        weapon,
                    });
                }
            }
            return outcome;
        }

        let weapon = shooter.weapon.weapon;
        let stats = weapon.stats();
        shooter.weapon.consume_shot();
        shooter.stats.shots_fired += 1;
        outcome.fired = true;

        let origin = shooter.eye_position();
        let direction = aim_vector(shooter.yaw, shooter.pitch);

        if stats.fire_mode != FireMode::MeleePress {
            sink.emit(GameEvent::Muzzle {
                shooter: shooter_slot,
                weapon,
                origin,
                direction,
            });
        }

        let (damage, impact_point) = if stats.pellets > 1 {
            Self::resolve_spread(shooter_slot, origin, direction, target, world, rng, sink)
        } else {
            let impact = Self::trace(origin, direction, stats.range, Some(&*target), &*world);
            if stats.fire_mode == FireMode::MeleePress {
                sink.emit(GameEvent::MeleeSwing {
                    attacker: shooter_slot,
                    weapon,
                    connected: impact.target == ShotTarget::Player,
                });
            } else {
                sink.emit(GameEvent::Tracer {
                    shooter: shooter_slot,
                    weapon,
                    from: origin,
                    to: impact.point,
                });
            }
            if let ShotTarget::Prop(prop) = impact.target {
                detonate(world, prop, sink);
            }
            let damage = (impact.target == ShotTarget::Player)
                .then(|| (stats.damage_at(impact.distance), impact.point));
            (damage, impact.point)
        };

        if let Some((amount, point)) = damage {
            let result = apply_damage(shooter, target, amount, point, sink);
            if result != DamageResult::Ignored {
                outcome.hit = true;
            }
            if result.killed() {
                outcome.kill = Some(KillRecord {
                    killer: Some(shooter_slot),
                    victim: target.slot,
                    cause: KillCause::Weapon(weapon),
                });
            }
        }

        // Splash lands wherever the beam stopped, hit or miss
        if let Some(splash) = stats.splash {
            if target.alive() && target.center().distance(impact_point) <= splash.radius {
                let result = apply_damage(shooter, target, splash.damage, impact_point, sink);
                if result != DamageResult::Ignored {
                    outcome.hit = true;
                }
                if result.killed() && outcome.kill.is_none() {
                    outcome.kill = Some(KillRecord {
                        killer: Some(shooter_slot),
                        victim: target.slot,
                        cause: KillCause::Splash(weapon),
                    });
                }
            }
        }

        if outcome.hit {
            shooter.stats.shots_hit += 1;
            if weapon == WeaponType::Hammer {
                let reverted_to = shooter.break_pickup();
                sink.emit(GameEvent::PickupBroken {
                    player: shooter_slot,
                    reverted_to,
                });
            }
        }

        outcome
    }

    /// Multi-pellet spread: each pellet jittered independently; the target is
    /// hit if any pellet reaches it, with damage tiered by the closest pellet.
    fn resolve_spread(
        shooter_slot: PlayerSlot,
        origin: Vec3,
        direction: Vec3,
        target: &Player,
        world: &mut dyn World,
        rng: &mut ChaCha8Rng,
        sink: &mut dyn EventSink,
    ) -> (Option<(f32, Vec3)>, Vec3) {
        let weapon = WeaponType::Shotgun;
        let stats = weapon.stats();
        let base_yaw = (-direction.x).atan2(-direction.z);
        let base_pitch = direction.y.clamp(-1.0, 1.0).asin();

        let mut nearest: Option<Impact> = None;
        let mut last_point = origin + direction * stats.range;

        for _ in 0..stats.pellets {
            let yaw = base_yaw + rng.gen_range(-stats.spread..=stats.spread);
            let pitch = base_pitch + rng.gen_range(-stats.spread..=stats.spread);
            let dir = aim_vector(yaw, pitch);
            let impact = Self::trace(origin, dir, stats.range, Some(target), &*world);

            sink.emit(GameEvent::Tracer {
                shooter: shooter_slot,
                weapon,
                from: origin,
                to: impact.point,
            });
            last_point = impact.point;

            match impact.target {
                ShotTarget::Player => {
                    if nearest.map_or(true, |n| impact.distance < n.distance) {
                        nearest = Some(impact);
                    }
                }
                ShotTarget::Prop(prop) => detonate(world, prop, sink),
                ShotTarget::Geometry | ShotTarget::Miss => {}
            }
        }

        match nearest {
            Some(hit) => (Some((stats.damage_at(hit.distance), hit.point)), hit.point),
            None => (None, last_point),
        }
    }

    /// Damage every living player standing in a hazard volume
    pub fn apply_hazards(
        players: &mut [Player; 2],
        hazards: &[HazardVolume],
        dt: f32,
        sink: &mut dyn EventSink,
    ) -> Vec<KillRecord> {
        let mut kills = Vec::new();
        if dt <= 0.0 {
            return kills;
        }

        for player in players.iter_mut() {
            for hazard in hazards {
                if !player.alive() || hazard.damage_per_second <= 0.0 {
                    continue;
                }
                if !hazard.aabb.intersects(&player.body_aabb()) {
                    continue;
                }
                let amount = hazard.damage_per_second * dt;
                let result = player.take_damage(amount);
                if result == DamageResult::Ignored {
                    continue;
                }
                sink.emit(GameEvent::Damage {
                    attacker: None,
                    target: player.slot,
                    amount,
                    position: player.center(),
                });
                if result.killed() {
                    kills.push(KillRecord {
                        killer: None,
                        victim: player.slot,
                        cause: KillCause::Hazard,
                    });
                }
            }
        }
        kills
    }
}

/// Mutable (shooter, opponent) pair
pub fn split_pair(players: &mut [Player; 2], slot: PlayerSlot) -> (&mut Player, &mut Player) {
    let [one, two] = players;
    match slot {
        PlayerSlot::One => (one, two),
        PlayerSlot::Two => (two, one),
    }
}

fn apply_damage(
    attacker: &mut Player,
    target: &mut Player,
    amount: f32,
    point: Vec3,
    sink: &mut dyn EventSink,
) -> DamageResult {
    let result = target.take_damage(amount);
    if result != DamageResult::Ignored {
        attacker.stats.damage_dealt += amount;
        sink.emit(GameEvent::Damage {
            attacker: Some(attacker.slot),
            target: target.slot,
            amount,
            position: point,
        });
    }
    if result.killed() {
        attacker.stats.kills += 1;
    }
    result
}

fn detonate(world: &mut dyn World, prop: crate::world::PropId, sink: &mut dyn EventSink) {
    if let Some(position) = world.trigger_prop_explosion(prop) {
        sink.emit(GameEvent::PropExploded { prop, position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ArenaWorld;
    use rand::SeedableRng;

    fn facing_pair(distance: f32) -> [Player; 2] {
        // One at the origin facing -Z, Two straight ahead facing back
        let mut a = Player::new(PlayerSlot::One, Vec3::ZERO, 0.0);
        let mut b = Player::new(PlayerSlot::Two, Vec3::new(0.0, 0.0, -distance), std::f32::consts::PI);
        a.invulnerable_timer = 0.0;
        b.invulnerable_timer = 0.0;
        [a, b]
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn pressed() -> ButtonState {
        ButtonState {
            down: true,
            pressed: true,
            released: false,
        }
    }

    #[test]
    fn pistol_hit_damages_opponent() {
        let mut players = facing_pair(10.0);
        players[0].equip(WeaponType::Pistol);
        let mut world = ArenaWorld::empty();
        let mut events = Vec::new();

        let out = CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut events);
        assert!(out.fired && out.hit);
        assert_eq!(players[1].health, 75.0);
        assert_eq!(players[0].weapon.mag, 11);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Muzzle { .. })));
    }

    #[test]
    fn miss_still_consumes_a_shot() {
        let mut players = facing_pair(10.0);
        players[0].equip(WeaponType::Pistol);
        players[0].yaw = std::f32::consts::FRAC_PI_2;
        let mut world = ArenaWorld::empty();
        let out = CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut Vec::new());
        assert!(out.fired && !out.hit);
        assert_eq!(players[0].weapon.mag, 11);
        assert!(players[0].weapon.cooldown > 0.0);
    }

    #[test]
    fn empty_magazine_reloads_instead_of_firing() {
        let mut players = facing_pair(10.0);
        players[0].equip(WeaponType::Pistol);
        players[0].weapon.mag = 0;
        let reserve = players[0].weapon.reserve;
        let mut world = ArenaWorld::empty();

        let out = CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut Vec::new());
        assert!(!out.fired);
        assert!(out.reload_started);
        assert_eq!(players[1].health, 100.0);
        assert_eq!(players[0].stats.shots_fired, 0);

        players[0].weapon.tick(WeaponType::Pistol.stats().reload_time + 0.01);
        assert_eq!(players[0].weapon.mag, reserve.min(12));
    }

    #[test]
    fn walls_block_shots() {
        let mut players = facing_pair(10.0);
        players[0].equip(WeaponType::Rifle);
        let mut world = ArenaWorld::empty();
        world.add_collider(
            crate::util::Aabb::new(Vec3::new(-2.0, 0.0, -5.5), Vec3::new(2.0, 3.0, -4.5)),
            crate::world::ColliderTag::Wall,
        );
        let out = CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut Vec::new());
        assert!(out.fired && !out.hit);
        assert_eq!(players[1].health, 100.0);
    }

    #[test]
    fn dead_target_is_not_a_ray_target() {
        let mut players = facing_pair(10.0);
        players[1].take_damage(1000.0);
        let impact = CombatSystem::trace(
            players[0].eye_position(),
            aim_vector(0.0, 0.0),
            100.0,
            Some(&players[1]),
            &ArenaWorld::empty(),
        );
        assert_eq!(impact.target, ShotTarget::Miss);
        assert!((impact.distance - 100.0).abs() < 1e-4);
    }

    #[test]
    fn knife_only_reaches_short_range() {
        let mut players = facing_pair(5.0);
        let mut world = ArenaWorld::empty();
        let mut events = Vec::new();
        let out = CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut events);
        assert!(out.fired && !out.hit);
        assert!(events.contains(&GameEvent::MeleeSwing {
            attacker: PlayerSlot::One,
            weapon: WeaponType::Knife,
            connected: false,
        }));
        assert!(players[0].weapon.cooldown > 0.0);

        let mut players = facing_pair(1.5);
        let out = CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut Vec::new());
        assert!(out.hit);
        assert_eq!(players[1].health, 65.0);
    }

    #[test]
    fn hammer_breaks_after_one_hit() {
        let mut players = facing_pair(1.5);
        players[0].task_level = 1;
        players[0].equip(WeaponType::Pistol);
        players[0].grant_bonus(WeaponType::Hammer);
        let mut world = ArenaWorld::empty();
        let mut events = Vec::new();

        let out = CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut events);
        assert!(out.kill.is_some());
        assert_eq!(players[0].weapon.weapon, WeaponType::Pistol);
        assert!(events.iter().any(|e| matches!(e, GameEvent::PickupBroken { .. })));
    }

    #[test]
    fn hammer_whiff_keeps_the_pickup() {
        let mut players = facing_pair(6.0);
        players[0].grant_bonus(WeaponType::Hammer);
        let mut world = ArenaWorld::empty();
        CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut Vec::new());
        assert_eq!(players[0].weapon.weapon, WeaponType::Hammer);
    }

    #[test]
    fn shotgun_damage_depends_on_range() {
        let mut world = ArenaWorld::empty();

        // Aim slightly down so vertical jitter stays on the body
        let mut near = facing_pair(4.0);
        near[0].grant_bonus(WeaponType::Shotgun);
        near[0].pitch = -0.08;
        let out = CombatSystem::fire(PlayerSlot::One, &mut near, &mut world, &mut rng(), &mut Vec::new());
        assert!(out.hit);
        assert_eq!(near[1].health, 30.0);

        let mut far = facing_pair(9.0);
        far[0].grant_bonus(WeaponType::Shotgun);
        far[0].pitch = -0.08;
        let out = CombatSystem::fire(PlayerSlot::One, &mut far, &mut world, &mut rng(), &mut Vec::new());
        assert!(out.hit);
        assert_eq!(far[1].health, 70.0);
        assert_eq!(far[0].weapon.mag, 5);
    }

    #[test]
    fn shotgun_emits_a_tracer_per_pellet() {
        let mut players = facing_pair(4.0);
        players[0].grant_bonus(WeaponType::Shotgun);
        let mut events = Vec::new();
        CombatSystem::fire(PlayerSlot::One, &mut players, &mut ArenaWorld::empty(), &mut rng(), &mut events);
        let tracers = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Tracer { .. }))
            .count();
        assert_eq!(tracers, WeaponType::Shotgun.stats().pellets as usize);
    }

    #[test]
    fn beam_splash_applies_on_a_near_miss() {
        let mut players = facing_pair(10.0);
        players[0].grant_bonus(WeaponType::Beam);
        // Wall right in front of the target stops the beam
        let mut world = ArenaWorld::empty();
        world.add_collider(
            crate::util::Aabb::new(Vec3::new(-2.0, 0.0, -9.0), Vec3::new(2.0, 3.0, -8.5)),
            crate::world::ColliderTag::Wall,
        );
        let out = CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut Vec::new());
        assert!(out.hit);
        assert_eq!(players[1].health, 70.0);
    }

    #[test]
    fn beam_direct_hit_adds_splash() {
        let mut players = facing_pair(10.0);
        players[0].grant_bonus(WeaponType::Beam);
        let out = CombatSystem::fire(
            PlayerSlot::One,
            &mut players,
            &mut ArenaWorld::empty(),
            &mut rng(),
            &mut Vec::new(),
        );
        assert!(out.kill.is_none());
        assert_eq!(players[1].health, 10.0);
    }

    #[test]
    fn precision_fires_on_release_only() {
        let mut weapon = WeaponState::new(WeaponType::Sniper);
        assert!(!CombatSystem::trigger_requested(&mut weapon, pressed()));
        assert!(weapon.aiming);
        let held = ButtonState {
            down: true,
            pressed: false,
            released: false,
        };
        assert!(!CombatSystem::trigger_requested(&mut weapon, held));
        weapon.tick(0.05);
        assert!(weapon.charge > 0.0 && weapon.charge < 1.0);

        let release = ButtonState {
            down: false,
            pressed: false,
            released: true,
        };
        assert!(CombatSystem::trigger_requested(&mut weapon, release));
        assert!(!weapon.aiming);
        assert_eq!(weapon.charge, 0.0);
        // A stray release without a prior press does nothing
        assert!(!CombatSystem::trigger_requested(&mut weapon, release));
    }

    #[test]
    fn auto_fires_while_held_and_pistol_on_press() {
        let held = ButtonState {
            down: true,
            pressed: false,
            released: false,
        };
        let mut rifle = WeaponState::new(WeaponType::Rifle);
        assert!(CombatSystem::trigger_requested(&mut rifle, held));
        let mut pistol = WeaponState::new(WeaponType::Pistol);
        assert!(!CombatSystem::trigger_requested(&mut pistol, held));
        assert!(CombatSystem::trigger_requested(&mut pistol, pressed()));
    }

    #[test]
    fn shooting_a_prop_detonates_it_once() {
        let mut players = facing_pair(30.0);
        players[0].equip(WeaponType::Pistol);
        players[0].pitch = -0.2;
        let mut world = ArenaWorld::empty();
        let prop = world.add_prop(Vec3::new(0.0, 0.0, -5.0));
        let mut events = Vec::new();

        CombatSystem::fire(PlayerSlot::One, &mut players, &mut world, &mut rng(), &mut events);
        assert!(world.is_prop_exploded(prop));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::PropExploded { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn hazards_hurt_occupants() {
        let mut players = facing_pair(10.0);
        let hazard = HazardVolume {
            aabb: crate::util::Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0)),
            damage_per_second: 20.0,
        };
        let kills = CombatSystem::apply_hazards(&mut players, &[hazard], 0.5, &mut Vec::new());
        assert!(kills.is_empty());
        assert_eq!(players[0].health, 90.0);
        assert_eq!(players[1].health, 100.0);

        let kills = CombatSystem::apply_hazards(&mut players, &[hazard], 10.0, &mut Vec::new());
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].killer, None);
        assert_eq!(kills[0].victim, PlayerSlot::One);
    }
}
