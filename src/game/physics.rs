//! Player look, movement integration and collider push-out

use crate::util::{horizontal_length, Vec3};
use crate::world::Collider;

use super::input::PlayerIntent;
use super::player::Player;
use super::weapon::WeaponType;

/// Acceleration toward the input direction (units/s²)
pub const MOVE_ACCELERATION: f32 = 24.0;
/// Horizontal velocity decays by exp(-MOVE_DAMPING * dt) each frame
pub const MOVE_DAMPING: f32 = 10.0;
/// Horizontal speed cap before weapon modifiers
pub const MAX_MOVE_SPEED: f32 = 2.0;
pub const GRAVITY: f32 = 20.0;
pub const JUMP_IMPULSE: f32 = 6.5;
pub const GROUND_HEIGHT: f32 = 0.0;
/// Extra separation left after a push-out so faces do not re-touch
pub const COLLISION_SKIN: f32 = 1e-4;

/// Forward (camera-facing) direction on the ground plane. Zero yaw faces -Z.
pub fn forward_vector(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Right-hand direction on the ground plane
pub fn right_vector(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Unit aim vector from yaw/pitch. Zero yaw faces -Z.
pub fn aim_vector(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

/// Speed cap for the held weapon
pub fn speed_cap(player: &Player) -> f32 {
    let weapon = &player.weapon;
    let scale = match weapon.weapon {
        WeaponType::Sniper if weapon.zoomed() => weapon.stats().move_speed_scale,
        WeaponType::Hammer => weapon.stats().move_speed_scale,
        _ => 1.0,
    };
    MAX_MOVE_SPEED * scale
}

/// Movement and collision for players
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Apply look deltas; pitch is always clamped
    pub fn apply_look(player: &mut Player, intent: &PlayerIntent) {
        if !player.can_act() {
            return;
        }
        player.yaw = (player.yaw + intent.look_yaw).rem_euclid(std::f32::consts::TAU);
        player.set_pitch(player.pitch + intent.look_pitch);
    }

    /// Accelerate, damp, clamp and integrate one frame
    pub fn apply_movement(player: &mut Player, intent: &PlayerIntent, can_jump: bool, dt: f32) {
        if !player.can_act() {
            return;
        }

        // Normalized local direction rotated into world space
        let strafe = intent.strafe.clamp(-1.0, 1.0);
        let forward = intent.forward.clamp(-1.0, 1.0);
        let wish = (right_vector(player.yaw) * strafe + forward_vector(player.yaw) * forward)
            .normalize_or_zero();

        player.velocity.x += wish.x * MOVE_ACCELERATION * dt;
        player.velocity.z += wish.z * MOVE_ACCELERATION * dt;

        let damping = (-MOVE_DAMPING * dt).exp();
        player.velocity.x *= damping;
        player.velocity.z *= damping;

        let cap = speed_cap(player);
        let speed = horizontal_length(player.velocity);
        if speed > cap {
            let scale = cap / speed;
            player.velocity.x *= scale;
            player.velocity.z *= scale;
        }

        // Vertical
        if can_jump && intent.jump && player.on_ground {
            player.velocity.y = JUMP_IMPULSE;
            player.on_ground = false;
        }
        player.velocity.y -= GRAVITY * dt;

        player.position += player.velocity * dt;

        if player.position.y <= GROUND_HEIGHT {
            player.position.y = GROUND_HEIGHT;
            player.velocity.y = 0.0;
            player.on_ground = true;
        } else {
            player.on_ground = false;
        }
    }

    /// Push the player out of every enabled collider, one at a time in
    /// provider order. Resolves along the smaller of the X/Z penetrations.
    pub fn resolve_collisions(player: &mut Player, colliders: &[Collider]) {
        for collider in colliders {
            if collider.disabled {
                continue;
            }
            Self::resolve_against(player, collider);
        }
    }

    /// Resolve against a single collider. Returns true if the player was moved.
    pub fn resolve_against(player: &mut Player, collider: &Collider) -> bool {
        let body = player.body_aabb();
        if !body.intersects(&collider.aabb) {
            return false;
        }
        let b = &collider.aabb;

        // Signed push needed on each axis to leave the box
        let push_left = b.min.x - body.max.x - COLLISION_SKIN;
        let push_right = b.max.x - body.min.x + COLLISION_SKIN;
        let push_x = if push_left.abs() < push_right.abs() {
            push_left
        } else {
            push_right
        };

        let push_back = b.min.z - body.max.z - COLLISION_SKIN;
        let push_front = b.max.z - body.min.z + COLLISION_SKIN;
        let push_z = if push_back.abs() < push_front.abs() {
            push_back
        } else {
            push_front
        };

        if push_x.abs() < push_z.abs() {
            player.position.x += push_x;
            player.velocity.x = 0.0;
        } else {
            player.position.z += push_z;
            player.velocity.z = 0.0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::PlayerSlot;
    use crate::util::Aabb;
    use crate::world::ColliderTag;

    fn player_at(x: f32, z: f32) -> Player {
        Player::new(PlayerSlot::One, Vec3::new(x, 0.0, z), 0.0)
    }

    fn wall(min: Vec3, max: Vec3) -> Collider {
        Collider {
            id: 0,
            aabb: Aabb::new(min, max),
            tag: ColliderTag::Wall,
            disabled: false,
        }
    }

    #[test]
    fn zero_yaw_faces_negative_z() {
        let f = forward_vector(0.0);
        assert!((f.z + 1.0).abs() < 1e-6);
        let a = aim_vector(0.0, 0.0);
        assert!((a.z + 1.0).abs() < 1e-6);
        let r = right_vector(0.0);
        assert!((r.x - 1.0).abs() < 1e-6);
        let up = aim_vector(0.0, 0.5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(up.y > 0.0);
    }

    #[test]
    fn forward_input_moves_toward_facing() {
        let mut p = player_at(0.0, 0.0);
        let intent = PlayerIntent {
            forward: 1.0,
            ..Default::default()
        };
        for _ in 0..30 {
            PhysicsSystem::apply_movement(&mut p, &intent, false, 1.0 / 60.0);
        }
        assert!(p.position.z < 0.0);
        assert!(p.position.x.abs() < 1e-4);
        assert!(horizontal_length(p.velocity) <= MAX_MOVE_SPEED + 1e-4);
    }

    #[test]
    fn velocity_decays_without_input_and_never_reverses() {
        let mut p = player_at(0.0, 0.0);
        p.velocity = Vec3::new(1.5, 0.0, -1.0);
        let idle = PlayerIntent::default();
        let mut prev = p.velocity;
        for _ in 0..120 {
            PhysicsSystem::apply_movement(&mut p, &idle, false, 1.0 / 60.0);
            assert!(p.velocity.x >= 0.0 && p.velocity.x < prev.x);
            assert!(p.velocity.z <= 0.0 && p.velocity.z > prev.z);
            prev = p.velocity;
        }
        assert!(horizontal_length(p.velocity) < 1e-3);
    }

    #[test]
    fn zoomed_sniper_slows_and_hammer_speeds_up() {
        let mut p = player_at(0.0, 0.0);
        p.equip(WeaponType::Sniper);
        assert_eq!(speed_cap(&p), MAX_MOVE_SPEED);
        p.weapon.charge = 0.9;
        assert!(speed_cap(&p) < MAX_MOVE_SPEED);
        p.equip(WeaponType::Hammer);
        assert!(speed_cap(&p) > MAX_MOVE_SPEED);
    }

    #[test]
    fn jump_only_from_ground_and_lands() {
        let mut p = player_at(0.0, 0.0);
        let jump = PlayerIntent {
            jump: true,
            ..Default::default()
        };
        PhysicsSystem::apply_movement(&mut p, &jump, true, 1.0 / 60.0);
        assert!(p.position.y > 0.0);
        assert!(!p.on_ground);
        let vy = p.velocity.y;
        PhysicsSystem::apply_movement(&mut p, &jump, true, 1.0 / 60.0);
        assert!(p.velocity.y < vy, "no second impulse mid-air");

        for _ in 0..120 {
            PhysicsSystem::apply_movement(&mut p, &PlayerIntent::default(), true, 1.0 / 60.0);
        }
        assert_eq!(p.position.y, 0.0);
        assert!(p.on_ground);
    }

    #[test]
    fn locked_or_dead_players_do_not_move() {
        let intent = PlayerIntent {
            forward: 1.0,
            look_yaw: 1.0,
            ..Default::default()
        };
        let mut p = player_at(0.0, 0.0);
        p.controls_locked = true;
        PhysicsSystem::apply_look(&mut p, &intent);
        PhysicsSystem::apply_movement(&mut p, &intent, true, 0.05);
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.yaw, 0.0);

        let mut p = player_at(0.0, 0.0);
        p.take_damage(1000.0);
        PhysicsSystem::apply_movement(&mut p, &intent, true, 0.05);
        assert_eq!(p.position, Vec3::ZERO);
    }

    #[test]
    fn push_out_along_smaller_penetration() {
        // Wall face at x = 1.0, player slightly inside from the left
        let w = wall(Vec3::new(1.0, 0.0, -5.0), Vec3::new(2.0, 3.0, 5.0));
        let mut p = player_at(0.8, 0.0);
        p.velocity = Vec3::new(2.0, 0.0, 1.0);
        assert!(PhysicsSystem::resolve_against(&mut p, &w));
        assert!((p.position.x - (1.0 - 0.35)).abs() < 1e-3);
        assert_eq!(p.velocity.x, 0.0);
        assert_eq!(p.velocity.z, 1.0);
        assert!(!p.body_aabb().intersects(&w.aabb));
    }

    #[test]
    fn push_out_on_z_when_shallower() {
        let w = wall(Vec3::new(-5.0, 0.0, -3.0), Vec3::new(5.0, 3.0, -2.0));
        let mut p = player_at(0.0, -1.8);
        p.velocity = Vec3::new(1.0, 0.0, -2.0);
        PhysicsSystem::resolve_against(&mut p, &w);
        assert!((p.position.z - (-2.0 + 0.35)).abs() < 1e-3);
        assert_eq!(p.velocity.z, 0.0);
        assert_eq!(p.velocity.x, 1.0);
    }

    #[test]
    fn disabled_colliders_are_skipped() {
        let mut w = wall(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 3.0, 1.0));
        w.disabled = true;
        let mut p = player_at(0.0, 0.0);
        PhysicsSystem::resolve_collisions(&mut p, &[w]);
        assert_eq!(p.position, Vec3::ZERO);
    }

    #[test]
    fn overlapping_colliders_resolve_in_provider_order() {
        let a = wall(Vec3::new(0.0, 0.0, -5.0), Vec3::new(1.0, 3.0, 5.0));
        let b = wall(Vec3::new(0.5, 0.0, -5.0), Vec3::new(3.0, 3.0, 5.0));

        // A pushes right into B, then B pushes back left
        let mut a_then_b = player_at(0.6, 0.0);
        PhysicsSystem::resolve_collisions(&mut a_then_b, &[a.clone(), b.clone()]);
        assert!((a_then_b.position.x - 0.15).abs() < 1e-3);
        assert!(!a_then_b.body_aabb().intersects(&b.aabb));

        // B pushes left into A, then A pushes further left
        let mut b_then_a = player_at(0.6, 0.0);
        PhysicsSystem::resolve_collisions(&mut b_then_a, &[b, a.clone()]);
        assert!((b_then_a.position.x + 0.35).abs() < 1e-3);
        assert!(!b_then_a.body_aabb().intersects(&a.aabb));

        assert_ne!(a_then_b.position, b_then_a.position);
        assert_eq!(a_then_b.position.z, 0.0);
        assert_eq!(b_then_a.position.z, 0.0);
    }

    #[test]
    fn resolution_never_leaves_overlap() {
        let w = wall(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 3.0, 1.0));
        for i in 0..21 {
            for j in 0..21 {
                let x = -1.3 + i as f32 * 0.13;
                let z = -1.3 + j as f32 * 0.13;
                let mut p = player_at(x, z);
                PhysicsSystem::resolve_against(&mut p, &w);
                assert!(
                    !p.body_aabb().intersects(&w.aabb),
                    "still overlapping from ({x}, {z})"
                );
            }
        }
    }
}
