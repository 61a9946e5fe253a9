//! Match state and the per-frame simulation step

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f32::consts::PI;
use tracing::{debug, info, warn};
use uuid::Uuid;

use serde::{Deserialize, Serialize};

use crate::util::{horizontal_distance, Vec3};
use crate::world::World;

use super::combat::{CombatSystem, KillRecord};
use super::events::{EventSink, GameEvent};
use super::input::{InputSnapshot, PlayerIntent};
use super::physics::PhysicsSystem;
use super::player::{Player, PlayerSlot};
use super::snapshot::{MatchStats, PlayerMatchStats};
use super::tasks::{TaskDecision, TaskGate, TaskRejection};
use super::weapon::WeaponType;

/// Fade between the menu and the elevators (seconds)
pub const TRANSITION_DURATION: f32 = 1.2;
/// Countdown inside the elevators before the doors move (seconds)
pub const ELEVATOR_COUNTDOWN: f32 = 3.0;
/// Door opening per second (0 → 1)
pub const DOOR_OPEN_RATE: f32 = 0.5;
/// How long the "FIGHT" banner is shown once the doors start opening
pub const FIGHT_BANNER_DURATION: f32 = 1.5;
/// Candidate spawn points sampled per respawn
pub const RESPAWN_SAMPLES: usize = 6;
pub const DEFAULT_WIN_SCORE: u32 = 10;
/// Phase timers finish once less than this much time remains (seconds)
const TIMER_EPSILON: f32 = 1e-4;

/// Count `timer` down by `dt`. Returns true (and zeroes it) once it is done.
fn count_down(timer: &mut f32, dt: f32) -> bool {
    *timer -= dt;
    if *timer <= TIMER_EPSILON {
        *timer = 0.0;
        true
    } else {
        false
    }
}

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Idle background, no simulation
    Menu,
    /// Fixed-duration fade, no input
    Transition,
    /// Countdown then doors open; combat is live
    Elevator,
    /// Full combat
    Play,
    /// Round over, scores frozen
    Win,
}

impl MatchPhase {
    /// Phases in which players move and fight
    pub fn simulates_combat(self) -> bool {
        matches!(self, Self::Elevator | Self::Play)
    }
}

/// Position plus facing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Vec3,
    pub yaw: f32,
}

impl SpawnPoint {
    pub const fn new(x: f32, z: f32, yaw: f32) -> Self {
        Self {
            position: Vec3::new(x, 0.0, z),
            yaw,
        }
    }
}

/// Where players are placed for each situation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaLayout {
    /// Round start, one per slot, facing each other
    pub elevator_anchors: [SpawnPoint; 2],
    /// Menu background positions after a round reset
    pub neutral_spots: [SpawnPoint; 2],
    /// Candidate respawn positions
    pub respawn_points: Vec<Vec3>,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        Self {
            elevator_anchors: [SpawnPoint::new(0.0, 18.0, 0.0), SpawnPoint::new(0.0, -18.0, PI)],
            neutral_spots: [SpawnPoint::new(-4.0, 10.0, 0.0), SpawnPoint::new(4.0, -10.0, PI)],
            respawn_points: vec![
                Vec3::new(-12.0, 0.0, -12.0),
                Vec3::new(12.0, 0.0, 12.0),
                Vec3::new(-12.0, 0.0, 12.0),
                Vec3::new(12.0, 0.0, -12.0),
                Vec3::new(-12.0, 0.0, 0.0),
                Vec3::new(12.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 8.0),
                Vec3::new(0.0, 0.0, -8.0),
            ],
        }
    }
}

/// Invalid match configuration
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Win score must be at least 1")]
    ZeroWinScore,

    #[error("Arena layout has no respawn points")]
    NoRespawnPoints,
}

/// Per-match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub win_score: u32,
    pub seed: u64,
    pub layout: ArenaLayout,
}

impl MatchConfig {
    pub fn new(win_score: u32, seed: u64) -> Self {
        Self {
            win_score,
            seed,
            layout: ArenaLayout::default(),
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.win_score == 0 {
            return Err(LayoutError::ZeroWinScore);
        }
        if self.layout.respawn_points.is_empty() {
            return Err(LayoutError::NoRespawnPoints);
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIN_SCORE, 0)
    }
}

/// Match state (owned by the match)
pub struct MatchState {
    pub id: Uuid,
    pub phase: MatchPhase,
    pub frame: u64,
    pub players: [Player; 2],
    /// Kill score per slot; only ever increases within a round
    pub scores: [u32; 2],
    pub winner: Option<PlayerSlot>,
    pub first_kill: bool,
    pub transition_timer: f32,
    pub elevator_countdown: f32,
    pub door_open: f32,
    pub banner_timer: f32,
    pub banner_started: bool,
    /// Seconds of live combat this round
    pub round_time: f32,
    pub tasks: TaskGate,
    pub rng: ChaCha8Rng,
}

impl MatchState {
    pub fn new(config: &MatchConfig) -> Self {
        let [a, b] = config.layout.neutral_spots;
        Self {
            id: Uuid::new_v4(),
            phase: MatchPhase::Menu,
            frame: 0,
            players: [
                Player::new(PlayerSlot::One, a.position, a.yaw),
                Player::new(PlayerSlot::Two, b.position, b.yaw),
            ],
            scores: [0, 0],
            winner: None,
            first_kill: false,
            transition_timer: 0.0,
            elevator_countdown: ELEVATOR_COUNTDOWN,
            door_open: 0.0,
            banner_timer: 0.0,
            banner_started: false,
            round_time: 0.0,
            tasks: TaskGate::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        &mut self.players[slot.index()]
    }

    pub fn score(&self, slot: PlayerSlot) -> u32 {
        self.scores[slot.index()]
    }
}

/// The authoritative two-player match
pub struct GameMatch {
    config: MatchConfig,
    state: MatchState,
}

impl GameMatch {
    pub fn new(config: MatchConfig) -> Self {
        let state = MatchState::new(&config);
        Self { config, state }
    }

    pub fn id(&self) -> Uuid {
        self.state.id
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        self.state.player(slot)
    }

    /// Direct access for harness setup (bonus placement, scripted tests)
    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        self.state.player_mut(slot)
    }

    pub fn scores(&self) -> [u32; 2] {
        self.state.scores
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        self.state.winner
    }

    /// MENU → TRANSITION. Ignored in any other phase.
    pub fn start(&mut self, sink: &mut dyn EventSink) -> bool {
        if self.state.phase != MatchPhase::Menu {
            return false;
        }
        self.state.transition_timer = TRANSITION_DURATION;
        self.set_phase(MatchPhase::Transition, sink);
        true
    }

    /// WIN → MENU with a full round reset. Ignored in any other phase.
    pub fn return_to_menu(&mut self, world: &mut dyn World, sink: &mut dyn EventSink) -> bool {
        if self.state.phase != MatchPhase::Win {
            return false;
        }

        let state = &mut self.state;
        state.scores = [0, 0];
        state.winner = None;
        state.first_kill = false;
        state.transition_timer = 0.0;
        state.elevator_countdown = ELEVATOR_COUNTDOWN;
        state.door_open = 0.0;
        state.banner_timer = 0.0;
        state.banner_started = false;
        state.round_time = 0.0;
        state.tasks.clear();
        for (player, spot) in state
            .players
            .iter_mut()
            .zip(self.config.layout.neutral_spots)
        {
            player.reset_for_round(spot.position, spot.yaw);
        }
        world.reset_round();

        info!(match_id = %self.state.id, "Round reset");
        self.set_phase(MatchPhase::Menu, sink);
        true
    }

    /// Task UI wants to open `task` for `slot`
    pub fn request_task(&mut self, slot: PlayerSlot, task: u8, sink: &mut dyn EventSink) -> TaskDecision {
        if !self.state.phase.simulates_combat() {
            return TaskDecision::Rejected(TaskRejection::RoundInactive);
        }
        let state = &mut self.state;
        state
            .tasks
            .request_open(&mut state.players[slot.index()], task, sink)
    }

    /// Task UI reports success
    pub fn complete_task(&mut self, slot: PlayerSlot, task: u8, sink: &mut dyn EventSink) -> bool {
        if !self.state.phase.simulates_combat() {
            return false;
        }
        let state = &mut self.state;
        state
            .tasks
            .complete(&mut state.players[slot.index()], task, sink)
    }

    /// Task UI closed (any reason); always releases the controls lock
    pub fn close_task(&mut self, slot: PlayerSlot, sink: &mut dyn EventSink) {
        let state = &mut self.state;
        state.tasks.close(&mut state.players[slot.index()], sink);
    }

    /// Hand a living player a bonus weapon during a round
    pub fn grant_bonus(&mut self, slot: PlayerSlot, weapon: WeaponType, sink: &mut dyn EventSink) -> bool {
        if !self.state.phase.simulates_combat() {
            return false;
        }
        let player = self.state.player_mut(slot);
        if !weapon.is_bonus() || player.dead {
            return false;
        }
        player.grant_bonus(weapon);
        sink.emit(GameEvent::WeaponEquipped {
            player: slot,
            weapon,
        });
        true
    }

    /// Advance the simulation by one frame
    pub fn step(&mut self, dt: f32, input: &InputSnapshot, world: &mut dyn World, sink: &mut dyn EventSink) {
        let dt = dt.max(0.0);
        self.state.frame += 1;

        match self.state.phase {
            MatchPhase::Menu | MatchPhase::Win => {}
            MatchPhase::Transition => {
                if count_down(&mut self.state.transition_timer, dt) {
                    self.enter_elevator(world, sink);
                }
            }
            MatchPhase::Elevator => {
                self.update_elevator(dt, world, sink);
                self.simulate(dt, input, world, sink);
                if self.state.phase == MatchPhase::Elevator && self.elevator_finished() {
                    self.set_phase(MatchPhase::Play, sink);
                }
            }
            MatchPhase::Play => {
                self.simulate(dt, input, world, sink);
            }
        }
    }

    fn set_phase(&mut self, to: MatchPhase, sink: &mut dyn EventSink) {
        let from = self.state.phase;
        self.state.phase = to;
        info!(match_id = %self.state.id, ?from, ?to, "Phase changed");
        sink.emit(GameEvent::PhaseChanged { from, to });
    }

    /// TRANSITION → ELEVATOR: reset the countdown and doors, place both players
    fn enter_elevator(&mut self, world: &mut dyn World, sink: &mut dyn EventSink) {
        let state = &mut self.state;
        state.elevator_countdown = ELEVATOR_COUNTDOWN;
        state.door_open = 0.0;
        state.banner_timer = 0.0;
        state.banner_started = false;
        world.set_door_open(0.0);

        for (player, anchor) in state
            .players
            .iter_mut()
            .zip(self.config.layout.elevator_anchors)
        {
            player.respawn_at(anchor.position, anchor.yaw);
            let weapon = player.loadout();
            player.equip(weapon);
        }

        self.set_phase(MatchPhase::Elevator, sink);
    }

    fn update_elevator(&mut self, dt: f32, world: &mut dyn World, sink: &mut dyn EventSink) {
        let state = &mut self.state;
        if state.elevator_countdown > 0.0 {
            if count_down(&mut state.elevator_countdown, dt) && !state.banner_started {
                state.banner_started = true;
                state.banner_timer = FIGHT_BANNER_DURATION;
                sink.emit(GameEvent::FightBanner);
            }
            return;
        }

        state.door_open += DOOR_OPEN_RATE * dt;
        if state.door_open >= 1.0 - TIMER_EPSILON {
            state.door_open = 1.0;
        }
        count_down(&mut state.banner_timer, dt);
        world.set_door_open(state.door_open);
    }

    /// Door fully open and the banner fully shown
    fn elevator_finished(&self) -> bool {
        self.state.door_open >= 1.0 && self.state.banner_started && self.state.banner_timer <= 0.0
    }

    /// One frame of movement, weapons, combat, hazards and respawns
    fn simulate(&mut self, dt: f32, input: &InputSnapshot, world: &mut dyn World, sink: &mut dyn EventSink) {
        self.state.round_time += dt;
        world.tick(dt);

        // Look, movement and weapon timers
        let mut intents = [PlayerIntent::default(); 2];
        for slot in PlayerSlot::ALL {
            let intent = slot.scheme().read(input, dt);
            intents[slot.index()] = intent;

            let player = self.state.player_mut(slot);
            player.tick_timers(dt);

            PhysicsSystem::apply_look(player, &intent);
            PhysicsSystem::apply_movement(player, &intent, slot.scheme().can_jump(), dt);
            PhysicsSystem::resolve_collisions(player, world.colliders());

            let weapon = player.weapon.weapon;
            if player.can_act() {
                if intent.reload && player.weapon.start_reload() {
                    sink.emit(GameEvent::ReloadStarted { player: slot, weapon });
                }
            } else {
                // Locked players cannot hold a zoom
                player.weapon.aiming = false;
            }
            if player.weapon.tick(dt) {
                sink.emit(GameEvent::ReloadFinished { player: slot, weapon });
            }
        }

        // Fire
        for slot in PlayerSlot::ALL {
            if self.state.phase == MatchPhase::Win {
                break;
            }
            let player = self.state.player_mut(slot);
            if !player.can_act() {
                continue;
            }
            if !CombatSystem::trigger_requested(&mut player.weapon, intents[slot.index()].fire) {
                continue;
            }
            let state = &mut self.state;
            let outcome = CombatSystem::fire(slot, &mut state.players, world, &mut state.rng, sink);
            if let Some(kill) = outcome.kill {
                self.record_kill(kill, sink);
            }
        }

        // Hazards
        if self.state.phase != MatchPhase::Win {
            let hazards = world.hazards();
            let kills = CombatSystem::apply_hazards(&mut self.state.players, &hazards, dt, sink);
            for kill in kills {
                self.record_kill(kill, sink);
            }
        }

        // Respawns
        if self.state.phase != MatchPhase::Win {
            for slot in PlayerSlot::ALL {
                if self.state.player(slot).ready_to_respawn() {
                    self.respawn(slot, sink);
                }
            }
        }
    }

    /// Bookkeeping for a death: close the victim's task, credit the killer,
    /// end the round on reaching the win score.
    fn record_kill(&mut self, kill: KillRecord, sink: &mut dyn EventSink) {
        if self.state.phase == MatchPhase::Win {
            return;
        }

        {
            let state = &mut self.state;
            state
                .tasks
                .close(&mut state.players[kill.victim.index()], sink);
        }

        let first_blood = !self.state.first_kill;
        self.state.first_kill = true;

        sink.emit(GameEvent::Kill {
            killer: kill.killer,
            victim: kill.victim,
            cause: kill.cause,
            first_blood,
        });

        let killer = match kill.killer {
            Some(killer) if killer != kill.victim => killer,
            _ => {
                info!(match_id = %self.state.id, victim = ?kill.victim, cause = ?kill.cause, "Environmental kill");
                return;
            }
        };

        self.state.scores[killer.index()] += 1;
        let score = self.state.scores[killer.index()];
        info!(
            match_id = %self.state.id,
            killer = ?killer,
            victim = ?kill.victim,
            score,
            "Kill"
        );

        if score >= self.config.win_score {
            self.state.winner = Some(killer);
            sink.emit(GameEvent::RoundWon {
                winner: killer,
                scores: self.state.scores,
            });
            info!(match_id = %self.state.id, winner = ?killer, scores = ?self.state.scores, "Round won");
            self.set_phase(MatchPhase::Win, sink);
        }
    }

    /// Respawn at the sampled point farthest from the opponent
    fn respawn(&mut self, slot: PlayerSlot, sink: &mut dyn EventSink) {
        let avoid = self.state.player(slot.opponent()).position;
        let fallback = self.config.layout.elevator_anchors[slot.index()].position;
        let position = match pick_spawn_point(&self.config.layout.respawn_points, avoid, &mut self.state.rng) {
            Some(p) => p,
            None => {
                warn!(match_id = %self.state.id, "No respawn points, using elevator anchor");
                fallback
            }
        };

        // Face the middle of the arena
        let yaw = position.x.atan2(position.z);

        let player = self.state.player_mut(slot);
        player.respawn_at(position, yaw);
        let weapon = player.loadout();
        player.equip(weapon);

        debug!(player = ?slot, ?position, ?weapon, "Respawned");
        sink.emit(GameEvent::Respawned {
            player: slot,
            position,
        });
        sink.emit(GameEvent::WeaponEquipped {
            player: slot,
            weapon,
        });
    }

    /// End-of-round summary
    pub fn build_match_stats(&self) -> MatchStats {
        let player_stats = self
            .state
            .players
            .iter()
            .map(|p| PlayerMatchStats {
                slot: p.slot,
                score: self.state.scores[p.slot.index()],
                kills: p.stats.kills,
                deaths: p.stats.deaths,
                shots_fired: p.stats.shots_fired,
                shots_hit: p.stats.shots_hit,
                damage_dealt: p.stats.damage_dealt,
                damage_taken: p.stats.damage_taken,
                task_level: p.task_level,
            })
            .collect();

        MatchStats {
            match_id: self.state.id,
            duration_secs: self.state.round_time,
            winner: self.state.winner,
            player_stats,
        }
    }
}

/// Sample a bounded number of candidates and keep the farthest from `avoid`
pub fn pick_spawn_point(points: &[Vec3], avoid: Vec3, rng: &mut ChaCha8Rng) -> Option<Vec3> {
    if points.is_empty() {
        return None;
    }
    let mut best: Option<(f32, Vec3)> = None;
    for _ in 0..RESPAWN_SAMPLES {
        let candidate = points[rng.gen_range(0..points.len())];
        let d = horizontal_distance(candidate, avoid);
        if best.map_or(true, |(bd, _)| d > bd) {
            best = Some((d, candidate));
        }
    }
    best.map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ArenaWorld;

    const DT: f32 = 0.05;

    fn run(game: &mut GameMatch, world: &mut ArenaWorld, frames: usize, events: &mut Vec<GameEvent>) {
        let idle = InputSnapshot::new();
        for _ in 0..frames {
            game.step(DT, &idle, world, events);
        }
    }

    #[test]
    fn start_only_from_menu() {
        let mut game = GameMatch::new(MatchConfig::default());
        let mut events = Vec::new();
        assert!(game.start(&mut events));
        assert_eq!(game.phase(), MatchPhase::Transition);
        assert!(!game.start(&mut events));
    }

    #[test]
    fn transition_places_players_in_elevators() {
        let mut game = GameMatch::new(MatchConfig::default());
        let mut world = ArenaWorld::standard();
        let mut events = Vec::new();
        game.start(&mut events);

        // 1.2 s at 50 ms per frame
        run(&mut game, &mut world, 23, &mut events);
        assert_eq!(game.phase(), MatchPhase::Transition);
        run(&mut game, &mut world, 1, &mut events);
        assert_eq!(game.phase(), MatchPhase::Elevator);

        let anchors = game.config().layout.elevator_anchors;
        assert_eq!(game.player(PlayerSlot::One).position, anchors[0].position);
        assert_eq!(game.player(PlayerSlot::Two).position, anchors[1].position);
        assert!((game.player(PlayerSlot::Two).yaw - game.player(PlayerSlot::One).yaw).abs() > 3.0);
    }

    #[test]
    fn elevator_waits_for_door_and_banner() {
        let mut game = GameMatch::new(MatchConfig::default());
        let mut world = ArenaWorld::standard();
        let mut events = Vec::new();
        game.start(&mut events);
        run(&mut game, &mut world, 24, &mut events);
        assert_eq!(game.phase(), MatchPhase::Elevator);

        // 3 s countdown is exactly 60 frames
        run(&mut game, &mut world, 59, &mut events);
        assert!(!game.state().banner_started);
        run(&mut game, &mut world, 1, &mut events);
        assert!(game.state().banner_started);
        assert_eq!(game.state().elevator_countdown, 0.0);
        assert!(events.contains(&GameEvent::FightBanner));
        assert_eq!(game.state().door_open, 0.0);

        // Banner is done before the door; still waiting on the door
        run(&mut game, &mut world, 30, &mut events);
        assert_eq!(game.state().banner_timer, 0.0);
        assert_eq!(game.phase(), MatchPhase::Elevator);
        assert!(game.state().door_open < 1.0);

        run(&mut game, &mut world, 9, &mut events);
        assert_eq!(game.phase(), MatchPhase::Elevator);
        run(&mut game, &mut world, 1, &mut events);
        assert_eq!(game.phase(), MatchPhase::Play);
        assert_eq!(world.door_open(), 1.0);
    }

    #[test]
    fn countdown_absorbs_float_residue() {
        let mut timer = TRANSITION_DURATION;
        let frames = (1..).find(|_| count_down(&mut timer, DT)).unwrap();
        assert_eq!(frames, 24);
        assert_eq!(timer, 0.0);

        let mut timer = ELEVATOR_COUNTDOWN;
        let frames = (1..).find(|_| count_down(&mut timer, 1.0 / 60.0)).unwrap();
        assert_eq!(frames, 180);
    }

    #[test]
    fn bonus_is_only_granted_during_a_round() {
        let mut game = GameMatch::new(MatchConfig::default());
        let mut world = ArenaWorld::standard();
        let mut events = Vec::new();
        assert!(!game.grant_bonus(PlayerSlot::One, WeaponType::Shotgun, &mut events));

        game.start(&mut events);
        assert!(!game.grant_bonus(PlayerSlot::One, WeaponType::Shotgun, &mut events));
        run(&mut game, &mut world, 24, &mut events);
        assert_eq!(game.phase(), MatchPhase::Elevator);
        assert_eq!(game.player(PlayerSlot::One).weapon.weapon, WeaponType::Knife);

        assert!(game.grant_bonus(PlayerSlot::One, WeaponType::Shotgun, &mut events));
        assert_eq!(game.player(PlayerSlot::One).weapon.weapon, WeaponType::Shotgun);
    }

    #[test]
    fn return_to_menu_only_from_win() {
        let mut game = GameMatch::new(MatchConfig::default());
        let mut world = ArenaWorld::standard();
        assert!(!game.return_to_menu(&mut world, &mut Vec::new()));
    }

    #[test]
    fn spawn_sampling_prefers_distance() {
        let points = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(50.0, 0.0, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut far = 0;
        for _ in 0..50 {
            if pick_spawn_point(&points, Vec3::ZERO, &mut rng) == Some(points[1]) {
                far += 1;
            }
        }
        // Six samples from two points almost always include the far one
        assert!(far >= 45);
        assert!(pick_spawn_point(&[], Vec3::ZERO, &mut rng).is_none());
    }

    #[test]
    fn config_validation() {
        assert!(MatchConfig::default().validate().is_ok());
        assert!(matches!(
            MatchConfig::new(0, 1).validate(),
            Err(LayoutError::ZeroWinScore)
        ));
        let mut config = MatchConfig::default();
        config.layout.respawn_points.clear();
        assert!(matches!(config.validate(), Err(LayoutError::NoRespawnPoints)));
    }

    #[test]
    fn tasks_rejected_outside_a_round() {
        let mut game = GameMatch::new(MatchConfig::default());
        assert_eq!(
            game.request_task(PlayerSlot::One, 0, &mut Vec::new()),
            TaskDecision::Rejected(TaskRejection::RoundInactive)
        );
    }
}
