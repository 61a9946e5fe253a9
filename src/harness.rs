//! Headless frame loop that drives a match with scripted input

use std::f32::consts::{PI, TAU};
use std::future::Future;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::Config;
use crate::game::input::{InputSnapshot, Key, PointerButton, KEY_LOOK_SPEED, POINTER_SENSITIVITY};
use crate::game::r#match::{GameMatch, MatchPhase, MatchState};
use crate::game::snapshot::{MatchStats, SnapshotBuilder};
use crate::game::weapon::FireMode;
use crate::game::{EventSink, PlayerSlot, TracingSink};
use crate::util::horizontal_length;
use crate::util::time::{frame_interval, FrameClock};
use crate::world::World;

/// HUD snapshots are logged this many times per second
const SNAPSHOTS_PER_SECOND: u32 = 2;
/// Pilots attempt their next upgrade task this often (seconds)
const TASK_INTERVAL: f32 = 8.0;

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    RoundWon(PlayerSlot),
    FrameLimit,
    Shutdown,
}

#[derive(Debug, Clone)]
pub struct HarnessReport {
    pub frames: u64,
    pub stop: StopReason,
    pub stats: MatchStats,
}

/// Produces one input snapshot per frame
pub trait InputSource {
    fn next_input(&mut self, state: &MatchState, dt: f32) -> InputSnapshot;
}

/// Scripted duel: both players turn toward each other, close the distance
/// and fire whatever they hold. Player one drives the pointer scheme,
/// player two the keys scheme.
#[derive(Debug, Default)]
pub struct DemoPilot;

impl DemoPilot {
    pub fn new() -> Self {
        Self
    }
}

/// Run each living player's next task straight to completion
fn run_upgrade_tasks(game: &mut GameMatch, sink: &mut dyn EventSink) {
    for slot in PlayerSlot::ALL {
        let task = game.player(slot).task_level;
        if game.request_task(slot, task, sink).accepted() {
            game.complete_task(slot, task, sink);
        }
    }
}

/// Signed yaw change that turns `from` toward `to`, in `(-PI, PI]`
fn yaw_delta(from: f32, to: f32) -> f32 {
    let d = (to - from).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

impl InputSource for DemoPilot {
    fn next_input(&mut self, state: &MatchState, dt: f32) -> InputSnapshot {
        let mut input = InputSnapshot::new();
        if !state.phase.simulates_combat() {
            return input;
        }

        for slot in PlayerSlot::ALL {
            let me = state.player(slot);
            let other = state.player(slot.opponent());
            if me.dead {
                continue;
            }

            let to = other.position - me.position;
            let desired = (-to.x).atan2(-to.z);
            let turn = yaw_delta(me.yaw, desired);
            let distance = horizontal_length(to);
            let aligned = turn.abs() < 0.05;

            let weapon = me.weapon.weapon;
            let engage = if weapon.is_melee() {
                weapon.stats().range * 0.75
            } else {
                6.0
            };
            let advance = distance > engage && !other.dead;

            let (fire_hold, fire_press, fire_release) = match weapon.stats().fire_mode {
                FireMode::ChargeRelease => {
                    let ready = me.weapon.aiming && me.weapon.charge > 0.9;
                    (aligned && !ready, aligned && !me.weapon.aiming, me.weapon.aiming && ready)
                }
                FireMode::FullAuto => (aligned, aligned, false),
                FireMode::PressToFire | FireMode::MeleePress => {
                    (false, aligned && distance <= weapon.stats().range, false)
                }
            };

            match slot {
                PlayerSlot::One => {
                    input = input.pointer_motion(-turn / POINTER_SENSITIVITY, me.pitch / POINTER_SENSITIVITY);
                    if advance {
                        input = input.hold(Key::W);
                    }
                    if fire_press {
                        input = input.press_button(PointerButton::Primary);
                    } else if fire_hold {
                        input = input.hold_button(PointerButton::Primary);
                    } else if fire_release {
                        input = input.release_button(PointerButton::Primary);
                    }
                }
                PlayerSlot::Two => {
                    // Keys turn at a fixed rate; stop inside one frame of turn
                    let step = KEY_LOOK_SPEED * dt;
                    if turn > step {
                        input = input.hold(Key::J);
                    } else if turn < -step {
                        input = input.hold(Key::L);
                    }
                    if advance {
                        input = input.hold(Key::ArrowUp);
                    }
                    if fire_press {
                        input = input.press(Key::Slash);
                    } else if fire_hold {
                        input = input.hold(Key::Slash);
                    } else if fire_release {
                        input = input.release(Key::Slash);
                    }
                }
            }
        }
        input
    }
}

/// Drive a match at `config.frame_rate` until a player wins, the frame
/// limit is reached, or `shutdown` resolves.
pub async fn run<W, I, F>(
    config: &Config,
    world: &mut W,
    pilot: &mut I,
    shutdown: F,
) -> HarnessReport
where
    W: World,
    I: InputSource,
    F: Future<Output = ()>,
{
    let mut game = GameMatch::new(config.match_config());
    let mut sink = TracingSink;
    let mut clock = FrameClock::new(config.max_frame_delta);
    let mut snapshots = SnapshotBuilder::new(config.frame_rate / SNAPSHOTS_PER_SECOND);
    let mut task_timer = 0.0f32;

    info!(match_id = %game.id(), seed = config.match_seed, win_score = config.win_score, "Match started");
    game.start(&mut sink);

    let mut ticker = interval(frame_interval(config.frame_rate));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    let mut frames = 0u64;
    let stop = loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break StopReason::Shutdown,
            _ = ticker.tick() => {}
        }

        let dt = clock.tick();
        let input = pilot.next_input(game.state(), dt);
        let phase_before = game.phase();
        game.step(dt, &input, world, &mut sink);
        frames += 1;

        if game.phase().simulates_combat() {
            task_timer += dt;
            if task_timer >= TASK_INTERVAL {
                task_timer = 0.0;
                run_upgrade_tasks(&mut game, &mut sink);
            }
        }

        if game.phase() != phase_before {
            snapshots.force_next();
        }
        if snapshots.should_send() {
            let snapshot = snapshots.build(game.state());
            debug!(
                frame = snapshot.frame,
                phase = ?snapshot.phase,
                scores = ?snapshot.scores,
                "Snapshot"
            );
        }

        if game.phase() == MatchPhase::Win {
            if let Some(winner) = game.winner() {
                break StopReason::RoundWon(winner);
            }
        }
        if frames >= config.max_frames {
            break StopReason::FrameLimit;
        }
    };

    info!(match_id = %game.id(), frames, ?stop, scores = ?game.scores(), "Match loop stopped");

    HarnessReport {
        frames,
        stop,
        stats: game.build_match_stats(),
    }
}
