//! Task gate - sequential mini-game progression that unlocks weapon tiers
//!
//! The mini-games themselves live outside the simulation. The gate decides
//! whether a task may open, locks the player's controls while it is open,
//! and applies the weapon upgrade when the task reports completion.

use tracing::debug;

use super::events::{EventSink, GameEvent};
use super::player::{Player, PlayerSlot, MAX_TASK_LEVEL};
use super::weapon::WeaponType;

/// Number of upgrade tasks in the arena
pub const TASK_COUNT: u8 = MAX_TASK_LEVEL;

/// Why an open request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRejection {
    /// Index is not the player's next task
    Locked,
    /// Every task already completed
    AllComplete,
    PlayerDead,
    AlreadyOpen,
    /// No round in progress
    RoundInactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDecision {
    Accepted,
    Rejected(TaskRejection),
}

impl TaskDecision {
    pub fn accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Tracks which task each player has open
#[derive(Debug, Clone, Default)]
pub struct TaskGate {
    open: [Option<u8>; 2],
}

impl TaskGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_task(&self, slot: PlayerSlot) -> Option<u8> {
        self.open[slot.index()]
    }

    /// Accept iff `task` is the player's current level and they are free to start it
    pub fn request_open(
        &mut self,
        player: &mut Player,
        task: u8,
        sink: &mut dyn EventSink,
    ) -> TaskDecision {
        let decision = if player.dead {
            TaskDecision::Rejected(TaskRejection::PlayerDead)
        } else if self.open[player.slot.index()].is_some() {
            TaskDecision::Rejected(TaskRejection::AlreadyOpen)
        } else if player.task_level >= TASK_COUNT {
            TaskDecision::Rejected(TaskRejection::AllComplete)
        } else if task != player.task_level {
            TaskDecision::Rejected(TaskRejection::Locked)
        } else {
            TaskDecision::Accepted
        };

        debug!(player = ?player.slot, task, ?decision, "Task open requested");

        if decision.accepted() {
            self.open[player.slot.index()] = Some(task);
            player.controls_locked = true;
            // Holding a zoom through the task UI is not allowed
            player.weapon.reset_charge();
            sink.emit(GameEvent::TaskOpened {
                player: player.slot,
                task,
            });
        }
        decision
    }

    /// The open task reported success: advance one level and re-equip.
    /// Returns false if `task` is not the task currently open for the player.
    pub fn complete(&mut self, player: &mut Player, task: u8, sink: &mut dyn EventSink) -> bool {
        if self.open[player.slot.index()] != Some(task) || player.dead {
            return false;
        }

        player.task_level = (player.task_level + 1).min(MAX_TASK_LEVEL);
        let weapon = WeaponType::for_tier(player.task_level);
        player.bonus = None;
        player.pre_pickup_weapon = None;
        player.equip(weapon);

        sink.emit(GameEvent::TaskCompleted {
            player: player.slot,
            task,
            new_level: player.task_level,
        });
        sink.emit(GameEvent::WeaponEquipped {
            player: player.slot,
            weapon,
        });

        self.close(player, sink);
        true
    }

    /// Release the controls lock; always succeeds
    pub fn close(&mut self, player: &mut Player, sink: &mut dyn EventSink) {
        let was_open = self.open[player.slot.index()].take().is_some();
        player.controls_locked = false;
        if was_open {
            sink.emit(GameEvent::TaskClosed {
                player: player.slot,
            });
        }
    }

    /// Drop every open task without events (round reset)
    pub fn clear(&mut self) {
        self.open = [None; 2];
    }
}
