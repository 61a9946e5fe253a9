//! Game simulation modules

pub mod combat;
pub mod events;
pub mod input;
pub mod r#match;
pub mod physics;
pub mod player;
pub mod snapshot;
pub mod tasks;
pub mod weapon;

pub use events::{EventSink, FnSink, GameEvent, KillCause, TracingSink};
pub use input::{ControlScheme, InputSnapshot, Key, PointerButton};
pub use player::{Player, PlayerSlot};
pub use r#match::{GameMatch, MatchConfig, MatchPhase, MatchState};
pub use snapshot::{MatchSnapshot, MatchStats, SnapshotBuilder};
pub use weapon::WeaponType;
