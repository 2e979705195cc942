//! Event log, checkpoints and their JSON form.

pub mod checkpoint;
pub mod events;
pub mod format;
pub mod io;
pub mod recorder;
pub mod snapshot;

pub use checkpoint::GameCheckpoint;
pub use events::{EventDetail, EventKind, GameEvent, ReboundType, ShotDetail};
pub use format::{events_digest, format_clock, parse_clock};
pub use io::{game_key, load_log_json, save_log_json, FileStore, GameStore, MemoryStore, StoreError};
pub use recorder::{last_event_index, EventLog, GameInfo, PlayerEntry, TeamEntry};
pub use snapshot::{PlayerSnapshot, TeamBoxScore};
