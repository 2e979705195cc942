pub mod player;
pub mod rating;
pub mod roster;
pub mod statistics;
pub mod team;

pub use player::{height_rating, parse_height, Player, Position, PrimitiveRatings};
pub use rating::{CompositeRatings, Skill};
pub use roster::{PlayerRoster, TeamRoster};
pub use statistics::{pct, ShotZone, StatEvent, StatLine};
pub use team::{Team, TeamInfo, LINEUP_SIZE};
