//! Wire format of the event log
//!
//! - Game-clock values are written as `M:SS` (`"11:05"`, `"0:07"`).
//! - An event is `{event_type, timestamp, quarter, team_id, player_id, details}`
//!   where `details` holds the typed payload fields plus `player_states`.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use super::events::{EventDetail, EventKind, GameEvent};
use super::snapshot::PlayerSnapshot;

const PLAYER_STATES: &str = "player_states";
const EVENT_TYPE: &str = "event_type";

/// `725` → `"12:05"`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Inverse of [`format_clock`]; also accepts a bare number of seconds.
pub fn parse_clock(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.split_once(':') {
        Some((min, sec)) => {
            let min: u32 = min.parse().ok()?;
            let sec: u32 = sec.parse().ok()?;
            if sec >= 60 {
                return None;
            }
            Some(min * 60 + sec)
        }
        None => text.parse().ok(),
    }
}

/// `#[serde(with = "game_clock")]` for `u32` seconds.
pub mod game_clock {
    use super::{format_clock, parse_clock};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(seconds: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_clock(*seconds))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_clock(&text).ok_or_else(|| D::Error::custom(format!("invalid game clock '{text}'")))
    }
}

/// Flat on-disk shape of a [`GameEvent`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EventRecord {
    event_type: EventKind,
    #[serde(with = "game_clock")]
    timestamp: u32,
    quarter: u8,
    team_id: usize,
    player_id: Option<String>,
    details: Value,
}

impl EventRecord {
    fn from_event(event: &GameEvent) -> Result<Self, serde_json::Error> {
        let mut details = match serde_json::to_value(&event.detail)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        details.remove(EVENT_TYPE);
        details.insert(PLAYER_STATES.to_string(), serde_json::to_value(&event.player_states)?);

        Ok(Self {
            event_type: event.kind(),
            timestamp: event.timestamp,
            quarter: event.quarter,
            team_id: event.team_id,
            player_id: event.player_id.clone(),
            details: Value::Object(details),
        })
    }
}

impl TryFrom<EventRecord> for GameEvent {
    type Error = serde_json::Error;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let mut details = match record.details {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(<serde_json::Error as serde::de::Error>::custom(format!(
                    "event details must be an object, got {other}"
                )))
            }
        };

        let player_states: BTreeMap<String, PlayerSnapshot> = match details.remove(PLAYER_STATES) {
            Some(states) => serde_json::from_value(states)?,
            None => BTreeMap::new(),
        };
        details.insert(
            EVENT_TYPE.to_string(),
            Value::String(record.event_type.as_str().to_string()),
        );
        let detail: EventDetail = serde_json::from_value(Value::Object(details))?;

        Ok(GameEvent {
            detail,
            timestamp: record.timestamp,
            quarter: record.quarter,
            team_id: record.team_id,
            player_id: record.player_id,
            player_states,
        })
    }
}

impl Serialize for GameEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EventRecord::from_event(self).map_err(serde::ser::Error::custom)?.serialize(serializer)
    }
}

/// SHA-256 over the compact JSON of `events`, lowercase hex.
///
/// Two runs with the same rosters, seed and config produce the same digest.
pub fn events_digest(events: &[GameEvent]) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(events)?;
    let hash = Sha256::digest(&bytes);
    Ok(hash.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShotZone;
    use crate::replay::events::ShotDetail;

    fn event(detail: EventDetail, timestamp: u32, player_id: Option<&str>) -> GameEvent {
        GameEvent {
            detail,
            timestamp,
            quarter: 1,
            team_id: 0,
            player_id: player_id.map(str::to_string),
            player_states: BTreeMap::new(),
        }
    }

    #[test]
    fn test_clock_text() {
        assert_eq!(format_clock(720), "12:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(parse_clock("11:59"), Some(719));
        assert_eq!(parse_clock("0:07"), Some(7));
        assert_eq!(parse_clock("630"), Some(630));
        assert_eq!(parse_clock("1:75"), None);
        assert_eq!(parse_clock("x:10"), None);
    }

    #[test]
    fn test_event_wire_layout() {
        let shot = event(
            EventDetail::ShotMade(ShotDetail {
                shot_type: ShotZone::ThreePoint,
                points: 3,
                shooting_foul: false,
                assist_player_id: None,
                defender_id: Some("d1".into()),
            }),
            700,
            Some("p1"),
        );
        let json = serde_json::to_value(&shot).unwrap();
        assert_eq!(json["event_type"], "shot_made");
        assert_eq!(json["timestamp"], "11:40");
        assert_eq!(json["player_id"], "p1");
        assert_eq!(json["details"]["shot_type"], "fga_threepoint");
        assert_eq!(json["details"]["points"], 3);
        assert_eq!(json["details"]["assist_player_id"], Value::Null);
        assert!(json["details"]["player_states"].is_object());
        assert!(json["details"].get("event_type").is_none());
    }

    #[test]
    fn test_three_event_roundtrip() {
        let events = vec![
            event(EventDetail::TipOff, 720, Some("c1")),
            event(
                EventDetail::ShotMade(ShotDetail {
                    shot_type: ShotZone::ThreePoint,
                    points: 3,
                    shooting_foul: false,
                    assist_player_id: Some("a1".into()),
                    defender_id: Some("d1".into()),
                }),
                700,
                Some("s1"),
            ),
            event(EventDetail::QuarterEnd { quarter: 1, home_score: 3, away_score: 0 }, 0, None),
        ];

        let text = serde_json::to_string(&events).unwrap();
        let back: Vec<GameEvent> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, events);
        assert_eq!(
            back.iter().map(GameEvent::kind).collect::<Vec<_>>(),
            vec![EventKind::TipOff, EventKind::ShotMade, EventKind::QuarterEnd]
        );
        assert_eq!(back[1].timestamp, 700);
        assert_eq!(back[2].player_id, None);
    }

    #[test]
    fn test_decode_rejects_unknown_kind_and_bad_clock() {
        let bad_kind = r#"{"event_type":"dunk","timestamp":"1:00","quarter":1,"team_id":0,"player_id":null,"details":{}}"#;
        assert!(serde_json::from_str::<GameEvent>(bad_kind).is_err());

        let bad_clock = r#"{"event_type":"tip_off","timestamp":"noon","quarter":1,"team_id":0,"player_id":null,"details":{}}"#;
        assert!(serde_json::from_str::<GameEvent>(bad_clock).is_err());
    }

    #[test]
    fn test_digest_is_stable() {
        let events = vec![event(EventDetail::TipOff, 720, Some("c1"))];
        let a = events_digest(&events).unwrap();
        let b = events_digest(&events.clone()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let other = vec![event(EventDetail::TipOff, 719, Some("c1"))];
        assert_ne!(a, events_digest(&other).unwrap());
    }
}
