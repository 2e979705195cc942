//! Roster files
//!
//! Three on-disk shapes produce a [`TeamRoster`]:
//! - JSON with `players` keyed by player id (height as `"6-8"` or inches)
//! - JSON in the core roster layout (`players` as an array)
//! - CSV with header `player_id,no,name,pos,height,stre,...,dur`; team id and
//!   name come from the file stem

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use hoops_core::models::parse_height;
use hoops_core::{PlayerRoster, Position, PrimitiveRatings, TeamRoster};

/// Used when a file gives no usable height.
pub const DEFAULT_HEIGHT_INCHES: u8 = 75;

/// Load a roster, picking the parser from the file extension.
pub fn load_roster(path: &Path) -> Result<TeamRoster> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "json" => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
            parse_json_roster(&json)
                .with_context(|| format!("Invalid roster JSON: {}", path.display()))
        }
        "csv" => {
            let team_id = path.file_stem().and_then(|s| s.to_str()).unwrap_or("team");
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
            parse_csv_roster(file, team_id)
                .with_context(|| format!("Invalid roster CSV: {}", path.display()))
        }
        _ => bail!("unsupported roster format '{}' (expected .json or .csv)", path.display()),
    }
}

#[derive(Debug, Deserialize)]
struct KeyedTeamFile {
    team_id: String,
    #[serde(default)]
    team_name: String,
    #[serde(default)]
    abbreviation: String,
    #[serde(default)]
    season: String,
    #[serde(default)]
    coach: String,
    #[serde(default)]
    record: String,
    #[serde(default)]
    arena: String,
    #[serde(default)]
    starters: Option<Vec<String>>,
    players: BTreeMap<String, KeyedPlayer>,
}

#[derive(Debug, Deserialize)]
struct KeyedPlayer {
    #[serde(default)]
    name: String,
    #[serde(default)]
    no: u8,
    pos: Position,
    #[serde(default)]
    height: Option<String>,
    #[serde(default, alias = "height_in_inches")]
    height_inches: Option<u8>,
    #[serde(flatten)]
    ratings: PrimitiveRatings,
}

/// Parse either JSON layout. Keyed players come out in player-id order.
pub fn parse_json_roster(json: &str) -> Result<TeamRoster> {
    let value: serde_json::Value = serde_json::from_str(json).context("Failed to parse JSON")?;
    if value.get("players").map_or(false, serde_json::Value::is_array) {
        return Ok(serde_json::from_value(value)?);
    }

    let file: KeyedTeamFile = serde_json::from_value(value)?;
    let players = file
        .players
        .into_iter()
        .map(|(player_id, p)| {
            let height_inches = p
                .height_inches
                .or_else(|| p.height.as_deref().and_then(parse_height))
                .unwrap_or_else(|| {
                    log::warn!("{player_id}: no usable height, using {DEFAULT_HEIGHT_INCHES} in");
                    DEFAULT_HEIGHT_INCHES
                });
            PlayerRoster {
                player_id,
                name: p.name,
                jersey: p.no,
                position: p.pos,
                height_inches,
                ratings: p.ratings,
            }
        })
        .collect();

    Ok(TeamRoster {
        team_name: if file.team_name.is_empty() { file.team_id.clone() } else { file.team_name },
        team_id: file.team_id,
        abbreviation: file.abbreviation,
        season: file.season,
        coach: file.coach,
        record: file.record,
        arena: file.arena,
        starters: file.starters,
        players,
    })
}

#[derive(Debug, Deserialize)]
struct CsvPlayer {
    player_id: String,
    no: u8,
    name: String,
    pos: Position,
    height: String,
    stre: u8,
    stam: u8,
    spd: u8,
    jmp: u8,
    ins: u8,
    mid: u8,
    tp: u8,
    ft: u8,
    pss: u8,
    hndl: u8,
    reb: u8,
    oiq: u8,
    diq: u8,
    dur: u8,
}

impl CsvPlayer {
    fn ratings(&self) -> PrimitiveRatings {
        PrimitiveRatings {
            hgt: 0,
            stre: self.stre,
            stam: self.stam,
            spd: self.spd,
            jmp: self.jmp,
            ins: self.ins,
            mid: self.mid,
            tp: self.tp,
            ft: self.ft,
            pss: self.pss,
            hndl: self.hndl,
            reb: self.reb,
            oiq: self.oiq,
            diq: self.diq,
            dur: self.dur,
        }
    }
}

/// Parse a CSV roster. Lines starting with `/` are comments; rows without a
/// player id are skipped.
pub fn parse_csv_roster<R: Read>(reader: R, team_id: &str) -> Result<TeamRoster> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'/'))
        .from_reader(reader);

    let mut players = Vec::new();
    for (row, record) in reader.deserialize::<CsvPlayer>().enumerate() {
        let record = record.with_context(|| format!("row {}", row + 1))?;
        if record.player_id.is_empty() {
            continue;
        }
        let height_inches = parse_height(&record.height)
            .with_context(|| format!("{}: invalid height '{}'", record.player_id, record.height))?;
        players.push(PlayerRoster {
            ratings: record.ratings(),
            player_id: record.player_id,
            name: record.name,
            jersey: record.no,
            position: record.pos,
            height_inches,
        });
    }

    Ok(TeamRoster {
        team_id: team_id.to_string(),
        team_name: team_id.to_string(),
        abbreviation: String::new(),
        season: String::new(),
        coach: String::new(),
        record: String::new(),
        arena: String::new(),
        starters: None,
        players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
// exported roster
player_id,no,name,pos,height,stre,stam,spd,jmp,ins,mid,tp,ft,pss,hndl,reb,oiq,diq,dur
p1,30,Sharp Shooter,G,6-2,40,70,75,60,55,80,95,90,70,80,40,85,50,80
p2,23,Big Body,C,7-0,85,60,45,70,85,50,30,60,50,40,90,70,75,70
,0,Nobody,F,6-6,50,50,50,50,50,50,50,50,50,50,50,50,50,50
";

    #[test]
    fn test_parse_csv_roster() {
        let roster = parse_csv_roster(CSV.as_bytes(), "testers24").unwrap();
        assert_eq!(roster.team_id, "testers24");
        assert_eq!(roster.players.len(), 2);

        let shooter = &roster.players[0];
        assert_eq!(shooter.player_id, "p1");
        assert_eq!(shooter.jersey, 30);
        assert_eq!(shooter.position, Position::G);
        assert_eq!(shooter.height_inches, 74);
        assert_eq!(shooter.ratings.tp, 95);
        assert_eq!(shooter.ratings.dur, 80);
        assert_eq!(roster.players[1].height_inches, 84);
    }

    #[test]
    fn test_csv_bad_height_is_an_error() {
        let csv = "player_id,no,name,pos,height,stre,stam,spd,jmp,ins,mid,tp,ft,pss,hndl,reb,oiq,diq,dur\n\
                   p1,1,A,G,tall,50,50,50,50,50,50,50,50,50,50,50,50,50,50\n";
        let err = parse_csv_roster(csv.as_bytes(), "x").unwrap_err();
        assert!(format!("{err:#}").contains("invalid height"));
    }

    #[test]
    fn test_parse_keyed_json_roster() {
        let json = serde_json::json!({
            "team_id": "testers24",
            "team_name": "Test Squad",
            "record": "50-32",
            "players": {
                "b_big": {
                    "name": "Big", "no": 5, "pos": "C", "height": "6-11",
                    "stre": 80, "stam": 60, "spd": 40, "jmp": 60, "ins": 80, "mid": 40,
                    "tp": 20, "ft": 55, "pss": 40, "hndl": 30, "reb": 85, "oiq": 60,
                    "diq": 70, "dur": 70
                },
                "a_guard": {
                    "name": "Guard", "no": 1, "pos": "G", "height_in_inches": 73,
                    "stre": 40, "stam": 70, "spd": 85, "jmp": 60, "ins": 50, "mid": 70,
                    "tp": 80, "ft": 85, "pss": 85, "hndl": 90, "reb": 30, "oiq": 80,
                    "diq": 55, "dur": 75
                }
            }
        });
        let roster = parse_json_roster(&json.to_string()).unwrap();
        assert_eq!(roster.team_name, "Test Squad");
        assert_eq!(roster.record, "50-32");
        let ids: Vec<&str> = roster.players.iter().map(|p| p.player_id.as_str()).collect();
        assert_eq!(ids, ["a_guard", "b_big"]);
        assert_eq!(roster.players[0].height_inches, 73);
        assert_eq!(roster.players[1].height_inches, 83);
        assert_eq!(roster.players[1].ratings.reb, 85);
    }

    #[test]
    fn test_parse_array_json_roster() {
        let roster = TeamRoster {
            team_id: "t".into(),
            team_name: "T".into(),
            abbreviation: String::new(),
            season: String::new(),
            coach: String::new(),
            record: String::new(),
            arena: String::new(),
            starters: None,
            players: vec![PlayerRoster {
                player_id: "p".into(),
                name: "P".into(),
                jersey: 7,
                position: Position::F,
                height_inches: 79,
                ratings: PrimitiveRatings::uniform(50),
            }],
        };
        let json = serde_json::to_string(&roster).unwrap();
        let back = parse_json_roster(&json).unwrap();
        assert_eq!(back.players[0].ratings.hgt, 0);
        assert_eq!(back.players[0].player_id, "p");
        assert_eq!(back.players[0].height_inches, 79);
    }

    #[test]
    fn test_load_roster_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("celtics24.csv");
        fs::File::create(&csv_path).unwrap().write_all(CSV.as_bytes()).unwrap();
        let roster = load_roster(&csv_path).unwrap();
        assert_eq!(roster.team_id, "celtics24");

        let txt_path = dir.path().join("roster.txt");
        fs::write(&txt_path, "").unwrap();
        assert!(load_roster(&txt_path).is_err());
    }
}
