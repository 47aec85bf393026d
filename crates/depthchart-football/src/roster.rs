// Roster ingestion from scouting-platform CSV exports.
//
// Exports carry a fixed set of descriptive columns plus an open-ended set of
// per-90 metric columns. Descriptive columns are read into typed fields;
// every other column becomes a named metric on the player.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::player::Player;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_PLAYER: &str = "Player";
pub const COL_TEAM: &str = "Team";
pub const COL_LEAGUE: &str = "League";
pub const COL_POSITION: &str = "Position";
pub const COL_MINUTES: &str = "Minutes played";
pub const COL_GOALS: &str = "Goals";
pub const COL_ASSISTS: &str = "Assists";
pub const COL_CONTRACT: &str = "Contract expires";
pub const COL_LOANED_OUT: &str = "Loaned out";
pub const COL_YOUTH: &str = "Youth";

/// Spellings of the on-loan column seen across exports, checked in order.
pub const LOAN_COLUMNS: &[&str] = &["On loan", "On Loan", "on_loan", "Loan", "loan", "On loan?"];

/// Columns that are never treated as performance metrics.
const DESCRIPTIVE_COLUMNS: &[&str] = &[
    COL_PLAYER,
    COL_LEAGUE,
    COL_TEAM,
    COL_POSITION,
    "Age",
    "Market value",
    COL_CONTRACT,
    "Matches played",
    COL_MINUTES,
    COL_GOALS,
    COL_ASSISTS,
    "xG",
    "xA",
    "Birth country",
    "Foot",
    "Height",
    COL_YOUTH,
];

fn is_metric_column(name: &str) -> bool {
    !DESCRIPTIVE_COLUMNS.contains(&name)
        && !name.starts_with("On ")
        && !name.to_lowercase().contains("loan")
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("missing required column '{column}' in {path}")]
    MissingColumn { path: String, column: String },
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// An ingested roster: players in file order plus the header it came with.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub players: Vec<Player>,
    /// Trimmed header names, in file order.
    pub columns: Vec<String>,
}

impl Roster {
    /// Whether the export carried the named column. Missing optional columns
    /// disable the display features that depend on them.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn leagues(&self) -> Vec<String> {
        leagues(&self.players)
    }

    pub fn teams(&self, league: Option<&str>) -> Vec<String> {
        teams(&self.players, league)
    }
}

/// Accept the usual truthy spellings found in boolean-like cells.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "on loan"
    )
}

/// Parse a numeric cell; anything unparseable or non-finite counts as zero.
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn parse_count(raw: &str) -> u32 {
    parse_number(raw).max(0.0).round() as u32
}

/// Header positions of the columns the loader reads by name.
struct HeaderIndex {
    player: usize,
    team: Option<usize>,
    league: Option<usize>,
    position: Option<usize>,
    minutes: Option<usize>,
    goals: Option<usize>,
    assists: Option<usize>,
    contract: Option<usize>,
    loan: Vec<usize>,
    loaned_out: Option<usize>,
    youth: Option<usize>,
    metrics: Vec<(usize, String)>,
}

impl HeaderIndex {
    fn new(columns: &[String]) -> Option<Self> {
        let find = |name: &str| columns.iter().position(|c| c == name);
        Some(HeaderIndex {
            player: find(COL_PLAYER)?,
            team: find(COL_TEAM),
            league: find(COL_LEAGUE),
            position: find(COL_POSITION),
            minutes: find(COL_MINUTES),
            goals: find(COL_GOALS),
            assists: find(COL_ASSISTS),
            contract: find(COL_CONTRACT),
            loan: LOAN_COLUMNS.iter().filter_map(|c| find(c)).collect(),
            loaned_out: find(COL_LOANED_OUT),
            youth: find(COL_YOUTH),
            metrics: columns
                .iter()
                .enumerate()
                .filter(|(_, c)| is_metric_column(c))
                .map(|(i, c)| (i, c.clone()))
                .collect(),
        })
    }
}

fn cell<'a>(record: &'a StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

fn player_from_record(index: &HeaderIndex, record: &StringRecord) -> Option<Player> {
    let name = cell(record, Some(index.player));
    if name.is_empty() {
        return None;
    }

    let minutes = parse_number(cell(record, index.minutes));
    let mut player = Player::new(name, cell(record, index.position), minutes)
        .with_team(cell(record, index.team), cell(record, index.league));
    player.goals = parse_count(cell(record, index.goals));
    player.assists = parse_count(cell(record, index.assists));

    let contract = cell(record, index.contract);
    if !contract.is_empty() {
        player.contract_expires = Some(contract.to_string());
    }

    player.on_loan = index
        .loan
        .iter()
        .any(|&i| parse_flag(record.get(i).unwrap_or("")));
    player.loaned_out = parse_flag(cell(record, index.loaned_out));
    player.youth = parse_flag(cell(record, index.youth));

    for (i, metric) in &index.metrics {
        let value = parse_number(record.get(*i).unwrap_or(""));
        player.metrics.insert(metric.clone(), value);
    }

    Some(player)
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Read a roster from any CSV source. `source` names it in errors.
pub fn load_roster_from_reader<R: Read>(rdr: R, source: &str) -> Result<Roster, RosterError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let csv_err = |e: csv::Error| RosterError::Csv {
        path: source.to_string(),
        source: e,
    };

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let index = HeaderIndex::new(&columns).ok_or_else(|| RosterError::MissingColumn {
        path: source.to_string(),
        column: COL_PLAYER.to_string(),
    })?;

    for optional in [COL_POSITION, COL_MINUTES, COL_LEAGUE, COL_TEAM] {
        if !columns.iter().any(|c| c == optional) {
            warn!("{}: no '{}' column, related features disabled", source, optional);
        }
    }

    let mut players = Vec::new();
    for (row, result) in reader.records().enumerate() {
        match result {
            Ok(record) => match player_from_record(&index, &record) {
                Some(player) => players.push(player),
                None => warn!("{}: skipping row {} with no player name", source, row + 1),
            },
            Err(e) => {
                warn!("{}: skipping malformed row: {}", source, e);
            }
        }
    }

    info!(
        "loaded {} players ({} metric columns) from {}",
        players.len(),
        index.metrics.len(),
        source
    );
    Ok(Roster { players, columns })
}

/// Load a roster CSV from disk.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_roster_from_reader(file, &path.display().to_string())
}

// ---------------------------------------------------------------------------
// Selection helpers
// ---------------------------------------------------------------------------

/// Distinct non-empty leagues in first-appearance order.
pub fn leagues(players: &[Player]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    players
        .iter()
        .filter(|p| !p.league.is_empty())
        .filter(|p| seen.insert(p.league.clone()))
        .map(|p| p.league.clone())
        .collect()
}

/// Distinct non-empty team names, sorted, optionally limited to one league.
pub fn teams(players: &[Player], league: Option<&str>) -> Vec<String> {
    players
        .iter()
        .filter(|p| league.map_or(true, |l| p.league == l))
        .filter(|p| !p.team.is_empty())
        .map(|p| p.team.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Players of one team, keeping roster order.
pub fn team_players(players: &[Player], team: &str, league: Option<&str>) -> Vec<Player> {
    players
        .iter()
        .filter(|p| p.team == team && league.map_or(true, |l| p.league == l))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
