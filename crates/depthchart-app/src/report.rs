// Depth chart rendering: plain text for the terminal, JSON for tooling.

use depthchart_core::config::OutputConfig;
use depthchart_core::contract::{contract_years, ContractStatus, ContractTerm};
use depthchart_football::chart::DepthChart;
use depthchart_football::player::{Player, PlayerTags};
use depthchart_football::roster::{Roster, COL_ASSISTS, COL_CONTRACT, COL_GOALS, COL_MINUTES};
use serde::Serialize;

use crate::pipeline::Selection;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What to show, after the export's columns have had their say: a toggle
/// only takes effect when the column it depends on was present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub minutes: bool,
    pub goals: bool,
    pub assists: bool,
    pub roles: bool,
    pub contract: bool,
    /// Calendar year contract terms are counted from.
    pub current_year: i32,
}

impl ReportOptions {
    pub fn new(output: &OutputConfig, roster: &Roster, current_year: i32) -> Self {
        ReportOptions {
            minutes: output.show_minutes && roster.has_column(COL_MINUTES),
            goals: output.show_goals && roster.has_column(COL_GOALS),
            assists: output.show_assists && roster.has_column(COL_ASSISTS),
            roles: output.show_roles,
            contract: roster.has_column(COL_CONTRACT),
            current_year,
        }
    }
}

fn term(player: &Player, opts: &ReportOptions) -> ContractTerm {
    contract_years(player.contract_expires.as_deref().unwrap_or(""), opts.current_year)
}

fn status(player: &Player, opts: &ReportOptions) -> ContractStatus {
    ContractStatus::classify(term(player, opts), player.on_loan)
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// One line per player, starters first in each slot. Starters list every
/// defined role score, everyone else only their best role.
pub fn render_text(chart: &DepthChart, selection: &Selection, opts: &ReportOptions) -> String {
    let mut out = String::new();
    let league = selection
        .league
        .as_deref()
        .map(|l| format!(" ({l})"))
        .unwrap_or_default();
    out.push_str(&format!("{}{} - {}\n", selection.team, league, chart.formation));
    out.push('\n');

    for slot in &chart.slots {
        if slot.players.is_empty() {
            out.push_str(&format!("{:<4} -\n", slot.id));
            continue;
        }
        for (i, player) in slot.players.iter().enumerate() {
            let head = if i == 0 { slot.id.as_str() } else { "" };
            out.push_str(&format!("{:<4} {}\n", head, player_line(player, opts)));
            if opts.roles {
                if i == 0 {
                    for (role, score) in player.ranked_roles() {
                        out.push_str(&role_line(role, score));
                    }
                } else if let Some((role, score)) = player.best_role() {
                    out.push_str(&role_line(role, score));
                }
            }
        }
    }

    if !chart.depth.is_empty() {
        out.push('\n');
        out.push_str("DEPTH\n");
        for player in &chart.depth {
            out.push_str(&format!("{:<4} {}\n", "", player_line(player, opts)));
            if opts.roles {
                if let Some((role, score)) = player.best_role() {
                    out.push_str(&role_line(role, score));
                }
            }
        }
    }

    out
}

/// Indented "Role score" line under a player.
fn role_line(role: &str, score: f64) -> String {
    format!("{:<6} {} {}\n", "", role, score as u32)
}

/// "Name +2 * [LWF!] (On Loan) 1900' 8G 6A"
fn player_line(player: &Player, opts: &ReportOptions) -> String {
    let mut line = player.name.clone();
    if opts.contract {
        line.push_str(&format!(" {}", term(player, opts)));
    }
    if let Some(tags) = &player.tags {
        line.push_str(&tag_suffix(player, tags));
    }
    if opts.contract || player.on_loan {
        let status = status(player, opts);
        if status != ContractStatus::Contracted {
            line.push_str(&format!(" ({})", status.label()));
        }
    }

    let mut stats = Vec::new();
    if opts.minutes {
        stats.push(format!("{}'", player.minutes as i64));
    }
    if opts.goals && player.goals > 0 {
        stats.push(format!("{}G", player.goals));
    }
    if opts.assists && player.assists > 0 {
        stats.push(format!("{}A", player.assists));
    }
    if !stats.is_empty() {
        line.push_str(&format!(" {}", stats.join(" ")));
    }
    line
}

fn tag_suffix(player: &Player, tags: &PlayerTags) -> String {
    let mut suffix = String::new();
    if tags.versatile {
        suffix.push_str(" *");
    }
    if tags.show_position {
        let bang = if tags.out_of_position { "!" } else { "" };
        suffix.push_str(&format!(" [{}{}]", player.primary_token(), bang));
    }
    suffix
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChartReport<'a> {
    team: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    league: Option<&'a str>,
    formation: &'a str,
    slots: Vec<SlotReport<'a>>,
    depth: Vec<PlayerReport<'a>>,
}

#[derive(Debug, Serialize)]
struct SlotReport<'a> {
    id: &'a str,
    label: String,
    players: Vec<PlayerReport<'a>>,
}

#[derive(Debug, Serialize)]
struct PlayerReport<'a> {
    key: &'a str,
    name: &'a str,
    position: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    goals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assists: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract_years: Option<u32>,
    contract_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a PlayerTags>,
    roles: Vec<RoleReport>,
}

#[derive(Debug, Serialize)]
struct RoleReport {
    role: &'static str,
    score: f64,
}

fn player_report<'a>(player: &'a Player, all_roles: bool, opts: &ReportOptions) -> PlayerReport<'a> {
    let roles = if !opts.roles {
        Vec::new()
    } else if all_roles {
        player.ranked_roles()
    } else {
        player.best_role().into_iter().collect()
    };
    PlayerReport {
        key: &player.key,
        name: &player.name,
        position: &player.position,
        minutes: opts.minutes.then_some(player.minutes),
        goals: opts.goals.then_some(player.goals),
        assists: opts.assists.then_some(player.assists),
        contract_years: if opts.contract {
            term(player, opts).years()
        } else {
            None
        },
        contract_status: status(player, opts).label(),
        tags: player.tags.as_ref(),
        roles: roles
            .into_iter()
            .map(|(role, score)| RoleReport { role, score })
            .collect(),
    }
}

/// Pretty-printed JSON document for the chart.
pub fn render_json(
    chart: &DepthChart,
    selection: &Selection,
    opts: &ReportOptions,
) -> serde_json::Result<String> {
    let report = ChartReport {
        team: &selection.team,
        league: selection.league.as_deref(),
        formation: &chart.formation,
        slots: chart
            .slots
            .iter()
            .map(|slot| SlotReport {
                id: &slot.id,
                label: slot.label.to_string(),
                players: slot
                    .players
                    .iter()
                    .enumerate()
                    .map(|(i, p)| player_report(p, i == 0, opts))
                    .collect(),
            })
            .collect(),
        depth: chart
            .depth
            .iter()
            .map(|p| player_report(p, false, opts))
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}
