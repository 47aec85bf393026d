// Slot assignment: roster + formation -> depth chart.
//
// Labels are filled in a fixed order (goalkeeper, defence, midfield, attack)
// so defensive slots claim wide players before the attacking labels compete
// for them. Per label:
//
//   1. Primary pass: unplaced players whose primary category a sibling slot
//      accepts. Wingback-only slots also demand a raw LB/LWB/RB/RWB primary.
//   2. Secondary pass, only when the primary pass found nobody: listed
//      secondary positions, never into wingback-only slots.
//   3. Stable sort by minutes, then by priority tier.
//   4. One sibling takes everyone. Several siblings take one starter each by
//      greedy side matching, and the rest go to the first sibling.
//
// Placement is tracked by roster index, so duplicate keys are harmless.

mod backline;
mod fallback;

use depthchart_core::config::{AssignmentConfig, FallbackPolicy};
use tracing::{debug, info};

use crate::chart::DepthChart;
use crate::formation::{formation_or_default, Formation, SlotSpec};
use crate::player::{Placement, Player, PlayerTags};
use crate::taxonomy::{self, Side};

pub use fallback::fallback_labels;

/// Knobs for one assignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignOptions {
    pub fallback: FallbackPolicy,
    pub versatility_threshold: usize,
    pub redistribute_back_line: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        AssignmentConfig::default().into()
    }
}

impl From<&AssignmentConfig> for AssignOptions {
    fn from(config: &AssignmentConfig) -> Self {
        AssignOptions {
            fallback: config.fallback,
            versatility_threshold: config.versatility_threshold,
            redistribute_back_line: config.redistribute_back_line,
        }
    }
}

impl From<AssignmentConfig> for AssignOptions {
    fn from(config: AssignmentConfig) -> Self {
        AssignOptions::from(&config)
    }
}

/// Working state: slot contents as roster indices, in formation slot order.
struct Board<'a> {
    players: &'a [Player],
    formation: &'a Formation,
    lists: Vec<Vec<(usize, Placement)>>,
    placed: Vec<bool>,
}

impl<'a> Board<'a> {
    fn new(players: &'a [Player], formation: &'a Formation) -> Self {
        Board {
            players,
            formation,
            lists: vec![Vec::new(); formation.slots.len()],
            placed: vec![false; players.len()],
        }
    }

    fn minutes(&self, idx: usize) -> f64 {
        self.players[idx].minutes
    }

    /// Stable sort, most minutes first.
    fn sort_by_minutes(&self, indices: &mut [usize]) {
        indices.sort_by(|a, b| self.minutes(*b).total_cmp(&self.minutes(*a)));
    }

    fn unplaced(&self) -> Vec<usize> {
        (0..self.players.len()).filter(|&i| !self.placed[i]).collect()
    }
}

fn fits_primary(player: &Player, slot: &SlotSpec) -> bool {
    let category = player.canonical();
    if slot.wingback_only {
        return taxonomy::is_wingback_token(&player.primary_token()) && slot.accepts(category);
    }
    slot.accepts(category)
}

fn fits_secondary(player: &Player, slot: &SlotSpec) -> bool {
    if slot.wingback_only {
        return false;
    }
    taxonomy::secondary_tokens(&player.position)
        .iter()
        .any(|t| slot.accepts(taxonomy::canonical_for_token(t)))
}

/// Fill every label of the formation from the unplaced players.
fn fill_labels(board: &mut Board<'_>) {
    for label in board.formation.labels() {
        let siblings: Vec<usize> = (0..board.formation.slots.len())
            .filter(|&i| board.formation.slots[i].label == label)
            .collect();
        let slots = board.formation.slots;

        let mut placement = Placement::Primary;
        let mut matched: Vec<usize> = board
            .unplaced()
            .into_iter()
            .filter(|&i| siblings.iter().any(|&s| fits_primary(&board.players[i], &slots[s])))
            .collect();
        if matched.is_empty() {
            placement = Placement::Secondary;
            matched = board
                .unplaced()
                .into_iter()
                .filter(|&i| siblings.iter().any(|&s| fits_secondary(&board.players[i], &slots[s])))
                .collect();
        }
        if matched.is_empty() {
            continue;
        }

        board.sort_by_minutes(&mut matched);
        let priority: Vec<&str> = siblings
            .iter()
            .flat_map(|&s| slots[s].priority.iter().copied())
            .collect();
        if !priority.is_empty() {
            let players = board.players;
            matched.sort_by_key(|&i| !priority.contains(&players[i].primary_token().as_str()));
        }

        debug!(
            "{}: {} matched via {:?} pass across {} slot(s)",
            label,
            matched.len(),
            placement,
            siblings.len()
        );
        for &i in &matched {
            board.placed[i] = true;
        }

        if siblings.len() == 1 {
            board.lists[siblings[0]] = matched.into_iter().map(|i| (i, placement)).collect();
        } else {
            distribute_siblings(board, &siblings, matched, placement);
        }
    }
}

/// One starter per sibling by side fit, remaining players to the first sibling.
///
/// Greedy: slots are visited left, neutral, right and each takes the best
/// side fit still available, earliest in minutes order on ties. No attempt
/// is made at a globally optimal matching.
fn distribute_siblings(
    board: &mut Board<'_>,
    siblings: &[usize],
    matched: Vec<usize>,
    placement: Placement,
) {
    let slots = board.formation.slots;
    let mut ordered = siblings.to_vec();
    ordered.sort_by_key(|&s| slots[s].side.sort_order());

    let mut used = vec![false; matched.len()];
    let mut starters: Vec<(usize, usize)> = Vec::new();
    for &s in &ordered {
        let best = (0..matched.len())
            .filter(|&m| !used[m])
            .min_by_key(|&m| (Side::match_score(board.players[matched[m]].side(), slots[s].side), m));
        if let Some(m) = best {
            used[m] = true;
            starters.push((s, matched[m]));
        }
    }

    for &s in siblings {
        board.lists[s].clear();
    }
    for (s, idx) in starters {
        board.lists[s].push((idx, placement));
    }
    let rest = (0..matched.len()).filter(|&m| !used[m]).map(|m| (matched[m], placement));
    board.lists[siblings[0]].extend(rest);
}

/// Build annotated copies of every player into a chart.
fn annotate(board: Board<'_>, depth: Vec<usize>, threshold: usize) -> DepthChart {
    let mut chart = DepthChart::empty(board.formation, threshold);
    for (slot_idx, entries) in board.lists.iter().enumerate() {
        let spec = &board.formation.slots[slot_idx];
        chart.slots[slot_idx].players = entries
            .iter()
            .map(|&(i, placement)| {
                let mut p = board.players[i].clone();
                p.tags = Some(PlayerTags::for_slot(&p, spec.accepts, placement, threshold));
                p
            })
            .collect();
    }
    chart.depth = depth
        .into_iter()
        .map(|i| {
            let mut p = board.players[i].clone();
            p.tags = Some(PlayerTags::for_depth(&p, threshold));
            p
        })
        .collect();
    chart
}

/// Assign with default options.
pub fn assign(players: &[Player], formation: &Formation) -> DepthChart {
    assign_with(players, formation, &AssignOptions::default())
}

/// Assign a roster to a formation. The input is not modified; the chart holds
/// annotated copies.
pub fn assign_with(players: &[Player], formation: &Formation, options: &AssignOptions) -> DepthChart {
    let mut board = Board::new(players, formation);
    fill_labels(&mut board);

    if options.redistribute_back_line {
        backline::redistribute(&mut board);
    }

    let mut leftover = board.unplaced();
    board.sort_by_minutes(&mut leftover);
    let depth = match options.fallback {
        FallbackPolicy::Depth => leftover,
        FallbackPolicy::Force => fallback::force_place(&mut board, &leftover),
    };

    info!(
        "assigned {} players to {}: {} in slots, {} in depth",
        players.len(),
        formation.key,
        players.len() - depth.len(),
        depth.len()
    );
    annotate(board, depth, options.versatility_threshold)
}

/// Assign against a formation key, falling back to the default formation for
/// unknown keys.
pub fn assign_by_key(players: &[Player], key: &str, options: &AssignOptions) -> DepthChart {
    assign_with(players, formation_or_default(key), options)
}

/// Slots of `formation` whose label belongs to the centre-back family.
fn centre_back_slots(formation: &Formation) -> Vec<usize> {
    (0..formation.slots.len())
        .filter(|&i| formation.slots[i].label.is_centre_back())
        .collect()
}
