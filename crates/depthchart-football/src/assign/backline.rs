// Back-line redistribution for centre-back slots.
//
// The generic side tie-break does not keep a back three (or a centre-back
// pair) symmetric: the first centre-back label takes every CB-family player.
// This pass pools whoever sits in the centre-back slots and re-derives the
// split from raw primary tokens only. LCB goes left, RCB goes right, and
// pure CBs then everyone else fill the least occupied group, left first.
// A group left empty takes the last-ranked player of the fullest group.

use tracing::debug;

use crate::player::Placement;
use crate::taxonomy::Side;

use super::{centre_back_slots, Board};

pub(super) fn redistribute(board: &mut Board<'_>) {
    let slots = board.formation.slots;
    let mut groups_slots = centre_back_slots(board.formation);
    groups_slots.sort_by_key(|&s| slots[s].side.sort_order());

    let sides: Vec<Side> = groups_slots.iter().map(|&s| slots[s].side).collect();
    let supported = matches!(
        sides.as_slice(),
        [Side::Left, Side::Right] | [Side::Left, Side::Neutral, Side::Right]
    );
    if !supported {
        return;
    }

    let mut pooled: Vec<(usize, Placement)> = groups_slots
        .iter()
        .flat_map(|&s| board.lists[s].drain(..).collect::<Vec<_>>())
        .collect();
    if pooled.is_empty() {
        return;
    }
    pooled.sort_by(|a, b| board.minutes(b.0).total_cmp(&board.minutes(a.0)));

    let left = 0;
    let right = groups_slots.len() - 1;
    let mut groups: Vec<Vec<(usize, Placement)>> = vec![Vec::new(); groups_slots.len()];
    let mut rest = Vec::new();

    for entry in pooled {
        match board.players[entry.0].primary_token().as_str() {
            "LCB" => groups[left].push(entry),
            "RCB" => groups[right].push(entry),
            _ => rest.push(entry),
        }
    }
    let (pure, overflow): (Vec<_>, Vec<_>) = rest
        .into_iter()
        .partition(|entry| board.players[entry.0].primary_token() == "CB");
    for entry in pure.into_iter().chain(overflow) {
        let target = least_occupied(&groups);
        groups[target].push(entry);
    }
    fill_empty_groups(&mut groups);

    for (group, &slot) in groups.into_iter().zip(&groups_slots) {
        let mut group = group;
        group.sort_by(|a, b| board.minutes(b.0).total_cmp(&board.minutes(a.0)));
        debug!("back line: {} gets {} player(s)", slots[slot].id, group.len());
        board.lists[slot] = group;
    }
}

/// Hand an empty group the lowest-ranked player of the fullest group, so a
/// back line of same-sided tokens still starts someone in every slot.
fn fill_empty_groups(groups: &mut [Vec<(usize, Placement)>]) {
    while let Some(empty) = groups.iter().position(|g| g.is_empty()) {
        let fullest = (0..groups.len())
            .filter(|&g| groups[g].len() >= 2)
            .max_by_key(|&g| (groups[g].len(), std::cmp::Reverse(g)));
        let Some(from) = fullest else {
            return;
        };
        // Groups are built in pooled order, so the last entry ranks lowest.
        let Some(entry) = groups[from].pop() else {
            return;
        };
        groups[empty].push(entry);
    }
}

/// Index of the group with the fewest players, earliest on ties.
fn least_occupied(groups: &[Vec<(usize, Placement)>]) -> usize {
    (0..groups.len())
        .min_by_key(|&g| (groups[g].len(), g))
        .unwrap_or(0)
}
