// Forced placement for players the label passes left unplaced.

use tracing::debug;

use crate::player::Placement;
use crate::taxonomy::{self, Canonical};

use super::Board;

/// Slot labels to try, in order, for a raw primary token.
///
/// Distinct from the taxonomy's category mapping: it lists where a player can
/// be pushed once their natural labels are already spoken for.
pub fn fallback_labels(token: &str) -> &'static [Canonical] {
    use Canonical::*;
    match token {
        "GK" => &[Goalkeeper],
        "CB" => &[CentreBack, LeftCentreBack, RightCentreBack],
        "LCB" => &[LeftCentreBack, CentreBack, RightCentreBack],
        "RCB" => &[RightCentreBack, CentreBack, LeftCentreBack],
        "LB" => &[LeftBack, LeftWingBack],
        "LWB" => &[LeftWingBack, LeftBack],
        "RB" => &[RightBack, RightWingBack],
        "RWB" => &[RightWingBack, RightBack],
        "DMF" | "LDMF" | "RDMF" => &[DefensiveMidfield, CentralMidfield],
        "LCMF" | "RCMF" => &[CentralMidfield, DefensiveMidfield, AttackingMidfield],
        "AMF" => &[AttackingMidfield, CentralMidfield],
        "LAMF" | "LW" | "LWF" => &[LeftWing, AttackingMidfield, Striker],
        "RAMF" | "RW" | "RWF" => &[RightWing, AttackingMidfield, Striker],
        "CF" => &[Striker, AttackingMidfield],
        _ => &[],
    }
}

/// Push every leftover player into a slot. Returns the players no slot could
/// take (only possible when every slot is wingback-only).
pub(super) fn force_place(board: &mut Board<'_>, leftover: &[usize]) -> Vec<usize> {
    let slots = board.formation.slots;
    let mut unplaceable = Vec::new();

    for &i in leftover {
        let token = board.players[i].primary_token();
        let wingback = taxonomy::is_wingback_token(&token);
        let eligible = |s: usize| wingback || !slots[s].wingback_only;

        let listed: Vec<usize> = fallback_labels(&token)
            .iter()
            .flat_map(|label| (0..slots.len()).filter(move |&s| slots[s].label == *label))
            .filter(|&s| eligible(s))
            .collect();
        let target = least_populated(board, &listed)
            .or_else(|| least_populated(board, &(0..slots.len()).filter(|&s| eligible(s)).collect::<Vec<_>>()));

        match target {
            Some(s) => {
                let at = backup_position(board, s, i);
                debug!("forced {} into {} at depth {}", board.players[i].name, slots[s].id, at);
                board.lists[s].insert(at, (i, Placement::Forced));
                board.placed[i] = true;
            }
            None => unplaceable.push(i),
        }
    }

    unplaceable
}

/// Where a forced player joins a slot list. An empty slot makes them the
/// starter; otherwise the starter keeps the spot and the player is slotted
/// among the backups by priority tier, then minutes, after any equal entry.
fn backup_position(board: &Board<'_>, slot: usize, idx: usize) -> usize {
    let list = &board.lists[slot];
    if list.is_empty() {
        return 0;
    }
    let priority = board.formation.slots[slot].priority;
    let tier = |i: usize| !priority.contains(&board.players[i].primary_token().as_str());
    let key = (tier(idx), board.minutes(idx));
    let ahead = list[1..]
        .iter()
        .take_while(|&&(j, _)| {
            let (t, m) = (tier(j), board.minutes(j));
            t < key.0 || (t == key.0 && m >= key.1)
        })
        .count();
    1 + ahead
}

/// Candidate with the fewest occupants, earliest candidate on ties.
fn least_populated(board: &Board<'_>, candidates: &[usize]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|&(order, &s)| (board.lists[s].len(), order))
        .map(|(_, &s)| s)
}
