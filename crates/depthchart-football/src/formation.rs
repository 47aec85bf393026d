// Formation catalog: slot layouts with eligibility rules.
//
// Coordinates are percentages of pitch width (x, left to right) and length
// (y, attack at the top). They only matter for rendering.

use serde::Serialize;
use tracing::warn;

use crate::taxonomy::{Canonical, Side, FILL_ORDER};

/// One position on the team sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotSpec {
    /// Unique within the formation ("CB1", "LWB").
    pub id: &'static str,
    /// Display label. Slots sharing a label are siblings.
    pub label: Canonical,
    pub x: u8,
    pub y: u8,
    pub accepts: &'static [Canonical],
    pub side: Side,
    /// Only raw LB/LWB/RB/RWB primaries may fill this slot, never through a
    /// secondary position.
    pub wingback_only: bool,
    /// Primary tokens ranked ahead of everyone else matched for the label.
    pub priority: &'static [&'static str],
}

impl SlotSpec {
    pub fn accepts(&self, category: Canonical) -> bool {
        self.accepts.contains(&category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Formation {
    pub key: &'static str,
    pub slots: &'static [SlotSpec],
}

impl Formation {
    pub fn slot(&self, id: &str) -> Option<&'static SlotSpec> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Sibling slots for a label, in formation order.
    pub fn siblings(&self, label: Canonical) -> Vec<&'static SlotSpec> {
        self.slots.iter().filter(|s| s.label == label).collect()
    }

    /// Labels present in this formation, in fill order.
    pub fn labels(&self) -> Vec<Canonical> {
        FILL_ORDER
            .iter()
            .copied()
            .filter(|label| self.slots.iter().any(|s| s.label == *label))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const GK: Canonical = Canonical::Goalkeeper;
const CB: Canonical = Canonical::CentreBack;
const LCB: Canonical = Canonical::LeftCentreBack;
const RCB: Canonical = Canonical::RightCentreBack;
const LB: Canonical = Canonical::LeftBack;
const LWB: Canonical = Canonical::LeftWingBack;
const RB: Canonical = Canonical::RightBack;
const RWB: Canonical = Canonical::RightWingBack;
const DM: Canonical = Canonical::DefensiveMidfield;
const CM: Canonical = Canonical::CentralMidfield;
const AM: Canonical = Canonical::AttackingMidfield;
const LW: Canonical = Canonical::LeftWing;
const RW: Canonical = Canonical::RightWing;
const ST: Canonical = Canonical::Striker;

const L: Side = Side::Left;
const N: Side = Side::Neutral;
const R: Side = Side::Right;

const ANY_CB: &[Canonical] = &[CB, LCB, RCB];

const fn slot(
    id: &'static str,
    label: Canonical,
    x: u8,
    y: u8,
    accepts: &'static [Canonical],
    side: Side,
) -> SlotSpec {
    SlotSpec {
        id,
        label,
        x,
        y,
        accepts,
        side,
        wingback_only: false,
        priority: &[],
    }
}

const fn wingback(
    id: &'static str,
    label: Canonical,
    x: u8,
    y: u8,
    accepts: &'static [Canonical],
    side: Side,
) -> SlotSpec {
    SlotSpec {
        wingback_only: true,
        ..slot(id, label, x, y, accepts, side)
    }
}

/// Back four shared by every four-at-the-back shape.
macro_rules! back_four {
    () => {
        [
            wingback("LB", LB, 9, 63, &[LB, LWB], L),
            slot("CB1", CB, 32, 67, ANY_CB, L),
            slot("CB2", CB, 68, 67, ANY_CB, R),
            wingback("RB", RB, 91, 63, &[RB, RWB], R),
            slot("GK", GK, 50, 84, &[GK], N),
        ]
    };
}

const F_4231: &[SlotSpec] = &{
    let b = back_four!();
    [
        slot("ST", ST, 50, 9, &[ST], N),
        slot("LW", LW, 13, 25, &[LW, AM], L),
        slot("AM", AM, 50, 24, &[AM], N),
        slot("RW", RW, 87, 25, &[RW, AM], R),
        slot("DM1", DM, 35, 43, &[DM, CM], L),
        slot("DM2", DM, 65, 43, &[DM, CM], R),
        b[0],
        b[1],
        b[2],
        b[3],
        b[4],
    ]
};

const F_433: &[SlotSpec] = &{
    let b = back_four!();
    [
        slot("ST", ST, 50, 9, &[ST], N),
        slot("LW", LW, 14, 16, &[LW], L),
        slot("RW", RW, 86, 16, &[RW], R),
        slot("DM", DM, 22, 36, &[DM, CM], L),
        slot("CM", CM, 50, 32, &[CM, DM, AM], N),
        slot("AM", AM, 78, 36, &[AM, CM], R),
        b[0],
        b[1],
        b[2],
        b[3],
        b[4],
    ]
};

const F_442: &[SlotSpec] = &{
    let b = back_four!();
    [
        slot("ST1", ST, 35, 9, &[ST], L),
        slot("ST2", ST, 65, 9, &[ST], R),
        slot("LW", LW, 9, 34, &[LW, AM], L),
        slot("CM1", CM, 34, 38, &[CM, DM, AM], L),
        slot("CM2", CM, 66, 38, &[CM, DM, AM], R),
        slot("RW", RW, 91, 34, &[RW, AM], R),
        b[0],
        b[1],
        b[2],
        b[3],
        b[4],
    ]
};

const F_352: &[SlotSpec] = &[
    slot("ST1", ST, 35, 9, &[ST], L),
    slot("ST2", ST, 65, 9, &[ST], R),
    wingback("LWB", LWB, 9, 34, &[LWB, LB], L),
    slot("CM1", CM, 28, 40, &[CM, AM], L),
    slot("DM", DM, 50, 36, &[DM, CM], N),
    slot("CM2", CM, 72, 40, &[CM, AM], R),
    wingback("RWB", RWB, 91, 34, &[RWB, RB], R),
    slot("LCB", LCB, 25, 64, &[LCB, CB], L),
    slot("CB", CB, 50, 67, ANY_CB, N),
    slot("RCB", RCB, 75, 64, &[RCB, CB], R),
    slot("GK", GK, 50, 84, &[GK], N),
];

const F_3412: &[SlotSpec] = &[
    slot("ST1", ST, 35, 8, &[ST], L),
    slot("ST2", ST, 65, 8, &[ST], R),
    // Wide forwards have nowhere else to go in this shape; a true #10 still
    // starts ahead of them.
    SlotSpec {
        priority: &["AMF"],
        ..slot("AM", AM, 50, 20, &[AM, LW, RW], N)
    },
    wingback("LWB", LWB, 9, 36, &[LWB, LB], L),
    slot("CM1", CM, 34, 40, &[CM, DM], L),
    slot("CM2", CM, 66, 40, &[CM, DM], R),
    wingback("RWB", RWB, 91, 36, &[RWB, RB], R),
    slot("LCB", LCB, 25, 62, &[LCB, CB], L),
    slot("CB", CB, 50, 65, ANY_CB, N),
    slot("RCB", RCB, 75, 62, &[RCB, CB], R),
    slot("GK", GK, 50, 82, &[GK], N),
];

const F_451: &[SlotSpec] = &{
    let b = back_four!();
    [
        slot("ST", ST, 50, 9, &[ST], N),
        slot("LW", LW, 9, 25, &[LW], L),
        slot("CM1", CM, 30, 33, &[CM, DM], L),
        slot("AM", AM, 50, 25, &[AM], N),
        slot("CM2", CM, 70, 33, &[CM, DM], R),
        slot("RW", RW, 91, 25, &[RW], R),
        b[0],
        b[1],
        b[2],
        b[3],
        b[4],
    ]
};

const F_4141: &[SlotSpec] = &{
    let b = back_four!();
    [
        slot("ST", ST, 50, 9, &[ST], N),
        slot("LW", LW, 9, 26, &[LW], L),
        slot("CM1", CM, 31, 29, &[CM, AM], L),
        slot("CM2", CM, 69, 29, &[CM, AM], R),
        slot("RW", RW, 91, 26, &[RW], R),
        slot("DM", DM, 50, 44, &[DM, CM], N),
        b[0],
        b[1],
        b[2],
        b[3],
        b[4],
    ]
};

const F_343: &[SlotSpec] = &[
    slot("ST", ST, 50, 9, &[ST], N),
    slot("LW", LW, 14, 16, &[LW, AM], L),
    slot("RW", RW, 86, 16, &[RW, AM], R),
    wingback("LWB", LWB, 9, 38, &[LWB, LB], L),
    slot("CM1", CM, 35, 40, &[CM, DM], L),
    slot("CM2", CM, 65, 40, &[CM, DM], R),
    wingback("RWB", RWB, 91, 38, &[RWB, RB], R),
    slot("LCB", LCB, 25, 64, &[LCB, CB], L),
    slot("CB", CB, 50, 67, ANY_CB, N),
    slot("RCB", RCB, 75, 64, &[RCB, CB], R),
    slot("GK", GK, 50, 84, &[GK], N),
];

const F_532: &[SlotSpec] = &[
    slot("ST1", ST, 35, 9, &[ST], L),
    slot("ST2", ST, 65, 9, &[ST], R),
    slot("CM1", CM, 28, 34, &[CM, AM], L),
    slot("DM", DM, 50, 40, &[DM, CM], N),
    slot("CM2", CM, 72, 34, &[CM, AM], R),
    wingback("LWB", LWB, 8, 52, &[LWB, LB], L),
    slot("LCB", LCB, 27, 66, &[LCB, CB], L),
    slot("CB", CB, 50, 69, ANY_CB, N),
    slot("RCB", RCB, 73, 66, &[RCB, CB], R),
    wingback("RWB", RWB, 92, 52, &[RWB, RB], R),
    slot("GK", GK, 50, 85, &[GK], N),
];

/// Every formation, default first.
pub static FORMATIONS: &[Formation] = &[
    Formation { key: "4-2-3-1", slots: F_4231 },
    Formation { key: "4-3-3", slots: F_433 },
    Formation { key: "4-4-2", slots: F_442 },
    Formation { key: "3-5-2", slots: F_352 },
    Formation { key: "3-4-1-2", slots: F_3412 },
    Formation { key: "4-5-1", slots: F_451 },
    Formation { key: "4-1-4-1", slots: F_4141 },
    Formation { key: "3-4-3", slots: F_343 },
    Formation { key: "5-3-2", slots: F_532 },
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn default_formation() -> &'static Formation {
    &FORMATIONS[0]
}

pub fn lookup(key: &str) -> Option<&'static Formation> {
    let key = key.trim();
    FORMATIONS.iter().find(|f| f.key == key)
}

pub fn is_known(key: &str) -> bool {
    lookup(key).is_some()
}

/// Resolve a formation key, falling back to the default for unknown keys.
pub fn formation_or_default(key: &str) -> &'static Formation {
    lookup(key).unwrap_or_else(|| {
        let fallback = default_formation();
        warn!("unknown formation '{}', using {}", key, fallback.key);
        fallback
    })
}

pub fn keys() -> Vec<&'static str> {
    FORMATIONS.iter().map(|f| f.key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_keys() {
        assert_eq!(
            keys(),
            vec!["4-2-3-1", "4-3-3", "4-4-2", "3-5-2", "3-4-1-2", "4-5-1", "4-1-4-1", "3-4-3", "5-3-2"]
        );
        assert_eq!(default_formation().key, "4-2-3-1");
    }

    #[test]
    fn every_formation_fields_eleven() {
        for f in FORMATIONS {
            assert_eq!(f.slots.len(), 11, "{}", f.key);
            let gks = f.slots.iter().filter(|s| s.label == Canonical::Goalkeeper).count();
            assert_eq!(gks, 1, "{}", f.key);
        }
    }

    #[test]
    fn slot_ids_are_unique() {
        for f in FORMATIONS {
            let ids: HashSet<&str> = f.slots.iter().map(|s| s.id).collect();
            assert_eq!(ids.len(), f.slots.len(), "{}", f.key);
        }
    }

    #[test]
    fn slots_accept_their_own_label() {
        for f in FORMATIONS {
            for s in f.slots {
                assert!(s.accepts(s.label), "{} {}", f.key, s.id);
            }
        }
    }

    #[test]
    fn wingback_slots_only_accept_fullback_categories() {
        let fullback = [LB, LWB, RB, RWB];
        for f in FORMATIONS {
            for s in f.slots.iter().filter(|s| s.wingback_only) {
                assert!(s.accepts.iter().all(|c| fullback.contains(c)), "{} {}", f.key, s.id);
            }
        }
    }

    #[test]
    fn sibling_slots_share_accepts() {
        for f in FORMATIONS {
            for label in f.labels() {
                let sibs = f.siblings(label);
                assert!(sibs.windows(2).all(|w| w[0].accepts == w[1].accepts), "{} {}", f.key, label);
            }
        }
    }

    #[test]
    fn back_four_expands_in_place() {
        let f = lookup("4-4-2").unwrap();
        let ids: Vec<&str> = f.slots.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["ST1", "ST2", "LW", "CM1", "CM2", "RW", "LB", "CB1", "CB2", "RB", "GK"]);
        assert!(f.slot("LB").unwrap().wingback_only);
        assert_eq!(f.slot("CB2").unwrap().side, Side::Right);
    }

    #[test]
    fn three_four_one_two_prefers_central_amf() {
        let f = lookup("3-4-1-2").unwrap();
        assert_eq!(f.slot("AM").unwrap().priority, &["AMF"]);
        let with_priority = FORMATIONS
            .iter()
            .flat_map(|f| f.slots.iter())
            .filter(|s| !s.priority.is_empty())
            .count();
        assert_eq!(with_priority, 1);
    }

    #[test]
    fn labels_follow_fill_order() {
        let f = lookup("4-2-3-1").unwrap();
        assert_eq!(f.labels(), vec![GK, CB, LB, RB, DM, AM, LW, RW, ST]);
        assert_eq!(f.siblings(CB).iter().map(|s| s.id).collect::<Vec<_>>(), vec!["CB1", "CB2"]);
    }

    #[test]
    fn unknown_key_falls_back() {
        assert!(lookup("2-3-5").is_none());
        assert!(!is_known("2-3-5"));
        assert_eq!(formation_or_default("2-3-5").key, "4-2-3-1");
        assert_eq!(formation_or_default(" 3-5-2 ").key, "3-5-2");
    }
}
