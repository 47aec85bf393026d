// Position taxonomy: raw scouting tokens to slot categories, sides and
// role buckets.
//
// Every lookup is total. Unknown tokens resolve to fixed defaults (CM, neutral
// side, ATT bucket) so malformed position data degrades instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw tokens that may fill a wingback-only slot.
pub const WINGBACK_TOKENS: &[&str] = &["LB", "LWB", "RB", "RWB"];

/// Every raw token the taxonomy recognises, in pitch order.
pub const KNOWN_TOKENS: &[&str] = &[
    "GK", "CB", "LCB", "RCB", "LB", "LWB", "RB", "RWB", "DMF", "LDMF", "RDMF", "LCMF", "RCMF",
    "AMF", "LAMF", "LW", "LWF", "RAMF", "RW", "RWF", "CF",
];

// ---------------------------------------------------------------------------
// Canonical slot categories
// ---------------------------------------------------------------------------

/// Normalised slot category. Formation slot labels use the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Canonical {
    Goalkeeper,
    CentreBack,
    LeftCentreBack,
    RightCentreBack,
    LeftBack,
    LeftWingBack,
    RightBack,
    RightWingBack,
    DefensiveMidfield,
    CentralMidfield,
    AttackingMidfield,
    LeftWing,
    RightWing,
    Striker,
}

/// Order in which slot labels are filled: goalkeeper, defence, midfield,
/// attack. Defensive labels claim wide players before attacking labels can.
pub const FILL_ORDER: &[Canonical] = &[
    Canonical::Goalkeeper,
    Canonical::LeftCentreBack,
    Canonical::CentreBack,
    Canonical::RightCentreBack,
    Canonical::LeftBack,
    Canonical::RightBack,
    Canonical::LeftWingBack,
    Canonical::RightWingBack,
    Canonical::DefensiveMidfield,
    Canonical::CentralMidfield,
    Canonical::AttackingMidfield,
    Canonical::LeftWing,
    Canonical::RightWing,
    Canonical::Striker,
];

impl Canonical {
    /// Map a single raw token (already trimmed and upper-cased).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GK" => Some(Canonical::Goalkeeper),
            "CB" => Some(Canonical::CentreBack),
            "LCB" => Some(Canonical::LeftCentreBack),
            "RCB" => Some(Canonical::RightCentreBack),
            "LB" => Some(Canonical::LeftBack),
            "LWB" => Some(Canonical::LeftWingBack),
            "RB" => Some(Canonical::RightBack),
            "RWB" => Some(Canonical::RightWingBack),
            "DMF" | "LDMF" | "RDMF" => Some(Canonical::DefensiveMidfield),
            "LCMF" | "RCMF" => Some(Canonical::CentralMidfield),
            "AMF" => Some(Canonical::AttackingMidfield),
            "LAMF" | "LW" | "LWF" => Some(Canonical::LeftWing),
            "RAMF" | "RW" | "RWF" => Some(Canonical::RightWing),
            "CF" => Some(Canonical::Striker),
            _ => None,
        }
    }

    /// Parse a slot label ("GK", "LCB", "ST", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "GK" => Some(Canonical::Goalkeeper),
            "CB" => Some(Canonical::CentreBack),
            "LCB" => Some(Canonical::LeftCentreBack),
            "RCB" => Some(Canonical::RightCentreBack),
            "LB" => Some(Canonical::LeftBack),
            "LWB" => Some(Canonical::LeftWingBack),
            "RB" => Some(Canonical::RightBack),
            "RWB" => Some(Canonical::RightWingBack),
            "DM" => Some(Canonical::DefensiveMidfield),
            "CM" => Some(Canonical::CentralMidfield),
            "AM" => Some(Canonical::AttackingMidfield),
            "LW" => Some(Canonical::LeftWing),
            "RW" => Some(Canonical::RightWing),
            "ST" => Some(Canonical::Striker),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Canonical::Goalkeeper => "GK",
            Canonical::CentreBack => "CB",
            Canonical::LeftCentreBack => "LCB",
            Canonical::RightCentreBack => "RCB",
            Canonical::LeftBack => "LB",
            Canonical::LeftWingBack => "LWB",
            Canonical::RightBack => "RB",
            Canonical::RightWingBack => "RWB",
            Canonical::DefensiveMidfield => "DM",
            Canonical::CentralMidfield => "CM",
            Canonical::AttackingMidfield => "AM",
            Canonical::LeftWing => "LW",
            Canonical::RightWing => "RW",
            Canonical::Striker => "ST",
        }
    }

    /// Centre-back family (labels handled by the back-line redistribution).
    pub fn is_centre_back(&self) -> bool {
        matches!(
            self,
            Canonical::CentreBack | Canonical::LeftCentreBack | Canonical::RightCentreBack
        )
    }
}

impl fmt::Display for Canonical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Side affinity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Neutral,
    Right,
}

impl Side {
    pub fn from_token(token: &str) -> Self {
        match token {
            "LCB" | "LCMF" | "LDMF" | "LB" | "LWB" | "LW" | "LWF" | "LAMF" => Side::Left,
            "RCB" | "RCMF" | "RDMF" | "RB" | "RWB" | "RW" | "RWF" | "RAMF" => Side::Right,
            _ => Side::Neutral,
        }
    }

    /// Slot ordering for the multi-slot tie-break: left, neutral, right.
    pub fn sort_order(&self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Neutral => 1,
            Side::Right => 2,
        }
    }

    /// How well a player's side fits a slot's side: 0 perfect, 1 neutral
    /// on either end, 2 opposite.
    pub fn match_score(player: Side, slot: Side) -> u8 {
        if player == Side::Neutral || slot == Side::Neutral {
            1
        } else if player == slot {
            0
        } else {
            2
        }
    }
}

// ---------------------------------------------------------------------------
// Role buckets
// ---------------------------------------------------------------------------

/// Scoring group: players in one bucket share role definitions and are
/// ranked against the same peer pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleBucket {
    Goalkeeper,
    CentreBack,
    FullBack,
    Midfield,
    Attack,
    CentreForward,
}

/// Buckets in scoring order.
pub const ROLE_BUCKETS: &[RoleBucket] = &[
    RoleBucket::Goalkeeper,
    RoleBucket::CentreBack,
    RoleBucket::FullBack,
    RoleBucket::Midfield,
    RoleBucket::Attack,
    RoleBucket::CentreForward,
];

impl RoleBucket {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GK" => Some(RoleBucket::Goalkeeper),
            "CB" | "LCB" | "RCB" => Some(RoleBucket::CentreBack),
            "LB" | "RB" | "LWB" | "RWB" => Some(RoleBucket::FullBack),
            "DMF" | "LDMF" | "RDMF" | "LCMF" | "RCMF" => Some(RoleBucket::Midfield),
            "AMF" | "LAMF" | "LW" | "LWF" | "RAMF" | "RW" | "RWF" => Some(RoleBucket::Attack),
            "CF" => Some(RoleBucket::CentreForward),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            RoleBucket::Goalkeeper => "GK",
            RoleBucket::CentreBack => "CB",
            RoleBucket::FullBack => "FB",
            RoleBucket::Midfield => "CM",
            RoleBucket::Attack => "ATT",
            RoleBucket::CentreForward => "CF",
        }
    }

    /// Raw tokens whose holders form this bucket's peer pool.
    pub fn pool_tokens(&self) -> &'static [&'static str] {
        match self {
            RoleBucket::Goalkeeper => &["GK"],
            RoleBucket::CentreBack => &["CB", "LCB", "RCB"],
            RoleBucket::FullBack => &["LB", "RB", "LWB", "RWB"],
            RoleBucket::Midfield => &["DMF", "LDMF", "RDMF", "LCMF", "RCMF"],
            RoleBucket::Attack => &["AMF", "LAMF", "RAMF", "LW", "LWF", "RW", "RWF"],
            RoleBucket::CentreForward => &["CF"],
        }
    }
}

impl fmt::Display for RoleBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ---------------------------------------------------------------------------
// Position-string functions
// ---------------------------------------------------------------------------

fn normalize(token: &str) -> String {
    token.trim().to_uppercase()
}

/// First comma-separated token, trimmed and upper-cased.
pub fn primary_token(pos: &str) -> String {
    normalize(pos.split(',').next().unwrap_or(""))
}

/// Every non-empty comma-separated token, trimmed and upper-cased, in order.
pub fn all_tokens(pos: &str) -> Vec<String> {
    pos.split(',')
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Tokens after the primary one, used for the secondary-position pass.
pub fn secondary_tokens(pos: &str) -> Vec<String> {
    pos.split(',').skip(1).map(normalize).filter(|t| !t.is_empty()).collect()
}

/// Category of a single token, defaulting unknown tokens to CM.
pub fn canonical_for_token(token: &str) -> Canonical {
    Canonical::from_token(token).unwrap_or(Canonical::CentralMidfield)
}

/// Category of the primary token. Unrecognised input resolves to CM.
pub fn canonical_category(pos: &str) -> Canonical {
    canonical_for_token(&primary_token(pos))
}

pub fn side_affinity(pos: &str) -> Side {
    Side::from_token(&primary_token(pos))
}

/// Scoring bucket of the primary token, defaulting to ATT.
pub fn role_bucket(pos: &str) -> RoleBucket {
    RoleBucket::from_token(&primary_token(pos)).unwrap_or(RoleBucket::Attack)
}

pub fn is_wingback_token(token: &str) -> bool {
    WINGBACK_TOKENS.contains(&token)
}

/// Whether the player lists at least `threshold` positions.
pub fn is_versatile(pos: &str, threshold: usize) -> bool {
    all_tokens(pos).len() >= threshold
}
