// Memoised role scoring keyed on a roster content fingerprint.

use depthchart_core::config::ScoringConfig;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::player::Player;

use super::compute_role_scores_with;

/// Identity of a roster as far as scoring is concerned: its length plus a
/// SHA-256 over every field that feeds the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RosterFingerprint {
    pub len: usize,
    pub digest: [u8; 32],
}

fn update_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

impl RosterFingerprint {
    pub fn of(players: &[Player], config: &ScoringConfig) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(config.min_minutes.to_bits().to_le_bytes());
        for p in players {
            update_str(&mut hasher, &p.key);
            update_str(&mut hasher, &p.position);
            update_str(&mut hasher, &p.league);
            hasher.update(p.minutes.to_bits().to_le_bytes());
            hasher.update((p.metrics.len() as u64).to_le_bytes());
            // BTreeMap iteration is ordered, so equal maps hash equally.
            for (name, value) in &p.metrics {
                update_str(&mut hasher, name);
                hasher.update(value.to_bits().to_le_bytes());
            }
        }
        RosterFingerprint {
            len: players.len(),
            digest: hasher.finalize().into(),
        }
    }

    /// Lowercase hex of the digest.
    pub fn hex(&self) -> String {
        self.digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Single-entry cache in front of `compute_role_scores_with`.
///
/// Scoring dominates the cost of a run; the roster rarely changes between
/// the edits layered on top, so the last result is kept.
#[derive(Debug, Default)]
pub struct RoleScoreCache {
    entry: Option<(RosterFingerprint, Vec<Player>)>,
    hits: u64,
    misses: u64,
}

impl RoleScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scored copy of `players`, recomputed only when the fingerprint moved.
    pub fn scores(&mut self, players: &[Player], config: &ScoringConfig) -> &[Player] {
        let fingerprint = RosterFingerprint::of(players, config);
        let fresh = matches!(&self.entry, Some((fp, _)) if *fp == fingerprint);
        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            debug!("role score cache miss for roster {}", fingerprint.hex());
            self.entry = Some((fingerprint, compute_role_scores_with(players, config)));
        }
        match &self.entry {
            Some((_, scored)) => scored,
            None => &[],
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
