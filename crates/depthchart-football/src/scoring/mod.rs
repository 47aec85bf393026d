// Percentile role scoring against league and position peer pools.
//
// For every role bucket and every league, the peer pool is the set of players
// whose primary token belongs to the bucket, who play in that league and who
// cleared the minutes gate. Each pool member gets, per role, the weighted mean
// of their percentile ranks across the role's metrics within that pool.
// Players outside every pool (too few minutes, unknown primary token, blank
// league) get no role scores at all.

pub mod cache;
pub mod percentile;
pub mod roles;

use std::collections::{BTreeSet, HashMap};

use depthchart_core::config::ScoringConfig;
use tracing::debug;

use crate::player::Player;
use crate::taxonomy::{RoleBucket, ROLE_BUCKETS};

pub use cache::{RoleScoreCache, RosterFingerprint};
pub use percentile::percentile_ranks;
pub use roles::{roles_for, RoleDef};

/// Score a roster with the default minutes gate.
pub fn compute_role_scores(players: &[Player]) -> Vec<Player> {
    compute_role_scores_with(players, &ScoringConfig::default())
}

/// Return a copy of the roster with `role_scores` filled in.
///
/// Any scores already present on the input are discarded, so scoring an
/// already-scored roster gives the same result as scoring the raw one.
pub fn compute_role_scores_with(players: &[Player], config: &ScoringConfig) -> Vec<Player> {
    let mut scored: Vec<Player> = players
        .iter()
        .cloned()
        .map(|mut p| {
            p.role_scores.clear();
            p
        })
        .collect();

    // Metrics the export actually carried. Roles referencing anything else
    // simply score on the metrics that exist.
    let available: BTreeSet<&str> = players
        .iter()
        .flat_map(|p| p.metrics.keys().map(String::as_str))
        .collect();
    let leagues = distinct_leagues(players);
    let primary: Vec<String> = players.iter().map(Player::primary_token).collect();

    for bucket in ROLE_BUCKETS {
        let pool_tokens = bucket.pool_tokens();
        for league in &leagues {
            let pool: Vec<usize> = (0..players.len())
                .filter(|&i| {
                    pool_tokens.contains(&primary[i].as_str())
                        && players[i].league == *league
                        && players[i].minutes >= config.min_minutes
                })
                .collect();
            if pool.is_empty() {
                continue;
            }
            debug!(
                "scoring {} pool in '{}': {} players",
                bucket.key(),
                league,
                pool.len()
            );
            score_pool(players, &pool, *bucket, &available, &mut scored);
        }
    }

    scored
}

fn score_pool(
    players: &[Player],
    pool: &[usize],
    bucket: RoleBucket,
    available: &BTreeSet<&str>,
    scored: &mut [Player],
) {
    // Percentile series per metric, aligned with `pool`.
    let mut series: HashMap<&str, Vec<f64>> = HashMap::new();

    for role in roles_for(bucket) {
        for (metric, _) in role.metrics {
            if available.contains(metric) && !series.contains_key(metric) {
                let values: Vec<f64> = pool.iter().map(|&i| players[i].metric(metric)).collect();
                series.insert(*metric, percentile_ranks(&values));
            }
        }

        for (slot, &idx) in pool.iter().enumerate() {
            let pairs = role
                .metrics
                .iter()
                .filter_map(|(metric, w)| series.get(metric).map(|s| (s[slot], *w)));
            if let Some(score) = percentile::weighted_mean(pairs) {
                scored[idx].role_scores.insert(role.name.to_string(), score);
            }
        }
    }
}

/// Distinct non-blank league values in first-appearance order. A blank
/// league matches no pool.
fn distinct_leagues(players: &[Player]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    players
        .iter()
        .filter(|p| !p.league.is_empty() && seen.insert(p.league.as_str()))
        .map(|p| p.league.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cb(name: &str, league: &str, minutes: f64, duels_won: f64) -> Player {
        Player::new(name, "CB", minutes)
            .with_team("T", league)
            .with_metric("Defensive duels won, %", duels_won)
    }

    #[test]
    fn single_metric_role_follows_percentile() {
        let roster = vec![
            cb("A", "L1", 900.0, 70.0),
            cb("B", "L1", 900.0, 50.0),
            cb("C", "L1", 900.0, 60.0),
            cb("D", "L1", 900.0, 40.0),
        ];
        let scored = compute_role_scores(&roster);
        // Only "Defensive duels won, %" exists, so each CB role scores on it.
        let box_def: Vec<f64> = scored.iter().map(|p| p.role_scores["Box Defender"]).collect();
        assert_eq!(box_def, vec![100.0, 50.0, 75.0, 25.0]);
        assert_eq!(scored[0].role_scores["Wide CB"], 100.0);
        // Ball Playing CB has no available metric.
        assert!(!scored[0].role_scores.contains_key("Ball Playing CB"));
    }

    #[test]
    fn below_minutes_gate_gets_no_scores() {
        let roster = vec![cb("A", "L1", 900.0, 70.0), cb("B", "L1", 199.0, 90.0)];
        let scored = compute_role_scores(&roster);
        assert!(scored[1].role_scores.is_empty());
        // B is not in the pool, so A is alone and tops it.
        assert_eq!(scored[0].role_scores["Box Defender"], 100.0);
    }

    #[test]
    fn minutes_gate_is_inclusive() {
        let roster = vec![cb("A", "L1", 200.0, 70.0)];
        let scored = compute_role_scores(&roster);
        assert!(scored[0].role_scores.contains_key("Box Defender"));
    }

    #[test]
    fn configurable_minutes_gate() {
        let roster = vec![cb("A", "L1", 150.0, 70.0)];
        let config = ScoringConfig { min_minutes: 100.0 };
        let scored = compute_role_scores_with(&roster, &config);
        assert!(scored[0].role_scores.contains_key("Box Defender"));
    }

    #[test]
    fn missing_metric_counts_as_zero() {
        let roster = vec![
            cb("A", "L1", 900.0, 70.0),
            Player::new("B", "CB", 900.0).with_team("T", "L1"),
        ];
        let scored = compute_role_scores(&roster);
        assert_eq!(scored[0].role_scores["Box Defender"], 100.0);
        assert_eq!(scored[1].role_scores["Box Defender"], 50.0);
    }

    #[test]
    fn weighted_average_across_metrics() {
        // Box Defender: Aerial duels won, % (3) and Defensive duels won, % (4).
        let a = cb("A", "L1", 900.0, 80.0).with_metric("Aerial duels won, %", 10.0);
        let b = cb("B", "L1", 900.0, 20.0).with_metric("Aerial duels won, %", 90.0);
        let scored = compute_role_scores(&[a, b]);
        let expected_a = (50.0 * 3.0 + 100.0 * 4.0) / 7.0;
        let expected_b = (100.0 * 3.0 + 50.0 * 4.0) / 7.0;
        assert!((scored[0].role_scores["Box Defender"] - expected_a).abs() < 1e-9);
        assert!((scored[1].role_scores["Box Defender"] - expected_b).abs() < 1e-9);
    }

    #[test]
    fn leagues_are_ranked_separately() {
        let roster = vec![
            cb("A", "L1", 900.0, 10.0),
            cb("B", "L2", 900.0, 90.0),
            cb("C", "L2", 900.0, 95.0),
        ];
        let scored = compute_role_scores(&roster);
        assert_eq!(scored[0].role_scores["Box Defender"], 100.0);
        assert_eq!(scored[1].role_scores["Box Defender"], 50.0);
    }

    #[test]
    fn blank_league_is_never_scored() {
        let roster = vec![cb("A", "", 900.0, 70.0), cb("B", "L1", 900.0, 50.0)];
        let scored = compute_role_scores(&roster);
        assert!(scored[0].role_scores.is_empty());
        // A is not B's peer either.
        assert_eq!(scored[1].role_scores["Box Defender"], 100.0);
    }

    #[test]
    fn pools_follow_primary_token_only() {
        let fb = Player::new("F", "LB,CB", 900.0)
            .with_team("T", "L1")
            .with_metric("Defensive duels won, %", 99.0);
        let roster = vec![cb("A", "L1", 900.0, 10.0), fb];
        let scored = compute_role_scores(&roster);
        // The full-back is not in the CB pool.
        assert_eq!(scored[0].role_scores["Box Defender"], 100.0);
        assert!(scored[1].role_scores.contains_key("Defensive FB"));
        assert!(!scored[1].role_scores.contains_key("Box Defender"));
    }

    #[test]
    fn unknown_token_is_never_scored() {
        let roster = vec![Player::new("X", "XYZ", 2000.0).with_metric("Shots per 90", 3.0)];
        let scored = compute_role_scores(&roster);
        assert!(scored[0].role_scores.is_empty());
    }

    #[test]
    fn rescoring_is_idempotent() {
        let roster = vec![cb("A", "L1", 900.0, 70.0), cb("B", "L1", 900.0, 50.0)];
        let once = compute_role_scores(&roster);
        let twice = compute_role_scores(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn stale_scores_are_cleared() {
        let mut p = cb("A", "L1", 10.0, 70.0);
        p.role_scores.insert("Box Defender".into(), 12.0);
        let scored = compute_role_scores(&[p]);
        assert!(scored[0].role_scores.is_empty());
    }

    #[test]
    fn empty_roster() {
        assert!(compute_role_scores(&[]).is_empty());
    }
}
