// Player record and the annotations the assignment pass attaches to it.

use std::collections::BTreeMap;

use depthchart_core::contract::{contract_years_today, ContractStatus, ContractTerm};
use serde::{Deserialize, Serialize};

use crate::scoring::roles::roles_for;
use crate::taxonomy::{self, Canonical, RoleBucket, Side};

/// How a player reached the list they are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Matched a slot through the primary position.
    Primary,
    /// Matched a slot through a listed secondary position.
    Secondary,
    /// Placed by the forced fallback cascade.
    Forced,
    /// Unassigned, in the depth pool.
    Depth,
}

/// Derived display annotations, attached to the copies the engine returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTags {
    pub primary: Canonical,
    pub placement: Placement,
    /// Primary category is not accepted by the slot the player sits in.
    pub out_of_position: bool,
    /// Render the position next to the name.
    pub show_position: bool,
    pub versatile: bool,
}

impl PlayerTags {
    /// Annotate a player for the slot whose accepted categories are `accepts`.
    pub fn for_slot(
        player: &Player,
        accepts: &[Canonical],
        placement: Placement,
        versatility_threshold: usize,
    ) -> Self {
        let primary = player.canonical();
        let out_of_position = placement == Placement::Forced || !accepts.contains(&primary);
        PlayerTags {
            primary,
            placement,
            out_of_position,
            show_position: out_of_position || placement == Placement::Secondary,
            versatile: taxonomy::is_versatile(&player.position, versatility_threshold),
        }
    }

    pub fn for_depth(player: &Player, versatility_threshold: usize) -> Self {
        PlayerTags {
            primary: player.canonical(),
            placement: Placement::Depth,
            out_of_position: false,
            show_position: true,
            versatile: taxonomy::is_versatile(&player.position, versatility_threshold),
        }
    }
}

/// A squad member as ingested from a roster export or entered by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Identity key. Derived from the name, so it may collide.
    pub key: String,
    pub name: String,
    /// Raw comma-separated position tokens, primary first.
    pub position: String,
    pub minutes: f64,
    pub goals: u32,
    pub assists: u32,
    #[serde(default)]
    pub contract_expires: Option<String>,
    #[serde(default)]
    pub on_loan: bool,
    #[serde(default)]
    pub loaned_out: bool,
    #[serde(default)]
    pub youth: bool,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub league: String,
    /// Named performance metrics, looked up by exact column name.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    /// Role name to percentile score. Absent roles are undefined.
    #[serde(default)]
    pub role_scores: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<PlayerTags>,
}

impl Player {
    pub fn new(name: &str, position: &str, minutes: f64) -> Self {
        let name = name.trim().to_string();
        Player {
            key: name.clone(),
            name,
            position: position.to_string(),
            minutes,
            goals: 0,
            assists: 0,
            contract_expires: None,
            on_loan: false,
            loaned_out: false,
            youth: false,
            team: String::new(),
            league: String::new(),
            metrics: BTreeMap::new(),
            role_scores: BTreeMap::new(),
            tags: None,
        }
    }

    /// A hand-entered player. Keys are prefixed so they stay apart from
    /// ingested names.
    pub fn manual(name: &str, position: &str, minutes: f64) -> Self {
        let mut player = Player::new(name, position, minutes);
        player.key = format!("custom_{}", player.name);
        player
    }

    pub fn with_team(mut self, team: &str, league: &str) -> Self {
        self.team = team.to_string();
        self.league = league.to_string();
        self
    }

    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn with_contract(mut self, expires: &str) -> Self {
        self.contract_expires = Some(expires.to_string());
        self
    }

    pub fn primary_token(&self) -> String {
        taxonomy::primary_token(&self.position)
    }

    pub fn tokens(&self) -> Vec<String> {
        taxonomy::all_tokens(&self.position)
    }

    pub fn canonical(&self) -> Canonical {
        taxonomy::canonical_category(&self.position)
    }

    pub fn side(&self) -> Side {
        taxonomy::side_affinity(&self.position)
    }

    pub fn role_bucket(&self) -> RoleBucket {
        taxonomy::role_bucket(&self.position)
    }

    /// Metric value, with missing metrics counting as zero.
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).copied().unwrap_or(0.0)
    }

    pub fn contract_term(&self) -> ContractTerm {
        contract_years_today(self.contract_expires.as_deref().unwrap_or(""))
    }

    pub fn contract_status(&self) -> ContractStatus {
        ContractStatus::classify(self.contract_term(), self.on_loan)
    }

    /// Defined scores for the roles of this player's bucket, best first.
    /// Ties keep catalog order.
    pub fn ranked_roles(&self) -> Vec<(&'static str, f64)> {
        let mut ranked: Vec<(&'static str, f64)> = roles_for(self.role_bucket())
            .iter()
            .filter_map(|role| {
                self.role_scores
                    .get(role.name)
                    .filter(|v| !v.is_nan())
                    .map(|v| (role.name, *v))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    pub fn best_role(&self) -> Option<(&'static str, f64)> {
        self.ranked_roles().into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_keys_on_trimmed_name() {
        let p = Player::new("  Ada Stone ", "CB", 900.0);
        assert_eq!(p.key, "Ada Stone");
        assert_eq!(p.name, "Ada Stone");
    }

    #[test]
    fn manual_player_gets_custom_key() {
        let p = Player::manual("Trialist", "CF", 0.0);
        assert_eq!(p.key, "custom_Trialist");
        assert_eq!(p.name, "Trialist");
    }

    #[test]
    fn derived_position_accessors() {
        let p = Player::new("A", "rcmf, DMF", 100.0);
        assert_eq!(p.primary_token(), "RCMF");
        assert_eq!(p.canonical(), Canonical::CentralMidfield);
        assert_eq!(p.side(), Side::Right);
        assert_eq!(p.role_bucket(), RoleBucket::Midfield);
        assert_eq!(p.tokens(), vec!["RCMF", "DMF"]);
    }

    #[test]
    fn missing_metric_reads_zero() {
        let p = Player::new("A", "CB", 100.0).with_metric("Passes per 90", 41.5);
        assert_eq!(p.metric("Passes per 90"), 41.5);
        assert_eq!(p.metric("Shots per 90"), 0.0);
    }

    #[test]
    fn ranked_roles_best_first_and_skip_foreign_roles() {
        let mut p = Player::new("A", "CB", 1000.0);
        p.role_scores.insert("Ball Playing CB".into(), 40.0);
        p.role_scores.insert("Box Defender".into(), 75.0);
        p.role_scores.insert("Wide CB".into(), 60.0);
        // Not a CB role; ignored.
        p.role_scores.insert("Target Man CF".into(), 99.0);

        let ranked = p.ranked_roles();
        assert_eq!(
            ranked,
            vec![("Box Defender", 75.0), ("Wide CB", 60.0), ("Ball Playing CB", 40.0)]
        );
        assert_eq!(p.best_role(), Some(("Box Defender", 75.0)));
    }

    #[test]
    fn no_scores_no_best_role() {
        let p = Player::new("A", "GK", 10.0);
        assert!(p.ranked_roles().is_empty());
        assert_eq!(p.best_role(), None);
    }

    #[test]
    fn tags_flag_out_of_position() {
        let p = Player::new("A", "LWF", 500.0);
        let tags = PlayerTags::for_slot(&p, &[Canonical::AttackingMidfield], Placement::Primary, 3);
        assert!(tags.out_of_position);
        assert!(tags.show_position);

        let tags = PlayerTags::for_slot(&p, &[Canonical::LeftWing], Placement::Primary, 3);
        assert!(!tags.out_of_position);
        assert!(!tags.show_position);
    }

    #[test]
    fn forced_and_secondary_placements_show_position() {
        let p = Player::new("A", "DMF,CB", 500.0);
        let forced = PlayerTags::for_slot(&p, &[Canonical::DefensiveMidfield], Placement::Forced, 3);
        assert!(forced.out_of_position);

        let secondary =
            PlayerTags::for_slot(&p, &[Canonical::DefensiveMidfield], Placement::Secondary, 3);
        assert!(!secondary.out_of_position);
        assert!(secondary.show_position);
    }

    #[test]
    fn depth_tags_and_versatility() {
        let p = Player::new("A", "LB,LWB,LCB", 500.0);
        let tags = PlayerTags::for_depth(&p, 3);
        assert_eq!(tags.placement, Placement::Depth);
        assert!(tags.show_position);
        assert!(tags.versatile);
        assert!(!PlayerTags::for_depth(&p, 4).versatile);
    }

    #[test]
    fn loan_drives_contract_status() {
        let mut p = Player::new("A", "CB", 1.0).with_contract("2019-06-30");
        assert_eq!(p.contract_term(), ContractTerm::Years(0));
        assert_eq!(p.contract_status(), ContractStatus::OutOfContract);
        p.on_loan = true;
        assert_eq!(p.contract_status(), ContractStatus::OnLoan);
    }
}
