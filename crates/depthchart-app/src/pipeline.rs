// Roster-to-chart pipeline: team selection, scoring, assignment.

use anyhow::bail;
use depthchart_core::config::Config;
use depthchart_football::assign::{assign_by_key, AssignOptions};
use depthchart_football::chart::DepthChart;
use depthchart_football::roster::{team_players, Roster};
use depthchart_football::scoring::RoleScoreCache;
use tracing::info;

/// The team a chart is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// `None` when the export has no league column.
    pub league: Option<String>,
    pub team: String,
}

/// Resolve the requested team and league against the roster.
///
/// Missing choices default to the first league in file order and the first
/// team (alphabetically) within it.
pub fn select_team(
    roster: &Roster,
    team: Option<&str>,
    league: Option<&str>,
) -> anyhow::Result<Selection> {
    let leagues = roster.leagues();
    let league = match league {
        Some(l) if leagues.iter().any(|known| known == l) => Some(l.to_string()),
        Some(l) => bail!("league '{}' not in roster (known: {})", l, leagues.join(", ")),
        None => leagues.into_iter().next(),
    };

    let teams = roster.teams(league.as_deref());
    let team = match team {
        Some(t) if teams.iter().any(|known| known == t) => t.to_string(),
        Some(t) => bail!("team '{}' not in roster (known: {})", t, teams.join(", ")),
        None => match teams.into_iter().next() {
            Some(first) => first,
            None => bail!("roster has no teams to chart"),
        },
    };

    Ok(Selection { league, team })
}

/// Score the whole roster, then assign the selected team.
///
/// Scoring runs before selection so every player is ranked against the
/// full league pool rather than their own squad. Charts built from the same
/// roster and scoring config share one scoring pass through `cache`.
pub fn build_chart(
    cache: &mut RoleScoreCache,
    config: &Config,
    roster: &Roster,
    selection: &Selection,
    formation: Option<&str>,
) -> DepthChart {
    let scored = cache.scores(&roster.players, &config.scoring);
    let squad = team_players(scored, &selection.team, selection.league.as_deref());
    info!(
        "{} players selected for {}",
        squad.len(),
        selection.team
    );

    let key = formation.unwrap_or(&config.assignment.default_formation);
    assign_by_key(&squad, key, &AssignOptions::from(&config.assignment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthchart_football::player::Player;

    fn roster() -> Roster {
        let players = vec![
            Player::new("A", "GK", 900.0).with_team("Rovers", "Premier"),
            Player::new("B", "CF", 900.0).with_team("Albion", "Premier"),
            Player::new("C", "CB", 900.0).with_team("Harbour", "Championship"),
        ];
        Roster {
            players,
            columns: vec!["Player".into(), "Team".into(), "League".into()],
        }
    }

    #[test]
    fn defaults_to_first_league_and_team() {
        let selection = select_team(&roster(), None, None).unwrap();
        assert_eq!(selection.league.as_deref(), Some("Premier"));
        assert_eq!(selection.team, "Albion");
    }

    #[test]
    fn team_must_belong_to_league() {
        let err = select_team(&roster(), Some("Harbour"), Some("Premier")).unwrap_err();
        assert!(err.to_string().contains("team 'Harbour' not in roster"));
        let ok = select_team(&roster(), Some("Harbour"), Some("Championship")).unwrap();
        assert_eq!(ok.team, "Harbour");
    }

    #[test]
    fn unknown_league_is_an_error() {
        let err = select_team(&roster(), None, Some("Serie Z")).unwrap_err();
        assert!(err.to_string().contains("Serie Z"));
    }

    #[test]
    fn roster_without_leagues() {
        let roster = Roster {
            players: vec![Player::new("A", "GK", 900.0).with_team("Rovers", "")],
            columns: vec!["Player".into(), "Team".into()],
        };
        let selection = select_team(&roster, None, None).unwrap();
        assert_eq!(selection, Selection { league: None, team: "Rovers".into() });
    }

    #[test]
    fn empty_roster_has_nothing_to_select() {
        assert!(select_team(&Roster::default(), None, None).is_err());
    }

    #[test]
    fn build_chart_uses_formation_override() {
        let roster = roster();
        let selection = select_team(&roster, Some("Rovers"), None).unwrap();
        let mut cache = RoleScoreCache::new();
        let chart = build_chart(
            &mut cache,
            &Config::default(),
            &roster,
            &selection,
            Some("3-5-2"),
        );
        assert_eq!(chart.formation, "3-5-2");
        assert_eq!(chart.len(), 1);
        assert_eq!(chart.slot("GK").unwrap().starter().unwrap().name, "A");

        let chart = build_chart(&mut cache, &Config::default(), &roster, &selection, None);
        assert_eq!(chart.formation, "4-2-3-1");
    }

    #[test]
    fn charts_from_one_roster_share_a_scoring_pass() {
        let roster = roster();
        let config = Config::default();
        let mut cache = RoleScoreCache::new();
        for team in ["Rovers", "Albion"] {
            let selection = select_team(&roster, Some(team), None).unwrap();
            build_chart(&mut cache, &config, &roster, &selection, None);
        }
        assert_eq!((cache.misses(), cache.hits()), (1, 1));

        let mut stricter = config.clone();
        stricter.scoring.min_minutes = 1000.0;
        let selection = select_team(&roster, Some("Rovers"), None).unwrap();
        build_chart(&mut cache, &stricter, &roster, &selection, None);
        assert_eq!(cache.misses(), 2);
    }
}
