// Library root: the depth chart engine.
//
// roster -> taxonomy tagging -> percentile role scoring -> slot assignment
// -> depth chart (+ manual edits).

pub mod assign;
pub mod chart;
pub mod formation;
pub mod player;
pub mod roster;
pub mod scoring;
pub mod taxonomy;

pub use assign::{assign, assign_by_key, assign_with, AssignOptions};
pub use chart::{DepthChart, EditError, Location, SlotList};
pub use formation::{formation_or_default, Formation, SlotSpec, FORMATIONS};
pub use player::{Placement, Player, PlayerTags};
pub use roster::{load_roster, Roster, RosterError};
pub use scoring::{compute_role_scores, compute_role_scores_with, RoleScoreCache};
