// Command line arguments and their config overrides.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use depthchart_core::config::{Config, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "depthchart")]
#[command(about = "Build a football depth chart from a scouting export", long_about = None)]
pub struct Cli {
    /// Directory holding config/ and defaults/ (defaults to the working directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Roster CSV, overrides [data] roster
    #[arg(short, long)]
    pub roster: Option<PathBuf>,

    /// Team to chart (defaults to the first team of the selected league)
    #[arg(short, long)]
    pub team: Option<String>,

    /// League to pick the team from (defaults to the first league in the export)
    #[arg(short, long)]
    pub league: Option<String>,

    /// Formation key, overrides [assignment] default_formation
    #[arg(short, long)]
    pub formation: Option<String>,

    /// Output format, overrides [output] format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Print the formation catalog and exit
    #[arg(long)]
    pub list_formations: bool,

    /// Print leagues and teams found in the roster and exit
    #[arg(long)]
    pub list_teams: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Fold command line values into the loaded config. The formation is
    /// not folded in: an unknown key on the command line falls back to the
    /// default formation, while an unknown key in the file is an error.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(roster) = &self.roster {
            config.data.roster = roster.display().to_string();
        }
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
    }
}
