//! CLI argument definitions and parsing.

pub mod types;

use crate::{
    constraints::GameSlate,
    error::{DfsError, Result},
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use types::{Position, Season, Site, TeamCode, Week};

/// `TEAM=N` pair used by the per-team count options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCount {
    pub team: TeamCode,
    pub count: usize,
}

impl FromStr for TeamCount {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self> {
        let (team, count) = s
            .split_once(['=', ':'])
            .ok_or_else(|| DfsError::InvalidConstraint {
                message: format!("expected TEAM=N, got {:?}", s),
            })?;
        Ok(Self {
            team: TeamCode::new(team),
            count: count.trim().parse()?,
        })
    }
}

/// Where the slate comes from and which week it is.
#[derive(Debug, Args)]
pub struct SlateArgs {
    /// Contest site: dk, fd or yahoo-multi.
    #[clap(long, default_value = "dk")]
    pub site: Site,

    /// Season year (e.g. 2025).
    #[clap(long, short, default_value_t = Season::default())]
    pub season: Season,

    /// Single week.
    #[clap(long, short, default_value_t = Week::default())]
    pub week: Week,
}

/// Constraint options for `optimize`.
#[derive(Debug, Default, Args)]
pub struct ConstraintArgs {
    /// Only use players from these teams (repeatable): `-t KC -t BUF`.
    #[clap(long = "team", short = 't')]
    pub only_teams: Vec<TeamCode>,

    /// Never use players from these teams (repeatable).
    #[clap(long = "exclude-team")]
    pub exclude_teams: Vec<TeamCode>,

    /// Require a player by name or id (repeatable): `-i "Travis Kelce"`.
    /// A value made only of digits is always read as a player id.
    #[clap(long = "include", short = 'i')]
    pub include_players: Vec<String>,

    /// Forbid a player by name or id (repeatable). A value made only of
    /// digits is always read as a player id.
    #[clap(long = "exclude", short = 'x')]
    pub exclude_players: Vec<String>,

    /// Stack this team's QB with its pass-catchers.
    #[clap(long)]
    pub qb_stack: Option<TeamCode>,

    /// Restrict the QB stack's receivers to WR or TE.
    #[clap(long, requires = "qb_stack", conflicts_with = "stack_count")]
    pub stack_receiver: Option<Position>,

    /// Number of receivers in the QB stack.
    #[clap(long, requires = "qb_stack")]
    pub stack_count: Option<usize>,

    /// Stack this team's RB with its DST.
    #[clap(long)]
    pub rb_dst_stack: Option<TeamCode>,

    /// At most N players from a team (repeatable): `--max-team KC=2`.
    #[clap(long = "max-team")]
    pub max_from_team: Vec<TeamCount>,

    /// At least N players from a team (repeatable).
    #[clap(long = "min-team")]
    pub min_from_team: Vec<TeamCount>,

    /// Exactly N players from a team (repeatable).
    #[clap(long = "num-team")]
    pub num_from_team: Vec<TeamCount>,

    /// Spend no more than this, on top of the site cap.
    #[clap(long)]
    pub max_salary: Option<u32>,

    /// Spend at least this.
    #[clap(long)]
    pub min_salary: Option<u32>,

    /// Only use games from one window: sunday, sunday-early,
    /// sunday-early-and-late, sunday-and-monday, monday or monday-and-thursday.
    /// Needs a CSV with `datetime` (and `week`) columns.
    #[clap(long)]
    pub slate: Option<GameSlate>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the highest-projected legal lineup for one slate.
    Optimize {
        #[clap(flatten)]
        slate: SlateArgs,

        /// Read players from a CSV file instead of the database.
        #[clap(long)]
        csv: Option<PathBuf>,

        #[clap(flatten)]
        constraints: ConstraintArgs,

        /// Output the result as JSON instead of a table.
        #[clap(long)]
        json: bool,

        /// Append the lineup to this CSV file (header written only if the file is new).
        #[clap(long, value_name = "FILE.csv")]
        out: Option<PathBuf>,
    },

    /// Import a CSV of salaries and projections into the database.
    Import {
        #[clap(flatten)]
        slate: SlateArgs,

        /// CSV with id,name,team,position and <site>_points/<site>_salary columns,
        /// plus optional datetime and week columns.
        #[clap(long)]
        csv: PathBuf,

        /// Clear all data from the database before importing.
        #[clap(long)]
        clear_db: bool,
    },

    /// List supported sites with their caps and roster slots.
    Sites {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "dfs-optimizer",
    about = "Daily fantasy football lineup optimizer"
)]
pub struct DfsCli {
    /// Log debug output (RUST_LOG takes precedence).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        DfsCli::command().debug_assert();
    }

    #[test]
    fn test_team_count_parse() {
        let parsed: TeamCount = "kc=2".parse().unwrap();
        assert_eq!(parsed.team.as_str(), "KC");
        assert_eq!(parsed.count, 2);
        assert_eq!("BUF:3".parse::<TeamCount>().unwrap().count, 3);
        assert!("KC".parse::<TeamCount>().is_err());
        assert!("KC=two".parse::<TeamCount>().is_err());
    }

    #[test]
    fn test_parse_optimize_args() {
        let cli = DfsCli::parse_from([
            "dfs-optimizer",
            "optimize",
            "--site",
            "fd",
            "--csv",
            "slate.csv",
            "-i",
            "Travis Kelce",
            "--qb-stack",
            "kc",
            "--stack-count",
            "2",
            "--max-team",
            "KC=3",
            "--slate",
            "sunday-early",
            "--json",
            "--out",
            "lineups.csv",
        ]);
        match cli.command {
            Commands::Optimize {
                slate,
                csv,
                constraints,
                json,
                out,
            } => {
                assert_eq!(slate.site, Site::FanDuel);
                assert_eq!(csv, Some(PathBuf::from("slate.csv")));
                assert_eq!(constraints.include_players, vec!["Travis Kelce"]);
                assert_eq!(constraints.qb_stack, Some(TeamCode::new("KC")));
                assert_eq!(constraints.stack_count, Some(2));
                assert_eq!(constraints.max_from_team[0].count, 3);
                assert_eq!(constraints.slate, Some(GameSlate::SundayEarly));
                assert!(json);
                assert_eq!(out, Some(PathBuf::from("lineups.csv")));
            }
            other => panic!("Expected optimize, got {:?}", other),
        }
    }

    #[test]
    fn test_player_help_mentions_numeric_ids() {
        let command = DfsCli::command();
        let optimize = command.find_subcommand("optimize").unwrap();
        for name in ["include_players", "exclude_players"] {
            let arg = optimize
                .get_arguments()
                .find(|a| a.get_id() == name)
                .unwrap();
            let help = arg.get_long_help().or(arg.get_help()).unwrap().to_string();
            assert!(help.contains("only of digits"), "{}: {}", name, help);
        }
    }

    #[test]
    fn test_stack_receiver_requires_stack() {
        let result = DfsCli::try_parse_from([
            "dfs-optimizer",
            "optimize",
            "--stack-receiver",
            "WR",
        ]);
        assert!(result.is_err());
    }
}
