//! DFS Lineup Optimizer Library
//!
//! Builds the highest-projected legal daily-fantasy football lineup for a
//! contest site, subject to salary-cap and roster rules plus user constraints
//! such as must-include players, team filters and QB stacks.
//!
//! ## Features
//!
//! - **Site Schemas**: DraftKings, FanDuel and Yahoo roster slots and caps
//! - **Constraint Builder**: Player, team, stack and salary constraints
//! - **Exact Optimization**: 0/1 integer program solved to proven optimality
//! - **Infeasibility Diagnostics**: Classified reasons instead of a bare failure
//! - **Database Storage**: Weekly salary and projection slates in SQLite
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dfs_optimizer::{LineupOptimizer, OptimizationOutcome, PlayerPool, Site};
//! use std::path::Path;
//!
//! # fn example() -> dfs_optimizer::Result<()> {
//! let pool = PlayerPool::from_csv_path(Site::DraftKings, Path::new("week1.csv"))?;
//! let mut optimizer = LineupOptimizer::new("dk", pool)?;
//! optimizer.set_must_include_player("Travis Kelce")?;
//! optimizer.set_qb_receiver_stack("KC");
//!
//! match optimizer.optimize_lineup()? {
//!     OptimizationOutcome::Optimal(lineup) => println!("{}", lineup),
//!     OptimizationOutcome::Infeasible(reasons) => println!("{}", reasons),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a specific database file:
//! ```bash
//! export DFS_OPTIMIZER_DB=/tmp/players.db
//! ```

pub mod cli;
pub mod commands;
pub mod constraints;
pub mod core;
pub mod engine;
pub mod error;
pub mod optimizer;
pub mod pool;
pub mod schema;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{PlayerId, Position, Season, Site, TeamCode, Week};
pub use constraints::{ConstraintSet, GameSlate, StackRequirement, TeamLimit};
pub use engine::{
    Infeasibility, InfeasibleReason, Lineup, LineupSlot, LineupSolver, MicroLpSolver,
    OptimizationEngine, OptimizationOutcome, ReasonKind,
};
pub use error::{DfsError, Result};
pub use optimizer::{optimize_sites, LineupOptimizer};
pub use pool::{PlayerPool, PlayerRecord, PlayerRef};
pub use schema::{RosterSchema, Slot};

pub const DB_PATH_ENV_VAR: &str = "DFS_OPTIMIZER_DB";
