//! Optimize command implementation

use super::{load_slate, parse_player_ref};
use crate::{
    cli::{types::{Season, Site, Week}, ConstraintArgs},
    engine::OptimizationOutcome,
    error::Result,
    optimizer::LineupOptimizer,
    pool::PlayerPool,
};
use std::path::PathBuf;
use tracing::info;

/// Parameters for the optimize command
pub struct OptimizeParams {
    pub site: Site,
    pub season: Season,
    pub week: Week,
    pub csv: Option<PathBuf>,
    pub constraints: ConstraintArgs,
    pub as_json: bool,
    pub out: Option<PathBuf>,
}

/// Handle the optimize command
///
/// Returns the outcome so the caller can choose an exit status; an infeasible
/// slate has already been printed by then.
pub fn handle_optimize(params: OptimizeParams) -> Result<OptimizationOutcome> {
    let pool = load_slate(params.site, params.season, params.week, params.csv.as_deref())?;
    let outcome = optimize_pool(pool, &params.constraints)?;
    println!("{}", render_outcome(&outcome, params.as_json)?);
    if let (Some(path), Some(lineup)) = (params.out.as_deref(), outcome.lineup()) {
        lineup.append_to_csv(path)?;
        info!(path = %path.display(), "wrote lineup");
    }
    Ok(outcome)
}

/// Build an optimizer for `pool`, apply `args` and solve.
pub fn optimize_pool(pool: PlayerPool, args: &ConstraintArgs) -> Result<OptimizationOutcome> {
    let mut optimizer = LineupOptimizer::from_pool(pool);
    apply_constraints(&mut optimizer, args)?;
    optimizer.optimize_lineup()
}

/// Translate CLI options into constraint calls. Stops at the first resolution error.
pub fn apply_constraints(optimizer: &mut LineupOptimizer, args: &ConstraintArgs) -> Result<()> {
    if !args.only_teams.is_empty() {
        optimizer.set_only_include_teams(args.only_teams.iter().cloned());
    }
    if !args.exclude_teams.is_empty() {
        optimizer.set_exclude_teams(args.exclude_teams.iter().cloned());
    }
    for player in &args.include_players {
        optimizer.set_must_include_player(parse_player_ref(player))?;
    }
    for player in &args.exclude_players {
        optimizer.set_exclude_player(parse_player_ref(player))?;
    }

    if let Some(team) = &args.qb_stack {
        optimizer.set_qb_receiver_stack_with(team.clone(), args.stack_receiver, args.stack_count)?;
    }
    if let Some(team) = &args.rb_dst_stack {
        optimizer.set_rb_dst_stack(team.clone());
    }

    for limit in &args.max_from_team {
        optimizer.set_max_players_from_team(limit.count, limit.team.clone());
    }
    for limit in &args.min_from_team {
        optimizer.set_min_players_from_team(limit.count, limit.team.clone());
    }
    for limit in &args.num_from_team {
        optimizer.set_num_players_from_team(limit.count, limit.team.clone());
    }

    if let Some(salary) = args.max_salary {
        optimizer.set_max_salary(salary);
    }
    if let Some(salary) = args.min_salary {
        optimizer.set_min_salary(salary);
    }
    if let Some(slate) = args.slate {
        optimizer.set_game_slate(slate)?;
    }
    Ok(())
}

/// Text table or pretty JSON for an outcome.
pub fn render_outcome(outcome: &OptimizationOutcome, as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string_pretty(outcome)?);
    }
    let text = match outcome {
        OptimizationOutcome::Optimal(lineup) => lineup.to_string(),
        OptimizationOutcome::Infeasible(infeasible) => infeasible.to_string(),
    };
    Ok(text.trim_end().to_string())
}
