//! Per-site optimizer facade.
//!
//! A [`LineupOptimizer`] binds one player pool, one roster schema and one
//! constraint set. Optimizers for different sites share nothing mutable, so a
//! batch of them can be solved in parallel with [`optimize_sites`].

use crate::{
    cli::types::{PlayerId, Position, Site, TeamCode},
    constraints::{ConstraintSet, GameSlate},
    engine::{LineupSolver, MicroLpSolver, OptimizationEngine, OptimizationOutcome},
    error::{DfsError, Result},
    pool::{PlayerPool, PlayerRef},
    schema::RosterSchema,
};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LineupOptimizer<S = MicroLpSolver> {
    site: Site,
    pool: Arc<PlayerPool>,
    schema: RosterSchema,
    constraints: ConstraintSet,
    engine: OptimizationEngine<S>,
}

impl LineupOptimizer<MicroLpSolver> {
    /// Build an optimizer for a site named like `"dk"`, `"fd"` or `"yahoo-multi"`.
    ///
    /// # Errors
    ///
    /// - [`DfsError::UnsupportedSite`] for an unknown site name
    /// - [`DfsError::EmptyPool`] if the pool has no players
    /// - [`DfsError::InvalidConstraint`] if the pool was built for another site
    pub fn new(site: &str, pool: impl Into<Arc<PlayerPool>>) -> Result<Self> {
        let site: Site = site.parse()?;
        let pool = pool.into();
        if pool.is_empty() {
            return Err(DfsError::EmptyPool {
                site: site.to_string(),
            });
        }
        if pool.site() != site {
            return Err(DfsError::InvalidConstraint {
                message: format!(
                    "player pool holds {} salaries, not {}",
                    pool.site().display_name(),
                    site.display_name()
                ),
            });
        }
        Ok(Self::from_pool(pool))
    }

    /// Optimizer for the site the pool was built for.
    pub fn from_pool(pool: impl Into<Arc<PlayerPool>>) -> Self {
        let pool = pool.into();
        let site = pool.site();
        Self {
            site,
            pool,
            schema: RosterSchema::for_site(site),
            constraints: ConstraintSet::new(),
            engine: OptimizationEngine::new(),
        }
    }
}

impl<S: LineupSolver> LineupOptimizer<S> {
    /// Replace the site's registered schema.
    pub fn with_schema(mut self, schema: RosterSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Swap the solver backend, keeping pool, schema and constraints.
    pub fn with_solver<T: LineupSolver>(self, solver: T) -> LineupOptimizer<T> {
        LineupOptimizer {
            site: self.site,
            pool: self.pool,
            schema: self.schema,
            constraints: self.constraints,
            engine: OptimizationEngine::with_solver(solver),
        }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn pool(&self) -> &PlayerPool {
        &self.pool
    }

    pub fn schema(&self) -> &RosterSchema {
        &self.schema
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn set_only_include_teams<I, T>(&mut self, teams: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamCode>,
    {
        self.constraints.set_only_include_teams(teams);
    }

    pub fn set_exclude_teams<I, T>(&mut self, teams: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamCode>,
    {
        self.constraints.set_exclude_teams(teams);
    }

    pub fn set_must_include_player(&mut self, player: impl Into<PlayerRef>) -> Result<PlayerId> {
        self.constraints.set_must_include_player(&self.pool, player)
    }

    pub fn set_exclude_player(&mut self, player: impl Into<PlayerRef>) -> Result<PlayerId> {
        self.constraints.set_exclude_player(&self.pool, player)
    }

    pub fn set_qb_receiver_stack(&mut self, team: impl Into<TeamCode>) {
        self.constraints.set_qb_receiver_stack(team);
    }

    pub fn set_qb_receiver_stack_with(
        &mut self,
        team: impl Into<TeamCode>,
        receiver: Option<Position>,
        num_receivers: Option<usize>,
    ) -> Result<()> {
        self.constraints
            .set_qb_receiver_stack_with(team, receiver, num_receivers)
    }

    pub fn set_rb_dst_stack(&mut self, team: impl Into<TeamCode>) {
        self.constraints.set_rb_dst_stack(team);
    }

    pub fn set_max_players_from_team(&mut self, n: usize, team: impl Into<TeamCode>) {
        self.constraints.set_max_players_from_team(n, team);
    }

    pub fn set_min_players_from_team(&mut self, n: usize, team: impl Into<TeamCode>) {
        self.constraints.set_min_players_from_team(n, team);
    }

    pub fn set_num_players_from_team(&mut self, n: usize, team: impl Into<TeamCode>) {
        self.constraints.set_num_players_from_team(n, team);
    }

    pub fn set_must_include_team(&mut self, team: impl Into<TeamCode>) {
        self.constraints.set_must_include_team(team);
    }

    pub fn set_max_salary(&mut self, salary: u32) {
        self.constraints.set_max_salary(salary);
    }

    pub fn set_min_salary(&mut self, salary: u32) {
        self.constraints.set_min_salary(salary);
    }

    /// Restrict the lineup to one window of games.
    pub fn set_game_slate(&mut self, slate: GameSlate) -> Result<()> {
        debug!(site = %self.site, slate = %slate, "setting game slate");
        self.constraints.set_game_slate(&self.pool, slate)
    }

    pub fn set_game_slate_sunday(&mut self) -> Result<()> {
        self.set_game_slate(GameSlate::Sunday)
    }

    /// Sunday 1:00 PM games only.
    pub fn set_game_slate_sunday_early(&mut self) -> Result<()> {
        self.set_game_slate(GameSlate::SundayEarly)
    }

    /// Sunday 1:00 PM and afternoon games.
    pub fn set_game_slate_sunday_early_and_late(&mut self) -> Result<()> {
        self.set_game_slate(GameSlate::SundayEarlyAndLate)
    }

    pub fn set_game_slate_sunday_and_monday(&mut self) -> Result<()> {
        self.set_game_slate(GameSlate::SundayAndMonday)
    }

    pub fn set_game_slate_monday(&mut self) -> Result<()> {
        self.set_game_slate(GameSlate::Monday)
    }

    /// Monday of week n with Thursday of week n + 1. The pool must hold exactly those two weeks.
    pub fn set_game_slate_monday_and_thursday(&mut self) -> Result<()> {
        self.set_game_slate(GameSlate::MondayAndThursday)
    }

    pub fn clear_constraints(&mut self) {
        self.constraints.clear_constraints();
    }

    /// Solve against the current constraint snapshot.
    pub fn optimize_lineup(&self) -> Result<OptimizationOutcome> {
        debug!(
            site = %self.site,
            solver = self.engine.solver().name(),
            "optimizing lineup"
        );
        self.engine
            .solve(&self.pool, &self.schema, &self.constraints)
    }
}

/// Solve several independent optimizers in parallel, one result per input in order.
pub fn optimize_sites<S: LineupSolver>(
    optimizers: &[LineupOptimizer<S>],
) -> Vec<Result<OptimizationOutcome>> {
    optimizers
        .par_iter()
        .map(|optimizer| optimizer.optimize_lineup())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PlayerRecord;

    fn fd_pool() -> PlayerPool {
        PlayerPool::new(
            Site::FanDuel,
            vec![PlayerRecord::new(1, "Solo", "AAA", Position::QB, 7000, 10.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_site_is_rejected() {
        let err = LineupOptimizer::new("nfl-plus", fd_pool()).unwrap_err();
        assert!(matches!(err, DfsError::UnsupportedSite { .. }));
    }

    #[test]
    fn test_site_must_match_pool() {
        assert!(LineupOptimizer::new("fd", fd_pool()).is_ok());
        assert!(LineupOptimizer::new("fanduel", fd_pool()).is_ok());
        assert!(matches!(
            LineupOptimizer::new("dk", fd_pool()),
            Err(DfsError::InvalidConstraint { .. })
        ));
    }

    #[test]
    fn test_resolution_error_leaves_constraints_untouched() {
        let mut optimizer = LineupOptimizer::from_pool(fd_pool());
        assert!(optimizer.set_must_include_player("Nobody").is_err());
        assert!(optimizer.constraints().is_empty());
        assert_eq!(optimizer.schema().salary_cap, 60_000);
    }

    #[test]
    fn test_monday_and_thursday_needs_two_weeks() {
        let mut optimizer = LineupOptimizer::from_pool(fd_pool());
        assert!(matches!(
            optimizer.set_game_slate_monday_and_thursday(),
            Err(DfsError::InvalidConstraint { .. })
        ));
        assert!(optimizer.constraints().game_slate().is_none());

        optimizer.set_game_slate_sunday_early().unwrap();
        assert_eq!(
            optimizer.constraints().game_slate(),
            Some(GameSlate::SundayEarly)
        );
    }
}
