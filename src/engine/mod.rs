//! Lineup optimization engine.
//!
//! The engine turns a pool, a roster schema and a constraint set into a
//! [`BinaryProgram`]: one binary variable per (player, slot) pair where the
//! slot accepts the player's position. It maximizes total projection subject
//! to the roster rules and the active constraints. Structural conflicts are
//! detected before solving and reported as [`OptimizationOutcome::Infeasible`].

pub mod diagnostics;
pub mod lineup;
pub mod model;
pub mod solver;

pub use lineup::{
    Infeasibility, InfeasibleReason, Lineup, LineupSlot, OptimizationOutcome, ReasonKind,
};
pub use model::{BinaryProgram, ConstraintKind, LinearConstraint, Sense};
pub use solver::{LineupSolver, MicroLpSolver, SolveStatus};

use crate::{
    cli::types::{PlayerId, Position},
    constraints::{ConstraintSet, StackRequirement},
    error::{DfsError, Result},
    pool::{PlayerPool, PlayerRecord},
    schema::RosterSchema,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// A formulated lineup problem and the mapping from variables back to players.
#[derive(Debug, Clone)]
pub struct Formulation<'a> {
    pub program: BinaryProgram,
    /// `(player, slot)` for each variable, indexing `players` and the schema's slots.
    pub assignments: Vec<(usize, usize)>,
    pub players: Vec<&'a PlayerRecord>,
}

impl<'a> Formulation<'a> {
    /// Build the program for `players`, which must already be filtered for eligibility.
    pub fn new(
        schema: &RosterSchema,
        constraints: &ConstraintSet,
        players: Vec<&'a PlayerRecord>,
    ) -> Self {
        let mut program = BinaryProgram::new();
        let mut assignments = Vec::new();
        let mut by_player: Vec<Vec<usize>> = vec![Vec::new(); players.len()];
        let mut by_slot: Vec<Vec<usize>> = vec![Vec::new(); schema.slots.len()];

        for (p, player) in players.iter().enumerate() {
            for (s, slot) in schema.slots.iter().enumerate() {
                if slot.accepts(player.position) {
                    let var = program.add_variable(player.projection);
                    assignments.push((p, s));
                    by_player[p].push(var);
                    by_slot[s].push(var);
                }
            }
        }

        let mut formulation = Self {
            program,
            assignments,
            players,
        };

        for (slot, vars) in schema.slots.iter().zip(&by_slot) {
            formulation.program.add_constraint(
                ConstraintKind::SlotFilled,
                format!("fill {}", slot.name),
                unit_terms(vars),
                Sense::Equal,
                1.0,
            );
        }
        for (player, vars) in formulation.players.iter().zip(&by_player) {
            if vars.len() > 1 {
                formulation.program.add_constraint(
                    ConstraintKind::PlayerOnce,
                    format!("use {} once", player.name),
                    unit_terms(vars),
                    Sense::LessEq,
                    1.0,
                );
            }
        }

        let salary_terms = formulation.terms_where(|p| f64::from(p.salary), |_| true);
        let cap = diagnostics::effective_cap(schema, constraints);
        formulation.program.add_constraint(
            ConstraintKind::SalaryCap,
            format!("salary <= {}", cap),
            salary_terms.clone(),
            Sense::LessEq,
            f64::from(cap),
        );
        if let Some(min) = constraints.min_salary() {
            formulation.program.add_constraint(
                ConstraintKind::SalaryFloor,
                format!("salary >= {}", min),
                salary_terms,
                Sense::GreaterEq,
                f64::from(min),
            );
        }

        for id in constraints.must_include_players() {
            let terms = formulation.terms_where(|_| 1.0, |p| p.id == *id);
            formulation.program.add_constraint(
                ConstraintKind::MustInclude,
                format!("include {}", id),
                terms,
                Sense::Equal,
                1.0,
            );
        }

        for stack in constraints.stacks() {
            formulation.add_stack(stack);
        }

        for (team, limit) in constraints.team_limits() {
            let terms = formulation.terms_where(|_| 1.0, |p| &p.team == team);
            if let Some(min) = limit.min {
                formulation.program.add_constraint(
                    ConstraintKind::TeamLimit,
                    format!("at least {} from {}", min, team),
                    terms.clone(),
                    Sense::GreaterEq,
                    min as f64,
                );
            }
            if let Some(max) = limit.max {
                formulation.program.add_constraint(
                    ConstraintKind::TeamLimit,
                    format!("at most {} from {}", max, team),
                    terms,
                    Sense::LessEq,
                    max as f64,
                );
            }
        }

        formulation
    }

    fn add_stack(&mut self, stack: &StackRequirement) {
        match stack {
            StackRequirement::QbReceiver {
                team,
                receiver,
                min_receivers,
            } => {
                let qb = self.terms_where(|_| 1.0, |p| &p.team == team && p.position == Position::QB);
                let n = *min_receivers as f64;
                let mut receivers = self.terms_where(
                    |_| 1.0,
                    |p| {
                        &p.team == team
                            && match receiver {
                                Some(wanted) => p.position == *wanted,
                                None => p.position.is_receiver(),
                            }
                    },
                );
                receivers.extend(qb.iter().map(|(var, _)| (*var, -n)));

                self.program.add_constraint(
                    ConstraintKind::Stack,
                    format!("{} QB", team),
                    qb,
                    Sense::GreaterEq,
                    1.0,
                );
                self.program.add_constraint(
                    ConstraintKind::Stack,
                    format!("{} receivers with QB", team),
                    receivers,
                    Sense::GreaterEq,
                    0.0,
                );
            }
            StackRequirement::RbDst { team } => {
                for position in [Position::RB, Position::DST] {
                    let terms = self.terms_where(|_| 1.0, |p| &p.team == team && p.position == position);
                    self.program.add_constraint(
                        ConstraintKind::Stack,
                        format!("{} {}", team, position),
                        terms,
                        Sense::GreaterEq,
                        1.0,
                    );
                }
            }
        }
    }

    /// Variables whose player matches `keep`, weighted by `coef`.
    fn terms_where(
        &self,
        coef: impl Fn(&PlayerRecord) -> f64,
        keep: impl Fn(&PlayerRecord) -> bool,
    ) -> Vec<(usize, f64)> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, (p, _))| keep(self.players[*p]))
            .map(|(var, (p, _))| (var, coef(self.players[*p])))
            .collect()
    }

    /// Read a solver assignment back into a lineup, checking it against every rule.
    pub fn lineup(&self, schema: &RosterSchema, values: &[bool]) -> Result<Lineup> {
        let inconsistent = |message: String| Err(DfsError::Solver { message });

        if values.len() != self.assignments.len() {
            return inconsistent(format!(
                "solver returned {} values for {} variables",
                values.len(),
                self.assignments.len()
            ));
        }
        if let Some(violated) = self.program.violations(values).next() {
            return inconsistent(format!(
                "solver assignment violates '{}' ({} {} {})",
                violated.label,
                violated.activity(values),
                violated.sense,
                violated.rhs
            ));
        }

        let mut filled: Vec<Option<&PlayerRecord>> = vec![None; schema.slots.len()];
        let mut seen: HashSet<PlayerId> = HashSet::new();
        for (var, _) in values.iter().enumerate().filter(|(_, on)| **on) {
            let (p, s) = self.assignments[var];
            let player = self.players[p];
            if filled[s].is_some() || !seen.insert(player.id) {
                return inconsistent(format!("solver reused slot or player at {}", player.name));
            }
            filled[s] = Some(player);
        }

        let mut slots = Vec::with_capacity(schema.slots.len());
        for (slot, player) in schema.slots.iter().zip(filled) {
            let Some(player) = player else {
                return inconsistent(format!("solver left slot {} empty", slot.name));
            };
            slots.push(LineupSlot {
                slot: slot.name.clone(),
                player: player.clone(),
            });
        }

        Ok(Lineup::new(schema.name.clone(), schema.salary_cap, slots))
    }
}

fn unit_terms(vars: &[usize]) -> Vec<(usize, f64)> {
    vars.iter().map(|&var| (var, 1.0)).collect()
}

/// Solves lineups with an exact [`LineupSolver`].
#[derive(Debug, Clone, Default)]
pub struct OptimizationEngine<S = MicroLpSolver> {
    solver: S,
}

impl OptimizationEngine<MicroLpSolver> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: LineupSolver> OptimizationEngine<S> {
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Find the highest-projection lineup that satisfies every constraint.
    ///
    /// Infeasibility is returned as [`OptimizationOutcome::Infeasible`]. An
    /// `Err` means the solver failed or returned an inconsistent assignment.
    pub fn solve(
        &self,
        pool: &PlayerPool,
        schema: &RosterSchema,
        constraints: &ConstraintSet,
    ) -> Result<OptimizationOutcome> {
        let eligible = diagnostics::eligible_players(pool, schema, constraints);
        debug!(
            site = %schema.name,
            pool = pool.len(),
            eligible = eligible.len(),
            "filtered player pool"
        );

        let reasons = diagnostics::structural_reasons(pool, schema, constraints, &eligible);
        if !reasons.is_empty() {
            for reason in &reasons {
                warn!(site = %schema.name, "{}", reason);
            }
            return Ok(OptimizationOutcome::Infeasible(Infeasibility { reasons }));
        }

        let formulation = Formulation::new(schema, constraints, eligible);
        debug!(
            solver = self.solver.name(),
            variables = formulation.program.num_variables(),
            constraints = formulation.program.constraints().len(),
            "formulated lineup program"
        );

        match self.solver.solve(&formulation.program)? {
            SolveStatus::Optimal(values) => {
                let lineup = formulation.lineup(schema, &values)?;
                info!(
                    site = %schema.name,
                    projection = lineup.total_projection,
                    salary = lineup.total_salary,
                    "found optimal lineup"
                );
                Ok(OptimizationOutcome::Optimal(lineup))
            }
            SolveStatus::Infeasible => {
                let reason = self.classify_infeasible(&formulation, schema, constraints)?;
                warn!(site = %schema.name, "{}", reason);
                Ok(OptimizationOutcome::Infeasible(Infeasibility {
                    reasons: vec![reason],
                }))
            }
        }
    }

    /// The structural checks passed but the solver found no lineup. If the
    /// program becomes feasible without the salary cap, the cap is the reason.
    fn classify_infeasible(
        &self,
        formulation: &Formulation<'_>,
        schema: &RosterSchema,
        constraints: &ConstraintSet,
    ) -> Result<InfeasibleReason> {
        let relaxed = formulation.program.without(ConstraintKind::SalaryCap);
        let reason = match self.solver.solve(&relaxed)? {
            SolveStatus::Optimal(_) => InfeasibleReason::new(
                ReasonKind::SalaryCapViolation,
                format!(
                    "every lineup meeting the other constraints exceeds the salary cap of {}",
                    diagnostics::effective_cap(schema, constraints)
                ),
            ),
            SolveStatus::Infeasible => InfeasibleReason::new(
                ReasonKind::Unclassified,
                "the combination of constraints admits no lineup",
            ),
        };
        Ok(reason)
    }
}
