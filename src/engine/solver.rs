//! Solver backends for [`BinaryProgram`]s.

use super::model::{BinaryProgram, Sense};
use crate::error::{DfsError, Result};
use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::debug;

/// Result of an exact solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// An optimal 0/1 assignment, one value per program variable.
    Optimal(Vec<bool>),
    Infeasible,
}

/// Anything that can solve a [`BinaryProgram`] to proven optimality.
///
/// Implementations must either return an optimal assignment, report
/// infeasibility, or fail with [`DfsError::Solver`]. Heuristic answers are
/// not acceptable.
pub trait LineupSolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn solve(&self, program: &BinaryProgram) -> Result<SolveStatus>;
}

/// Pure-Rust branch-and-bound MILP solver (`microlp`) driven through `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl LineupSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, program: &BinaryProgram) -> Result<SolveStatus> {
        let mut vars = ProblemVariables::new();
        let xs: Vec<Variable> = (0..program.num_variables())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective: Expression = program
            .objective()
            .iter()
            .zip(&xs)
            .map(|(coef, x)| *coef * *x)
            .sum();

        let mut model = vars.maximise(objective).using(microlp);
        for c in program.constraints() {
            let lhs: Expression = c.terms.iter().map(|(var, coef)| *coef * xs[*var]).sum();
            let rhs = c.rhs;
            model = match c.sense {
                Sense::LessEq => model.with(constraint!(lhs <= rhs)),
                Sense::GreaterEq => model.with(constraint!(lhs >= rhs)),
                Sense::Equal => model.with(constraint!(lhs == rhs)),
            };
        }

        debug!(
            variables = program.num_variables(),
            constraints = program.constraints().len(),
            "solving with microlp"
        );

        match model.solve() {
            Ok(solution) => Ok(SolveStatus::Optimal(
                xs.iter().map(|x| solution.value(*x) > 0.5).collect(),
            )),
            Err(ResolutionError::Infeasible) => Ok(SolveStatus::Infeasible),
            Err(e) => Err(DfsError::Solver {
                message: e.to_string(),
            }),
        }
    }
}
