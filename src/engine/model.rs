//! Solver-neutral 0/1 integer program.
//!
//! The engine formulates a lineup as a [`BinaryProgram`] and hands it to a
//! [`super::solver::LineupSolver`]. Keeping the model independent of any
//! solving library lets a different backend consume the same formulation.

use serde::Serialize;
use std::fmt;

/// Tolerance used when checking a 0/1 assignment against a constraint.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sense {
    LessEq,
    GreaterEq,
    Equal,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sense::LessEq => "<=",
            Sense::GreaterEq => ">=",
            Sense::Equal => "=",
        };
        write!(f, "{}", s)
    }
}

/// Which lineup rule a constraint encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstraintKind {
    SlotFilled,
    PlayerOnce,
    SalaryCap,
    SalaryFloor,
    MustInclude,
    Stack,
    TeamLimit,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinearConstraint {
    pub kind: ConstraintKind,
    pub label: String,
    pub terms: Vec<(usize, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn activity(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(var, _)| values[*var])
            .map(|(_, coef)| coef)
            .sum()
    }

    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        let lhs = self.activity(values);
        match self.sense {
            Sense::LessEq => lhs <= self.rhs + FEASIBILITY_TOLERANCE,
            Sense::GreaterEq => lhs >= self.rhs - FEASIBILITY_TOLERANCE,
            Sense::Equal => (lhs - self.rhs).abs() <= FEASIBILITY_TOLERANCE,
        }
    }
}

/// Maximize `objective · x` over binary `x` subject to linear constraints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BinaryProgram {
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl BinaryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binary variable with its objective coefficient; returns its index.
    pub fn add_variable(&mut self, objective: f64) -> usize {
        self.objective.push(objective);
        self.objective.len() - 1
    }

    pub fn add_constraint(
        &mut self,
        kind: ConstraintKind,
        label: impl Into<String>,
        terms: Vec<(usize, f64)>,
        sense: Sense,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            kind,
            label: label.into(),
            terms,
            sense,
            rhs,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective_value(&self, values: &[bool]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .filter(|(_, on)| **on)
            .map(|(coef, _)| coef)
            .sum()
    }

    /// Constraints violated by `values`, in formulation order.
    pub fn violations<'a>(&'a self, values: &'a [bool]) -> impl Iterator<Item = &'a LinearConstraint> {
        self.constraints.iter().filter(move |c| !c.is_satisfied(values))
    }

    /// Copy of the program with every constraint of `kind` removed.
    pub fn without(&self, kind: ConstraintKind) -> Self {
        Self {
            objective: self.objective.clone(),
            constraints: self
                .constraints
                .iter()
                .filter(|c| c.kind != kind)
                .cloned()
                .collect(),
        }
    }
}
