//! Engine results: an optimal lineup or a classified infeasibility.

use crate::{cli::types::PlayerId, error::Result, pool::PlayerRecord};
use serde::Serialize;
use std::{fmt, fs::OpenOptions, path::Path};
use tracing::debug;

/// One filled roster slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupSlot {
    pub slot: String,
    pub player: PlayerRecord,
}

/// A cap-legal roster with every slot filled, in schema slot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    pub site: String,
    pub salary_cap: u32,
    pub slots: Vec<LineupSlot>,
    pub total_salary: u32,
    pub total_projection: f64,
}

impl Lineup {
    pub(crate) fn new(site: String, salary_cap: u32, slots: Vec<LineupSlot>) -> Self {
        let total_salary = slots.iter().map(|s| s.player.salary).sum();
        let total_projection = slots.iter().map(|s| s.player.projection).sum();
        Self {
            site,
            salary_cap,
            slots,
            total_salary,
            total_projection,
        }
    }

    /// Player filling `slot`, if the slot exists.
    pub fn get(&self, slot: &str) -> Option<&PlayerRecord> {
        self.slots
            .iter()
            .find(|s| s.slot == slot)
            .map(|s| &s.player)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.slots.iter().map(|s| &s.player)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players().map(|p| p.id).collect()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn remaining_salary(&self) -> u32 {
        self.salary_cap.saturating_sub(self.total_salary)
    }

    /// Append one row per slot to a CSV file, creating it if needed.
    ///
    /// The header is written only when the file is new or empty, so repeated
    /// runs accumulate lineups in one file.
    pub fn append_to_csv(&self, path: &Path) -> Result<()> {
        let write_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        for s in &self.slots {
            writer.serialize(CsvRow {
                site: &self.site,
                slot: &s.slot,
                id: s.player.id.as_u64(),
                name: &s.player.name,
                team: s.player.team.as_str(),
                position: s.player.position.as_str(),
                salary: s.player.salary,
                points: s.player.projection,
            })?;
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = self.slots.len(), "appended lineup to csv");
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    site: &'a str,
    slot: &'a str,
    id: u64,
    name: &'a str,
    team: &'a str,
    position: &'a str,
    salary: u32,
    points: f64,
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Optimized {} Lineup", self.site)?;
        writeln!(
            f,
            "{:.2} points @ {} salary (cap {})",
            self.total_projection, self.total_salary, self.salary_cap
        )?;
        for s in &self.slots {
            writeln!(
                f,
                "{:<5} {} ({}, {}) {:.2} @ {}",
                s.slot, s.player.name, s.player.team, s.player.position, s.player.projection, s.player.salary
            )?;
        }
        Ok(())
    }
}

/// Broad category of an infeasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonKind {
    SalaryCapViolation,
    MissingEligiblePlayerForSlot,
    MustIncludeExcludeConflict,
    UnsatisfiableStack,
    TeamLimit,
    Unclassified,
}

impl fmt::Display for ReasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReasonKind::SalaryCapViolation => "salary-cap-violation",
            ReasonKind::MissingEligiblePlayerForSlot => "missing-eligible-player-for-slot",
            ReasonKind::MustIncludeExcludeConflict => "must-include-exclude-conflict",
            ReasonKind::UnsatisfiableStack => "unsatisfiable-stack",
            ReasonKind::TeamLimit => "team-limit",
            ReasonKind::Unclassified => "unclassified",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfeasibleReason {
    pub kind: ReasonKind,
    pub message: String,
}

impl InfeasibleReason {
    pub fn new(kind: ReasonKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// No lineup satisfies the active constraints. Reasons are best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Infeasibility {
    pub reasons: Vec<InfeasibleReason>,
}

impl Infeasibility {
    pub fn has(&self, kind: ReasonKind) -> bool {
        self.reasons.iter().any(|r| r.kind == kind)
    }

    pub fn kinds(&self) -> Vec<ReasonKind> {
        self.reasons.iter().map(|r| r.kind).collect()
    }
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "No lineup satisfies the current constraints:")?;
        for reason in &self.reasons {
            writeln!(f, "  {}", reason)?;
        }
        Ok(())
    }
}

/// Outcome of one optimization call. Infeasible is an expected result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OptimizationOutcome {
    Optimal(Lineup),
    Infeasible(Infeasibility),
}

impl OptimizationOutcome {
    pub fn lineup(&self) -> Option<&Lineup> {
        match self {
            OptimizationOutcome::Optimal(lineup) => Some(lineup),
            OptimizationOutcome::Infeasible(_) => None,
        }
    }

    pub fn infeasibility(&self) -> Option<&Infeasibility> {
        match self {
            OptimizationOutcome::Optimal(_) => None,
            OptimizationOutcome::Infeasible(infeasible) => Some(infeasible),
        }
    }

    pub fn into_lineup(self) -> Option<Lineup> {
        match self {
            OptimizationOutcome::Optimal(lineup) => Some(lineup),
            OptimizationOutcome::Infeasible(_) => None,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, OptimizationOutcome::Optimal(_))
    }
}
