//! Structural infeasibility checks run before the solver.
//!
//! Every check here is a proof: if it reports a reason, no lineup can satisfy
//! the constraints, so the engine can answer without solving. Infeasibility
//! that only shows up in combination is left to the solver.

use super::lineup::{InfeasibleReason, ReasonKind};
use crate::{
    cli::types::{Position, TeamCode},
    constraints::{ConstraintSet, StackRequirement},
    pool::{PlayerPool, PlayerRecord},
    schema::RosterSchema,
};
use std::collections::BTreeSet;

/// Salary limit after applying a user max-salary on top of the site cap.
pub fn effective_cap(schema: &RosterSchema, constraints: &ConstraintSet) -> u32 {
    constraints
        .max_salary()
        .map_or(schema.salary_cap, |max| max.min(schema.salary_cap))
}

/// Players that survive team and slate filters, exclusions and the roster's positions.
pub fn eligible_players<'a>(
    pool: &'a PlayerPool,
    schema: &RosterSchema,
    constraints: &ConstraintSet,
) -> Vec<&'a PlayerRecord> {
    let rostered = schema.rostered_positions();
    pool.iter()
        .filter(|p| constraints.team_allowed(&p.team))
        .filter(|p| constraints.slate_allows(p))
        .filter(|p| !constraints.must_exclude_players().contains(&p.id))
        .filter(|p| p.salary > 0)
        .filter(|p| rostered.contains(&p.position))
        .collect()
}

pub fn structural_reasons(
    pool: &PlayerPool,
    schema: &RosterSchema,
    constraints: &ConstraintSet,
    eligible: &[&PlayerRecord],
) -> Vec<InfeasibleReason> {
    let mut reasons = Vec::new();
    check_must_include(pool, schema, constraints, &mut reasons);
    check_slot_coverage(schema, eligible, &mut reasons);
    check_stacks(schema, constraints, eligible, &mut reasons);
    check_team_limits(schema, constraints, eligible, &mut reasons);
    check_salary(pool, schema, constraints, eligible, &mut reasons);
    reasons
}

fn check_must_include(
    pool: &PlayerPool,
    schema: &RosterSchema,
    constraints: &ConstraintSet,
    reasons: &mut Vec<InfeasibleReason>,
) {
    let conflict = |message: String| InfeasibleReason::new(ReasonKind::MustIncludeExcludeConflict, message);
    let rostered = schema.rostered_positions();
    let mut placeable = Vec::new();

    for id in constraints.must_include_players() {
        let Some(player) = pool.get(*id) else {
            reasons.push(conflict(format!("must-include player id {} is not in the pool", id)));
            continue;
        };
        if constraints.must_exclude_players().contains(id) {
            reasons.push(conflict(format!(
                "{} ({}) is both required and excluded",
                player.name, id
            )));
        } else if !constraints.team_allowed(&player.team) {
            reasons.push(conflict(format!(
                "{} is required but {} is filtered out by team constraints",
                player.name, player.team
            )));
        } else if !constraints.slate_allows(player) {
            let slate = constraints
                .game_slate()
                .map_or_else(String::new, |s| s.to_string());
            reasons.push(conflict(format!(
                "{} is required but does not play in the {} slate",
                player.name, slate
            )));
        } else if player.salary == 0 {
            reasons.push(conflict(format!(
                "{} is required but has no salary on this site",
                player.name
            )));
        } else if !rostered.contains(&player.position) {
            reasons.push(conflict(format!(
                "{} is required but no {} slot accepts {}",
                player.name, schema.name, player.position
            )));
        } else {
            placeable.push(player);
        }
    }

    // Required players must fit into distinct slots.
    let adjacency: Vec<Vec<usize>> = placeable
        .iter()
        .map(|p| {
            schema
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.accepts(p.position))
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect();
    let placed = max_matching(&adjacency, schema.lineup_size());
    if placed < placeable.len() {
        reasons.push(conflict(format!(
            "only {} of {} required players fit into distinct roster slots",
            placed,
            placeable.len()
        )));
    }
}

fn check_slot_coverage(
    schema: &RosterSchema,
    eligible: &[&PlayerRecord],
    reasons: &mut Vec<InfeasibleReason>,
) {
    let adjacency: Vec<Vec<usize>> = schema
        .slots
        .iter()
        .map(|slot| {
            eligible
                .iter()
                .enumerate()
                .filter(|(_, p)| slot.accepts(p.position))
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect();

    let mut empty_slots = false;
    for (slot, candidates) in schema.slots.iter().zip(&adjacency) {
        if candidates.is_empty() {
            empty_slots = true;
            reasons.push(InfeasibleReason::new(
                ReasonKind::MissingEligiblePlayerForSlot,
                format!("no eligible player for slot {}", slot.name),
            ));
        }
    }
    if empty_slots {
        return;
    }

    let filled = max_matching(&adjacency, eligible.len());
    if filled < schema.lineup_size() {
        reasons.push(InfeasibleReason::new(
            ReasonKind::MissingEligiblePlayerForSlot,
            format!(
                "eligible players can fill only {} of {} slots",
                filled,
                schema.lineup_size()
            ),
        ));
    }
}

fn count(eligible: &[&PlayerRecord], team: &TeamCode, accept: impl Fn(Position) -> bool) -> usize {
    eligible
        .iter()
        .filter(|p| &p.team == team && accept(p.position))
        .count()
}

fn check_stacks(
    schema: &RosterSchema,
    constraints: &ConstraintSet,
    eligible: &[&PlayerRecord],
    reasons: &mut Vec<InfeasibleReason>,
) {
    let unsatisfiable = |team: &TeamCode, detail: String| {
        InfeasibleReason::new(
            ReasonKind::UnsatisfiableStack,
            format!("stack on {}: {}", team, detail),
        )
    };

    // Each QB stack needs its own team's QB in a QB-capable slot.
    let qb_teams: BTreeSet<&TeamCode> = constraints
        .stacks()
        .iter()
        .filter(|s| matches!(s, StackRequirement::QbReceiver { .. }))
        .map(StackRequirement::team)
        .collect();
    let qb_slots = schema
        .slots
        .iter()
        .filter(|s| s.accepts(Position::QB))
        .count();
    if qb_teams.len() > qb_slots {
        let teams: Vec<&str> = qb_teams.iter().map(|t| t.as_str()).collect();
        reasons.push(InfeasibleReason::new(
            ReasonKind::UnsatisfiableStack,
            format!(
                "QB stacks on {} teams ({}) but the roster has {} QB slot(s)",
                qb_teams.len(),
                teams.join(", "),
                qb_slots
            ),
        ));
    }

    for stack in constraints.stacks() {
        let team = stack.team();
        if !constraints.team_allowed(team) {
            reasons.push(unsatisfiable(team, "team is filtered out".to_string()));
            continue;
        }

        let stack_size = match stack {
            StackRequirement::QbReceiver {
                receiver,
                min_receivers,
                ..
            } => {
                let is_receiver = |pos: Position| match receiver {
                    Some(wanted) => pos == *wanted,
                    None => pos.is_receiver(),
                };
                let receiver_label = receiver.map_or("WR/TE".to_string(), |p| p.to_string());

                if count(eligible, team, |p| p == Position::QB) == 0 {
                    reasons.push(unsatisfiable(team, "no eligible QB".to_string()));
                }
                let receivers = count(eligible, team, is_receiver);
                if receivers < *min_receivers {
                    reasons.push(unsatisfiable(
                        team,
                        format!(
                            "needs {} eligible {} but found {}",
                            min_receivers, receiver_label, receivers
                        ),
                    ));
                }
                let receiver_slots = schema
                    .slots
                    .iter()
                    .filter(|s| s.eligible.iter().any(|p| is_receiver(*p)))
                    .count();
                if receiver_slots < *min_receivers {
                    reasons.push(unsatisfiable(
                        team,
                        format!(
                            "needs {} {} but the roster has {} such slots",
                            min_receivers, receiver_label, receiver_slots
                        ),
                    ));
                }
                1 + min_receivers
            }
            StackRequirement::RbDst { .. } => {
                if count(eligible, team, |p| p == Position::RB) == 0 {
                    reasons.push(unsatisfiable(team, "no eligible RB".to_string()));
                }
                if count(eligible, team, |p| p == Position::DST) == 0 {
                    reasons.push(unsatisfiable(team, "no eligible DST".to_string()));
                }
                2
            }
        };

        if let Some(max) = constraints.team_limits().get(team).and_then(|l| l.max) {
            if max < stack_size {
                reasons.push(unsatisfiable(
                    team,
                    format!("needs {} players but at most {} are allowed", stack_size, max),
                ));
            }
        }
    }
}

fn check_team_limits(
    schema: &RosterSchema,
    constraints: &ConstraintSet,
    eligible: &[&PlayerRecord],
    reasons: &mut Vec<InfeasibleReason>,
) {
    let size = schema.lineup_size();
    let mut total_min = 0;

    for (team, limit) in constraints.team_limits() {
        let limit_reason = |message: String| {
            InfeasibleReason::new(ReasonKind::TeamLimit, format!("{}: {}", team, message))
        };
        let min = limit.min.unwrap_or(0);
        total_min += min;

        if let Some(max) = limit.max {
            if min > max {
                reasons.push(limit_reason(format!("minimum {} exceeds maximum {}", min, max)));
            }
            let required = constraints
                .must_include_players()
                .iter()
                .filter_map(|id| eligible.iter().find(|p| p.id == *id))
                .filter(|p| &p.team == team)
                .count();
            if required > max {
                reasons.push(limit_reason(format!(
                    "{} required players exceed maximum {}",
                    required, max
                )));
            }
        }
        if min > size {
            reasons.push(limit_reason(format!(
                "minimum {} exceeds lineup size {}",
                min, size
            )));
        }
        let available = count(eligible, team, |_| true);
        if min > available {
            reasons.push(limit_reason(format!(
                "minimum {} but only {} eligible players",
                min, available
            )));
        }
    }

    if total_min > size {
        reasons.push(InfeasibleReason::new(
            ReasonKind::TeamLimit,
            format!(
                "team minimums add up to {} players but the lineup has {} slots",
                total_min, size
            ),
        ));
    }
}

fn check_salary(
    pool: &PlayerPool,
    schema: &RosterSchema,
    constraints: &ConstraintSet,
    eligible: &[&PlayerRecord],
    reasons: &mut Vec<InfeasibleReason>,
) {
    let cap = effective_cap(schema, constraints);
    let salary_reason = |message: String| InfeasibleReason::new(ReasonKind::SalaryCapViolation, message);

    if let Some(min) = constraints.min_salary() {
        if min > cap {
            reasons.push(salary_reason(format!(
                "minimum salary {} exceeds the salary cap {}",
                min, cap
            )));
        }
    }

    let required: u64 = constraints
        .must_include_players()
        .iter()
        .filter_map(|id| pool.get(*id))
        .map(|p| u64::from(p.salary))
        .sum();
    if required > u64::from(cap) {
        reasons.push(salary_reason(format!(
            "required players cost {} which exceeds the salary cap {}",
            required, cap
        )));
    }

    // Cheapest candidate per slot, ignoring that a player fills one slot only.
    let mut floor: u64 = 0;
    for slot in &schema.slots {
        match eligible
            .iter()
            .filter(|p| slot.accepts(p.position))
            .map(|p| p.salary)
            .min()
        {
            Some(cheapest) => floor += u64::from(cheapest),
            None => return,
        }
    }
    if floor > u64::from(cap) {
        reasons.push(salary_reason(format!(
            "the cheapest possible lineup costs at least {} which exceeds the salary cap {}",
            floor, cap
        )));
    }
}

/// Size of a maximum bipartite matching from `adjacency` rows into `0..right_len`.
pub(crate) fn max_matching(adjacency: &[Vec<usize>], right_len: usize) -> usize {
    let mut owner: Vec<Option<usize>> = vec![None; right_len];
    let mut matched = 0;
    for left in 0..adjacency.len() {
        let mut seen = vec![false; right_len];
        if augment(left, adjacency, &mut owner, &mut seen) {
            matched += 1;
        }
    }
    matched
}

fn augment(
    left: usize,
    adjacency: &[Vec<usize>],
    owner: &mut [Option<usize>],
    seen: &mut [bool],
) -> bool {
    for &right in &adjacency[left] {
        if seen[right] {
            continue;
        }
        seen[right] = true;
        let free = match owner[right] {
            None => true,
            Some(other) => augment(other, adjacency, owner, seen),
        };
        if free {
            owner[right] = Some(left);
            return true;
        }
    }
    false
}
