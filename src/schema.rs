//! Per-site roster schemas.
//!
//! A [`RosterSchema`] is pure data: the salary cap and the ordered slots a
//! lineup has to fill, each with the set of positions allowed in it. The
//! engine only ever reads these fields, so supporting another site means
//! adding a schema here rather than touching the solver.

use crate::{
    cli::types::{Position, Site},
    error::{DfsError, Result},
};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// One named roster slot and the positions that may fill it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub name: String,
    pub eligible: BTreeSet<Position>,
}

impl Slot {
    pub fn new(name: impl Into<String>, eligible: &[Position]) -> Self {
        Self {
            name: name.into(),
            eligible: eligible.iter().copied().collect(),
        }
    }

    pub fn accepts(&self, position: Position) -> bool {
        self.eligible.contains(&position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSchema {
    pub name: String,
    pub salary_cap: u32,
    pub slots: Vec<Slot>,
}

impl RosterSchema {
    /// Build a custom schema.
    ///
    /// # Errors
    ///
    /// [`DfsError::InvalidConstraint`] if the cap is zero, there are no slots,
    /// a slot accepts no position, or two slots share a name.
    pub fn new(name: impl Into<String>, salary_cap: u32, slots: Vec<Slot>) -> Result<Self> {
        let invalid = |message: String| Err(DfsError::InvalidConstraint { message });

        if salary_cap == 0 {
            return invalid("salary cap must be positive".to_string());
        }
        if slots.is_empty() {
            return invalid("roster schema needs at least one slot".to_string());
        }
        let mut names = HashSet::new();
        for slot in &slots {
            if slot.eligible.is_empty() {
                return invalid(format!("slot {} has no eligible positions", slot.name));
            }
            if !names.insert(slot.name.as_str()) {
                return invalid(format!("duplicate slot name {}", slot.name));
            }
        }

        Ok(Self {
            name: name.into(),
            salary_cap,
            slots,
        })
    }

    /// The schema registered for `site`.
    pub fn for_site(site: Site) -> Self {
        let salary_cap = match site {
            Site::DraftKings => 50_000,
            Site::FanDuel => 60_000,
            Site::YahooMulti => 200,
        };
        let dst_slot = match site {
            Site::YahooMulti => "DEF",
            _ => "DST",
        };

        use Position::*;
        let slots = vec![
            Slot::new("QB", &[QB]),
            Slot::new("RB1", &[RB]),
            Slot::new("RB2", &[RB]),
            Slot::new("WR1", &[WR]),
            Slot::new("WR2", &[WR]),
            Slot::new("WR3", &[WR]),
            Slot::new("TE", &[TE]),
            Slot::new("FLEX", &[RB, WR, TE]),
            Slot::new(dst_slot, &[DST]),
        ];

        Self {
            name: site.display_name().to_string(),
            salary_cap,
            slots,
        }
    }

    pub fn lineup_size(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }

    pub fn eligible_positions(&self, slot: &str) -> Option<&BTreeSet<Position>> {
        self.slot(slot).map(|s| &s.eligible)
    }

    /// Positions accepted by at least one slot.
    pub fn rostered_positions(&self) -> BTreeSet<Position> {
        self.slots
            .iter()
            .flat_map(|s| s.eligible.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_schemas_have_nine_slots() {
        for site in Site::ALL {
            let schema = RosterSchema::for_site(site);
            assert_eq!(schema.lineup_size(), 9);
            assert!(schema.slots.iter().all(|s| !s.eligible.is_empty()));
        }
    }

    #[test]
    fn test_salary_caps() {
        assert_eq!(RosterSchema::for_site(Site::DraftKings).salary_cap, 50_000);
        assert_eq!(RosterSchema::for_site(Site::FanDuel).salary_cap, 60_000);
        assert_eq!(RosterSchema::for_site(Site::YahooMulti).salary_cap, 200);
    }

    #[test]
    fn test_flex_eligibility() {
        let schema = RosterSchema::for_site(Site::DraftKings);
        let flex = schema.eligible_positions("FLEX").unwrap();
        assert!(flex.contains(&Position::RB));
        assert!(flex.contains(&Position::WR));
        assert!(flex.contains(&Position::TE));
        assert!(!flex.contains(&Position::QB));
        assert!(schema.eligible_positions("BENCH").is_none());
    }

    #[test]
    fn test_yahoo_names_defense_slot_def() {
        let schema = RosterSchema::for_site(Site::YahooMulti);
        assert!(schema.slot("DEF").unwrap().accepts(Position::DST));
        assert!(schema.slot("DST").is_none());
    }

    #[test]
    fn test_kicker_not_rostered_on_nfl_classic() {
        let schema = RosterSchema::for_site(Site::FanDuel);
        assert!(!schema.rostered_positions().contains(&Position::K));
    }

    #[test]
    fn test_custom_schema_validation() {
        assert!(RosterSchema::new("x", 0, vec![Slot::new("QB", &[Position::QB])]).is_err());
        assert!(RosterSchema::new("x", 100, vec![]).is_err());
        assert!(RosterSchema::new("x", 100, vec![Slot::new("QB", &[])]).is_err());
        assert!(RosterSchema::new(
            "x",
            100,
            vec![
                Slot::new("QB", &[Position::QB]),
                Slot::new("QB", &[Position::QB])
            ]
        )
        .is_err());

        let schema = RosterSchema::new(
            "showdown-lite",
            100,
            vec![
                Slot::new("CPT", &[Position::QB, Position::WR]),
                Slot::new("K", &[Position::K]),
            ],
        )
        .unwrap();
        assert_eq!(schema.lineup_size(), 2);
    }
}
