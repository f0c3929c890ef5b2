//! User constraints accumulated before a solve.
//!
//! [`ConstraintSet`] is a declarative builder. Setting a constraint never
//! checks it against the roster rules or against other constraints; the
//! engine validates the composed set when it solves. The only check done at
//! call time is player resolution, which needs the pool and fails without
//! touching the set.

use crate::{
    cli::types::{PlayerId, Position, TeamCode, Week},
    error::{DfsError, Result},
    pool::{PlayerPool, PlayerRecord, PlayerRef},
};
use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// A correlated-scoring requirement for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StackRequirement {
    /// The team's QB plus at least `min_receivers` of its pass-catchers.
    /// `receiver` narrows the pass-catchers to WR or TE only.
    QbReceiver {
        team: TeamCode,
        receiver: Option<Position>,
        min_receivers: usize,
    },
    /// At least one of the team's RBs together with its DST.
    RbDst { team: TeamCode },
}

impl StackRequirement {
    pub fn team(&self) -> &TeamCode {
        match self {
            StackRequirement::QbReceiver { team, .. } | StackRequirement::RbDst { team } => team,
        }
    }
}

/// Bounds on how many lineup players may come from one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamLimit {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

/// A window of NFL games a lineup may draw players from.
///
/// Kickoff hours are Eastern: early Sunday games start at 13:00 and late
/// ones at 16:05 or 16:25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameSlate {
    Sunday,
    SundayEarly,
    SundayEarlyAndLate,
    SundayAndMonday,
    Monday,
    /// Monday of one week plus Thursday of the following week.
    MondayAndThursday,
}

impl GameSlate {
    pub const ALL: [GameSlate; 6] = [
        GameSlate::Sunday,
        GameSlate::SundayEarly,
        GameSlate::SundayEarlyAndLate,
        GameSlate::SundayAndMonday,
        GameSlate::Monday,
        GameSlate::MondayAndThursday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameSlate::Sunday => "sunday",
            GameSlate::SundayEarly => "sunday-early",
            GameSlate::SundayEarlyAndLate => "sunday-early-and-late",
            GameSlate::SundayAndMonday => "sunday-and-monday",
            GameSlate::Monday => "monday",
            GameSlate::MondayAndThursday => "monday-and-thursday",
        }
    }
}

impl fmt::Display for GameSlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GameSlate {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        GameSlate::ALL
            .into_iter()
            .find(|slate| slate.as_str() == wanted)
            .ok_or_else(|| DfsError::InvalidConstraint {
                message: format!("unknown game slate {:?}", s),
            })
    }
}

/// A game slate bound to the pool it was set against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlateSelection {
    slate: GameSlate,
    /// Monday and Thursday weeks of a two-week slate.
    weeks: Option<(Week, Week)>,
}

impl SlateSelection {
    pub fn slate(&self) -> GameSlate {
        self.slate
    }

    /// True if the player's game falls inside the slate. Players without a
    /// kickoff time never do.
    pub fn allows(&self, player: &PlayerRecord) -> bool {
        let Some(kickoff) = player.kickoff else {
            return false;
        };
        let day = kickoff.weekday();
        let hour = kickoff.hour();

        match self.slate {
            GameSlate::Sunday => day == Weekday::Sun,
            GameSlate::SundayEarly => day == Weekday::Sun && hour == 13,
            GameSlate::SundayEarlyAndLate => day == Weekday::Sun && matches!(hour, 13 | 16),
            GameSlate::SundayAndMonday => matches!(day, Weekday::Sun | Weekday::Mon),
            GameSlate::Monday => day == Weekday::Mon,
            GameSlate::MondayAndThursday => match self.weeks {
                Some((monday, thursday)) => {
                    (player.week == Some(monday) && day == Weekday::Mon)
                        || (player.week == Some(thursday) && day == Weekday::Thu)
                }
                None => false,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstraintSet {
    included_teams: BTreeSet<TeamCode>,
    excluded_teams: BTreeSet<TeamCode>,
    must_include_players: BTreeSet<PlayerId>,
    must_exclude_players: BTreeSet<PlayerId>,
    stacks: Vec<StackRequirement>,
    team_limits: BTreeMap<TeamCode, TeamLimit>,
    max_salary: Option<u32>,
    min_salary: Option<u32>,
    game_slate: Option<SlateSelection>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only players from `teams` are eligible. An empty list lifts the restriction.
    pub fn set_only_include_teams<I, T>(&mut self, teams: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamCode>,
    {
        self.included_teams = teams.into_iter().map(Into::into).collect();
    }

    /// Players from `teams` are never eligible.
    pub fn set_exclude_teams<I, T>(&mut self, teams: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamCode>,
    {
        self.excluded_teams = teams.into_iter().map(Into::into).collect();
    }

    /// Require a player, referenced by id or display name.
    ///
    /// Returns the resolved id. Resolution errors leave the set unchanged.
    pub fn set_must_include_player(
        &mut self,
        pool: &PlayerPool,
        player: impl Into<PlayerRef>,
    ) -> Result<PlayerId> {
        let id = pool.resolve(&player.into())?;
        self.must_include_players.insert(id);
        Ok(id)
    }

    /// Forbid a player, referenced by id or display name.
    pub fn set_exclude_player(
        &mut self,
        pool: &PlayerPool,
        player: impl Into<PlayerRef>,
    ) -> Result<PlayerId> {
        let id = pool.resolve(&player.into())?;
        self.must_exclude_players.insert(id);
        Ok(id)
    }

    /// Require `team`'s QB together with at least one of its WR/TE.
    pub fn set_qb_receiver_stack(&mut self, team: impl Into<TeamCode>) {
        self.push_stack(StackRequirement::QbReceiver {
            team: team.into(),
            receiver: None,
            min_receivers: 1,
        });
    }

    /// QB stack with a specific receiver position or a receiver count, not both.
    pub fn set_qb_receiver_stack_with(
        &mut self,
        team: impl Into<TeamCode>,
        receiver: Option<Position>,
        num_receivers: Option<usize>,
    ) -> Result<()> {
        if receiver.is_some() && num_receivers.is_some() {
            return Err(DfsError::InvalidConstraint {
                message: "a QB stack takes a receiver position or a receiver count, not both"
                    .to_string(),
            });
        }
        if let Some(position) = receiver {
            if !position.is_receiver() {
                return Err(DfsError::InvalidConstraint {
                    message: format!("{} is not a receiver position", position),
                });
            }
        }
        if num_receivers == Some(0) {
            return Err(DfsError::InvalidConstraint {
                message: "a QB stack needs at least one receiver".to_string(),
            });
        }

        self.push_stack(StackRequirement::QbReceiver {
            team: team.into(),
            receiver,
            min_receivers: num_receivers.unwrap_or(1),
        });
        Ok(())
    }

    /// Require one of `team`'s RBs together with its DST.
    pub fn set_rb_dst_stack(&mut self, team: impl Into<TeamCode>) {
        self.push_stack(StackRequirement::RbDst { team: team.into() });
    }

    fn push_stack(&mut self, stack: StackRequirement) {
        if !self.stacks.contains(&stack) {
            self.stacks.push(stack);
        }
    }

    pub fn set_max_players_from_team(&mut self, n: usize, team: impl Into<TeamCode>) {
        self.team_limits.entry(team.into()).or_default().max = Some(n);
    }

    pub fn set_min_players_from_team(&mut self, n: usize, team: impl Into<TeamCode>) {
        self.team_limits.entry(team.into()).or_default().min = Some(n);
    }

    /// Exactly `n` players from `team`.
    pub fn set_num_players_from_team(&mut self, n: usize, team: impl Into<TeamCode>) {
        let limit = self.team_limits.entry(team.into()).or_default();
        limit.min = Some(n);
        limit.max = Some(n);
    }

    /// At least one player from `team`.
    pub fn set_must_include_team(&mut self, team: impl Into<TeamCode>) {
        self.set_min_players_from_team(1, team);
    }

    /// Spend no more than `salary`, on top of the site's cap.
    pub fn set_max_salary(&mut self, salary: u32) {
        self.max_salary = Some(salary);
    }

    /// Spend at least `salary`.
    pub fn set_min_salary(&mut self, salary: u32) {
        self.min_salary = Some(salary);
    }

    /// Only players whose games fall in `slate` are eligible. Replaces any
    /// earlier slate.
    ///
    /// # Errors
    ///
    /// [`DfsError::InvalidConstraint`] for a Monday/Thursday slate unless the
    /// pool holds games from exactly two weeks. The earlier week is the
    /// Monday week.
    pub fn set_game_slate(&mut self, pool: &PlayerPool, slate: GameSlate) -> Result<()> {
        let weeks = match slate {
            GameSlate::MondayAndThursday => {
                let weeks: Vec<Week> = pool.weeks().into_iter().collect();
                match weeks.as_slice() {
                    [monday, thursday] => Some((*monday, *thursday)),
                    _ => {
                        return Err(DfsError::InvalidConstraint {
                            message: format!(
                                "a {} slate needs players from exactly two weeks, found {}",
                                slate,
                                weeks.len()
                            ),
                        })
                    }
                }
            }
            _ => None,
        };
        self.game_slate = Some(SlateSelection { slate, weeks });
        Ok(())
    }

    /// Reset every constraint to the empty state.
    pub fn clear_constraints(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn included_teams(&self) -> &BTreeSet<TeamCode> {
        &self.included_teams
    }

    pub fn excluded_teams(&self) -> &BTreeSet<TeamCode> {
        &self.excluded_teams
    }

    pub fn must_include_players(&self) -> &BTreeSet<PlayerId> {
        &self.must_include_players
    }

    pub fn must_exclude_players(&self) -> &BTreeSet<PlayerId> {
        &self.must_exclude_players
    }

    pub fn stacks(&self) -> &[StackRequirement] {
        &self.stacks
    }

    pub fn team_limits(&self) -> &BTreeMap<TeamCode, TeamLimit> {
        &self.team_limits
    }

    pub fn max_salary(&self) -> Option<u32> {
        self.max_salary
    }

    pub fn min_salary(&self) -> Option<u32> {
        self.min_salary
    }

    pub fn game_slate(&self) -> Option<GameSlate> {
        self.game_slate.map(|s| s.slate())
    }

    /// True if no slate is set or the player's game is on it.
    pub fn slate_allows(&self, player: &PlayerRecord) -> bool {
        self.game_slate
            .as_ref()
            .map_or(true, |selection| selection.allows(player))
    }

    /// True if `team` passes the include/exclude team filters.
    pub fn team_allowed(&self, team: &TeamCode) -> bool {
        (self.included_teams.is_empty() || self.included_teams.contains(team))
            && !self.excluded_teams.contains(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::Site;
    use chrono::{NaiveDate, NaiveDateTime};

    fn kickoff(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    /// Week 2 of 2024: Sunday Sep 15, Monday Sep 16; week 3 opens Thursday Sep 19.
    fn scheduled_pool() -> PlayerPool {
        PlayerPool::new(
            Site::DraftKings,
            vec![
                PlayerRecord::new(1, "Early", "NO", Position::QB, 6000, 18.0)
                    .with_game(Week::new(2), kickoff(2024, 9, 15, 13, 0)),
                PlayerRecord::new(2, "Late", "LV", Position::QB, 6000, 18.0)
                    .with_game(Week::new(2), kickoff(2024, 9, 15, 16, 25)),
                PlayerRecord::new(3, "Night", "KC", Position::QB, 6000, 18.0)
                    .with_game(Week::new(2), kickoff(2024, 9, 15, 20, 20)),
                PlayerRecord::new(4, "Monday", "PHI", Position::QB, 6000, 18.0)
                    .with_game(Week::new(2), kickoff(2024, 9, 16, 20, 15)),
                PlayerRecord::new(5, "Thursday", "NYJ", Position::QB, 6000, 18.0)
                    .with_game(Week::new(3), kickoff(2024, 9, 19, 20, 15)),
                PlayerRecord::new(6, "Unscheduled", "DAL", Position::QB, 6000, 18.0),
            ],
        )
        .unwrap()
    }

    fn allowed(set: &ConstraintSet, pool: &PlayerPool) -> Vec<u64> {
        pool.iter()
            .filter(|p| set.slate_allows(p))
            .map(|p| p.id.as_u64())
            .collect()
    }

    fn pool() -> PlayerPool {
        PlayerPool::new(
            Site::DraftKings,
            vec![
                PlayerRecord::new(1, "Brock Purdy", "SF", Position::QB, 6000, 18.0),
                PlayerRecord::new(2, "Josh Allen", "BUF", Position::QB, 8000, 24.0),
                PlayerRecord::new(3, "Josh Allen", "JAX", Position::DST, 2000, 4.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_set_is_empty() {
        assert!(ConstraintSet::new().is_empty());
    }

    #[test]
    fn test_team_lists_replace() {
        let mut set = ConstraintSet::new();
        set.set_only_include_teams(["sf", "buf"]);
        set.set_only_include_teams(["KC"]);
        assert_eq!(set.included_teams().len(), 1);
        assert!(set.included_teams().contains(&TeamCode::new("KC")));

        set.set_exclude_teams(vec!["NYJ".to_string()]);
        assert!(set.excluded_teams().contains(&TeamCode::new("nyj")));
    }

    #[test]
    fn test_team_allowed() {
        let mut set = ConstraintSet::new();
        assert!(set.team_allowed(&TeamCode::new("SF")));
        set.set_only_include_teams(["SF", "KC"]);
        set.set_exclude_teams(["KC"]);
        assert!(set.team_allowed(&TeamCode::new("SF")));
        assert!(!set.team_allowed(&TeamCode::new("KC")));
        assert!(!set.team_allowed(&TeamCode::new("DAL")));
    }

    #[test]
    fn test_must_include_resolves_name() {
        let mut set = ConstraintSet::new();
        let id = set.set_must_include_player(&pool(), "brock purdy").unwrap();
        assert_eq!(id, PlayerId::new(1));
        assert!(set.must_include_players().contains(&id));
    }

    #[test]
    fn test_resolution_error_does_not_mutate() {
        let mut set = ConstraintSet::new();
        let pool = pool();

        assert!(matches!(
            set.set_must_include_player(&pool, "Josh Allen"),
            Err(DfsError::AmbiguousPlayer { .. })
        ));
        assert!(matches!(
            set.set_exclude_player(&pool, "Nobody"),
            Err(DfsError::PlayerNotFound { .. })
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn test_include_and_exclude_same_player_is_accepted_at_insertion() {
        let mut set = ConstraintSet::new();
        let pool = pool();
        set.set_must_include_player(&pool, PlayerId::new(2)).unwrap();
        set.set_exclude_player(&pool, PlayerId::new(2)).unwrap();
        assert!(set.must_include_players().contains(&PlayerId::new(2)));
        assert!(set.must_exclude_players().contains(&PlayerId::new(2)));
    }

    #[test]
    fn test_stacks_are_idempotent() {
        let mut set = ConstraintSet::new();
        set.set_qb_receiver_stack("SF");
        set.set_qb_receiver_stack("sf");
        set.set_rb_dst_stack("SF");
        assert_eq!(set.stacks().len(), 2);
        assert_eq!(set.stacks()[0].team().as_str(), "SF");
    }

    #[test]
    fn test_stack_options_validation() {
        let mut set = ConstraintSet::new();
        assert!(set
            .set_qb_receiver_stack_with("SF", Some(Position::WR), Some(2))
            .is_err());
        assert!(set
            .set_qb_receiver_stack_with("SF", Some(Position::RB), None)
            .is_err());
        assert!(set.set_qb_receiver_stack_with("SF", None, Some(0)).is_err());
        assert!(set.stacks().is_empty());

        set.set_qb_receiver_stack_with("SF", None, Some(2)).unwrap();
        assert_eq!(
            set.stacks()[0],
            StackRequirement::QbReceiver {
                team: TeamCode::new("SF"),
                receiver: None,
                min_receivers: 2
            }
        );
    }

    #[test]
    fn test_team_limits() {
        let mut set = ConstraintSet::new();
        set.set_max_players_from_team(3, "KC");
        set.set_must_include_team("KC");
        set.set_num_players_from_team(2, "BUF");

        let kc = set.team_limits()[&TeamCode::new("KC")];
        assert_eq!(kc, TeamLimit { min: Some(1), max: Some(3) });
        let buf = set.team_limits()[&TeamCode::new("BUF")];
        assert_eq!(buf, TeamLimit { min: Some(2), max: Some(2) });
    }

    #[test]
    fn test_clear_constraints() {
        let mut set = ConstraintSet::new();
        let pool = pool();
        set.set_only_include_teams(["SF"]);
        set.set_exclude_teams(["BUF"]);
        set.set_must_include_player(&pool, "Brock Purdy").unwrap();
        set.set_qb_receiver_stack("SF");
        set.set_max_salary(40_000);
        set.set_min_salary(30_000);
        set.set_max_players_from_team(2, "SF");
        set.set_game_slate(&pool, GameSlate::Sunday).unwrap();
        assert!(!set.is_empty());

        set.clear_constraints();
        assert!(set.is_empty());
        assert_eq!(set, ConstraintSet::new());
    }

    #[test]
    fn test_game_slate_windows() {
        let pool = scheduled_pool();
        let mut set = ConstraintSet::new();
        assert_eq!(allowed(&set, &pool), vec![1, 2, 3, 4, 5, 6]);

        let expected: [(GameSlate, Vec<u64>); 5] = [
            (GameSlate::Sunday, vec![1, 2, 3]),
            (GameSlate::SundayEarly, vec![1]),
            (GameSlate::SundayEarlyAndLate, vec![1, 2]),
            (GameSlate::SundayAndMonday, vec![1, 2, 3, 4]),
            (GameSlate::Monday, vec![4]),
        ];
        for (slate, ids) in expected {
            set.set_game_slate(&pool, slate).unwrap();
            assert_eq!(set.game_slate(), Some(slate));
            assert_eq!(allowed(&set, &pool), ids, "slate {}", slate);
        }
    }

    #[test]
    fn test_monday_and_thursday_slate() {
        let pool = scheduled_pool();
        let mut set = ConstraintSet::new();
        set.set_game_slate(&pool, GameSlate::MondayAndThursday)
            .unwrap();
        assert_eq!(allowed(&set, &pool), vec![4, 5]);
    }

    #[test]
    fn test_monday_and_thursday_needs_two_weeks() {
        let mut set = ConstraintSet::new();
        let one_week = pool();
        assert!(matches!(
            set.set_game_slate(&one_week, GameSlate::MondayAndThursday),
            Err(DfsError::InvalidConstraint { .. })
        ));

        let mut records = scheduled_pool().players().to_vec();
        records.push(
            PlayerRecord::new(7, "Next Sunday", "GB", Position::QB, 6000, 18.0)
                .with_game(Week::new(4), kickoff(2024, 9, 29, 13, 0)),
        );
        let three_weeks = PlayerPool::new(Site::DraftKings, records).unwrap();
        assert!(set
            .set_game_slate(&three_weeks, GameSlate::MondayAndThursday)
            .is_err());
        assert!(set.game_slate().is_none());
    }

    #[test]
    fn test_game_slate_parse() {
        assert_eq!("sunday".parse::<GameSlate>().unwrap(), GameSlate::Sunday);
        assert_eq!(
            "Sunday_Early_And_Late".parse::<GameSlate>().unwrap(),
            GameSlate::SundayEarlyAndLate
        );
        assert_eq!(
            GameSlate::MondayAndThursday.to_string(),
            "monday-and-thursday"
        );
        assert!("saturday".parse::<GameSlate>().is_err());
    }
}
