//! Supported fantasy contest sites.

use crate::error::DfsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fantasy contest site with its own roster rules and salary scale.
///
/// Each site maps to exactly one [`crate::schema::RosterSchema`] and one
/// points/salary column pair in tabular player data.
///
/// # Examples
///
/// ```rust
/// use dfs_optimizer::Site;
///
/// let site: Site = "dk".parse().unwrap();
/// assert_eq!(site, Site::DraftKings);
/// assert_eq!(site.salary_column(), "dk_salary");
/// assert!("superdraft".parse::<Site>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    DraftKings,
    FanDuel,
    YahooMulti,
}

impl Site {
    pub const ALL: [Site; 3] = [Site::DraftKings, Site::FanDuel, Site::YahooMulti];

    /// Short registry name used on the command line and in storage.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Site::DraftKings => "dk",
            Site::FanDuel => "fd",
            Site::YahooMulti => "yahoo-multi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Site::DraftKings => "DraftKings",
            Site::FanDuel => "FanDuel",
            Site::YahooMulti => "Yahoo",
        }
    }

    fn column_prefix(&self) -> &'static str {
        match self {
            Site::DraftKings => "dk",
            Site::FanDuel => "fd",
            Site::YahooMulti => "yh",
        }
    }

    /// Tabular column holding this site's projected points, e.g. `fd_points`.
    pub fn points_column(&self) -> String {
        format!("{}_points", self.column_prefix())
    }

    /// Tabular column holding this site's salary, e.g. `fd_salary`.
    pub fn salary_column(&self) -> String {
        format!("{}_salary", self.column_prefix())
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Site {
    type Err = DfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dk" | "draftkings" => Ok(Site::DraftKings),
            "fd" | "fanduel" => Ok(Site::FanDuel),
            "yahoo-multi" | "yahoo" | "yh" => Ok(Site::YahooMulti),
            _ => Err(DfsError::UnsupportedSite {
                site: s.to_string(),
            }),
        }
    }
}
