//! Sites command implementation

use crate::{cli::types::Site, error::Result, schema::RosterSchema};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub site: &'static str,
    pub name: &'static str,
    pub schema: RosterSchema,
}

pub fn site_summaries() -> Vec<SiteSummary> {
    Site::ALL
        .iter()
        .map(|site| SiteSummary {
            site: site.abbreviation(),
            name: site.display_name(),
            schema: RosterSchema::for_site(*site),
        })
        .collect()
}

/// Handle the sites command
pub fn handle_sites(as_json: bool) -> Result<()> {
    let summaries = site_summaries();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for summary in &summaries {
        let slots: Vec<&str> = summary.schema.slots.iter().map(|s| s.name.as_str()).collect();
        println!(
            "{:<12} {:<11} cap {:>6}  {}",
            summary.site,
            summary.name,
            summary.schema.salary_cap,
            slots.join(" ")
        );
    }
    Ok(())
}
