use std::fmt;

use serde::Serialize;

use super::model::{LaunchRecord, LaunchTable, PayloadRange};

/// Value of the "All" dropdown entry.
pub const ALL_SITES: &str = "All";

// ---------------------------------------------------------------------------
// Site selection: the dropdown value
// ---------------------------------------------------------------------------

/// Either every site or exactly one named site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a dropdown value; the `All` sentinel selects every site.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }

    /// Text used in chart titles.
    pub fn title_fragment(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

impl From<SiteSelection> for String {
    fn from(selection: SiteSelection) -> Self {
        selection.to_string()
    }
}

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Rows launched from the selected site, in table order.
pub fn rows_for_site<'a>(
    table: &'a LaunchTable,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    table.records().iter().filter(move |r| site.matches(r))
}

/// Rows passing both the payload range and the site filter, in table order.
pub fn rows_in_range<'a>(
    table: &'a LaunchTable,
    site: &'a SiteSelection,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    table
        .records()
        .iter()
        .filter(move |r| range.contains(r.payload_mass_kg))
        .filter(move |r| site.matches(r))
}
