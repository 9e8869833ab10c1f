use serde::Serialize;

use crate::data::filter::{rows_for_site, SiteSelection};
use crate::data::model::{LaunchTable, Outcome};

/// Label of the placeholder slice shown for a site without launches.
pub const NO_DATA_LABEL: &str = "No Data";

/// One wedge of the success pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    /// `None` only for the placeholder slice.
    pub outcome: Option<Outcome>,
    pub count: usize,
}

/// Success distribution for the selected site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Whether this is the single zero-count placeholder.
    pub fn is_no_data(&self) -> bool {
        self.slices.len() == 1 && self.slices[0].outcome.is_none()
    }
}

/// Count launches per outcome class for `site`.
///
/// Slices appear in order of the first row carrying each class value, so the
/// output is fully determined by the table order.
pub fn build_pie_chart(table: &LaunchTable, site: &SiteSelection) -> PieSpec {
    let mut slices: Vec<PieSlice> = Vec::with_capacity(2);
    for record in rows_for_site(table, site) {
        match slices
            .iter_mut()
            .find(|s| s.outcome == Some(record.outcome))
        {
            Some(slice) => slice.count += 1,
            None => slices.push(PieSlice {
                label: record.outcome.to_string(),
                outcome: Some(record.outcome),
                count: 1,
            }),
        }
    }

    match site {
        SiteSelection::Site(name) if slices.is_empty() => PieSpec {
            title: format!("No Data for {name}"),
            slices: vec![PieSlice {
                label: NO_DATA_LABEL.to_string(),
                outcome: None,
                count: 0,
            }],
        },
        _ => PieSpec {
            title: format!(
                "Launch Success Distribution for {}",
                site.title_fragment()
            ),
            slices,
        },
    }
}
