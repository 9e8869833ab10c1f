use serde::Serialize;

use crate::data::filter::{rows_in_range, SiteSelection};
use crate::data::loader::{COL_CLASS, COL_PAYLOAD_MASS};
use crate::data::model::{LaunchTable, Outcome, PayloadRange};

/// One launch plotted as payload against outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

/// Payload vs. success, one point per matching launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub range: PayloadRange,
    pub points: Vec<ScatterPoint>,
    /// Booster categories present in `points`, by first appearance.
    pub groups: Vec<String>,
}

impl ScatterSpec {
    /// Points of one colour group, in table order.
    pub fn group_points<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a ScatterPoint> + 'a {
        self.points
            .iter()
            .filter(move |p| p.booster_version_category == group)
    }
}

pub fn build_scatter_chart(
    table: &LaunchTable,
    site: &SiteSelection,
    range: PayloadRange,
) -> ScatterSpec {
    let mut groups: Vec<String> = Vec::new();
    let points: Vec<ScatterPoint> = rows_in_range(table, site, range)
        .map(|r| {
            if !groups.contains(&r.booster_version_category) {
                groups.push(r.booster_version_category.clone());
            }
            ScatterPoint {
                payload_mass_kg: r.payload_mass_kg,
                outcome: r.outcome,
                booster_version_category: r.booster_version_category.clone(),
            }
        })
        .collect();

    ScatterSpec {
        title: format!(
            "Payload Mass vs Launch Success for {}",
            site.title_fragment()
        ),
        x_label: COL_PAYLOAD_MASS.to_string(),
        y_label: COL_CLASS.to_string(),
        range,
        points,
        groups,
    }
}
