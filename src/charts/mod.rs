//! Chart derivation: pure functions from control values to declarative
//! chart descriptions. Rendering lives in `ui::plot`.
pub mod pie;
pub mod scatter;

use serde::Serialize;

pub use pie::{build_pie_chart, PieSpec};
pub use scatter::{build_scatter_chart, ScatterSpec};

/// Output of a chart builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieSpec),
    Scatter(ScatterSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(p) => &p.title,
            ChartSpec::Scatter(s) => &s.title,
        }
    }
}
