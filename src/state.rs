use std::sync::Arc;

use crate::charts::{build_pie_chart, build_scatter_chart, ChartSpec, PieSpec, ScatterSpec};
use crate::color::ColorMap;
use crate::data::filter::SiteSelection;
use crate::data::model::{LaunchTable, PayloadRange};

/// Output id of the pie chart region.
pub const PIE_CHART: &str = "success-pie-chart";
/// Output id of the scatter chart region.
pub const SCATTER_CHART: &str = "success-payload-scatter-chart";

// ---------------------------------------------------------------------------
// Control state and input signals
// ---------------------------------------------------------------------------

/// Current values of the two dashboard controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl ControlState {
    /// Default controls: every site, full payload range.
    pub fn full(table: &LaunchTable) -> Self {
        ControlState {
            site: SiteSelection::All,
            payload: table.payload_bounds(),
        }
    }
}

/// Named inputs a chart can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    SiteDropdown,
    PayloadSlider,
}

/// A pure derivation registered against the signals it reads.
pub struct ChartBinding {
    pub output: &'static str,
    pub inputs: &'static [Signal],
    derive: fn(&LaunchTable, &ControlState) -> ChartSpec,
}

fn derive_pie(table: &LaunchTable, controls: &ControlState) -> ChartSpec {
    ChartSpec::Pie(build_pie_chart(table, &controls.site))
}

fn derive_scatter(table: &LaunchTable, controls: &ControlState) -> ChartSpec {
    ChartSpec::Scatter(build_scatter_chart(table, &controls.site, controls.payload))
}

/// The dashboard's two charts and what they watch.
pub fn default_bindings() -> Vec<ChartBinding> {
    vec![
        ChartBinding {
            output: PIE_CHART,
            inputs: &[Signal::SiteDropdown],
            derive: derive_pie,
        },
        ChartBinding {
            output: SCATTER_CHART,
            inputs: &[Signal::SiteDropdown, Signal::PayloadSlider],
            derive: derive_scatter,
        },
    ]
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table, shared read-only with every derivation.
    table: Arc<LaunchTable>,

    /// Fixed dropdown entries, excluding the "All" sentinel.
    pub site_options: Vec<String>,

    controls: ControlState,

    bindings: Vec<ChartBinding>,

    /// Latest output of each binding, same order as `bindings`.
    outputs: Vec<ChartSpec>,

    /// How many times each output has been derived.
    revisions: Vec<u64>,

    /// Booster category colours, stable across control changes.
    pub color_map: ColorMap,
}

impl AppState {
    /// Build the state and derive every chart once.
    pub fn new(table: Arc<LaunchTable>, site_options: Vec<String>, controls: ControlState) -> Self {
        let controls = ControlState {
            payload: controls.payload.clamp_to(&table.payload_bounds()),
            ..controls
        };
        let bindings = default_bindings();
        let outputs = bindings
            .iter()
            .map(|b| (b.derive)(&table, &controls))
            .collect();
        let revisions = vec![1; bindings.len()];
        let color_map = ColorMap::new(&table.booster_categories());

        AppState {
            table,
            site_options,
            controls,
            bindings,
            outputs,
            revisions,
            color_map,
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// Change the dropdown; recomputes only if the value differs.
    pub fn set_site(&mut self, site: SiteSelection) {
        if self.controls.site != site {
            self.controls.site = site;
            self.notify(Signal::SiteDropdown);
        }
    }

    /// Change the slider; the range is kept inside the table bounds.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        let range = range.clamp_to(&self.table.payload_bounds());
        if self.controls.payload != range {
            self.controls.payload = range;
            self.notify(Signal::PayloadSlider);
        }
    }

    /// Restore "All" and the full payload range.
    pub fn reset_controls(&mut self) {
        let full = ControlState::full(&self.table);
        self.set_site(full.site);
        self.set_payload_range(full.payload);
    }

    /// Re-derive every output watching `signal`.
    fn notify(&mut self, signal: Signal) {
        for (i, binding) in self.bindings.iter().enumerate() {
            if binding.inputs.contains(&signal) {
                self.outputs[i] = (binding.derive)(&self.table, &self.controls);
                self.revisions[i] += 1;
                log::debug!(
                    "{signal:?} changed, recomputed {} ({})",
                    binding.output,
                    self.outputs[i].title()
                );
            }
        }
    }

    fn position(&self, output: &str) -> Option<usize> {
        self.bindings.iter().position(|b| b.output == output)
    }

    pub fn output(&self, output: &str) -> Option<&ChartSpec> {
        self.position(output).map(|i| &self.outputs[i])
    }

    #[cfg(test)]
    pub fn revision(&self, output: &str) -> Option<u64> {
        self.position(output).map(|i| self.revisions[i])
    }

    pub fn pie_chart(&self) -> Option<&PieSpec> {
        match self.output(PIE_CHART)? {
            ChartSpec::Pie(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn scatter_chart(&self) -> Option<&ScatterSpec> {
        match self.output(SCATTER_CHART)? {
            ChartSpec::Scatter(spec) => Some(spec),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn state() -> AppState {
        let rows = [
            ("siteA", 500.0, Outcome::Success, "v1"),
            ("siteA", 2000.0, Outcome::Failure, "v2"),
            ("siteB", 800.0, Outcome::Success, "v1"),
        ];
        let table = LaunchTable::from_records(
            rows.iter()
                .map(|&(site, mass, outcome, booster)| LaunchRecord {
                    launch_site: site.to_string(),
                    payload_mass_kg: mass,
                    outcome,
                    booster_version_category: booster.to_string(),
                })
                .collect(),
        )
        .unwrap();
        let controls = ControlState::full(&table);
        AppState::new(
            Arc::new(table),
            vec!["siteA".into(), "siteB".into(), "siteC".into()],
            controls,
        )
    }

    #[test]
    fn initial_outputs_cover_everything() {
        let s = state();
        assert_eq!(s.pie_chart().unwrap().total(), 3);
        assert_eq!(s.scatter_chart().unwrap().points.len(), 3);
        assert_eq!(s.controls().payload, PayloadRange::new(500.0, 2000.0));
    }

    #[test]
    fn slider_change_only_recomputes_scatter() {
        let mut s = state();
        s.set_payload_range(PayloadRange::new(600.0, 2000.0));
        assert_eq!(s.revision(PIE_CHART), Some(1));
        assert_eq!(s.revision(SCATTER_CHART), Some(2));
        assert_eq!(s.scatter_chart().unwrap().points.len(), 2);
    }

    #[test]
    fn site_change_recomputes_both() {
        let mut s = state();
        s.set_site(SiteSelection::parse("siteB"));
        assert_eq!(s.revision(PIE_CHART), Some(2));
        assert_eq!(s.revision(SCATTER_CHART), Some(2));
        assert_eq!(s.pie_chart().unwrap().total(), 1);
        let points = &s.scatter_chart().unwrap().points;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].payload_mass_kg, 800.0);

        s.set_site(SiteSelection::parse("siteC"));
        assert!(s.pie_chart().unwrap().is_no_data());
        assert!(s.scatter_chart().unwrap().points.is_empty());
    }

    #[test]
    fn unchanged_values_do_not_recompute() {
        let mut s = state();
        s.set_site(SiteSelection::All);
        s.set_payload_range(PayloadRange::new(0.0, 50_000.0));
        assert_eq!(s.revision(PIE_CHART), Some(1));
        assert_eq!(s.revision(SCATTER_CHART), Some(1));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut s = state();
        s.set_site(SiteSelection::parse("siteA"));
        s.set_payload_range(PayloadRange::new(900.0, 1000.0));
        s.reset_controls();
        assert_eq!(s.controls(), &ControlState::full(s.table()));
        assert_eq!(s.scatter_chart().unwrap().points.len(), 3);
    }
}
