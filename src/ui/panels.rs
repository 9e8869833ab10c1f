use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SiteSelection;
use crate::state::AppState;

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

/// Dropdown text for a selection.
fn site_label(site: &SiteSelection) -> &str {
    match site {
        SiteSelection::All => "All Sites",
        SiteSelection::Site(name) => name,
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard heading and a one-line summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(DASHBOARD_TITLE)
                .size(32.0)
                .strong()
                .color(TITLE_COLOR),
        );
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(summary_line(state));
    });
}

/// Table size, plotted launch count and the active payload range.
pub fn summary_line(state: &AppState) -> String {
    let shown = state.scatter_chart().map_or(0, |s| s.points.len());
    format!(
        "{} launches loaded, {} shown, payload range {}",
        state.table().len(),
        shown,
        state.controls().payload
    )
}

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload range slider.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch site");
    let current = state.controls().site.clone();
    let options: Vec<SiteSelection> = std::iter::once(SiteSelection::All)
        .chain(state.site_options.iter().map(|s| SiteSelection::parse(s)))
        .collect();

    let mut chosen = None;
    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(site_label(&current))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options {
                if ui
                    .selectable_label(*option == current, site_label(option))
                    .clicked()
                {
                    chosen = Some(option.clone());
                }
            }
        });
    if let Some(site) = chosen {
        state.set_site(site);
    }

    ui.add_space(8.0);

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let bounds = state.table().payload_bounds();
    let mut range = state.controls().payload;

    let lo_changed = ui
        .add(
            egui::Slider::new(&mut range.lo, bounds.lo..=bounds.hi)
                .text("min")
                .suffix(" kg")
                .fixed_decimals(0),
        )
        .changed();
    let hi_changed = ui
        .add(
            egui::Slider::new(&mut range.hi, bounds.lo..=bounds.hi)
                .text("max")
                .suffix(" kg")
                .fixed_decimals(0),
        )
        .changed();

    // Dragging one handle past the other pushes it along.
    if lo_changed && range.lo > range.hi {
        range.hi = range.lo;
    }
    if hi_changed && range.hi < range.lo {
        range.lo = range.hi;
    }
    if lo_changed || hi_changed {
        state.set_payload_range(range);
    }

    ui.add_space(8.0);
    ui.separator();
    if ui.button("Reset").clicked() {
        state.reset_controls();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::model::{LaunchRecord, LaunchTable, Outcome};
    use crate::state::ControlState;

    #[test]
    fn summary_counts_points_after_both_filters() {
        let rows = [("siteA", 500.0), ("siteA", 2000.0), ("siteB", 800.0)];
        let table = LaunchTable::from_records(
            rows.iter()
                .map(|&(site, mass)| LaunchRecord {
                    launch_site: site.to_string(),
                    payload_mass_kg: mass,
                    outcome: Outcome::Success,
                    booster_version_category: "v1".to_string(),
                })
                .collect(),
        )
        .unwrap();
        let controls = ControlState::full(&table);
        let mut state = AppState::new(Arc::new(table), vec!["siteA".into()], controls);

        state.set_site(SiteSelection::parse("siteA"));
        assert_eq!(
            summary_line(&state),
            "3 launches loaded, 2 shown, payload range [500, 2000] kg"
        );
    }
}
