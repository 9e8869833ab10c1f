use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::charts::{PieSpec, ScatterSpec};
use crate::color::{outcome_color, ColorMap};

/// Arc segments used for a full circle.
const CIRCLE_SEGMENTS: f32 = 96.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Outline of a wedge starting at `start` radians (clockwise, screen space)
/// and sweeping `sweep` radians. The first point is the centre.
pub fn wedge_outline(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Pos2> {
    let segments = ((sweep / TAU) * CIRCLE_SEGMENTS).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(segments + 2);
    points.push(center);
    for i in 0..=segments {
        let angle = start + sweep * i as f32 / segments as f32;
        points.push(center + radius * egui::vec2(angle.cos(), angle.sin()));
    }
    points
}

/// Render a pie spec: wedges on the left, legend on the right.
pub fn pie_chart(ui: &mut Ui, spec: &PieSpec, height: f32) {
    ui.heading(spec.title.as_str());

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(egui::vec2(height, height), Sense::hover());
        let center = response.rect.center();
        let radius = height * 0.45;
        let total = spec.total();

        if spec.is_no_data() || total == 0 {
            painter.circle_stroke(center, radius, Stroke::new(1.5, egui::Color32::GRAY));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                crate::charts::pie::NO_DATA_LABEL,
                FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
        } else {
            let mut start = -FRAC_PI_2;
            for slice in &spec.slices {
                let fraction = slice.count as f32 / total as f32;
                let sweep = fraction * TAU;
                let outline = wedge_outline(center, radius, start, sweep);
                let fill = outcome_color(slice.outcome);

                // Fan of triangles: a wedge wider than a half turn is not convex.
                for pair in outline[1..].windows(2) {
                    painter.add(Shape::convex_polygon(
                        vec![center, pair[0], pair[1]],
                        fill,
                        Stroke::NONE,
                    ));
                }

                if fraction >= 0.05 {
                    let mid = start + sweep / 2.0;
                    let at = center + radius * 0.6 * egui::vec2(mid.cos(), mid.sin());
                    painter.text(
                        at,
                        Align2::CENTER_CENTER,
                        format!("{:.1}%", fraction * 100.0),
                        FontId::proportional(14.0),
                        egui::Color32::WHITE,
                    );
                }
                start += sweep;
            }
        }

        ui.vertical(|ui: &mut Ui| {
            ui.strong("class");
            for slice in &spec.slices {
                let text = match slice.outcome {
                    Some(outcome) => format!(
                        "{} ({}): {}",
                        slice.label,
                        outcome.describe(),
                        slice.count
                    ),
                    None => format!("{}: {}", slice.label, slice.count),
                };
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(outcome_color(slice.outcome)));
                    ui.label(text);
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render a scatter spec with one legend entry per booster category.
pub fn scatter_plot(ui: &mut Ui, spec: &ScatterSpec, color_map: &ColorMap, height: f32) {
    ui.heading(spec.title.as_str());

    if spec.points.is_empty() {
        ui.label(RichText::new("No launches match the current selection.").weak());
    }

    Plot::new("success-payload-scatter")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .include_x(spec.range.lo)
        .include_x(spec.range.hi)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for group in &spec.groups {
                let points: PlotPoints = spec
                    .group_points(group)
                    .map(|p| [p.payload_mass_kg, f64::from(p.outcome.code())])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(group)
                        .color(color_map.color_for(group))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
