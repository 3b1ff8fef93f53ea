use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::aggregate::career::CareerShare;
use crate::color::ColorMap;

/// Where the first slice starts, counter-clockwise from 3 o'clock.
const START_ANGLE: f32 = 140.0 * TAU / 360.0;
/// Maximum arc per fan triangle.
const SEGMENT_ANGLE: f32 = TAU / 180.0;

/// Render career-level shares as a pie with a legend table.
pub fn career_pie(ui: &mut Ui, shares: &[CareerShare], colors: &ColorMap) {
    ui.horizontal_top(|ui: &mut Ui| {
        let side = ui.available_height().min(ui.available_width() * 0.6).clamp(160.0, 420.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let center = response.rect.center();
        let radius = side * 0.45;

        let mut angle = START_ANGLE;
        for share in shares {
            let sweep = share.proportion as f32 * TAU;
            let fill = colors.color_for(&share.level);

            let steps = ((sweep / SEGMENT_ANGLE).ceil() as usize).max(1);
            for i in 0..steps {
                let a0 = angle + sweep * i as f32 / steps as f32;
                let a1 = angle + sweep * (i + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![center, polar(center, radius, a0), polar(center, radius, a1)],
                    fill,
                    Stroke::NONE,
                ));
            }

            if share.proportion >= 0.03 {
                painter.text(
                    polar(center, radius * 0.65, angle + sweep / 2.0),
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", share.proportion * 100.0),
                    FontId::proportional(13.0),
                    Color32::BLACK,
                );
            }
            angle += sweep;
        }

        ui.vertical(|ui: &mut Ui| legend_table(ui, shares, colors));
    });
}

fn legend_table(ui: &mut Ui, shares: &[CareerShare], colors: &ColorMap) {
    TableBuilder::new(ui)
        .id_salt("career_legend")
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Career level");
            });
            header.col(|ui| {
                ui.strong("Jobs");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            for share in shares {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(egui::RichText::new(format!("■ {}", share.level)).color(colors.color_for(&share.level)));
                    });
                    row.col(|ui| {
                        ui.label(share.count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}%", share.proportion * 100.0));
                    });
                });
            }
        });
}

/// Screen point at `angle` (radians, counter-clockwise) on a circle.
fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::new(angle.cos(), -angle.sin()) * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_is_counter_clockwise_on_screen() {
        let c = Pos2::new(100.0, 100.0);
        let right = polar(c, 10.0, 0.0);
        assert!((right.x - 110.0).abs() < 1e-4 && (right.y - 100.0).abs() < 1e-4);
        // A quarter turn goes up, which is -y in screen space.
        let up = polar(c, 10.0, TAU / 4.0);
        assert!((up.x - 100.0).abs() < 1e-4 && (up.y - 90.0).abs() < 1e-4);
    }
}
