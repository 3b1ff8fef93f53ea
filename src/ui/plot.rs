use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoints, Points, VLine};

use crate::aggregate::ranking::TopN;
use crate::aggregate::salary::SalaryDistribution;
use crate::aggregate::volume::PeriodCount;
use crate::aggregate::Aggregate;
use crate::data::model::YearMonth;
use crate::state::VolumePeriod;
use crate::ui::format_idr;

pub fn no_data(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).italics().color(Color32::GRAY));
}

// ---------------------------------------------------------------------------
// Posting volume (line chart)
// ---------------------------------------------------------------------------

pub fn volume_chart(
    ui: &mut Ui,
    period: &mut VolumePeriod,
    daily: &Aggregate<Vec<PeriodCount<NaiveDate>>>,
    monthly: &Aggregate<Vec<PeriodCount<YearMonth>>>,
) {
    let mut selected = *period;
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut selected, VolumePeriod::Daily, "Per day");
        ui.selectable_value(&mut selected, VolumePeriod::Monthly, "Per month");
    });
    *period = selected;

    match selected {
        VolumePeriod::Daily => {
            let Some(points) = daily.as_ready() else {
                no_data(ui, "No data available for selected filters.");
                return;
            };
            let xy: Vec<[f64; 2]> = points
                .iter()
                .map(|p| [p.period.num_days_from_ce() as f64, p.count as f64])
                .collect();
            line_plot(ui, "daily_volume", "Date", xy, |x| {
                NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
                    .map(|d| d.format("%Y-%m-%d").to_string())
            });
        }
        VolumePeriod::Monthly => {
            let Some(points) = monthly.as_ready() else {
                no_data(ui, "No data available for selected filters.");
                return;
            };
            let labels: Vec<String> = points.iter().map(|p| p.period.to_string()).collect();
            let xy: Vec<[f64; 2]> = points
                .iter()
                .enumerate()
                .map(|(i, p)| [i as f64, p.count as f64])
                .collect();
            line_plot(ui, "monthly_volume", "Month", xy, move |x| index_label(&labels, x));
        }
    }
}

fn line_plot(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    xy: Vec<[f64; 2]>,
    x_format: impl Fn(f64) -> Option<String> + 'static,
) {
    Plot::new(id)
        .x_axis_label(x_label)
        .y_axis_label("Job Count")
        .x_axis_formatter(move |mark, _range| x_format(mark.value).unwrap_or_default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(xy.clone()))
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(xy))
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.5),
            );
        });
}

/// Label for integer grid marks of a categorical axis.
fn index_label(labels: &[String], x: f64) -> Option<String> {
    if (x - x.round()).abs() > 1e-6 || x < 0.0 {
        return None;
    }
    labels.get(x.round() as usize).cloned()
}

// ---------------------------------------------------------------------------
// Top-N (bar chart + table)
// ---------------------------------------------------------------------------

pub fn top_n_chart(ui: &mut Ui, id: &str, top: &TopN, color: Color32) {
    if top.from_fallback {
        ui.label(
            RichText::new("No listings match the filters; showing the full dataset.")
                .small()
                .color(Color32::YELLOW),
        );
    }
    if top.entries.is_empty() {
        no_data(ui, "No data available.");
        return;
    }

    let labels: Vec<String> = top.entries.iter().map(|e| e.value.clone()).collect();
    let bars: Vec<Bar> = top
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| Bar::new(i as f64, e.count as f64).width(0.7).name(&e.value))
        .collect();

    Plot::new(id)
        .height(260.0)
        .x_axis_label(top.field.label())
        .y_axis_label("Job Count")
        .x_axis_formatter(move |mark, _range| {
            index_label(&labels, mark.value)
                .map(|l| truncate(&l, 12))
                .unwrap_or_default()
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color).name(top.field.label()));
        });

    TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong(top.field.label());
            });
            header.col(|ui| {
                ui.strong("Jobs");
            });
        })
        .body(|mut body| {
            for e in &top.entries {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&e.value);
                    });
                    row.col(|ui| {
                        ui.label(e.count.to_string());
                    });
                });
            }
        });
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

pub fn salary_histogram(ui: &mut Ui, id: &str, dist: &SalaryDistribution, color: Color32) {
    let mean_label = match dist.mean {
        Some(mean) => format!("Mean: {}", format_idr(mean)),
        None => "Mean: no data".to_string(),
    };
    ui.label(format!("{} listings with a positive value. {mean_label}", dist.count));

    if dist.bins.is_empty() {
        no_data(ui, "No salary data available for selected filters.");
        return;
    }

    let bars: Vec<Bar> = dist
        .bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{} – {}", format_idr(b.start), format_idr(b.end)))
        })
        .collect();

    Plot::new(id)
        .height(280.0)
        .legend(Legend::default())
        .x_axis_label(dist.bound.label())
        .y_axis_label("Job Count")
        .x_axis_formatter(|mark, _range| format_idr(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color).name(dist.bound.label()));
            if let Some(mean) = dist.mean {
                plot_ui.vline(
                    VLine::new(mean)
                        .color(Color32::RED)
                        .style(LineStyle::dashed_loose())
                        .name(&mean_label),
                );
            }
        });
}
