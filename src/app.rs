use eframe::egui::{self, Color32, Ui};

use crate::state::{AppState, Tab};
use crate::ui::{cloud, panels, pie, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct KarirDashboardApp {
    pub state: AppState,
}

impl KarirDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for KarirDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state);
            ui.separator();
            dashboard_tab(ui, &mut self.state);
        });
    }
}

fn dashboard_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a listings file to start  (File → Open…)");
        });
        return;
    };

    match state.tab {
        Tab::TimeTrends => {
            ui.heading("Job Count over Time");
            plot::volume_chart(
                ui,
                &mut state.volume_period,
                &view.daily_volume,
                &view.monthly_volume,
            );
        }
        Tab::CompanyLocation => {
            ui.columns(2, |cols| {
                cols[0].heading("Top 10 Companies");
                plot::top_n_chart(&mut cols[0], "top_companies", &view.top_companies, Color32::from_rgb(255, 165, 0));
                cols[1].heading("Top 10 Locations");
                plot::top_n_chart(&mut cols[1], "top_locations", &view.top_locations, Color32::from_rgb(60, 170, 60));
            });
        }
        Tab::Salary => {
            egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                ui.heading("Minimum Salary Distribution");
                plot::salary_histogram(ui, "salary_min", &view.salary_min, Color32::from_rgb(255, 165, 0));
                ui.add_space(12.0);
                ui.heading("Maximum Salary Distribution");
                plot::salary_histogram(ui, "salary_max", &view.salary_max, Color32::from_rgb(70, 110, 220));
            });
        }
        Tab::Keywords => {
            ui.heading("Keywords in Job Descriptions");
            match view.keywords.as_ready() {
                Some(keywords) => cloud::keyword_cloud(ui, keywords),
                None => plot::no_data(ui, "No job description data available."),
            }
        }
        Tab::CareerLevel => {
            ui.heading("Distribution of Career Levels");
            match (view.career_levels.as_ready(), &state.career_colors) {
                (Some(shares), Some(colors)) => pie::career_pie(ui, shares, colors),
                _ => plot::no_data(ui, "No career level data available."),
            }
        }
    }
}
