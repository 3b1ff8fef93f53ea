use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::config::{SALARY_SLIDER_MAX, SALARY_SLIDER_STEP};
use crate::state::{AppState, FilterCategory, Tab};
use crate::ui::format_idr;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    let (Some(dataset), Some(spec)) = (state.dataset.clone(), state.filters.clone()) else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Salary sliders ----
            ui.strong("Average salary (IDR)");
            let mut min_salary = spec.min_salary;
            let mut max_salary = spec.max_salary;
            let min_changed = ui
                .add(
                    Slider::new(&mut min_salary, 0.0..=SALARY_SLIDER_MAX)
                        .step_by(SALARY_SLIDER_STEP)
                        .custom_formatter(|v, _| format_idr(v))
                        .text("Minimum"),
                )
                .changed();
            let max_changed = ui
                .add(
                    Slider::new(&mut max_salary, 0.0..=SALARY_SLIDER_MAX)
                        .step_by(SALARY_SLIDER_STEP)
                        .custom_formatter(|v, _| format_idr(v))
                        .text("Maximum"),
                )
                .changed();
            if min_changed || max_changed {
                state.set_salary_bounds(min_salary, max_salary);
            }
            ui.separator();

            // ---- Per-category filter widgets (collapsible) ----
            for category in FilterCategory::ALL {
                let all_values = category.options(&dataset);
                let selected = category.selected(&spec);

                // Show count of selected / total in the header
                let header_text = format!(
                    "{}  ({}/{})",
                    category.label(),
                    selected.len(),
                    all_values.len()
                );

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(category.label())
                    .default_open(category == FilterCategory::CareerLevel)
                    .show(ui, |ui: &mut Ui| {
                        // Select all / none buttons
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(category);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(category);
                            }
                        });

                        for val in all_values {
                            let mut checked = selected.contains(val);
                            let mut text = RichText::new(val);
                            if category == FilterCategory::CareerLevel {
                                if let Some(cm) = &state.career_colors {
                                    text = text.color(cm.color_for(val));
                                }
                            }
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_filter_value(category, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                if let Err(e) = state.reload() {
                    log::error!("Failed to reload: {e:#}");
                    state.status_message = Some(format!("Error: {e:#}"));
                }
                ui.close_menu();
            }
            if ui
                .add_enabled(state.view.is_some(), egui::Button::new("Export summary…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(view) = &state.view {
            ui.label(format!(
                "{} listings loaded, {} match the filters",
                view.total_listings, view.filtered_listings
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Render the tab selector.
pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open job listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard summary")
        .add_filter("JSON", &["json"])
        .set_file_name("dashboard_summary.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_summary(&path) {
            log::error!("Failed to export summary: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
