use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use cord_explorer::config::TOP_N_RANGE;
use cord_explorer::state::DashboardState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and quick stats
// ---------------------------------------------------------------------------

/// Render the left filter panel. Every changed input triggers a full
/// re-filter and recompute through the state setters.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Select Year Range");
            match (state.year_bounds, state.year_range) {
                (Some(bounds), Some(current)) => {
                    let (mut from, mut to) = (current.min, current.max);
                    let from_changed = ui
                        .add(Slider::new(&mut from, bounds.min..=bounds.max).text("from"))
                        .changed();
                    let to_changed = ui
                        .add(Slider::new(&mut to, bounds.min..=bounds.max).text("to"))
                        .changed();
                    if from_changed || to_changed {
                        state.set_year_range(from, to);
                    }
                }
                _ => {
                    ui.label("No dated papers.");
                }
            }
            ui.add_space(6.0);

            // ---- Top N journals ----
            let mut top_n = state.top_n;
            if ui
                .add(Slider::new(&mut top_n, TOP_N_RANGE).text("Top N Journals"))
                .changed()
            {
                state.set_top_n(top_n);
            }
            ui.add_space(6.0);

            ui.checkbox(&mut state.show_table, "Show table");
            ui.separator();

            // ---- Quick stats ----
            ui.heading("Quick Stats");
            ui.label(format!("Total papers (filtered): {}", state.view.paper_count));
            let mean = state
                .view
                .mean_abstract_words
                .map(|m| format!("{m:.0}"))
                .unwrap_or_else(|| "–".to_string());
            ui.label(format!("Avg abstract words: {mean}"));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} papers loaded, {} in range",
                table.len(),
                state.visible_indices.len()
            ));
        }
        if let Some(path) = &state.source_path {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open cleaned metadata")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load(&path) {
            log::error!("Failed to load file: {e}");
        }
    }
}
