use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::data::aggregate::FilterOutcome;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    // Edit a copy so the pickers can borrow freely; committed below.
    let mut range = state.range;

    ui.strong("Start Date");
    ui.add(DatePickerButton::new(&mut range.start).id_salt("start_date"));
    ui.add_space(6.0);

    ui.strong("End Date");
    ui.add(DatePickerButton::new(&mut range.end).id_salt("end_date"));
    ui.add_space(6.0);

    if ui.button("Reset").clicked() {
        range = state.full_range();
    }

    ui.separator();
    let full = state.full_range();
    ui.label(RichText::new(format!("Data available: {full}")).small());

    // Recomputes only when a bound actually changed.
    state.set_range(range);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let table = state.table();
        ui.label(format!(
            "{} records loaded, {} in range",
            table.len(),
            state.outcome.row_count()
        ));

        if let FilterOutcome::Data { filtered, .. } = &state.outcome {
            ui.separator();
            ui.label(format!("{} rentals", filtered.total_cnt()));
        }

        let invalid = table.invalid_date_count();
        if invalid > 0 {
            ui.separator();
            ui.label(format!("{invalid} without a valid date"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
