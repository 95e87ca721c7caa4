use std::borrow::Cow;
use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, RichText, ScrollArea, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints,
    PlotUi, Points, Text,
};

use crate::color::{self, HueRamp};
use crate::data::aggregate::{CategoryTotal, DerivedViews, FilterOutcome, MonthlyTotal, SeasonTotals};
use crate::data::labels::LabelTable;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the five charts, or the empty-range warning.
pub fn dashboard(ui: &mut Ui, state: &AppState, chart_height: f32) {
    ui.heading("Bike Sharing Analysis Dashboard");
    ui.separator();

    let views = match &state.outcome {
        FilterOutcome::Data { views, .. } => views,
        FilterOutcome::Empty => {
            ui.colored_label(
                color::WARNING,
                "No data available for the selected date range.",
            );
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            charts(ui, state, views, chart_height);
        });
}

fn charts(ui: &mut Ui, state: &AppState, views: &DerivedViews, height: f32) {
    let labels = &state.labels;

    ui.strong("Trend of Bicycle Users Over Time");
    monthly_trend_plot(ui, &views.monthly_trend, height);
    ui.add_space(12.0);

    ui.strong("Pattern of Bike Rentals by Season");
    season_plot(ui, &views.season_pattern, &labels.season, height);
    ui.add_space(12.0);

    ui.strong("Pattern of Bike Rentals by Weather");
    category_plot(
        ui,
        CategoryChart {
            id: "weather_pattern",
            x_label: "Weather Conditions",
            y_label: "Bicycle Users",
            labels: &labels.weather,
            ramp: color::VIRIDIS,
            bar_width: 0.6,
        },
        &views.weather_pattern,
        height,
    );
    ui.add_space(12.0);

    ui.strong("Comparison of Bike Rentals Between Holidays and Weekdays");
    category_plot(
        ui,
        CategoryChart {
            id: "working_day_pattern",
            x_label: "",
            y_label: "Users",
            labels: &labels.working_day,
            ramp: color::SET2,
            bar_width: 0.5,
        },
        &views.working_day_pattern,
        height,
    );
    ui.add_space(12.0);

    ui.strong("Comparison of Daily Bike Rentals");
    category_plot(
        ui,
        CategoryChart {
            id: "weather_count",
            x_label: "Weather Conditions",
            y_label: "Number of Bicycle Users",
            labels: &labels.weather_count,
            ramp: color::SPECTRAL,
            bar_width: 0.6,
        },
        &views.weather_count,
        height,
    );
    if let Some(notice) = &state.unlabeled_notice {
        ui.label(RichText::new(notice).color(color::WARNING).small());
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

/// Axis setup shared by every chart.
struct Axes<'a> {
    id: &'a str,
    x_label: &'a str,
    y_label: &'a str,
    /// Tick text per integer slot on the x axis.
    ticks: Vec<String>,
    legend: bool,
}

/// Non-interactive plot with integer x ticks labelled from `axes.ticks`.
fn show_static_plot(ui: &mut Ui, axes: Axes<'_>, height: f32, build: impl FnOnce(&mut PlotUi)) {
    let slot_count = axes.ticks.len();
    let ticks = axes.ticks;

    let mut plot = Plot::new(axes.id)
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid([false, true])
        .include_y(0.0)
        .include_x(-0.5)
        .include_x(slot_count as f64 - 0.5)
        .x_axis_label(axes.x_label)
        .y_axis_label(axes.y_label)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            tick_label(&ticks, mark.value)
        });
    if axes.legend {
        plot = plot.legend(Legend::default());
    }
    plot.show(ui, build);
}

/// Label for an integer slot, empty between slots and outside the axis.
fn tick_label(ticks: &[String], value: f64) -> String {
    let slot = value.round();
    if (value - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    ticks.get(slot as usize).cloned().unwrap_or_default()
}

fn monthly_trend_plot(ui: &mut Ui, trend: &[MonthlyTotal], height: f32) {
    let ticks: Vec<String> = trend.iter().map(|m| m.month.to_string()).collect();
    let points: Vec<[f64; 2]> = trend
        .iter()
        .enumerate()
        .map(|(i, m)| [i as f64, m.total as f64])
        .collect();

    let axes = Axes {
        id: "monthly_trend",
        x_label: "Month-Year",
        y_label: "Total Users",
        ticks,
        legend: false,
    };
    show_static_plot(ui, axes, height, |plot_ui| {
        plot_ui.line(
            Line::new(PlotPoints::from(points.clone()))
                .color(color::TREND_LINE)
                .width(2.0)
                .name("Total Users"),
        );
        plot_ui.points(
            Points::new(PlotPoints::from(points))
                .color(color::TREND_LINE)
                .radius(4.0),
        );
    });
}

fn season_plot(ui: &mut Ui, seasons: &[SeasonTotals], labels: &LabelTable, height: f32) {
    let slots = labels.axis_slots(seasons.iter().map(|s| s.season));
    let position = |code: u8| slot_of(&slots, code);

    let registered = BarChart::new(
        seasons
            .iter()
            .map(|s| Bar::new(position(s.season), s.registered as f64).width(0.6))
            .collect(),
    )
    .name("Registered")
    .color(color::TAB_RED);

    let casual = BarChart::new(
        seasons
            .iter()
            .map(|s| Bar::new(position(s.season), s.casual as f64).width(0.6))
            .collect(),
    )
    .name("Casual")
    .color(color::TAB_BLUE)
    .stack_on(&[&registered]);

    let axes = Axes {
        id: "season_pattern",
        x_label: "Season",
        y_label: "Users",
        ticks: tick_texts(&slots),
        legend: true,
    };
    show_static_plot(ui, axes, height, |plot_ui| {
        plot_ui.bar_chart(registered);
        plot_ui.bar_chart(casual);
    });
}

/// Presentation of one categorical sum view.
struct CategoryChart<'a> {
    id: &'a str,
    x_label: &'a str,
    y_label: &'a str,
    labels: &'a LabelTable,
    ramp: HueRamp,
    bar_width: f64,
}

/// One bar per present code, placed on the slot of its label; every
/// labelled slot keeps its tick even without a bar.
fn category_plot(ui: &mut Ui, chart: CategoryChart<'_>, totals: &[CategoryTotal], height: f32) {
    let slots = chart.labels.axis_slots(totals.iter().map(|t| t.code));
    let palette = chart.ramp.colors(slots.len());

    let bars: Vec<Bar> = totals
        .iter()
        .map(|t| {
            let x = slot_of(&slots, t.code);
            Bar::new(x, t.total as f64)
                .width(chart.bar_width)
                .name(chart.labels.label_for(t.code))
                .fill(palette.get(x as usize).copied().unwrap_or(Color32::GRAY))
        })
        .collect();
    let value_labels: Vec<(f64, u64)> = totals
        .iter()
        .map(|t| (slot_of(&slots, t.code), t.total))
        .collect();

    let axes = Axes {
        id: chart.id,
        x_label: chart.x_label,
        y_label: chart.y_label,
        ticks: tick_texts(&slots),
        legend: false,
    };
    show_static_plot(ui, axes, height, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars));
        annotate_values(plot_ui, &value_labels);
    });
}

/// Draw each bar's value just above its top.
fn annotate_values(plot_ui: &mut PlotUi, values: &[(f64, u64)]) {
    for &(x, total) in values {
        plot_ui.text(
            Text::new(PlotPoint::new(x, total as f64), total.to_string())
                .anchor(Align2::CENTER_BOTTOM),
        );
    }
}

fn slot_of(slots: &[(u8, Cow<'static, str>)], code: u8) -> f64 {
    slots.iter().position(|(c, _)| *c == code).unwrap_or(slots.len()) as f64
}

fn tick_texts(slots: &[(u8, Cow<'static, str>)]) -> Vec<String> {
    slots.iter().map(|(_, label)| label.to_string()).collect()
}
