use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::{primary, series_colors};
use crate::ui::chart::{Chart, ChartKind, Figure};

/// Smallest height a single plot is squeezed to.
const MIN_PLOT_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Figure grid (central panel)
// ---------------------------------------------------------------------------

/// Render every chart of the figure, `figure.columns` per row.
pub fn figure_plot(ui: &mut Ui, figure: &Figure) {
    if figure.charts.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nothing to plot");
        });
        return;
    }

    let columns = figure.columns.max(1);
    let rows = figure.charts.len().div_ceil(columns);
    let height = (ui.available_height() / rows as f32 - 40.0).max(MIN_PLOT_HEIGHT);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (row, charts) in figure.charts.chunks(columns).enumerate() {
                ui.columns(columns, |cells: &mut [Ui]| {
                    for (col, chart) in charts.iter().enumerate() {
                        let id = format!("chart_{row}_{col}");
                        chart_plot(&mut cells[col], chart, &id, height);
                    }
                });
                ui.add_space(8.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Single chart
// ---------------------------------------------------------------------------

fn chart_plot(ui: &mut Ui, chart: &Chart, id: &str, height: f32) {
    ui.strong(&chart.title);

    let mut plot = Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some(y_max) = chart.y_max {
        plot = plot.include_y(0.0).include_y(y_max);
    }

    plot.show(ui, |plot_ui| match &chart.kind {
        ChartKind::Bar { labels, values } => {
            // One bar chart per bar so each label gets a legend entry.
            let colors = series_colors(labels.len());
            for (i, ((label, &value), color)) in
                labels.iter().zip(values).zip(colors).enumerate()
            {
                let bar = Bar::new(i as f64, value).width(0.6).name(label);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(color));
            }
        }
        ChartKind::Scatter { points } => {
            let series: PlotPoints = points.iter().copied().collect();
            plot_ui.points(
                Points::new(series)
                    .radius(3.0)
                    .color(primary())
                    .name(&chart.y_label),
            );
        }
        ChartKind::Histogram { bins } => {
            let bars = bins
                .iter()
                .map(|bin| {
                    Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                        .width(bin.end - bin.start)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(primary()).name(&chart.x_label));
        }
    });
}
