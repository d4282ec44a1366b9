/// Presentation layer: chart model, console rendering and egui windows.

pub mod chart;
pub mod plot;

use std::io::Write;

use anyhow::anyhow;
use eframe::egui;

use crate::app::ChartApp;
use chart::Figure;

/// Anything that can display a [`Figure`].
pub trait ChartSink {
    fn show(&mut self, figure: Figure) -> anyhow::Result<()>;
}

impl<S: ChartSink + ?Sized> ChartSink for Box<S> {
    fn show(&mut self, figure: Figure) -> anyhow::Result<()> {
        (**self).show(figure)
    }
}

// ---------------------------------------------------------------------------
// Native window
// ---------------------------------------------------------------------------

/// Opens a blocking eframe window per figure.
#[derive(Debug, Default)]
pub struct WindowSink;

impl ChartSink for WindowSink {
    fn show(&mut self, figure: Figure) -> anyhow::Result<()> {
        log::info!("Opening chart window: {}", figure.title);
        let rows = figure.charts.len().div_ceil(figure.columns.max(1)) as f32;
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, (320.0 * rows).clamp(480.0, 1000.0)])
                .with_min_inner_size([480.0, 360.0]),
            ..Default::default()
        };

        let title = format!("Housing Explorer – {}", figure.title);
        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| Ok(Box::new(ChartApp::new(figure)))),
        )
        .map_err(|e| anyhow!("chart window failed: {e}"))
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Writes figures as plain text.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartSink for TextSink<W> {
    fn show(&mut self, figure: Figure) -> anyhow::Result<()> {
        write!(self.out, "{figure}")?;
        self.out.flush()?;
        Ok(())
    }
}
