//! Menu-driven exploratory analysis of a housing CSV table.
//!
//! The [`analysis`] engine is pure and works on a borrowed
//! [`data::model::Dataset`]; the [`menu`] drives it from the console and hands
//! figures to a [`ui::ChartSink`].

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod menu;
pub mod state;
pub mod ui;
