use std::io;

use clap::Parser;

use housing_explorer::config::Config;
use housing_explorer::menu::Menu;
use housing_explorer::state::Session;
use housing_explorer::ui::{ChartSink, TextSink, WindowSink};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();

    let mut session = Session::open(&config.data);
    if config.clean && session.dataset.is_some() {
        let report = session.clean()?;
        log::info!("Startup cleanup replaced {} missing values", report.total());
    }

    let charts: Box<dyn ChartSink> = if config.headless {
        Box::new(TextSink::new(io::stdout()))
    } else {
        Box::new(WindowSink)
    };

    let mut menu = Menu::new(session, io::stdin().lock(), io::stdout(), charts, config.preview_rows);
    menu.run()
}
