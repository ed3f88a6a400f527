mod app;
mod dataset;
mod dot;
mod layout;
mod network;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use dataset::{DatasetSources, GraphModel};
use layout::LayoutSettings;

const WINDOW_TITLE: &str = "SEIRS+ Model Simulation Data";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Dataset shown at startup.
    #[arg(long, value_enum, default_value_t = GraphModel::ModelG)]
    model: GraphModel,

    /// Read the modelG network from this DOT file instead of the bundled one.
    #[arg(long, value_name = "PATH")]
    model_g_dot: Option<PathBuf>,

    /// Read the modelQ network from this DOT file instead of the bundled one.
    #[arg(long, value_name = "PATH")]
    model_q_dot: Option<PathBuf>,

    /// JSON object overriding layout defaults, e.g. {"springLength": 40}.
    #[arg(long, value_name = "PATH")]
    layout: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let defaults = match &args.layout {
        Some(path) => LayoutSettings::from_json_file(path)?,
        None => LayoutSettings::default(),
    };
    let sources = DatasetSources::default()
        .with_override(GraphModel::ModelG, args.model_g_dot)
        .with_override(GraphModel::ModelQ, args.model_q_dot);

    log::info!(
        "starting with {} from {}",
        args.model.key(),
        sources.source(args.model).describe()
    );
    log::debug!("layout defaults: {defaults:?}");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    let model = args.model;
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(app::SeirsGraphApp::new(cc, sources, defaults, model)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
