use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use eframe::egui::{self, Context, Vec2};

use crate::dataset::{DatasetSources, GraphModel};
use crate::layout::{ForceLayout, LayoutSettings};
use crate::network::ContactNetwork;

mod form;
mod graph;
mod render_utils;
mod tooltip;
mod ui;

use form::SettingsForm;
use tooltip::HelpHover;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct SeirsGraphApp {
    sources: Arc<DatasetSources>,
    defaults: LayoutSettings,
    state: AppState,
    switch: Option<PendingLoad>,
}

struct PendingLoad {
    model: GraphModel,
    rx: Receiver<Result<ContactNetwork, String>>,
}

enum AppState {
    Loading(PendingLoad),
    Ready(Box<ViewModel>),
    Error { model: GraphModel, message: String },
}

struct ViewModel {
    model: GraphModel,
    network: ContactNetwork,
    form: SettingsForm,
    layout: ForceLayout,
    layout_revision: u64,
    layout_stable: bool,
    switch_error: Option<String>,
    pan: Vec2,
    zoom: f32,
    dragged_node: Option<usize>,
    help_hover: Option<HelpHover>,
    fit_requested: bool,
}

impl SeirsGraphApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        sources: DatasetSources,
        defaults: LayoutSettings,
        model: GraphModel,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let sources = Arc::new(sources);
        let state = AppState::Loading(Self::spawn_load(Arc::clone(&sources), model));
        Self {
            sources,
            defaults,
            state,
            switch: None,
        }
    }

    fn spawn_load(sources: Arc<DatasetSources>, model: GraphModel) -> PendingLoad {
        let (tx, rx) = mpsc::channel();
        log::info!("loading {}", model.key());

        thread::spawn(move || {
            let result = sources.load(model).map_err(|error| format!("{error:#}"));
            match &result {
                Ok(network) => log::info!(
                    "loaded {}: {} nodes, {} edges",
                    model.key(),
                    network.node_count(),
                    network.link_count()
                ),
                Err(error) => log::error!("{error}"),
            }
            let _ = tx.send(result);
        });

        PendingLoad { model, rx }
    }

    /// Starts, keeps or cancels the background switch so that it ends on
    /// `requested`. Any earlier switch error is cleared.
    fn request_model(
        switch: &mut Option<PendingLoad>,
        view: &mut ViewModel,
        requested: GraphModel,
        spawn: impl FnOnce(GraphModel) -> PendingLoad,
    ) {
        view.switch_error = None;
        if requested == view.model {
            if let Some(pending) = switch.take() {
                log::info!("cancelled switch to {}", pending.model.key());
            }
            return;
        }

        if switch.as_ref().is_some_and(|pending| pending.model == requested) {
            return;
        }
        *switch = Some(spawn(requested));
    }
}

impl eframe::App for SeirsGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading(pending) => {
                match pending.rx.try_recv() {
                    Ok(Ok(network)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            pending.model,
                            network,
                            self.defaults,
                        ))));
                    }
                    Ok(Err(message)) => {
                        transition = Some(AppState::Error {
                            model: pending.model,
                            message,
                        });
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint_after(LOAD_POLL_INTERVAL),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error {
                            model: pending.model,
                            message: "Background load worker disconnected".to_owned(),
                        });
                    }
                }

                let model = pending.model;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(format!("Loading {}...", model.label()));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error { model, message } => {
                let model = *model;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading(format!("Failed to load {}", model.label()));
                    ui.add_space(6.0);
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(AppState::Loading(Self::spawn_load(
                            Arc::clone(&self.sources),
                            model,
                        )));
                    }
                });
            }
            AppState::Ready(view) => {
                let loading = self.switch.as_ref().map(|pending| pending.model);
                if let Some(requested) = view.show(ctx, loading) {
                    Self::request_model(&mut self.switch, view, requested, |model| {
                        Self::spawn_load(Arc::clone(&self.sources), model)
                    });
                }

                if let Some(pending) = self.switch.take() {
                    match pending.rx.try_recv() {
                        Ok(result) => view.finish_switch(pending.model, result),
                        Err(TryRecvError::Empty) => {
                            ctx.request_repaint_after(LOAD_POLL_INTERVAL);
                            self.switch = Some(pending);
                        }
                        Err(TryRecvError::Disconnected) => view.finish_switch(
                            pending.model,
                            Err("Background load worker disconnected".to_owned()),
                        ),
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.switch = None;
            self.state = next_state;
        }
    }
}
