use std::time::Duration;

use eframe::egui::{self, Context, Vec2};

use crate::dataset::GraphModel;
use crate::layout::{ForceLayout, LayoutSettings};
use crate::network::ContactNetwork;

use super::super::ViewModel;
use super::super::form::SettingsForm;
use super::super::tooltip::show_help_tooltip;

impl ViewModel {
    pub(in crate::app) fn new(
        model: GraphModel,
        network: ContactNetwork,
        defaults: LayoutSettings,
    ) -> Self {
        let form = SettingsForm::new(defaults);
        let layout = ForceLayout::new(&network, form.settings());

        Self {
            model,
            layout_revision: form.revision(),
            network,
            form,
            layout,
            layout_stable: false,
            switch_error: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            dragged_node: None,
            help_hover: None,
            fit_requested: false,
        }
    }

    /// Swaps in another dataset; the layout settings carry over.
    pub(in crate::app) fn replace_network(&mut self, model: GraphModel, network: ContactNetwork) {
        log::info!("showing {}", model.key());
        self.model = model;
        self.network = network;
        self.switch_error = None;
        self.restart_layout();
    }

    /// Applies the outcome of a background switch. A failure keeps the
    /// current network and is shown under the dataset picker.
    pub(in crate::app) fn finish_switch(
        &mut self,
        model: GraphModel,
        result: Result<ContactNetwork, String>,
    ) {
        match result {
            Ok(network) => self.replace_network(model, network),
            Err(message) => {
                log::warn!("keeping {} after failed switch to {}", self.model.key(), model.key());
                self.switch_error = Some(message);
            }
        }
    }

    fn restart_layout(&mut self) {
        self.layout = ForceLayout::new(&self.network, self.form.settings());
        self.layout_revision = self.form.revision();
        self.layout_stable = false;
        self.dragged_node = None;
    }

    /// Draws one frame. Returns the dataset the user picked, if it differs
    /// from the one shown or loading.
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        loading: Option<GraphModel>,
    ) -> Option<GraphModel> {
        let now = ctx.input(|input| input.time);
        self.form.poll(now);
        self.help_hover = None;

        let mut requested = None;
        egui::SidePanel::right("controls")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| requested = self.draw_controls(ui, loading));

        if self.form.revision() != self.layout_revision {
            self.restart_layout();
        }
        if let Some(due) = self.form.next_due() {
            ctx.request_repaint_after(Duration::from_secs_f64((due - now).max(0.0)));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));

        if let Some(hover) = self.help_hover {
            show_help_tooltip(ctx, hover);
        }

        requested
    }
}
