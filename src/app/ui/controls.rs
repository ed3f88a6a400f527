use eframe::egui::{
    self, Align, Align2, Color32, FontId, Layout, Response, RichText, Sense, TextEdit, Ui, vec2,
};

use crate::dataset::GraphModel;
use crate::layout::LayoutParam;

use super::super::ViewModel;
use super::super::tooltip::HelpHover;

const TITLE: &str = "SEIRS+ Model Simulation Data";
const SEIRSPLUS_URL: &str = "https://github.com/ryansmcgee/seirsplus";
const YASIV_URL: &str = "http://www.yasiv.com/graphs#";
const HELP_ICON_SIZE: f32 = 16.0;

fn help_icon(ui: &mut Ui) -> Response {
    let (rect, response) =
        ui.allocate_exact_size(vec2(HELP_ICON_SIZE, HELP_ICON_SIZE), Sense::hover());
    let fill = if response.hovered() {
        Color32::from_gray(60)
    } else {
        Color32::from_gray(140)
    };

    let painter = ui.painter();
    painter.circle_filled(rect.center(), HELP_ICON_SIZE / 2.0, fill);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "?",
        FontId::proportional(11.0),
        Color32::WHITE,
    );
    response
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(
        &mut self,
        ui: &mut Ui,
        loading: Option<GraphModel>,
    ) -> Option<GraphModel> {
        ui.add_space(6.0);
        ui.hyperlink_to(RichText::new(TITLE).heading().strong(), SEIRSPLUS_URL);
        ui.separator();

        let requested = self.draw_model_picker(ui, loading);
        ui.separator();

        self.draw_layout_settings(ui);
        ui.separator();

        egui::Grid::new("network_stats")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("Nodes:");
                ui.label(self.network.node_count().to_string());
                ui.end_row();
                ui.label("Edges:");
                ui.label(self.network.link_count().to_string());
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Reset view").clicked() {
                self.reset_view();
            }
            if ui
                .button("Fit view")
                .on_hover_text("Zoom and pan so the whole network is visible.")
                .clicked()
            {
                self.fit_requested = true;
            }
        });
        let status = if self.layout_stable {
            "Layout settled"
        } else {
            "Layout running..."
        };
        ui.weak(status);

        ui.with_layout(Layout::bottom_up(Align::Min), |ui| {
            ui.add_space(6.0);
            ui.hyperlink_to("Inspired by yasiv.com", YASIV_URL);
        });

        requested
    }

    fn draw_model_picker(
        &mut self,
        ui: &mut Ui,
        loading: Option<GraphModel>,
    ) -> Option<GraphModel> {
        ui.heading("Network Graph");

        let shown = loading.unwrap_or(self.model);
        let mut selected = shown;
        ui.vertical(|ui| {
            for model in GraphModel::ALL {
                ui.horizontal(|ui| {
                    ui.radio_value(&mut selected, model, model.label());
                    if loading == Some(model) {
                        ui.spinner();
                    }
                });
            }
        });

        if let Some(error) = &self.switch_error {
            ui.colored_label(ui.visuals().error_fg_color, error.as_str());
        }

        (selected != shown).then_some(selected)
    }

    fn draw_layout_settings(&mut self, ui: &mut Ui) {
        ui.heading("Layout Settings");
        let now = ui.input(|input| input.time);

        egui::Grid::new("layout_settings")
            .num_columns(4)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for param in LayoutParam::ALL {
                    let icon = help_icon(ui);
                    if icon.hovered() {
                        self.help_hover = Some(HelpHover {
                            param,
                            icon: icon.rect,
                        });
                    }

                    ui.label(format!("{}:", param.key()));
                    let response = ui.add(
                        TextEdit::singleline(self.form.input_mut(param))
                            .id_salt(("layout_setting", param.key()))
                            .desired_width(100.0),
                    );
                    if response.changed() {
                        self.form.mark_edited(param, now);
                    }

                    if self.form.is_pending(param) {
                        ui.weak("•");
                    } else {
                        ui.label("");
                    }
                    ui.end_row();
                }
            });

        ui.add_space(4.0);
        if ui.button("Reset to default").clicked() {
            self.form.reset();
        }
    }
}
