use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2, vec2};

use crate::network::ContactNetwork;

use super::super::ViewModel;
use super::super::render_utils::{
    LINK_COLOR, NODE_COLOR, NODE_HOVER_COLOR, draw_background, edge_visible, node_screen_size,
    square_visible, world_to_screen,
};

/// Hover caption: the label attribute followed by the id, or just the id.
fn node_caption(network: &ContactNetwork, index: usize) -> Option<String> {
    let id = network.node_id(index)?;
    Some(match network.node_label(index) {
        Some(label) if label != id => format!("{label} ({id})"),
        _ => id.to_owned(),
    })
}

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        if self.fit_requested {
            self.fit_requested = false;
            self.fit_view(rect);
        }
        self.handle_graph_zoom(ui, rect, &response);
        self.handle_node_drag(ui, rect, &response);
        self.handle_graph_pan(&response);

        if !self.layout_stable || self.dragged_node.is_some() {
            let stable = self.layout.step();
            if stable && !self.layout_stable {
                log::debug!("layout settled with {:?}", self.layout.settings());
            }
            self.layout_stable = stable;
            ui.ctx().request_repaint();
        }

        if self.layout.body_count() == 0 {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "The network has no nodes.",
                FontId::proportional(14.0),
                Color32::from_gray(120),
            );
            return;
        }

        let (pan, zoom) = (self.pan, self.zoom);
        let screen: Vec<Pos2> = self
            .layout
            .positions()
            .map(|world| world_to_screen(rect, pan, zoom, world))
            .collect();

        let link_stroke = Stroke::new(1.0, LINK_COLOR);
        for &(from, to) in self.network.links() {
            let (Some(&start), Some(&end)) = (screen.get(from), screen.get(to)) else {
                continue;
            };
            if from != to && edge_visible(rect, start, end, 1.0) {
                painter.line_segment([start, end], link_stroke);
            }
        }

        let hovered = match self.dragged_node {
            Some(index) => Some(index),
            None => response
                .hover_pos()
                .and_then(|pointer| self.node_at(rect, pointer)),
        };

        let size = node_screen_size(zoom);
        for (index, &center) in screen.iter().enumerate() {
            if !square_visible(rect, center, size / 2.0) {
                continue;
            }
            let color = if hovered == Some(index) || self.layout.is_pinned(index) {
                NODE_HOVER_COLOR
            } else {
                NODE_COLOR
            };
            painter.rect_filled(Rect::from_center_size(center, Vec2::splat(size)), 0.0, color);
        }

        if self.dragged_node.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        } else if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grab);
        }

        if let Some(caption) = hovered.and_then(|index| node_caption(&self.network, index)) {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                caption,
                FontId::proportional(13.0),
                Color32::from_gray(30),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::parse_dot;

    #[test]
    fn caption_prefers_label_then_id() {
        let graph = parse_dot(r#"graph { 0 [label="Alice"]; 1; 2 [label="2"]; 0 -- 1 }"#)
            .expect("valid dot");
        let network = ContactNetwork::from_dot(&graph);

        assert_eq!(node_caption(&network, 0).as_deref(), Some("Alice (0)"));
        assert_eq!(node_caption(&network, 1).as_deref(), Some("1"));
        assert_eq!(node_caption(&network, 2).as_deref(), Some("2"));
        assert_eq!(node_caption(&network, 3), None);
    }
}
