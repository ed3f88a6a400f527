use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::ViewModel;
use super::super::render_utils::{
    MAX_ZOOM, MIN_ZOOM, node_screen_size, screen_to_world, world_to_screen,
};

const FIT_MARGIN: f32 = 40.0;
const HIT_SLOP: f32 = 2.0;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        self.zoom_around(rect, pointer, scroll);
    }

    /// Zooms by a scroll amount while keeping the world point under `pointer` fixed.
    fn zoom_around(&mut self, rect: Rect, pointer: Pos2, scroll: f32) {
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    /// Primary drags on empty canvas pan, as do secondary and middle drags anywhere.
    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if self.dragged_node.is_some() {
            return;
        }
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// A primary drag that starts on a node pins it under the pointer until release.
    pub(in crate::app) fn handle_node_drag(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            let origin = ui.input(|input| input.pointer.press_origin());
            self.dragged_node = origin.and_then(|pointer| self.node_at(rect, pointer));
            if let Some(index) = self.dragged_node {
                self.layout.pin(index);
                log::debug!("dragging node {index} from {:?}", self.layout.position(index));
            }
        }

        let Some(index) = self.dragged_node else {
            return;
        };

        if let Some(pointer) = response.interact_pointer_pos() {
            let world = screen_to_world(rect, self.pan, self.zoom, pointer);
            self.layout.set_position(index, world);
        }

        if response.drag_stopped() {
            self.layout.unpin(index);
            self.dragged_node = None;
            self.layout_stable = false;
        }
    }

    /// Node whose square is under `pointer`; the closest centre wins on overlap.
    pub(in crate::app) fn node_at(&self, rect: Rect, pointer: Pos2) -> Option<usize> {
        let reach = node_screen_size(self.zoom) / 2.0 + HIT_SLOP;

        self.layout
            .positions()
            .enumerate()
            .filter_map(|(index, world)| {
                let offset = world_to_screen(rect, self.pan, self.zoom, world) - pointer;
                (offset.x.abs() <= reach && offset.y.abs() <= reach)
                    .then(|| (index, offset.length_sq()))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn reset_view(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }

    pub(in crate::app) fn fit_view(&mut self, rect: Rect) {
        let Some((min, max)) = self.layout.bounds() else {
            self.reset_view();
            return;
        };

        let extent = (max - min).max(Vec2::splat(1.0));
        let usable = (rect.size() - Vec2::splat(FIT_MARGIN * 2.0)).max(Vec2::splat(1.0));
        self.zoom = (usable.x / extent.x).min(usable.y / extent.y).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = -((min + max) * 0.5) * self.zoom;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::dataset::GraphModel;
    use crate::dot::parse_dot;
    use crate::layout::LayoutSettings;
    use crate::network::ContactNetwork;

    fn two_node_view(a: Vec2, b: Vec2) -> ViewModel {
        let graph = parse_dot("graph { a -- b }").expect("valid dot");
        let mut view = ViewModel::new(
            GraphModel::ModelG,
            ContactNetwork::from_dot(&graph),
            LayoutSettings::default(),
        );
        view.layout.set_position(0, a);
        view.layout.set_position(1, b);
        view
    }

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0))
    }

    #[test]
    fn fit_view_leaves_the_margin_and_centres_the_network() {
        let mut view = two_node_view(vec2(-100.0, -50.0), vec2(300.0, 150.0));
        let rect = canvas();
        view.fit_view(rect);

        let top_left = world_to_screen(rect, view.pan, view.zoom, vec2(-100.0, -50.0));
        let bottom_right = world_to_screen(rect, view.pan, view.zoom, vec2(300.0, 150.0));
        assert!((view.zoom - 1.8).abs() < 1e-4);
        assert!((top_left.x - FIT_MARGIN).abs() < 1e-3);
        assert!((rect.right() - bottom_right.x - FIT_MARGIN).abs() < 1e-3);

        let top_gap = top_left.y - rect.top();
        let bottom_gap = rect.bottom() - bottom_right.y;
        assert!(top_gap >= FIT_MARGIN);
        assert!((top_gap - bottom_gap).abs() < 1e-3);
    }

    #[test]
    fn fit_view_is_limited_by_the_tighter_axis() {
        let mut view = two_node_view(vec2(0.0, 0.0), vec2(100.0, 1000.0));
        let rect = canvas();
        view.fit_view(rect);

        let top = world_to_screen(rect, view.pan, view.zoom, vec2(0.0, 0.0));
        let bottom = world_to_screen(rect, view.pan, view.zoom, vec2(100.0, 1000.0));
        assert!((top.y - FIT_MARGIN).abs() < 1e-3);
        assert!((rect.bottom() - bottom.y - FIT_MARGIN).abs() < 1e-3);
        assert!(((top.x + bottom.x) / 2.0 - rect.center().x).abs() < 1e-3);
    }

    #[test]
    fn scroll_zoom_keeps_the_point_under_the_pointer() {
        let mut view = two_node_view(vec2(0.0, 0.0), vec2(10.0, 10.0));
        view.pan = vec2(35.0, -20.0);
        view.zoom = 1.3;
        let rect = canvas();
        let pointer = pos2(610.0, 145.0);
        let world = screen_to_world(rect, view.pan, view.zoom, pointer);

        for scroll in [40.0, 40.0, -120.0, 500.0] {
            let zoom_before = view.zoom;
            view.zoom_around(rect, pointer, scroll);
            assert_ne!(view.zoom, zoom_before);
            let after = world_to_screen(rect, view.pan, view.zoom, world);
            assert!((after - pointer).length() < 1e-2, "{after:?} drifted from {pointer:?}");
        }
    }

    #[test]
    fn scroll_zoom_stays_within_limits() {
        let mut view = two_node_view(vec2(0.0, 0.0), vec2(10.0, 10.0));
        let rect = canvas();
        for _ in 0..200 {
            view.zoom_around(rect, rect.center(), 1000.0);
        }
        assert_eq!(view.zoom, MAX_ZOOM);
        for _ in 0..200 {
            view.zoom_around(rect, rect.center(), -1000.0);
        }
        assert_eq!(view.zoom, MIN_ZOOM);
    }

    #[test]
    fn reset_view_restores_identity() {
        let mut view = two_node_view(vec2(0.0, 0.0), vec2(10.0, 10.0));
        view.pan = vec2(12.0, 7.0);
        view.zoom = 3.0;
        view.reset_view();
        assert_eq!(view.pan, Vec2::ZERO);
        assert_eq!(view.zoom, 1.0);
    }
}
