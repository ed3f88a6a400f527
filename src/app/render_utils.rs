use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

pub(super) const NODE_COLOR: Color32 = Color32::from_rgb(0, 158, 232);
pub(super) const NODE_HOVER_COLOR: Color32 = Color32::from_rgb(232, 94, 0);
pub(super) const LINK_COLOR: Color32 = Color32::from_rgb(179, 179, 179);

pub(super) const MIN_ZOOM: f32 = 0.05;
pub(super) const MAX_ZOOM: f32 = 8.0;

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::WHITE);

    let step = (60.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_gray(244));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

/// Side length of a node square on screen.
pub(super) fn node_screen_size(zoom: f32) -> f32 {
    (10.0 * zoom).clamp(2.0, 24.0)
}

pub(super) fn square_visible(rect: Rect, center: Pos2, half_size: f32) -> bool {
    !(center.x + half_size < rect.left()
        || center.x - half_size > rect.right()
        || center.y + half_size < rect.top()
        || center.y - half_size > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    if max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom() {
        return false;
    }

    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let top_left = rect.left_top();
    let top_right = rect.right_top();
    let bottom_left = rect.left_bottom();
    let bottom_right = rect.right_bottom();

    segments_intersect(start, end, top_left, top_right)
        || segments_intersect(start, end, top_right, bottom_right)
        || segments_intersect(start, end, bottom_right, bottom_left)
        || segments_intersect(start, end, bottom_left, top_left)
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 300.0))
    }

    #[test]
    fn screen_and_world_coordinates_agree() {
        let pan = vec2(15.0, -40.0);
        let zoom = 2.5;
        let world = vec2(-12.0, 7.5);
        let screen = world_to_screen(canvas(), pan, zoom, world);
        assert_eq!(screen, pos2(200.0 + 15.0 - 30.0, 150.0 - 40.0 + 18.75));
        assert!((screen_to_world(canvas(), pan, zoom, screen) - world).length() < 1e-4);
    }

    #[test]
    fn squares_touching_the_edge_are_visible() {
        assert!(square_visible(canvas(), pos2(-4.0, 10.0), 5.0));
        assert!(!square_visible(canvas(), pos2(-6.0, 10.0), 5.0));
        assert!(!square_visible(canvas(), pos2(200.0, 310.0), 5.0));
    }

    #[test]
    fn edge_crossing_the_canvas_is_visible_without_visible_ends() {
        assert!(edge_visible(canvas(), pos2(-50.0, 150.0), pos2(450.0, 150.0), 1.0));
        assert!(!edge_visible(canvas(), pos2(-50.0, -50.0), pos2(-10.0, 500.0), 1.0));
    }

    #[test]
    fn diagonal_edge_past_a_corner_is_culled() {
        assert!(!edge_visible(canvas(), pos2(350.0, -100.0), pos2(500.0, 50.0), 1.0));
    }

    #[test]
    fn node_size_follows_zoom_within_limits() {
        assert_eq!(node_screen_size(1.0), 10.0);
        assert_eq!(node_screen_size(0.01), 2.0);
        assert_eq!(node_screen_size(10.0), 24.0);
    }
}
