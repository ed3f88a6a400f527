use eframe::egui::{
    self, Color32, Context, CornerRadius, Margin, Pos2, Rect, RichText, pos2,
};

use crate::layout::LayoutParam;

const TOOLTIP_WIDTH: f32 = 200.0;
const TOOLTIP_PADDING: f32 = 10.0;
const TOOLTIP_FONT_SIZE: f32 = 12.0;
const TOOLTIP_CORNER_RADIUS: u8 = 5;

/// Help icon currently under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct HelpHover {
    pub(in crate::app) param: LayoutParam,
    pub(in crate::app) icon: Rect,
}

/// Top-left corner of the help box: to the left of the icon, vertically
/// offset by half the icon height, kept inside `screen`.
pub(in crate::app) fn tooltip_origin(icon: Rect, screen: Rect) -> Pos2 {
    let outer_width = TOOLTIP_WIDTH + TOOLTIP_PADDING * 2.0;
    let x = icon.left() - outer_width;
    let y = icon.top() - icon.height() / 2.0;

    pos2(
        x.min(screen.right() - outer_width).max(screen.left()),
        y.max(screen.top()),
    )
}

pub(in crate::app) fn show_help_tooltip(ctx: &Context, hover: HelpHover) {
    let screen = ctx.content_rect();
    let origin = tooltip_origin(hover.icon, screen);

    egui::Area::new(egui::Id::new("layout_help_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(origin)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::BLACK)
                .corner_radius(CornerRadius::same(TOOLTIP_CORNER_RADIUS))
                .inner_margin(Margin::same(TOOLTIP_PADDING as i8))
                .show(ui, |ui| {
                    ui.set_width(TOOLTIP_WIDTH);
                    ui.add(
                        egui::Label::new(
                            RichText::new(hover.param.help())
                                .size(TOOLTIP_FONT_SIZE)
                                .color(Color32::WHITE),
                        )
                        .wrap(),
                    );
                });
        });
}
