use socdeck_core::Platform;

use crate::context::RenderContext;
use crate::document::{Anchor, ShapeSpec, SlideSink, TextBox};
use crate::error::ModuleError;
use crate::layout::{Rect, SLIDE_WIDTH};

use super::common::{brand_slide, MARGIN};

fn section(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
    platform: Platform,
) -> Result<(), ModuleError> {
    let background = ctx.palette.secondary.clone();
    let ink = ctx.palette.on_secondary();
    let title = platform.label();
    brand_slide(ctx, sink, title, &background)?;

    sink.add_shape(ShapeSpec::rect(
        Rect::new(MARGIN, 300.0, 80.0, 6.0),
        ctx.palette.primary.clone(),
    ))?;
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, 200.0, SLIDE_WIDTH - 2.0 * MARGIN, 90.0), title)
            .size(44.0)
            .bold()
            .color(ink)
            .anchor(Anchor::Bottom),
    )?;
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, 320.0, SLIDE_WIDTH - 2.0 * MARGIN, 30.0), ctx.month_label())
            .size(18.0)
            .color(ink),
    )?;
    Ok(())
}

pub(super) fn render_facebook(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
) -> Result<(), ModuleError> {
    section(ctx, sink, Platform::Facebook)
}

pub(super) fn render_instagram(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
) -> Result<(), ModuleError> {
    section(ctx, sink, Platform::Instagram)
}

pub(super) fn render_ads(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
) -> Result<(), ModuleError> {
    section(ctx, sink, Platform::Ads)
}
