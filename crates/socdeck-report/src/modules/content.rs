use socdeck_core::{Platform, PostRecord};

use crate::context::RenderContext;
use crate::document::{Align, Anchor, ImageSpec, ShapeSpec, SlideSink, TextBox};
use crate::error::ModuleError;
use crate::layout::{
    format_compact, format_grouped, truncate_chars, GridLayout, Rect, MUTED_COLOR, SURFACE_COLOR,
    TEXT_COLOR,
};

use super::common::{content_slide, placeholder};

const COLUMNS: usize = 3;
const EXCERPT_CHARS: usize = 90;

/// Draw one post card. Returns whether a thumbnail was embedded.
fn post_card(
    ctx: &RenderContext,
    sink: &mut dyn SlideSink,
    cell: Rect,
    rank: usize,
    post: &PostRecord,
) -> Result<bool, ModuleError> {
    sink.add_shape(ShapeSpec::rounded(cell, SURFACE_COLOR))?;
    let inner = cell.inset(8.0);
    let (thumb_area, text_area) = inner.split_top(inner.h * 0.6);

    let thumbnail = post
        .thumbnail_url
        .as_deref()
        .and_then(|url| ctx.assets.get(url));
    let embedded = if let Some(asset) = thumbnail {
        sink.add_image(ImageSpec {
            rect: thumb_area.fit_aspect(asset.aspect_ratio()),
            asset: asset.clone(),
            description: format!("{} post {}", post.platform.label(), post.id),
        })?;
        true
    } else {
        let excerpt = post
            .message
            .as_deref()
            .map(|m| truncate_chars(m, EXCERPT_CHARS))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| post.post_type.label().to_string());
        sink.add_shape(ShapeSpec::rect(thumb_area, ctx.palette.secondary.clone()))?;
        sink.add_text(
            TextBox::new(thumb_area.inset(8.0), excerpt)
                .size(11.0)
                .color(ctx.palette.on_secondary())
                .align(Align::Center)
                .anchor(Anchor::Middle),
        )?;
        false
    };

    let (meta_box, stats_box) = text_area.split_top(18.0);
    sink.add_text(
        TextBox::new(
            meta_box,
            format!(
                "#{rank} \u{b7} {} \u{b7} {}",
                post.created_at.format("%d.%m.%Y"),
                post.post_type.label()
            ),
        )
        .size(9.0)
        .color(MUTED_COLOR),
    )?;
    sink.add_text(
        TextBox::new(
            stats_box,
            format!(
                "Interactions {}\nReach {}",
                format_grouped(post.interactions()),
                format_compact(post.metrics.reach)
            ),
        )
        .size(11.0)
        .bold()
        .color(TEXT_COLOR),
    )?;
    Ok(embedded)
}

fn render(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
    platform: Platform,
) -> Result<(), ModuleError> {
    let title = format!("{} top posts", platform.label());
    let body = content_slide(ctx, sink, &title)?;
    let ctx = &*ctx;
    let data = ctx
        .social_data(platform)
        .ok_or_else(|| ModuleError::Render(format!("no {platform} data in context")))?;

    let shown: Vec<&PostRecord> = data.posts.iter().take(ctx.settings.top_posts).collect();
    if shown.is_empty() {
        return placeholder(sink, body);
    }

    let rows = shown.len().div_ceil(COLUMNS).max(1);
    #[allow(clippy::cast_precision_loss)]
    let row_height = (body.h - 12.0 * (rows as f64 - 1.0)) / rows as f64;
    let cells = GridLayout::new(body, COLUMNS, row_height).place(shown.len());
    if cells.len() < shown.len() {
        tracing::debug!(
            platform = %platform,
            shown = cells.len(),
            omitted = shown.len() - cells.len(),
            "top posts did not fit the grid"
        );
    }

    let mut fallbacks = 0_usize;
    for (index, cell) in cells {
        if !post_card(ctx, sink, cell, index + 1, shown[index])? {
            fallbacks += 1;
        }
    }
    if fallbacks > 0 {
        tracing::debug!(platform = %platform, fallbacks, "thumbnails rendered as text");
    }
    Ok(())
}

pub(super) fn render_facebook(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
) -> Result<(), ModuleError> {
    render(ctx, sink, Platform::Facebook)
}

pub(super) fn render_instagram(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
) -> Result<(), ModuleError> {
    render(ctx, sink, Platform::Instagram)
}
