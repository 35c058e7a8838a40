use socdeck_core::{MonthlyKpi, Platform};

use crate::context::RenderContext;
use crate::document::SlideSink;
use crate::error::ModuleError;
use crate::layout::{format_compact, Rect, NO_VALUE};

use super::common::{bar_chart, content_slide, placeholder};

const CHART_GAP: f64 = 24.0;

#[allow(clippy::cast_precision_loss)]
fn series(window: &[MonthlyKpi], metric: fn(&MonthlyKpi) -> u64) -> Vec<(String, f64, String)> {
    window
        .iter()
        .map(|k| {
            let category = k.month.short_label();
            if k.data_available {
                let v = metric(k);
                (category, v as f64, format_compact(v))
            } else {
                (category, 0.0, NO_VALUE.to_string())
            }
        })
        .collect()
}

fn render(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
    platform: Platform,
) -> Result<(), ModuleError> {
    let title = format!("{} trends", platform.label());
    let body = content_slide(ctx, sink, &title)?;
    let data = ctx
        .social_data(platform)
        .ok_or_else(|| ModuleError::Render(format!("no {platform} data in context")))?;

    if data.is_empty() {
        return placeholder(sink, body);
    }

    let charts: [(&str, fn(&MonthlyKpi) -> u64); 3] = [
        ("Reach", |k| k.reach),
        ("Interactions", MonthlyKpi::interactions),
        ("Followers", |k| k.followers),
    ];
    let width = (body.w - CHART_GAP * 2.0) / 3.0;
    let color = ctx.palette.primary.clone();
    for (i, (label, metric)) in charts.into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let x = body.x + i as f64 * (width + CHART_GAP);
        bar_chart(
            sink,
            Rect::new(x, body.y, width, body.h),
            label,
            &series(&data.window, metric),
            &color,
        )?;
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
