//! Slide furniture shared by the modules: header, footer, placeholders,
//! metric cards and bar charts.

use crate::context::RenderContext;
use crate::document::{Align, Anchor, ShapeSpec, SlideSink, TextBox};
use crate::error::ModuleError;
use crate::kpi::Trend;
use crate::layout::{
    bar_rects, trend_pill, Rect, TrendPill, MUTED_COLOR, SLIDE_HEIGHT, SLIDE_WIDTH, SURFACE_COLOR,
    TEXT_COLOR, WHITE,
};

pub const NO_DATA_TEXT: &str = "No data for this period";
pub const SHARES_LIMITED_LABEL: &str = "Shares (limited)";

pub const MARGIN: f64 = 40.0;
const HEADER_HEIGHT: f64 = 64.0;
const FOOTER_HEIGHT: f64 = 32.0;

/// Content area between header and footer.
#[must_use]
pub fn body_area() -> Rect {
    Rect::new(
        MARGIN,
        HEADER_HEIGHT + 24.0,
        SLIDE_WIDTH - 2.0 * MARGIN,
        SLIDE_HEIGHT - HEADER_HEIGHT - FOOTER_HEIGHT - 40.0,
    )
}

/// Start a content slide with the standard header and footer and return the body area.
///
/// # Errors
///
/// Returns [`ModuleError::Document`] if the sink rejects an element.
pub fn content_slide(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
    title: &str,
) -> Result<Rect, ModuleError> {
    let page = ctx.pages.next_page();
    sink.add_slide(title, Some(WHITE));

    sink.add_shape(ShapeSpec::rect(
        Rect::new(0.0, 0.0, SLIDE_WIDTH, 6.0),
        ctx.palette.primary.clone(),
    ))?;
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, 18.0, 620.0, 40.0), title)
            .size(26.0)
            .bold()
            .color(ctx.palette.primary.clone())
            .anchor(Anchor::Middle),
    )?;
    sink.add_text(
        TextBox::new(Rect::new(SLIDE_WIDTH - MARGIN - 240.0, 18.0, 240.0, 40.0), ctx.month_label())
            .size(14.0)
            .color(ctx.palette.primary.clone())
            .align(Align::Right)
            .anchor(Anchor::Middle),
    )?;

    let footer_y = SLIDE_HEIGHT - FOOTER_HEIGHT;
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, footer_y, 500.0, 20.0), ctx.customer.name.clone())
            .size(10.0)
            .color(MUTED_COLOR),
    )?;
    sink.add_text(
        TextBox::new(
            Rect::new(SLIDE_WIDTH - MARGIN - 80.0, footer_y, 80.0, 20.0),
            page.to_string(),
        )
        .size(10.0)
        .color(MUTED_COLOR)
        .align(Align::Right),
    )?;

    Ok(body_area())
}

/// Full-bleed slide in a brand color with a centered headline; used by
/// cover, dividers and the closing slide. Consumes a page number but shows none.
///
/// # Errors
///
/// Returns [`ModuleError::Document`] if the sink rejects an element.
pub fn brand_slide(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
    title: &str,
    background: &str,
) -> Result<(), ModuleError> {
    ctx.pages.next_page();
    sink.add_slide(title, Some(background));
    Ok(())
}

/// Rounded gray panel with a centered "no data" message.
///
/// # Errors
///
/// Returns [`ModuleError::Document`] if the sink rejects an element.
pub fn placeholder(sink: &mut dyn SlideSink, area: Rect) -> Result<(), ModuleError> {
    sink.add_shape(ShapeSpec::rounded(area, SURFACE_COLOR))?;
    sink.add_text(
        TextBox::new(area, NO_DATA_TEXT)
            .size(18.0)
            .color(MUTED_COLOR)
            .align(Align::Center)
            .anchor(Anchor::Middle),
    )?;
    Ok(())
}

/// Small label / big value / trend pill block.
///
/// # Errors
///
/// Returns [`ModuleError::Document`] if the sink rejects an element.
pub fn metric_tile(
    sink: &mut dyn SlideSink,
    area: Rect,
    label: &str,
    value: &str,
    trend: Option<&Trend>,
) -> Result<(), ModuleError> {
    sink.add_shape(ShapeSpec::rounded(area, SURFACE_COLOR))?;
    let inner = area.inset(10.0);
    let (label_box, rest) = inner.split_top(18.0);
    sink.add_text(TextBox::new(label_box, label).size(11.0).color(MUTED_COLOR))?;
    let (value_box, pill_box) = rest.split_top((rest.h * 0.6).max(20.0));
    sink.add_text(
        TextBox::new(value_box, value)
            .size(22.0)
            .bold()
            .color(TEXT_COLOR)
            .anchor(Anchor::Middle),
    )?;
    if let Some(trend) = trend {
        let pill_rect = Rect::new(pill_box.x, pill_box.y, 90.0, pill_box.h.min(22.0));
        pill(sink, pill_rect, &trend_pill(trend))?;
    }
    Ok(())
}

/// Colored rounded badge carrying a trend percentage.
///
/// # Errors
///
/// Returns [`ModuleError::Document`] if the sink rejects an element.
pub fn pill(sink: &mut dyn SlideSink, area: Rect, pill: &TrendPill) -> Result<(), ModuleError> {
    sink.add_shape(ShapeSpec::rounded(area, pill.color))?;
    sink.add_text(
        TextBox::new(area, pill.text.clone())
            .size(10.0)
            .bold()
            .color(WHITE)
            .align(Align::Center)
            .anchor(Anchor::Middle),
    )?;
    Ok(())
}

/// One bar per value with its label above and category below.
///
/// Non-positive values draw no bar but keep their labels.
///
/// # Errors
///
/// Returns [`ModuleError::Document`] if the sink rejects an element.
pub fn bar_chart(
    sink: &mut dyn SlideSink,
    area: Rect,
    title: &str,
    bars: &[(String, f64, String)],
    color: &str,
) -> Result<(), ModuleError> {
    let (title_box, rest) = area.split_top(24.0);
    sink.add_text(TextBox::new(title_box, title).size(13.0).bold().color(TEXT_COLOR))?;

    let (plot, axis) = rest.split_top((rest.h - 22.0).max(0.0));
    let plot_area = Rect::new(plot.x, plot.y + 18.0, plot.w, (plot.h - 18.0).max(0.0));
    let values: Vec<f64> = bars.iter().map(|(_, v, _)| *v).collect();

    let rects = bar_rects(plot_area, &values, 14.0);
    for (rect, (category, _, value_label)) in rects.into_iter().zip(bars) {
        if rect.h > 0.0 {
            sink.add_shape(ShapeSpec::rect(rect, color))?;
        }
        sink.add_text(
            TextBox::new(
                Rect::new(rect.x - 6.0, rect.y - 18.0, rect.w + 12.0, 16.0),
                value_label.clone(),
            )
            .size(10.0)
            .color(TEXT_COLOR)
            .align(Align::Center),
        )?;
        sink.add_text(
            TextBox::new(
                Rect::new(rect.x - 6.0, axis.y + 4.0, rect.w + 12.0, 16.0),
                category.clone(),
            )
            .size(10.0)
            .color(MUTED_COLOR)
            .align(Align::Center),
        )?;
    }
    Ok(())
}
