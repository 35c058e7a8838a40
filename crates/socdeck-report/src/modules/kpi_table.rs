use socdeck_core::{MonthlyKpi, Platform};

use crate::context::RenderContext;
use crate::document::{SlideSink, TableCell, TableSpec};
use crate::error::ModuleError;
use crate::kpi::{trend, SocialData, Trend};
use crate::layout::{
    format_decimal, format_grouped, format_grouped_signed, format_percent, trend_pill, NO_VALUE,
};

use super::common::{content_slide, placeholder, SHARES_LIMITED_LABEL};

/// Facebook share counts are labelled as limited because the platform only
/// reports a subset of shares.
pub const FACEBOOK_SHARES_MARKED_LIMITED: bool = true;

type Value = fn(&MonthlyKpi) -> f64;

#[allow(clippy::cast_precision_loss)]
fn count(v: u64) -> f64 {
    v as f64
}

#[allow(clippy::cast_precision_loss)]
fn signed(v: i64) -> f64 {
    v as f64
}

enum Format {
    Count,
    Signed,
    Decimal,
    Percent,
}

struct Row {
    label: &'static str,
    value: Value,
    format: Format,
}

fn row(label: &'static str, value: Value, format: Format) -> Row {
    Row { label, value, format }
}

fn rows(platform: Platform) -> Vec<Row> {
    let third = match platform {
        Platform::Facebook if FACEBOOK_SHARES_MARKED_LIMITED => SHARES_LIMITED_LABEL,
        Platform::Instagram => "Saves",
        _ => "Shares",
    };
    vec![
        row("Posts", |k| count(k.posts_count), Format::Count),
        row("Reach", |k| count(k.reach), Format::Count),
        row("Impressions", |k| count(k.impressions), Format::Count),
        row("Reactions", |k| count(k.reactions), Format::Count),
        row("Comments", |k| count(k.comments), Format::Count),
        row(third, |k| count(k.shares_or_saves), Format::Count),
        row("Interactions", |k| count(k.interactions()), Format::Count),
        row("Engagement rate", |k| k.engagement_rate, Format::Percent),
        row("Avg. reach per post", |k| k.avg_reach_per_post, Format::Decimal),
        row("Video views", |k| count(k.video_views), Format::Count),
        row("Followers", |k| count(k.followers), Format::Count),
        row("New followers", |k| signed(k.new_followers), Format::Signed),
    ]
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_value(value: f64, format: &Format) -> String {
    match format {
        Format::Count => format_grouped(value.max(0.0) as u64),
        Format::Signed => format_grouped_signed(value as i64),
        Format::Decimal => format_decimal(value, 1),
        Format::Percent => format_percent(value),
    }
}

fn month_cell(kpi: &MonthlyKpi, r: &Row) -> TableCell {
    if kpi.data_available {
        format_value((r.value)(kpi), &r.format).into()
    } else {
        NO_VALUE.into()
    }
}

fn row_trend(data: &SocialData, r: &Row) -> Trend {
    let (current, previous) = (data.current(), data.previous());
    if !current.data_available || !previous.data_available {
        return Trend::UNDEFINED;
    }
    trend((r.value)(current), (r.value)(previous))
}

fn render(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
    platform: Platform,
) -> Result<(), ModuleError> {
    let title = format!("{} KPIs", platform.label());
    let body = content_slide(ctx, sink, &title)?;
    let data = ctx
        .social_data(platform)
        .ok_or_else(|| ModuleError::Render(format!("no {platform} data in context")))?;

    if data.is_empty() {
        return placeholder(sink, body);
    }

    let mut header = vec!["Metric".to_string()];
    header.extend(data.window.iter().map(|k| k.month.short_label()));
    header.push("Trend".to_string());

    let table_rows = rows(platform)
        .iter()
        .map(|r| {
            let mut cells = vec![TableCell::from(r.label).bold()];
            cells.extend(data.window.iter().map(|k| month_cell(k, r)));
            let pill = trend_pill(&row_trend(data, r));
            cells.push(TableCell::colored(pill.text, pill.color).bold());
            cells
        })
        .collect();

    sink.add_table(TableSpec {
        rect: body,
        column_weights: vec![2.2, 1.2, 1.2, 1.2, 1.0],
        header,
        rows: table_rows,
        header_fill: ctx.palette.primary.clone(),
        header_color: ctx.palette.on_primary().to_string(),
        font_size: 11.0,
    })?;
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

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, empty_social, month};
    use super::*;
    use crate::document::{RecordingSink, SinkCall, SlideElement};
    use crate::layout::{DOWN_COLOR, UP_COLOR};
    use crate::modules::NO_DATA_TEXT;

    fn table(sink: &RecordingSink) -> &TableSpec {
        sink.deck().slides()[0]
            .elements
            .iter()
            .find_map(|e| match e {
                SlideElement::Table(t) => Some(t),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn facebook_table_has_three_months_and_limited_shares() {
        let mut ctx = context(&[Platform::Facebook]);
        let mut sink = RecordingSink::new();
        render_facebook(&mut ctx, &mut sink).unwrap();

        assert_eq!(sink.slide_titles(), vec!["Facebook KPIs"]);
        let table = table(&sink);
        assert_eq!(
            table.header,
            vec!["Metric", "Jul 2026", "Aug 2026", "Sep 2026", "Trend"]
        );
        assert_eq!(table.rows.len(), 12);
        assert!(table.rows.iter().any(|r| r[0].text == SHARES_LIMITED_LABEL));
        // one post of 40 reactions in August against three posts in September
        let posts = &table.rows[0];
        assert_eq!(posts[2].text, "1");
        assert_eq!(posts[3].text, "3");
        assert_eq!(posts[4].text, "+200,0%");
        assert_eq!(posts[4].color.as_deref(), Some(UP_COLOR));
    }

    #[test]
    fn instagram_table_labels_saves() {
        let mut ctx = context(&[Platform::Instagram]);
        let mut sink = RecordingSink::new();
        render_instagram(&mut ctx, &mut sink).unwrap();
        assert!(table(&sink).rows.iter().any(|r| r[0].text == "Saves"));
    }

    #[test]
    fn failed_month_shows_dash_and_undefined_trend() {
        let mut ctx = context(&[Platform::Facebook]);
        ctx.social[0].window[1] = MonthlyKpi::zero_filled(month().previous());
        let mut sink = RecordingSink::new();
        render_facebook(&mut ctx, &mut sink).unwrap();

        let reach = &table(&sink).rows[1];
        assert_eq!(reach[2].text, NO_VALUE);
        assert_eq!(reach[4].text, NO_VALUE);
        assert_ne!(reach[4].color.as_deref(), Some(DOWN_COLOR));
    }

    #[test]
    fn empty_platform_renders_placeholder() {
        let mut ctx = context(&[]).with_social(empty_social(Platform::Facebook));
        let mut sink = RecordingSink::new();
        render_facebook(&mut ctx, &mut sink).unwrap();

        assert!(sink.texts().contains(&NO_DATA_TEXT));
        assert!(!sink.calls().iter().any(|c| matches!(c, SinkCall::Table { .. })));
    }

    #[test]
    fn missing_platform_data_is_an_error() {
        let mut ctx = context(&[]);
        let mut sink = RecordingSink::new();
        let err = render_facebook(&mut ctx, &mut sink).unwrap_err();
        assert!(matches!(err, ModuleError::Render(_)));
    }
}
