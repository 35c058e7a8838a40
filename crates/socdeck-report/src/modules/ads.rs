use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use socdeck_core::{AdsMonthlySummary, CampaignSummary, TargetMonth};

use crate::context::RenderContext;
use crate::document::{SlideSink, TableCell, TableSpec};
use crate::error::ModuleError;
use crate::kpi::{count_trend, trend, AdsWindow, Trend};
use crate::layout::{
    format_compact, format_currency, format_grouped, format_percent, truncate_chars, GridLayout,
    Rect, NO_VALUE,
};

use super::common::{bar_chart, content_slide, metric_tile, placeholder};

const MAX_CAMPAIGNS: usize = 8;

fn window(ctx: &RenderContext) -> Result<&AdsWindow, ModuleError> {
    ctx.ads
        .as_ref()
        .ok_or_else(|| ModuleError::Render("no ads data in context".to_string()))
}

fn decimal_trend(current: Decimal, previous: Option<Decimal>) -> Trend {
    match (current.to_f64(), previous.and_then(|p| p.to_f64())) {
        (Some(c), Some(p)) => trend(c, p),
        _ => Trend::UNDEFINED,
    }
}

fn tiles(
    current: &AdsMonthlySummary,
    previous: Option<&AdsMonthlySummary>,
) -> Vec<(&'static str, String, Trend)> {
    let counts = |f: fn(&AdsMonthlySummary) -> u64| {
        previous.map_or(Trend::UNDEFINED, |p| count_trend(f(current), f(p)))
    };
    vec![
        (
            "Spend",
            format_currency(current.spend, &current.currency),
            decimal_trend(current.spend, previous.map(|p| p.spend)),
        ),
        ("Impressions", format_grouped(current.impressions), counts(|s| s.impressions)),
        ("Clicks", format_grouped(current.clicks), counts(|s| s.clicks)),
        ("Reach", format_grouped(current.reach), counts(|s| s.reach)),
        (
            "CTR",
            format_percent(current.ctr()),
            previous.map_or(Trend::UNDEFINED, |p| trend(current.ctr(), p.ctr())),
        ),
        (
            "CPC",
            current
                .cpc()
                .map_or_else(|| NO_VALUE.to_string(), |c| format_currency(c, &current.currency)),
            current.cpc().map_or(Trend::UNDEFINED, |c| {
                decimal_trend(c, previous.and_then(AdsMonthlySummary::cpc))
            }),
        ),
    ]
}

/// Spend per month for the bar chart; failed months show a dash.
fn spend_series(window: &AdsWindow, months: [TargetMonth; 3]) -> Vec<(String, f64, String)> {
    window
        .iter()
        .zip(months)
        .map(|(summary, month)| match summary {
            Some(s) => (
                month.short_label(),
                s.spend.to_f64().unwrap_or(0.0),
                format_compact(s.spend.trunc().to_u64().unwrap_or(0)),
            ),
            None => (month.short_label(), 0.0, NO_VALUE.to_string()),
        })
        .collect()
}

pub(super) fn render_overview(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
) -> Result<(), ModuleError> {
    let body = content_slide(ctx, sink, "Ads overview")?;
    let ctx = &*ctx;
    let window = window(ctx)?;

    let Some(current) = window[2].as_ref().filter(|s| s.has_activity()) else {
        return placeholder(sink, body);
    };

    let tiles_area = Rect::new(body.x, body.y, body.w * 0.62, body.h);
    let chart_area = Rect::new(body.x + body.w * 0.66, body.y, body.w * 0.34, body.h);

    let grid = GridLayout::new(tiles_area, 3, (tiles_area.h - 12.0) / 2.0);
    let values = tiles(current, window[1].as_ref());
    for (index, cell) in grid.place(values.len()) {
        let (label, value, trend) = &values[index];
        metric_tile(sink, cell, label, value, Some(trend))?;
    }

    bar_chart(
        sink,
        chart_area,
        &format!("Spend ({})", current.currency),
        &spend_series(window, ctx.month.window()),
        &ctx.palette.primary,
    )?;
    Ok(())
}

fn ranked_campaigns(summary: &AdsMonthlySummary) -> Vec<&CampaignSummary> {
    let mut campaigns: Vec<&CampaignSummary> = summary.campaigns.iter().collect();
    campaigns.sort_by(|a, b| b.spend.cmp(&a.spend).then_with(|| a.name.cmp(&b.name)));
    campaigns.truncate(MAX_CAMPAIGNS);
    campaigns
}

#[allow(clippy::cast_precision_loss)]
fn campaign_ctr(c: &CampaignSummary) -> String {
    if c.impressions == 0 {
        NO_VALUE.to_string()
    } else {
        format_percent(c.clicks as f64 / c.impressions as f64 * 100.0)
    }
}

pub(super) fn render_campaigns(
    ctx: &mut RenderContext,
    sink: &mut dyn SlideSink,
) -> Result<(), ModuleError> {
    let body = content_slide(ctx, sink, "Ads campaigns")?;
    let ctx = &*ctx;
    let window = window(ctx)?;

    let campaigns = window[2].as_ref().map(ranked_campaigns).unwrap_or_default();
    let Some(summary) = window[2].as_ref().filter(|_| !campaigns.is_empty()) else {
        return placeholder(sink, body);
    };

    let rows: Vec<Vec<TableCell>> = campaigns
        .iter()
        .map(|c| {
            vec![
                TableCell::from(truncate_chars(&c.name, 40)).bold(),
                TableCell::from(c.objective.as_deref().unwrap_or(NO_VALUE)),
                format_currency(c.spend, &summary.currency).into(),
                format_grouped(c.impressions).into(),
                format_grouped(c.clicks).into(),
                campaign_ctr(c).into(),
                format_grouped(c.results).into(),
            ]
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let height = (body.h / (MAX_CAMPAIGNS + 1) as f64 * (rows.len() + 1) as f64).min(body.h);
    sink.add_table(TableSpec {
        rect: Rect::new(body.x, body.y, body.w, height),
        column_weights: vec![2.6, 1.3, 1.3, 1.2, 1.0, 0.9, 0.9],
        header: ["Campaign", "Objective", "Spend", "Impressions", "Clicks", "CTR", "Results"]
            .map(str::to_string)
            .to_vec(),
        rows,
        header_fill: ctx.palette.primary.clone(),
        header_color: ctx.palette.on_primary().to_string(),
        font_size: 11.0,
    })?;
    Ok(())
}
