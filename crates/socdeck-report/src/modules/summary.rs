use rust_decimal::prelude::ToPrimitive;
use socdeck_core::{AdsMonthlySummary, Platform};

use crate::context::RenderContext;
use crate::document::{Align, Anchor, ShapeSpec, SlideSink, TextBox};
use crate::error::ModuleError;
use crate::kpi::{count_trend, trend, AdsWindow, SocialData, Trend};
use crate::layout::{
    format_compact, format_currency, format_grouped_signed, format_percent, trend_pill, Rect,
    MUTED_COLOR, SURFACE_COLOR, TEXT_COLOR,
};

use super::common::{content_slide, pill, placeholder, NO_DATA_TEXT};

/// The summary card adds saves to Facebook interactions even though the
/// platform does not report saves; the KPI table does not.
pub const FACEBOOK_SUMMARY_INCLUDES_SAVES: bool = true;

const CARD_GAP: f64 = 16.0;
const NOTES_HEIGHT: f64 = 64.0;

struct Line {
    label: &'static str,
    value: String,
    trend: Trend,
}

fn social_lines(data: &SocialData) -> Vec<Line> {
    let (current, previous) = (data.current(), data.previous());
    let include_saves = data.platform == Platform::Facebook && FACEBOOK_SUMMARY_INCLUDES_SAVES;
    let interactions = |i: usize| {
        let row = &data.window[i];
        if include_saves {
            row.interactions().saturating_add(data.saves[i])
        } else {
            row.interactions()
        }
    };
    let comparable = current.data_available && previous.data_available;
    let guarded = |t: Trend| if comparable { t } else { Trend::UNDEFINED };

    vec![
        Line {
            label: "Reach",
            value: format_compact(current.reach),
            trend: guarded(count_trend(current.reach, previous.reach)),
        },
        Line {
            label: "Interactions",
            value: format_compact(interactions(2)),
            trend: guarded(count_trend(interactions(2), interactions(1))),
        },
        Line {
            label: "Engagement rate",
            value: format_percent(current.engagement_rate),
            trend: guarded(trend(current.engagement_rate, previous.engagement_rate)),
        },
        Line {
            label: "New followers",
            value: format_grouped_signed(current.new_followers),
            trend: guarded(trend(as_f64(current.new_followers), as_f64(previous.new_followers))),
        },
    ]
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(v: i64) -> f64 {
    v as f64
}

fn spend(summary: Option<&AdsMonthlySummary>) -> Option<f64> {
    summary.and_then(|s| s.spend.to_f64())
}

fn ads_lines(window: &AdsWindow) -> Option<Vec<Line>> {
    let current = window[2].as_ref().filter(|s| s.has_activity())?;
    let previous = window[1].as_ref();
    let spend_trend = match (spend(Some(current)), spend(previous)) {
        (Some(c), Some(p)) => trend(c, p),
        _ => Trend::UNDEFINED,
    };
    let clicks_trend = previous.map_or(Trend::UNDEFINED, |p| count_trend(current.clicks, p.clicks));
    Some(vec![
        Line {
            label: "Spend",
            value: format_currency(current.spend, &current.currency),
            trend: spend_trend,
        },
        Line {
            label: "Clicks",
            value: format_compact(current.clicks),
            trend: clicks_trend,
        },
        Line {
            label: "CTR",
            value: format_percent(current.ctr()),
            trend: previous.map_or(Trend::UNDEFINED, |p| trend(current.ctr(), p.ctr())),
        },
    ])
}

fn card(
    ctx: &RenderContext,
    sink: &mut dyn SlideSink,
    area: Rect,
    heading: &str,
    lines: Option<Vec<Line>>,
) -> Result<(), ModuleError> {
    sink.add_shape(ShapeSpec::rounded(area, SURFACE_COLOR))?;
    let (head, rest) = area.split_top(36.0);
    sink.add_shape(ShapeSpec::rect(head, ctx.palette.primary.clone()))?;
    sink.add_text(
        TextBox::new(head.inset(8.0), heading)
            .size(14.0)
            .bold()
            .color(ctx.palette.on_primary())
            .anchor(Anchor::Middle),
    )?;

    let Some(lines) = lines else {
        sink.add_text(
            TextBox::new(rest.inset(12.0), NO_DATA_TEXT)
                .size(12.0)
                .color(MUTED_COLOR)
                .align(Align::Center)
                .anchor(Anchor::Middle),
        )?;
        return Ok(());
    };

    let inner = rest.inset(12.0);
    #[allow(clippy::cast_precision_loss)]
    let line_height = (inner.h / lines.len().max(1) as f64).min(64.0);
    for (i, line) in lines.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let y = inner.y + i as f64 * line_height;
        sink.add_text(
            TextBox::new(Rect::new(inner.x, y, inner.w, 16.0), line.label)
                .size(10.0)
                .color(MUTED_COLOR),
        )?;
        sink.add_text(
            TextBox::new(Rect::new(inner.x, y + 16.0, inner.w * 0.6, 26.0), line.value.clone())
                .size(18.0)
                .bold()
                .color(TEXT_COLOR)
                .anchor(Anchor::Middle),
        )?;
        pill(
            sink,
            Rect::new(inner.right() - 72.0, y + 19.0, 72.0, 20.0),
            &trend_pill(&line.trend),
        )?;
    }
    Ok(())
}

/// One card per enabled platform plus the request notes.
pub(super) fn render(ctx: &mut RenderContext, sink: &mut dyn SlideSink) -> Result<(), ModuleError> {
    let body = content_slide(ctx, sink, "Executive summary")?;
    let ctx = &*ctx;

    let mut cards: Vec<(&str, Option<Vec<Line>>)> = ctx
        .social_in_order()
        .map(|data| {
            let lines = (!data.is_empty()).then(|| social_lines(data));
            (data.platform.label(), lines)
        })
        .collect();
    if let Some(window) = &ctx.ads {
        cards.push((Platform::Ads.label(), ads_lines(window)));
    }

    let (card_area, notes_area) = match ctx.notes.as_deref() {
        Some(_) => {
            let (top, _) = body.split_top(body.h - NOTES_HEIGHT - 12.0);
            (top, Some(Rect::new(body.x, body.bottom() - NOTES_HEIGHT, body.w, NOTES_HEIGHT)))
        }
        None => (body, None),
    };

    if cards.is_empty() {
        placeholder(sink, card_area)?;
    } else {
        #[allow(clippy::cast_precision_loss)]
        let n = cards.len() as f64;
        let width = (card_area.w - CARD_GAP * (n - 1.0)) / n;
        for (i, (heading, lines)) in cards.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = card_area.x + i as f64 * (width + CARD_GAP);
            card(ctx, sink, Rect::new(x, card_area.y, width, card_area.h), heading, lines)?;
        }
    }

    if let (Some(area), Some(notes)) = (notes_area, ctx.notes.as_deref()) {
        sink.add_shape(ShapeSpec::rect(
            Rect::new(area.x, area.y, 4.0, area.h),
            ctx.palette.primary.clone(),
        ))?;
        sink.add_text(
            TextBox::new(Rect::new(area.x + 14.0, area.y, area.w - 14.0, area.h), notes)
                .size(12.0)
                .color(TEXT_COLOR)
                .anchor(Anchor::Middle),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, empty_social};
    use super::*;
    use crate::document::RecordingSink;

    #[test]
    fn one_card_per_platform_with_notes() {
        let mut ctx = context(&Platform::ALL)
            .with_notes(Some("Launch of the autumn range".to_string()));
        let mut sink = RecordingSink::new();
        render(&mut ctx, &mut sink).unwrap();

        let texts = sink.texts();
        assert!(texts.contains(&"Facebook"));
        assert!(texts.contains(&"Instagram"));
        assert!(texts.contains(&"Paid advertising"));
        assert!(texts.contains(&"Launch of the autumn range"));
        assert!(texts.contains(&"450,50 EUR"));
    }

    #[test]
    fn ads_trends_undefined_after_failed_month() {
        let ctx = context(&[Platform::Ads]);
        let lines = ads_lines(ctx.ads.as_ref().unwrap()).unwrap();
        assert_eq!(lines[0].trend, Trend::UNDEFINED);
        assert_eq!(lines[2].value, "1,5%");
    }

    #[test]
    fn facebook_interactions_include_saves() {
        let ctx = context(&[Platform::Facebook]);
        let data = ctx.social_data(Platform::Facebook).unwrap();
        let lines = social_lines(data);
        let expected = data.current().interactions() + data.saves[2];
        assert_eq!(lines[1].value, format_compact(expected));
    }

    #[test]
    fn instagram_interactions_are_unchanged() {
        let ctx = context(&[Platform::Instagram]);
        let data = ctx.social_data(Platform::Instagram).unwrap();
        assert_eq!(social_lines(data)[1].value, format_compact(data.current().interactions()));
    }

    #[test]
    fn empty_platform_card_says_no_data() {
        let mut ctx = context(&[]).with_social(empty_social(Platform::Instagram));
        let mut sink = RecordingSink::new();
        render(&mut ctx, &mut sink).unwrap();
        assert!(sink.texts().contains(&NO_DATA_TEXT));
    }

    #[test]
    fn no_platforms_gives_placeholder() {
        let mut ctx = context(&[]);
        let mut sink = RecordingSink::new();
        render(&mut ctx, &mut sink).unwrap();
        assert_eq!(sink.slide_titles(), vec!["Executive summary"]);
        assert!(sink.texts().contains(&NO_DATA_TEXT));
    }
}
