use crate::context::RenderContext;
use crate::document::{Align, Anchor, ImageSpec, ShapeSpec, SlideSink, TextBox};
use crate::error::ModuleError;
use crate::layout::{Rect, SLIDE_WIDTH};

use super::common::{brand_slide, MARGIN};

const LOGO_BOX: Rect = Rect::new(MARGIN, 60.0, 200.0, 120.0);

/// Brand-colored title slide. The logo falls back to the customer name in a
/// panel when it could not be fetched.
pub(super) fn render(ctx: &mut RenderContext, sink: &mut dyn SlideSink) -> Result<(), ModuleError> {
    let background = ctx.palette.primary.clone();
    let ink = ctx.palette.on_primary();
    brand_slide(ctx, sink, "Cover", &background)?;

    let logo = ctx
        .customer
        .logo_url
        .as_deref()
        .and_then(|url| ctx.assets.get(url));
    match logo {
        Some(asset) => sink.add_image(ImageSpec {
            rect: LOGO_BOX.fit_aspect(asset.aspect_ratio()),
            asset: asset.clone(),
            description: format!("{} logo", ctx.customer.name),
        })?,
        None => {
            sink.add_shape(ShapeSpec::rounded(LOGO_BOX, ctx.palette.secondary.clone()))?;
            sink.add_text(
                TextBox::new(LOGO_BOX.inset(8.0), ctx.customer.name.clone())
                    .size(20.0)
                    .bold()
                    .color(ctx.palette.on_secondary())
                    .align(Align::Center)
                    .anchor(Anchor::Middle),
            )?;
        }
    }

    let width = SLIDE_WIDTH - 2.0 * MARGIN;
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, 250.0, width, 70.0), ctx.customer.name.clone())
            .size(40.0)
            .bold()
            .color(ink)
            .anchor(Anchor::Bottom),
    )?;
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, 330.0, width, 30.0), "Social media report")
            .size(20.0)
            .color(ink),
    )?;
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, 370.0, width, 30.0), ctx.month_label())
            .size(20.0)
            .bold()
            .color(ink),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, logo_context};
    use super::*;
    use crate::document::{RecordingSink, SinkCall};

    #[test]
    fn logo_falls_back_to_name_panel() {
        let mut ctx = context(&[]);
        let mut sink = RecordingSink::new();
        render(&mut ctx, &mut sink).unwrap();

        assert_eq!(sink.slide_titles(), vec!["Cover"]);
        assert_eq!(sink.image_count(), 0);
        let texts = sink.texts();
        assert!(texts.contains(&"Nordlicht Bakery"));
        assert!(texts.contains(&"September 2026"));
        assert_eq!(ctx.pages.current(), 1);
    }

    #[tokio::test]
    async fn cached_logo_is_embedded() {
        let mut ctx = logo_context().await;
        let mut sink = RecordingSink::new();
        render(&mut ctx, &mut sink).unwrap();

        assert_eq!(sink.image_count(), 1);
        assert!(sink
            .calls()
            .iter()
            .any(|c| matches!(
                c,
                SinkCall::Image { description } if description == "Nordlicht Bakery logo"
            )));
    }
}
