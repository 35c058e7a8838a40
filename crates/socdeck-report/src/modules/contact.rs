use crate::context::RenderContext;
use crate::document::{Anchor, SlideSink, TextBox};
use crate::error::ModuleError;
use crate::layout::{Rect, SLIDE_WIDTH};

use super::common::{brand_slide, MARGIN};

pub(super) fn render(ctx: &mut RenderContext, sink: &mut dyn SlideSink) -> Result<(), ModuleError> {
    let background = ctx.palette.primary.clone();
    let ink = ctx.palette.on_primary();
    brand_slide(ctx, sink, "Contact", &background)?;

    let width = SLIDE_WIDTH - 2.0 * MARGIN;
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, 120.0, width, 60.0), "Thank you")
            .size(40.0)
            .bold()
            .color(ink)
            .anchor(Anchor::Bottom),
    )?;

    let contact = &ctx.customer.contact;
    let lines: Vec<&str> = [
        contact.name.as_deref(),
        contact.email.as_deref(),
        contact.phone.as_deref(),
        contact.website.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .collect();

    let details = if lines.is_empty() {
        ctx.customer.name.clone()
    } else {
        lines.join("\n")
    };
    sink.add_text(
        TextBox::new(Rect::new(MARGIN, 210.0, width, 160.0), details)
            .size(18.0)
            .color(ink),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use socdeck_core::ContactDetails;

    use super::super::test_support::context;
    use super::*;
    use crate::document::RecordingSink;

    #[test]
    fn lists_available_contact_lines() {
        let mut ctx = context(&[]);
        let mut sink = RecordingSink::new();
        render(&mut ctx, &mut sink).unwrap();

        assert_eq!(sink.slide_titles(), vec!["Contact"]);
        assert!(sink
            .texts()
            .contains(&"Jana Berg\njana@nordlicht.example\nhttps://nordlicht.example"));
    }

    #[test]
    fn falls_back_to_customer_name() {
        let mut ctx = context(&[]);
        ctx.customer.contact = ContactDetails::default();
        let mut sink = RecordingSink::new();
        render(&mut ctx, &mut sink).unwrap();
        assert!(sink.texts().contains(&"Nordlicht Bakery"));
    }
}
