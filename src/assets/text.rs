use crate::foundation::core::Rgb8;
use crate::resolve::extents::TextAlign;

/// Title styling in output pixels, as handed to the render backend.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Requested family or display name. Font file lookup is the backend's job.
    pub font_family: String,
    /// Font size in output pixels.
    pub font_px: u32,
    /// Fill color.
    pub color: Rgb8,
    /// Outline (stroke) color.
    pub outline_color: Rgb8,
    /// Outline width in pixels; 0 for none.
    pub outline_px: u32,
    /// Horizontal alignment of each line.
    pub align: TextAlign,
}

/// Measures laid-out text without rendering it.
pub trait TextMeasure {
    /// Natural height in pixels of `text` laid out with `style`, with no width constraint.
    fn text_height(&self, text: &str, style: &TextStyle) -> f64;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_height(&self, text: &str, style: &TextStyle) -> f64 {
        (**self).text_height(text, style)
    }
}

/// Estimate from line count and font metrics.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineMetricsMeasure {
    /// Line advance as a multiple of the font pixel size.
    pub line_height: f64,
}

impl Default for LineMetricsMeasure {
    fn default() -> Self {
        Self { line_height: 1.2 }
    }
}

impl TextMeasure for LineMetricsMeasure {
    fn text_height(&self, text: &str, style: &TextStyle) -> f64 {
        // An empty title still occupies one line box.
        let lines = text.split('\n').count().max(1) as f64;
        lines * f64::from(style.font_px) * self.line_height + 2.0 * f64::from(style.outline_px)
    }
}

/// Shaped measurement with Parley, from caller-supplied font bytes.
///
/// Every title is measured in the registered face; `font_family` is not consulted.
#[cfg(feature = "text-parley")]
pub struct ParleyMeasure {
    family: String,
    contexts: std::cell::RefCell<(parley::FontContext, parley::LayoutContext<[u8; 4]>)>,
}

#[cfg(feature = "text-parley")]
impl ParleyMeasure {
    /// Register `font_bytes` and measure with the first family they contain.
    pub fn from_font_bytes(font_bytes: &[u8]) -> crate::foundation::error::WlmpResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| anyhow::anyhow!("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| anyhow::anyhow!("registered font family has no name"))?
            .to_string();
        tracing::debug!(%family, "text measure font registered");

        Ok(Self {
            family,
            contexts: std::cell::RefCell::new((font_ctx, parley::LayoutContext::new())),
        })
    }

    /// Family name the measurer lays text out with.
    pub fn family(&self) -> &str {
        &self.family
    }
}

#[cfg(feature = "text-parley")]
impl TextMeasure for ParleyMeasure {
    fn text_height(&self, text: &str, style: &TextStyle) -> f64 {
        let mut guard = self.contexts.borrow_mut();
        let (font_ctx, layout_ctx) = &mut *guard;

        let mut builder = layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Borrowed(self.family.as_str())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.font_px as f32));
        let mut layout: parley::Layout<[u8; 4]> = builder.build(text);
        layout.break_all_lines(None);

        f64::from(layout.height()) + 2.0 * f64::from(style.outline_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
