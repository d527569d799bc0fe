use crate::assets::text::{TextMeasure, TextStyle};
use crate::config::ResolveOpts;
use crate::foundation::core::{Canvas, OutputParams, TimeSpan};
use crate::foundation::error::WlmpResult;
use crate::resolve::extents::TitleStyle;
use crate::resolve::graph::ProjectGraph;
use crate::timeline::clip::{ClipEffect, ClipSource, ResolvedClip, TitleMotion, push_clip};

/// Place every title on the overlay track.
///
/// A negative `gapBefore` on the next title shortens the current one so titles never overlap.
/// Scrolling titles cross the whole frame in exactly their duration; all others fade in and out.
#[tracing::instrument(skip_all)]
pub fn build_title_track(
    graph: &ProjectGraph,
    measure: &dyn TextMeasure,
    output: OutputParams,
    opts: &ResolveOpts,
) -> WlmpResult<Vec<ResolvedClip>> {
    let order = graph.text_track();
    let mut clips = Vec::with_capacity(order.len());
    let mut prev_end = 0.0_f64;

    for (i, idx) in order.iter().enumerate() {
        let t = graph.title(*idx);
        let gap = t.gap_before.max(0.0);
        let start = prev_end + gap;

        let mut duration = t.duration;
        if let Some(next) = order.get(i + 1) {
            let next_gap = graph.title(*next).gap_before;
            if next_gap < 0.0 {
                duration += next_gap;
            }
        }
        prev_end += duration.max(0.0) + gap;

        let style = pixel_style(&t.style, opts);
        let (canvas, motion, effects) = if t.scrolling && duration > 0.0 {
            let text_h = measure.text_height(&t.text, &style);
            let canvas_h = (text_h + opts.scroll_margin_px).ceil().max(1.0);
            let speed = (canvas_h + output.height_f64()) / duration;
            let canvas = Canvas {
                width: output.canvas.width,
                height: canvas_h.min(f64::from(u32::MAX)) as u32,
            };
            let motion = TitleMotion::Scroll {
                start_y: output.height_f64(),
                speed,
            };
            (canvas, motion, Vec::new())
        } else {
            let mut effects = Vec::new();
            if opts.title_fade_secs > 0.0 {
                effects.push(ClipEffect::FadeIn {
                    secs: opts.title_fade_secs,
                });
                effects.push(ClipEffect::FadeOut {
                    secs: opts.title_fade_secs,
                });
            }
            (output.canvas, TitleMotion::Static, effects)
        };

        push_clip(
            &mut clips,
            ResolvedClip {
                extent_id: t.extent_id.clone(),
                span: TimeSpan::at(start, duration),
                source: ClipSource::Title {
                    text: t.text.clone(),
                    style,
                    canvas,
                    motion,
                },
                effects,
            },
        );
    }

    tracing::info!(clips = clips.len(), end = prev_end, "title track built");
    Ok(clips)
}

fn pixel_style(style: &TitleStyle, opts: &ResolveOpts) -> TextStyle {
    let font_px = (style.relative_size * opts.font_size_scale).trunc().max(0.0);
    let outline_steps = u32::try_from(style.outline_size_index.max(0)).unwrap_or(u32::MAX);
    TextStyle {
        font_family: style.font_family.clone(),
        font_px: font_px.min(f64::from(u32::MAX)) as u32,
        color: style.color,
        outline_color: style.outline_color,
        outline_px: outline_steps.saturating_mul(opts.outline_px_per_step),
        align: style.align,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/title.rs"]
mod tests;
