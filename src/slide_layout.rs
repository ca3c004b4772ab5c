//! Slide layout – scales panels and distributes them over fixed-size slides.
//!
//! Panels are taken in document order, two per slide (top and bottom slot).
//! A full-slide panel takes a slide on its own, and the slide after it uses
//! the first-slide top margin again. Each panel is scaled uniformly to fit
//! its slot, centred horizontally, pinned to the slot top and clamped to the
//! slide bounds.

use crate::extract::ElementInfo;
use crate::panels::Group;

/// Inputs of the slide layout, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayoutParams {
    pub slide_width: f32,
    pub slide_height: f32,
    /// Top margin of the first content slide (and of the slide following a
    /// full-slide panel).
    pub first_top_margin: f32,
    /// Top margin of other slides, bottom margin of every slide, and the
    /// base gap between two slots.
    pub margin: f32,
    /// Extra vertical gap between the two slots.
    pub gap_y: f32,
    /// Upper bound of the scale applied to a panel.
    pub scale_factor: f32,
}

impl Default for SlideLayoutParams {
    fn default() -> Self {
        Self {
            slide_width: 13.333,
            slide_height: 7.5,
            first_top_margin: 0.15,
            margin: 0.15,
            gap_y: 0.0,
            scale_factor: 1.35,
        }
    }
}

const MIN_PANEL_SIZE: f32 = 0.1;
const MIN_ITEM_SIZE: f32 = 0.05;

/// Split group indices into per-slide chunks.
fn chunk_groups(groups: &[Group]) -> Vec<Vec<usize>> {
    let mut chunks = Vec::new();
    let mut i = 0;
    while i < groups.len() {
        if groups[i].full_slide {
            chunks.push(vec![i]);
            i += 1;
        } else if i + 1 < groups.len() && !groups[i + 1].full_slide {
            chunks.push(vec![i, i + 1]);
            i += 2;
        } else {
            chunks.push(vec![i]);
            i += 1;
        }
    }
    chunks
}

/// Assign slides and final geometry to every group.
pub fn layout_groups(groups: &mut [Group], p: &SlideLayoutParams) {
    let gap_y = if p.gap_y.is_finite() { p.gap_y.max(0.0) } else { 0.0 };
    let mut is_first = true;
    let mut slide = 1;

    for chunk in chunk_groups(groups) {
        let top = if is_first { p.first_top_margin } else { p.margin };
        let bottom = p.margin;
        let count = chunk.len();
        let gap = if count == 2 { p.margin + gap_y } else { 0.0 };
        let available = (p.slide_height - top - bottom - gap).max(0.1);
        let slot = available / count as f32;

        for (position, &idx) in chunk.iter().enumerate() {
            let group = &mut groups[idx];
            fit_to_slot(group, p, slot);
            group.slide = slide;

            let slot_top = if position == 0 {
                top
            } else {
                top + slot + gap
            };
            place_in_slot(group, p.slide_width, slot_top, slot);
            clamp_to_slide_bounds(group, p.slide_width, p.slide_height);
        }

        log::debug!(
            "Slide {slide}: {count} group(s), slot height {slot:.3}in"
        );
        is_first = chunk.iter().any(|&i| groups[i].full_slide);
        slide += 1;
    }
}

fn fit_to_slot(group: &mut Group, p: &SlideLayoutParams, slot: f32) {
    let w = group.background.rect.w;
    let h = group.background.rect.h;
    let mut scale = p.scale_factor.min(p.slide_width / w).min(slot / h);
    if !scale.is_finite() || scale <= 0.0 {
        scale = 1.0;
    }
    apply_uniform_scale(group, scale);

    let bg = group.background.rect;
    if bg.h > slot || bg.w > p.slide_width {
        let shrink = (p.slide_width / bg.w).min(slot / bg.h);
        apply_uniform_scale(group, shrink);
    }
}

fn place_in_slot(group: &mut Group, slide_width: f32, slot_top: f32, slot: f32) {
    let bg = group.background.rect;
    let target_x = ((slide_width - bg.w) / 2.0).max(0.0);
    translate_group(group, target_x - bg.x, slot_top - bg.y);

    let slot_bottom = slot_top + slot;
    let bottom = group.background.rect.bottom();
    if bottom > slot_bottom {
        translate_group(group, 0.0, slot_bottom - bottom);
    }
    let y = group.background.rect.y;
    if y < slot_top {
        translate_group(group, 0.0, slot_top - y);
    }
}

fn scale_info(info: &mut ElementInfo, factor: f32) {
    info.margins.scale(factor);
    info.styles.scale(factor);
    info.content_width *= factor;
}

/// Scale a group by `factor` around its background centre. Children keep
/// their position relative to that centre.
pub fn apply_uniform_scale(group: &mut Group, factor: f32) {
    if factor == 1.0 || !factor.is_finite() || factor <= 0.0 {
        return;
    }
    let (cx, cy) = group.background.rect.center();

    let bg = &mut group.background;
    let w = (bg.rect.w * factor).max(MIN_PANEL_SIZE);
    let h = (bg.rect.h * factor).max(MIN_PANEL_SIZE);
    bg.rect.x = cx - w / 2.0;
    bg.rect.y = cy - h / 2.0;
    bg.rect.w = w;
    bg.rect.h = h;
    scale_info(bg, factor);

    for item in group.items_mut() {
        let (ix, iy) = item.rect.center();
        let ncx = cx + (ix - cx) * factor;
        let ncy = cy + (iy - cy) * factor;
        let w = (item.rect.w * factor).max(MIN_ITEM_SIZE);
        let h = (item.rect.h * factor).max(MIN_ITEM_SIZE);
        item.rect.x = ncx - w / 2.0;
        item.rect.y = ncy - h / 2.0;
        item.rect.w = w;
        item.rect.h = h;
        scale_info(item, factor);
    }

    group.applied_scale *= factor;
}

pub fn translate_group(group: &mut Group, dx: f32, dy: f32) {
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    group.background.rect.translate(dx, dy);
    for item in group.items_mut() {
        item.rect.translate(dx, dy);
    }
}

/// Move the group inside the slide, then clamp every element's size and
/// position individually.
pub fn clamp_to_slide_bounds(group: &mut Group, slide_width: f32, slide_height: f32) {
    let bg = group.background.rect;
    let dx = if bg.x < 0.0 {
        -bg.x
    } else if bg.right() > slide_width {
        (slide_width - bg.right()).max(-bg.x)
    } else {
        0.0
    };
    let dy = if bg.y < 0.0 {
        -bg.y
    } else if bg.bottom() > slide_height {
        (slide_height - bg.bottom()).max(-bg.y)
    } else {
        0.0
    };
    translate_group(group, dx, dy);

    let clamp = |info: &mut ElementInfo| {
        let r = &mut info.rect;
        r.w = r.w.min(slide_width);
        r.h = r.h.min(slide_height);
        r.x = r.x.clamp(0.0, (slide_width - r.w).max(0.0));
        r.y = r.y.clamp(0.0, (slide_height - r.h).max(0.0));
    };
    clamp(&mut group.background);
    for item in group.items_mut() {
        clamp(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ElementStyles;
    use crate::geometry::{Margins, Rect};

    fn info(rect: Rect) -> ElementInfo {
        ElementInfo {
            node: 0,
            uid: "el-0".into(),
            text: String::new(),
            rect,
            margins: Margins::default(),
            content_width: rect.w,
            styles: ElementStyles {
                font_size: 12.0,
                ..Default::default()
            },
        }
    }

    fn group(w: f32, h: f32) -> Group {
        Group::new(info(Rect::new(1.0, 2.0, w, h)))
    }

    fn assert_inside_slide(g: &Group, p: &SlideLayoutParams) {
        let r = g.background.rect;
        assert!(r.x >= 0.0 && r.y >= 0.0, "{r:?}");
        assert!(r.right() <= p.slide_width + 1e-4, "{r:?}");
        assert!(r.bottom() <= p.slide_height + 1e-4, "{r:?}");
    }

    #[test]
    fn two_per_slide() {
        let p = SlideLayoutParams::default();
        let mut groups = vec![group(10.0, 5.0), group(10.0, 5.0), group(10.0, 5.0)];
        layout_groups(&mut groups, &p);
        let slides: Vec<usize> = groups.iter().map(|g| g.slide).collect();
        assert_eq!(slides, vec![1, 1, 2]);

        let slot = (7.5 - 0.15 - 0.15 - 0.15) / 2.0;
        let top = &groups[0].background.rect;
        let bottom = &groups[1].background.rect;
        assert!((top.y - 0.15).abs() < 1e-4);
        assert!((top.h - slot).abs() < 1e-3);
        assert!(top.bottom() <= bottom.y + 1e-4, "slots overlap");
        for g in &groups {
            assert_inside_slide(g, &p);
        }
    }

    #[test]
    fn full_slide_goes_alone_and_resets_top_margin() {
        let p = SlideLayoutParams {
            first_top_margin: 0.5,
            ..Default::default()
        };
        let mut groups = vec![group(4.0, 2.0), group(4.0, 2.0), group(4.0, 2.0), group(4.0, 2.0)];
        groups[1].full_slide = true;
        layout_groups(&mut groups, &p);
        let slides: Vec<usize> = groups.iter().map(|g| g.slide).collect();
        assert_eq!(slides, vec![1, 2, 3, 3]);
        assert!((groups[0].background.rect.y - 0.5).abs() < 1e-4);
        assert!((groups[1].background.rect.y - 0.15).abs() < 1e-4);
        assert!((groups[2].background.rect.y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn small_panels_grow_up_to_scale_factor() {
        let p = SlideLayoutParams::default();
        let mut groups = vec![group(2.0, 1.0)];
        layout_groups(&mut groups, &p);
        assert!((groups[0].applied_scale - 1.35).abs() < 1e-5);
        assert!((groups[0].background.rect.w - 2.7).abs() < 1e-4);
        assert!((groups[0].background.rect.h - 1.35).abs() < 1e-4);
        let expected_x = (p.slide_width - 2.7) / 2.0;
        assert!((groups[0].background.rect.x - expected_x).abs() < 1e-4);
    }

    #[test]
    fn growth_stops_at_the_slot() {
        let p = SlideLayoutParams {
            scale_factor: 3.0,
            ..Default::default()
        };
        let mut groups = vec![group(2.0, 1.0), group(2.0, 1.0)];
        layout_groups(&mut groups, &p);
        let slot = (7.5 - 0.15 - 0.15 - 0.15) / 2.0;
        for g in &groups {
            assert!((g.applied_scale - 3.0).abs() < 1e-5);
            assert!(g.background.rect.h <= slot + 1e-4);
        }

        let p = SlideLayoutParams {
            scale_factor: 10.0,
            ..Default::default()
        };
        let mut groups = vec![group(2.0, 1.0), group(2.0, 1.0)];
        layout_groups(&mut groups, &p);
        for g in &groups {
            assert!((g.background.rect.h - slot).abs() < 1e-3);
            assert_inside_slide(g, &p);
        }
    }

    #[test]
    fn uniform_scale_recentres_children() {
        let mut g = group(4.0, 2.0);
        g.background.rect = Rect::new(0.0, 0.0, 4.0, 2.0);
        let mut child = info(Rect::new(0.0, 0.0, 2.0, 1.0));
        child.margins.top = 0.2;
        child.styles.padding_left = 8.0;
        g.texts.push(child);

        apply_uniform_scale(&mut g, 0.5);
        assert_eq!(g.background.rect, Rect::new(1.0, 0.5, 2.0, 1.0));
        let c = &g.texts[0];
        assert_eq!(c.rect, Rect::new(1.0, 0.5, 1.0, 0.5));
        assert!((c.margins.top - 0.1).abs() < 1e-6);
        assert_eq!(c.styles.padding_left, 4.0);
        assert_eq!(c.styles.font_size, 6.0);
        assert_eq!(g.applied_scale, 0.5);

        apply_uniform_scale(&mut g, f32::NAN);
        assert_eq!(g.applied_scale, 0.5);
    }

    #[test]
    fn clamp_keeps_items_on_slide() {
        let mut g = group(3.0, 2.0);
        g.background.rect = Rect::new(-1.0, 6.0, 3.0, 2.0);
        g.shapes.push(info(Rect::new(12.0, 7.0, 20.0, 1.0)));
        clamp_to_slide_bounds(&mut g, 13.333, 7.5);
        assert_eq!(g.background.rect.x, 0.0);
        assert!((g.background.rect.bottom() - 7.5).abs() < 1e-4);
        let s = g.shapes[0].rect;
        assert_eq!(s.w, 13.333);
        assert_eq!(s.x, 0.0);
        assert!(s.bottom() <= 7.5 + 1e-4);
    }

    #[test]
    fn zero_sized_panel_does_not_poison_layout() {
        let p = SlideLayoutParams::default();
        let mut groups = vec![group(0.0, 0.0)];
        layout_groups(&mut groups, &p);
        assert_eq!(groups[0].slide, 1);
        assert!(groups[0].applied_scale.is_finite());
    }
}
