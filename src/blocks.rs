//! PDF block collection – splits the export root into subtrees small enough
//! to be rasterized and placed on a page each.

use crate::dom::{Document, NodeId};

/// Bounds on the recursive subdivision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLimits {
    /// Nodes at this depth below the root are used as-is.
    pub max_depth: usize,
    /// Collection stops once this many blocks were found.
    pub max_blocks: usize,
}

impl Default for BlockLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_blocks: 4096,
        }
    }
}

/// An element with a non-empty box that is not `<style>` / `<script>`.
pub fn is_renderable(doc: &Document, id: NodeId) -> bool {
    let Some(tag) = doc.tag(id) else {
        return false;
    };
    !tag.is_raw_text() && !doc.rect(id).is_empty()
}

fn renderable_children(doc: &Document, id: NodeId) -> Vec<NodeId> {
    doc.element_children(id)
        .into_iter()
        .filter(|&c| is_renderable(doc, c))
        .collect()
}

/// Height of the element once scaled down to `max_width`.
fn projected_height(doc: &Document, id: NodeId, max_width: f32) -> f32 {
    let r = doc.rect(id);
    let width_scale = if r.w > 0.0 {
        (max_width / r.w).min(1.0)
    } else {
        1.0
    };
    r.h * width_scale
}

struct Collector<'a> {
    doc: &'a Document,
    max_height: f32,
    max_width: f32,
    limits: BlockLimits,
    blocks: Vec<NodeId>,
}

impl Collector<'_> {
    fn visit(&mut self, id: NodeId, depth: usize) {
        if self.blocks.len() >= self.limits.max_blocks || !is_renderable(self.doc, id) {
            return;
        }
        if projected_height(self.doc, id, self.max_width) <= self.max_height {
            self.blocks.push(id);
            return;
        }
        let children = renderable_children(self.doc, id);
        if children.is_empty() || depth >= self.limits.max_depth {
            self.blocks.push(id);
            return;
        }
        for child in children {
            self.visit(child, depth + 1);
        }
    }
}

/// Collect blocks in document order.
///
/// A node is used directly when its width-projected height fits
/// `max_height` or it has no renderable children; otherwise its renderable
/// children are visited. Traversal starts at the root's renderable
/// children, or the root itself when it has none. Oversized leaves are kept.
pub fn collect_blocks(
    doc: &Document,
    root: NodeId,
    max_height: f32,
    max_width: f32,
    limits: BlockLimits,
) -> Vec<NodeId> {
    let mut collector = Collector {
        doc,
        max_height,
        max_width,
        limits,
        blocks: Vec::new(),
    };

    let initial = renderable_children(doc, root);
    if initial.is_empty() {
        collector.visit(root, 0);
    } else {
        for child in initial {
            collector.visit(child, 1);
        }
    }

    if collector.blocks.len() >= limits.max_blocks {
        log::warn!(
            "Block limit of {} reached; remaining content is skipped",
            limits.max_blocks
        );
    }
    log::debug!("Collected {} renderable blocks", collector.blocks.len());
    collector.blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tag;
    use crate::geometry::Rect;

    fn doc_with_root(h: f32) -> Document {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        doc.set_rect(root, Rect::new(0.0, 0.0, 400.0, h));
        doc
    }

    fn child(doc: &mut Document, parent: NodeId, y: f32, h: f32) -> NodeId {
        let id = doc.append_element(parent, Tag::Div);
        doc.set_rect(id, Rect::new(0.0, y, 400.0, h));
        id
    }

    #[test]
    fn oversized_leaf_is_kept() {
        let mut doc = doc_with_root(900.0);
        let root = doc.root();
        let tall = child(&mut doc, root, 0.0, 900.0);
        let blocks = collect_blocks(&doc, root, 700.0, 400.0, BlockLimits::default());
        assert_eq!(blocks, vec![tall]);
    }

    #[test]
    fn tall_nodes_are_split_in_order() {
        let mut doc = doc_with_root(1200.0);
        let root = doc.root();
        let section = child(&mut doc, root, 0.0, 1000.0);
        let a = child(&mut doc, section, 0.0, 500.0);
        let b = child(&mut doc, section, 500.0, 500.0);
        let footer = child(&mut doc, root, 1000.0, 200.0);
        let blocks = collect_blocks(&doc, root, 700.0, 400.0, BlockLimits::default());
        assert_eq!(blocks, vec![a, b, footer]);
    }

    #[test]
    fn width_projection_allows_wide_nodes() {
        let mut doc = doc_with_root(900.0);
        let root = doc.root();
        let wide = doc.append_element(root, Tag::Div);
        doc.set_rect(wide, Rect::new(0.0, 0.0, 800.0, 900.0));
        child(&mut doc, wide, 0.0, 10.0);
        // 900 × (400 / 800) = 450 fits.
        let blocks = collect_blocks(&doc, root, 700.0, 400.0, BlockLimits::default());
        assert_eq!(blocks, vec![wide]);
    }

    #[test]
    fn zero_size_and_style_nodes_are_skipped() {
        let mut doc = doc_with_root(300.0);
        let root = doc.root();
        let style = doc.append_element(root, Tag::Style);
        doc.set_rect(style, Rect::new(0.0, 0.0, 10.0, 10.0));
        child(&mut doc, root, 0.0, 0.0);
        let real = child(&mut doc, root, 0.0, 100.0);
        let blocks = collect_blocks(&doc, root, 700.0, 400.0, BlockLimits::default());
        assert_eq!(blocks, vec![real]);
    }

    #[test]
    fn childless_root_is_its_own_block() {
        let doc = doc_with_root(300.0);
        let blocks = collect_blocks(&doc, doc.root(), 700.0, 400.0, BlockLimits::default());
        assert_eq!(blocks, vec![doc.root()]);
    }

    #[test]
    fn depth_cap_stops_recursion() {
        let mut doc = doc_with_root(1000.0);
        let mut parent = doc.root();
        let mut chain = Vec::new();
        for _ in 0..5 {
            parent = child(&mut doc, parent, 0.0, 1000.0);
            chain.push(parent);
        }
        let limits = BlockLimits {
            max_depth: 3,
            ..Default::default()
        };
        let blocks = collect_blocks(&doc, doc.root(), 700.0, 400.0, limits);
        assert_eq!(blocks, vec![chain[2]]);
    }

    /// Nested sections with 0-3 children per level; leaf heights and
    /// fan-out come from a fixed-seed LCG.
    fn generated_tree(seed: u64) -> Document {
        let mut state = seed;
        let mut rng = move |n: u64| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 33) % n
        };

        fn grow(
            doc: &mut Document,
            parent: NodeId,
            y: f32,
            depth: usize,
            rng: &mut impl FnMut(u64) -> u64,
        ) -> f32 {
            let id = child(doc, parent, y, 0.0);
            let fanout = if depth >= 5 { 0 } else { rng(4) };
            let mut h = 0.0;
            for _ in 0..fanout {
                h += grow(doc, id, y + h, depth + 1, &mut *rng);
            }
            if fanout == 0 {
                h = 50.0 + rng(600) as f32;
            }
            doc.set_rect(id, Rect::new(0.0, y, 400.0, h));
            h
        }

        let mut doc = doc_with_root(0.0);
        let root = doc.root();
        let mut h = 0.0;
        for _ in 0..4 {
            h += grow(&mut doc, root, h, 1, &mut rng);
        }
        doc.set_rect(root, Rect::new(0.0, 0.0, 400.0, h));
        doc
    }

    #[test]
    fn blocks_partition_the_leaves_of_generated_trees() {
        for seed in 1..=25 {
            let doc = generated_tree(seed);
            let root = doc.root();
            let blocks = collect_blocks(&doc, root, 700.0, 400.0, BlockLimits::default());
            let order = doc.descendants(root);
            let position = |id: NodeId| order.iter().position(|&n| n == id);

            for pair in blocks.windows(2) {
                assert!(position(pair[0]) < position(pair[1]), "seed {seed}: out of order");
            }
            for (i, &a) in blocks.iter().enumerate() {
                for &b in &blocks[i + 1..] {
                    assert!(
                        !doc.contains(a, b) && !doc.contains(b, a),
                        "seed {seed}: blocks {a} and {b} overlap"
                    );
                }
            }

            let leaves = order
                .iter()
                .copied()
                .filter(|&id| renderable_children(&doc, id).is_empty());
            for leaf in leaves {
                let covering = blocks.iter().filter(|&&b| doc.contains(b, leaf)).count();
                assert_eq!(covering, 1, "seed {seed}: leaf {leaf} in {covering} blocks");
            }
            for &b in &blocks {
                let rect = doc.rect(b);
                let splittable = !renderable_children(&doc, b).is_empty();
                assert!(
                    rect.h <= 700.0 || !splittable,
                    "seed {seed}: block {b} could have been split"
                );
            }
        }
    }

    #[test]
    fn block_limit_truncates() {
        let mut doc = doc_with_root(1000.0);
        let root = doc.root();
        for i in 0..10 {
            child(&mut doc, root, i as f32 * 100.0, 100.0);
        }
        let limits = BlockLimits {
            max_blocks: 4,
            ..Default::default()
        };
        assert_eq!(collect_blocks(&doc, root, 700.0, 400.0, limits).len(), 4);
    }
}
