//! Alias connector geometry.
//!
//! While the field panel renders, it records every block's rectangle in a
//! [`RectRegistry`] keyed by full field path; the registry is the read
//! interface this module resolves against. For each valid alias edge a
//! right-bracket connector is computed: one horizontal stub off the alias
//! block's right edge, one off the target's, and a vertical segment at the
//! gutter column joining the two rows. All coordinates live in the
//! scrollable panel's content space; the overlay translates by the current
//! scroll offset when drawing.
//!
//! Connectors are recomputed from scratch on every trigger (the previous
//! segment list is replaced), so a redraw is idempotent. Triggers are the
//! two fixed settle delays after a tree change, a shorter delay after an
//! expand/collapse toggle, and resize/scroll — see [`RedrawSchedule`].

use esmap_analysis::alias::AliasEdge;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum horizontal stub length off a block's right edge.
pub const STUB_LEN: u16 = 2;

/// First settle delay after the tree changes.
pub const SETTLE_DELAY_SHORT: Duration = Duration::from_millis(800);
/// Second settle delay, catching late layout shifts.
pub const SETTLE_DELAY_LONG: Duration = Duration::from_millis(1500);
/// Delay after an expand/collapse toggle.
pub const TOGGLE_DELAY: Duration = Duration::from_millis(300);

/// Field-block rectangles recorded by the rendering layer, keyed by full
/// field path. Coordinates are content-space, not screen-space.
#[derive(Debug, Clone, Default)]
pub struct RectRegistry {
    entries: HashMap<String, Rect>,
}

#[allow(dead_code)]
impl RectRegistry {
    pub fn new() -> Self {
        RectRegistry::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn insert(&mut self, path: impl Into<String>, rect: Rect) {
        self.entries.insert(path.into(), rect);
    }

    pub fn get(&self, path: &str) -> Option<Rect> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One connector segment in content space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Horizontal { x: u16, y: u16, len: u16 },
    Vertical { x: u16, y: u16, len: u16 },
}

/// Compute connector segments for all valid, rendered alias edges.
///
/// Edges whose alias or target block is missing from the registry are
/// skipped individually (logged); invalid edges get no connector — the
/// block itself carries the "not found" marking.
pub fn compute_connectors(
    edges: &[AliasEdge],
    registry: &RectRegistry,
    max_x: u16,
) -> Vec<Segment> {
    let mut segments = Vec::new();

    for edge in edges {
        let Some(alias_rect) = registry.get(&edge.alias) else {
            tracing::warn!(alias = %edge.alias, "alias block not rendered; skipping connector");
            continue;
        };
        if !edge.valid {
            continue;
        }
        let Some(target_rect) = registry.get(&edge.target) else {
            tracing::warn!(target = %edge.target, "target block not rendered; skipping connector");
            continue;
        };

        let alias_y = center_row(alias_rect);
        let target_y = center_row(target_rect);
        let gutter_x = (alias_rect.right().max(target_rect.right()) + STUB_LEN).min(max_x);

        if gutter_x <= alias_rect.right() || gutter_x <= target_rect.right() {
            // No room for the bracket at this width.
            continue;
        }

        segments.push(Segment::Horizontal {
            x: alias_rect.right(),
            y: alias_y,
            len: gutter_x - alias_rect.right(),
        });
        segments.push(Segment::Horizontal {
            x: target_rect.right(),
            y: target_y,
            len: gutter_x - target_rect.right(),
        });

        let top = alias_y.min(target_y);
        let bottom = alias_y.max(target_y);
        segments.push(Segment::Vertical {
            x: gutter_x,
            y: top,
            len: bottom - top + 1,
        });
    }

    segments
}

fn center_row(rect: Rect) -> u16 {
    rect.y + rect.height / 2
}

/// Draw segments into the panel's screen area, translated by the vertical
/// scroll offset and clipped to the area.
pub fn draw_segments(
    buffer: &mut Buffer,
    area: Rect,
    scroll: u16,
    segments: &[Segment],
    style: Style,
) {
    for segment in segments {
        match *segment {
            Segment::Horizontal { x, y, len } => {
                let Some(row) = content_row_to_screen(y, scroll, area) else {
                    continue;
                };
                for offset in 0..len {
                    let column = area.x + x + offset;
                    if column >= area.right() {
                        break;
                    }
                    buffer[(column, row)].set_symbol("─").set_style(style);
                }
            }
            Segment::Vertical { x, y, len } => {
                let column = area.x + x;
                if column >= area.right() {
                    continue;
                }
                for offset in 0..len {
                    let Some(row) = content_row_to_screen(y + offset, scroll, area) else {
                        continue;
                    };
                    buffer[(column, row)].set_symbol("│").set_style(style);
                }
            }
        }
    }
}

fn content_row_to_screen(y: u16, scroll: u16, area: Rect) -> Option<u16> {
    if y < scroll {
        return None;
    }
    let row = area.y + (y - scroll);
    if row >= area.bottom() {
        return None;
    }
    Some(row)
}

/// Pending connector-recompute deadlines.
///
/// Arming replaces any pending deadlines, which is what cancels the timers
/// on a re-trigger; [`RedrawSchedule::cancel`] covers teardown.
#[derive(Debug, Clone, Default)]
pub struct RedrawSchedule {
    deadlines: Vec<Instant>,
}

impl RedrawSchedule {
    pub fn new() -> Self {
        RedrawSchedule::default()
    }

    /// Schedule the dual settle-delay recompute after a tree change.
    pub fn arm_settle(&mut self, now: Instant) {
        self.deadlines = vec![now + SETTLE_DELAY_SHORT, now + SETTLE_DELAY_LONG];
    }

    /// Schedule the single short recompute after an expand/collapse toggle.
    pub fn arm_toggle(&mut self, now: Instant) {
        self.deadlines = vec![now + TOGGLE_DELAY];
    }

    /// Schedule an immediate recompute (resize, scroll).
    pub fn arm_immediate(&mut self, now: Instant) {
        self.deadlines = vec![now];
    }

    pub fn cancel(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_armed(&self) -> bool {
        !self.deadlines.is_empty()
    }

    /// Drop deadlines that have passed; returns whether any fired.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        let before = self.deadlines.len();
        self.deadlines.retain(|deadline| *deadline > now);
        self.deadlines.len() != before
    }
}
