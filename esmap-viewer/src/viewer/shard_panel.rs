//! Shard-configuration panel: the formula row and the capped shard grid.

use super::lang::LanguageStore;
use esmap_analysis::shards::{ShardCell, ShardLayout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Cell colors cycle per shard number; replicas reuse their primary's color
/// dimmed.
const SHARD_COLORS: [Color; 5] = [
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Yellow,
    Color::Red,
];

fn cell_span(cell: &ShardCell) -> Span<'static> {
    let color = SHARD_COLORS[((cell.shard - 1) as usize) % SHARD_COLORS.len()];
    let style = if cell.replica.is_none() {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color).add_modifier(Modifier::DIM)
    };
    Span::styled(format!("[ {} ]", cell.label()), style)
}

fn overflow_span() -> Span<'static> {
    Span::styled("[ … ]", Style::default().fg(Color::DarkGray))
}

fn row_line(cells: &[ShardCell], overflow: bool) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(cell_span(cell));
    }
    if overflow {
        if !cells.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(overflow_span());
    }
    Line::from(spans)
}

pub fn build_shard_lines(layout: &ShardLayout, store: &LanguageStore) -> Vec<Line<'static>> {
    let unit = store.t("visualizer.shardFormula.unit");
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Primary ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}{}", layout.shard_count(), unit)),
            Span::raw("  ·  "),
            Span::styled("Replica ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}{}", layout.replica_count(), unit)),
            Span::raw("  ·  "),
            Span::styled(
                format!("{} ", store.t("visualizer.shardFormula.totalShards")),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{}{}", layout.total(), unit)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            store.t("visualizer.primaryShards"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        row_line(&layout.primary_row(), layout.overflows()),
    ];

    let replica_rows = layout.replica_rows();
    if !replica_rows.is_empty() {
        lines.push(Line::from(Span::styled(
            store.t("visualizer.replicaShards"),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for row in &replica_rows {
            lines.push(row_line(row, layout.overflows()));
        }
    }

    lines
}
