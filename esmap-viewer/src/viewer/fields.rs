//! Field-structure panel: one block line per visible field, with type and
//! analyzer chips, alias annotations, and expanded relation/multi-field
//! detail lines. While building, every block's content-space rectangle is
//! recorded in a [`RectRegistry`] for the alias connector.

use super::connector::RectRegistry;
use super::lang::LanguageStore;
use esmap_analysis::tree::FlatField;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

fn type_color(type_label: &str) -> Color {
    match type_label {
        "object" => Color::Blue,
        "nested" => Color::Magenta,
        "join" => Color::LightRed,
        "alias" => Color::LightBlue,
        _ => Color::Cyan,
    }
}

/// Build the panel lines and the block-rectangle registry.
///
/// `start_y` is the first line's content-space row within the scrollable
/// panel; rectangles are clamped to `max_width` so the connector knows the
/// real right edge of each rendered block.
pub fn build_field_lines(
    rows: &[FlatField],
    store: &LanguageStore,
    selected: Option<usize>,
    start_y: u16,
    max_width: u16,
) -> (Vec<Line<'static>>, RectRegistry) {
    let mut lines = Vec::new();
    let mut registry = RectRegistry::new();

    for (row_index, field) in rows.iter().enumerate() {
        let indent = "  ".repeat(field.depth);
        let is_selected = selected == Some(row_index);

        let mut spans: Vec<Span<'static>> = vec![Span::raw(indent.clone())];

        if field.is_compound {
            spans.push(Span::styled(
                if field.is_expanded { "▼ " } else { "▶ " },
                Style::default().fg(Color::DarkGray),
            ));
        }

        let name_style = if is_selected {
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(field.name.clone(), name_style));

        spans.push(Span::styled(
            format!(" [{}]", field.type_label),
            Style::default().fg(type_color(&field.type_label)),
        ));

        if let Some(analyzer) = &field.analyzer {
            spans.push(Span::styled(
                format!(" analyzer: {}", analyzer),
                Style::default().fg(Color::Blue),
            ));
        }

        if let Some(alias) = &field.alias {
            if alias.resolved {
                spans.push(Span::styled(
                    format!(" path: {}", alias.path),
                    Style::default().fg(Color::LightBlue),
                ));
            } else {
                spans.push(Span::styled(
                    format!(" path: {}", store.t("visualizer.notfound")),
                    Style::default().fg(Color::Red),
                ));
            }
        }

        let text_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let x = indent.chars().count() as u16;
        let width = (text_width as u16).saturating_sub(x);
        let y = start_y + lines.len() as u16;
        registry.insert(
            field.path.clone(),
            ratatui::layout::Rect::new(x, y, width.min(max_width.saturating_sub(x)), 1),
        );

        lines.push(Line::from(spans));

        if field.is_expanded {
            if !field.relations.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{}    relations:", indent),
                    Style::default().fg(Color::LightRed),
                )));
                for (parent, children) in &field.relations {
                    lines.push(Line::from(Span::styled(
                        format!("{}      {} → {}", indent, parent, children),
                        Style::default().fg(Color::LightRed),
                    )));
                }
            }

            if !field.multi_fields.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{}    fields:", indent),
                    Style::default().fg(Color::Yellow),
                )));
                for multi in &field.multi_fields {
                    let mut detail = format!(
                        "{}      .{} [{}]",
                        indent,
                        multi.name,
                        multi.kind.as_deref().unwrap_or("unknown")
                    );
                    if let Some(analyzer) = &multi.analyzer {
                        detail.push_str(&format!(" analyzer: {}", analyzer));
                    }
                    lines.push(Line::from(Span::styled(
                        detail,
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
        }
    }

    (lines, registry)
}
