//! On-demand plain-text snapshots of the visualization panels.
//!
//! The exported text is the panel's rendered content with styling dropped,
//! written to a file. Failures are reported to the caller, which surfaces a
//! single status-line alert; nothing here is fatal.

use super::analysis_panel::build_component_lines;
use super::fields::build_field_lines;
use super::lang::LanguageStore;
use super::model::Model;
use super::shard_panel::build_shard_lines;
use ratatui::style::Color;
use ratatui::text::Line;
use std::io;
use std::path::Path;

/// The three exportable panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Shards,
    Fields,
    Analysis,
}

impl Panel {
    pub fn from_name(name: &str) -> Option<Panel> {
        match name {
            "shards" => Some(Panel::Shards),
            "fields" => Some(Panel::Fields),
            "analysis" => Some(Panel::Analysis),
            _ => None,
        }
    }

    /// Default file stem for the snapshot.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Panel::Shards => "shard-configuration",
            Panel::Fields => "field-structure",
            Panel::Analysis => "analysis-settings",
        }
    }
}

fn lines_to_text(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one panel to plain text.
pub fn render_panel_text(panel: Panel, model: &Model, store: &LanguageStore) -> String {
    match panel {
        Panel::Shards => {
            let mut lines = vec![
                Line::from(store.t("visualizer.shardConfig")),
                Line::default(),
            ];
            lines.extend(build_shard_lines(&model.shard_layout(), store));
            lines_to_text(&lines)
        }
        Panel::Fields => {
            let mut lines = vec![
                Line::from(store.t("visualizer.fieldStructure")),
                Line::default(),
            ];
            if model.has_mappings() {
                let rows = model.flattened_fields();
                let (field_lines, _) = build_field_lines(&rows, store, None, 0, u16::MAX);
                lines.extend(field_lines);
            } else {
                lines.push(Line::from(store.t("visualizer.noMapping")));
            }
            lines_to_text(&lines)
        }
        Panel::Analysis => {
            let mut lines: Vec<Line<'_>> = Vec::new();
            let analysis = model.config().analysis();

            let sections: [(&str, Option<_>); 3] = [
                ("Analyzer", analysis.and_then(|a| a.analyzer.as_ref())),
                ("Tokenizer", analysis.and_then(|a| a.tokenizer.as_ref())),
                ("Filter", analysis.and_then(|a| a.filter.as_ref())),
            ];

            for (title, components) in sections {
                let Some(components) = components.filter(|c| !c.is_empty()) else {
                    continue;
                };
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                lines.push(Line::from(title.to_string()));
                lines.push(Line::default());
                lines.extend(build_component_lines(components, Color::Cyan));
            }

            if lines.is_empty() {
                lines.push(Line::from(store.t("visualizer.noMapping")));
            }
            lines_to_text(&lines)
        }
    }
}

/// Render a panel and write it to `path`.
pub fn export_panel(
    panel: Panel,
    model: &Model,
    store: &LanguageStore,
    path: &Path,
) -> io::Result<()> {
    let mut text = render_panel_text(panel, model, store);
    text.push('\n');
    std::fs::write(path, text)
}
