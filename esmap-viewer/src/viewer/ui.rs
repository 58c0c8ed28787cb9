//! UI rendering.
//!
//! Layout:
//! - Title bar (1 line, fixed)
//! - Middle section: palette (fixed width) | editor | visualizer (fixed)
//! - Status line (1 line, fixed)
//!
//! The visualizer assembles all sections into one scrollable line list; the
//! field section records block rectangles into the registry while doing so,
//! and the alias connectors draw as an overlay translated by the scroll
//! offset.

use super::app::{App, Focus, Prompt};
use super::connector::{draw_segments, RectRegistry};
use super::editor::render_editor;
use super::fields::build_field_lines;
use super::palette::render_palette;
use super::shard_panel::build_shard_lines;
use super::analysis_panel::{build_component_lines, build_tester_lines};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Minimum terminal width required for the UI
const MIN_TERMINAL_WIDTH: u16 = 80;
/// Width allocated to the palette sidebar
const PALETTE_WIDTH: u16 = 20;
/// Width allocated to the visualizer pane
const VISUALIZER_WIDTH: u16 = 48;

pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH {
        let msg = format!("Terminal too narrow: {} < {} chars", size.width, MIN_TERMINAL_WIDTH);
        let paragraph = Paragraph::new(msg)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        frame.render_widget(paragraph, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    render_title_bar(frame, chunks[0], app);
    render_middle_section(frame, chunks[1], app);
    render_status_line(frame, chunks[2], app);
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut title = format!("esmap:: {}", app.store.t("app.title"));
    if let Some(index_name) = app.model.index_name() {
        title.push_str(&format!(" ({})", index_name));
    }
    if !app.model.parse_ok() {
        title.push_str("  [unparsed edits]");
    }
    let paragraph = Paragraph::new(title).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

fn render_middle_section(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PALETTE_WIDTH),
            Constraint::Min(20),
            Constraint::Length(VISUALIZER_WIDTH),
        ])
        .split(area);

    render_palette_pane(frame, chunks[0], app);
    render_editor_pane(frame, chunks[1], app);
    render_visualizer_pane(frame, chunks[2], app);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let title = if focused {
        format!("{} [FOCUSED]", title)
    } else {
        title
    };
    Block::default().borders(Borders::ALL).title(title)
}

fn render_palette_pane(frame: &mut Frame, area: Rect, app: &App) {
    let block = pane_block(app.store.t("mapping.title"), app.focus == Focus::Palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_palette(frame, inner, &app.palette, &app.store, app.focus == Focus::Palette);
}

fn render_editor_pane(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = pane_block(app.store.t("editor.title"), app.focus == Focus::Editor);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_editor(
        frame,
        inner,
        &app.model,
        &mut app.editor,
        app.focus == Focus::Editor,
    );
}

fn section_header(visible: bool, title: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            if visible { "▼ " } else { "▶ " },
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn render_visualizer_pane(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = pane_block(app.store.t("visualizer.title"), app.focus == Focus::Visualizer);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.model.flattened_fields();
    if !rows.is_empty() && app.viz_selected >= rows.len() {
        app.viz_selected = rows.len() - 1;
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut registry = RectRegistry::new();

    // Shard configuration
    lines.push(section_header(app.panels.shards, format!("[1] {}", app.store.t("visualizer.shardConfig"))));
    if app.panels.shards {
        lines.extend(build_shard_lines(&app.model.shard_layout(), &app.store));
    }
    lines.push(Line::default());

    // Field structure
    lines.push(section_header(app.panels.fields, format!("[2] {}", app.store.t("visualizer.fieldStructure"))));
    if app.panels.fields {
        if app.model.has_mappings() {
            let selected = if app.focus == Focus::Visualizer {
                Some(app.viz_selected)
            } else {
                None
            };
            let (field_lines, field_registry) =
                build_field_lines(&rows, &app.store, selected, lines.len() as u16, inner.width);
            registry = field_registry;
            lines.extend(field_lines);
        } else {
            lines.push(Line::from(Span::styled(
                app.store.t("visualizer.noMapping"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines.push(Line::default());

    // Analysis components, shown only when declared
    if let Some(analysis) = app.model.config().analysis() {
        let sections = [
            ("Analyzer", &analysis.analyzer, app.panels.analyzers, "3", Color::Cyan),
            ("Tokenizer", &analysis.tokenizer, app.panels.tokenizers, "4", Color::Cyan),
            ("Filter", &analysis.filter, app.panels.filters, "5", Color::Yellow),
        ];
        for (title, components, visible, hotkey, accent) in sections {
            let Some(components) = components.as_ref().filter(|c| !c.is_empty()) else {
                continue;
            };
            lines.push(section_header(visible, format!("[{}] {}", hotkey, title)));
            if visible {
                lines.extend(build_component_lines(components, accent));
            }
            lines.push(Line::default());
        }
    }

    // Analyzer tester
    lines.push(section_header(true, app.store.t("analyzerTester.title")));
    lines.extend(build_tester_lines(&app.tester, &app.store));

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(inner.height);
    if app.viz_scroll > max_scroll {
        app.viz_scroll = max_scroll;
    }

    let paragraph = Paragraph::new(lines).scroll((app.viz_scroll, 0));
    frame.render_widget(paragraph, inner);

    app.registry = registry;
    app.viz_content_width = inner.width;

    draw_segments(
        frame.buffer_mut(),
        inner,
        app.viz_scroll,
        &app.segments,
        Style::default().fg(Color::LightBlue),
    );
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let line: Line<'_> = match &app.prompt {
        Some(Prompt::FieldName { input, .. }) => Line::from(vec![
            Span::styled(
                format!("{}: ", app.store.t("mapping.fieldPrompt")),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(input.clone()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        Some(Prompt::TesterInput) => Line::from(vec![
            Span::styled(
                format!("{}: ", app.store.t("analyzerTester.inputText")),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(app.tester.input.clone()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        Some(Prompt::ExportPanel) => Line::from(Span::styled(
            "export: 1 shards · 2 fields · 3 analysis · esc cancel",
            Style::default().fg(Color::Yellow),
        )),
        None => match &app.status {
            Some(status) => Line::from(Span::styled(
                status.text.clone(),
                if status.is_error {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Green)
                },
            )),
            None => Line::from(Span::styled(
                "tab focus · enter drop/toggle · [ ] analyzer · i input · e export · L language · q quit",
                Style::default().fg(Color::DarkGray),
            )),
        },
    };

    let paragraph =
        Paragraph::new(line).style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(paragraph, area);
}
