//! Mapping-block palette sidebar.
//!
//! Selecting a block and dropping it into the editor starts the field-name
//! prompt; the block travels as its serialized payload, the same JSON the
//! platform drag-data channel would carry.

use super::lang::LanguageStore;
use esmap_parser::index::authoring::{builtin_palette, MappingBlock};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug)]
pub struct PaletteState {
    blocks: Vec<MappingBlock>,
    pub selected: usize,
}

impl PaletteState {
    pub fn new() -> Self {
        PaletteState {
            blocks: builtin_palette(),
            selected: 0,
        }
    }

    pub fn blocks(&self) -> &[MappingBlock] {
        &self.blocks
    }

    pub fn selected_block(&self) -> &MappingBlock {
        &self.blocks[self.selected]
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.blocks.len();
    }

    pub fn prev(&mut self) {
        self.selected = (self.selected + self.blocks.len() - 1) % self.blocks.len();
    }
}

impl Default for PaletteState {
    fn default() -> Self {
        Self::new()
    }
}

fn block_color(kind: &str) -> Color {
    match kind {
        "object" => Color::Blue,
        "nested" => Color::Magenta,
        "join" => Color::LightRed,
        _ => Color::Cyan,
    }
}

pub fn render_palette(
    frame: &mut Frame,
    area: Rect,
    state: &PaletteState,
    store: &LanguageStore,
    focused: bool,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            store.t("mapping.subtitle"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ];

    for (index, block) in state.blocks().iter().enumerate() {
        let style = if focused && index == state.selected {
            Style::default()
                .fg(block_color(&block.kind))
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(block_color(&block.kind))
        };
        lines.push(Line::from(Span::styled(
            format!(" ▣ {} ", block.kind),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_around() {
        let mut state = PaletteState::new();
        let count = state.blocks().len();

        state.prev();
        assert_eq!(state.selected, count - 1);
        state.next();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn palette_matches_the_sidebar_block_list() {
        let state = PaletteState::new();
        let kinds: Vec<_> = state.blocks().iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(
            kinds,
            [
                "text", "keyword", "long", "integer", "short", "byte", "double", "float",
                "date", "boolean", "object", "nested", "join"
            ]
        );
    }
}
