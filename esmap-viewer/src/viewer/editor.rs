//! Editor pane: a minimal line-based text editor over the model's buffer.
//!
//! Every mutation goes through [`Model::replace_text`], so the document is
//! re-parsed on each keystroke and the visualizer tracks the buffer live.

use super::model::Model;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Default)]
pub struct EditorState {
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub scroll_top: usize,
}

impl EditorState {
    pub fn new() -> Self {
        EditorState::default()
    }

    /// Apply a key to the buffer. Returns true when the text changed.
    pub fn handle_key(&mut self, key: KeyEvent, model: &mut Model) -> bool {
        let mut lines: Vec<String> = model.text().split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        self.clamp_cursor(&lines);

        let mut changed = false;
        match key.code {
            KeyCode::Up => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor_row + 1 < lines.len() {
                    self.cursor_row += 1;
                }
            }
            KeyCode::Left => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = line_len(&lines, self.cursor_row);
                }
            }
            KeyCode::Right => {
                if self.cursor_col < line_len(&lines, self.cursor_row) {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            KeyCode::Home => self.cursor_col = 0,
            KeyCode::End => self.cursor_col = line_len(&lines, self.cursor_row),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                insert_char(&mut lines[self.cursor_row], self.cursor_col, c);
                self.cursor_col += 1;
                changed = true;
            }
            KeyCode::Enter => {
                let rest = split_at_char(&mut lines[self.cursor_row], self.cursor_col);
                lines.insert(self.cursor_row + 1, rest);
                self.cursor_row += 1;
                self.cursor_col = 0;
                changed = true;
            }
            KeyCode::Backspace => {
                if self.cursor_col > 0 {
                    remove_char(&mut lines[self.cursor_row], self.cursor_col - 1);
                    self.cursor_col -= 1;
                    changed = true;
                } else if self.cursor_row > 0 {
                    let current = lines.remove(self.cursor_row);
                    self.cursor_row -= 1;
                    self.cursor_col = line_len(&lines, self.cursor_row);
                    lines[self.cursor_row].push_str(&current);
                    changed = true;
                }
            }
            KeyCode::Delete => {
                if self.cursor_col < line_len(&lines, self.cursor_row) {
                    remove_char(&mut lines[self.cursor_row], self.cursor_col);
                    changed = true;
                } else if self.cursor_row + 1 < lines.len() {
                    let next = lines.remove(self.cursor_row + 1);
                    lines[self.cursor_row].push_str(&next);
                    changed = true;
                }
            }
            _ => {}
        }

        self.clamp_cursor(&lines);
        if changed {
            model.replace_text(lines.join("\n"));
        }
        changed
    }

    fn clamp_cursor(&mut self, lines: &[String]) {
        if self.cursor_row >= lines.len() {
            self.cursor_row = lines.len().saturating_sub(1);
        }
        let len = line_len(lines, self.cursor_row);
        if self.cursor_col > len {
            self.cursor_col = len;
        }
    }

    fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor_row < self.scroll_top {
            self.scroll_top = self.cursor_row;
        }
        if self.cursor_row >= self.scroll_top + height {
            self.scroll_top = self.cursor_row + 1 - height;
        }
    }
}

fn line_len(lines: &[String], row: usize) -> usize {
    lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
}

fn insert_char(line: &mut String, col: usize, c: char) {
    let byte = byte_index(line, col);
    line.insert(byte, c);
}

fn remove_char(line: &mut String, col: usize) {
    let byte = byte_index(line, col);
    line.remove(byte);
}

fn split_at_char(line: &mut String, col: usize) -> String {
    let byte = byte_index(line, col);
    line.split_off(byte)
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(byte, _)| byte)
        .unwrap_or(line.len())
}

/// Render the editor contents, marking the cursor cell when focused.
pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    model: &Model,
    state: &mut EditorState,
    focused: bool,
) {
    state.clamp_scroll(area.height as usize);

    let lines: Vec<&str> = model.text().split('\n').collect();
    let mut rendered = Vec::with_capacity(area.height as usize);

    for (row_index, raw) in lines
        .iter()
        .enumerate()
        .skip(state.scroll_top)
        .take(area.height as usize)
    {
        if focused && row_index == state.cursor_row {
            rendered.push(cursor_line(raw, state.cursor_col));
        } else {
            rendered.push(Line::from(raw.to_string()));
        }
    }

    frame.render_widget(Paragraph::new(rendered), area);
}

fn cursor_line(raw: &str, cursor_col: usize) -> Line<'static> {
    let chars: Vec<char> = raw.chars().collect();
    let before: String = chars.iter().take(cursor_col).collect();
    let at: String = chars
        .get(cursor_col)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = chars.iter().skip(cursor_col + 1).collect();

    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
        Span::styled(after, Style::default().fg(Color::Reset)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_inserts_at_the_cursor() {
        let mut model = Model::new("{}".to_string());
        let mut state = EditorState::new();
        state.cursor_col = 1;

        assert!(state.handle_key(key(KeyCode::Char('a')), &mut model));
        assert_eq!(model.text(), "{a}");
        assert_eq!(state.cursor_col, 2);
    }

    #[test]
    fn enter_splits_and_backspace_rejoins() {
        let mut model = Model::new("ab".to_string());
        let mut state = EditorState::new();
        state.cursor_col = 1;

        state.handle_key(key(KeyCode::Enter), &mut model);
        assert_eq!(model.text(), "a\nb");
        assert_eq!((state.cursor_row, state.cursor_col), (1, 0));

        state.handle_key(key(KeyCode::Backspace), &mut model);
        assert_eq!(model.text(), "ab");
        assert_eq!((state.cursor_row, state.cursor_col), (0, 1));
    }

    #[test]
    fn movement_clamps_to_line_ends() {
        let mut model = Model::new("long line\nx".to_string());
        let mut state = EditorState::new();
        state.cursor_col = 9;

        state.handle_key(key(KeyCode::Down), &mut model);
        assert_eq!((state.cursor_row, state.cursor_col), (1, 1));

        state.handle_key(key(KeyCode::Right), &mut model);
        assert_eq!((state.cursor_row, state.cursor_col), (1, 1));
    }

    #[test]
    fn delete_joins_the_next_line() {
        let mut model = Model::new("a\nb".to_string());
        let mut state = EditorState::new();
        state.cursor_col = 1;

        state.handle_key(key(KeyCode::Delete), &mut model);
        assert_eq!(model.text(), "ab");
    }

    #[test]
    fn editing_reparses_the_document() {
        let mut model = Model::new(r#"{"settings":{"number_of_shards":1}}"#.to_string());
        let mut state = EditorState::new();
        // Cursor just after the "1".
        state.cursor_col = 33;

        state.handle_key(key(KeyCode::Char('2')), &mut model);
        assert_eq!(model.shard_layout().shard_count(), 12);
    }
}
