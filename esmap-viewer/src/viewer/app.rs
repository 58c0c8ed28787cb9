//! Application state and event dispatch.
//!
//! The App owns the model plus all per-pane UI state. Input handling is
//! modal in one place: an active prompt captures the keyboard, otherwise
//! keys route to the focused pane. Connector recomputation goes through the
//! [`RedrawSchedule`], which the event loop drains on every tick.

use super::analysis_panel::TesterState;
use super::connector::{compute_connectors, RectRegistry, RedrawSchedule, Segment};
use super::editor::EditorState;
use super::lang::LanguageStore;
use super::model::Model;
use super::palette::PaletteState;
use super::snapshot::{export_panel, Panel};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use esmap_config::EsmapConfig;
use esmap_parser::index::authoring::{insert_field, MappingBlock};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Palette,
    #[default]
    Editor,
    Visualizer,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Palette => Focus::Editor,
            Focus::Editor => Focus::Visualizer,
            Focus::Visualizer => Focus::Palette,
        }
    }
}

/// Visibility of the visualization sections.
#[derive(Debug, Clone, Copy)]
pub struct PanelVisibility {
    pub shards: bool,
    pub fields: bool,
    pub analyzers: bool,
    pub tokenizers: bool,
    pub filters: bool,
}

impl PanelVisibility {
    pub fn from_config(config: &EsmapConfig) -> Self {
        PanelVisibility {
            shards: config.viewer.show_shards,
            fields: config.viewer.show_fields,
            analyzers: config.viewer.show_analyzers,
            tokenizers: config.viewer.show_tokenizers,
            filters: config.viewer.show_filters,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Modal input states.
#[derive(Debug)]
pub enum Prompt {
    /// Field-name prompt after a palette block was dropped. The block
    /// travels as its serialized drag payload.
    FieldName { input: String, payload: String },
    /// The analyzer tester's input line is being edited.
    TesterInput,
    /// Waiting for the export-panel choice (1/2/3).
    ExportPanel,
}

pub struct App {
    pub model: Model,
    pub store: LanguageStore,
    pub focus: Focus,
    pub panels: PanelVisibility,
    pub palette: PaletteState,
    pub editor: EditorState,
    pub tester: TesterState,
    pub viz_scroll: u16,
    pub viz_selected: usize,
    pub registry: RectRegistry,
    pub segments: Vec<Segment>,
    pub schedule: RedrawSchedule,
    pub status: Option<StatusMessage>,
    pub prompt: Option<Prompt>,
    /// Content width of the visualizer pane as of the last render; the
    /// connector gutter is clamped to it.
    pub viz_content_width: u16,
    export_dir: PathBuf,
    state_path: Option<PathBuf>,
    translations_changed: Rc<Cell<bool>>,
}

impl App {
    pub fn new(
        model: Model,
        config: &EsmapConfig,
        state_path: Option<PathBuf>,
        export_dir: PathBuf,
    ) -> Self {
        let mut store = LanguageStore::new();
        let translations_changed = Rc::new(Cell::new(false));
        let flag = translations_changed.clone();
        store.subscribe(Box::new(move || flag.set(true)));
        store.init(&config.ui.language);

        let mut schedule = RedrawSchedule::new();
        // Initial render: connectors draw after the layout settles.
        schedule.arm_settle(Instant::now());

        App {
            model,
            store,
            focus: Focus::Editor,
            panels: PanelVisibility::from_config(config),
            palette: PaletteState::new(),
            editor: EditorState::new(),
            tester: TesterState::new(),
            viz_scroll: 0,
            viz_selected: 0,
            registry: RectRegistry::new(),
            segments: Vec::new(),
            schedule,
            status: None,
            prompt: None,
            viz_content_width: 0,
            export_dir,
            state_path,
            translations_changed,
        }
    }

    /// Handle a key event. Returns true when the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return false;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return false;
            }
            KeyCode::Char('q') if self.focus != Focus::Editor => return true,
            KeyCode::Char('L') if self.focus != Focus::Editor => {
                self.toggle_language();
                return false;
            }
            _ => {}
        }

        match self.focus {
            Focus::Palette => self.handle_palette_key(key),
            Focus::Editor => {
                if self.editor.handle_key(key, &mut self.model) {
                    self.status = None;
                    self.schedule.arm_settle(Instant::now());
                }
            }
            Focus::Visualizer => self.handle_visualizer_key(key),
        }
        false
    }

    fn handle_palette_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.palette.prev(),
            KeyCode::Down => self.palette.next(),
            KeyCode::Enter => {
                self.prompt = Some(Prompt::FieldName {
                    input: String::new(),
                    payload: self.palette.selected_block().to_payload(),
                });
            }
            _ => {}
        }
    }

    fn handle_visualizer_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Up => {
                self.viz_selected = self.viz_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let rows = self.model.flattened_fields().len();
                if rows > 0 && self.viz_selected + 1 < rows {
                    self.viz_selected += 1;
                }
            }
            KeyCode::PageUp => {
                self.viz_scroll = self.viz_scroll.saturating_sub(5);
                self.schedule.arm_immediate(now);
            }
            KeyCode::PageDown => {
                self.viz_scroll = self.viz_scroll.saturating_add(5);
                self.schedule.arm_immediate(now);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let rows = self.model.flattened_fields();
                if let Some(row) = rows.get(self.viz_selected) {
                    if row.is_compound {
                        let path = row.path.clone();
                        self.model.toggle_expansion(&path);
                        self.schedule.arm_toggle(now);
                    }
                }
            }
            KeyCode::Char('1') => {
                self.panels.shards = !self.panels.shards;
                self.schedule.arm_settle(now);
            }
            KeyCode::Char('2') => {
                self.panels.fields = !self.panels.fields;
                self.schedule.arm_settle(now);
            }
            KeyCode::Char('3') => {
                self.panels.analyzers = !self.panels.analyzers;
                self.schedule.arm_settle(now);
            }
            KeyCode::Char('4') => {
                self.panels.tokenizers = !self.panels.tokenizers;
                self.schedule.arm_settle(now);
            }
            KeyCode::Char('5') => {
                self.panels.filters = !self.panels.filters;
                self.schedule.arm_settle(now);
            }
            KeyCode::Char('[') => self.tester.prev_kind(),
            KeyCode::Char(']') => self.tester.next_kind(),
            KeyCode::Char('i') => self.prompt = Some(Prompt::TesterInput),
            KeyCode::Char('e') => self.prompt = Some(Prompt::ExportPanel),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        match prompt {
            Prompt::FieldName { mut input, payload } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => self.commit_field_prompt(input, payload),
                KeyCode::Backspace => {
                    input.pop();
                    self.prompt = Some(Prompt::FieldName { input, payload });
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    self.prompt = Some(Prompt::FieldName { input, payload });
                }
                _ => self.prompt = Some(Prompt::FieldName { input, payload }),
            },
            Prompt::TesterInput => match key.code {
                KeyCode::Esc | KeyCode::Enter => {}
                KeyCode::Backspace => {
                    self.tester.input.pop();
                    self.prompt = Some(Prompt::TesterInput);
                }
                KeyCode::Char(c) => {
                    self.tester.input.push(c);
                    self.prompt = Some(Prompt::TesterInput);
                }
                _ => self.prompt = Some(Prompt::TesterInput),
            },
            Prompt::ExportPanel => match key.code {
                KeyCode::Esc => {}
                KeyCode::Char('1') => self.finish_export(Panel::Shards),
                KeyCode::Char('2') => self.finish_export(Panel::Fields),
                KeyCode::Char('3') => self.finish_export(Panel::Analysis),
                _ => self.prompt = Some(Prompt::ExportPanel),
            },
        }
    }

    /// Apply the field-name prompt: deserialize the dropped payload and
    /// insert it into the live buffer. An empty name cancels silently.
    fn commit_field_prompt(&mut self, input: String, payload: String) {
        let field_name = input.trim().to_string();
        if field_name.is_empty() {
            return;
        }

        let block = match MappingBlock::from_payload(&payload) {
            Ok(block) => block,
            Err(error) => {
                tracing::warn!(%error, "drop payload did not deserialize");
                return;
            }
        };

        match insert_field(self.model.text(), &field_name, &block) {
            Ok(updated) => {
                self.model.replace_text(updated);
                self.status = None;
                self.schedule.arm_settle(Instant::now());
            }
            Err(error) => {
                tracing::warn!(%error, "failed to insert dropped field");
                self.status = Some(StatusMessage {
                    text: error.to_string(),
                    is_error: true,
                });
            }
        }
    }

    fn finish_export(&mut self, panel: Panel) {
        self.prompt = None;
        let path = self.export_dir.join(format!("{}.txt", panel.file_stem()));
        match export_panel(panel, &self.model, &self.store, &path) {
            Ok(()) => {
                self.status = Some(StatusMessage {
                    text: format!("{} {}", self.store.t("visualizer.capture.saved"), path.display()),
                    is_error: false,
                });
            }
            Err(error) => {
                tracing::error!(%error, path = %path.display(), "snapshot export failed");
                self.status = Some(StatusMessage {
                    text: self.store.t("visualizer.capture.error"),
                    is_error: true,
                });
            }
        }
    }

    pub fn toggle_language(&mut self) {
        let next = if self.store.locale() == "en" { "ko" } else { "en" };
        self.store.set_locale(next);
        if let Some(path) = &self.state_path {
            if let Err(error) = esmap_config::persist_language(path, next) {
                tracing::warn!(%error, "failed to persist language selection");
            }
        }
    }

    /// Drain due redraw deadlines and recompute connectors when one fired.
    pub fn on_tick(&mut self, now: Instant) {
        if self.schedule.fire_due(now) {
            self.recompute_connectors();
        }
        if self.translations_changed.get() {
            // Panels read the store directly on the next draw.
            self.translations_changed.set(false);
        }
    }

    pub fn on_resize(&mut self, now: Instant) {
        self.schedule.arm_immediate(now);
    }

    /// Rebuild the connector segments from the last rendered registry.
    /// With the field panel hidden there is nothing to connect to, so any
    /// previous segments are dropped.
    pub fn recompute_connectors(&mut self) {
        if !self.panels.fields {
            self.segments.clear();
            return;
        }
        self.segments = compute_connectors(
            self.model.edges(),
            &self.registry,
            self.viz_content_width.saturating_sub(1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::sample::SAMPLE_DOCUMENT;
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let config = esmap_config::load_defaults().unwrap();
        App::new(
            Model::new(SAMPLE_DOCUMENT.to_string()),
            &config,
            None,
            std::env::temp_dir(),
        )
    }

    #[test]
    fn tab_cycles_focus() {
        let mut app = app();
        assert_eq!(app.focus, Focus::Editor);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Visualizer);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Palette);
    }

    #[test]
    fn q_quits_everywhere_except_the_editor() {
        let mut app = app();
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        app.focus = Focus::Visualizer;
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn dropping_a_block_inserts_a_field() {
        let mut app = app();
        app.focus = Focus::Palette;
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.prompt, Some(Prompt::FieldName { .. })));

        for c in "summary".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert!(app.prompt.is_none());
        assert!(app.model.text().contains("\"summary\""));
        assert!(app.schedule.is_armed());
    }

    #[test]
    fn empty_field_name_cancels_silently() {
        let mut app = app();
        app.focus = Focus::Palette;
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));

        assert!(app.prompt.is_none());
        assert!(app.status.is_none());
        assert!(!app.model.text().contains("\"\""));
    }

    #[test]
    fn drop_on_api_command_buffer_reports_an_error() {
        let config = esmap_config::load_defaults().unwrap();
        let mut app = App::new(
            Model::new(format!("PUT idx {}", SAMPLE_DOCUMENT)),
            &config,
            None,
            std::env::temp_dir(),
        );
        app.focus = Focus::Palette;
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Enter));

        let status = app.status.expect("status alert");
        assert!(status.is_error);
    }

    #[test]
    fn toggling_a_container_arms_the_toggle_delay() {
        let mut app = app();
        app.focus = Focus::Visualizer;
        app.schedule.cancel();

        // Select the "user" container (row index 5 in the sample).
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Down));
        }
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.model.is_expanded("user"));
        assert!(app.schedule.is_armed());
    }

    #[test]
    fn tick_recomputes_connectors_from_the_registry() {
        let mut app = app();
        app.viz_content_width = 60;
        app.registry.insert("code", Rect::new(0, 5, 20, 1));
        app.registry.insert("id", Rect::new(0, 1, 10, 1));

        let now = Instant::now();
        app.schedule.arm_immediate(now);
        app.on_tick(now + Duration::from_millis(1));
        assert_eq!(app.segments.len(), 3);
    }

    #[test]
    fn language_toggle_switches_the_store() {
        let mut app = app();
        assert_eq!(app.store.locale(), "ko");
        app.toggle_language();
        assert_eq!(app.store.locale(), "en");
        assert_eq!(app.store.t("visualizer.notfound"), "not found");
    }
}
