//! Analysis panels: analyzer/tokenizer/filter component blocks plus the
//! interactive analyzer tester.

use super::lang::LanguageStore;
use esmap_analysis::tokenize::{tokenize, AnalyzerKind, Token};
use esmap_parser::index::model::{ComponentConfig, OrderedMap};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;

/// Chip colors for the token preview, cycling per token.
const TOKEN_COLORS: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Red,
    Color::Cyan,
    Color::LightBlue,
    Color::LightGreen,
];

fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Component blocks for one `settings.analysis` section.
pub fn build_component_lines(
    components: &OrderedMap<ComponentConfig>,
    accent: Color,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (name, component) in components.iter() {
        lines.push(Line::from(Span::styled(
            name.to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )));

        if let Some(kind) = &component.kind {
            lines.push(detail_line("type", kind.clone()));
        }
        if let Some(tokenizer) = &component.tokenizer {
            lines.push(detail_line("tokenizer", tokenizer.clone()));
        }
        if let Some(filter) = &component.filter {
            lines.push(detail_line("filter", filter.joined()));
        }
        for (key, value) in &component.params {
            lines.push(detail_line(key, param_text(value)));
        }
    }

    lines
}

fn detail_line(key: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {}: ", key), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value),
    ])
}

/// State of the analyzer tester: the selected kind and the user's custom
/// text (empty means "show the default example").
#[derive(Debug, Default)]
pub struct TesterState {
    kind_index: usize,
    pub input: String,
}

impl TesterState {
    pub fn new() -> Self {
        TesterState::default()
    }

    pub fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::builtin()[self.kind_index].clone()
    }

    pub fn next_kind(&mut self) {
        self.kind_index = (self.kind_index + 1) % AnalyzerKind::builtin().len();
    }

    pub fn prev_kind(&mut self) {
        let count = AnalyzerKind::builtin().len();
        self.kind_index = (self.kind_index + count - 1) % count;
    }

    /// The text and tokens the tester shows: the user's input when present,
    /// the kind's default example otherwise.
    pub fn preview(&self) -> (String, Vec<Token>) {
        let kind = self.kind();
        if self.input.is_empty() {
            (kind.example_text().to_string(), kind.example_tokens())
        } else {
            (self.input.clone(), tokenize(&kind, &self.input))
        }
    }
}

pub fn build_tester_lines(tester: &TesterState, store: &LanguageStore) -> Vec<Line<'static>> {
    let kind = tester.kind();
    let (text, tokens) = tester.preview();

    let description_key = kind.description_key();
    let description = store.t(&description_key);
    let description = if description == description_key {
        store.t("analyzerTester.noDescription")
    } else {
        description
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{}: ", store.t("analyzerTester.analyzerType")),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(kind.name().to_string(), Style::default().fg(Color::Cyan)),
            Span::styled("  ([ ] to change)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(description, Style::default().fg(Color::DarkGray))),
        Line::from(vec![
            Span::styled(
                format!("{}: ", store.t("analyzerTester.inputText")),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            if tester.input.is_empty() {
                Span::styled(text.clone(), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(text.clone())
            },
            Span::styled("  (i to edit)", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let mut chips: Vec<Span<'static>> = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            chips.push(Span::raw(" "));
        }
        chips.push(Span::styled(
            format!("[{}]", token.token),
            Style::default().fg(TOKEN_COLORS[index % TOKEN_COLORS.len()]),
        ));
    }
    lines.push(Line::from(chips));

    lines.push(Line::from(Span::styled(
        format!("{}:", store.t("analyzerTester.tokenizationResult")),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!(
            "  {:<24} {:>8} {:>6} {:>6}",
            store.t("analyzerTester.token"),
            store.t("analyzerTester.position"),
            store.t("analyzerTester.startOffset"),
            store.t("analyzerTester.endOffset"),
        ),
        Style::default().add_modifier(Modifier::UNDERLINED),
    )));
    for token in &tokens {
        lines.push(Line::from(format!(
            "  {:<24} {:>8} {:>6} {:>6}",
            token.token, token.position, token.start_offset, token.end_offset
        )));
    }

    lines.push(Line::from(Span::styled(
        store.t("analyzerTester.simulationWarning"),
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LanguageStore {
        let mut store = LanguageStore::new();
        store.init("en");
        store
    }

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn component_blocks_render_typed_keys_then_params() {
        let components: OrderedMap<ComponentConfig> = serde_json::from_str(
            r#"{"trigram": {"type": "ngram", "min_gram": 3, "max_gram": 3, "token_chars": ["letter"]}}"#,
        )
        .unwrap();

        let lines = build_component_lines(&components, Color::Cyan);
        let texts: Vec<_> = lines.iter().map(plain).collect();
        assert_eq!(
            texts,
            [
                "trigram",
                "  type: ngram",
                "  min_gram: 3",
                "  max_gram: 3",
                "  token_chars: [\"letter\"]",
            ]
        );
    }

    #[test]
    fn tester_defaults_to_the_example_table() {
        let tester = TesterState::new();
        let (text, tokens) = tester.preview();
        assert_eq!(text, AnalyzerKind::Standard.example_text());
        assert_eq!(tokens, AnalyzerKind::Standard.example_tokens());
    }

    #[test]
    fn tester_tokenizes_custom_input() {
        let mut tester = TesterState::new();
        tester.next_kind(); // simple
        tester.next_kind(); // whitespace
        assert_eq!(tester.kind(), AnalyzerKind::Whitespace);

        tester.input = "Hello World".to_string();
        let (_, tokens) = tester.preview();
        let texts: Vec<_> = tokens.iter().map(|t| t.token.as_str()).collect();
        assert_eq!(texts, ["Hello", "World"]);
    }

    #[test]
    fn kind_cycling_wraps_in_both_directions() {
        let mut tester = TesterState::new();
        tester.prev_kind();
        assert_eq!(tester.kind(), AnalyzerKind::UaxUrlEmail);
        tester.next_kind();
        assert_eq!(tester.kind(), AnalyzerKind::Standard);
    }

    #[test]
    fn tester_lines_include_the_warning_footer() {
        let lines = build_tester_lines(&TesterState::new(), &store());
        let last = plain(lines.last().unwrap());
        assert_eq!(last, "Approximate preview; not a real analyzer");
    }
}
