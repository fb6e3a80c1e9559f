//! Terminal rendering of the walkthrough: selector bar, step card, and controls.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::steps::{StepNavigator, Token, Tone, Visualization, VisualizationRenderer};
use crate::ui::keybindings::footer_hints;

pub const TITLE: &str = "Transformer Layer Explanation";

/// Background color for a token tone.
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Embedding => Color::Rgb(0xe3, 0xf2, 0xfd),
        Tone::Normalized => Color::Rgb(0xc8, 0xe6, 0xc9),
        Tone::Attention => Color::Rgb(0xff, 0xec, 0xb3),
        Tone::Combined => Color::Rgb(0xff, 0xcc, 0x80),
        Tone::Renormalized => Color::Rgb(0xce, 0x93, 0xd8),
        Tone::Hidden => Color::Rgb(0x9f, 0xa8, 0xda),
        Tone::FfnOutput => Color::Rgb(0x80, 0xcb, 0xc4),
        Tone::Final => Color::Rgb(0xa5, 0xd6, 0xa7),
        Tone::Output => Color::Rgb(0xff, 0xf9, 0xc4),
    }
}

/// Renders visualizations as styled ratatui lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TuiRenderer;

impl TuiRenderer {
    fn token_span(token: &Token) -> Span<'static> {
        Span::styled(
            format!(" {} ", token.label),
            Style::default().fg(Color::Black).bg(tone_color(token.tone)),
        )
    }

    fn token_row(tokens: &[Token]) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Self::token_span(token));
        }
        spans
    }

    fn arrow() -> Span<'static> {
        Span::styled("  →  ", Style::default().fg(Color::Gray))
    }

    fn connector(text: String) -> Line<'static> {
        Line::from(Span::styled(
            text,
            Style::default().fg(Color::Rgb(0x90, 0xca, 0xf9)),
        ))
        .alignment(Alignment::Center)
    }
}

impl VisualizationRenderer for TuiRenderer {
    type Output = Vec<Line<'static>>;

    fn render(&self, visualization: &Visualization) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        match visualization {
            Visualization::WordSequence { tokens, .. } => {
                lines.push(Line::from(Self::token_row(tokens)));
            }
            Visualization::TokenMapping { rows, .. } => {
                for row in rows {
                    let mut spans = Vec::new();
                    for (i, input) in row.inputs.iter().enumerate() {
                        if i > 0 {
                            spans.push(Span::raw(" + "));
                        }
                        spans.push(Self::token_span(input));
                    }
                    spans.push(Self::arrow());
                    spans.push(Self::token_span(&row.output));
                    lines.push(Line::from(spans));
                }
            }
            Visualization::WiringDiagram { title, layers, .. } => {
                if let Some(title) = title {
                    lines.push(
                        Line::from(Span::styled(
                            title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ))
                        .alignment(Alignment::Center),
                    );
                }
                for (i, layer) in layers.iter().enumerate() {
                    if i > 0 {
                        let links = layers[i - 1].nodes.len() * layer.nodes.len();
                        lines.push(Self::connector("╲ │ ╱".to_string()));
                        lines.push(Self::connector(format!("{} links", links)));
                        lines.push(Self::connector("╱ │ ╲".to_string()));
                    }
                    lines.push(
                        Line::from(Self::token_row(&layer.nodes)).alignment(Alignment::Center),
                    );
                }
            }
            Visualization::ProcessFlow {
                stages,
                elided_after,
            } => {
                for (i, stage) in stages.iter().enumerate() {
                    if i > 0 {
                        let link = if *elided_after == Some(i - 1) {
                            "⋮"
                        } else {
                            "↓"
                        };
                        lines.push(Line::from(link).alignment(Alignment::Center));
                    }
                    lines.push(
                        Line::from(Self::token_span(stage)).alignment(Alignment::Center),
                    );
                }
            }
        }

        if let Some(caption) = visualization.caption() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                caption.to_string(),
                Style::default().fg(Color::Gray),
            )));
        }

        lines
    }
}

/// Style of a Previous/Next control; disabled purely from the navigator's bounds.
pub fn control_style(enabled: bool, primary: bool) -> Style {
    if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if primary {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Black).bg(Color::Gray)
    }
}

/// Everything the step screen needs besides the navigator.
pub struct StepView<'a> {
    pub navigator: &'a StepNavigator,
    /// Step button currently highlighted in the selector bar
    pub selector: usize,
    pub show_step_bar: bool,
    pub show_key_hints: bool,
}

impl StepView<'_> {
    pub fn render(&self, frame: &mut Frame) {
        let bar_height = if self.show_step_bar { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),          // Title
                Constraint::Length(bar_height), // Step selector
                Constraint::Min(8),             // Card
                Constraint::Length(3),          // Controls
            ])
            .split(frame.area());

        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        if self.show_step_bar {
            self.render_step_bar(frame, chunks[1]);
        }
        self.render_card(frame, chunks[2]);
        self.render_controls(frame, chunks[3]);
    }

    fn render_step_bar(&self, frame: &mut Frame, area: Rect) {
        let current = self.navigator.current_index();
        let mut spans = Vec::new();

        for (i, step) in self.navigator.catalog().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let mut style = if i == current {
                Style::default().fg(Color::White).bg(Color::Blue)
            } else {
                Style::default().fg(Color::Black).bg(Color::Gray)
            };
            if i == self.selector {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
            }
            spans.push(Span::styled(format!(" {} {} ", i + 1, step.name), style));
        }

        let bar = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(bar, area);
    }

    fn render_card(&self, frame: &mut Frame, area: Rect) {
        let step = self.navigator.current();

        let block = Block::default()
            .title(format!(" {} ", step.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(inner);

        let description = Paragraph::new(step.description.as_str()).wrap(Wrap { trim: true });
        frame.render_widget(description, chunks[0]);

        let diagram = Paragraph::new(TuiRenderer.render(&step.visualization))
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: false });
        frame.render_widget(diagram, chunks[1]);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let (position, total) = self.navigator.position();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14),
                Constraint::Min(10),
                Constraint::Length(14),
            ])
            .split(area);

        let previous = Paragraph::new(Span::styled(
            " ◀ Previous ",
            control_style(!self.navigator.at_start(), false),
        ))
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(previous, chunks[0]);

        let mut middle = vec![Line::from(format!("Step {} of {}", position, total))];
        if self.show_key_hints {
            middle.push(Line::from(Span::styled(
                footer_hints(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        let status = Paragraph::new(middle)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(status, chunks[1]);

        let next = Paragraph::new(Span::styled(
            " Next ▶ ",
            control_style(!self.navigator.at_end(), true),
        ))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(next, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::{MappingRow, StepCatalog};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_mapping_row_spans() {
        let viz = Visualization::TokenMapping {
            rows: vec![MappingRow::new(
                vec![
                    Token::new("cat (normalized)", Tone::Normalized),
                    Token::new("cat (attention)", Tone::Attention),
                ],
                Token::new("cat (combined)", Tone::Combined),
            )],
            caption: "sum".to_string(),
        };
        let lines = TuiRenderer.render(&viz);
        assert_eq!(
            line_text(&lines[0]),
            " cat (normalized)  +  cat (attention)   →   cat (combined) "
        );
        assert_eq!(lines[0].spans[0].style.bg, Some(tone_color(Tone::Normalized)));
        assert_eq!(line_text(lines.last().unwrap()), "sum");
    }

    #[test]
    fn test_wiring_reports_link_count() {
        let catalog = StepCatalog::transformer_layer();
        let attention = catalog.step_at(2).unwrap();
        let lines = TuiRenderer.render(&attention.visualization);
        assert!(lines.iter().any(|l| line_text(l) == "3 links"));
    }

    #[test]
    fn test_control_style_disabled_is_dim() {
        assert_eq!(control_style(false, true).fg, Some(Color::DarkGray));
        assert_eq!(control_style(true, true).bg, Some(Color::Blue));
    }

    #[test]
    fn test_step_view_renders_current_step() {
        let mut navigator = StepNavigator::new(Arc::new(StepCatalog::transformer_layer()));
        navigator.go_to_index(5).unwrap();

        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                StepView {
                    navigator: &navigator,
                    selector: 5,
                    show_step_bar: true,
                    show_key_hints: true,
                }
                .render(f);
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains(TITLE));
        assert!(text.contains("Feedforward Network"));
        assert!(text.contains("Step 6 of 8"));
        assert!(text.contains("Previous"));
        assert!(text.contains("[?] help"));
        assert!(text.contains("[1-9] jump"));
    }

    #[test]
    fn test_step_view_without_bar_or_hints() {
        let navigator = StepNavigator::new(Arc::new(StepCatalog::transformer_layer()));

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                StepView {
                    navigator: &navigator,
                    selector: 0,
                    show_step_bar: false,
                    show_key_hints: false,
                }
                .render(f);
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(!text.contains("2 Layer Norm 1"));
        assert!(!text.contains("[?] help"));
        assert!(text.contains("Step 1 of 8"));
    }
}
