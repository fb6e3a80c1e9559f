//! Data-described visual content attached to each step.
//!
//! The catalog and navigator never look inside a [`Visualization`]; only a
//! [`VisualizationRenderer`] adapter does. Colors are deliberately absent here:
//! tokens carry a semantic [`Tone`] and each adapter picks its own palette.

use serde::{Deserialize, Serialize};

/// Semantic role of a token, used by renderers to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Raw word embedding
    Embedding,
    /// Output of the first layer norm
    Normalized,
    /// Attention output or the attention block itself
    Attention,
    /// Sum produced by the first residual connection
    Combined,
    /// Output of the second layer norm
    Renormalized,
    /// Hidden units of the feed-forward network
    Hidden,
    /// Feed-forward network output
    FfnOutput,
    /// Final layer output
    Final,
    /// Model output at the end of the stack
    Output,
}

/// A labelled box in a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub label: String,
    pub tone: Tone,
}

impl Token {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

/// One row of a [`Visualization::TokenMapping`]: `inputs[0] + inputs[1] ... → output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    pub inputs: Vec<Token>,
    pub output: Token,
}

impl MappingRow {
    pub fn new(inputs: Vec<Token>, output: Token) -> Self {
        Self { inputs, output }
    }
}

/// A layer of nodes in a [`Visualization::WiringDiagram`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLayer {
    pub nodes: Vec<Token>,
}

impl NodeLayer {
    pub fn new(nodes: Vec<Token>) -> Self {
        Self { nodes }
    }
}

/// Visual payload of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visualization {
    /// A single row of word boxes.
    WordSequence { tokens: Vec<Token>, caption: String },
    /// Per-word transformation rows.
    TokenMapping {
        rows: Vec<MappingRow>,
        caption: String,
    },
    /// Layers of nodes where every node is wired to every node of the next layer.
    WiringDiagram {
        title: Option<String>,
        layers: Vec<NodeLayer>,
        caption: String,
    },
    /// A vertical pipeline of stages. When `elided_after` is set, an ellipsis is drawn
    /// after that stage index instead of a plain arrow.
    ProcessFlow {
        stages: Vec<Token>,
        elided_after: Option<usize>,
    },
}

impl Visualization {
    /// Short name of the variant, used in listings and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Visualization::WordSequence { .. } => "word-sequence",
            Visualization::TokenMapping { .. } => "token-mapping",
            Visualization::WiringDiagram { .. } => "wiring-diagram",
            Visualization::ProcessFlow { .. } => "process-flow",
        }
    }

    /// Caption shown under the diagram, if the variant has one.
    pub fn caption(&self) -> Option<&str> {
        match self {
            Visualization::WordSequence { caption, .. }
            | Visualization::TokenMapping { caption, .. }
            | Visualization::WiringDiagram { caption, .. } => Some(caption),
            Visualization::ProcessFlow { .. } => None,
        }
    }
}

/// Pluggable view adapter that turns a [`Visualization`] into on-screen output.
pub trait VisualizationRenderer {
    type Output;

    fn render(&self, visualization: &Visualization) -> Self::Output;
}

/// Renders visualizations as plain text lines for non-interactive output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn boxed(token: &Token) -> String {
        format!("[ {} ]", token.label)
    }

    fn word_row(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(Self::boxed)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl VisualizationRenderer for TextRenderer {
    type Output = Vec<String>;

    fn render(&self, visualization: &Visualization) -> Vec<String> {
        let mut lines = Vec::new();

        match visualization {
            Visualization::WordSequence { tokens, .. } => {
                lines.push(Self::word_row(tokens));
            }
            Visualization::TokenMapping { rows, .. } => {
                for row in rows {
                    let inputs = row
                        .inputs
                        .iter()
                        .map(Self::boxed)
                        .collect::<Vec<_>>()
                        .join(" + ");
                    lines.push(format!("{} → {}", inputs, Self::boxed(&row.output)));
                }
            }
            Visualization::WiringDiagram { title, layers, .. } => {
                if let Some(title) = title {
                    lines.push(title.clone());
                }
                for (i, layer) in layers.iter().enumerate() {
                    if i > 0 {
                        let fan = layers[i - 1].nodes.len() * layer.nodes.len();
                        lines.push(format!("  ╳ {} connections", fan));
                    }
                    lines.push(Self::word_row(&layer.nodes));
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
                        lines.push(format!("  {}", link));
                    }
                    lines.push(Self::boxed(stage));
                }
            }
        }

        if let Some(caption) = visualization.caption() {
            lines.push(String::new());
            lines.push(caption.to_string());
        }

        lines
    }
}
