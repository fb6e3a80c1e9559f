//! The fixed, ordered list of steps in the walkthrough.

use std::collections::HashSet;

use serde::Serialize;

use super::error::{CatalogError, NavigationError};
use super::visualization::{MappingRow, NodeLayer, Token, Tone, Visualization};

/// One named, described, visualized stage of the walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub name: String,
    pub description: String,
    pub visualization: Visualization,
}

impl Step {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        visualization: Visualization,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            visualization,
        }
    }
}

/// Immutable ordered collection of steps with unique names.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct StepCatalog {
    steps: Vec<Step>,
}

impl StepCatalog {
    /// Build a catalog, rejecting empty definitions and duplicate names.
    pub fn new(steps: Vec<Step>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.name.as_str()) {
                return Err(CatalogError::DuplicateName(step.name.clone()));
            }
        }

        Ok(Self { steps })
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step_at(&self, index: usize) -> Result<&Step, NavigationError> {
        self.steps
            .get(index)
            .ok_or(NavigationError::InvalidStepIndex {
                index,
                len: self.steps.len(),
            })
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name == name)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// The walkthrough of a single transformer layer.
    pub fn transformer_layer() -> Self {
        Self {
            steps: transformer_layer_steps(),
        }
    }
}

const WORDS: [&str; 3] = ["The", "cat", "sat"];

fn word_tokens(tone: Tone) -> Vec<Token> {
    WORDS.iter().map(|w| Token::new(*w, tone)).collect()
}

/// One row per word: `word (from) → word (to)`.
fn per_word_rows(inputs: &[(Option<&str>, Tone)], output: (&str, Tone)) -> Vec<MappingRow> {
    WORDS
        .iter()
        .map(|w| {
            let label = |suffix: Option<&str>| match suffix {
                Some(s) => format!("{} ({})", w, s),
                None => (*w).to_string(),
            };
            MappingRow::new(
                inputs
                    .iter()
                    .map(|(suffix, tone)| Token::new(label(*suffix), *tone))
                    .collect(),
                Token::new(label(Some(output.0)), output.1),
            )
        })
        .collect()
}

fn transformer_layer_steps() -> Vec<Step> {
    vec![
        Step::new(
            "Input",
            "The input sentence is converted into vectors. Each word is represented as a numerical vector.",
            Visualization::WordSequence {
                tokens: word_tokens(Tone::Embedding),
                caption: "Each word is converted to a vector, e.g., \"The\" → [0.1, -0.2, 0.3, ...]"
                    .to_string(),
            },
        ),
        Step::new(
            "Layer Norm 1",
            "Normalizes each input vector to have zero mean and unit variance, which helps stabilize the learning process.",
            Visualization::TokenMapping {
                rows: per_word_rows(&[(None, Tone::Embedding)], ("normalized", Tone::Normalized)),
                caption: "Normalization: x_norm = (x - mean(x)) / std(x)".to_string(),
            },
        ),
        Step::new(
            "Multi-Head Attention",
            "Allows the model to focus on different parts of the input sequence. Each word can attend to every other word, capturing various relationships.",
            Visualization::WiringDiagram {
                title: None,
                layers: vec![
                    NodeLayer::new(word_tokens(Tone::Embedding)),
                    NodeLayer::new(vec![Token::new("Attention", Tone::Normalized)]),
                ],
                caption: "Arrows represent attention between words".to_string(),
            },
        ),
        Step::new(
            "Residual Connection 1",
            "Adds the output of the attention mechanism to the original input. This helps preserve information from earlier layers.",
            Visualization::TokenMapping {
                rows: per_word_rows(
                    &[
                        (Some("normalized"), Tone::Normalized),
                        (Some("attention"), Tone::Attention),
                    ],
                    ("combined", Tone::Combined),
                ),
                caption: "Normalized + Attention Output = Combined Representation".to_string(),
            },
        ),
        Step::new(
            "Layer Norm 2",
            "Normalizes the data again after the first residual connection, maintaining consistent scales throughout the network.",
            Visualization::TokenMapping {
                rows: per_word_rows(
                    &[(Some("combined"), Tone::Combined)],
                    ("re-normalized", Tone::Renormalized),
                ),
                caption: "Second normalization: x_renorm = (x_combined - mean(x_combined)) / std(x_combined)"
                    .to_string(),
            },
        ),
        Step::new(
            "Feedforward Network",
            "Processes each word vector independently through a simple neural network, allowing for more complex transformations.",
            Visualization::WiringDiagram {
                title: Some("Feedforward Network".to_string()),
                layers: [
                    ("in", Tone::Renormalized),
                    ("hidden", Tone::Hidden),
                    ("out", Tone::FfnOutput),
                ]
                .iter()
                .map(|(label, tone)| {
                    NodeLayer::new(
                        (1..=3)
                            .map(|i| Token::new(format!("{}{}", label, i), *tone))
                            .collect(),
                    )
                })
                .collect(),
                caption: "Each word vector passes through this network independently".to_string(),
            },
        ),
        Step::new(
            "Residual Connection 2",
            "Adds the output of the feedforward network to its input, helping to maintain a strong gradient flow through the network.",
            Visualization::TokenMapping {
                rows: per_word_rows(
                    &[
                        (Some("re-normalized"), Tone::Renormalized),
                        (Some("FFN output"), Tone::FfnOutput),
                    ],
                    ("final", Tone::Final),
                ),
                caption: "Re-normalized + FFN Output = Final Layer Output".to_string(),
            },
        ),
        Step::new(
            "Repeat Process",
            "The entire process (from Layer Norm 1 to Residual Connection 2) is repeated multiple times, typically 6 to 24 times depending on the model size. Each repetition is called a \"layer\" or \"block\".",
            Visualization::ProcessFlow {
                stages: vec![
                    Token::new("Input", Tone::Embedding),
                    Token::new("Transformer Layer 1", Tone::Normalized),
                    Token::new("Transformer Layer 2", Tone::Normalized),
                    Token::new("Transformer Layer 3", Tone::Normalized),
                    Token::new("Transformer Layer N", Tone::Normalized),
                    Token::new("Output", Tone::Output),
                ],
                elided_after: Some(3),
            },
        ),
    ]
}
