//! Step catalog and navigation for the transformer layer walkthrough

pub mod catalog;
pub mod error;
pub mod navigator;
pub mod visualization;

pub use catalog::{Step, StepCatalog};
pub use error::{CatalogError, NavigationError};
pub use navigator::StepNavigator;
pub use visualization::{
    MappingRow, NodeLayer, TextRenderer, Token, Tone, Visualization, VisualizationRenderer,
};
