//! Bounded cursor over a [`StepCatalog`].

use std::sync::Arc;

use super::catalog::{Step, StepCatalog};
use super::error::NavigationError;

/// Tracks the current step and keeps it inside `[0, N-1]`.
///
/// Previous/Next clamp at the ends and never fail. Direct jumps are only ever
/// issued from a known set of selector controls, so an out-of-range jump is a
/// wiring bug and is reported as an error with the cursor left untouched.
#[derive(Debug, Clone)]
pub struct StepNavigator {
    catalog: Arc<StepCatalog>,
    current: usize,
}

impl StepNavigator {
    pub fn new(catalog: Arc<StepCatalog>) -> Self {
        Self {
            catalog,
            current: 0,
        }
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    pub fn current(&self) -> &Step {
        &self.catalog.steps()[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// 1-based position and total, for "Step k of N" displays.
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.catalog.step_count())
    }

    pub fn at_start(&self) -> bool {
        self.current == 0
    }

    pub fn at_end(&self) -> bool {
        self.current + 1 == self.catalog.step_count()
    }

    /// Move back one step; a no-op on the first step.
    pub fn go_to_previous(&mut self) -> usize {
        if !self.at_start() {
            self.current -= 1;
        }
        self.current
    }

    /// Move forward one step; a no-op on the last step.
    pub fn go_to_next(&mut self) -> usize {
        if !self.at_end() {
            self.current += 1;
        }
        self.current
    }

    pub fn go_to_index(&mut self, index: usize) -> Result<usize, NavigationError> {
        let len = self.catalog.step_count();
        if index >= len {
            tracing::error!(index, len, "Step jump out of range");
            return Err(NavigationError::InvalidStepIndex { index, len });
        }

        if index != self.current {
            tracing::debug!(
                from = self.current,
                to = index,
                step = %self.catalog.steps()[index].name,
                "Jumped to step"
            );
        }
        self.current = index;
        Ok(self.current)
    }

    /// Jump to the step with the given name.
    pub fn go_to_name(&mut self, name: &str) -> Result<usize, NavigationError> {
        match self.catalog.index_of_name(name) {
            Some(index) => self.go_to_index(index),
            None => {
                tracing::error!(name, "Step jump to unknown name");
                Err(NavigationError::UnknownStep(name.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::visualization::Visualization;

    fn catalog_of(n: usize) -> Arc<StepCatalog> {
        let steps = (0..n)
            .map(|i| {
                Step::new(
                    format!("step-{}", i),
                    "",
                    Visualization::ProcessFlow {
                        stages: Vec::new(),
                        elided_after: None,
                    },
                )
            })
            .collect();
        Arc::new(StepCatalog::new(steps).unwrap())
    }

    fn transformer() -> StepNavigator {
        StepNavigator::new(Arc::new(StepCatalog::transformer_layer()))
    }

    #[test]
    fn test_starts_at_zero() {
        let nav = transformer();
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.current().name, "Input");
        assert_eq!(nav.position(), (1, 8));
    }

    #[test]
    fn test_previous_clamps_at_start() {
        let mut nav = transformer();
        for _ in 0..5 {
            assert_eq!(nav.go_to_previous(), 0);
        }
        assert!(nav.at_start());
    }

    #[test]
    fn test_next_clamps_at_end() {
        let mut nav = transformer();
        for _ in 0..20 {
            nav.go_to_next();
        }
        assert_eq!(nav.current_index(), 7);
        assert_eq!(nav.go_to_next(), 7);
        assert!(nav.at_end());
    }

    #[test]
    fn test_three_nexts_reach_first_residual() {
        let mut nav = transformer();
        nav.go_to_next();
        nav.go_to_next();
        assert_eq!(nav.go_to_next(), 3);
        assert_eq!(nav.current().name, "Residual Connection 1");
    }

    #[test]
    fn test_jump_by_name() {
        let mut nav = transformer();
        assert_eq!(nav.go_to_name("Multi-Head Attention"), Ok(2));
        assert_eq!(nav.current().name, "Multi-Head Attention");
    }

    #[test]
    fn test_jump_out_of_range_leaves_cursor() {
        let mut nav = transformer();
        nav.go_to_index(4).unwrap();
        assert_eq!(
            nav.go_to_index(8),
            Err(NavigationError::InvalidStepIndex { index: 8, len: 8 })
        );
        assert_eq!(nav.current_index(), 4);
    }

    #[test]
    fn test_unknown_name_leaves_cursor() {
        let mut nav = transformer();
        nav.go_to_index(5).unwrap();
        assert_eq!(
            nav.go_to_name("Softmax"),
            Err(NavigationError::UnknownStep("Softmax".to_string()))
        );
        assert_eq!(nav.current_index(), 5);
    }

    #[test]
    fn test_single_step_catalog_is_both_ends() {
        let mut nav = StepNavigator::new(catalog_of(1));
        assert!(nav.at_start());
        assert!(nav.at_end());
        assert_eq!(nav.go_to_next(), 0);
        assert_eq!(nav.go_to_previous(), 0);
    }

    #[test]
    fn test_interior_is_neither_end() {
        let mut nav = StepNavigator::new(catalog_of(4));
        for i in 0..4 {
            nav.go_to_index(i).unwrap();
            assert_eq!(nav.at_start(), i == 0);
            assert_eq!(nav.at_end(), i == 3);
        }
    }

    #[test]
    fn test_catalog_is_shared() {
        let catalog = catalog_of(3);
        let mut a = StepNavigator::new(Arc::clone(&catalog));
        let b = StepNavigator::new(Arc::clone(&catalog));
        a.go_to_next();
        assert_eq!(a.current_index(), 1);
        assert_eq!(b.current_index(), 0);
        assert_eq!(Arc::strong_count(&catalog), 3);
    }
}
