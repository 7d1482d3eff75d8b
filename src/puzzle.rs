use crate::error::{EngineError, Result};

/// A twisty puzzle the timer can scramble for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSpec {
    name: String,
    short_name: String,
    layer_count: usize,
}

impl PuzzleSpec {
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        layer_count: usize,
    ) -> Result<Self> {
        if layer_count < 2 {
            return Err(EngineError::InvalidArgument(format!(
                "layer count must be at least 2, got {layer_count}"
            )));
        }

        Ok(Self {
            name: name.into(),
            short_name: short_name.into(),
            layer_count,
        })
    }

    /// NxNxN cube with the usual naming
    pub fn cube(layer_count: usize) -> Result<Self> {
        Self::new(
            format!("{n}x{n}x{n}", n = layer_count),
            format!("{n}x{n}", n = layer_count),
            layer_count,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// The official cubes from 2x2x2 up to 7x7x7, smallest first
    pub fn standard() -> Vec<PuzzleSpec> {
        (2..=7)
            .map(|n| PuzzleSpec {
                name: format!("{n}x{n}x{n}"),
                short_name: format!("{n}x{n}"),
                layer_count: n,
            })
            .collect()
    }

    pub fn by_short_name(short_name: &str) -> Option<PuzzleSpec> {
        Self::standard()
            .into_iter()
            .find(|p| p.short_name.eq_ignore_ascii_case(short_name))
    }
}

impl Default for PuzzleSpec {
    fn default() -> Self {
        PuzzleSpec {
            name: "3x3x3".to_string(),
            short_name: "3x3".to_string(),
            layer_count: 3,
        }
    }
}
