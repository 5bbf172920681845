//! Editor configuration
//!
//! All tunables live in [`ClippingConfig`]. The defaults size the box from the
//! model's bounding sphere and reproduce the stock look of the editor.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ClipError, ClipResult};
use crate::solver::SolverConfig;
use crate::style::EditorStyle;

/// Configuration shared by the box and plane editors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ClippingConfig {
    /// Initial box size as a multiple of the bounding-sphere radius
    pub box_size_factor: f64,
    /// Initial extent of each local axis as a fraction of the box size
    pub box_aspect: [f64; 3],
    /// Side of a free plane quad as a multiple of the bounding-sphere radius
    pub plane_size_factor: f64,
    /// Move-amount solver tuning
    pub solver: SolverConfig,
    /// Proxy styles
    pub style: EditorStyle,
}

impl Default for ClippingConfig {
    fn default() -> Self {
        Self {
            box_size_factor: 1.5,
            box_aspect: [1.0 / 3.0, 0.5, 1.0],
            plane_size_factor: 2.25,
            solver: SolverConfig::default(),
            style: EditorStyle::default(),
        }
    }
}

impl ClippingConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial box size factor
    pub fn with_box_size_factor(mut self, factor: f64) -> Self {
        self.box_size_factor = factor;
        self
    }

    /// Set the initial box aspect
    pub fn with_box_aspect(mut self, aspect: [f64; 3]) -> Self {
        self.box_aspect = aspect;
        self
    }

    /// Set the plane quad size factor
    pub fn with_plane_size_factor(mut self, factor: f64) -> Self {
        self.plane_size_factor = factor;
        self
    }

    /// Set the solver configuration
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Set the proxy styles
    pub fn with_style(mut self, style: EditorStyle) -> Self {
        self.style = style;
        self
    }

    /// Reject values the editors cannot work with
    pub fn validate(&self) -> ClipResult<()> {
        if !(self.box_size_factor.is_finite() && self.box_size_factor > 0.0) {
            return Err(ClipError::invalid_config(
                "box_size_factor",
                format!("must be positive, got {}", self.box_size_factor),
            ));
        }
        if self
            .box_aspect
            .iter()
            .any(|extent| !(extent.is_finite() && *extent > 0.0))
        {
            return Err(ClipError::invalid_config(
                "box_aspect",
                format!("every extent must be positive, got {:?}", self.box_aspect),
            ));
        }
        if !(self.plane_size_factor.is_finite() && self.plane_size_factor > 0.0) {
            return Err(ClipError::invalid_config(
                "plane_size_factor",
                format!("must be positive, got {}", self.plane_size_factor),
            ));
        }
        if !self.solver.foreshortening_coefficient.is_finite() {
            return Err(ClipError::invalid_config(
                "solver.foreshortening_coefficient",
                "must be finite",
            ));
        }
        if !(self.solver.min_sampling_distance.is_finite()
            && self.solver.min_sampling_distance > 0.0)
        {
            return Err(ClipError::invalid_config(
                "solver.min_sampling_distance",
                format!("must be positive, got {}", self.solver.min_sampling_distance),
            ));
        }
        Ok(())
    }
}
