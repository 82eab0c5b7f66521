//! Layout session configuration.

use cassowary::strength;

/// Options for a [`LayoutSession`](crate::LayoutSession).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Solver strength of edit variables (container geometry, margin insets,
    /// intrinsic sizes). Must stay below required.
    pub edit_strength: f64,
    /// Keep required constraints the solver rejects and retry them on every
    /// pass. When disabled they are dropped after being reported.
    pub retain_unsatisfiable: bool,
    /// Mark views as needing display after their frames are written.
    pub mark_needs_display: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            edit_strength: strength::STRONG,
            retain_unsatisfiable: true,
            mark_needs_display: true,
        }
    }
}

impl LayoutOptions {
    /// Set the edit variable strength.
    ///
    /// Required strength is not accepted by the solver for edit variables and
    /// is lowered to just below it.
    pub fn with_edit_strength(mut self, edit_strength: f64) -> Self {
        self.edit_strength = edit_strength.clamp(0.0, strength::REQUIRED - 1.0);
        self
    }

    pub fn with_retain_unsatisfiable(mut self, retain: bool) -> Self {
        self.retain_unsatisfiable = retain;
        self
    }

    pub fn with_mark_needs_display(mut self, mark: bool) -> Self {
        self.mark_needs_display = mark;
        self
    }
}
