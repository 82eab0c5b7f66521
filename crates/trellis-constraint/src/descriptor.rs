//! Declarative constraint descriptions.

use std::fmt;

use trellis_core::{Attribute, LayoutPriority, Relation, ViewId};

/// `first.attribute REL multiplier * second.attribute + constant`
///
/// When there is no second item, or its attribute is `NotAnAttribute`, the
/// first attribute is related to `constant` alone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintDescriptor {
    pub first_view: ViewId,
    pub first_attribute: Attribute,
    pub relation: Relation,
    pub second_view: Option<ViewId>,
    pub second_attribute: Attribute,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: LayoutPriority,
    /// Optional name shown in diagnostics.
    pub identifier: Option<String>,
}

impl ConstraintDescriptor {
    /// Relate an attribute of one view to an attribute of another.
    pub fn new(
        first_view: ViewId,
        first_attribute: Attribute,
        relation: Relation,
        second_view: ViewId,
        second_attribute: Attribute,
        multiplier: f64,
        constant: f64,
    ) -> Self {
        Self {
            first_view,
            first_attribute,
            relation,
            second_view: Some(second_view),
            second_attribute,
            multiplier,
            constant,
            priority: LayoutPriority::REQUIRED,
            identifier: None,
        }
    }

    /// Pin an attribute of a view to a constant.
    pub fn constant(view: ViewId, attribute: Attribute, relation: Relation, constant: f64) -> Self {
        Self {
            first_view: view,
            first_attribute: attribute,
            relation,
            second_view: None,
            second_attribute: Attribute::NotAnAttribute,
            multiplier: 1.0,
            constant,
            priority: LayoutPriority::REQUIRED,
            identifier: None,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: impl Into<LayoutPriority>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Set the identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// The second item, unless the right-hand side is a bare constant.
    pub fn second(&self) -> Option<(ViewId, Attribute)> {
        match self.second_view {
            Some(view) if self.second_attribute != Attribute::NotAnAttribute => {
                Some((view, self.second_attribute))
            }
            _ => None,
        }
    }

    /// Whether either side refers to a view.
    pub fn references(&self, view: ViewId) -> bool {
        self.first_view == view || self.second_view == Some(view)
    }
}

impl fmt::Display for ConstraintDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(identifier) = &self.identifier {
            write!(f, "[{}] ", identifier)?;
        }
        write!(f, "{}.{} {} ", self.first_view, self.first_attribute, self.relation)?;
        match self.second() {
            Some((view, attribute)) => {
                if self.multiplier != 1.0 {
                    write!(f, "{} * ", self.multiplier)?;
                }
                write!(f, "{}.{}", view, attribute)?;
                if self.constant != 0.0 {
                    write!(f, " + {}", self.constant)?;
                }
            }
            None => write!(f, "{}", self.constant)?,
        }
        if !self.priority.is_required() {
            write!(f, " @{}", self.priority)?;
        }
        Ok(())
    }
}
