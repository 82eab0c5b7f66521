//! Linear constraints over view properties.
//!
//! Both user descriptors and generated geometry are lowered into
//! [`PropertyConstraint`] before reaching the solver.

use std::fmt;

use cassowary::{strength, Constraint, Expression, RelationalOperator, Term};
use smallvec::{smallvec, SmallVec};
use trellis_core::{Attribute, LayoutPriority, Relation, ViewId};

use crate::registry::{PropertyKey, VariableRegistry};

/// Terms of a linear expression, `coefficient * property`.
pub type Terms = SmallVec<[(PropertyKey, f64); 4]>;

/// `Σ coefficient * property + constant  REL  0`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyConstraint {
    pub terms: Terms,
    pub constant: f64,
    pub relation: Relation,
    pub priority: LayoutPriority,
}

impl PropertyConstraint {
    pub fn new(terms: Terms, constant: f64, relation: Relation, priority: LayoutPriority) -> Self {
        Self {
            terms,
            constant,
            relation,
            priority,
        }
    }

    /// `a.attr_a REL b.attr_b`, with both properties on the same view.
    pub fn between(
        view: ViewId,
        lhs: Attribute,
        relation: Relation,
        rhs: &[(Attribute, f64)],
        priority: LayoutPriority,
    ) -> Self {
        let mut terms: Terms = smallvec![(PropertyKey::new(view, lhs), 1.0)];
        terms.extend(
            rhs.iter()
                .map(|&(attribute, coefficient)| (PropertyKey::new(view, attribute), -coefficient)),
        );
        Self::new(terms, 0.0, relation, priority)
    }

    /// Whether any term refers to a view.
    pub fn references(&self, view: ViewId) -> bool {
        self.terms.iter().any(|(key, _)| key.view == view)
    }

    /// Lower into a solver constraint, resolving properties through the registry.
    pub fn to_solver(&self, registry: &mut VariableRegistry) -> Constraint {
        let terms = self
            .terms
            .iter()
            .map(|&(key, coefficient)| Term {
                variable: registry.variable(key),
                coefficient,
            })
            .collect();
        Constraint::new(
            Expression::new(terms, self.constant),
            relational_operator(self.relation),
            strength_for(self.priority),
        )
    }
}

impl fmt::Display for PropertyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, coefficient)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*{}", coefficient, key)?;
        }
        write!(f, " + {} {} 0", self.constant, self.relation)
    }
}

/// Convert a layout priority into a solver strength.
///
/// Priorities below required are soft, weighted by their numeric value.
/// Anything at or above required is hard.
pub fn strength_for(priority: LayoutPriority) -> f64 {
    if priority.is_required() {
        strength::REQUIRED
    } else {
        f64::from(priority.value())
    }
}

pub(crate) fn relational_operator(relation: Relation) -> RelationalOperator {
    match relation {
        Relation::LessThanOrEqual => RelationalOperator::LessOrEqual,
        Relation::Equal => RelationalOperator::Equal,
        Relation::GreaterThanOrEqual => RelationalOperator::GreaterOrEqual,
    }
}

/// Express a constrainable attribute in terms of the attributes that carry
/// solver variables.
///
/// Layout direction is left to right. Views have no text baseline here, so
/// both baselines sit on the bottom edge. Returns `None` for attributes that
/// cannot be constrained.
pub fn resolve_attribute(attribute: Attribute) -> Option<SmallVec<[(Attribute, f64); 2]>> {
    use Attribute::*;
    let resolved = match attribute {
        Left | Right | Top | Bottom | Width | Height | CenterX | CenterY | LeftMargin
        | RightMargin | TopMargin | BottomMargin => smallvec![(attribute, 1.0)],
        Leading => smallvec![(Left, 1.0)],
        Trailing => smallvec![(Right, 1.0)],
        LeadingMargin => smallvec![(LeftMargin, 1.0)],
        TrailingMargin => smallvec![(RightMargin, 1.0)],
        FirstBaseline | LastBaseline => smallvec![(Bottom, 1.0)],
        CenterXWithinMargins => smallvec![(LeftMargin, 0.5), (RightMargin, 0.5)],
        CenterYWithinMargins => smallvec![(TopMargin, 0.5), (BottomMargin, 0.5)],
        NotAnAttribute | IntrinsicSizeX | IntrinsicSizeY | MarginInsetLeft | MarginInsetRight
        | MarginInsetTop | MarginInsetBottom => return None,
    };
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_mapping() {
        assert_eq!(strength_for(LayoutPriority::REQUIRED), strength::REQUIRED);
        assert_eq!(strength_for(LayoutPriority::new(1500.0)), strength::REQUIRED);
        assert_eq!(strength_for(LayoutPriority::DEFAULT_HIGH), 750.0);
        assert!(strength_for(LayoutPriority::new(999.0)) < strength::STRONG);
    }

    #[test]
    fn test_resolve_attribute() {
        assert_eq!(
            resolve_attribute(Attribute::Leading).unwrap().as_slice(),
            &[(Attribute::Left, 1.0)]
        );
        assert_eq!(
            resolve_attribute(Attribute::CenterYWithinMargins).unwrap().as_slice(),
            &[(Attribute::TopMargin, 0.5), (Attribute::BottomMargin, 0.5)]
        );
        assert!(resolve_attribute(Attribute::NotAnAttribute).is_none());
        assert!(resolve_attribute(Attribute::IntrinsicSizeY).is_none());

        for attribute in Attribute::ALL {
            assert_eq!(resolve_attribute(attribute).is_some(), attribute.is_constrainable());
        }
    }

    #[test]
    fn test_between() {
        let view = ViewId(4);
        let constraint = PropertyConstraint::between(
            view,
            Attribute::Width,
            Relation::Equal,
            &[(Attribute::Right, 1.0), (Attribute::Left, -1.0)],
            LayoutPriority::REQUIRED,
        );
        assert_eq!(
            constraint.terms.as_slice(),
            &[
                (PropertyKey::new(view, Attribute::Width), 1.0),
                (PropertyKey::new(view, Attribute::Right), -1.0),
                (PropertyKey::new(view, Attribute::Left), 1.0),
            ]
        );
        assert!(constraint.references(view));
        assert!(!constraint.references(ViewId(5)));
    }
}
