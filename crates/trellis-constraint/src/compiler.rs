//! Conversion of constraint descriptors into solver constraints.

use cassowary::Constraint;
use smallvec::SmallVec;
use trellis_core::{Attribute, ConstraintError, ViewId};

use crate::descriptor::ConstraintDescriptor;
use crate::linear::{resolve_attribute, PropertyConstraint, Terms};
use crate::registry::{PropertyKey, VariableRegistry};

/// Lower a descriptor into a linear constraint over view properties.
///
/// `is_participant` decides which views this layout may reference.
pub fn lower(
    descriptor: &ConstraintDescriptor,
    is_participant: impl Fn(ViewId) -> bool,
) -> Result<PropertyConstraint, ConstraintError> {
    let first = resolve(descriptor.first_view, descriptor.first_attribute, &is_participant)?;

    let mut terms: Terms = first
        .iter()
        .map(|&(attribute, coefficient)| {
            (PropertyKey::new(descriptor.first_view, attribute), coefficient)
        })
        .collect();

    // A missing second item leaves the constant alone on the right-hand side,
    // whatever the multiplier says.
    if let Some((second_view, second_attribute)) = descriptor.second() {
        let second = resolve(second_view, second_attribute, &is_participant)?;
        for (attribute, coefficient) in second {
            terms.push((
                PropertyKey::new(second_view, attribute),
                -descriptor.multiplier * coefficient,
            ));
        }
    }

    Ok(PropertyConstraint::new(
        terms,
        -descriptor.constant,
        descriptor.relation,
        descriptor.priority,
    ))
}

/// Compile a descriptor into a solver constraint.
pub fn compile(
    descriptor: &ConstraintDescriptor,
    registry: &mut VariableRegistry,
    is_participant: impl Fn(ViewId) -> bool,
) -> Result<Constraint, ConstraintError> {
    Ok(lower(descriptor, is_participant)?.to_solver(registry))
}

fn resolve(
    view: ViewId,
    attribute: Attribute,
    is_participant: &impl Fn(ViewId) -> bool,
) -> Result<SmallVec<[(Attribute, f64); 2]>, ConstraintError> {
    if !is_participant(view) {
        return Err(ConstraintError::NotParticipating { view, attribute });
    }
    resolve_attribute(attribute).ok_or(ConstraintError::Unconstrainable { view, attribute })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cassowary::{strength, Solver};
    use trellis_core::{LayoutPriority, Relation};

    const CONTAINER: ViewId = ViewId(0);
    const CHILD: ViewId = ViewId(1);

    fn participants(view: ViewId) -> bool {
        view == CONTAINER || view == CHILD
    }

    #[test]
    fn test_lower_related() {
        let descriptor = ConstraintDescriptor::new(
            CHILD,
            Attribute::Width,
            Relation::Equal,
            CONTAINER,
            Attribute::Width,
            0.5,
            10.0,
        );
        let lowered = lower(&descriptor, participants).unwrap();
        assert_eq!(
            lowered.terms.as_slice(),
            &[
                (PropertyKey::new(CHILD, Attribute::Width), 1.0),
                (PropertyKey::new(CONTAINER, Attribute::Width), -0.5),
            ]
        );
        assert_eq!(lowered.constant, -10.0);
        assert_eq!(lowered.relation, Relation::Equal);
    }

    #[test]
    fn test_not_an_attribute_ignores_multiplier() {
        let mut descriptor = ConstraintDescriptor::new(
            CHILD,
            Attribute::Height,
            Relation::GreaterThanOrEqual,
            CONTAINER,
            Attribute::NotAnAttribute,
            3.0,
            44.0,
        );
        descriptor.priority = LayoutPriority::DEFAULT_LOW;

        let lowered = lower(&descriptor, participants).unwrap();
        assert_eq!(lowered.terms.len(), 1);
        assert_eq!(lowered.constant, -44.0);
        assert_eq!(lowered.priority, LayoutPriority::DEFAULT_LOW);
    }

    #[test]
    fn test_derived_attributes() {
        let descriptor = ConstraintDescriptor::new(
            CHILD,
            Attribute::CenterX,
            Relation::Equal,
            CONTAINER,
            Attribute::CenterXWithinMargins,
            1.0,
            0.0,
        );
        let lowered = lower(&descriptor, participants).unwrap();
        assert_eq!(
            lowered.terms.as_slice(),
            &[
                (PropertyKey::new(CHILD, Attribute::CenterX), 1.0),
                (PropertyKey::new(CONTAINER, Attribute::LeftMargin), -0.5),
                (PropertyKey::new(CONTAINER, Attribute::RightMargin), -0.5),
            ]
        );
    }

    #[test]
    fn test_unresolvable() {
        let stranger = ConstraintDescriptor::constant(ViewId(9), Attribute::Width, Relation::Equal, 1.0);
        assert_eq!(
            lower(&stranger, participants).unwrap_err(),
            ConstraintError::NotParticipating {
                view: ViewId(9),
                attribute: Attribute::Width,
            }
        );

        let to_stranger = ConstraintDescriptor::new(
            CHILD,
            Attribute::Left,
            Relation::Equal,
            ViewId(9),
            Attribute::Left,
            1.0,
            0.0,
        );
        assert!(matches!(
            lower(&to_stranger, participants),
            Err(ConstraintError::NotParticipating { view: ViewId(9), .. })
        ));

        let internal =
            ConstraintDescriptor::constant(CHILD, Attribute::IntrinsicSizeX, Relation::Equal, 1.0);
        assert_eq!(
            lower(&internal, participants).unwrap_err(),
            ConstraintError::Unconstrainable {
                view: CHILD,
                attribute: Attribute::IntrinsicSizeX,
            }
        );
    }

    #[test]
    fn test_compiled_constraint_solves() {
        let mut registry = VariableRegistry::new();
        let mut solver = Solver::new();

        let container_width = registry.variable_for(CONTAINER, Attribute::Width);
        solver.add_edit_variable(container_width, strength::STRONG).unwrap();
        solver.suggest_value(container_width, 300.0).unwrap();

        let descriptor = ConstraintDescriptor::new(
            CHILD,
            Attribute::Width,
            Relation::Equal,
            CONTAINER,
            Attribute::Width,
            0.5,
            -20.0,
        );
        let constraint = compile(&descriptor, &mut registry, participants).unwrap();
        solver.add_constraint(constraint).unwrap();

        let child_width = registry.variable_for(CHILD, Attribute::Width);
        let solved = solver
            .fetch_changes()
            .iter()
            .find(|(variable, _)| *variable == child_width)
            .map(|&(_, value)| value);
        assert!((solved.unwrap() - 130.0).abs() < 1e-6);
    }
}
