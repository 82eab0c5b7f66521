//! Mapping between view properties and solver variables.

use std::fmt;

use cassowary::Variable;
use indexmap::IndexMap;
use trellis_core::{Attribute, ViewId};

/// A property of a particular view. Used only as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    pub view: ViewId,
    pub attribute: Attribute,
}

impl PropertyKey {
    pub const fn new(view: ViewId, attribute: Attribute) -> Self {
        Self { view, attribute }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.view, self.attribute)
    }
}

/// Hands out one solver variable per property key.
///
/// Variables are created on first lookup and live until the owning view is
/// forgotten. The reverse map lets diagnostics name the property behind a
/// variable.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    variables: IndexMap<PropertyKey, Variable>,
    properties: IndexMap<Variable, PropertyKey>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the variable for a property, creating it if needed.
    pub fn variable(&mut self, key: PropertyKey) -> Variable {
        if let Some(&variable) = self.variables.get(&key) {
            return variable;
        }
        let variable = Variable::new();
        self.variables.insert(key, variable);
        self.properties.insert(variable, key);
        variable
    }

    /// Get the variable for an attribute of a view, creating it if needed.
    pub fn variable_for(&mut self, view: ViewId, attribute: Attribute) -> Variable {
        self.variable(PropertyKey::new(view, attribute))
    }

    /// Look up a variable without creating one.
    pub fn get(&self, view: ViewId, attribute: Attribute) -> Option<Variable> {
        self.variables
            .get(&PropertyKey::new(view, attribute))
            .copied()
    }

    /// The property a variable stands for.
    pub fn property_for(&self, variable: Variable) -> Option<PropertyKey> {
        self.properties.get(&variable).copied()
    }

    /// Keys currently registered for a view.
    pub fn keys_for(&self, view: ViewId) -> impl Iterator<Item = PropertyKey> + '_ {
        self.variables.keys().copied().filter(move |key| key.view == view)
    }

    /// Number of variables registered for a view.
    pub fn count_for(&self, view: ViewId) -> usize {
        self.keys_for(view).count()
    }

    /// Drop every variable of a view. Returns how many were dropped.
    pub fn forget(&mut self, view: ViewId) -> usize {
        let before = self.variables.len();
        self.variables.retain(|key, _| key.view != view);
        self.properties.retain(|_, key| key.view != view);
        before - self.variables.len()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
