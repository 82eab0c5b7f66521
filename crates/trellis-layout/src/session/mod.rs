//! Incremental layout sessions.
//!
//! A [`LayoutSession`] owns one Cassowary solver for one container view. The
//! widget layer reports changes through the `notify_*` methods, which add and
//! remove exactly the constraints and edit variables affected, and calls
//! [`LayoutSession::solve`] to write frames back.

mod container;

use std::fmt;

use cassowary::{AddConstraintError, Constraint, Solver, Variable};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, debug_span, trace, warn};
use trellis_constraint::{
    compile, geometry_constraints, intrinsic_size_constraints, resolve_attribute,
    ConstraintDescriptor, PropertyConstraint, PropertyKey, VariableRegistry,
};
use trellis_core::{
    intrinsic_metric, Attribute, Axis, ConstraintId, EdgeInsets, LayoutError, LayoutPriority, Rect,
    Size, ViewId,
};

use crate::apply::apply_solution;
use crate::host::ViewHost;
use crate::options::LayoutOptions;

pub use container::{container_values, CONTAINER_ATTRIBUTES};

fn margin_inset_values(margins: EdgeInsets) -> [(Attribute, f64); 4] {
    [
        (Attribute::MarginInsetTop, margins.top),
        (Attribute::MarginInsetLeft, margins.left),
        (Attribute::MarginInsetBottom, margins.bottom),
        (Attribute::MarginInsetRight, margins.right),
    ]
}

/// Constraints that are installed and removed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ConstraintGroup {
    /// The fixed identities of a participating view
    Geometry(ViewId),
    /// Compression resistance and hugging, keyed by the intrinsic size property
    IntrinsicSize(PropertyKey),
    User(ConstraintId),
}

impl fmt::Display for ConstraintGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintGroup::Geometry(view) => write!(f, "geometry of {}", view),
            ConstraintGroup::IntrinsicSize(key) => write!(f, "{}", key),
            ConstraintGroup::User(id) => write!(f, "{}", id),
        }
    }
}

/// Which axes of a participating view carry intrinsic size constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntrinsicState {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl IntrinsicState {
    fn from_axes(horizontal: bool, vertical: bool) -> Self {
        match (horizontal, vertical) {
            (false, false) => IntrinsicState::None,
            (true, false) => IntrinsicState::Horizontal,
            (false, true) => IntrinsicState::Vertical,
            (true, true) => IntrinsicState::Both,
        }
    }

    pub fn has(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (IntrinsicState::Both, _)
                | (IntrinsicState::Horizontal, Axis::Horizontal)
                | (IntrinsicState::Vertical, Axis::Vertical)
        )
    }
}

/// Outcome of a successful layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPass {
    /// Subviews whose frames were written
    pub frames_written: usize,
    /// Solver variables whose value changed since the previous pass
    pub changed_variables: usize,
    /// Content size recorded on the container
    pub content_size: Size,
}

struct UserConstraint {
    descriptor: ConstraintDescriptor,
    constraint: Constraint,
    /// False while the solver refuses the constraint.
    installed: bool,
}

/// Auto layout state for one container view and its direct subviews.
pub struct LayoutSession {
    container: ViewId,
    options: LayoutOptions,
    solver: Solver,
    variables: VariableRegistry,
    /// Last solved value of every variable that has changed from zero
    values: IndexMap<Variable, f64>,
    groups: IndexMap<ConstraintGroup, Vec<Constraint>>,
    /// Compression and hugging priorities each intrinsic size group was built with
    intrinsic_priorities: IndexMap<PropertyKey, (LayoutPriority, LayoutPriority)>,
    /// Edit variables and the value last suggested for each
    edits: IndexMap<PropertyKey, f64>,
    participants: IndexSet<ViewId>,
    constraints: IndexMap<ConstraintId, UserConstraint>,
    next_constraint: u64,
    content_size: Size,
    diagnostics: Vec<LayoutError>,
}

impl fmt::Debug for LayoutSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutSession")
            .field("container", &self.container)
            .field("options", &self.options)
            .field("participants", &self.participants)
            .field("groups", &self.groups.len())
            .field("constraints", &self.constraints.len())
            .field("variables", &self.variables.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}

impl LayoutSession {
    /// Create a session for a container with no participating subviews.
    ///
    /// The container's edit variables are created immediately; their values
    /// are suggested on the first [`refresh_container`](Self::refresh_container)
    /// or [`solve`](Self::solve).
    pub fn new(container: ViewId, options: LayoutOptions) -> Self {
        let mut session = Self {
            container,
            options,
            solver: Solver::new(),
            variables: VariableRegistry::new(),
            values: IndexMap::new(),
            groups: IndexMap::new(),
            intrinsic_priorities: IndexMap::new(),
            edits: IndexMap::new(),
            participants: IndexSet::new(),
            constraints: IndexMap::new(),
            next_constraint: 0,
            content_size: Size::ZERO,
            diagnostics: Vec::new(),
        };
        session.prime_container();
        session
    }

    /// Create a session and add every current subview of the container.
    pub fn for_container<H: ViewHost + ?Sized>(
        host: &H,
        container: ViewId,
        options: LayoutOptions,
    ) -> Self {
        let mut session = Self::new(container, options);
        session.refresh_container(host);
        for &view in host.subviews(container) {
            session.notify_view_added(host, view);
        }
        session
    }

    // ---- lifecycle notifications ----

    /// A subview joined the container.
    pub fn notify_view_added<H: ViewHost + ?Sized>(&mut self, host: &H, view: ViewId) {
        if self.is_participant(view) {
            self.report(LayoutError::AlreadyParticipating { view });
            return;
        }

        if let Err(reason) = self.install_group(ConstraintGroup::Geometry(view), &geometry_constraints(view)) {
            self.report(LayoutError::UnsatisfiableGeometry { view, reason });
            self.variables.forget(view);
            return;
        }
        self.participants.insert(view);
        debug!(%view, container = %self.container, "view added to layout");

        self.suggest_margin_insets(view, host.layout_margins(view));
        self.update_intrinsic_size(host, view);
    }

    /// A subview left the container. Everything installed for it, including
    /// user constraints that mention it, is removed.
    pub fn notify_view_removed(&mut self, view: ViewId) {
        if !self.participants.shift_remove(&view) {
            self.report(LayoutError::NotParticipating { view });
            return;
        }

        for axis in Axis::BOTH {
            let key = PropertyKey::new(view, Attribute::intrinsic_size(axis));
            self.uninstall_group(ConstraintGroup::IntrinsicSize(key));
            self.remove_edit_variable(key);
        }
        for (attribute, _) in margin_inset_values(EdgeInsets::ZERO) {
            self.remove_edit_variable(PropertyKey::new(view, attribute));
        }
        self.uninstall_group(ConstraintGroup::Geometry(view));

        let referencing: Vec<ConstraintId> = self
            .constraints
            .iter()
            .filter(|(_, user)| user.descriptor.references(view))
            .map(|(&id, _)| id)
            .collect();
        for id in referencing {
            debug!(%view, constraint = %id, "dropping constraint of removed view");
            self.discard_constraint(id);
        }

        for key in self.variables.keys_for(view) {
            if let Some(variable) = self.variables.get(key.view, key.attribute) {
                self.values.shift_remove(&variable);
            }
        }
        let forgotten = self.variables.forget(view);
        debug!(%view, forgotten, "view removed from layout");
    }

    /// A subview's intrinsic content size, or its compression resistance or
    /// hugging priorities, may have changed.
    ///
    /// An axis whose priorities differ from those its constraints were built
    /// with has its constraints rebuilt; otherwise only the size is
    /// re-suggested.
    pub fn notify_intrinsic_content_size_invalidated<H: ViewHost + ?Sized>(
        &mut self,
        host: &H,
        view: ViewId,
    ) {
        if !self.participants.contains(&view) {
            self.report(LayoutError::NotParticipating { view });
            return;
        }
        self.update_intrinsic_size(host, view);
    }

    /// The layout margins of the container or of a subview changed.
    pub fn notify_margins_changed<H: ViewHost + ?Sized>(&mut self, host: &H, view: ViewId) {
        if view == self.container {
            self.refresh_container(host);
        } else if self.participants.contains(&view) {
            self.suggest_margin_insets(view, host.layout_margins(view));
        } else {
            self.report(LayoutError::NotParticipating { view });
        }
    }

    /// The container's frame changed.
    pub fn notify_container_resized<H: ViewHost + ?Sized>(&mut self, host: &H) {
        self.refresh_container(host);
    }

    /// Install a user constraint.
    ///
    /// Returns `None` when the descriptor cannot be resolved against this
    /// layout. A required constraint that conflicts with the installed ones
    /// still gets an id: it is kept aside and retried on every pass, unless
    /// [`LayoutOptions::retain_unsatisfiable`] is off, in which case it is
    /// dropped and `None` is returned.
    pub fn notify_constraint_added(&mut self, descriptor: ConstraintDescriptor) -> Option<ConstraintId> {
        let container = self.container;
        let participants = &self.participants;
        let compiled = compile(&descriptor, &mut self.variables, |view| {
            view == container || participants.contains(&view)
        });
        let constraint = match compiled {
            Ok(constraint) => constraint,
            Err(error) => {
                self.report(error.into());
                return None;
            }
        };

        let id = ConstraintId(self.next_constraint);
        self.next_constraint += 1;

        let installed = match self.try_add(&constraint) {
            Ok(()) => {
                self.groups.insert(ConstraintGroup::User(id), vec![constraint.clone()]);
                debug!(constraint = %id, %descriptor, "constraint added");
                true
            }
            Err(AddConstraintError::UnsatisfiableConstraint) => {
                self.report(LayoutError::UnsatisfiableConstraint {
                    constraint: id,
                    description: descriptor.to_string(),
                });
                if !self.options.retain_unsatisfiable {
                    return None;
                }
                false
            }
            Err(error) => {
                self.report(solver_error("add constraint", &descriptor, error));
                return None;
            }
        };

        self.constraints.insert(
            id,
            UserConstraint {
                descriptor,
                constraint,
                installed,
            },
        );
        Some(id)
    }

    /// Remove a user constraint, whether installed or rejected.
    pub fn notify_constraint_removed(&mut self, id: ConstraintId) {
        if self.discard_constraint(id) {
            debug!(constraint = %id, "constraint removed");
        } else {
            self.report(LayoutError::UnknownConstraint { constraint: id });
        }
    }

    // ---- layout pass ----

    /// Solve and write frames of participating subviews back to the host.
    ///
    /// Fails without touching any frame while a required constraint remains
    /// unsatisfiable, or when required constraints pull the container away
    /// from its own frame and margins.
    pub fn solve<H: ViewHost + ?Sized>(&mut self, host: &mut H) -> Result<LayoutPass, LayoutError> {
        let span = debug_span!("layout_pass", container = %self.container);
        let _enter = span.enter();

        self.refresh_container(&*host);

        let rejected = self.retry_rejected();
        if !rejected.is_empty() {
            let error = LayoutError::UnsatisfiableSystem { rejected };
            self.report(error.clone());
            return Err(error);
        }

        let changed_variables = self.pull_changes();
        if let Some(error) = self.container_override() {
            self.report(error.clone());
            return Err(error);
        }

        let subviews: Vec<ViewId> = host
            .subviews(self.container)
            .iter()
            .copied()
            .filter(|view| self.participants.contains(view))
            .collect();

        let content_size = apply_solution(
            host,
            self.container,
            &subviews,
            |view| self.solved_frame(view),
            self.options.mark_needs_display,
        );
        self.content_size = content_size;
        debug!(frames = subviews.len(), changed_variables, ?content_size, "layout pass complete");

        Ok(LayoutPass {
            frames_written: subviews.len(),
            changed_variables,
            content_size,
        })
    }

    // ---- introspection ----

    pub fn container(&self) -> ViewId {
        self.container
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Whether constraints may reference the view: the container or a
    /// participating subview.
    pub fn is_participant(&self, view: ViewId) -> bool {
        view == self.container || self.participants.contains(&view)
    }

    /// Participating subviews, in the order they were added.
    pub fn participants(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.participants.iter().copied()
    }

    /// Intrinsic size state of a participating subview.
    pub fn intrinsic_state(&self, view: ViewId) -> Option<IntrinsicState> {
        if !self.participants.contains(&view) {
            return None;
        }
        let has = |axis| {
            let key = PropertyKey::new(view, Attribute::intrinsic_size(axis));
            self.groups.contains_key(&ConstraintGroup::IntrinsicSize(key))
        };
        Some(IntrinsicState::from_axes(has(Axis::Horizontal), has(Axis::Vertical)))
    }

    /// Value of an attribute as last solved.
    ///
    /// Derived attributes (leading, centers within margins, baselines) are
    /// computed from the primitive ones. Returns `None` when the attribute
    /// has no variable in this session.
    pub fn value_of(&self, view: ViewId, attribute: Attribute) -> Option<f64> {
        let read = |attribute| self.variables.get(view, attribute).map(|v| self.value(v));
        match resolve_attribute(attribute) {
            Some(terms) => terms
                .iter()
                .map(|&(attribute, coefficient)| read(attribute).map(|value| coefficient * value))
                .sum(),
            None => read(attribute),
        }
    }

    /// Solver constraints currently installed on behalf of a view.
    pub fn installed_constraint_count(&self, view: ViewId) -> usize {
        self.groups
            .iter()
            .filter(|(group, _)| match group {
                ConstraintGroup::Geometry(owner) => *owner == view,
                ConstraintGroup::IntrinsicSize(key) => key.view == view,
                ConstraintGroup::User(id) => self
                    .constraints
                    .get(id)
                    .is_some_and(|user| user.descriptor.references(view)),
            })
            .map(|(_, constraints)| constraints.len())
            .sum()
    }

    /// Solver variables registered for a view.
    pub fn variable_count(&self, view: ViewId) -> usize {
        self.variables.count_for(view)
    }

    /// Edit variables registered for a view.
    pub fn edit_variable_count(&self, view: ViewId) -> usize {
        self.edits.keys().filter(|key| key.view == view).count()
    }

    /// Content size recorded by the last successful pass.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// The descriptor a user constraint was created from.
    pub fn constraint(&self, id: ConstraintId) -> Option<&ConstraintDescriptor> {
        self.constraints.get(&id).map(|user| &user.descriptor)
    }

    /// User constraints the solver currently refuses.
    pub fn rejected_constraints(&self) -> Vec<ConstraintId> {
        self.constraints
            .iter()
            .filter(|(_, user)| !user.installed)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Problems recorded since the last [`take_diagnostics`](Self::take_diagnostics).
    pub fn diagnostics(&self) -> &[LayoutError] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<LayoutError> {
        std::mem::take(&mut self.diagnostics)
    }

    // ---- internals ----

    fn report(&mut self, error: LayoutError) {
        warn!(container = %self.container, %error, "layout diagnostic");
        self.diagnostics.push(error);
    }

    fn value(&self, variable: Variable) -> f64 {
        self.values.get(&variable).copied().unwrap_or(0.0)
    }

    fn solved_frame(&self, view: ViewId) -> Rect {
        let read = |attribute| {
            self.variables
                .get(view, attribute)
                .map_or(0.0, |variable| self.value(variable))
        };
        Rect::new(
            read(Attribute::Left),
            read(Attribute::Top),
            read(Attribute::Width),
            read(Attribute::Height),
        )
    }

    /// Drain solver changes into the value cache. Returns how many changed.
    fn pull_changes(&mut self) -> usize {
        let changes = self.solver.fetch_changes();
        for &(variable, value) in changes {
            if let Some(key) = self.variables.property_for(variable) {
                trace!(property = %key, value, "solved");
            }
            self.values.insert(variable, value);
        }
        changes.len()
    }

    /// A solver holding exactly the installed groups and edit variables, with
    /// the last suggested values. Failures are returned rather than reported.
    fn build_solver(&self) -> (Solver, Vec<LayoutError>) {
        let mut solver = Solver::new();
        let mut failures = Vec::new();
        for (group, constraints) in &self.groups {
            for constraint in constraints {
                if let Err(error) = solver.add_constraint(constraint.clone()) {
                    failures.push(solver_error("reinstall constraint", group, error));
                }
            }
        }
        for (&key, &value) in &self.edits {
            let Some(variable) = self.variables.get(key.view, key.attribute) else {
                continue;
            };
            if let Err(error) = solver.add_edit_variable(variable, self.options.edit_strength) {
                failures.push(solver_error("reinstall edit variable", key, error));
            } else if let Err(error) = solver.suggest_value(variable, value) {
                failures.push(solver_error("suggest value", key, error));
            }
        }
        (solver, failures)
    }

    /// Replace the live solver with one rebuilt from the session's bookkeeping.
    fn rebuild_solver(&mut self) {
        let (solver, failures) = self.build_solver();
        self.solver = solver;
        for failure in failures {
            self.report(failure);
        }
        self.values.clear();
        let refreshed = self.pull_changes();
        debug!(
            groups = self.groups.len(),
            edits = self.edits.len(),
            refreshed,
            "solver rebuilt"
        );
    }

    /// Add one constraint to the live solver.
    ///
    /// A refused constraint may leave rows of its own in the tableau, so on
    /// failure the solver is rebuilt without it.
    fn try_add(&mut self, constraint: &Constraint) -> Result<(), AddConstraintError> {
        let result = self.solver.add_constraint(constraint.clone());
        if result.is_err() {
            self.rebuild_solver();
        }
        result
    }

    /// Whether the installed constraints admit `candidate`. Checked on a
    /// scratch solver; the live one is not touched.
    fn accepts(&self, candidate: &Constraint) -> bool {
        let (mut scratch, _) = self.build_solver();
        scratch.add_constraint(candidate.clone()).is_ok()
    }

    /// Add every constraint of a group, or none of them.
    fn install_group(&mut self, group: ConstraintGroup, constraints: &[PropertyConstraint]) -> Result<(), String> {
        let mut installed = Vec::with_capacity(constraints.len());
        for constraint in constraints {
            let native = constraint.to_solver(&mut self.variables);
            if let Err(error) = self.solver.add_constraint(native.clone()) {
                // the partial group never reached `groups`, so the rebuild drops it
                self.rebuild_solver();
                return Err(format!("{:?} adding {}", error, constraint));
            }
            installed.push(native);
        }
        trace!(%group, count = installed.len(), "group installed");
        self.groups.insert(group, installed);
        Ok(())
    }

    /// Remove a group's constraints from the solver. Returns how many were removed.
    fn uninstall_group(&mut self, group: ConstraintGroup) -> usize {
        if let ConstraintGroup::IntrinsicSize(key) = group {
            self.intrinsic_priorities.shift_remove(&key);
        }
        let Some(constraints) = self.groups.shift_remove(&group) else {
            return 0;
        };
        for constraint in &constraints {
            if let Err(error) = self.solver.remove_constraint(constraint) {
                self.report(solver_error("remove constraint", group, error));
            }
        }
        constraints.len()
    }

    fn discard_constraint(&mut self, id: ConstraintId) -> bool {
        if self.constraints.shift_remove(&id).is_none() {
            return false;
        }
        self.uninstall_group(ConstraintGroup::User(id));
        true
    }

    /// Try to install rejected constraints again. Returns those still rejected.
    fn retry_rejected(&mut self) -> Vec<ConstraintId> {
        let pending: Vec<(ConstraintId, Constraint)> = self
            .constraints
            .iter()
            .filter(|(_, user)| !user.installed)
            .map(|(&id, user)| (id, user.constraint.clone()))
            .collect();

        let mut rejected = Vec::new();
        for (id, constraint) in pending {
            if !self.accepts(&constraint) {
                rejected.push(id);
                continue;
            }
            match self.try_add(&constraint) {
                Ok(()) => {
                    if let Some(user) = self.constraints.get_mut(&id) {
                        user.installed = true;
                    }
                    self.groups.insert(ConstraintGroup::User(id), vec![constraint]);
                    debug!(constraint = %id, "previously rejected constraint installed");
                }
                Err(error) => {
                    trace!(constraint = %id, ?error, "retry refused");
                    rejected.push(id);
                }
            }
        }
        rejected
    }

    fn add_edit_variable(&mut self, key: PropertyKey) {
        if self.edits.contains_key(&key) {
            return;
        }
        let variable = self.variables.variable(key);
        match self.solver.add_edit_variable(variable, self.options.edit_strength) {
            Ok(()) => {
                self.edits.insert(key, 0.0);
            }
            Err(error) => self.report(solver_error("add edit variable", key, error)),
        }
    }

    fn remove_edit_variable(&mut self, key: PropertyKey) {
        if self.edits.shift_remove(&key).is_none() {
            return;
        }
        let Some(variable) = self.variables.get(key.view, key.attribute) else {
            return;
        };
        if let Err(error) = self.solver.remove_edit_variable(variable) {
            self.report(solver_error("remove edit variable", key, error));
        }
    }

    /// Suggest a value, creating the edit variable first if it is missing.
    fn suggest(&mut self, key: PropertyKey, value: f64) {
        self.add_edit_variable(key);
        let Some(slot) = self.edits.get_mut(&key) else {
            return;
        };
        *slot = value;
        trace!(%key, value, "suggest");
        let variable = self.variables.variable(key);
        if let Err(error) = self.solver.suggest_value(variable, value) {
            self.report(solver_error("suggest value", key, error));
        }
    }

    fn suggest_margin_insets(&mut self, view: ViewId, margins: EdgeInsets) {
        for (attribute, value) in margin_inset_values(margins) {
            self.suggest(PropertyKey::new(view, attribute), value);
        }
    }

    /// Bring a view's intrinsic size constraints in line with what it reports.
    ///
    /// Per axis: a newly reported size installs the compression and hugging
    /// pair with its edit variable, a withdrawn size removes them, changed
    /// priorities rebuild the pair, and an updated size is only re-suggested.
    fn update_intrinsic_size<H: ViewHost + ?Sized>(&mut self, host: &H, view: ViewId) {
        let size = host.intrinsic_content_size(view);
        for axis in Axis::BOTH {
            let key = PropertyKey::new(view, Attribute::intrinsic_size(axis));
            let group = ConstraintGroup::IntrinsicSize(key);
            let has_edit = self.edits.contains_key(&key);
            let priorities = (
                host.content_compression_resistance_priority(view, axis),
                host.content_hugging_priority(view, axis),
            );
            let current = self.groups.contains_key(&group)
                && has_edit
                && self.intrinsic_priorities.get(&key) == Some(&priorities);

            match intrinsic_metric(size.along(axis)) {
                Some(value) if current => self.suggest(key, value),
                Some(value) => {
                    self.uninstall_group(group);
                    self.add_edit_variable(key);
                    let (compression, hugging) = priorities;
                    let constraints = intrinsic_size_constraints(view, axis, compression, hugging);
                    if let Err(reason) = self.install_group(group, &constraints) {
                        self.remove_edit_variable(key);
                        self.report(LayoutError::UnsatisfiableGeometry { view, reason });
                        continue;
                    }
                    self.intrinsic_priorities.insert(key, priorities);
                    self.suggest(key, value);
                    debug!(%view, ?axis, value, "intrinsic size constraints installed");
                }
                None if self.groups.contains_key(&group) || has_edit => {
                    self.uninstall_group(group);
                    self.remove_edit_variable(key);
                    if let Some(variable) = self.variables.get(view, key.attribute) {
                        self.values.shift_remove(&variable);
                    }
                    debug!(%view, ?axis, "intrinsic size constraints removed");
                }
                None => {}
            }
        }
    }
}

fn solver_error(operation: &'static str, subject: impl fmt::Display, error: impl fmt::Debug) -> LayoutError {
    LayoutError::SolverRejected {
        operation,
        subject: subject.to_string(),
        reason: format!("{:?}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ViewNode, ViewTree};
    use trellis_constraint::{ViewAnchors, GEOMETRY_CONSTRAINT_COUNT};

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    fn container_tree() -> (ViewTree, ViewId) {
        let mut tree = ViewTree::new();
        let container = tree.next_id();
        tree.add_root(ViewNode::new(container).with_frame(Rect::new(0.0, 0.0, 320.0, 480.0)));
        (tree, container)
    }

    #[test]
    fn test_new_session_primes_container() {
        let session = LayoutSession::new(ViewId(0), LayoutOptions::default());
        assert_eq!(session.edit_variable_count(ViewId(0)), CONTAINER_ATTRIBUTES.len());
        assert_eq!(session.installed_constraint_count(ViewId(0)), 0);
        assert!(session.is_participant(ViewId(0)));
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_view_added_and_removed() {
        let (mut tree, container) = container_tree();
        let child = tree.next_id();
        tree.add_subview(
            container,
            ViewNode::new(child).with_intrinsic_content_size(Size::new(40.0, -1.0)),
        );

        let mut session = LayoutSession::for_container(&tree, container, LayoutOptions::default());
        assert!(session.is_participant(child));
        assert_eq!(session.intrinsic_state(child), Some(IntrinsicState::Horizontal));
        assert_eq!(
            session.installed_constraint_count(child),
            GEOMETRY_CONSTRAINT_COUNT + 2
        );
        // four margin insets and the horizontal intrinsic size
        assert_eq!(session.edit_variable_count(child), 5);

        session.notify_view_removed(child);
        assert!(!session.is_participant(child));
        assert_eq!(session.intrinsic_state(child), None);
        assert_eq!(session.installed_constraint_count(child), 0);
        assert_eq!(session.variable_count(child), 0);
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_duplicate_and_unknown_views_are_diagnosed() {
        let (mut tree, container) = container_tree();
        let child = tree.next_id();
        tree.add_subview(container, ViewNode::new(child));

        let mut session = LayoutSession::for_container(&tree, container, LayoutOptions::default());
        session.notify_view_added(&tree, child);
        session.notify_view_added(&tree, container);
        session.notify_view_removed(ViewId(42));
        session.notify_intrinsic_content_size_invalidated(&tree, ViewId(42));

        assert_eq!(
            session.take_diagnostics(),
            vec![
                LayoutError::AlreadyParticipating { view: child },
                LayoutError::AlreadyParticipating { view: container },
                LayoutError::NotParticipating { view: ViewId(42) },
                LayoutError::NotParticipating { view: ViewId(42) },
            ]
        );
        assert_eq!(
            session.installed_constraint_count(child),
            GEOMETRY_CONSTRAINT_COUNT
        );
    }

    #[test]
    fn test_unresolvable_constraint_is_dropped() {
        let (mut tree, container) = container_tree();
        let child = tree.next_id();
        tree.add_subview(container, ViewNode::new(child));
        let mut session = LayoutSession::for_container(&tree, container, LayoutOptions::default());

        let stranger = ViewAnchors::of(ViewId(77));
        let id = session.notify_constraint_added(
            ViewAnchors::of(child).left().equal_to(&stranger.left()),
        );
        assert_eq!(id, None);
        assert!(matches!(
            session.diagnostics(),
            [LayoutError::Unresolvable(_)]
        ));
    }

    #[test]
    fn test_solve_writes_frames() {
        let (mut tree, container) = container_tree();
        let child = tree.next_id();
        tree.add_subview(container, ViewNode::new(child));
        let mut session = LayoutSession::for_container(&tree, container, LayoutOptions::default());

        let outer = ViewAnchors::of(container);
        let inner = ViewAnchors::of(child);
        for descriptor in [
            inner.left().equal_to_offset(&outer.left(), 20.0),
            inner.top().equal_to_offset(&outer.top(), 10.0),
            inner.width().equal_to_multiple(&outer.width(), 0.5, 0.0),
            inner.height().equal_to_constant(44.0),
        ] {
            assert!(session.notify_constraint_added(descriptor).is_some());
        }

        let pass = session.solve(&mut tree).unwrap();
        assert_eq!(pass.frames_written, 1);
        let frame = tree.frame(child);
        assert_close(frame.min_x(), 20.0);
        assert_close(frame.min_y(), 10.0);
        assert_close(frame.width(), 160.0);
        assert_close(frame.height(), 44.0);
        assert_close(session.value_of(child, Attribute::CenterX).unwrap(), 100.0);
        assert_close(session.value_of(child, Attribute::Trailing).unwrap(), 180.0);
        assert!(tree.take_needs_display(child));
        assert_close(session.content_size().width, 180.0);
        assert_close(session.content_size().height, 54.0);
    }

    #[test]
    fn test_rejected_constraint_is_not_retained_when_disabled() {
        let (mut tree, container) = container_tree();
        let child = tree.next_id();
        tree.add_subview(container, ViewNode::new(child));
        let options = LayoutOptions::default().with_retain_unsatisfiable(false);
        let mut session = LayoutSession::for_container(&tree, container, options);

        let width = ViewAnchors::of(child).width();
        assert!(session.notify_constraint_added(width.equal_to_constant(10.0)).is_some());
        assert_eq!(session.notify_constraint_added(width.equal_to_constant(20.0)), None);
        assert!(session.rejected_constraints().is_empty());
        assert!(session.solve(&mut tree).is_ok());
        assert_close(tree.frame(child).width(), 10.0);
    }

    #[test]
    fn test_refused_inequality_leaves_solver_consistent() {
        let (mut tree, container) = container_tree();
        let child = tree.next_id();
        tree.add_subview(container, ViewNode::new(child));
        let options = LayoutOptions::default().with_retain_unsatisfiable(false);
        let mut session = LayoutSession::for_container(&tree, container, options);

        let width = ViewAnchors::of(child).width();
        let fixed = session.notify_constraint_added(width.equal_to_constant(100.0)).unwrap();
        assert_eq!(
            session.notify_constraint_added(width.greater_than_or_equal_to_constant(300.0)),
            None
        );
        assert!(matches!(
            session.take_diagnostics().as_slice(),
            [LayoutError::UnsatisfiableConstraint { .. }]
        ));

        session.notify_constraint_removed(fixed);
        assert!(session.notify_constraint_added(width.equal_to_constant(50.0)).is_some());
        assert!(session.diagnostics().is_empty());
        assert_eq!(session.edit_variable_count(container), CONTAINER_ATTRIBUTES.len());

        session.solve(&mut tree).unwrap();
        assert_close(tree.frame(child).width(), 50.0);
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_retained_inequality_installs_once_conflict_is_removed() {
        let (mut tree, container) = container_tree();
        let child = tree.next_id();
        tree.add_subview(container, ViewNode::new(child));
        let mut session = LayoutSession::for_container(&tree, container, LayoutOptions::default());

        let width = ViewAnchors::of(child).width();
        let fixed = session.notify_constraint_added(width.equal_to_constant(100.0)).unwrap();
        let minimum = session
            .notify_constraint_added(width.greater_than_or_equal_to_constant(300.0))
            .unwrap();
        session.notify_constraint_added(
            width
                .equal_to_constant(0.0)
                .with_priority(LayoutPriority::FITTING_SIZE_LEVEL),
        );
        assert_eq!(session.rejected_constraints(), vec![minimum]);

        // a refused retry must not disturb what is installed
        for _ in 0..2 {
            assert_eq!(
                session.solve(&mut tree),
                Err(LayoutError::UnsatisfiableSystem { rejected: vec![minimum] })
            );
        }
        assert_eq!(tree.frame(child).width(), 0.0);
        assert_eq!(
            session.installed_constraint_count(child),
            GEOMETRY_CONSTRAINT_COUNT + 2
        );

        session.notify_constraint_removed(fixed);
        session.solve(&mut tree).unwrap();
        assert!(session.rejected_constraints().is_empty());
        assert_close(tree.frame(child).width(), 300.0);
    }

    #[test]
    fn test_intrinsic_priority_change_rebuilds_constraints() {
        let (mut tree, container) = container_tree();
        let child = tree.next_id();
        tree.add_subview(
            container,
            ViewNode::new(child).with_intrinsic_content_size(Size::new(40.0, -1.0)),
        );
        let mut session = LayoutSession::for_container(&tree, container, LayoutOptions::default());
        let wide = ViewAnchors::of(child)
            .width()
            .equal_to_constant(90.0)
            .with_priority(LayoutPriority::DEFAULT_LOW);
        session.notify_constraint_added(wide);
        session.solve(&mut tree).unwrap();
        assert_close(tree.frame(child).width(), 90.0);

        // same priorities: only the size is re-suggested
        session.notify_intrinsic_content_size_invalidated(&tree, child);
        assert_eq!(
            session.installed_constraint_count(child),
            GEOMETRY_CONSTRAINT_COUNT + 2 + 1
        );

        if let Some(node) = tree.get_mut(child) {
            node.compression_resistance[0] = LayoutPriority::REQUIRED;
            node.hugging[0] = LayoutPriority::REQUIRED;
        }
        session.notify_intrinsic_content_size_invalidated(&tree, child);
        assert_eq!(
            session.installed_constraint_count(child),
            GEOMETRY_CONSTRAINT_COUNT + 1 + 1
        );
        assert_eq!(session.intrinsic_state(child), Some(IntrinsicState::Horizontal));
        assert_eq!(session.edit_variable_count(child), 5);

        session.solve(&mut tree).unwrap();
        assert_close(tree.frame(child).width(), 40.0);
        assert!(session.diagnostics().is_empty());
    }

    #[test]
    fn test_intrinsic_state() {
        assert!(IntrinsicState::Both.has(Axis::Vertical));
        assert!(IntrinsicState::Horizontal.has(Axis::Horizontal));
        assert!(!IntrinsicState::Horizontal.has(Axis::Vertical));
        assert!(!IntrinsicState::None.has(Axis::Horizontal));
        assert_eq!(IntrinsicState::from_axes(false, true), IntrinsicState::Vertical);
    }
}
