//! The course builder: an ordered list of lesson components plus a selection
//! cursor.
//!
//! All mutations go through [`CourseBuilder`]. After every call the `order`
//! values form exactly `0..n-1`, the selection (if any) names an existing
//! component, and ids are never reused. Failed calls leave the builder
//! unchanged.

use crate::component::*;
use crate::config::{BuilderConfig, QuizConfig};
use crate::error::{BuilderError, Result};
use crate::factory::ComponentFactory;
use crate::ids::IdGenerator;
use crate::snapshot::Snapshot;
use std::collections::HashSet;
use tracing::debug;

/// Edit/preview toggle of the builder page. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuilderMode {
    #[default]
    Edit,
    Preview,
}

#[derive(Debug, Clone)]
pub struct CourseBuilder {
    components: Vec<Component>,
    selected: Option<ComponentId>,
    mode: BuilderMode,
    ids: IdGenerator,
    factory: ComponentFactory,
    quiz: QuizConfig,
    max_components: usize,
}

impl CourseBuilder {
    /// Create an empty builder with default configuration
    pub fn new() -> Self {
        Self::with_config(&BuilderConfig::default())
    }

    pub fn with_config(config: &BuilderConfig) -> Self {
        Self::with_ids(config, IdGenerator::new())
    }

    pub fn with_ids(config: &BuilderConfig, ids: IdGenerator) -> Self {
        CourseBuilder {
            components: Vec::new(),
            selected: None,
            mode: BuilderMode::default(),
            ids,
            factory: ComponentFactory::new(config),
            quiz: config.quiz.clone(),
            max_components: config.builder.max_components,
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Components in display order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn get(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    pub fn position(&self, id: &ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    pub fn selected_id(&self) -> Option<&ComponentId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Component> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn mode(&self) -> BuilderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: BuilderMode) {
        self.mode = mode;
        debug!(?mode, "builder mode changed");
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Appends a new component of `kind`, selects it and returns its id.
    pub fn add(
        &mut self,
        kind: ComponentType,
        overrides: Option<ComponentPatch>,
    ) -> Result<ComponentId> {
        self.ensure_capacity()?;
        let data = self.factory.create(kind, overrides.as_ref(), &mut self.ids)?;
        let id = self.push(data);
        debug!(id = %id, kind = %kind, order = self.len() - 1, "component added");
        Ok(id)
    }

    /// Merges `patch` into the component's data. Id, type and order are untouched.
    pub fn update(&mut self, id: &ComponentId, patch: &ComponentPatch) -> Result<()> {
        let index = self.index_of(id)?;
        let next = self.components[index].data().patched(patch, &self.quiz)?;
        self.components[index].set_data(next);
        debug!(id = %id, "component updated");
        Ok(())
    }

    /// Removes the component and renumbers the rest. Clears the selection if
    /// it pointed at the removed component.
    pub fn delete(&mut self, id: &ComponentId) -> Result<Component> {
        let index = self.index_of(id)?;
        let removed = self.components.remove(index);
        self.renumber();
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        debug!(id = %id, remaining = self.len(), "component deleted");
        Ok(removed)
    }

    /// Moves the component at `from` to position `to` (array-move, not swap).
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.components.len();
        for index in [from, to] {
            if index >= len {
                return Err(BuilderError::IndexOutOfRange { index, len });
            }
        }
        if from != to {
            let moved = self.components.remove(from);
            self.components.insert(to, moved);
            self.renumber();
        }
        debug!(from, to, "components reordered");
        Ok(())
    }

    /// Moves the component one position earlier; no-op when already first.
    pub fn move_up(&mut self, id: &ComponentId) -> Result<()> {
        let index = self.index_of(id)?;
        if index == 0 {
            return Ok(());
        }
        self.reorder(index, index - 1)
    }

    /// Moves the component one position later; no-op when already last.
    pub fn move_down(&mut self, id: &ComponentId) -> Result<()> {
        let index = self.index_of(id)?;
        if index + 1 >= self.len() {
            return Ok(());
        }
        self.reorder(index, index + 1)
    }

    /// Sets the selection cursor; `None` clears it.
    pub fn select(&mut self, id: Option<&ComponentId>) -> Result<()> {
        match id {
            Some(id) => {
                self.index_of(id)?;
                self.selected = Some(id.clone());
                debug!(id = %id, "component selected");
            }
            None => {
                self.selected = None;
                debug!("selection cleared");
            }
        }
        Ok(())
    }

    /// Appends a copy of the component under a fresh id and selects it.
    pub fn duplicate(&mut self, id: &ComponentId) -> Result<ComponentId> {
        let index = self.index_of(id)?;
        self.ensure_capacity()?;
        let data = self.components[index].data().clone();
        let new_id = self.push(data);
        debug!(source = %id, id = %new_id, "component duplicated");
        Ok(new_id)
    }

    /// Removes every component and clears the selection.
    pub fn clear(&mut self) {
        self.components.clear();
        self.selected = None;
        debug!("components cleared");
    }

    // ------------------------------------------------------------------
    // Quiz editing
    // ------------------------------------------------------------------

    /// Appends `Option N` to a quiz and returns the new option's id.
    pub fn add_quiz_option(&mut self, id: &ComponentId) -> Result<String> {
        let index = self.index_of(id)?;
        let quiz = quiz_mut(&mut self.components[index])?;
        let option_id = self.ids.next_option_id(quiz.option_ids());
        let added = quiz.add_option(option_id, &self.quiz)?.id.clone();
        debug!(id = %id, option = %added, "quiz option added");
        Ok(added)
    }

    pub fn update_quiz_option(
        &mut self,
        id: &ComponentId,
        option: usize,
        text: String,
    ) -> Result<()> {
        let index = self.index_of(id)?;
        quiz_mut(&mut self.components[index])?.update_option(option, text)?;
        debug!(id = %id, option, "quiz option updated");
        Ok(())
    }

    /// Removes a quiz option. See [`QuizBlock::remove_option`] for how the
    /// correct answer is kept valid.
    pub fn remove_quiz_option(&mut self, id: &ComponentId, option: usize) -> Result<QuizOption> {
        let index = self.index_of(id)?;
        let removed = quiz_mut(&mut self.components[index])?.remove_option(option, &self.quiz)?;
        debug!(id = %id, option = %removed.id, "quiz option removed");
        Ok(removed)
    }

    pub fn set_correct_answer(&mut self, id: &ComponentId, option: usize) -> Result<()> {
        let index = self.index_of(id)?;
        quiz_mut(&mut self.components[index])?.set_correct_answer(option)?;
        debug!(id = %id, option, "quiz correct answer set");
        Ok(())
    }

    pub fn check_quiz_answer(&self, id: &ComponentId, option: usize) -> Result<QuizOutcome> {
        let component = self
            .get(id)
            .ok_or_else(|| BuilderError::NotFound(id.clone()))?;
        let quiz = component.data().as_quiz().ok_or(BuilderError::TypeMismatch {
            expected: ComponentType::Quiz,
            found: component.kind(),
        })?;
        quiz.check_answer(option)
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            components: self.components.clone(),
            selected_component: self.selected.clone(),
        }
    }

    /// Rebuilds a builder from a snapshot after checking every invariant.
    pub fn from_snapshot(snapshot: Snapshot, config: &BuilderConfig) -> Result<Self> {
        let mut builder = Self::with_config(config);
        let Snapshot {
            mut components,
            selected_component,
        } = snapshot;

        components.sort_by_key(|c| c.order());
        let mut seen = HashSet::new();
        for (position, component) in components.iter().enumerate() {
            if component.order() != position {
                return Err(BuilderError::InvariantViolation(format!(
                    "Component orders must be 0..{} without gaps (found {} at position {})",
                    components.len(),
                    component.order(),
                    position
                )));
            }
            if !seen.insert(component.id().clone()) {
                return Err(BuilderError::InvariantViolation(format!(
                    "Duplicate component id '{}'",
                    component.id()
                )));
            }
            component.data().validate(&builder.quiz)?;
        }
        if builder.max_components > 0 && components.len() > builder.max_components {
            return Err(BuilderError::InvariantViolation(format!(
                "Lesson has {} components, limit is {}",
                components.len(),
                builder.max_components
            )));
        }
        if let Some(selected) = &selected_component {
            if !seen.contains(selected) {
                return Err(BuilderError::InvariantViolation(format!(
                    "Selected component '{}' is not in the lesson",
                    selected
                )));
            }
        }

        for id in &seen {
            builder.ids.register(id);
        }
        builder.components = components;
        builder.selected = selected_component;
        Ok(builder)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn index_of(&self, id: &ComponentId) -> Result<usize> {
        self.position(id).ok_or_else(|| BuilderError::NotFound(id.clone()))
    }

    fn ensure_capacity(&self) -> Result<()> {
        if self.max_components > 0 && self.components.len() >= self.max_components {
            return Err(BuilderError::InvariantViolation(format!(
                "Lesson already has the maximum of {} components",
                self.max_components
            )));
        }
        Ok(())
    }

    fn push(&mut self, data: ComponentData) -> ComponentId {
        let id = self.ids.next_component_id();
        let order = self.components.len();
        self.components.push(Component::new(id.clone(), order, data));
        self.selected = Some(id.clone());
        id
    }

    fn renumber(&mut self) {
        for (order, component) in self.components.iter_mut().enumerate() {
            component.set_order(order);
        }
    }
}

impl Default for CourseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn quiz_mut(component: &mut Component) -> Result<&mut QuizBlock> {
    let found = component.kind();
    component
        .data_mut()
        .as_quiz_mut()
        .ok_or(BuilderError::TypeMismatch {
            expected: ComponentType::Quiz,
            found,
        })
}
