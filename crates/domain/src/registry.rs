//! Registry — the static machine and element configuration.
//!
//! Declaration order is significant: machines are listed in the order they
//! were added, and elements in the order they should be displayed.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::error::{LastValueError, ValidationError};
use crate::id::{ElementId, SourceId};

/// A monitored machine and its store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub name: String,
    pub source_id: SourceId,
}

/// Immutable machine/element configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Registry {
    machines: Vec<Machine>,
    elements: Vec<ElementId>,
    labels: HashMap<ElementId, String>,
}

impl Registry {
    /// Create a builder for constructing a [`Registry`].
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Machines in declaration order.
    #[must_use]
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    /// Element ids in display order.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Look up a machine by name.
    #[must_use]
    pub fn machine(&self, name: &str) -> Option<&Machine> {
        self.machines.iter().find(|machine| machine.name == name)
    }

    /// The configured label of an element, or `el_<id>` when none is set.
    #[must_use]
    pub fn label(&self, element_id: ElementId) -> Cow<'_, str> {
        match self.labels.get(&element_id) {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => Cow::Owned(fallback_label(element_id)),
        }
    }

    /// Number of cells a full assembly produces.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.machines.len() * self.elements.len()
    }

    fn validate(&self) -> Result<(), LastValueError> {
        if self.machines.is_empty() {
            return Err(ValidationError::NoMachines.into());
        }
        if self.elements.is_empty() {
            return Err(ValidationError::NoElements.into());
        }
        let mut seen = HashSet::new();
        for machine in &self.machines {
            if machine.name.trim().is_empty() {
                return Err(ValidationError::EmptyMachineName.into());
            }
            if !seen.insert(machine.name.as_str()) {
                return Err(ValidationError::DuplicateMachine(machine.name.clone()).into());
            }
        }
        Ok(())
    }
}

/// Synthetic label for an element without a configured one.
#[must_use]
pub fn fallback_label(element_id: ElementId) -> String {
    format!("el_{element_id}")
}

/// Step-by-step builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    machines: Vec<Machine>,
    elements: Vec<ElementId>,
    labels: HashMap<ElementId, String>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn machine(mut self, name: impl Into<String>, source_id: SourceId) -> Self {
        self.machines.push(Machine {
            name: name.into(),
            source_id,
        });
        self
    }

    /// Append an element without a label.
    #[must_use]
    pub fn element(mut self, element_id: ElementId) -> Self {
        self.elements.push(element_id);
        self
    }

    /// Append an element together with its display label.
    #[must_use]
    pub fn labelled_element(mut self, element_id: ElementId, label: impl Into<String>) -> Self {
        self.elements.push(element_id);
        self.labels.insert(element_id, label.into());
        self
    }

    /// Consume the builder, validate, and return a [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns [`LastValueError::Validation`] when no machine or element is
    /// declared, or when a machine name is empty or repeated.
    pub fn build(self) -> Result<Registry, LastValueError> {
        let registry = Registry {
            machines: self.machines,
            elements: self.elements,
            labels: self.labels,
        };
        registry.validate()?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        Registry::builder()
            .machine("Schuler1", SourceId::new(982))
            .machine("Schuler2", SourceId::new(1028))
            .labelled_element(ElementId::new(69), "Barras.VelocidadAcunado.Valor")
            .labelled_element(ElementId::new(48), "DatosGen.ModoTrabajo.Led")
            .element(ElementId::new(999))
            .build()
            .unwrap()
    }

    #[test]
    fn should_keep_declaration_order() {
        let registry = sample();
        let names: Vec<&str> = registry.machines().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Schuler1", "Schuler2"]);
        assert_eq!(
            registry.elements(),
            [ElementId::new(69), ElementId::new(48), ElementId::new(999)]
        );
    }

    #[test]
    fn should_return_configured_label() {
        assert_eq!(
            sample().label(ElementId::new(48)),
            "DatosGen.ModoTrabajo.Led"
        );
    }

    #[test]
    fn should_fall_back_to_synthetic_label() {
        assert_eq!(sample().label(ElementId::new(999)), "el_999");
        assert_eq!(sample().label(ElementId::new(7)), "el_7");
    }

    #[test]
    fn should_count_cells() {
        assert_eq!(sample().cell_count(), 6);
    }

    #[test]
    fn should_find_machine_by_name() {
        let registry = sample();
        assert_eq!(
            registry.machine("Schuler2").map(|m| m.source_id),
            Some(SourceId::new(1028))
        );
        assert!(registry.machine("Schuler9").is_none());
    }

    #[test]
    fn should_accept_duplicate_elements() {
        let registry = Registry::builder()
            .machine("Schuler1", SourceId::new(982))
            .element(ElementId::new(69))
            .element(ElementId::new(69))
            .build()
            .unwrap();
        assert_eq!(registry.cell_count(), 2);
    }

    #[test]
    fn should_reject_duplicate_machine_names() {
        let result = Registry::builder()
            .machine("Schuler1", SourceId::new(982))
            .machine("Schuler1", SourceId::new(1028))
            .element(ElementId::new(69))
            .build();
        assert!(matches!(
            result,
            Err(LastValueError::Validation(ValidationError::DuplicateMachine(name))) if name == "Schuler1"
        ));
    }

    #[test]
    fn should_reject_empty_machine_name() {
        let result = Registry::builder()
            .machine("  ", SourceId::new(982))
            .element(ElementId::new(69))
            .build();
        assert!(matches!(
            result,
            Err(LastValueError::Validation(ValidationError::EmptyMachineName))
        ));
    }

    #[test]
    fn should_reject_registry_without_machines_or_elements() {
        let no_machines = Registry::builder().element(ElementId::new(69)).build();
        assert!(matches!(
            no_machines,
            Err(LastValueError::Validation(ValidationError::NoMachines))
        ));

        let no_elements = Registry::builder()
            .machine("Schuler1", SourceId::new(982))
            .build();
        assert!(matches!(
            no_elements,
            Err(LastValueError::Validation(ValidationError::NoElements))
        ));
    }
}
