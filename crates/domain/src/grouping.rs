//! Grouping of rows by machine, in registry order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::id::SourceId;
use crate::registry::Registry;
use crate::row::Row;

/// The rows of a single machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineGroup {
    #[serde(skip)]
    pub machine_name: String,
    pub source_id: SourceId,
    pub items: Vec<Row>,
}

/// Every configured machine with its rows.
///
/// Serializes as a JSON object keyed by machine name, keys in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MachineGroups(Vec<MachineGroup>);

impl MachineGroups {
    /// Split `rows` by machine. Every machine of `registry` gets a group, even
    /// when no row belongs to it; rows keep their relative order.
    #[must_use]
    pub fn from_rows(registry: &Registry, rows: Vec<Row>) -> Self {
        let mut groups: Vec<MachineGroup> = registry
            .machines()
            .iter()
            .map(|machine| MachineGroup {
                machine_name: machine.name.clone(),
                source_id: machine.source_id,
                items: Vec::with_capacity(registry.elements().len()),
            })
            .collect();

        for row in rows {
            if let Some(group) = groups
                .iter_mut()
                .find(|group| group.machine_name == row.machine_name)
            {
                group.items.push(row);
            }
        }

        Self(groups)
    }

    #[must_use]
    pub fn groups(&self) -> &[MachineGroup] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, machine_name: &str) -> Option<&MachineGroup> {
        self.0.iter().find(|group| group.machine_name == machine_name)
    }
}

impl Serialize for MachineGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in &self.0 {
            map.serialize_entry(&group.machine_name, group)?;
        }
        map.end()
    }
}
