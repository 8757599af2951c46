//! Value records and rendered rows.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::id::{ElementId, SourceId};

/// The most recent observation for a (source, element) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRecord {
    pub source_id: SourceId,
    pub element_id: ElementId,
    pub value: String,
    pub timestamp: String,
}

/// A value together with the time it was observed.
///
/// Both halves come from the same record, so a row either has both or
/// neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub value: String,
    pub timestamp: String,
}

impl From<ValueRecord> for Reading {
    fn from(record: ValueRecord) -> Self {
        Self {
            value: record.value,
            timestamp: record.timestamp,
        }
    }
}

/// One machine × element cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub machine_name: String,
    pub source_id: SourceId,
    pub label: String,
    pub element_id: ElementId,
    pub reading: Option<Reading>,
}

impl Row {
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.reading.as_ref().map(|reading| reading.value.as_str())
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<&str> {
        self.reading.as_ref().map(|reading| reading.timestamp.as_str())
    }
}

// Serialized flat, with explicit nulls for a missing reading.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Row", 6)?;
        state.serialize_field("machineName", &self.machine_name)?;
        state.serialize_field("sourceId", &self.source_id)?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("elementId", &self.element_id)?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("timestamp", &self.timestamp())?;
        state.end()
    }
}
