//! The contract between the available data sources and a chosen field.
//!
//! A [`Catalog`] is the point-in-time list of sources a target may map from
//! (globals followed by resolver output). Choices made against it are validated
//! here; an invalid choice produces nothing rather than an error.

use crate::graph::FieldDescriptor;
use crate::source::DataSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reference to one field on one data source. Never a copy of the field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillSelection {
    pub data_source_id: String,
    pub source_field_key: String,
}

/// Target field key -> selection. An absent key means the field is unmapped.
pub type FieldPrefillMapping = BTreeMap<String, PrefillSelection>;

/// Scope id (a node id) -> that scope's field mappings. This is the whole persisted state.
pub type PrefillMappingsByForm = BTreeMap<String, FieldPrefillMapping>;

impl PrefillSelection {
    pub fn new(data_source_id: &str, source_field_key: &str) -> Self {
        Self {
            data_source_id: data_source_id.to_string(),
            source_field_key: source_field_key.to_string(),
        }
    }
}

/// A validated choice, carrying the chosen field's descriptor for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedField<'a> {
    pub selection: PrefillSelection,
    pub source: &'a DataSource,
    pub field: &'a FieldDescriptor,
}

/// The data sources available to one target, in presentation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    sources: Vec<DataSource>,
}

impl Catalog {
    /// Globals first, then the resolved upstream sources.
    pub fn new(globals: Vec<DataSource>, resolved: Vec<DataSource>) -> Self {
        let mut sources = globals;
        sources.extend(resolved);
        Self { sources }
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn get(&self, data_source_id: &str) -> Option<&DataSource> {
        self.sources.iter().find(|s| s.id == data_source_id)
    }

    /// Validates a `(data source, field)` choice against the catalog.
    pub fn select(&self, data_source_id: &str, field_key: &str) -> Option<SelectedField<'_>> {
        let source = self.get(data_source_id)?;
        let field = source.field(field_key)?;
        Some(SelectedField {
            selection: PrefillSelection::new(&source.id, field_key),
            source,
            field,
        })
    }

    /// `"<field_key>: <source name>.<source field>"`. The source name falls back
    /// to the selection's data source id while the catalog does not know it.
    pub fn label(&self, field_key: &str, selection: &PrefillSelection) -> String {
        let source_name = self
            .get(&selection.data_source_id)
            .map(|s| s.name.as_str())
            .unwrap_or(&selection.data_source_id);
        format!(
            "{}: {}.{}",
            field_key, source_name, selection.source_field_key
        )
    }

    /// Labels for every mapped field of a scope, in field-key order.
    pub fn labels(&self, mapping: &FieldPrefillMapping) -> Vec<String> {
        mapping
            .iter()
            .map(|(field_key, selection)| self.label(field_key, selection))
            .collect()
    }
}

/// The pending choice inside a selection dialog.
///
/// Confirmation is only possible once the choice resolves against the catalog.
#[derive(Debug, Clone, Default)]
pub struct Picker {
    expanded: Option<String>,
    choice: Option<(String, String)>,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the given source, or closes it if it is already open.
    pub fn toggle(&mut self, data_source_id: &str) {
        if self.expanded.as_deref() == Some(data_source_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(data_source_id.to_string());
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn choose(&mut self, data_source_id: &str, field_key: &str) {
        self.choice = Some((data_source_id.to_string(), field_key.to_string()));
    }

    pub fn is_chosen(&self, data_source_id: &str, field_key: &str) -> bool {
        self.choice
            .as_ref()
            .is_some_and(|(ds, key)| ds == data_source_id && key == field_key)
    }

    pub fn can_confirm(&self, catalog: &Catalog) -> bool {
        self.confirm(catalog).is_some()
    }

    pub fn confirm<'c>(&self, catalog: &'c Catalog) -> Option<SelectedField<'c>> {
        let (data_source_id, field_key) = self.choice.as_ref()?;
        catalog.select(data_source_id, field_key)
    }
}
