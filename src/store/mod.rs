pub mod medium;

pub use medium::*;

use crate::selection::{FieldPrefillMapping, PrefillMappingsByForm, PrefillSelection, SelectedField};
use std::path::Path;
use tracing::{info, warn};

/// The well-known key the mappings are stored under.
pub const STORAGE_KEY: &str = "prefillMappings";

/// Persisted field -> source-field bindings, scoped per target node.
///
/// Every mutation is a read-modify-write of the whole persisted structure.
/// Failures of the backing medium are logged and swallowed: an unreadable or
/// corrupt value reads as empty, and a failed write leaves the previously
/// persisted state in place.
pub struct PrefillStore {
    medium: Box<dyn KeyValueMedium>,
    key: String,
}

impl PrefillStore {
    pub fn new(medium: impl KeyValueMedium + 'static) -> Self {
        Self {
            medium: Box::new(medium),
            key: STORAGE_KEY.to_string(),
        }
    }

    /// A store with no durability across restarts.
    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::new())
    }

    /// Opens a durable store in `dir`, falling back to memory when the
    /// directory cannot be used.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        match FileMedium::open(dir) {
            Ok(medium) => Self::new(medium),
            Err(e) => {
                info!(error = %e, "durable storage unavailable; using in-memory prefill store");
                Self::in_memory()
            }
        }
    }

    /// Stores under `key` instead of the default key.
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    pub fn is_durable(&self) -> bool {
        self.medium.is_durable()
    }

    pub fn get_all(&self) -> PrefillMappingsByForm {
        match self.medium.read(&self.key) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|| {
                warn!(key = %self.key, "stored prefill mappings are unreadable; treating as empty");
                PrefillMappingsByForm::new()
            }),
            Ok(None) => PrefillMappingsByForm::new(),
            Err(e) => {
                warn!(error = %e, "failed to read prefill mappings");
                PrefillMappingsByForm::new()
            }
        }
    }

    pub fn set_all(&mut self, mappings: &PrefillMappingsByForm) {
        let raw = match serde_json::to_string(mappings) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize prefill mappings");
                return;
            }
        };
        if let Err(e) = self.medium.write(&self.key, &raw) {
            warn!(error = %e, "failed to persist prefill mappings");
        }
    }

    pub fn get_for_form(&self, scope_id: &str) -> FieldPrefillMapping {
        self.get_all().remove(scope_id).unwrap_or_default()
    }

    /// Replaces the whole mapping of one scope, leaving other scopes untouched.
    pub fn set_for_form(&mut self, scope_id: &str, mapping: &FieldPrefillMapping) {
        let mut all = self.get_all();
        all.insert(scope_id.to_string(), mapping.clone());
        self.set_all(&all);
    }

    /// Upserts a single field's selection within a scope.
    pub fn set(&mut self, scope_id: &str, field_key: &str, selection: &PrefillSelection) {
        let mut all = self.get_all();
        all.entry(scope_id.to_string())
            .or_default()
            .insert(field_key.to_string(), selection.clone());
        self.set_all(&all);
    }

    /// Binds `field_key` to a choice validated by the selection protocol.
    pub fn apply(&mut self, scope_id: &str, field_key: &str, selected: &SelectedField<'_>) {
        self.set(scope_id, field_key, &selected.selection);
    }

    /// Removes a single field's selection. Missing scopes or fields are a no-op.
    pub fn remove(&mut self, scope_id: &str, field_key: &str) {
        let mut all = self.get_all();
        let Some(scope) = all.get_mut(scope_id) else {
            return;
        };
        if scope.remove(field_key).is_some() {
            self.set_all(&all);
        }
    }

    pub fn clear(&mut self) {
        self.set_all(&PrefillMappingsByForm::new());
    }
}

impl std::fmt::Debug for PrefillStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefillStore")
            .field("key", &self.key)
            .field("durable", &self.is_durable())
            .finish()
    }
}

/// Parses persisted content. JSON `null` reads as empty; anything else that
/// does not match the mapping shape is rejected.
fn decode(raw: &str) -> Option<PrefillMappingsByForm> {
    serde_json::from_str::<Option<PrefillMappingsByForm>>(raw)
        .ok()
        .map(Option::unwrap_or_default)
}
