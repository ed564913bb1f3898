//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the prefill crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use prefill::prelude::*;
//!
//! # fn run_example(graph: &Graph) {
//! let sources = resolve_data_sources(graph, "form-1");
//! println!("{} upstream sources", sources.len());
//! # }
//! ```

// Graph model
pub use crate::graph::{
    FieldDescriptor, FieldKind, FieldMap, FieldSchema, Graph, GraphEdge, GraphForm, GraphNode,
    NodeData,
};

// Resolution and selection
pub use crate::resolver::{Resolver, resolve_data_sources};
pub use crate::selection::{
    Catalog, FieldPrefillMapping, Picker, PrefillMappingsByForm, PrefillSelection, SelectedField,
};
pub use crate::source::{DataSource, DataSourceKind, GlobalSources, StaticGlobalSources};

// Persistence
pub use crate::store::{FileMedium, KeyValueMedium, MemoryMedium, PrefillStore};

// Collaborators and session
pub use crate::fetch::GraphSource;
pub use crate::session::{FieldView, FormView, LoadTicket, Session};

// Error types
pub use crate::error::{FetchBody, FetchError, MediumError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
