//! # Prefill - Upstream Data Sources for Workflow Forms
//!
//! **Prefill** lets each input field of a form inside a workflow graph be bound
//! to a field supplied by an upstream producer: another form earlier in the
//! graph, or a fixed global source.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Graph**: Deserialize the blueprint graph document into a [`graph::Graph`], or fetch it through a [`fetch::GraphSource`].
//! 2.  **Resolve**: Use a [`resolver::Resolver`] to compute the form-backed data sources upstream of a target node. Direct predecessors come first, transitive ones after.
//! 3.  **Select**: Combine global sources and resolved sources into a [`selection::Catalog`] and validate the user's `(source, field)` choice against it.
//! 4.  **Persist**: Record the binding in a [`store::PrefillStore`], which is scoped by node id and degrades to memory when no durable medium is available.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prefill::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph: Graph = serde_json::from_str(&std::fs::read_to_string("graph.json")?)?;
//!
//!     // Sources upstream of the node that hosts form "form-1".
//!     let resolved = Resolver::builder().with_max_depth(30).build().resolve(&graph, "form-1");
//!
//!     let globals = StaticGlobalSources::default().sources().to_vec();
//!     let catalog = Catalog::new(globals, resolved);
//!
//!     let mut store = PrefillStore::open(".prefill");
//!     if let Some(selected) = catalog.select("global_action_props", "action_id") {
//!         store.apply("node-1", "first_name", &selected);
//!     }
//!
//!     for label in catalog.labels(&store.get_for_form("node-1")) {
//!         println!("{}", label);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fetch;
pub mod graph;
pub mod prelude;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod source;
pub mod store;
