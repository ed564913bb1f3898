use super::DataSource;
use crate::error::FetchError;
use crate::graph::{FieldDescriptor, FieldKind, FieldMap};

pub const ACTION_PROPERTIES_ID: &str = "global_action_props";
pub const CLIENT_ORG_PROPERTIES_ID: &str = "global_client_org_props";

/// Supplier of the global (non-graph) data sources.
///
/// Implementors may suspend (e.g. to call a remote catalog); the resolver and
/// store never depend on this trait directly.
#[allow(async_fn_in_trait)]
pub trait GlobalSources {
    async fn fetch(&self) -> Result<Vec<DataSource>, FetchError>;
}

/// A fixed, in-process catalog of global sources.
#[derive(Debug, Clone)]
pub struct StaticGlobalSources {
    sources: Vec<DataSource>,
}

impl StaticGlobalSources {
    pub fn new(sources: Vec<DataSource>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }
}

impl Default for StaticGlobalSources {
    /// The built-in action and client organisation property sets.
    fn default() -> Self {
        Self::new(vec![
            DataSource::global(
                ACTION_PROPERTIES_ID,
                "Action Properties",
                fields([
                    ("action_id", string("Action ID")),
                    ("action_name", string("Action Name")),
                    ("created_at", string("Created At").with_format("date-time")),
                    ("retries", number("Retry Count")),
                    ("success", boolean("Was Successful")),
                ]),
            ),
            DataSource::global(
                CLIENT_ORG_PROPERTIES_ID,
                "Client Organisation Properties",
                fields([
                    ("org_id", string("Organisation ID")),
                    ("org_name", string("Organisation Name")),
                    ("industry", string("Industry")),
                    ("employee_count", number("Employee Count")),
                    ("is_active", boolean("Active")),
                ]),
            ),
        ])
    }
}

impl GlobalSources for StaticGlobalSources {
    async fn fetch(&self) -> Result<Vec<DataSource>, FetchError> {
        Ok(self.sources.clone())
    }
}

fn fields<const N: usize>(entries: [(&str, FieldDescriptor); N]) -> FieldMap {
    entries
        .into_iter()
        .map(|(key, field)| (key.to_string(), field))
        .collect()
}

fn string(title: &str) -> FieldDescriptor {
    FieldDescriptor::new(FieldKind::String).with_title(title)
}

fn number(title: &str) -> FieldDescriptor {
    FieldDescriptor::new(FieldKind::Number).with_title(title)
}

fn boolean(title: &str) -> FieldDescriptor {
    FieldDescriptor::new(FieldKind::Boolean).with_title(title)
}
