//! Entity definitions: data sources and resources bound to remote API operations.

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// A read-only entity backed by a single read operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    /// External name, e.g. `all_projects`.
    pub name: String,
    pub description: String,
    pub api: DataSourceApi,
    #[serde(default)]
    pub generate: GenerateOptions,
    pub attributes: Vec<Attribute>,
}

/// Binding of a data source to its read operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceApi {
    /// Upstream record type the model is filled from.
    pub model: String,
    pub read_method: String,
    /// Top-level attribute names passed, in order, to the read operation.
    #[serde(default)]
    pub read_request_attributes: Vec<String>,
    #[serde(default)]
    pub read_strategy: ReadStrategy,
}

/// How a data source reads its records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadStrategy {
    /// One round trip returning one record.
    #[default]
    Simple,
    /// Follow the pagination cursor until exhausted, accumulating every page.
    Paginate(PaginateOptions),
}

/// Options for a paginated data-source read.
///
/// Hook fields hold verbatim code spliced into the read loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginateOptions {
    /// Element type of each page, defaults to the data source model.
    pub read_model: Option<String>,
    /// Runs once before the first request.
    pub read_init_loop: Option<String>,
    /// Runs at the top of every iteration.
    pub read_pre_iterate: Option<String>,
    /// Runs after the cursor has advanced.
    pub read_post_iterate: Option<String>,
}

/// Output toggles for a data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Emit `fill` operations on the generated models.
    pub model_fillers: bool,
}

/// A managed entity with a create/read/update/delete lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub description: String,
    pub api: ResourceApi,
    /// Attributes that make up the import identifier, in order.
    #[serde(default)]
    pub import_state_attributes: Vec<String>,
    pub attributes: Vec<Attribute>,
}

/// A single remote operation and the attributes passed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiOperation {
    pub method: String,
    #[serde(default)]
    pub request_attributes: Vec<String>,
}

impl ApiOperation {
    pub fn new<I, S>(method: impl Into<String>, request_attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: method.into(),
            request_attributes: request_attributes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Binding of a resource to its lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceApi {
    /// Upstream record type, defaults to the camel-cased resource name.
    #[serde(default)]
    pub model: Option<String>,
    pub create: ApiOperation,
    /// Direct read, or the list operation when `paginated_read` is set.
    pub read: ApiOperation,
    #[serde(default)]
    pub paginated_read: Option<PaginatedRead>,
    #[serde(default)]
    pub update: Option<ApiOperation>,
    #[serde(default)]
    pub delete: Option<ApiOperation>,
}

/// Reads a resource by listing pages and matching each item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatedRead {
    /// Item type of each page, defaults to the resource model.
    pub read_model: Option<String>,
    /// Response field holding the next cursor.
    pub cursor_field: String,
    /// Response field telling whether more pages exist.
    pub has_more_field: String,
    pub page_limit: u32,
    pub retry_attempts: u32,
    pub retry_delay_secs: u64,
    pub init_loop: Option<String>,
    pub pre_iterate: Option<String>,
    pub post_iterate: Option<String>,
}

impl Default for PaginatedRead {
    fn default() -> Self {
        Self {
            read_model: None,
            cursor_field: "last_id".to_string(),
            has_more_field: "has_more".to_string(),
            page_limit: 100,
            retry_attempts: 10,
            retry_delay_secs: 5,
            init_loop: None,
            pre_iterate: None,
            post_iterate: None,
        }
    }
}

/// Every declared entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definitions {
    pub data_sources: Vec<DataSource>,
    pub resources: Vec<Resource>,
}
