//! Generation orchestrator.
//!
//! One task is planned per data source, one per resource and one for the
//! provider aggregate. Tasks share nothing mutable and run in parallel on
//! rayon's pool; each ends with its own atomic write. A failed task is
//! recorded in the [`GenerationReport`] and never cancels its siblings.
//!
//! ## Output Layout
//!
//! ```text
//! <output>/
//! ├── data_source_<name>.rs   # one per data source
//! ├── resource_<name>.rs      # one per resource
//! └── provider_gen.rs         # constructor tables for every entity
//! ```

use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use providergen_define::{DataSource, Definitions, Resource};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::codegen::{generate_data_source, generate_provider, generate_resource};
use crate::errors::GeneratorError;
use crate::naming::{data_source_module_name, resource_module_name};
use crate::output::GeneratedFile;
use crate::validation::{check_unique_entities, validate_data_source, validate_resource};

/// File stem of the provider aggregate.
pub const PROVIDER_MODULE: &str = "provider_gen";

/// Options for a generation run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Directory receiving the generated files.
    pub output_dir: PathBuf,
    /// Only generate the entity with this name (the aggregate is always generated).
    pub filter: Option<String>,
    /// Render everything but write nothing.
    pub dry_run: bool,
}

/// A unit of generation work.
#[derive(Debug, Clone, Copy)]
pub enum GenerationTask<'a> {
    DataSource(&'a DataSource),
    Resource(&'a Resource),
    /// The aggregate always covers the complete definition set.
    Provider(&'a Definitions),
}

impl GenerationTask<'_> {
    /// Module name of the file this task produces, e.g. `resource_team`.
    pub fn module_name(&self) -> String {
        match self {
            Self::DataSource(ds) => data_source_module_name(&ds.name),
            Self::Resource(r) => resource_module_name(&r.name),
            Self::Provider(_) => PROVIDER_MODULE.to_string(),
        }
    }

    /// Validates the entity and generates its tokens.
    ///
    /// ## Errors
    ///
    /// Any validation or code generation error for this task's entity.
    pub fn generate(&self) -> Result<TokenStream, GeneratorError> {
        match self {
            Self::DataSource(ds) => {
                validate_data_source(ds)?;
                generate_data_source(ds)
            }
            Self::Resource(r) => {
                validate_resource(r)?;
                generate_resource(r)
            }
            Self::Provider(definitions) => generate_provider(definitions),
        }
    }

    /// Generates, validates and formats this task's file under `output_dir`.
    ///
    /// ## Errors
    ///
    /// See [`GenerationTask::generate`]; also `GeneratorError::CodeGenError`
    /// if the assembled tokens are not a valid Rust file.
    pub fn render(&self, output_dir: &Path) -> Result<GeneratedFile, GeneratorError> {
        let tokens = self.generate()?;
        let path = output_dir.join(format!("{}.rs", self.module_name()));
        GeneratedFile::render(path, &tokens)
    }
}

/// A task that did not produce its file.
#[derive(Debug)]
pub struct TaskFailure {
    /// Module name of the task, e.g. `data_source_project`.
    pub task: String,
    pub error: GeneratorError,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Rendered files, sorted by path. Written to disk unless the run was a dry run.
    pub files: Vec<GeneratedFile>,
    /// Failed tasks, sorted by task name.
    pub failures: Vec<TaskFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts a report with failures into `GeneratorError::TasksFailed`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::TasksFailed` listing every failed task.
    pub fn into_result(self) -> Result<Vec<GeneratedFile>, GeneratorError> {
        if self.failures.is_empty() {
            Ok(self.files)
        } else {
            Err(GeneratorError::TasksFailed {
                failures: self.failures.into_iter().map(|f| f.task).collect(),
            })
        }
    }
}

/// Plans the tasks for `definitions`, honoring an optional entity `filter`.
///
/// Entity tasks are ordered by kind and then name; the aggregate comes last.
///
/// A filter that matches no entity is an error rather than a successful
/// aggregate-only run: nothing is planned, not even `provider_gen.rs`.
///
/// ## Errors
///
/// - `GeneratorError::DuplicateEntity` if two entities of one kind share a name
/// - `GeneratorError::ConfigError` if `filter` matches no entity
pub fn plan_tasks<'a>(
    definitions: &'a Definitions,
    filter: Option<&str>,
) -> Result<Vec<GenerationTask<'a>>, GeneratorError> {
    check_unique_entities("data source", definitions.data_sources.iter().map(|d| d.name.as_str()))?;
    check_unique_entities("resource", definitions.resources.iter().map(|r| r.name.as_str()))?;

    let selected = |name: &str| filter.is_none_or(|f| f == name);

    let mut data_sources: Vec<&DataSource> = definitions.data_sources.iter().filter(|d| selected(&d.name)).collect();
    data_sources.sort_by(|a, b| a.name.cmp(&b.name));
    let mut resources: Vec<&Resource> = definitions.resources.iter().filter(|r| selected(&r.name)).collect();
    resources.sort_by(|a, b| a.name.cmp(&b.name));

    if let Some(name) = filter
        && data_sources.is_empty()
        && resources.is_empty()
    {
        return Err(GeneratorError::ConfigError(format!(
            "No data source or resource named '{}'",
            name
        )));
    }

    let mut tasks: Vec<GenerationTask<'a>> = data_sources.into_iter().map(GenerationTask::DataSource).collect();
    tasks.extend(resources.into_iter().map(GenerationTask::Resource));
    tasks.push(GenerationTask::Provider(definitions));
    Ok(tasks)
}

/// Runs every planned task in parallel and collects the outcome.
///
/// ## Errors
///
/// Only planning errors are returned here; per-task failures are reported
/// in [`GenerationReport::failures`].
pub fn run(definitions: &Definitions, options: &RunOptions) -> Result<GenerationReport, GeneratorError> {
    let tasks = plan_tasks(definitions, options.filter.as_deref())?;
    debug!(tasks = tasks.len(), dry_run = options.dry_run, "planned generation tasks");

    let outcomes: Vec<(String, Result<GeneratedFile, GeneratorError>)> = tasks
        .par_iter()
        .map(|task| {
            let outcome = task.render(&options.output_dir).and_then(|file| {
                if !options.dry_run {
                    file.write()?;
                }
                Ok(file)
            });
            (task.module_name(), outcome)
        })
        .collect();

    let mut report = GenerationReport::default();
    for (task, outcome) in outcomes {
        match outcome {
            Ok(file) => {
                info!(task = %task, path = %file.path.display(), "generated");
                report.files.push(file);
            }
            Err(error) => {
                warn!(task = %task, error = %error, "generation task failed");
                report.failures.push(TaskFailure { task, error });
            }
        }
    }

    report.files.sort_by(|a, b| a.path.cmp(&b.path));
    report.failures.sort_by(|a, b| a.task.cmp(&b.task));
    Ok(report)
}
