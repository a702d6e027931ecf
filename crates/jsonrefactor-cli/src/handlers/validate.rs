//! Validation command handler

use super::utils::load_mapping;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use jsonrefactor_core::{MappingSpec, RefactorConfig, TargetDescriptor};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Summary printed for a valid mapping document
#[derive(Debug, Serialize, PartialEq)]
pub struct ValidationSummary {
    pub mapping: String,
    pub valid: bool,
    /// Top-level entries
    pub entries: usize,
    /// Entries at every nesting level
    pub total_entries: usize,
    pub iterations: usize,
    pub config: RefactorConfig,
}

impl ValidationSummary {
    fn new(mapping: String, spec: &MappingSpec) -> Self {
        let (total_entries, iterations) = count_entries(spec);
        Self {
            mapping,
            valid: true,
            entries: spec.len(),
            total_entries,
            iterations,
            config: *spec.config(),
        }
    }
}

fn count_entries(spec: &MappingSpec) -> (usize, usize) {
    spec.entries()
        .iter()
        .fold((0, 0), |(total, iterations), entry| match &entry.target {
            TargetDescriptor::Iteration(iteration) => {
                let (nested_total, nested_iterations) = count_entries(&iteration.map);
                (total + 1 + nested_total, iterations + 1 + nested_iterations)
            }
            _ => (total + 1, iterations),
        })
}

/// Handle the validate command
#[instrument(skip(_config, output), fields(file = %args.mapping.display()))]
pub fn handle_validate(args: ValidateArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.mapping.display()));
    info!("Starting validation");
    output.info(&format!("Validating mapping: {}", args.mapping.display()))?;

    let spec = load_mapping(&args.mapping).inspect_err(|e| warn!("Validation failed: {}", e))?;

    let summary = ValidationSummary::new(args.mapping.display().to_string(), &spec);
    info!(entries = summary.entries, total = summary.total_entries, "Validation completed successfully");

    output.success(&format!("✓ Mapping is valid ({} entries)", summary.entries))?;
    output.data(&summary)
}
