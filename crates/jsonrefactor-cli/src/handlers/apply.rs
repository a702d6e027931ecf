//! Apply command handler

use super::utils::{load_document, load_mapping, read_input};
use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use jsonrefactor_core::{refactor_into, RefactorConfig};
use serde_json::{Map, Value};
use std::io::{self, Read};
use tracing::{debug, info, instrument};

/// Handle the apply command, reading the input from stdin when `--input` is absent
pub fn handle_apply(args: ApplyArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    apply_with_stdin(args, config, output, io::stdin().lock())
}

#[instrument(skip(config, output, stdin), fields(mapping = %args.mapping.display()))]
fn apply_with_stdin(args: ApplyArgs, config: &Config, output: &mut OutputWriter, stdin: impl Read) -> Result<()> {
    let timer = Timer::with_details("apply_command", &format!("mapping: {}", args.mapping.display()));
    output.info(&format!("Applying mapping: {}", args.mapping.display()))?;

    let spec = load_mapping(&args.mapping)?;
    let options = effective_options(spec.config(), &config.refactor, &args);
    debug!(entries = spec.len(), ?options, "Mapping loaded");
    let spec = spec.with_config(options);

    let source = read_input(args.input.as_deref(), stdin)?;
    let mut target = match &args.target {
        Some(path) => load_document(path)?,
        None => Value::Object(Map::new()),
    };

    refactor_into(&source, &spec, &mut target)?;
    info!(elapsed_ms = timer.elapsed().as_millis() as u64, "Refactor completed");

    if target.as_object().is_some_and(Map::is_empty) {
        output.warning("Mapping produced an empty record")?;
    }

    match &args.save_to {
        Some(path) => {
            output.save(path, &target)?;
            output.success(&format!("✓ Saved result to {}", path.display()))?;
        }
        None => {
            debug!(format = ?output.format(), "Writing result to stdout");
            output.data(&target)?;
        }
    }

    Ok(())
}

/// Options for the top-level mapping
///
/// The document, the configuration file and the command line can each turn
/// an option on; none of them can turn off what another enabled. Nested
/// mappings keep their own options.
fn effective_options(document: &RefactorConfig, file: &RefactorConfig, args: &ApplyArgs) -> RefactorConfig {
    RefactorConfig {
        set_undefined: document.set_undefined || file.set_undefined || args.set_undefined,
        strict_paths: document.strict_paths || file.strict_paths || args.strict_paths,
    }
}
