use anyhow::Result;
use comfy_table::Table;
use tracing::error;

use echem_cli::pipeline::{
    ConversionResult, InputConfig, Inspection, OutputConfig, convert_file, inspect_file,
};
use echem_ingest::default_registry;
use echem_transform::{AliasPolicy, converter_for};

use crate::cli::{ConvertArgs, InputArgs, InspectArgs};
use crate::summary::apply_table_style;

pub fn run_devices() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Device", "Description", "Renames"]);
    apply_table_style(&mut table);
    for device in default_registry().devices() {
        let renames: Vec<String> = converter_for(device)
            .rename_map()
            .iter()
            .map(|(from, to)| format!("{from} -> {to}"))
            .collect();
        table.add_row(vec![
            device.to_string(),
            device.description().to_string(),
            if renames.is_empty() {
                "-".to_string()
            } else {
                renames.join(", ")
            },
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Converts every file, collecting failures instead of stopping at the first.
pub fn run_convert(args: &ConvertArgs) -> (Vec<ConversionResult>, Vec<String>) {
    let input = input_config(&args.input);
    let output = OutputConfig {
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
        policy: if args.first_match {
            AliasPolicy::FirstMatch
        } else {
            AliasPolicy::AllPresent
        },
    };

    let mut results = Vec::new();
    let mut failures = Vec::new();
    for path in &args.files {
        match convert_file(path, &input, &output) {
            Ok(result) => results.push(result),
            Err(err) => {
                error!(path = %path.display(), "Conversion failed: {err:#}");
                failures.push(format!("{}: {err:#}", path.display()));
            }
        }
    }
    (results, failures)
}

pub fn run_inspect(args: &InspectArgs) -> Result<Inspection> {
    inspect_file(&args.file, &input_config(&args.input))
}

fn input_config(args: &InputArgs) -> InputConfig {
    InputConfig {
        device: args.device,
        metadata: args.metadata.clone(),
        encoding: args.encoding.clone(),
    }
}
