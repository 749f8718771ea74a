mod args;

use anyhow::{Context, Result};
use cellio_lib::core::io::write_empty_json;
use cellio_lib::json::{merge_jsons_single_level, write_json};
use cellio_lib::utils;
use log::{info, warn};
use std::path::PathBuf;

pub use args::{MergeJsonArgs, MergeJsonConfig};

/// Execute the `merge-json` command end-to-end.
pub fn run_merge_json(args: MergeJsonArgs) -> Result<()> {
    let config: MergeJsonConfig = args.into();
    let output = utils::get_output_path(&config.output)?;

    let inputs: Vec<PathBuf> = if config.skip_missing {
        config
            .inputs
            .iter()
            .filter_map(|p| match utils::get_input_path(p, false) {
                Ok(path) => Some(path),
                Err(err) => {
                    warn!("Skipping input: {}", err);
                    None
                }
            })
            .collect()
    } else {
        utils::get_input_paths(&config.inputs)?
    };

    if inputs.is_empty() {
        warn!("No JSON inputs found; writing an empty object");
        write_empty_json(&output)?;
        return Ok(());
    }

    info!("Merging {} JSON files into {:?}", inputs.len(), output);
    let merged = merge_jsons_single_level(&inputs)
        .with_context(|| format!("Failed to merge {} JSON files", inputs.len()))?;
    write_json(&output, &merged)?;
    info!("Merge complete -> {:?}", output);
    Ok(())
}
