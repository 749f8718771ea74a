use anyhow::Result;
use cellio_lib::utils;
use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

/// CLI arguments for the `concat` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "concat")]
pub struct ConcatArgs {
    /// Files to concatenate, in order.
    #[structopt(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output path.
    #[structopt(long, short = "o")]
    pub output: PathBuf,

    /// Inputs share a header line: keep the first, require the rest to match.
    #[structopt(long, short = "H")]
    pub headered: bool,
}

/// Concatenate files, optionally de-duplicating a shared header line.
pub fn run_concat(args: ConcatArgs) -> Result<()> {
    let inputs = utils::get_input_paths(&args.inputs)?;
    let output = utils::get_output_path(&args.output)?;

    if args.headered {
        utils::concatenate_headered_files(&output, &inputs)?;
    } else {
        utils::concatenate_files(&output, &inputs)?;
    }
    info!("Wrote {:?}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_headered_flag() {
        let args =
            ConcatArgs::from_iter_safe(&["concat", "a.csv", "b.csv", "-o", "out.csv", "-H"])
                .unwrap();
        assert_eq!(args.inputs.len(), 2);
        assert!(args.headered);
    }

    #[test]
    fn test_run_concat_headered() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "barcode,umis\nAAAC-1,10\n").unwrap();
        fs::write(&b, "barcode,umis\nTTTG-1,3\n").unwrap();
        let output = dir.path().join("out.csv");

        run_concat(ConcatArgs {
            inputs: vec![a, b],
            output: output.clone(),
            headered: true,
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "barcode,umis\nAAAC-1,10\nTTTG-1,3\n"
        );
    }
}
