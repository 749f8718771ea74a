use std::path::PathBuf;
use structopt::StructOpt;

/// CLI arguments for the `merge-json` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "merge-json")]
pub struct MergeJsonArgs {
    /// JSON files to merge, each holding one top-level object.
    #[structopt(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output path for the merged object.
    #[structopt(long, short = "o")]
    pub output: PathBuf,

    /// Skip inputs that do not exist instead of failing. With no inputs left, `{}` is written.
    #[structopt(long)]
    pub skip_missing: bool,
}

/// Normalised configuration derived from [`MergeJsonArgs`].
#[derive(Debug, Clone)]
pub struct MergeJsonConfig {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub skip_missing: bool,
}

impl From<MergeJsonArgs> for MergeJsonConfig {
    fn from(args: MergeJsonArgs) -> MergeJsonConfig {
        MergeJsonConfig {
            inputs: args.inputs,
            output: args.output,
            skip_missing: args.skip_missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inputs_and_output() {
        let args = MergeJsonArgs::from_iter_safe(&[
            "merge-json",
            "a.json",
            "b.json",
            "--output",
            "merged.json",
        ])
        .unwrap();

        assert_eq!(
            args.inputs,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
        assert_eq!(args.output, PathBuf::from("merged.json"));
        assert!(!args.skip_missing);
    }

    #[test]
    fn requires_inputs() {
        assert!(MergeJsonArgs::from_iter_safe(&["merge-json", "-o", "merged.json"]).is_err());
    }
}
