mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use jidhr_pipeline::{run_merge, run_visualize, Orchestrator, TableOptions};
use tracing::{error, info, warn, Dispatch};

use logging::Verbosity;

#[derive(Parser, Debug)]
#[command(
    name = "jidhr",
    author,
    version,
    about = "Builds derivation trees for word roots from lemma and relation tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log per-root detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Field delimiter of every table read or written (`tab` for TSV)
    #[arg(
        long,
        global = true,
        value_name = "CHAR",
        default_value = ",",
        value_parser = parse_delimiter
    )]
    delimiter: u8,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join the relation table with the lemma table
    Merge {
        #[arg(value_name = "RELATIONS")]
        relations: PathBuf,
        #[arg(value_name = "LEMMAS")]
        lemmas: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Build one derivation tree per root and write it flattened
    Build {
        #[arg(value_name = "MERGED")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Render one Graphviz page per root of a flattened tree table
    Visualize {
        #[arg(value_name = "TREES")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Run merge, build and visualize in sequence, writing into OUT_DIR
    Pipeline {
        #[arg(value_name = "RELATIONS")]
        relations: PathBuf,
        #[arg(value_name = "LEMMAS")]
        lemmas: PathBuf,
        #[arg(value_name = "OUT_DIR")]
        out_dir: PathBuf,
    },
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!("expected a single ASCII character, got '{value}'")),
        },
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_status(&err));
        }
    };

    let log = logging::dispatch(cli.verbosity());
    let options = TableOptions { delimiter: cli.delimiter };

    let status = tracing::dispatcher::with_default(&log, || execute(&cli.command, &log, &options));
    ExitCode::from(status)
}

/// Exit status for a rejected command line: help and version are not
/// failures, every usage error exits with 1 rather than clap's 2.
fn usage_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Runs one subcommand and returns the process exit status.
fn execute(command: &Command, log: &Dispatch, options: &TableOptions) -> u8 {
    match run(command, log, options) {
        Ok(()) => 0,
        Err(err) => {
            error!("{:#}", err);
            1
        }
    }
}

fn run(command: &Command, log: &Dispatch, options: &TableOptions) -> anyhow::Result<()> {
    match command {
        Command::Merge { relations, lemmas, output } => merge(relations, lemmas, output, options),
        Command::Build { input, output } => build(input, output, log, options),
        Command::Visualize { input, output } => visualize(input, output, options),
        Command::Pipeline { relations, lemmas, out_dir } => {
            pipeline(relations, lemmas, out_dir, log, options);
            Ok(())
        }
    }
}

fn merge(relations: &Path, lemmas: &Path, output: &Path, options: &TableOptions) -> anyhow::Result<()> {
    run_merge(relations, lemmas, output, options).context("Error during merging process")?;
    info!("Merge process completed successfully.");
    Ok(())
}

fn build(input: &Path, output: &Path, log: &Dispatch, options: &TableOptions) -> anyhow::Result<()> {
    let report = Orchestrator::new(log.clone())
        .with_options(*options)
        .run_file(input, output)
        .context("Error during build process")?;

    if !report.warnings.is_empty() {
        warn!(
            skipped = report.warnings.len(),
            trees = report.trees,
            "Some roots had no ROOT row and were left out"
        );
    }
    Ok(())
}

fn visualize(input: &Path, output: &Path, options: &TableOptions) -> anyhow::Result<()> {
    run_visualize(input, output, options).context("Error during visualization")?;
    Ok(())
}

/// Runs the three stages in order. A failing stage is reported and the next
/// one still runs; nothing is propagated to the caller.
fn pipeline(relations: &Path, lemmas: &Path, out_dir: &Path, log: &Dispatch, options: &TableOptions) {
    let merged = out_dir.join("merged.csv");
    let trees = out_dir.join("trees.csv");
    let pages = out_dir.join("trees.dot");

    let stages: [(&str, &dyn Fn() -> anyhow::Result<()>); 3] = [
        ("merge", &|| merge(relations, lemmas, &merged, options)),
        ("build", &|| build(&merged, &trees, log, options)),
        ("visualize", &|| visualize(&trees, &pages, options)),
    ];

    for (name, stage) in stages {
        println!("⚙️  Running {name}...");
        match stage() {
            Ok(()) => println!("✅ {name} completed successfully.\n"),
            Err(err) => {
                error!("{:#}", err);
                println!("❌ Error occurred while running {name}: {err:#}\n");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_each_stage_takes_its_positional_paths() {
        let cli = Cli::try_parse_from(["jidhr", "build", "in.csv", "out.csv"]).unwrap();
        assert!(matches!(cli.command, Command::Build { .. }));
        assert_eq!(cli.delimiter, b',');
        assert_eq!(cli.verbosity(), Verbosity::Normal);

        let cli = Cli::try_parse_from(["jidhr", "merge", "r.csv", "l.csv", "m.csv", "-v"]).unwrap();
        assert!(matches!(cli.command, Command::Merge { .. }));
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_wrong_argument_count_is_a_usage_error() {
        assert!(Cli::try_parse_from(["jidhr", "build", "in.csv"]).is_err());
        assert!(Cli::try_parse_from(["jidhr", "build", "a", "b", "c"]).is_err());
        assert!(Cli::try_parse_from(["jidhr", "merge", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["jidhr", "-v", "-q", "build", "a", "b"]).is_err());
    }

    #[test]
    fn test_usage_errors_exit_one_and_help_exits_zero() {
        let status = |args: &[&str]| usage_status(&Cli::try_parse_from(args).unwrap_err());

        assert_eq!(status(&["jidhr", "--help"]), 0);
        assert_eq!(status(&["jidhr", "build", "--help"]), 0);
        assert_eq!(status(&["jidhr", "--version"]), 0);
        assert_eq!(status(&["jidhr", "build", "in.csv"]), 1);
        assert_eq!(status(&["jidhr", "visualize", "a", "b", "c"]), 1);
        assert_eq!(status(&["jidhr", "frobnicate"]), 1);
        assert_eq!(status(&["jidhr"]), 1);
    }

    #[test]
    fn test_failing_stage_exits_one() {
        let dir = TempDir::new().unwrap();
        let build = Command::Build {
            input: dir.path().join("absent.csv"),
            output: dir.path().join("trees.csv"),
        };

        assert_eq!(execute(&build, &Dispatch::none(), &TableOptions::default()), 1);
        assert!(!dir.path().join("trees.csv").exists());
    }

    #[test]
    fn test_pipeline_exits_zero_even_when_stages_fail() {
        let dir = TempDir::new().unwrap();
        let pipeline = Command::Pipeline {
            relations: dir.path().join("absent-relations.csv"),
            lemmas: dir.path().join("absent-lemmas.csv"),
            out_dir: dir.path().join("out"),
        };

        assert_eq!(execute(&pipeline, &Dispatch::none(), &TableOptions::default()), 0);
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("،").is_err());
    }

    #[test]
    fn test_pipeline_writes_every_stage_output() {
        let dir = TempDir::new().unwrap();
        let relations = dir.path().join("relations.csv");
        let lemmas = dir.path().join("lemmas.csv");
        fs::write(
            &relations,
            "POS,PATTERN_ABSTRACT,CHILD_DER_CAT,FUNCTION,PARENT_POS,PARENT_PATTERN_ABSTRACT\n\
             ROOT,ROOT,VERBAL,,,\n\
             VERB,CaCaCa,NOMINAL,ACTION,ROOT,ROOT\n\
             NOUN,maCCaC,,PLACE,VERB,CaCaCa\n",
        )
        .unwrap();
        fs::write(
            &lemmas,
            "ROOT,LEMMA,LEMMA_ARA,POS,PATTERN_ABSTRACT,GLOSS\n\
             ktb,kataba,كتب,VERB,CaCaCa,write\n\
             ktb,maktab,مكتب,NOUN,maCCaC,office\n",
        )
        .unwrap();
        let out_dir = dir.path().join("out");

        pipeline(&relations, &lemmas, &out_dir, &Dispatch::none(), &TableOptions::default());

        let trees = fs::read_to_string(out_dir.join("trees.csv")).unwrap();
        assert_eq!(trees.lines().count(), 3);
        assert!(trees.contains("ktb,maktab,NOUN,مكتب,,office,PLACE,maCCaC,kataba,VERB,كتب,NOMINAL,write,ACTION,CaCaCa"));
        let pages = fs::read_to_string(out_dir.join("trees.dot")).unwrap();
        assert_eq!(pages.matches("digraph ").count(), 1);
    }

    #[test]
    fn test_pipeline_reports_failures_without_panicking() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("out");

        pipeline(
            &dir.path().join("missing-relations.csv"),
            &dir.path().join("missing-lemmas.csv"),
            &out_dir,
            &Dispatch::none(),
            &TableOptions::default(),
        );

        assert!(!out_dir.join("trees.csv").exists());
        assert!(!out_dir.join("trees.dot").exists());
    }
}
