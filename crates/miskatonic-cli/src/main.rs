mod cli;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use miskatonic_core::config::AppConfig;
use miskatonic_core::models::CanonicalQuestion;
use miskatonic_core::{import_file, report, ImportError};

use crate::cli::Args;

const DEFAULT_LOG_FILTER: &str = "miskatonic_import=info,miskatonic_core=info";
const VERBOSE_LOG_FILTER: &str = "miskatonic_import=debug,miskatonic_core=debug";

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, input = %args.input.display(), "Import failed");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Logs go to stderr; stdout may carry the JSON output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ImportError> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    tracing::info!(
        input = %args.input.display(),
        fix_subjects = config.import.fix_subjects,
        threshold = config.import.subject_similarity_threshold,
        batch_size = config.output.batch_size,
        "Starting import"
    );

    let outcome = import_file(&args.input, &config.import)?;

    let batch_count = match &args.output {
        Some(path) => write_batches(
            BufWriter::new(File::create(path)?),
            &outcome.questions,
            config.output.batch_size,
        )?,
        None => write_batches(io::stdout().lock(), &outcome.questions, config.output.batch_size)?,
    };

    tracing::info!(batches = batch_count, "{}", report::summary(&outcome.stats));
    Ok(())
}

/// Write one JSON array per line, one line per insert batch.
fn write_batches<W: Write>(
    mut out: W,
    questions: &[CanonicalQuestion],
    batch_size: usize,
) -> Result<usize, ImportError> {
    let mut count = 0;
    for batch in report::batches(questions, batch_size) {
        serde_json::to_writer(&mut out, batch).map_err(io::Error::from)?;
        out.write_all(b"\n")?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

fn exit_code(err: &ImportError) -> u8 {
    match err {
        ImportError::Io(e) if e.kind() == io::ErrorKind::NotFound => 1,
        e if e.is_input_error() => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miskatonic_core::models::QuestionStatus;
    use std::path::PathBuf;

    fn question(text: &str) -> CanonicalQuestion {
        CanonicalQuestion {
            question: text.into(),
            subjects: vec!["Geo".into()],
            uses: vec![],
            responses: vec!["Paris".into()],
            corrects: vec!["Paris".into()],
            remark: None,
            status: QuestionStatus::Active,
        }
    }

    fn args(input: PathBuf, output: PathBuf, config: PathBuf) -> Args {
        Args {
            input,
            output: Some(output),
            config: Some(config),
            no_fix_subjects: false,
            threshold: None,
            batch_size: None,
            merge_policy: None,
            verbose: false,
        }
    }

    fn write_config(dir: &std::path::Path, batch_size: usize) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            format!(
                "[import]\nfix_subjects = true\nsubject_similarity_threshold = 0.9\n\n[output]\nbatch_size = {batch_size}\n"
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn test_write_batches_one_line_per_batch() {
        let qs = vec![question("a"), question("b"), question("c")];
        let mut buf = Vec::new();
        let count = write_batches(&mut buf, &qs, 2).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.as_array().unwrap().len(), 2);
        assert_eq!(first[0]["question"], "a");
        assert_eq!(first[0]["status"], "active");
    }

    #[test]
    fn test_exit_codes() {
        let missing = ImportError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(exit_code(&missing), 1);
        assert_eq!(exit_code(&ImportError::MissingColumns(vec!["use".into()])), 2);
        assert_eq!(exit_code(&ImportError::Config("bad".into())), 3);
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("questions.csv");
        std::fs::write(
            &input,
            "question,subject,use,correct,responseA,responseB,responseC,responseD,remark\n\
             Capital of France?,Geographie,Quiz,A,Paris,Lyon,,,\n\
             capital of france,Géographie,Quiz,B,Paris,Lyon,,,\n\
             Largest ocean:,Géographie,Quiz,A,Pacific,Atlantic,,,\n",
        )
        .unwrap();
        let output = dir.path().join("out.jsonl");
        let config = write_config(dir.path(), 1);

        run(&args(input, output.clone(), config)).unwrap();

        let text = std::fs::read_to_string(output).unwrap();
        let batches: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0][0]["question"], "Capital of France");
        assert_eq!(batches[0][0]["corrects"], serde_json::json!(["Lyon", "Paris"]));
        assert_eq!(batches[1][0]["question"], "Largest ocean");
        assert_eq!(batches[1][0]["subject"], serde_json::json!(["Geographie"]));
    }

    #[test]
    fn test_run_missing_config_is_not_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("questions.csv");
        std::fs::write(&input, "question,subject,use,correct,responseA,responseB,responseC,responseD
")
            .unwrap();
        let err = run(&args(
            input,
            dir.path().join("out.jsonl"),
            dir.path().join("missing.toml"),
        ))
        .unwrap_err();
        assert!(matches!(err, ImportError::Config(_)));
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), 10);
        let err = run(&args(
            dir.path().join("nope.csv"),
            dir.path().join("out.jsonl"),
            config,
        ))
        .unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }
}
