use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use miskatonic_core::config::AppConfig;
use miskatonic_core::merger::MergePolicy;

#[derive(Debug, Parser)]
#[command(name = "miskatonic-import")]
#[command(about = "Clean, canonicalize and deduplicate a CSV of quiz questions")]
#[command(version, long_about = None)]
pub struct Args {
    /// CSV file with one question per row
    pub input: PathBuf,

    /// Write JSON batches here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep subjects exactly as written
    #[arg(long)]
    pub no_fix_subjects: bool,

    /// Minimum similarity (0-1) for folding a subject into a known one
    #[arg(long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Questions per output batch
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// How subject/use tags of duplicate rows are combined
    #[arg(long, value_enum)]
    pub merge_policy: Option<MergePolicyArg>,

    /// Log every merge and subject correction
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergePolicyArg {
    FirstSeen,
    UnionTags,
}

impl From<MergePolicyArg> for MergePolicy {
    fn from(arg: MergePolicyArg) -> Self {
        match arg {
            MergePolicyArg::FirstSeen => MergePolicy::FirstSeen,
            MergePolicyArg::UnionTags => MergePolicy::UnionTags,
        }
    }
}

impl Args {
    /// Layer command line flags over the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if self.no_fix_subjects {
            config.import.fix_subjects = false;
        }
        if let Some(threshold) = self.threshold {
            config.import.subject_similarity_threshold = threshold;
        }
        if let Some(batch_size) = self.batch_size {
            config.output.batch_size = batch_size;
        }
        if let Some(policy) = self.merge_policy {
            config.import.merge_policy = policy.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use miskatonic_core::config::ENV_BATCH_SIZE;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_leave_config_untouched() {
        let args = Args::try_parse_from(["miskatonic-import", "questions.csv"]).unwrap();
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config, AppConfig::default());
        assert!(!args.verbose);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "miskatonic-import",
            "questions.csv",
            "--no-fix-subjects",
            "--threshold",
            "0.8",
            "--batch-size",
            "25",
            "--merge-policy",
            "union-tags",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert!(!config.import.fix_subjects);
        assert_eq!(config.import.subject_similarity_threshold, 0.8);
        assert_eq!(config.output.batch_size, 25);
        assert_eq!(config.import.merge_policy, MergePolicy::UnionTags);
    }

    #[test]
    fn test_flag_overrides_invalid_env_value() {
        let mut config = AppConfig::default();
        config
            .apply_env(|key: &str| (key == ENV_BATCH_SIZE).then(|| "0".to_string()))
            .unwrap();
        assert!(config.validate().is_err());

        let args =
            Args::try_parse_from(["miskatonic-import", "q.csv", "--batch-size", "10"]).unwrap();
        args.apply(&mut config);
        assert_eq!(config.output.batch_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["miskatonic-import"]).is_err());
    }
}
