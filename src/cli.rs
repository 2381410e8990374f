use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use survey_core::Dimension;
use survey_experiment::SurveyConfig;
use survey_sampler::SamplingMode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds randomised lamp-design choice surveys")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter, e.g. "info" or "survey_sampler=debug"
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a participant's session plan and write it as JSON
    Plan(PlanArgs),
    /// Wrap recorded choices into the data-save payload
    Payload(PayloadArgs),
}

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// TOML config file; CLI flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Participant URL query string, e.g. "?ffp=2&PROLIFIC_PID=..."
    #[arg(long, default_value = "")]
    pub query: String,

    /// Cohort index, overrides `ffp` in the query
    #[arg(long)]
    pub ffp: Option<String>,

    /// Seed for reproducible plans
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub dimension: Option<Dimension>,

    /// Main experiment trial count
    #[arg(long)]
    pub trials: Option<usize>,

    #[arg(long)]
    pub training_trials: Option<usize>,

    #[arg(long)]
    pub per_trial: Option<usize>,

    /// Reject trials larger than the image pool
    #[arg(long)]
    pub strict: bool,

    /// Output file (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl PlanArgs {
    pub fn apply(&self, config: &mut SurveyConfig) {
        if let Some(dimension) = self.dimension {
            config.dimension = dimension;
        }
        if let Some(trials) = self.trials {
            config.experiment_trials = trials;
        }
        if let Some(trials) = self.training_trials {
            config.training_trials = trials;
        }
        if let Some(per_trial) = self.per_trial {
            config.images_per_trial = per_trial;
        }
        if self.strict {
            config.sampling = SamplingMode::Strict;
        }
    }
}

#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Plan previously written by `plan`
    #[arg(long)]
    pub plan: PathBuf,

    /// JSON array of recorded choices
    #[arg(long)]
    pub records: PathBuf,

    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
