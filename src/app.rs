use crate::cli::{PayloadArgs, PlanArgs};
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use survey_core::{ChoiceRecord, StandardPhase};
use survey_experiment::{Catalog, QueryParams, SavePayload, SessionBuilder, SessionPlan, SurveyConfig};
use tracing::info;

pub fn run_plan(args: &PlanArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SurveyConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SurveyConfig::default(),
    };
    args.apply(&mut config);

    let mut params = QueryParams::parse(&args.query);
    if let Some(ffp) = &args.ffp {
        params.set("ffp", ffp.as_str());
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut builder: SessionBuilder<'_, StandardPhase, StdRng> =
        SessionBuilder::new(config, Catalog::builtin(), rng)?;
    let plan = builder.build_plan(&params)?;

    info!(
        cohort = plan.metadata.ffp.index(),
        internal_pid = %plan.metadata.internal_pid,
        "writing session plan"
    );
    write_json(&plan, args.output.as_deref())
}

pub fn run_payload(args: &PayloadArgs) -> Result<()> {
    let plan: SessionPlan = read_json(&args.plan)?;
    let records: Vec<ChoiceRecord> = read_json(&args.records)?;
    info!(records = records.len(), "building save payload");

    let payload = SavePayload::new(&plan.metadata, records);
    write_json(&payload, args.output.as_deref())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("cannot parse {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, value).context("failed to write JSON")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
