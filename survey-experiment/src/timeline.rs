use crate::catalog::Catalog;
use crate::cohort::Cohort;
use crate::config::SurveyConfig;
use crate::query::QueryParams;
use crate::session::{PhaseTimeline, SessionMetadata, SessionPlan};
use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use survey_core::{ChoiceTrial, ImageStimulus, Phase, Stimulus, TrialKind};
use survey_sampler::{Sampler, SamplingMode, insert_element};
use tracing::{debug, info};

pub const ATTENTION_CHECK_PROMPT: &str = "choose the image on the top right";
pub const ATTENTION_CHECK_INSTRUCTION: &str = "this is an attention check";

const CONSENT_TEXT: &str = "Introduction and Informed Consent. You are being invited to \
    participate in a research study titled \"Generative AI and Tangible Products: Human-AI \
    Design of 3D-printed lamps\". This study is being done by Dinuo LIAO from the TU Delft \
    as a master's student.";
const DURATION_TEXT: &str = "The study might take you around 25 minutes to complete. The data \
    will be used for benchmarking different AI systems, for scientific publication, and for \
    public communication. Note: There will be a few trials to check whether you are paying \
    attention to the task.";
const PRE_TRAINING_TEXT: &str = "You will now be given some example trials. Press enter to proceed.";
const POST_TRAINING_TEXT: &str = "You will now begin the main experiment. Press enter to proceed.";
const PRELOAD_TEXT: &str = "Please wait while images are loaded. This may take a few minutes. \
    Please DO NOT refresh the page.";
const FINAL_TEXT: &str = "You have completed the survey. Thank you for participating!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Demographics,
    Questionnaire,
}

/// Declarative step handed to the trial runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEntry {
    Preload {
        images: Vec<String>,
        max_load_time_ms: u64,
        continue_after_error: bool,
        message: String,
    },
    Instructions {
        pages: Vec<String>,
        show_clickable_nav: bool,
        allow_backward: bool,
    },
    Message {
        text: String,
    },
    Choice(ChoiceTrial),
    Form {
        form: FormKind,
    },
    /// Checkpoint at which collected responses are sent
    DataSave,
    Final {
        text: String,
        completion_url: Option<String>,
    },
}

impl TimelineEntry {
    fn message(text: &str) -> Self {
        TimelineEntry::Message {
            text: text.to_string(),
        }
    }
}

/// Turns the catalog and config into per-phase timelines
pub struct SessionBuilder<'c, P, R>
where
    P: Phase,
    R: Rng,
{
    pub phase: P,
    pub config: SurveyConfig,
    pub catalog: &'c Catalog,
    pub sampler: Sampler<R>,
}

impl<'c, P, R> SessionBuilder<'c, P, R>
where
    P: Phase,
    R: Rng,
{
    pub fn new(config: SurveyConfig, catalog: &'c Catalog, rng: R) -> Result<Self> {
        config.validate()?;
        if config.sampling == SamplingMode::Strict
            && config.images_per_trial > catalog.training_len()
        {
            anyhow::bail!(
                "strict sampling needs images_per_trial ({}) <= training images ({})",
                config.images_per_trial,
                catalog.training_len()
            );
        }
        let sampler = Sampler::new(rng, config.sampling);
        Ok(Self {
            phase: P::default(),
            config,
            catalog,
            sampler,
        })
    }

    pub fn advance_phase(&mut self) -> bool {
        if let Some(next) = self.phase.next() {
            self.phase = next;
            true
        } else {
            false
        }
    }

    /// Resolves the cohort and participant from `params` and builds every phase
    pub fn build_plan(&mut self, params: &QueryParams) -> Result<SessionPlan> {
        self.phase = P::default();
        let cohort = Cohort::from_query_value(
            params.get("ffp"),
            self.config.cohort_count,
            &mut self.sampler.rng,
        );
        let metadata =
            SessionMetadata::from_query(params, cohort, self.config.dimension, &mut self.sampler.rng);

        let mut training = PhaseTimeline::default();
        let mut experiment = PhaseTimeline::default();
        loop {
            let built = PhaseTimeline {
                saves_data: self.phase.saves_data(),
                entries: self.build_phase(cohort)?,
            };
            if self.phase.is_training() {
                training = built;
            } else if self.phase.is_experiment() {
                experiment = built;
            }
            if !self.advance_phase() {
                break;
            }
        }

        info!(
            cohort = cohort.index(),
            dimension = %self.config.dimension,
            training = training.entries.len(),
            experiment = experiment.entries.len(),
            "session plan built"
        );
        Ok(SessionPlan {
            page_title: self.config.dimension.page_title().to_string(),
            metadata,
            training,
            experiment,
        })
    }

    pub fn build_phase(&mut self, cohort: Cohort) -> Result<Vec<TimelineEntry>> {
        if self.phase.is_training() {
            self.build_training(cohort)
        } else if self.phase.is_experiment() {
            self.build_experiment(cohort)
        } else {
            Ok(Vec::new())
        }
    }

    /// Preload, instructions and example trials. Each example trial is an
    /// independent single-trial draw from the training images.
    pub fn build_training(&mut self, cohort: Cohort) -> Result<Vec<TimelineEntry>> {
        let mut pool = self.catalog.training_pool();
        let mut timeline = vec![
            TimelineEntry::Instructions {
                pages: vec![
                    CONSENT_TEXT.to_string(),
                    DURATION_TEXT.to_string(),
                    self.config.dimension.info_text().to_string(),
                ],
                show_clickable_nav: true,
                allow_backward: true,
            },
            TimelineEntry::message(PRE_TRAINING_TEXT),
        ];

        for _ in 0..self.config.training_trials {
            let stimuli = self
                .draw_single_trial(&mut pool)
                .context("failed to sample a training trial")?;
            timeline.push(TimelineEntry::Choice(
                self.choice_trial(TrialKind::Training, stimuli),
            ));
        }
        timeline.push(TimelineEntry::message(POST_TRAINING_TEXT));

        let preload = self.preload(cohort)?;
        timeline.insert(0, preload);

        debug!(entries = timeline.len(), "training timeline built");
        Ok(timeline)
    }

    /// Shuffled main trials with the demographics form first, attention checks
    /// and save checkpoints spliced in, then the closing steps.
    pub fn build_experiment(&mut self, cohort: Cohort) -> Result<Vec<TimelineEntry>> {
        let mut pool = self
            .catalog
            .cohort_pool(cohort, self.config.cohort_size)
            .with_context(|| format!("failed to load images for cohort {}", cohort.index()))?;

        let trials = self
            .sampler
            .generate_samples(
                &mut pool,
                self.config.experiment_trials,
                self.config.images_per_trial,
            )
            .context("failed to sample experiment trials")?;
        let mut timeline: Vec<TimelineEntry> = trials
            .into_iter()
            .map(|stimuli| TimelineEntry::Choice(self.choice_trial(TrialKind::Main, stimuli)))
            .collect();

        let check_stimuli = self
            .draw_single_trial(&mut pool)
            .context("failed to sample the attention check")?;
        let attention_check = TimelineEntry::Choice(ChoiceTrial {
            kind: TrialKind::AttentionCheck,
            stimuli: check_stimuli,
            file_path_prefix: self.config.file_path_prefix.clone(),
            instruction: ATTENTION_CHECK_INSTRUCTION.to_string(),
            prompt: ATTENTION_CHECK_PROMPT.to_string(),
        });

        self.sampler.shuffle(&mut timeline);
        timeline.insert(
            0,
            TimelineEntry::Form {
                form: FormKind::Demographics,
            },
        );

        insert_element(&mut timeline, attention_check, self.config.attention_checks);
        insert_element(&mut timeline, TimelineEntry::DataSave, self.config.save_points);

        timeline.push(TimelineEntry::Form {
            form: FormKind::Questionnaire,
        });
        timeline.push(TimelineEntry::DataSave);
        timeline.push(TimelineEntry::Final {
            text: FINAL_TEXT.to_string(),
            completion_url: self.config.completion_url.clone(),
        });

        debug!(
            cohort = cohort.index(),
            entries = timeline.len(),
            "experiment timeline built"
        );
        Ok(timeline)
    }

    fn draw_single_trial(&mut self, pool: &mut [ImageStimulus]) -> Result<Vec<ImageStimulus>> {
        self.sampler
            .generate_samples(pool, 1, self.config.images_per_trial)?
            .into_iter()
            .next()
            .context("sampler returned no trial")
    }

    fn choice_trial(&self, kind: TrialKind, stimuli: Vec<ImageStimulus>) -> ChoiceTrial {
        ChoiceTrial {
            kind,
            stimuli,
            file_path_prefix: self.config.file_path_prefix.clone(),
            instruction: String::new(),
            prompt: self.config.dimension.prompt().to_string(),
        }
    }

    /// Cohort images followed by training images, each fetched once
    fn preload(&self, cohort: Cohort) -> Result<TimelineEntry> {
        let cohort_pool = self.catalog.cohort_pool(cohort, self.config.cohort_size)?;
        let training_pool = self.catalog.training_pool();
        let mut seen = HashSet::new();
        let images = cohort_pool
            .iter()
            .chain(training_pool.iter())
            .filter(|stim| seen.insert(stim.cache_id()))
            .map(|stim| stim.url(&self.config.file_path_prefix))
            .collect();

        Ok(TimelineEntry::Preload {
            images,
            max_load_time_ms: self.config.preload_timeout_ms,
            continue_after_error: true,
            message: PRELOAD_TEXT.to_string(),
        })
    }
}
