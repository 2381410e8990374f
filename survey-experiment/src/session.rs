use crate::cohort::Cohort;
use crate::query::QueryParams;
use crate::timeline::TimelineEntry;
use rand::Rng;
use serde::{Deserialize, Serialize};
use survey_core::{ChoiceRecord, Dimension};

pub const EXPERIMENT_TYPE: &str = "4choice";

/// Who is taking the survey and under which conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub prolific_pid: Option<String>,
    pub study_id: Option<String>,
    pub session_id: Option<String>,
    /// Random participant number independent of the recruiting platform
    pub internal_pid: String,
    pub experiment_type: String,
    pub ffp: Cohort,
    pub dimension: Dimension,
}

impl SessionMetadata {
    pub fn from_query<R: Rng + ?Sized>(
        params: &QueryParams,
        cohort: Cohort,
        dimension: Dimension,
        rng: &mut R,
    ) -> Self {
        Self {
            prolific_pid: params.get("PROLIFIC_PID").map(str::to_string),
            study_id: params.get("STUDY_ID").map(str::to_string),
            session_id: params.get("SESSION_ID").map(str::to_string),
            internal_pid: rng.random_range(1..=100_000u32).to_string(),
            experiment_type: EXPERIMENT_TYPE.to_string(),
            ffp: cohort,
            dimension,
        }
    }
}

/// One phase's steps; responses from a phase that does not save are discarded
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseTimeline {
    pub saves_data: bool,
    pub entries: Vec<TimelineEntry>,
}

/// Everything a trial runner needs for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPlan {
    pub page_title: String,
    pub metadata: SessionMetadata,
    pub training: PhaseTimeline,
    pub experiment: PhaseTimeline,
}

/// Body sent to the data sink at each save checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    pub jspsych_data_all: Vec<ChoiceRecord>,
    #[serde(rename = "PROLIFIC_PID")]
    pub prolific_pid: Option<String>,
    #[serde(rename = "PROLIFIC_STUDY_ID")]
    pub prolific_study_id: Option<String>,
    #[serde(rename = "PROLIFIC_SESSION_ID")]
    pub prolific_session_id: Option<String>,
    #[serde(rename = "internal_PID")]
    pub internal_pid: String,
    pub experiment_type: String,
    pub ffp: Cohort,
    pub experiment_dimension: Dimension,
}

impl SavePayload {
    pub fn new(metadata: &SessionMetadata, records: Vec<ChoiceRecord>) -> Self {
        Self {
            jspsych_data_all: records,
            prolific_pid: metadata.prolific_pid.clone(),
            prolific_study_id: metadata.study_id.clone(),
            prolific_session_id: metadata.session_id.clone(),
            internal_pid: metadata.internal_pid.clone(),
            experiment_type: metadata.experiment_type.clone(),
            ffp: metadata.ffp,
            experiment_dimension: metadata.dimension,
        }
    }
}
