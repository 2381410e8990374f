use serde::{Deserialize, Serialize};

use crate::stimulus::ImageStimulus;

/// What a choice trial is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialKind {
    Training,
    Main,
    AttentionCheck,
}

/// A set of images shown together; the participant picks one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceTrial {
    pub kind: TrialKind,
    pub stimuli: Vec<ImageStimulus>,
    pub file_path_prefix: String,
    pub instruction: String,
    pub prompt: String,
}

/// Recorded response per choice trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    /// Milliseconds from display to confirming the choice
    pub rt: u64,
    #[serde(rename = "selectedImageId")]
    pub selected_image_id: usize,
    pub stimuli: Vec<ImageStimulus>,
}
