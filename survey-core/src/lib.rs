pub mod dimension;
pub mod phase;
pub mod stimulus;
pub mod trial;

pub use dimension::Dimension;
pub use phase::{Phase, StandardPhase};
pub use stimulus::{ImageStimulus, Stimulus};
pub use trial::{ChoiceRecord, ChoiceTrial, TrialKind};
