/// Defines survey phases and the order they run in
pub trait Phase: Copy + Clone + PartialEq + Send + Sync + std::fmt::Debug + Default {
    fn next(&self) -> Option<Self>;

    /// Whether responses collected in this phase are kept
    fn saves_data(&self) -> bool;

    fn is_training(&self) -> bool {
        false
    }
    fn is_experiment(&self) -> bool {
        false
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub enum StandardPhase {
    #[default]
    Training,
    Experiment,
}

impl Phase for StandardPhase {
    fn next(&self) -> Option<Self> {
        use StandardPhase::*;
        Some(match self {
            Training => Experiment,
            Experiment => return None,
        })
    }

    fn saves_data(&self) -> bool {
        matches!(self, Self::Experiment)
    }

    fn is_training(&self) -> bool {
        matches!(self, StandardPhase::Training)
    }

    fn is_experiment(&self) -> bool {
        matches!(self, StandardPhase::Experiment)
    }
}
