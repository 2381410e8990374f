use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    #[error("cannot draw {requested} items from an empty pool")]
    EmptyPool { requested: usize },

    #[error("{trials} trials of {per_trial} items overflow the slot count")]
    TooManySlots { trials: usize, per_trial: usize },

    #[error("trials must hold at least one item")]
    ZeroItemsPerTrial,

    #[error("trial size {per_trial} exceeds pool size {pool_size} in strict mode")]
    TrialLargerThanPool { per_trial: usize, pool_size: usize },
}
