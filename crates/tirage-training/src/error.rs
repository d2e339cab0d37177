use tirage_engine::{LoadError, RuleSetError};
use tirage_scoring::InvalidModuleOutput;

use crate::{config::ConfigError, grid::InvalidSamplingWeights};

/// Reasons a training run fails.
///
/// Every failure is fatal to the run: nothing is retried and no partial result is
/// returned.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TrainingError {
    #[display("failed to load historical draws")]
    DataLoad(LoadError),
    #[display("no historical draws to train on")]
    EmptyDataset,
    #[display("unknown game `{_0}` (known games: {})", tirage_engine::GameRules::keys().join(", "))]
    UnknownGame(#[error(not(source))] String),
    #[display("invalid game rules")]
    InvalidRules(RuleSetError),
    #[display("invalid training configuration")]
    InvalidConfig(ConfigError),
    #[display("failed to build the score profile")]
    InvalidModuleOutput(InvalidModuleOutput),
    #[display("failed to sample a grid")]
    InvalidSamplingWeights(InvalidSamplingWeights),
}

impl From<LoadError> for TrainingError {
    fn from(err: LoadError) -> Self {
        Self::DataLoad(err)
    }
}

impl From<RuleSetError> for TrainingError {
    fn from(err: RuleSetError) -> Self {
        Self::InvalidRules(err)
    }
}

impl From<ConfigError> for TrainingError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}

impl From<InvalidModuleOutput> for TrainingError {
    fn from(err: InvalidModuleOutput) -> Self {
        Self::InvalidModuleOutput(err)
    }
}

impl From<InvalidSamplingWeights> for TrainingError {
    fn from(err: InvalidSamplingWeights) -> Self {
        Self::InvalidSamplingWeights(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use tirage_engine::Pool;

    use super::*;

    #[test]
    fn test_unknown_game_lists_known_games() {
        let err = TrainingError::UnknownGame("keno".to_owned());
        let message = err.to_string();
        assert!(message.contains("keno"));
        assert!(message.contains("euromillions"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_sampling_error_keeps_source() {
        let err = TrainingError::from(InvalidSamplingWeights {
            pool: Pool::Secondary,
        });
        let source = err.source().unwrap().to_string();
        assert!(source.contains("secondary"));
    }
}
