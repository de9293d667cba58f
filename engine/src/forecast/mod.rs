// Additive time-series forecasting: piecewise-linear trend plus Fourier seasonalities.
pub mod linalg;
pub mod model;
pub mod trainer;

pub use model::{normal_quantile, AdditiveModel, SeasonalProfile, Seasonality};
pub use trainer::{prepare_training_frame, train_model};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Dataframe has less than 2 non-NaN rows ({rows} usable)")]
    InsufficientData { rows: usize },

    #[error("Model has not been fit")]
    NotFitted,

    #[error("Model has already been fit; create a new model to fit again")]
    AlreadyFitted,

    #[error("Least-squares system is singular")]
    SingularSystem,

    #[error("Invalid forecast settings: {0}")]
    InvalidSettings(String),
}
