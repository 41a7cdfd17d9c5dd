//! Error types for the async agent runtime.

use thiserror::Error;
use uuid::Uuid;

use catsim_core::CoreError;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("motion controller was destroyed")]
    Destroyed,
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("stimulus not found: {0}")]
    StimulusNotFound(Uuid),

    #[error(transparent)]
    Motion(#[from] MotionError),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
