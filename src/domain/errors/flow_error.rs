//! Booking flow error types.

use thiserror::Error;

/// Rejected navigation inside a multi-step flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{step} is incomplete: {missing}")]
    StepIncomplete {
        step: &'static str,
        missing: &'static str,
    },

    #[error("already at the first step")]
    AtFirstStep,

    #[error("the booking must be submitted before it can be confirmed")]
    SubmissionRequired,

    #[error("the booking has already been confirmed")]
    AlreadyConfirmed,

    #[error("the booking is not ready to submit, currently at {step}")]
    NotReady { step: &'static str },
}
