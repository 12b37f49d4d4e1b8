//! Linear multi-step booking flows.
//!
//! A flow walks a fixed sequence of steps. Moving forward requires the
//! current step's input and never skips a step; moving back goes exactly one
//! step. The final step is the confirmation, which is entered only through
//! [`LinearFlow::confirm`] after the server accepted the submission.

mod appointment;
mod home_service;

use std::fmt;

use crate::domain::errors::FlowError;

pub use appointment::{AppointmentBooking, AppointmentDraft, AppointmentFlow, AppointmentStep};
pub use home_service::{HomeServiceBooking, HomeServiceDraft, HomeServiceFlow, HomeServiceStep};

/// Step of a linear flow.
pub trait FlowStep: Copy + Eq + fmt::Debug + 'static {
    /// Every step in order; the last one is the confirmation.
    const SEQUENCE: &'static [Self];

    /// Screen title.
    fn title(self) -> &'static str;
}

/// In-memory form state collected across the steps of a flow.
pub trait FlowDraft {
    /// Steps of the flow this draft belongs to.
    type Step: FlowStep;
    /// Submission built from a complete draft.
    type Request;

    /// Describes the input still missing for `step`, if any.
    fn missing(&self, step: Self::Step) -> Option<&'static str>;

    /// Builds the submission. Only called once every input step is complete.
    fn build(&self) -> Self::Request;
}

/// Forward/back navigation over a [`FlowDraft`].
#[derive(Debug, Clone)]
pub struct LinearFlow<D: FlowDraft> {
    position: usize,
    draft: D,
}

impl<D: FlowDraft> LinearFlow<D> {
    #[must_use]
    pub const fn new(draft: D) -> Self {
        Self { position: 0, draft }
    }

    fn steps() -> &'static [D::Step] {
        D::Step::SEQUENCE
    }

    fn confirmation_index() -> usize {
        Self::steps().len().saturating_sub(1)
    }

    fn review_index() -> usize {
        Self::confirmation_index().saturating_sub(1)
    }

    #[must_use]
    pub fn current(&self) -> D::Step {
        Self::steps()[self.position]
    }

    /// Zero-based index of the current step.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total_steps() -> usize {
        Self::steps().len()
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.position == Self::confirmation_index()
    }

    #[must_use]
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Moves one step forward.
    ///
    /// # Errors
    /// Returns error if the current step is incomplete, if the next step is
    /// the confirmation, or if the flow is already confirmed.
    pub fn next(&mut self) -> Result<D::Step, FlowError> {
        if self.is_confirmed() {
            return Err(FlowError::AlreadyConfirmed);
        }
        let step = self.current();
        if let Some(missing) = self.draft.missing(step) {
            return Err(FlowError::StepIncomplete {
                step: step.title(),
                missing,
            });
        }
        if self.position + 1 >= Self::confirmation_index() {
            return Err(FlowError::SubmissionRequired);
        }
        self.position += 1;
        Ok(self.current())
    }

    /// Moves one step back.
    ///
    /// # Errors
    /// Returns error at the first step or once confirmed.
    pub fn back(&mut self) -> Result<D::Step, FlowError> {
        if self.is_confirmed() {
            return Err(FlowError::AlreadyConfirmed);
        }
        if self.position == 0 {
            return Err(FlowError::AtFirstStep);
        }
        self.position -= 1;
        Ok(self.current())
    }

    /// Whether the flow sits on its last input step with every step complete.
    #[must_use]
    pub fn ready_to_submit(&self) -> bool {
        self.build_request().is_ok()
    }

    /// Builds the submission from the draft.
    ///
    /// # Errors
    /// Returns error unless the flow is on its last input step and every
    /// input step is complete.
    pub fn build_request(&self) -> Result<D::Request, FlowError> {
        if self.is_confirmed() {
            return Err(FlowError::AlreadyConfirmed);
        }
        if self.position != Self::review_index() {
            return Err(FlowError::NotReady {
                step: self.current().title(),
            });
        }
        for &step in &Self::steps()[..Self::confirmation_index()] {
            if let Some(missing) = self.draft.missing(step) {
                return Err(FlowError::StepIncomplete {
                    step: step.title(),
                    missing,
                });
            }
        }
        Ok(self.draft.build())
    }

    /// Enters the confirmation step after a successful submission.
    ///
    /// # Errors
    /// Returns error if the flow is not on its last input step.
    pub fn confirm(&mut self) -> Result<D::Step, FlowError> {
        if self.is_confirmed() {
            return Err(FlowError::AlreadyConfirmed);
        }
        if self.position != Self::review_index() {
            return Err(FlowError::NotReady {
                step: self.current().title(),
            });
        }
        self.position = Self::confirmation_index();
        Ok(self.current())
    }
}
