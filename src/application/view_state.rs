//! Screen-level state for one remote resource.

use crate::domain::errors::ApiError;

/// Data shown on a screen plus the loading and error indicators around it.
///
/// A failed call never touches `data`; it only records the error text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState<T> {
    data: T,
    loading: bool,
    error: Option<String>,
}

impl<T> ViewState<T> {
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the triggering control should be enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Marks a call as in flight.
    ///
    /// # Errors
    /// Returns [`ApiError::InFlight`] while another call is running.
    pub fn begin(&mut self) -> Result<(), ApiError> {
        if self.loading {
            return Err(ApiError::InFlight);
        }
        self.loading = true;
        Ok(())
    }

    /// Records the outcome of the call started with [`Self::begin`].
    ///
    /// # Errors
    /// Hands back the call's error after recording its user message.
    pub fn finish(&mut self, result: Result<T, ApiError>) -> Result<&T, ApiError> {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
                Ok(&self.data)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Records a failure without replacing data.
    pub fn fail(&mut self, error: &ApiError) {
        self.loading = false;
        self.error = Some(error.user_message());
    }

    /// Ends a call that produced no new data.
    pub fn settle(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// Mutable access for local edits that mirror a confirmed server change.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }
}
