//! Application layer with use cases, DTOs and view state.

/// Data transfer objects.
pub mod dto;
/// Use case implementations.
pub mod use_cases;
/// Screen state for remote resources.
pub mod view_state;

pub use dto::{EmergencyInput, LoginRequest, LoginResponse, SessionSource};
pub use use_cases::{
    BookAppointmentUseCase, DoctorsUseCase, EmergencyUseCase, FamilyMembersUseCase,
    HomeServiceUseCase, LoginUseCase, ProfileUseCase, RecordsUseCase, ResolveSessionUseCase,
    SignupUseCase,
};
pub use view_state::ViewState;
