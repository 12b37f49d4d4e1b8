//! Use case implementations.

mod book_appointment_use_case;
mod doctors_use_case;
mod emergency_use_case;
mod family_members_use_case;
mod home_service_use_case;
mod login_use_case;
mod profile_use_case;
mod records_use_case;
mod resolve_session_use_case;
mod signup_use_case;

pub use book_appointment_use_case::BookAppointmentUseCase;
pub use doctors_use_case::DoctorsUseCase;
pub use emergency_use_case::EmergencyUseCase;
pub use family_members_use_case::FamilyMembersUseCase;
pub use home_service_use_case::HomeServiceUseCase;
pub use login_use_case::LoginUseCase;
pub use profile_use_case::ProfileUseCase;
pub use records_use_case::RecordsUseCase;
pub use resolve_session_use_case::ResolveSessionUseCase;
pub use signup_use_case::SignupUseCase;
