mod auth_port;
mod care_port;
mod family_port;
mod services_port;
mod session_storage_port;

pub use auth_port::{AuthPort, DoctorSignup, PatientSignup};
pub use care_port::CarePort;
pub use family_port::FamilyPort;
pub use services_port::ServicesPort;
pub use session_storage_port::SessionStoragePort;
