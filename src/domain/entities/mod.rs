//! Domain entity definitions.

mod appointment;
mod credentials;
mod doctor;
mod emergency;
mod family_member;
mod home_service;
mod records;
mod session;
mod user;

pub use appointment::{
    Appointment, AppointmentStatus, BookingConfirmation, ConsultationType, PaymentMethod,
};
pub use credentials::{LoginId, Password};
pub use doctor::{Doctor, DoctorStatus, filter_doctors};
pub use emergency::{EmergencyDispatch, EmergencyKind, EmergencyRequest};
pub use family_member::{FamilyMember, FamilyMemberDetails, FamilyMemberId};
pub use home_service::HomeServiceKind;
pub use records::{Medicine, Notification, Prescription, Report, unread_count};
pub use session::{Role, Session};
pub use user::{ProfileChanges, UserId, UserProfile};
