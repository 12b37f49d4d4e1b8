//! Command-line surface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::entities::{
    ConsultationType, DoctorStatus, EmergencyKind, FamilyMemberDetails, HomeServiceKind,
    PaymentMethod, ProfileChanges,
};
use crate::infrastructure::config::CliArgs;

#[derive(Debug, Parser)]
#[command(
    name = "vaidyacare",
    version,
    about = "Patient and doctor client for the VaidyaCare telemedicine service",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub args: CliArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in as a patient.
    Login(LoginArgs),
    /// Sign in as a doctor.
    DoctorLogin(LoginArgs),
    /// Create a patient account.
    Signup(SignupArgs),
    /// Create a doctor account.
    DoctorSignup(DoctorSignupArgs),
    /// Forget the stored session.
    Logout,
    /// Show who is signed in.
    Whoami,
    /// Check that the backend is reachable.
    Ping,
    /// Show or edit the patient profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// List doctors.
    Doctors {
        /// Filter by name or specialization.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Set your consultation availability (doctors only).
    Status {
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Manage family members.
    #[command(subcommand)]
    Family(FamilyCommand),
    /// Book an appointment with a doctor.
    Book(BookArgs),
    /// Book a home nursing service.
    HomeService(HomeServiceArgs),
    /// Request an ambulance.
    Emergency(EmergencyArgs),
    /// List appointments.
    Appointments,
    /// List prescriptions.
    Prescriptions,
    /// List lab and imaging reports.
    Reports,
    /// List notifications.
    Notifications {
        /// Only show unread notifications.
        #[arg(long)]
        unread: bool,
    },
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address or mobile number.
    #[arg(short = 'u', long = "user", value_name = "EMAIL|MOBILE")]
    pub login_id: String,

    /// Password; prompted for when omitted.
    #[arg(long, env = "VAIDYACARE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Do not remember the session after this command.
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub mobile: String,
    /// Password; prompted for when omitted.
    #[arg(long, env = "VAIDYACARE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    pub dob: Option<NaiveDate>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub blood_group: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Debug, Args)]
pub struct DoctorSignupArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub mobile: String,
    /// Password; prompted for when omitted.
    #[arg(long, env = "VAIDYACARE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long)]
    pub specialization: String,
    /// Years of practice.
    #[arg(long, default_value_t = 0)]
    pub experience: u32,
    /// Consultation fee in rupees.
    #[arg(long, default_value_t = 0.0)]
    pub fee: f64,
    /// Medical council registration number.
    #[arg(long)]
    pub license: String,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the profile.
    Show,
    /// Change profile fields. Omitted fields keep their value.
    Update(ProfileArgs),
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    pub dob: Option<NaiveDate>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub blood_group: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl From<ProfileArgs> for ProfileChanges {
    fn from(args: ProfileArgs) -> Self {
        Self {
            name: args.name,
            mobile: args.mobile,
            dob: args.dob,
            gender: args.gender,
            blood_group: args.blood_group,
            address: args.address,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum FamilyCommand {
    /// List family members.
    List,
    /// Add a family member.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        relation: String,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Change a family member. Omitted fields keep their value.
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        relation: Option<String>,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Remove a family member.
    Delete { id: u64 },
}

#[derive(Debug, Default, Args)]
pub struct MemberFields {
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub blood_group: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub medical_history: Option<String>,
    #[arg(long)]
    pub allergies: Option<String>,
    #[arg(long)]
    pub medications: Option<String>,
}

impl MemberFields {
    /// Writes the given fields into `details`.
    pub fn apply(self, details: &mut FamilyMemberDetails) {
        if let Some(age) = self.age {
            details.age = age;
        }
        let text_fields = [
            (self.gender, &mut details.gender),
            (self.phone, &mut details.phone),
            (self.blood_group, &mut details.blood_group),
            (self.address, &mut details.address),
            (self.medical_history, &mut details.medical_history),
            (self.allergies, &mut details.allergies),
            (self.medications, &mut details.medications),
        ];
        for (value, slot) in text_fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Doctor id, or a name/specialization matching exactly one doctor.
    #[arg(long)]
    pub doctor: String,
    #[arg(long = "type", value_enum, default_value_t = ConsultationArg::Video)]
    pub consultation: ConsultationArg,
    /// Appointment date (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,
    /// Time slot, e.g. "10:30 AM".
    #[arg(long)]
    pub time: String,
    /// Reason for the visit.
    #[arg(long)]
    pub reason: String,
    #[arg(long, value_enum, default_value_t = PaymentArg::Upi)]
    pub payment: PaymentArg,
}

#[derive(Debug, Args)]
pub struct HomeServiceArgs {
    #[arg(long, value_enum)]
    pub service: ServiceArg,
    /// First visit date (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,
    /// Preferred time, e.g. "Morning".
    #[arg(long)]
    pub time: String,
    /// Number of days.
    #[arg(long, default_value_t = 1)]
    pub days: u32,
    /// Visit address.
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, value_enum, default_value_t = PaymentArg::Cash)]
    pub payment: PaymentArg,
}

#[derive(Debug, Args)]
pub struct EmergencyArgs {
    /// Pickup location.
    #[arg(long)]
    pub location: String,
    #[arg(long, value_enum, default_value_t = EmergencyArg::Medical)]
    pub kind: EmergencyArg,
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,
    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,
    /// Contact name; defaults to the signed-in patient.
    #[arg(long)]
    pub contact_name: Option<String>,
    /// Contact mobile; defaults to the signed-in patient.
    #[arg(long)]
    pub contact_mobile: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Online,
    Busy,
    Offline,
}

impl From<StatusArg> for DoctorStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Online => Self::Online,
            StatusArg::Busy => Self::Busy,
            StatusArg::Offline => Self::Offline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConsultationArg {
    Video,
    Audio,
    Chat,
    Clinic,
}

impl From<ConsultationArg> for ConsultationType {
    fn from(value: ConsultationArg) -> Self {
        match value {
            ConsultationArg::Video => Self::Video,
            ConsultationArg::Audio => Self::Audio,
            ConsultationArg::Chat => Self::Chat,
            ConsultationArg::Clinic => Self::Clinic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentArg {
    Upi,
    Card,
    NetBanking,
    Cash,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(value: PaymentArg) -> Self {
        match value {
            PaymentArg::Upi => Self::Upi,
            PaymentArg::Card => Self::Card,
            PaymentArg::NetBanking => Self::NetBanking,
            PaymentArg::Cash => Self::Cash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceArg {
    Nursing,
    Physiotherapy,
    ElderCare,
    Injection,
    LabSample,
}

impl From<ServiceArg> for HomeServiceKind {
    fn from(value: ServiceArg) -> Self {
        match value {
            ServiceArg::Nursing => Self::NursingCare,
            ServiceArg::Physiotherapy => Self::Physiotherapy,
            ServiceArg::ElderCare => Self::ElderCare,
            ServiceArg::Injection => Self::InjectionDressing,
            ServiceArg::LabSample => Self::LabSampleCollection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmergencyArg {
    Medical,
    Accident,
    Cardiac,
    Maternity,
    Other,
}

impl From<EmergencyArg> for EmergencyKind {
    fn from(value: EmergencyArg) -> Self {
        match value {
            EmergencyArg::Medical => Self::Medical,
            EmergencyArg::Accident => Self::Accident,
            EmergencyArg::Cardiac => Self::Cardiac,
            EmergencyArg::Maternity => Self::Maternity,
            EmergencyArg::Other => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_book() {
        let cli = Cli::parse_from([
            "vaidyacare",
            "book",
            "--doctor",
            "cardio",
            "--type",
            "clinic",
            "--date",
            "2026-11-02",
            "--time",
            "10:30 AM",
            "--reason",
            "Chest pain",
            "--base-url",
            "http://localhost/api",
        ]);

        let Command::Book(args) = cli.command else {
            panic!("expected book command");
        };
        assert_eq!(ConsultationType::from(args.consultation), ConsultationType::Clinic);
        assert_eq!(PaymentMethod::from(args.payment), PaymentMethod::Upi);
        assert_eq!(cli.args.base_url.as_deref(), Some("http://localhost/api"));
    }

    #[test]
    fn test_member_fields_apply_only_given_values() {
        let mut details = FamilyMemberDetails::new("Lata", "Mother");
        details.phone = "9800000001".to_string();

        MemberFields {
            age: Some(63),
            allergies: Some("Penicillin".to_string()),
            ..MemberFields::default()
        }
        .apply(&mut details);

        assert_eq!(details.age, 63);
        assert_eq!(details.allergies, "Penicillin");
        assert_eq!(details.phone, "9800000001");
    }

    #[test]
    fn test_emergency_coordinates_come_in_pairs() {
        let result = Cli::try_parse_from([
            "vaidyacare",
            "emergency",
            "--location",
            "MG Road",
            "--latitude",
            "18.52",
        ]);
        assert!(result.is_err());
    }
}
