//! Command dispatcher.

use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::application::dto::{EmergencyInput, LoginRequest};
use crate::application::use_cases::{
    BookAppointmentUseCase, DoctorsUseCase, EmergencyUseCase, FamilyMembersUseCase,
    HomeServiceUseCase, LoginUseCase, ProfileUseCase, RecordsUseCase, ResolveSessionUseCase,
    SignupUseCase,
};
use crate::domain::entities::{
    Doctor, DoctorStatus, FamilyMember, FamilyMemberDetails, FamilyMemberId, Password, Role,
    UserProfile, filter_doctors, unread_count,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    AuthPort, CarePort, DoctorSignup, FamilyPort, PatientSignup, ServicesPort, SessionStoragePort,
};
use crate::domain::toast::Toast;
use crate::presentation::commands::{
    BookArgs, Command, DoctorSignupArgs, EmergencyArgs, FamilyCommand, HomeServiceArgs,
    LoginArgs, ProfileCommand, SignupArgs,
};
use crate::presentation::output::{Output, Table};
use crate::presentation::prompt::read_secret;

/// Backend adapters the commands run against.
#[derive(Clone)]
pub struct Ports {
    pub auth: Arc<dyn AuthPort>,
    pub care: Arc<dyn CarePort>,
    pub family: Arc<dyn FamilyPort>,
    pub services: Arc<dyn ServicesPort>,
    pub storage: Arc<dyn SessionStoragePort>,
}

pub struct App {
    auth_port: Arc<dyn AuthPort>,
    login_use_case: LoginUseCase,
    signup_use_case: SignupUseCase,
    resolve_session_use_case: ResolveSessionUseCase,
    profile_use_case: ProfileUseCase,
    doctors_use_case: DoctorsUseCase,
    family_use_case: FamilyMembersUseCase,
    booking_use_case: BookAppointmentUseCase,
    home_service_use_case: HomeServiceUseCase,
    emergency_use_case: EmergencyUseCase,
    records_use_case: RecordsUseCase,
    output: Output,
}

impl App {
    #[must_use]
    pub fn new(ports: Ports, output: Output) -> Self {
        let Ports {
            auth,
            care,
            family,
            services,
            storage,
        } = ports;

        Self {
            login_use_case: LoginUseCase::new(auth.clone(), storage.clone()),
            signup_use_case: SignupUseCase::new(auth.clone(), storage.clone()),
            resolve_session_use_case: ResolveSessionUseCase::new(storage.clone()),
            profile_use_case: ProfileUseCase::new(care.clone(), storage.clone()),
            doctors_use_case: DoctorsUseCase::new(care.clone()),
            family_use_case: FamilyMembersUseCase::new(family, storage.clone()),
            booking_use_case: BookAppointmentUseCase::new(care.clone(), storage.clone()),
            home_service_use_case: HomeServiceUseCase::new(services.clone(), storage.clone()),
            emergency_use_case: EmergencyUseCase::new(services, storage.clone()),
            records_use_case: RecordsUseCase::new(care, storage),
            auth_port: auth,
            output,
        }
    }

    /// Runs one command to completion.
    ///
    /// # Errors
    /// Returns the error of the failed call; nothing is printed for it.
    pub async fn run(mut self, command: Command) -> Result<(), ApiError> {
        match command {
            Command::Login(args) => self.login(Role::Patient, args).await,
            Command::DoctorLogin(args) => self.login(Role::Doctor, args).await,
            Command::Signup(args) => self.signup(args).await,
            Command::DoctorSignup(args) => self.doctor_signup(args).await,
            Command::Logout => {
                self.login_use_case.logout().await?;
                self.output.toast(&Toast::success("Signed out."));
                Ok(())
            }
            Command::Whoami => self.whoami().await,
            Command::Ping => {
                self.auth_port.health_check().await?;
                self.output.toast(&Toast::success("Server is reachable."));
                Ok(())
            }
            Command::Profile(ProfileCommand::Show) => self.show_profile().await,
            Command::Profile(ProfileCommand::Update(args)) => {
                let profile = self.profile_use_case.update(&args.into()).await?;
                print_profile(&self.output, profile);
                self.output.toast(&Toast::success("Profile updated."));
                Ok(())
            }
            Command::Doctors { search } => self.doctors(search.as_deref().unwrap_or("")).await,
            Command::Status { status } => {
                let status = DoctorStatus::from(status);
                self.profile_use_case.set_status(status).await?;
                self.output
                    .toast(&Toast::success(format!("You are now {status}.")));
                Ok(())
            }
            Command::Family(command) => self.family(command).await,
            Command::Book(args) => self.book(args).await,
            Command::HomeService(args) => self.home_service(args).await,
            Command::Emergency(args) => self.emergency(args).await,
            Command::Appointments => self.appointments().await,
            Command::Prescriptions => self.prescriptions().await,
            Command::Reports => self.reports().await,
            Command::Notifications { unread } => self.notifications(unread).await,
        }
    }

    async fn login(&self, role: Role, args: LoginArgs) -> Result<(), ApiError> {
        let password = password_from(args.password)?;
        let mut request = LoginRequest::new(role, &args.login_id, password);
        if args.no_save {
            request = request.without_persistence();
        }
        let persist = request.persist_session;

        let response = self.login_use_case.execute(request).await?;
        self.output.toast(&Toast::success(format!(
            "Welcome, {}!",
            response.session.greeting_name()
        )));
        if persist && !response.session_persisted {
            self.output.toast(&Toast::info(
                "The session could not be saved; you will need to log in again.",
            ));
        }
        Ok(())
    }

    async fn signup(&self, args: SignupArgs) -> Result<(), ApiError> {
        let password = password_from(args.password)?;
        let mut form = PatientSignup::new(args.name, args.email, args.mobile, password);
        form.dob = args.dob;
        form.gender = args.gender.unwrap_or_default();
        form.blood_group = args.blood_group.unwrap_or_default();
        form.address = args.address.unwrap_or_default();

        let response = self.signup_use_case.register_patient(&form).await?;
        self.output.toast(&Toast::success(format!(
            "Account created. Welcome, {}!",
            response.session.greeting_name()
        )));
        Ok(())
    }

    async fn doctor_signup(&self, args: DoctorSignupArgs) -> Result<(), ApiError> {
        let form = DoctorSignup {
            password: password_from(args.password)?,
            name: args.name,
            email: args.email,
            mobile: args.mobile,
            specialization: args.specialization,
            experience: args.experience,
            fee: args.fee,
            license_number: args.license,
        };

        let response = self.signup_use_case.register_doctor(&form).await?;
        self.output.toast(&Toast::success(format!(
            "Doctor account created. Welcome, {}!",
            response.session.greeting_name()
        )));
        Ok(())
    }

    async fn whoami(&self) -> Result<(), ApiError> {
        let Some((session, source)) = self.resolve_session_use_case.execute().await? else {
            self.output.toast(&Toast::info("Not signed in."));
            return Ok(());
        };

        self.output.fields(&[
            ("Name", session.greeting_name().to_string()),
            ("Role", session.role.to_string()),
            ("Account id", session.user_id.to_string()),
            ("Email", or_dash(&session.email)),
            ("Mobile", or_dash(&session.mobile)),
            ("Source", source.to_string()),
        ]);
        Ok(())
    }

    async fn show_profile(&mut self) -> Result<(), ApiError> {
        let session = self.resolve_session_use_case.require().await?;
        if session.is_doctor() {
            let doctor = self.profile_use_case.load_doctor().await?;
            print_doctor(&self.output, doctor);
        } else {
            let profile = self.profile_use_case.load().await?;
            print_profile(&self.output, profile);
        }
        Ok(())
    }

    async fn doctors(&mut self, query: &str) -> Result<(), ApiError> {
        self.doctors_use_case.load().await?;
        let found = self.doctors_use_case.search(query);

        let mut table = Table::new(["Id", "Doctor", "Specialization", "Exp", "Fee", "Rating", "Status"]);
        for doctor in found {
            table.row([
                doctor.id.to_string(),
                doctor.display_name(),
                or_dash(&doctor.specialization),
                format!("{} yr", doctor.experience),
                format!("₹{:.0}", doctor.fee),
                format!("{:.1}", doctor.rating),
                self.output
                    .badge(doctor.status.as_str(), doctor.status.badge_color()),
            ]);
        }
        self.output.table(&table);
        Ok(())
    }

    async fn family(&mut self, command: FamilyCommand) -> Result<(), ApiError> {
        match command {
            FamilyCommand::List => {
                let members = self.family_use_case.refresh().await?;
                self.output.table(&family_table(members));
            }
            FamilyCommand::Add {
                name,
                relation,
                fields,
            } => {
                let mut details = FamilyMemberDetails::new(name, relation);
                fields.apply(&mut details);
                let id = self.family_use_case.add(details).await?;

                self.output
                    .table(&family_table(self.family_use_case.state().data()));
                self.output
                    .toast(&Toast::success(format!("Family member added (id {id}).")));
            }
            FamilyCommand::Update {
                id,
                name,
                relation,
                fields,
            } => {
                let id = FamilyMemberId(id);
                self.family_use_case.refresh().await?;
                let mut member = self
                    .family_use_case
                    .find(id)
                    .cloned()
                    .ok_or_else(|| ApiError::unexpected(format!("no family member with id {id}")))?;

                if let Some(name) = name {
                    member.details.name = name;
                }
                if let Some(relation) = relation {
                    member.details.relation = relation;
                }
                fields.apply(&mut member.details);
                self.family_use_case.update(member).await?;

                self.output
                    .table(&family_table(self.family_use_case.state().data()));
                self.output
                    .toast(&Toast::success("Family member updated."));
            }
            FamilyCommand::Delete { id } => {
                self.family_use_case.delete(FamilyMemberId(id)).await?;
                self.output
                    .toast(&Toast::success(format!("Family member {id} removed.")));
            }
        }
        Ok(())
    }

    async fn book(&mut self, args: BookArgs) -> Result<(), ApiError> {
        let doctors = self.doctors_use_case.load().await?;
        let doctor = pick_doctor(doctors, &args.doctor)?.clone();
        if !doctor.status.accepts_consultations() {
            self.output.toast(&Toast::info(format!(
                "{} is {} right now.",
                doctor.display_name(),
                doctor.status
            )));
        }

        let mut flow = self.booking_use_case.start(&doctor);
        flow.draft_mut().consultation_type = Some(args.consultation.into());
        flow.next()?;
        flow.draft_mut().date = Some(args.date);
        flow.draft_mut().time_slot = Some(args.time);
        flow.next()?;
        flow.draft_mut().reason = args.reason;
        flow.next()?;
        flow.draft_mut().payment_method = Some(args.payment.into());

        let confirmation = self.booking_use_case.submit(&mut flow).await?;
        let draft = flow.draft();
        self.output.fields(&[
            ("Reference", confirmation.display_reference()),
            ("Doctor", draft.doctor_name.clone()),
            (
                "Consultation",
                draft
                    .consultation_type
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
            ),
            ("Date", self.output.date(draft.date)),
            ("Time", draft.time_slot.clone().unwrap_or_default()),
            ("Fee", format!("₹{:.0}", draft.fee)),
        ]);
        self.output.toast(&Toast::success("Appointment booked."));
        Ok(())
    }

    async fn home_service(&self, args: HomeServiceArgs) -> Result<(), ApiError> {
        let mut flow = self.home_service_use_case.start().await?;
        flow.draft_mut().service = Some(args.service.into());
        flow.next()?;
        flow.draft_mut().date = Some(args.date);
        flow.draft_mut().time_slot = Some(args.time);
        flow.draft_mut().duration_days = args.days;
        flow.next()?;
        flow.draft_mut().address = args.address;
        flow.draft_mut().notes = args.notes.unwrap_or_default();
        flow.next()?;
        flow.draft_mut().payment_method = Some(args.payment.into());

        let confirmation = self.home_service_use_case.submit(&mut flow).await?;
        let draft = flow.draft();
        self.output.fields(&[
            ("Reference", confirmation.display_reference()),
            (
                "Service",
                draft.service.map(|s| s.to_string()).unwrap_or_default(),
            ),
            ("Starts", self.output.date(draft.date)),
            ("Days", draft.duration_days.to_string()),
            ("Estimated cost", format!("₹{}", draft.estimated_cost())),
        ]);
        self.output.toast(&Toast::success("Home service booked."));
        Ok(())
    }

    async fn emergency(&self, args: EmergencyArgs) -> Result<(), ApiError> {
        let mut input = EmergencyInput::new(args.kind.into(), args.location);
        if let (Some(latitude), Some(longitude)) = (args.latitude, args.longitude) {
            input = input.with_coordinates(latitude, longitude);
        }
        input.contact_name = args.contact_name;
        input.contact_mobile = args.contact_mobile;
        input.notes = args.notes.unwrap_or_default();

        let dispatch = self.emergency_use_case.execute(input).await?;
        info!(request_id = dispatch.request_id, "Emergency request accepted");

        self.output.toast(&Toast::success(format!(
            "Ambulance requested (request #{}).",
            dispatch.request_id
        )));
        if let Some(eta) = dispatch.eta_text() {
            self.output.line(format!("Estimated arrival: {eta}"));
        }
        if !dispatch.status.is_empty() {
            self.output.line(format!("Status: {}", dispatch.status));
        }
        Ok(())
    }

    async fn appointments(&self) -> Result<(), ApiError> {
        let session = self.resolve_session_use_case.require().await?;
        let appointments = self.records_use_case.appointments().await?;

        let counterpart = if session.is_doctor() { "Patient" } else { "Doctor" };
        let mut table = Table::new(["Id", "Date", "Time", counterpart, "Type", "Fee", "Status"]);
        for appointment in &appointments {
            let with = if session.is_doctor() {
                &appointment.patient_name
            } else {
                &appointment.doctor_name
            };
            table.row([
                appointment.id.to_string(),
                self.output.date(appointment.date),
                or_dash(&appointment.time_slot),
                or_dash(with),
                appointment.consultation_type.to_string(),
                format!("₹{:.0}", appointment.fee),
                self.output.badge(
                    appointment.status.as_str(),
                    appointment.status.badge_color(),
                ),
            ]);
        }
        self.output.table(&table);
        Ok(())
    }

    async fn prescriptions(&self) -> Result<(), ApiError> {
        let prescriptions = self.records_use_case.prescriptions().await?;

        let mut table = Table::new(["Id", "Date", "Doctor", "Diagnosis", "Medicines"]);
        for prescription in &prescriptions {
            let medicines = prescription
                .medicines
                .iter()
                .map(|m| format!("{} {}", m.name, m.dosage).trim().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            table.row([
                prescription.id.to_string(),
                self.output.date(prescription.date),
                or_dash(&prescription.doctor_name),
                or_dash(&prescription.diagnosis),
                or_dash(&medicines),
            ]);
        }
        self.output.table(&table);
        Ok(())
    }

    async fn reports(&self) -> Result<(), ApiError> {
        let reports = self.records_use_case.reports().await?;

        let mut table = Table::new(["Id", "Date", "Title", "Category", "File"]);
        for report in &reports {
            table.row([
                report.id.to_string(),
                self.output.date(report.date),
                or_dash(&report.title),
                or_dash(&report.category),
                or_dash(&report.file_path),
            ]);
        }
        self.output.table(&table);
        Ok(())
    }

    async fn notifications(&self, unread_only: bool) -> Result<(), ApiError> {
        let notifications = self.records_use_case.notifications().await?;
        self.output
            .line(format!("{} unread", unread_count(&notifications)));

        let mut table = Table::new(["", "Received", "Title", "Message"]);
        for notification in notifications
            .iter()
            .filter(|n| !unread_only || !n.is_read)
        {
            table.row([
                if notification.is_read { "" } else { "•" }.to_string(),
                or_dash(&notification.created_at),
                or_dash(&notification.title),
                notification.message.clone(),
            ]);
        }
        self.output.table(&table);
        Ok(())
    }
}

fn password_from(arg: Option<String>) -> Result<Password, ApiError> {
    if let Some(password) = arg {
        return Ok(Password::new(password));
    }
    match read_secret("Password: ") {
        Ok(Some(secret)) => Ok(Password::new(secret.as_str())),
        Ok(None) => Err(ApiError::unexpected("cancelled")),
        Err(e) => Err(ApiError::unexpected(format!("failed to read password: {e}"))),
    }
}

/// Resolves `query` to one doctor: an exact id, or a unique name or
/// specialization match.
fn pick_doctor<'a>(doctors: &'a [Doctor], query: &str) -> Result<&'a Doctor, ApiError> {
    if let Ok(id) = query.trim().parse::<u64>() {
        return doctors
            .iter()
            .find(|d| d.id.as_u64() == id)
            .ok_or_else(|| ApiError::unexpected(format!("no doctor with id {id}")));
    }

    match filter_doctors(doctors, query).as_slice() {
        [] => Err(ApiError::unexpected(format!("no doctor matches \"{query}\""))),
        [doctor] => Ok(*doctor),
        many => Err(ApiError::unexpected(format!(
            "\"{query}\" matches {} doctors ({}); use the doctor id",
            many.len(),
            many.iter()
                .map(|d| format!("{} #{}", d.display_name(), d.id))
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

fn family_table(members: &[FamilyMember]) -> Table {
    let mut table = Table::new(["Id", "Name", "Relation", "Age", "Phone", "Blood", "Health notes"]);
    for member in members {
        table.row([
            member.id.to_string(),
            member.name().to_string(),
            or_dash(&member.details.relation),
            if member.details.age == 0 {
                "-".to_string()
            } else {
                member.details.age.to_string()
            },
            or_dash(&member.details.phone),
            or_dash(&member.details.blood_group),
            if member.has_health_notes() { "yes" } else { "-" }.to_string(),
        ]);
    }
    table
}

fn print_profile(output: &Output, profile: &UserProfile) {
    let age = profile
        .age_on(Local::now().date_naive())
        .map_or_else(|| "-".to_string(), |age| age.to_string());
    output.fields(&[
        ("Name", or_dash(&profile.name)),
        ("Email", or_dash(&profile.email)),
        ("Mobile", or_dash(&profile.mobile)),
        ("Date of birth", output.date(profile.dob)),
        ("Age", age),
        ("Gender", or_dash(&profile.gender)),
        ("Blood group", or_dash(&profile.blood_group)),
        ("Address", or_dash(&profile.address)),
    ]);
}

fn print_doctor(output: &Output, doctor: &Doctor) {
    output.fields(&[
        ("Name", doctor.display_name()),
        ("Specialization", or_dash(&doctor.specialization)),
        ("Experience", format!("{} years", doctor.experience)),
        ("Fee", format!("₹{:.0}", doctor.fee)),
        ("Rating", format!("{:.1}", doctor.rating)),
        (
            "Status",
            output.badge(doctor.status.as_str(), doctor.status.badge_color()),
        ),
        ("Email", or_dash(&doctor.email)),
        ("Mobile", or_dash(&doctor.mobile)),
    ]);
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
