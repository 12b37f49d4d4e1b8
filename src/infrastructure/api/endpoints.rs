//! Backend endpoint table.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// How request fields travel. GET endpoints always use the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Query,
    Form,
    Json,
}

/// A PHP script below the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: Method,
    pub encoding: Encoding,
}

impl Endpoint {
    const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::Get,
            encoding: Encoding::Query,
        }
    }

    const fn form(path: &'static str) -> Self {
        Self {
            path,
            method: Method::Post,
            encoding: Encoding::Form,
        }
    }

    const fn json(path: &'static str) -> Self {
        Self {
            path,
            method: Method::Post,
            encoding: Encoding::Json,
        }
    }

    /// Joins the script path onto `base_url`, tolerating a trailing slash.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path)
    }
}

pub const LOGIN: Endpoint = Endpoint::form("login.php");
pub const DOCTOR_LOGIN: Endpoint = Endpoint::form("doctor_login.php");
pub const SIGNUP: Endpoint = Endpoint::form("signup.php");
pub const DOCTOR_SIGNUP: Endpoint = Endpoint::form("doctor_signup.php");
pub const HEALTH: Endpoint = Endpoint::get("health.php");

pub const GET_PROFILE: Endpoint = Endpoint::get("get_profile.php");
pub const UPDATE_PROFILE: Endpoint = Endpoint::json("update_profile.php");
pub const GET_DOCTOR_PROFILE: Endpoint = Endpoint::get("get_doctor_profile.php");
pub const UPDATE_DOCTOR_STATUS: Endpoint = Endpoint::form("update_doctor_status.php");
pub const GET_DOCTORS: Endpoint = Endpoint::get("get_doctors.php");

pub const BOOK_APPOINTMENT: Endpoint = Endpoint::json("book_appointment.php");
pub const GET_APPOINTMENTS: Endpoint = Endpoint::get("get_appointments.php");
pub const GET_PRESCRIPTIONS: Endpoint = Endpoint::get("get_prescriptions.php");
pub const GET_REPORTS: Endpoint = Endpoint::get("get_reports.php");
pub const GET_NOTIFICATIONS: Endpoint = Endpoint::get("get_notifications.php");

pub const GET_FAMILY_MEMBERS: Endpoint = Endpoint::get("get_family_members.php");
pub const ADD_FAMILY_MEMBER: Endpoint = Endpoint::json("add_family_member.php");
pub const UPDATE_FAMILY_MEMBER: Endpoint = Endpoint::json("update_family_member.php");
pub const DELETE_FAMILY_MEMBER: Endpoint = Endpoint::form("delete_family_member.php");

pub const EMERGENCY_REQUEST: Endpoint = Endpoint::json("emergency_request.php");
pub const BOOK_HOME_SERVICE: Endpoint = Endpoint::json("book_home_service.php");
