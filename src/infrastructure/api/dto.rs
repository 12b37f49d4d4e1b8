//! Request and response shapes that exist only on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{FamilyMemberId, LoginId, Role, Session, UserId};
use crate::domain::serde_utils::{null_as_empty, string_to_u64};

/// Credentials form. The backend accepts either `email` or `mobile`.
#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<&'a str>,
    pub password: &'a str,
}

impl<'a> LoginForm<'a> {
    #[must_use]
    pub fn new(login_id: &'a LoginId, password: &'a str) -> Self {
        match login_id {
            LoginId::Email(email) => Self {
                email: Some(email.as_str()),
                mobile: None,
                password,
            },
            LoginId::Mobile(mobile) => Self {
                email: None,
                mobile: Some(mobile.as_str()),
                password,
            },
        }
    }
}

/// Account row returned by the login and signup scripts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountData {
    #[serde(default, alias = "user_id", alias = "doctor_id")]
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub mobile: String,
}

impl AccountData {
    /// Builds a session, filling contact fields the server left out.
    #[must_use]
    pub fn into_session(self, role: Role, fallback_email: &str, fallback_mobile: &str) -> Session {
        let email = if self.email.is_empty() {
            fallback_email
        } else {
            &self.email
        };
        let mobile = if self.mobile.is_empty() {
            fallback_mobile
        } else {
            &self.mobile
        };
        Session::new(role, self.id, &self.name).with_contact(email, mobile)
    }
}

/// Id returned by scripts that create a row.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CreatedData {
    #[serde(
        default,
        alias = "member_id",
        alias = "booking_id",
        alias = "request_id",
        with = "string_to_u64"
    )]
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub struct UserQuery {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct RoleQuery {
    pub user_id: UserId,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct DoctorQuery {
    pub doctor_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct StatusForm<'a> {
    pub doctor_id: UserId,
    pub status: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DeleteMemberForm {
    pub user_id: UserId,
    pub member_id: FamilyMemberId,
}

/// Prefixes a payload with the owning account's id.
#[derive(Debug, Serialize)]
pub struct OwnedBy<'a, T: Serialize> {
    pub user_id: UserId,
    #[serde(flatten)]
    pub payload: &'a T,
}

/// Payload for scripts that take no fields.
#[derive(Debug, Serialize)]
pub struct NoFields {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FamilyMember, FamilyMemberDetails};

    #[test]
    fn test_login_form_picks_field() {
        let id = LoginId::parse(" 98765 43210 ");
        let form = LoginForm::new(&id, "secret");
        let json = serde_json::to_value(&form).unwrap();

        assert_eq!(json["mobile"], "9876543210");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_account_data_aliases_and_fallbacks() {
        let data: AccountData =
            serde_json::from_str(r#"{"doctor_id":"14","name":"Dr. Rao"}"#).unwrap();
        let session = data.into_session(Role::Doctor, "rao@example.com", "");

        assert_eq!(session.user_id, UserId(14));
        assert_eq!(session.email, "rao@example.com");
        assert!(session.is_doctor());
    }

    #[test]
    fn test_owned_by_flattens_member() {
        let member = FamilyMember::new(FamilyMemberId(8), FamilyMemberDetails::new("Ravi", "Son"));
        let body = OwnedBy {
            user_id: UserId(3),
            payload: &member,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["user_id"], 3);
        assert_eq!(json["id"], 8);
        assert_eq!(json["relation"], "Son");
    }

    #[test]
    fn test_created_data_alias() {
        let data: CreatedData = serde_json::from_str(r#"{"member_id":"31"}"#).unwrap();
        assert_eq!(data.id, 31);
    }
}
