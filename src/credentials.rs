//! The stand-in login policy.
//!
//! There is no account database behind this. The administrator account is
//! hard-coded and anyone else gets in with any non-empty email and password.

use crate::{Role, User};
use std::fmt::{self, Debug, Formatter};

pub const ADMIN_EMAIL: &str = "admin@skillpulse.com";
pub const ADMIN_PASSWORD: &str = "admin123";

const ADMIN_ID: &str = "1";
const ADMIN_NAME: &str = "Administrator";
const USER_ID: &str = "2";

/// An email and password pair as typed into the login form.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new<E, P>(email: E, password: P) -> Self
    where
        E: Into<String>,
        P: Into<String>,
    {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Figure out who `credentials` belong to, if anyone.
pub fn authenticate(credentials: &Credentials) -> Option<User> {
    let Credentials { email, password } = credentials;

    if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
        return Some(administrator());
    }

    if email.is_empty() || password.is_empty() {
        return None;
    }

    Some(User::new(USER_ID, display_name_from_email(email), email.as_str()))
}

/// The built-in administrator account.
pub fn administrator() -> User {
    User {
        id: ADMIN_ID.into(),
        name: String::from(ADMIN_NAME),
        email: String::from(ADMIN_EMAIL),
        role: Role::Admin,
        skills: None,
        resume_analyzed: None,
    }
}

/// Everything before the first `@`, or the whole thing if there isn't one.
pub fn display_name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_credentials_give_the_administrator() {
        let got = authenticate(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .unwrap();

        assert_eq!(got, administrator());
        assert_eq!(got.name, "Administrator");
        assert_eq!(got.role, Role::Admin);
    }

    #[test]
    fn admin_email_with_the_wrong_password_is_a_regular_user() {
        let got =
            authenticate(&Credentials::new(ADMIN_EMAIL, "letmein")).unwrap();

        assert_eq!(got.role, Role::User);
        assert_eq!(got.name, "admin");
    }

    #[test]
    fn any_other_credentials_give_a_regular_user() {
        let should_be = User::new("2", "x", "x@y.com");

        let got = authenticate(&Credentials::new("x@y.com", "anything"));

        assert_eq!(got, Some(should_be));
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(authenticate(&Credentials::new("", "")), None);
        assert_eq!(authenticate(&Credentials::new("a@b.com", "")), None);
        assert_eq!(authenticate(&Credentials::new("", "hunter2")), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name_from_email("jane.doe@example.com"), "jane.doe");
        assert_eq!(display_name_from_email("no-at-sign"), "no-at-sign");
        assert_eq!(display_name_from_email("@example.com"), "");
        assert_eq!(display_name_from_email("a@b@c"), "a");
    }

    #[test]
    fn debug_output_hides_the_password() {
        let got = format!("{:?}", Credentials::new("a@b.com", "hunter2"));

        assert!(!got.contains("hunter2"));
        assert!(got.contains("a@b.com"));
    }
}
