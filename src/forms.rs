//! Validation for the login and registration forms.
//!
//! The [`SessionStore`] accepts anything it is given, so front ends run
//! submissions through these first and show the resulting [`FormError`] next
//! to the offending field.

use crate::{credentials::Credentials, storage::SessionStorage, SessionStore};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};

/// The shortest password the registration form accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
        .expect("The email pattern is valid")
});

/// A form field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

/// Why a form submission was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {} characters", min)]
    PasswordTooShort { min: usize },
    #[error("Please confirm your password")]
    ConfirmationRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// The store turned the login down.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl FormError {
    /// The field this error should be displayed next to.
    pub fn field(&self) -> Field {
        match self {
            FormError::NameRequired => Field::Name,
            FormError::EmailRequired
            | FormError::InvalidEmail
            | FormError::InvalidCredentials => Field::Email,
            FormError::PasswordRequired
            | FormError::PasswordTooShort { .. } => Field::Password,
            FormError::ConfirmationRequired | FormError::PasswordMismatch => {
                Field::ConfirmPassword
            },
        }
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormError> {
        validate_email(&self.email)?;

        if self.password.is_empty() {
            return Err(FormError::PasswordRequired);
        }

        Ok(Credentials::new(self.email.as_str(), self.password.as_str()))
    }
}

impl Debug for LoginForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }

        validate_email(&self.email)?;

        if self.password.is_empty() {
            return Err(FormError::PasswordRequired);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        if self.confirm_password.is_empty() {
            return Err(FormError::ConfirmationRequired);
        }
        if self.confirm_password != self.password {
            return Err(FormError::PasswordMismatch);
        }

        Ok(())
    }
}

impl Debug for RegisterForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

fn validate_email(email: &str) -> Result<(), FormError> {
    if email.is_empty() {
        Err(FormError::EmailRequired)
    } else if !EMAIL.is_match(email) {
        Err(FormError::InvalidEmail)
    } else {
        Ok(())
    }
}

/// Validate the login form and hand it to the store.
pub fn submit_login<S: SessionStorage>(
    store: &mut SessionStore<S>,
    form: &LoginForm,
) -> Result<(), FormError> {
    let credentials = form.validate()?;

    if store.login(&credentials.email, &credentials.password) {
        Ok(())
    } else {
        Err(FormError::InvalidCredentials)
    }
}

/// Validate the registration form and create the account.
pub fn submit_register<S: SessionStorage>(
    store: &mut SessionStore<S>,
    form: &RegisterForm,
) -> Result<(), FormError> {
    form.validate()?;

    if store.register(&form.name, &form.email, &form.password) {
        Ok(())
    } else {
        // registration currently can't be refused
        Err(FormError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{storage::MemoryStorage, Role};

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: String::from("Jane"),
            email: String::from("jane@z.com"),
            password: String::from("secret1"),
            confirm_password: String::from("secret1"),
        }
    }

    #[test]
    fn emails_are_checked() {
        assert_eq!(validate_email(""), Err(FormError::EmailRequired));
        assert_eq!(validate_email("nope"), Err(FormError::InvalidEmail));
        assert_eq!(validate_email("a@b.c"), Err(FormError::InvalidEmail));
        assert_eq!(validate_email("Jane.Doe+x@Example.COM"), Ok(()));
    }

    #[test]
    fn login_requires_a_password() {
        let form = LoginForm {
            email: String::from("x@y.com"),
            password: String::new(),
        };

        let got = form.validate().unwrap_err();

        assert_eq!(got, FormError::PasswordRequired);
        assert_eq!(got.to_string(), "Password is required");
        assert_eq!(got.field(), Field::Password);
    }

    #[test]
    fn valid_registration() {
        assert_eq!(register_form().validate(), Ok(()));
    }

    #[test]
    fn short_passwords_are_refused() {
        let form = RegisterForm {
            password: String::from("abc"),
            confirm_password: String::from("abc"),
            ..register_form()
        };

        let got = form.validate().unwrap_err();

        assert_eq!(got.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn passwords_must_match() {
        let form = RegisterForm {
            confirm_password: String::from("secret2"),
            ..register_form()
        };

        let got = form.validate().unwrap_err();

        assert_eq!(got, FormError::PasswordMismatch);
        assert_eq!(got.to_string(), "Passwords do not match");
        assert_eq!(got.field(), Field::ConfirmPassword);
    }

    #[test]
    fn blank_names_are_refused() {
        let form = RegisterForm {
            name: String::from("   "),
            ..register_form()
        };

        assert_eq!(form.validate(), Err(FormError::NameRequired));
    }

    #[test]
    fn submitting_the_login_form() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let form = LoginForm {
            email: String::from("admin@skillpulse.com"),
            password: String::from("admin123"),
        };

        submit_login(&mut store, &form).unwrap();

        assert_eq!(store.current_user().unwrap().role, Role::Admin);
    }

    #[test]
    fn invalid_forms_never_reach_the_store() {
        let mut store = SessionStore::new(MemoryStorage::new());
        let form = RegisterForm {
            confirm_password: String::new(),
            ..register_form()
        };

        let got = submit_register(&mut store, &form);

        assert_eq!(got, Err(FormError::ConfirmationRequired));
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn submitting_the_registration_form() {
        let mut store = SessionStore::new(MemoryStorage::new());

        submit_register(&mut store, &register_form()).unwrap();

        assert_eq!(store.current_user().unwrap().name, "Jane");
    }

    #[test]
    fn form_debug_output_hides_passwords() {
        let got = format!("{:?}", register_form());

        assert!(!got.contains("secret1"));
    }
}
