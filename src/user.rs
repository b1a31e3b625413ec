use crate::UserId;
use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// What a [`User`] is allowed to see.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    /// Has this user run their resume through the analyzer yet?
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_analyzed: Option<bool>,
}

impl User {
    /// A regular user with no skills and no analyzed resume.
    pub fn new<I, N, E>(id: I, name: N, email: E) -> Self
    where
        I: Into<UserId>,
        N: Into<String>,
        E: Into<String>,
    {
        User {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: Role::User,
            skills: Some(Vec::new()),
            resume_analyzed: Some(false),
        }
    }

    pub fn is_admin(&self) -> bool { self.role == Role::Admin }

    /// The character shown in the navigation bar's avatar bubble.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}
