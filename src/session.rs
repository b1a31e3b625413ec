use crate::{views::View, User};
use serde_derive::{Deserialize, Serialize};

/// The current session, exactly as it gets persisted.
///
/// A session holds at most one [`User`]. When there is no user, nobody is
/// logged in and no protected [`View`] is reachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self { Session::default() }

    pub fn authenticated(user: User) -> Self { Session { user: Some(user) } }

    pub fn current_user(&self) -> Option<&User> { self.user.as_ref() }

    pub fn is_authenticated(&self) -> bool { self.user.is_some() }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(User::is_admin).unwrap_or(false)
    }

    /// Should this session be shown `view`?
    ///
    /// This is advisory. Nothing stops a caller from rendering a protected
    /// view anyway.
    pub fn can_view(&self, view: View) -> bool {
        !view.is_protected() || self.is_admin()
    }

    /// The views a navigation bar would link to for this session.
    pub fn navigation(&self) -> Vec<View> {
        let mut views = View::NAVIGATION.to_vec();

        if self.can_view(View::Admin) {
            views.push(View::Admin);
        }

        views
    }
}
