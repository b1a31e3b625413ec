//! The views a front end can navigate to.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A navigable page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Dashboard,
    ResumeAnalyzer,
    SkillGap,
    Insights,
    About,
    Login,
    Admin,
}

impl View {
    pub const ALL: [View; 8] = [
        View::Home,
        View::Dashboard,
        View::ResumeAnalyzer,
        View::SkillGap,
        View::Insights,
        View::About,
        View::Login,
        View::Admin,
    ];

    /// The views linked from the navigation bar, in display order.
    pub const NAVIGATION: [View; 6] = [
        View::Home,
        View::Dashboard,
        View::ResumeAnalyzer,
        View::SkillGap,
        View::Insights,
        View::About,
    ];

    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Dashboard => "/dashboard",
            View::ResumeAnalyzer => "/resume-analyzer",
            View::SkillGap => "/skill-gap",
            View::Insights => "/insights",
            View::About => "/about",
            View::Login => "/login",
            View::Admin => "/admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Dashboard => "Trends",
            View::ResumeAnalyzer => "Resume Analyzer",
            View::SkillGap => "Skill Gap",
            View::Insights => "Insights",
            View::About => "About",
            View::Login => "Sign In",
            View::Admin => "Admin",
        }
    }

    /// Only administrators may open a protected view.
    pub fn is_protected(self) -> bool { self == View::Admin }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("No view is mounted at \"{}\"", path)]
pub struct UnknownView {
    path: String,
}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<View, Self::Err> {
        View::ALL
            .iter()
            .copied()
            .find(|view| view.path() == s)
            .ok_or_else(|| UnknownView {
                path: s.to_string(),
            })
    }
}
