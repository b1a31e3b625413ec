use serde_derive::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    ops::Deref,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

/// The last id handed out by [`UserId::generate()`], in milliseconds since
/// the Unix epoch.
static LAST_GENERATED: AtomicU64 = AtomicU64::new(0);

/// A unique user identifier.
#[derive(
    Debug, Clone, PartialEq, Hash, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a fresh id based on the current time in milliseconds.
    ///
    /// Ids generated by the same process are strictly increasing, so two
    /// registrations within the same millisecond still get different ids.
    pub fn generate() -> UserId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        let mut last = LAST_GENERATED.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);

            match LAST_GENERATED.compare_exchange_weak(
                last,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return UserId(next.to_string()),
                Err(actual) => last = actual,
            }
        }
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl<S: Into<String>> From<S> for UserId {
    fn from(other: S) -> UserId { UserId(other.into()) }
}

impl Deref for UserId {
    type Target = str;

    fn deref(&self) -> &str { &self.0 }
}

impl FromStr for UserId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<UserId, Self::Err> { Ok(UserId::from(s)) }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let first = UserId::generate();
        let second = UserId::generate();

        assert_ne!(first, second);
        assert!(
            second.parse::<u64>().unwrap() > first.parse::<u64>().unwrap()
        );
    }

    #[test]
    fn serializes_as_a_plain_string() {
        let id = UserId::from("42");

        let got = serde_json::to_string(&id).unwrap();

        assert_eq!(got, "\"42\"");
    }
}
