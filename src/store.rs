//! The authentication state everything else reads from.

use crate::{
    credentials::{self, Credentials},
    storage::SessionStorage,
    Session, User, UserId,
};
use std::{
    cell::RefCell,
    fmt::{self, Debug, Formatter},
    rc::{Rc, Weak},
};

type Listener = Box<dyn FnMut(&Session)>;

/// Holds the one [`Session`] and keeps its persisted copy up to date.
///
/// Every successful `login()`, `register()`, and `logout()` saves the new
/// session through the [`SessionStorage`] and then tells each subscriber, in
/// the order they subscribed.
///
/// A failed save is logged and remembered (see
/// [`SessionStore::last_storage_error()`]), but the in-memory session still
/// changes and the operation still reports success.
pub struct SessionStore<S> {
    session: Session,
    storage: S,
    listeners: Rc<RefCell<Listeners>>,
    last_storage_error: Option<String>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create a store, restoring whatever session `storage` last saved.
    pub fn new(storage: S) -> Self {
        let session = match storage.load() {
            Ok(Some(session)) => {
                if let Some(user) = session.current_user() {
                    log::debug!("Restored the session for {}", user.email);
                }
                session
            },
            Ok(None) => Session::anonymous(),
            Err(e) => {
                log::warn!(
                    "Ignoring the saved session: {}",
                    crate::error_chain(&e)
                );
                Session::anonymous()
            },
        };

        SessionStore {
            session,
            storage,
            listeners: Rc::default(),
            last_storage_error: None,
        }
    }

    /// Try to log in, returning `false` when the credentials are rejected.
    ///
    /// A rejected login leaves the current session untouched.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        match credentials::authenticate(&Credentials::new(email, password)) {
            Some(user) => {
                log::info!("Logged in as {} ({})", user.email, user.role);
                self.replace(Some(user));
                true
            },
            None => {
                log::debug!("Rejected the login attempt for {:?}", email);
                false
            },
        }
    }

    /// Create a brand new account and log into it.
    ///
    /// This always succeeds. Checking that the email is valid or that the
    /// password was typed twice is the caller's job (see
    /// [`crate::forms::RegisterForm`]).
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> bool {
        let user = User::new(UserId::generate(), name, email);
        log::info!("Registered {} as user {}", user.email, user.id);

        self.replace(Some(user));
        true
    }

    /// Forget the current user. Logging out twice is the same as once.
    pub fn logout(&mut self) {
        if let Some(user) = self.session.current_user() {
            log::info!("Logging out {}", user.email);
        }

        self.replace(None);
    }

    pub fn session(&self) -> &Session { &self.session }

    pub fn current_user(&self) -> Option<&User> { self.session.current_user() }

    pub fn storage(&self) -> &S { &self.storage }

    /// Why the most recent save failed, if it did.
    pub fn last_storage_error(&self) -> Option<&str> {
        self.last_storage_error.as_deref()
    }

    /// Call `listener` with the new session after every change.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe()`] is called.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Session) + 'static,
    {
        let id = self.listeners.borrow_mut().insert(Box::new(listener));

        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    fn replace(&mut self, user: Option<User>) {
        self.session.user = user;
        self.persist();
        self.notify();
    }

    fn persist(&mut self) {
        match self.storage.save(&self.session) {
            Ok(_) => self.last_storage_error = None,
            Err(e) => {
                let msg = crate::error_chain(&e);
                log::error!("Unable to save the session: {}", msg);
                self.last_storage_error = Some(msg);
            },
        }
    }

    fn notify(&self) {
        // snapshot the listeners so they can (un)subscribe while we iterate
        let listeners = self.listeners.borrow().snapshot();

        for listener in listeners {
            let mut callback = listener.borrow_mut();
            (&mut *callback)(&self.session);
        }
    }
}

impl<S: Debug> Debug for SessionStore<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.session)
            .field("storage", &self.storage)
            .field("listeners", &self.listeners.borrow().entries.len())
            .field("last_storage_error", &self.last_storage_error)
            .finish()
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Rc<RefCell<Listener>>)>,
}

impl Listeners {
    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|(existing, _)| *existing != id);
    }

    fn snapshot(&self) -> Vec<Rc<RefCell<Listener>>> {
        self.entries.iter().map(|(_, l)| Rc::clone(l)).collect()
    }
}

/// A handle to a listener registered with [`SessionStore::subscribe()`].
///
/// Dropping the handle unsubscribes.
#[must_use = "The listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    listeners: Weak<RefCell<Listeners>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) { drop(self); }

    /// Keep the listener registered for as long as the store lives.
    pub fn detach(self) { std::mem::forget(self); }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(self.id);
        }
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscription").field(&self.id).finish()
    }
}
