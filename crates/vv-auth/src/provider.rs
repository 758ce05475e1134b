//! The session seam.
//!
//! `IdentityProvider` abstracts over whatever actually authenticates people
//! (a hosted identity service in production, [`InProcessProvider`] in tests).
//! Sign-in state is published through a `tokio::sync::watch` channel so UI
//! layers can react to session changes without polling.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::watch;

use vv_core::enums::Role;
use vv_core::identity::Identity;

use crate::error::AuthError;
use crate::resolver::RoleResolver;

pub trait IdentityProvider {
    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownAccount` or `AuthError::InvalidCredentials`
    /// on failure; the current session is left untouched.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Identity, AuthError>> + Send;

    /// End the current session. A no-op when already signed out.
    fn sign_out(&self) -> impl Future<Output = ()> + Send;

    /// The current session, if any.
    fn current(&self) -> Option<Identity>;

    /// Subscribe to session changes. The receiver yields the new session
    /// state (`None` after sign-out) on every change.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}

struct Account {
    password: String,
    uid: String,
    name: String,
    stored_role: Option<Role>,
}

/// Credential-map provider for tests and local development.
pub struct InProcessProvider {
    resolver: RoleResolver,
    accounts: Mutex<HashMap<String, Account>>,
    session_tx: watch::Sender<Option<Identity>>,
}

impl InProcessProvider {
    #[must_use]
    pub fn new(resolver: RoleResolver) -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            resolver,
            accounts: Mutex::new(HashMap::new()),
            session_tx,
        }
    }

    /// Register an account. `stored_role` stands in for the persisted
    /// profile role; pass `None` for a first-time sign-in.
    #[must_use]
    pub fn with_account(
        self,
        email: &str,
        password: &str,
        uid: &str,
        name: &str,
        stored_role: Option<Role>,
    ) -> Self {
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.insert(
                email.to_ascii_lowercase(),
                Account {
                    password: password.to_string(),
                    uid: uid.to_string(),
                    name: name.to_string(),
                    stored_role,
                },
            );
        }
        self
    }
}

impl IdentityProvider for InProcessProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = {
            let accounts = self
                .accounts
                .lock()
                .map_err(|e| AuthError::Provider(e.to_string()))?;
            let account = accounts
                .get(&email.to_ascii_lowercase())
                .ok_or_else(|| AuthError::UnknownAccount(email.to_string()))?;
            if account.password != password {
                return Err(AuthError::InvalidCredentials);
            }
            Identity {
                uid: account.uid.clone(),
                email: email.to_ascii_lowercase(),
                name: account.name.clone(),
                role: self.resolver.resolve(account.stored_role, email),
            }
        };

        tracing::info!(uid = identity.uid.as_str(), role = identity.role.as_str(), "signed in");
        self.session_tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) {
        if self.session_tx.send_replace(None).is_some() {
            tracing::info!("signed out");
        }
    }

    fn current(&self) -> Option<Identity> {
        self.session_tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.session_tx.subscribe()
    }
}
