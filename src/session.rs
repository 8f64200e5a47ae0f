use log::{info, warn};

use crate::{read_logged_in, write_logged_in, KeyValueStore, NoteboardError, Result};

const VALID_USERNAME: &str = "user";
const VALID_PASSWORD: &str = "pass";

/// Message shown inline after a failed login
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Tracks whether the user is logged in and mirrors the flag to the store.
pub struct SessionManager<S: KeyValueStore> {
    store: S,
    logged_in: bool,
    username: String,
    password: String,
    error: Option<String>,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Restores the session flag from the store
    pub fn load(store: S) -> Result<Self> {
        let logged_in = read_logged_in(&store)?;
        info!("Session restored, logged in: {}", logged_in);

        Ok(Self {
            store,
            logged_in,
            username: String::new(),
            password: String::new(),
            error: None,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Checks the credential pair and starts a session on a match.
    ///
    /// On a mismatch the flag is left as it was, the inline error is set
    /// and nothing is written to the store.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.username = username.to_string();
        self.password = password.to_string();
        self.login_with_fields()
    }

    /// Submits the typed username and password
    pub fn login_with_fields(&mut self) -> Result<()> {
        if self.username == VALID_USERNAME && self.password == VALID_PASSWORD {
            self.logged_in = true;
            self.error = None;
            write_logged_in(&self.store, true)?;
            info!("User {} logged in", self.username);
            Ok(())
        } else {
            warn!("Rejected login attempt for {:?}", self.username);
            self.error = Some(INVALID_CREDENTIALS_MESSAGE.to_string());
            Err(NoteboardError::InvalidCredentials)
        }
    }

    /// Ends the session and clears the typed credentials
    pub fn logout(&mut self) -> Result<()> {
        self.logged_in = false;
        self.username.clear();
        self.password.clear();
        write_logged_in(&self.store, false)?;
        info!("Logged out");
        Ok(())
    }
}
