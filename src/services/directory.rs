use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::models::user::{UpdateUserInput, UserRecord, UserSummary};
use crate::utils::validator::{validate_fields, ValidationError};

/// Failures reported by [`UserDirectory`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email is already registered.")]
    EmailTaken,

    #[error("Username is already taken.")]
    UsernameTaken,

    #[error("User not found.")]
    NotFound,

    #[error("Invalid email or password.")]
    InvalidCredentials,
}

/// Slot-ordered record table with a unique index per key.
///
/// Invariants: every slot appears exactly once in each index, and
/// `by_email[r.email] == by_username[r.username] == slot of r`.
#[derive(Debug, Default)]
struct Records {
    slots: BTreeMap<u64, UserRecord>,
    by_email: HashMap<String, u64>,
    by_username: HashMap<String, u64>,
    next_slot: u64,
}

impl Records {
    fn get(&self, slot: u64) -> Result<&UserRecord, DirectoryError> {
        self.slots.get(&slot).ok_or(DirectoryError::NotFound)
    }

    fn get_mut(&mut self, slot: u64) -> Result<&mut UserRecord, DirectoryError> {
        self.slots.get_mut(&slot).ok_or(DirectoryError::NotFound)
    }

    fn insert(&mut self, record: UserRecord) {
        let slot = self.next_slot;
        self.next_slot += 1;
        self.by_email.insert(record.email.clone(), slot);
        self.by_username.insert(record.username.clone(), slot);
        self.slots.insert(slot, record);
    }

    fn rekey(&mut self, slot: u64, new_email: String) -> Result<(), DirectoryError> {
        let record = self.slots.get_mut(&slot).ok_or(DirectoryError::NotFound)?;
        self.by_email.remove(&record.email);
        self.by_email.insert(new_email.clone(), slot);
        record.email = new_email;
        Ok(())
    }

    fn rename(&mut self, slot: u64, new_username: String) -> Result<(), DirectoryError> {
        let record = self.slots.get_mut(&slot).ok_or(DirectoryError::NotFound)?;
        self.by_username.remove(&record.username);
        self.by_username.insert(new_username.clone(), slot);
        record.username = new_username;
        Ok(())
    }

    fn remove(&mut self, slot: u64) -> Result<UserRecord, DirectoryError> {
        let record = self.slots.remove(&slot).ok_or(DirectoryError::NotFound)?;
        self.by_email.remove(&record.email);
        self.by_username.remove(&record.username);
        Ok(record)
    }
}

/// In-memory user directory keyed by email, with usernames kept unique alongside.
///
/// Each operation holds the lock for its full duration, so multi-step
/// updates never interleave with other writers. Records are listed in
/// registration order; changing a record's email does not move it.
#[derive(Debug, Default)]
pub struct UserDirectory {
    records: RwLock<Records>,
}

impl UserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Records> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Records> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a new user.
    ///
    /// Fails on the first broken validation rule, then if the email is
    /// registered, then if the username is taken.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DirectoryError> {
        validate_fields(username, email, password)?;

        let mut records = self.write();
        if records.by_email.contains_key(email) {
            tracing::debug!("Registration rejected, email in use: {}", email);
            return Err(DirectoryError::EmailTaken);
        }
        if records.by_username.contains_key(username) {
            tracing::debug!("Registration rejected, username in use: {}", username);
            return Err(DirectoryError::UsernameTaken);
        }

        records.insert(UserRecord {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });

        tracing::info!("User registered: {}", username);
        Ok(())
    }

    /// Check credentials. Unknown email and wrong password are indistinguishable.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<(), DirectoryError> {
        let records = self.read();
        let matches = records
            .by_email
            .get(email)
            .and_then(|&slot| records.slots.get(&slot))
            .is_some_and(|record| record.password == password);

        if !matches {
            tracing::debug!("Authentication failed for {}", email);
            return Err(DirectoryError::InvalidCredentials);
        }
        Ok(())
    }

    /// Full record for a username, password included
    pub fn find_by_username(&self, username: &str) -> Result<UserRecord, DirectoryError> {
        let records = self.read();
        let slot = *records.by_username.get(username).ok_or(DirectoryError::NotFound)?;
        records.get(slot).cloned()
    }

    /// Full record for an email, password included
    pub fn find_by_email(&self, email: &str) -> Result<UserRecord, DirectoryError> {
        let records = self.read();
        let slot = *records.by_email.get(email).ok_or(DirectoryError::NotFound)?;
        records.get(slot).cloned()
    }

    /// Snapshot of every user, without passwords, in registration order
    pub fn list_all(&self) -> Vec<UserSummary> {
        self.read().slots.values().map(UserSummary::from).collect()
    }

    /// Update the user currently named `username`.
    ///
    /// All three new fields are required and validated as for registration.
    /// Every uniqueness check runs before the first mutation, so a rejected
    /// update leaves the record untouched.
    pub fn update(&self, username: &str, input: UpdateUserInput) -> Result<(), DirectoryError> {
        let mut records = self.write();
        let slot = *records.by_username.get(username).ok_or(DirectoryError::NotFound)?;

        validate_fields(
            input.new_username.as_deref().unwrap_or_default(),
            input.new_email.as_deref().unwrap_or_default(),
            input.new_password.as_deref().unwrap_or_default(),
        )?;

        let current_email = records.get(slot)?.email.clone();

        let new_email = input
            .new_email
            .filter(|email| !email.is_empty() && *email != current_email);
        if let Some(email) = &new_email {
            if records.by_email.contains_key(email) {
                tracing::debug!("Update of {} rejected, email in use: {}", username, email);
                return Err(DirectoryError::EmailTaken);
            }
        }

        let new_username = input.new_username.filter(|name| !name.is_empty());
        if let Some(name) = &new_username {
            if records.by_username.get(name).is_some_and(|&owner| owner != slot) {
                tracing::debug!("Update of {} rejected, username in use: {}", username, name);
                return Err(DirectoryError::UsernameTaken);
            }
        }

        if let Some(email) = new_email {
            records.rekey(slot, email)?;
        }
        if let Some(name) = new_username {
            records.rename(slot, name)?;
        }
        if let Some(password) = input.new_password.filter(|p| !p.is_empty()) {
            records.get_mut(slot)?.password = password;
        }

        tracing::info!("User updated: {}", username);
        Ok(())
    }

    /// Remove the user named `username`, returning the removed record
    pub fn delete_by_username(&self, username: &str) -> Result<UserRecord, DirectoryError> {
        let mut records = self.write();
        let slot = *records.by_username.get(username).ok_or(DirectoryError::NotFound)?;
        let record = records.remove(slot)?;

        tracing::info!("User deleted: {}", record.username);
        Ok(record)
    }
}
