//! User store: id → account record, persisted as a single JSON object.

use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Access role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Instructor => write!(f, "instructor"),
        }
    }
}

/// A registered account. Created once at registration, never updated.
///
/// Passwords are stored and compared in plain text; hardening them is an
/// explicit non-goal of this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Owns the id → [`User`] map behind a single mutation entry point and
/// rewrites the backing file wholesale on every insert.
pub struct UserStore {
    path: PathBuf,
    users: Mutex<HashMap<String, User>>,
}

impl UserStore {
    /// Loads the store from `path`. A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let users = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    /// Looks up an account by id.
    pub fn get(&self, id: &str) -> Option<User> {
        self.users.lock().expect("user store lock poisoned").get(id).cloned()
    }

    /// Registers a new account and persists the store.
    ///
    /// Fails with [`StoreError::DuplicateUser`] if the id is taken, in which
    /// case neither the in-memory map nor the file is touched.
    pub fn insert(&self, id: &str, user: User) -> Result<(), StoreError> {
        let mut users = self.users.lock().expect("user store lock poisoned");
        if users.contains_key(id) {
            return Err(StoreError::DuplicateUser);
        }
        users.insert(id.to_string(), user);
        let result = Self::persist(&self.path, &users);
        if result.is_err() {
            // Keep memory consistent with disk when the write fails.
            users.remove(id);
        }
        result
    }

    fn persist(path: &Path, users: &HashMap<String, User>) -> Result<(), StoreError> {
        fs::write(path, serde_json::to_string(users)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(email: &str) -> User {
        User {
            email: email.into(),
            password: "hunter2".into(),
            role: Role::Student,
        }
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::load(dir.path().join("users.json")).unwrap();
        assert!(store.get("u100").is_none());
    }

    #[test]
    fn insert_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let store = UserStore::load(&path).unwrap();
        store.insert("u100", student("u100@example.com")).unwrap();

        let reloaded = UserStore::load(&path).unwrap();
        let user = reloaded.get("u100").unwrap();
        assert_eq!(user.email, "u100@example.com");
        assert_eq!(user.role, Role::Student);
    }

    #[test]
    fn duplicate_insert_is_rejected_and_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let store = UserStore::load(&path).unwrap();
        store.insert("u100", student("first@example.com")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = store.insert("u100", student("second@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser));

        // Second attempt changed neither memory nor disk.
        assert_eq!(store.get("u100").unwrap().email, "first@example.com");
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn ids_are_unique_across_roles() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::load(dir.path().join("users.json")).unwrap();

        store.insert("staff1", student("s@example.com")).unwrap();
        let err = store
            .insert(
                "staff1",
                User {
                    email: "i@example.com".into(),
                    password: "pw".into(),
                    role: Role::Instructor,
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser));
    }
}
