//! # Accounts & Session
//!
//! Sign-in, registration, admin user management and the settings screen.
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen            Operation                 Failure style              │
//! │  ──────            ─────────                 ─────────────              │
//! │  Login             login / logout            AuthError (message)        │
//! │  Sign up           register                  AuthError (email taken)    │
//! │  Admin › Users     add_user / update_user /  none: raw CRUD             │
//! │                    delete_user                                          │
//! │                    admin_update_user /       AdminError (self guards)   │
//! │                    admin_delete_user                                    │
//! │  Settings          update_profile /          AuthError (validation,     │
//! │                    change_password           wrong current password)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are compared in plain text. Email uniqueness is only checked
//! when registering; admin edits can produce duplicates.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AdminError, AdminResult, AuthError, AuthResult, ValidationError};
use crate::store::PosStore;
use crate::types::{NewUser, Role, User, UserEdit};
use crate::validation::{validate_password, validate_profile, validate_user_edit};

impl PosStore {
    // =========================================================================
    // Session
    // =========================================================================

    /// Signs in with an exact email/password match.
    ///
    /// On failure the session is left exactly as it was.
    pub fn login(&mut self, email: &str, password: &str) -> AuthResult<User> {
        let Some(user) = self
            .state
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
        else {
            debug!(email = %email, "Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        let user = user.clone();
        info!(user_id = %user.id, role = %user.role, "User signed in");
        self.state.current_user = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.state.current_user.take() {
            info!(user_id = %user.id, "User signed out");
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user.as_ref()
    }

    // =========================================================================
    // Registration & admin CRUD
    // =========================================================================

    /// Creates an account unless the email is already in use.
    ///
    /// The comparison is exact and case-sensitive. The new account is not
    /// signed in.
    pub fn register(&mut self, new_user: NewUser) -> AuthResult<User> {
        if self.state.users.iter().any(|u| u.email == new_user.email) {
            debug!(email = %new_user.email, "Registration rejected: email taken");
            return Err(AuthError::EmailTaken {
                email: new_user.email,
            });
        }

        Ok(self.add_user(new_user))
    }

    /// Creates an account without any uniqueness check.
    pub fn add_user(&mut self, new_user: NewUser) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            role: new_user.role,
            created_at: Utc::now(),
        };

        info!(user_id = %user.id, role = %user.role, "User created");
        self.state.users.push(user.clone());
        user
    }

    /// Replaces the account with the same id.
    ///
    /// If it is the signed-in account, the session copy is replaced too so
    /// the change shows up immediately. Unknown ids leave the user list alone.
    pub fn update_user(&mut self, user: User) {
        if self
            .state
            .current_user
            .as_ref()
            .is_some_and(|current| current.id == user.id)
        {
            self.state.current_user = Some(user.clone());
        }

        match self.state.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                debug!(user_id = %user.id, "Updating user");
                *existing = user;
            }
            None => debug!(user_id = %user.id, "Update ignored: unknown user"),
        }
    }

    /// Removes an account. The session is not touched.
    pub fn delete_user(&mut self, user_id: &str) {
        debug!(user_id = %user_id, "Deleting user");
        self.state.users.retain(|u| u.id != user_id);
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.state.users.iter().find(|u| u.id == id)
    }

    /// Case-insensitive match on name, email or role.
    pub fn search_users(&self, term: &str) -> Vec<&User> {
        let needle = term.trim().to_lowercase();
        self.state
            .users
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.role.label().contains(&needle)
            })
            .collect()
    }

    // =========================================================================
    // Admin screen guards
    // =========================================================================

    /// The admin screen refuses to delete the signed-in account.
    pub fn ensure_can_delete_user(&self, user_id: &str) -> AdminResult<()> {
        if self.is_current_user(user_id) {
            return Err(AdminError::CannotDeleteSelf);
        }
        if self.user(user_id).is_none() {
            return Err(AdminError::UserNotFound(user_id.to_string()));
        }
        Ok(())
    }

    /// The admin screen refuses to let an admin drop their own admin role.
    pub fn ensure_can_update_user(&self, edited: &User) -> AdminResult<()> {
        if self.user(&edited.id).is_none() {
            return Err(AdminError::UserNotFound(edited.id.clone()));
        }
        let demoting_self = self
            .current_user()
            .is_some_and(|me| me.id == edited.id && me.is_admin() && edited.role != Role::Admin);
        if demoting_self {
            return Err(AdminError::CannotDemoteSelf);
        }
        Ok(())
    }

    /// Applies the "Edit User" dialog: form checks, guard checks, then
    /// [`Self::update_user`].
    ///
    /// A blank password keeps the current one.
    pub fn admin_update_user(&mut self, user_id: &str, edit: UserEdit) -> AdminResult<User> {
        validate_user_edit(&edit)?;
        let mut updated = self
            .user(user_id)
            .cloned()
            .ok_or_else(|| AdminError::UserNotFound(user_id.to_string()))?;

        updated.name = edit.name;
        updated.email = edit.email;
        updated.role = edit.role;
        if let Some(password) = edit.password.filter(|p| !p.is_empty()) {
            updated.password = password;
        }

        self.ensure_can_update_user(&updated)?;
        self.update_user(updated.clone());
        Ok(updated)
    }

    /// Applies the delete button: guard check, then [`Self::delete_user`].
    pub fn admin_delete_user(&mut self, user_id: &str) -> AdminResult<()> {
        self.ensure_can_delete_user(user_id)?;
        self.delete_user(user_id);
        Ok(())
    }

    fn is_current_user(&self, user_id: &str) -> bool {
        self.current_user().is_some_and(|me| me.id == user_id)
    }

    // =========================================================================
    // Settings screen
    // =========================================================================

    /// Changes the signed-in user's name and email, stored as given.
    pub fn update_profile(&mut self, name: &str, email: &str) -> AuthResult<User> {
        validate_profile(name, email)?;
        let mut me = self.current_user().cloned().ok_or(AuthError::NotSignedIn)?;

        me.name = name.to_string();
        me.email = email.to_string();
        self.update_user(me.clone());
        Ok(me)
    }

    /// Changes the signed-in user's password.
    ///
    /// ## Checks, in order
    /// 1. someone is signed in
    /// 2. the current password was entered and is correct
    /// 3. the new password is long enough
    /// 4. the confirmation matches
    pub fn change_password(&mut self, current: &str, new: &str, confirm: &str) -> AuthResult<()> {
        let mut me = self.current_user().cloned().ok_or(AuthError::NotSignedIn)?;

        if current.is_empty() {
            return Err(ValidationError::required("Current password").into());
        }
        if current != me.password {
            return Err(AuthError::IncorrectPassword);
        }
        validate_password(new)?;
        if new != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        me.password = new.to_string();
        self.update_user(me);
        info!("Password changed");
        Ok(())
    }
}
