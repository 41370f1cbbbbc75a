use crate::error::{InventoryError, Result};
use crate::models::{new_id, now_iso, AuthState, Notification, NotificationType, Theme, User, UserRole};
use crate::store::{Storage, StoreKey};

/// Signed-in user, theme preference and the notification feed.
///
/// Credentials are not verified: any non-empty email and password sign in.
/// The theme lives under its own key and survives logout.
pub struct Session {
    storage: Storage,
    auth: AuthState,
    theme: Theme,
    notifications: Vec<Notification>,
}

impl Session {
    pub fn load(storage: Storage) -> Result<Self> {
        let auth = storage
            .load::<AuthState>(StoreKey::AuthState)?
            .into_option()
            .unwrap_or_default();
        let theme = storage
            .load::<Theme>(StoreKey::Theme)?
            .into_option()
            .unwrap_or_default();
        let notifications = storage
            .load::<Vec<Notification>>(StoreKey::Notifications)?
            .into_option()
            .unwrap_or_default();

        Ok(Self {
            storage,
            auth,
            theme,
            notifications,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.user.as_ref()
    }

    pub fn auth_state(&self) -> &AuthState {
        &self.auth
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        if email.is_empty() || password.is_empty() {
            return Err(InventoryError::InvalidCredentials);
        }

        let name = match email.split('@').next() {
            Some(local) if !local.is_empty() => local.to_string(),
            _ => "User".to_string(),
        };

        let user = User {
            id: "1".to_string(),
            name,
            email: email.to_string(),
            role: UserRole::Admin,
            created_at: now_iso(),
        };

        self.sign_in(user)?;
        self.add_notification(
            NotificationType::Success,
            "Welcome back!",
            "You have successfully logged in to MUN-C.",
        )?;

        tracing::info!(email = %email, "User logged in");
        self.signed_in_user()
    }

    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<&User> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(InventoryError::InvalidCredentials);
        }

        let user = User {
            id: new_id(),
            name: name.to_string(),
            email: email.to_string(),
            role: UserRole::User,
            created_at: now_iso(),
        };

        self.sign_in(user)?;
        self.add_notification(
            NotificationType::Success,
            "Account created!",
            "Welcome to MUN-C Inventory Management System.",
        )?;

        tracing::info!(email = %email, "User signed up");
        self.signed_in_user()
    }

    pub fn logout(&mut self) -> Result<()> {
        self.auth = AuthState::default();
        self.storage.remove(StoreKey::AuthState)?;

        self.add_notification(
            NotificationType::Info,
            "Logged out",
            "You have been successfully logged out.",
        )?;

        tracing::info!("User logged out");
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.storage.save(StoreKey::Theme, &self.theme)?;

        let message = format!("Switched to {} mode successfully.", self.theme.as_str());
        self.add_notification(NotificationType::Info, "Theme Changed", &message)?;

        Ok(self.theme)
    }

    /// Appends an unread notification with a fresh id and timestamp.
    pub fn add_notification(
        &mut self,
        kind: NotificationType,
        title: &str,
        message: &str,
    ) -> Result<&Notification> {
        self.notifications.push(Notification {
            id: new_id(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            read: false,
            created_at: now_iso(),
        });
        self.storage.save(StoreKey::Notifications, &self.notifications)?;

        Ok(&self.notifications[self.notifications.len() - 1])
    }

    /// Returns whether a notification with `id` exists. Already-read entries
    /// are left as they are and nothing is written.
    pub fn mark_as_read(&mut self, id: &str) -> Result<bool> {
        let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };

        if !notification.read {
            notification.read = true;
            self.storage.save(StoreKey::Notifications, &self.notifications)?;
        }

        Ok(true)
    }

    pub fn clear_notifications(&mut self) -> Result<()> {
        self.notifications.clear();
        self.storage.remove(StoreKey::Notifications)
    }

    fn sign_in(&mut self, user: User) -> Result<()> {
        self.auth = AuthState {
            user: Some(user),
            is_authenticated: true,
        };
        self.storage.save(StoreKey::AuthState, &self.auth)
    }

    fn signed_in_user(&self) -> Result<&User> {
        self.auth.user.as_ref().ok_or(InventoryError::NotAuthenticated)
    }
}
