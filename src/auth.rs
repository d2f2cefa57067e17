//! Interface to the external authentication collaborator.
//!
//! Session identity is owned entirely by the [`AuthProvider`]; the store
//! never holds a copy of the user.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Marketplace subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Enterprise,
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Pro => write!(f, "Pro"),
            Self::Enterprise => write!(f, "Enterprise"),
        }
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identity.
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub tier: SubscriptionTier,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.avatar_url.is_none()
    }

    /// The user with this update applied.
    pub fn apply_to(&self, user: &User) -> User {
        User {
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| user.display_name.clone()),
            avatar_url: self.avatar_url.clone().or_else(|| user.avatar_url.clone()),
            ..user.clone()
        }
    }
}

/// The authentication service the UI signs in through.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The current identity, if signed in.
    fn user(&self) -> Option<User>;

    /// End the session.
    async fn sign_out(&self) -> Result<()>;

    /// Update profile fields and return the updated user.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            display_name: "Ada".to_string(),
            avatar_url: Some("https://cdn.example/a.png".to_string()),
            tier: SubscriptionTier::Pro,
        }
    }

    #[test]
    fn test_apply_partial_update() {
        let update = ProfileUpdate {
            display_name: Some("Ada L.".to_string()),
            avatar_url: None,
        };
        let updated = update.apply_to(&user());
        assert_eq!(updated.display_name, "Ada L.");
        assert_eq!(updated.avatar_url, user().avatar_url);
        assert_eq!(updated.tier, SubscriptionTier::Pro);
    }

    #[test]
    fn test_empty_update() {
        let update = ProfileUpdate::default();
        assert!(update.is_empty());
        assert_eq!(update.apply_to(&user()), user());
    }

    #[test]
    fn test_user_wire_format() {
        let json = serde_json::to_value(user()).unwrap();
        assert_eq!(json["displayName"], "Ada");
        assert_eq!(json["tier"], "pro");
    }
}
