//! Shopper account record.

use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// A logged-in shopper.
///
/// Created from the account directory at login, updated when the profile
/// image changes, and dropped at logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Reference (URI or path) to the profile photo, if one was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    /// Create a user without a profile image.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: Email) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email,
            profile_image: None,
        }
    }

    /// Returns a copy with the profile image replaced.
    #[must_use]
    pub fn with_profile_image(mut self, reference: impl Into<String>) -> Self {
        self.profile_image = Some(reference.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let user = User::new("2", "Sarah Johnson", Email::parse("sarah.johnson@email.com").unwrap())
            .with_profile_image("file:///photos/me.jpg");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "2");
        assert_eq!(json["profileImage"], "file:///photos/me.jpg");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_profile_image_is_optional() {
        let user: User = serde_json::from_str(
            r#"{"id":"1","name":"Ethan Carter","email":"ethan.carter@email.com"}"#,
        )
        .unwrap();
        assert!(user.profile_image.is_none());
        assert!(!serde_json::to_string(&user).unwrap().contains("profileImage"));
    }
}
