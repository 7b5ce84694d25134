use serde::{Deserialize, Serialize};
use shared::User;

/// A user record as kept under `appUsers`, password included
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredUser {
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl StoredUser {
    pub fn to_public(&self) -> User {
        User {
            user_id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    /// Accounts present before anyone signs up
    pub fn defaults() -> Vec<StoredUser> {
        vec![
            StoredUser {
                user_id: 1,
                username: "john_doe".to_string(),
                email: "john@example.com".to_string(),
                password: "password123".to_string(),
            },
            StoredUser {
                user_id: 2,
                username: "jane_smith".to_string(),
                email: "jane@example.com".to_string(),
                password: "password456".to_string(),
            },
        ]
    }
}
