use crate::models::User;

use super::{unique_id, unique_suffix};

pub const DEFAULT_PASSWORD: &str = "Secret123!";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub user_status: Option<i32>,
}

impl UserPatch {
    fn apply_to(self, user: &mut User) {
        if let Some(id) = self.id {
            user.id = Some(id);
        }
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(first_name) = self.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(email) = self.email {
            user.email = Some(email);
        }
        if let Some(password) = self.password {
            user.password = Some(password);
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
        if let Some(user_status) = self.user_status {
            user.user_status = Some(user_status);
        }
    }
}

/// A fully populated user with a unique username and matching email.
pub fn build(patch: UserPatch) -> User {
    let suffix = unique_suffix();
    let mut user = User {
        id: Some(unique_id()),
        username: format!("user_{suffix}"),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        email: Some(format!("user_{suffix}@example.com")),
        password: Some(DEFAULT_PASSWORD.to_string()),
        phone: Some("555-0100".to_string()),
        user_status: Some(1),
    };
    patch.apply_to(&mut user);
    user
}

/// Only a username (`minimaluser_<id>`); every other field is left out of the payload.
pub fn minimal() -> User {
    User {
        id: None,
        username: format!("minimaluser_{}", unique_suffix()),
        first_name: None,
        last_name: None,
        email: None,
        password: None,
        phone: None,
        user_status: None,
    }
}

/// `count` distinct users for the bulk-create endpoints.
pub fn batch(count: usize) -> Vec<User> {
    (0..count).map(|_| build(UserPatch::default())).collect()
}

pub fn update(user: &User, patch: UserPatch) -> User {
    let mut updated = user.clone();
    patch.apply_to(&mut updated);
    updated
}
