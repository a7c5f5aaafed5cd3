use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::UserRole;
use super::non_blank;

const DEFAULT_USER_NAME: &str = "Demo User";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

/// Sign-in / sign-up form values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency_contact: String,
}

impl User {
    /// Build a user record from form input. No credentials are checked.
    pub fn register(input: RegistrationInput) -> Self {
        let name = non_blank(&input.name).unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email: input.email.trim().to_string(),
            role: input.role,
            phone: non_blank(&input.phone),
            address: non_blank(&input.address),
            emergency_contact: non_blank(&input.emergency_contact),
        }
    }
}
