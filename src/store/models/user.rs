use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Client,
    Trainer,
}

/// An authenticated actor. Resolved from the `users` collection by the
/// identity extractor and stamped onto audit entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub company_id: Option<String>,
}

impl User {
    /// The client id this user's requests belong to: the linked company when
    /// present, otherwise the user id itself.
    pub fn client_scope(&self) -> &str {
        self.company_id.as_deref().unwrap_or(&self.id)
    }

    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "user {} does not hold the required role",
                self.id
            )))
        }
    }
}
