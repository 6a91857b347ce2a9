//! Wire types for `/profile`. All profile endpoints answer 204.

use serde::{Deserialize, Serialize};

/// Body of `POST /profile/password`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordChangeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChangeRequest").finish_non_exhaustive()
    }
}

/// Body of `DELETE /profile`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDeleteRequest {
    pub password: String,
}

impl std::fmt::Debug for ProfileDeleteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileDeleteRequest").finish_non_exhaustive()
    }
}
