use super::wire::PasswordChangeRequest;
use super::{PasswordChange, ProfileDraft, ProfileUpdate};
use crate::auth::UserInfo;
use crate::error::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 8;

impl PasswordChange {
    pub fn validate(&self) -> Result<PasswordChangeRequest, ValidationError> {
        if self.new != self.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(PasswordChangeRequest {
            current_password: self.current.clone(),
            new_password: self.new.clone(),
        })
    }
}

impl ProfileDraft {
    /// Form prefilled from the current identity.
    pub fn from_user(user: &UserInfo) -> Self {
        Self {
            first_name: user.given_name.clone().unwrap_or_default(),
            last_name: user.family_name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
        }
    }

    /// Fields that are non-blank and differ from `current`, trimmed.
    pub fn diff(&self, current: &UserInfo) -> Result<ProfileUpdate, ValidationError> {
        let update = ProfileUpdate {
            first_name: changed(&self.first_name, current.given_name.as_deref()),
            last_name: changed(&self.last_name, current.family_name.as_deref()),
            email: changed(&self.email, current.email.as_deref()),
        };
        if update.is_empty() {
            return Err(ValidationError::EmptyProfileUpdate);
        }
        Ok(update)
    }
}

fn changed(value: &str, current: Option<&str>) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != current.unwrap_or_default()).then(|| value.to_string())
}
