//! Visitor-submitted forms: registration, profile updates, contact.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::i18n::{Lang, Message};

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}

/// `POST /register/` body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password1: String,
    pub password2: String,
}

impl RegistrationForm {
    /// Field checks followed by the password confirmation check.
    ///
    /// The confirmation failure is reported in the visitor's language.
    pub fn check(&self, lang: Lang) -> Result<(), CoreError> {
        self.validate()?;
        if self.password1 != self.password2 {
            return Err(CoreError::Validation(
                Message::PasswordsDoNotMatch.text(lang).to_string(),
            ));
        }
        Ok(())
    }
}

/// `PUT /profile/` body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub language: Option<String>,
    pub receive_notifications: Option<bool>,
}

impl ProfileForm {
    /// Validate fields and parse the optional language code.
    pub fn check(&self) -> Result<Option<Lang>, CoreError> {
        self.validate()?;
        self.language.as_deref().map(Lang::parse).transpose()
    }
}

/// `POST /contact/` body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

impl ContactForm {
    /// Trim every field so blank input fails the length checks.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}
