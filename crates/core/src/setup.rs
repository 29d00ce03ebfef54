//! First-run setup gate and wizard form rules.
//!
//! The site is `Uninitialized` until an account with the admin role exists.
//! The state is always derived from storage; this module only holds the
//! pure parts: the state enum, which paths stay reachable, and form checks.

use serde::{Deserialize, Serialize};

use crate::i18n::{resolve, Lang};
use crate::settings::{DEFAULT_APP_NAME, DEFAULT_APP_NAME_EN};

/// Entry point of the setup wizard.
pub const SETUP_PATH: &str = "/setup/";

/// Where the wizard sends the new administrator afterwards.
pub const POST_SETUP_REDIRECT: &str = "/login/";

/// Minimum username length accepted by the wizard.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length accepted by the wizard and registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Paths reachable while the site is still uninitialized.
const EXEMPT_PATHS: &[&str] = &[SETUP_PATH, "/health"];

/// Two-state first-run machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupState {
    Uninitialized,
    Ready,
}

impl SetupState {
    pub fn from_initialized(initialized: bool) -> Self {
        if initialized {
            Self::Ready
        } else {
            Self::Uninitialized
        }
    }

    /// Whether a request for `path` must be redirected to the wizard.
    pub fn must_redirect(self, path: &str) -> bool {
        self == Self::Uninitialized && !is_exempt_path(path)
    }
}

/// Whether `path` bypasses the setup gate.
pub fn is_exempt_path(path: &str) -> bool {
    EXEMPT_PATHS.contains(&path)
}

/// A single wizard validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    UsernameRequired,
    UsernameTooShort,
    EmailRequired,
    PasswordRequired,
    PasswordTooShort,
    PasswordsDoNotMatch,
}

impl SetupError {
    pub fn text(self, lang: Lang) -> &'static str {
        let (ar, en) = match self {
            Self::UsernameRequired => ("اسم المستخدم مطلوب", "Username is required"),
            Self::UsernameTooShort => (
                "اسم المستخدم يجب أن يكون 3 أحرف على الأقل",
                "Username must be at least 3 characters",
            ),
            Self::EmailRequired => ("البريد الإلكتروني مطلوب", "Email is required"),
            Self::PasswordRequired => ("كلمة المرور مطلوبة", "Password is required"),
            Self::PasswordTooShort => (
                "كلمة المرور يجب أن تكون 8 أحرف على الأقل",
                "Password must be at least 8 characters",
            ),
            Self::PasswordsDoNotMatch => ("كلمات المرور غير متطابقة", "Passwords do not match"),
        };
        resolve(ar, en, lang)
    }
}

/// Submitted wizard form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
    pub app_name: Option<String>,
    pub app_name_en: Option<String>,
}

impl SetupForm {
    /// Trim text fields and fill in default site names.
    pub fn normalized(self) -> Self {
        fn name_or(value: Option<String>, default: &str) -> Option<String> {
            let trimmed = value.as_deref().map(str::trim).unwrap_or_default();
            if trimmed.is_empty() {
                Some(default.to_string())
            } else {
                Some(trimmed.to_string())
            }
        }

        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password1: self.password1,
            password2: self.password2,
            app_name: name_or(self.app_name, DEFAULT_APP_NAME),
            app_name_en: name_or(self.app_name_en, DEFAULT_APP_NAME_EN),
        }
    }

    /// Collect every validation failure, in form order.
    pub fn validate(&self) -> Vec<SetupError> {
        let mut errors = Vec::new();

        if self.username.is_empty() {
            errors.push(SetupError::UsernameRequired);
        } else if self.username.chars().count() < MIN_USERNAME_LEN {
            errors.push(SetupError::UsernameTooShort);
        }

        if self.email.is_empty() {
            errors.push(SetupError::EmailRequired);
        }

        if self.password1.is_empty() {
            errors.push(SetupError::PasswordRequired);
        } else if self.password1.chars().count() < MIN_PASSWORD_LEN {
            errors.push(SetupError::PasswordTooShort);
        } else if self.password1 != self.password2 {
            errors.push(SetupError::PasswordsDoNotMatch);
        }

        errors
    }

    pub fn app_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    pub fn app_name_en(&self) -> &str {
        self.app_name_en.as_deref().unwrap_or(DEFAULT_APP_NAME_EN)
    }
}
