//! Bilingual (Arabic/English) content resolution.
//!
//! Every translatable entity stores an Arabic value that is always present
//! and an English value that may be empty. [`resolve`] is the single place
//! that decides which one a reader sees; entities opt in through
//! [`Localizable`] by naming their field pairs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Name of the cookie that carries the visitor's language choice.
pub const LANG_COOKIE: &str = "lang";

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Arabic, the primary content language.
    #[default]
    Ar,
    En,
}

impl Lang {
    /// Parse a two-letter language code. Returns `None` for anything else.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ar" => Some(Self::Ar),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// Like [`Lang::from_code`] but reports a validation error.
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        Self::from_code(code).ok_or_else(|| {
            CoreError::Validation(format!("Invalid language '{code}'. Must be one of: ar, en"))
        })
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// Arabic is written right-to-left.
    pub fn is_rtl(self) -> bool {
        self == Self::Ar
    }
}

/// Pick the text to show for `lang`.
///
/// English is returned only when requested and non-empty; an empty English
/// translation counts as missing and falls back to the Arabic value.
pub fn resolve<'a>(primary: &'a str, secondary: &'a str, lang: Lang) -> &'a str {
    if lang == Lang::En && !secondary.is_empty() {
        secondary
    } else {
        primary
    }
}

/// An entity with one or more Arabic/English field pairs.
///
/// Implementors only map a field selector to its `(arabic, english)` pair;
/// the fallback rule lives in [`resolve`] and is never reimplemented.
pub trait Localizable {
    /// Selector for the translatable fields of this entity.
    type Field: Copy;

    /// Return the `(arabic, english)` values for `field`.
    fn field_pair(&self, field: Self::Field) -> (&str, &str);

    /// Resolve `field` for `lang`.
    fn localized(&self, field: Self::Field, lang: Lang) -> &str {
        let (primary, secondary) = self.field_pair(field);
        resolve(primary, secondary, lang)
    }

    /// Owned convenience wrapper around [`Localizable::localized`].
    fn localized_string(&self, field: Self::Field, lang: Lang) -> String {
        self.localized(field, lang).to_string()
    }
}

/// Fixed user-facing messages that exist in both languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    PasswordsDoNotMatch,
    UsernameTaken,
    EmailTaken,
    RegistrationClosed,
    AccountBanned,
    InvalidCredentials,
    AccountCreated,
    ContactMessageSent,
    ProfileUpdated,
}

impl Message {
    fn pair(self) -> (&'static str, &'static str) {
        match self {
            Self::PasswordsDoNotMatch => ("كلمات المرور غير متطابقة", "Passwords do not match"),
            Self::UsernameTaken => ("اسم المستخدم موجود مسبقاً", "Username already exists"),
            Self::EmailTaken => ("البريد الإلكتروني مسجل مسبقاً", "Email already registered"),
            Self::RegistrationClosed => ("التسجيل مغلق حالياً", "Registration is closed"),
            Self::AccountBanned => ("حسابك محظور", "Your account is banned"),
            Self::InvalidCredentials => (
                "اسم المستخدم أو كلمة المرور غير صحيحة",
                "Invalid username or password",
            ),
            Self::AccountCreated => ("تم إنشاء حسابك بنجاح!", "Account created successfully!"),
            Self::ContactMessageSent => ("تم إرسال رسالتك بنجاح!", "Message sent successfully!"),
            Self::ProfileUpdated => (
                "تم تحديث الملف الشخصي بنجاح!",
                "Profile updated successfully!",
            ),
        }
    }

    pub fn text(self, lang: Lang) -> &'static str {
        let (ar, en) = self.pair();
        resolve(ar, en, lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: String,
        name_en: String,
    }

    #[derive(Clone, Copy)]
    struct Name;

    impl Localizable for Item {
        type Field = Name;

        fn field_pair(&self, _field: Name) -> (&str, &str) {
            (&self.name, &self.name_en)
        }
    }

    #[test]
    fn english_is_used_when_present() {
        assert_eq!(resolve("أزياء", "Fashion", Lang::En), "Fashion");
    }

    #[test]
    fn empty_english_falls_back_to_arabic() {
        assert_eq!(resolve("أزياء", "", Lang::En), "أزياء");
    }

    #[test]
    fn arabic_always_wins_for_arabic_readers() {
        assert_eq!(resolve("أزياء", "Fashion", Lang::Ar), "أزياء");
        assert_eq!(resolve("أزياء", "", Lang::Ar), "أزياء");
    }

    #[test]
    fn trait_delegates_to_resolve() {
        let item = Item {
            name: "إلكترونيات".into(),
            name_en: "Electronics".into(),
        };
        assert_eq!(item.localized(Name, Lang::En), "Electronics");
        assert_eq!(item.localized(Name, Lang::Ar), "إلكترونيات");

        let untranslated = Item {
            name: "سفر".into(),
            name_en: String::new(),
        };
        assert_eq!(untranslated.localized_string(Name, Lang::En), "سفر");
    }

    #[test]
    fn lang_codes_round_trip() {
        assert_eq!(Lang::from_code("ar"), Some(Lang::Ar));
        assert_eq!(Lang::from_code("en"), Some(Lang::En));
        assert_eq!(Lang::from_code("fr"), None);
        assert_eq!(Lang::En.code(), "en");
        assert!(Lang::parse("EN").is_err());
    }

    #[test]
    fn only_arabic_is_rtl() {
        assert!(Lang::Ar.is_rtl());
        assert!(!Lang::En.is_rtl());
    }

    #[test]
    fn messages_resolve_per_language() {
        assert_eq!(Message::AccountBanned.text(Lang::En), "Your account is banned");
        assert_eq!(Message::AccountBanned.text(Lang::Ar), "حسابك محظور");
    }
}
