//! Operator-facing message text. The spreadsheet format itself is the same for
//! every locale; only what the operator reads changes.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Arabic => "ar",
        }
    }

    /// Looks a locale up by its two-letter code, e.g. from an environment variable.
    pub fn from_code(code: &str) -> Option<Locale> {
        [Locale::English, Locale::Arabic]
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl FormatError {
    pub fn localized(&self, locale: Locale) -> String {
        match locale {
            Locale::English => self.to_string(),
            Locale::Arabic => self.arabic_message(),
        }
    }

    fn arabic_message(&self) -> String {
        match self {
            FormatError::MissingRows => {
                "يجب أن يحتوي ملف CSV على صف رأس وصف بيانات واحد على الأقل.".to_string()
            }
            FormatError::MissingColumn { column } => {
                format!("العمود المطلوب مفقود في ملف CSV: {}", column)
            }
            FormatError::EmptyApartmentNumber { row } => {
                format!("الصف {}: 'رقم الشقة' لا يمكن أن يكون فارغًا.", row)
            }
            FormatError::InvalidType { row, value } => {
                format!("الصف {}: قيمة \"النوع\" غير صالحة \"{}\".", row, value)
            }
            FormatError::InvalidStatus { row, value } => {
                format!("الصف {}: قيمة \"الحالة\" غير صالحة \"{}\".", row, value)
            }
            FormatError::InvalidNumber { row, column, value } => {
                format!("الصف {}: رقم غير صالح \"{}\" في العمود '{}'.", row, value, column)
            }
            FormatError::Unreadable { row, message } => {
                format!("الصف {}: تعذرت قراءة الصف ({}).", row, message)
            }
        }
    }
}

pub fn upload_success_message(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Apartment data updated successfully!",
        Locale::Arabic => "تم تحديث بيانات الشقق بنجاح!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_matches_display() {
        let err = FormatError::InvalidType {
            row: 4,
            value: "Penthouse".to_string(),
        };
        assert_eq!(err.localized(Locale::English), err.to_string());
        assert_eq!(
            err.localized(Locale::English),
            "Row 4: Invalid 'Type' value \"Penthouse\"."
        );
    }

    #[test]
    fn test_arabic_keeps_row_and_value() {
        let err = FormatError::InvalidStatus {
            row: 7,
            value: "UNKNOWN".to_string(),
        };
        let msg = err.localized(Locale::Arabic);
        assert!(msg.contains("الصف 7"));
        assert!(msg.contains("UNKNOWN"));
    }

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::default(), Locale::English);
        assert_eq!(Locale::Arabic.code(), "ar");
        assert_eq!(Locale::from_code("AR"), Some(Locale::Arabic));
        assert_eq!(Locale::from_code(" en "), Some(Locale::English));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(serde_json::to_string(&Locale::Arabic).unwrap(), "\"ar\"");
    }
}
