use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CompositionError, RequestError};

/// Paragraph used whenever the text service cannot provide one.
pub const FALLBACK_TEXT: &str = "Certificate of completion.";

/// The six fields collected for one certificate.
///
/// Field names on the wire match the form inputs and the relay payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRequest {
    pub name: String,
    #[serde(rename = "instName")]
    pub institution_name: String,
    #[serde(rename = "instCourse")]
    pub institution_course: String,
    #[serde(rename = "webCourse")]
    pub platform_course: String,
    #[serde(rename = "managerName")]
    pub manager_name: String,
    #[serde(rename = "date")]
    pub completion_date: String,
}

impl CertificateRequest {
    /// Trims every field and rejects empty ones. The date is only checked for
    /// presence here; parsing happens during composition.
    pub fn validate(mut self) -> Result<Self, RequestError> {
        let fields: [(&'static str, &mut String); 6] = [
            ("name", &mut self.name),
            ("instName", &mut self.institution_name),
            ("instCourse", &mut self.institution_course),
            ("webCourse", &mut self.platform_course),
            ("managerName", &mut self.manager_name),
            ("date", &mut self.completion_date),
        ];
        for (label, value) in fields {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(RequestError::EmptyField(label));
            }
            *value = trimmed.to_string();
        }
        Ok(self)
    }

    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }

    /// Long US form, e.g. `December 27, 2025`.
    pub fn formatted_date(&self) -> Result<String, CompositionError> {
        format_completion_date(&self.completion_date)
    }
}

pub fn format_completion_date(raw: &str) -> Result<String, CompositionError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CompositionError::InvalidDate(raw.to_string()))?;
    Ok(date.format("%B %-d, %Y").to_string())
}

/// The paragraph printed under the student's name. Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBody(String);

impl CertificateBody {
    /// Collapses line breaks and runs of whitespace into single spaces.
    /// Text that normalizes to nothing becomes the fallback paragraph.
    pub fn new(text: &str) -> Self {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.is_empty() {
            Self::fallback()
        } else {
            Self(normalized)
        }
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_TEXT.to_string())
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_TEXT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CertificateRequest {
        CertificateRequest {
            name: "Ada Lovelace".into(),
            institution_name: "MIT".into(),
            institution_course: "CS101".into(),
            platform_course: "Intro to Algorithms".into(),
            manager_name: "J. Smith".into(),
            completion_date: "2025-12-27".into(),
        }
    }

    #[test]
    fn formats_long_date() {
        assert_eq!(request().formatted_date().unwrap(), "December 27, 2025");
        assert_eq!(format_completion_date("2024-03-05").unwrap(), "March 5, 2024");
    }

    #[test]
    fn rejects_unparseable_date() {
        let err = format_completion_date("27/12/2025").unwrap_err();
        assert!(matches!(err, CompositionError::InvalidDate(d) if d == "27/12/2025"));
    }

    #[test]
    fn validate_trims_and_rejects_blank_fields() {
        let mut req = request();
        req.name = "  Ada Lovelace ".into();
        assert_eq!(req.validate().unwrap().name, "Ada Lovelace");

        let mut req = request();
        req.manager_name = "   ".into();
        assert_eq!(req.validate(), Err(RequestError::EmptyField("managerName")));
    }

    #[test]
    fn display_name_is_upper_cased() {
        assert_eq!(request().display_name(), "ADA LOVELACE");
    }

    #[test]
    fn body_collapses_line_breaks() {
        let body = CertificateBody::new("  Outstanding work\non the\r\ncourse.  \n");
        assert_eq!(body.as_str(), "Outstanding work on the course.");
    }

    #[test]
    fn blank_body_becomes_fallback() {
        let body = CertificateBody::new(" \n\t ");
        assert!(body.is_fallback());
        assert_eq!(body.as_str(), FALLBACK_TEXT);
    }

    #[test]
    fn deserializes_wire_names() {
        let json = r#"{"name":"Ada","instName":"MIT","instCourse":"CS101",
            "webCourse":"Algo","managerName":"J. Smith","date":"2025-12-27"}"#;
        let req: CertificateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.institution_name, "MIT");
        assert_eq!(req.platform_course, "Algo");
        assert_eq!(req.completion_date, "2025-12-27");
    }
}
