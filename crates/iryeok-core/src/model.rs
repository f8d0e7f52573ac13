use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse geographic bucket derived from a free-text address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Residence {
    #[serde(rename = "서울")]
    Seoul,
    #[serde(rename = "수도권")]
    Metro,
    #[serde(rename = "시흥")]
    Siheung,
    #[serde(rename = "안산")]
    Ansan,
    #[serde(rename = "지방")]
    Other,
}

impl fmt::Display for Residence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Residence::Seoul => write!(f, "서울"),
            Residence::Metro => write!(f, "수도권"),
            Residence::Siheung => write!(f, "시흥"),
            Residence::Ansan => write!(f, "안산"),
            Residence::Other => write!(f, "지방"),
        }
    }
}

impl Residence {
    /// Classify an address by substring lookup. Order matters: an address
    /// naming 경기 is metro even when the city is 시흥 or 안산.
    pub fn from_address(address: &str) -> Option<Residence> {
        let addr = address.trim();
        if addr.is_empty() {
            None
        } else if addr.contains("서울") {
            Some(Residence::Seoul)
        } else if addr.contains("경기") || addr.contains("인천") || addr.contains("수원") {
            Some(Residence::Metro)
        } else if addr.contains("시흥") {
            Some(Residence::Siheung)
        } else if addr.contains("안산") {
            Some(Residence::Ansan)
        } else {
            Some(Residence::Other)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<String>,
    /// Full date of birth, only present on form-based layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence: Option<Residence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_career: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerEntry {
    pub start_date: String,
    pub end_date: String,
    /// Company name, with the department appended when the layout has one.
    pub company: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_reason: Option<String>,
}

/// Grade point average as written, e.g. `3.8/4.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gpa {
    pub score: Decimal,
    pub max: Decimal,
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.score, self.max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub start_date: String,
    pub end_date: String,
    pub school: String,
    pub degree: String,
    pub major: String,
    pub gpa: Option<Gpa>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Row kind in the certification section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationKind {
    #[default]
    Certificate,
    Award,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    #[serde(default)]
    pub kind: CertificationKind,
    pub date: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Issuing body, or the awarding organisation for awards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// What an award was given for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub military_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub military_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub military_period: Option<String>,
}

impl EmploymentPreference {
    pub fn is_empty(&self) -> bool {
        self.military_status.is_none()
            && self.military_detail.is_none()
            && self.military_period.is_none()
    }
}

/// The assembled applicant record for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub basic_info: BasicInfo,
    pub skills: Vec<String>,
    pub careers: Vec<CareerEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub employment_preference: EmploymentPreference,
    pub self_introduction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_detail_content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub portfolio: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

/// Exactly one of these is emitted per processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PipelineOutcome {
    Success(Box<ResumeRecord>),
    Failure(ErrorRecord),
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success(_))
    }
}
