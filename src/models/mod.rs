use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored user account.
///
/// Password-based accounts are keyed by `username` and carry a bcrypt hash in
/// `password`. Google-authenticated accounts carry no credential and are keyed
/// by `email` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAccount {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub google_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserAccount {
    /// Copy of the account safe to return to clients (credential stripped).
    pub fn sanitized(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}

/// A user's stored assessment result. At most one per owner handle.
///
/// Historical documents used `userName` for the owner handle; the alias
/// normalizes both spellings into the one canonical field on deserialization,
/// and the next save writes the canonical name back out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentResult {
    #[serde(alias = "userName")]
    pub username: String,
    pub stream: String,
    pub specialized_fields: Vec<String>,
    /// Remaining quiz-derived fields, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the college catalog.
///
/// `college_type` is a free-form string holding one or more category labels
/// (e.g. `"Engineering, University"`); membership tests are substring checks.
/// `link` embeds the detail-document identifier as its last `/colleges/`
/// segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollegeSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub college_type: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nirf: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naac: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub government: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrance_exam: Option<Value>,
    /// Any remaining catalog fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CollegeSummary {
    /// Ranking fields duplicated at the top level of a merged recommendation.
    pub fn ranking_fields(&self) -> [(&'static str, &Option<Value>); 7] {
        [
            ("nirf", &self.nirf),
            ("naac", &self.naac),
            ("placement", &self.placement),
            ("review", &self.review),
            ("location", &self.location),
            ("government", &self.government),
            ("entranceExam", &self.entrance_exam),
        ]
    }
}
