//! Recommendation matcher
//!
//! Maps a user's free-text interests to college-type categories via keyword
//! membership, filters the catalog by those categories, enriches the
//! survivors with their per-college detail documents, and returns the first
//! ten in catalog order.

use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::CollegeSummary;
use crate::services::assessments;
use crate::store::{Collection, Store};

/// Merged list is cut to this many entries; `total_found` reports the
/// pre-truncation count.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Fixed category table: a label is matched when any of its keywords occurs
/// as a substring of a lower-cased interest. Substring matching is the
/// compatibility-preserving behavior; a field like "data science" can land in
/// more than one category.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Engineering",
        &[
            "engineering",
            "computer",
            "software",
            "machine learning",
            "artificial intelligence",
            "data science",
            "robotics",
            "electronics",
            "mechanical",
            "civil",
            "technology",
        ],
    ),
    (
        "Medical",
        &[
            "medical", "medicine", "biology", "doctor", "nursing", "pharmacy", "dental", "health",
        ],
    ),
    (
        "Management",
        &[
            "management",
            "business",
            "mba",
            "finance",
            "marketing",
            "entrepreneur",
        ],
    ),
    ("University", &["university", "research", "academic"]),
    (
        "Agricultural University",
        &["agriculture", "agricultural", "farming", "horticulture"],
    ),
    (
        "Arts & Science",
        &[
            "arts",
            "literature",
            "history",
            "languages",
            "psychology",
            "design",
        ],
    ),
    (
        "Science",
        &["science", "physics", "chemistry", "mathematics"],
    ),
    ("Commerce", &["commerce", "accounting", "economics", "banking"]),
];

/// Broad filter used when no catalog entry matches the derived categories.
/// Replaces the empty result outright, never unions with it.
const FALLBACK_TYPES: &[&str] = &["University", "Engineering", "Science"];

/// Matcher output, returned verbatim to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub user_interests: Vec<String>,
    pub matched_types: Vec<String>,
    pub recommended_colleges: Vec<Value>,
    pub stream: String,
    pub total_found: usize,
}

/// Derives the set of category labels matched by the given interests.
///
/// Returned in table order without duplicates; callers treat it as an
/// unordered membership set.
pub fn derive_matched_types(specialized_fields: &[String]) -> Vec<String> {
    let lowered: Vec<String> = specialized_fields.iter().map(|f| f.to_lowercase()).collect();

    CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            lowered
                .iter()
                .any(|field| keywords.iter().any(|kw| field.contains(kw)))
        })
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Extracts the detail-document identifier from a catalog link.
///
/// The identifier is whatever follows the last `/colleges/` segment, provided
/// it is non-empty and contains no further slashes. Links without the segment
/// yield `None` and the entry simply goes unenriched.
pub fn extract_detail_id(link: &str) -> Option<&str> {
    let (_, id) = link.rsplit_once("/colleges/")?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}

/// Runs the full matching pipeline for one user.
///
/// Fails with `NotFound` when the user has no stored assessment; storage
/// hiccups below that surface as empty documents, not errors.
pub async fn get_recommendations(store: &Store, username: &str) -> AppResult<Recommendations> {
    let assessment = assessments::find_for(store, username)
        .await
        .ok_or_else(|| {
            AppError::NotFound(format!("No assessment result found for user '{}'", username))
        })?;

    let catalog: Vec<CollegeSummary> = store.load(&Collection::Colleges).await;

    let matched_types = derive_matched_types(&assessment.specialized_fields);

    let mut filtered: Vec<&CollegeSummary> = catalog
        .iter()
        .filter(|college| {
            matched_types
                .iter()
                .any(|label| college.college_type.contains(label.as_str()))
        })
        .collect();

    // Full fallback substitution when nothing matched
    if filtered.is_empty() {
        filtered = catalog
            .iter()
            .filter(|college| {
                FALLBACK_TYPES
                    .iter()
                    .any(|label| college.college_type.contains(label))
            })
            .collect();
    }

    let mut merged = Vec::new();
    for college in &filtered {
        let Some(id) = extract_detail_id(&college.link) else {
            continue;
        };
        if let Some(entry) = load_merged_entry(store, college, id).await {
            merged.push(entry);
        }
    }

    let total_found = merged.len();
    merged.truncate(MAX_RECOMMENDATIONS);

    tracing::info!(
        username = %username,
        matched = ?matched_types,
        total_found,
        "Recommendations computed"
    );

    Ok(Recommendations {
        user_interests: assessment.specialized_fields,
        matched_types,
        recommended_colleges: merged,
        stream: assessment.stream,
        total_found,
    })
}

/// Loads a college's detail document and merges it with its catalog summary.
///
/// The detail document is an array; only its first record is used. The
/// summary lands nested under `basicInfo` and its ranking fields are
/// additionally flattened at the top level for caller convenience. Absent or
/// empty detail documents drop the entry entirely.
async fn load_merged_entry(
    store: &Store,
    college: &CollegeSummary,
    detail_id: &str,
) -> Option<Value> {
    let records: Vec<Value> = store
        .load(&Collection::CollegeDetail(detail_id.to_string()))
        .await;

    let first = records.into_iter().next()?;
    let Value::Object(mut entry) = first else {
        return None;
    };

    match serde_json::to_value(college) {
        Ok(summary) => {
            entry.insert("basicInfo".to_string(), summary);
        }
        Err(e) => {
            tracing::warn!(college = %college.name, error = %e, "Failed to serialize summary");
            return None;
        }
    }

    for (key, value) in college.ranking_fields() {
        if let Some(value) = value {
            entry.insert(key.to_string(), value.clone());
        }
    }

    Some(Value::Object(entry))
}
