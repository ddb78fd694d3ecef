//! Assessment service: upsert and lookup over the results collection, keyed
//! on the owner handle.

use crate::error::{AppError, AppResult};
use crate::models::AssessmentResult;
use crate::store::{Collection, Store};

/// Upserts a user's assessment: any previous record for the same owner handle
/// is replaced wholesale.
pub async fn save(store: &Store, result: AssessmentResult) -> AppResult<()> {
    if result.username.trim().is_empty() {
        return Err(AppError::InvalidInput("Username is required".to_string()));
    }

    let mut results: Vec<AssessmentResult> = store.load(&Collection::Assessments).await;
    results.retain(|r| r.username != result.username);
    results.push(result);
    store.save(&Collection::Assessments, &results).await;

    Ok(())
}

pub async fn find_for(store: &Store, username: &str) -> Option<AssessmentResult> {
    let results: Vec<AssessmentResult> = store.load(&Collection::Assessments).await;
    results.into_iter().find(|r| r.username == username)
}

pub async fn has_taken(store: &Store, username: &str) -> bool {
    find_for(store, username).await.is_some()
}
