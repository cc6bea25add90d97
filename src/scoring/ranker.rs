use tracing::debug;

use super::types::MatchResult;

/// Sorts by rounded final score, highest first, and keeps the first `top_k`.
///
/// The sort is stable: postings with equal scores stay in input order.
pub fn rank(mut results: Vec<MatchResult>, top_k: usize) -> Vec<MatchResult> {
    let total = results.len();
    results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    results.truncate(top_k);

    debug!(total, top_k, kept = results.len(), "Ranked postings");
    results
}
