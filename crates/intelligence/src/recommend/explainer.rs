//! Human-readable explanations for recommendations.

use crate::types::SkillRecommendation;

/// Join names as "X", "X and Y" or "X, Y and Z".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

/// One-line explanation of a recommendation.
pub fn explain(recommendation: &SkillRecommendation) -> String {
    if recommendation.is_empty() {
        return "No new skills to suggest".to_string();
    }
    if recommendation.most_similar_to.is_empty() {
        return format!(
            "Suggested: {}",
            join_names(&recommendation.recommendation_list)
        );
    }
    format!(
        "Suggested because you know {}",
        join_names(&recommendation.most_similar_to)
    )
}

/// Summary line for a batch of recommendations.
pub fn summarize_recommendations(count: usize, most_similar: &[String]) -> String {
    let mut parts = vec![format!("Found {} recommendations", count)];
    if !most_similar.is_empty() {
        parts.push(format!("based on {}", join_names(most_similar)));
    }
    parts.join(", ")
}
