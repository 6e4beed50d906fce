use crate::models::{EstimateResult, Verdict};
use crate::services::nutrition::{NutritionEntry, NUTRITION_TABLE};

/// Used when no keyword of the table appears in the meal.
pub const DEFAULT_MEAL_KCAL: f64 = 550.0;

/// Estimate the calories of a free-text meal description.
///
/// Every table keyword contained in the lowercased text counts once, with
/// its fixed default portion. Quantities written by the user are ignored,
/// and a keyword hidden inside another word still matches ("riz" in
/// "chorizo").
pub fn estimate_meal(meal: &str) -> EstimateResult {
    estimate_with_table(meal, &NUTRITION_TABLE)
}

fn estimate_with_table(meal: &str, table: &[NutritionEntry]) -> EstimateResult {
    let normalized = meal.to_lowercase();

    let matched: Vec<&NutritionEntry> = table
        .iter()
        .filter(|entry| normalized.contains(entry.keyword))
        .collect();

    let total = if matched.is_empty() {
        DEFAULT_MEAL_KCAL
    } else {
        matched.iter().map(|entry| entry.portion_kcal()).sum::<f64>()
    };

    // totals are never negative, so this is plain half-up rounding
    let kcal = total.round() as i64;

    EstimateResult {
        kcal,
        verdict: Verdict::from_kcal(kcal),
        matched_keyword_count: matched.len(),
    }
}
