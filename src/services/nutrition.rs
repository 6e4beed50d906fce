/// One row of the nutrition table. Macros are grams per 100 g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionEntry {
    pub keyword: &'static str,
    pub kcal_per_100g: f64,
    // Macros are carried by the table but not part of the estimate yet.
    #[allow(dead_code)]
    pub protein: f64,
    #[allow(dead_code)]
    pub carbs: f64,
    #[allow(dead_code)]
    pub fat: f64,
    pub default_portion_grams: f64,
}

impl NutritionEntry {
    const fn new(
        keyword: &'static str,
        kcal_per_100g: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
        default_portion_grams: f64,
    ) -> Self {
        Self {
            keyword,
            kcal_per_100g,
            protein,
            carbs,
            fat,
            default_portion_grams,
        }
    }

    /// Calories of one default portion.
    pub fn portion_kcal(&self) -> f64 {
        self.kcal_per_100g * self.default_portion_grams / 100.0
    }
}

/// Keywords are lowercase and matched as substrings of the lowercased meal.
pub static NUTRITION_TABLE: [NutritionEntry; 18] = [
    NutritionEntry::new("poulet", 165.0, 31.0, 0.0, 3.6, 150.0),
    NutritionEntry::new("riz", 130.0, 2.7, 28.0, 0.3, 150.0),
    NutritionEntry::new("saumon", 208.0, 20.0, 0.0, 13.0, 140.0),
    NutritionEntry::new("thon", 132.0, 29.0, 0.0, 1.0, 120.0),
    NutritionEntry::new("oeuf", 143.0, 13.0, 1.1, 9.5, 60.0),
    NutritionEntry::new("avocat", 160.0, 2.0, 9.0, 15.0, 100.0),
    NutritionEntry::new("pain", 265.0, 9.0, 49.0, 3.2, 60.0),
    NutritionEntry::new("fromage", 330.0, 20.0, 1.5, 27.0, 40.0),
    NutritionEntry::new("yaourt", 63.0, 5.3, 7.0, 1.5, 125.0),
    NutritionEntry::new("pomme", 52.0, 0.3, 14.0, 0.2, 150.0),
    NutritionEntry::new("banane", 89.0, 1.1, 23.0, 0.3, 120.0),
    NutritionEntry::new("salade", 18.0, 1.5, 3.0, 0.2, 80.0),
    NutritionEntry::new("tomate", 18.0, 0.9, 3.9, 0.2, 100.0),
    NutritionEntry::new("pates", 131.0, 5.0, 25.0, 1.1, 180.0),
    NutritionEntry::new("pizza", 266.0, 11.0, 33.0, 10.0, 250.0),
    NutritionEntry::new("burger", 295.0, 17.0, 30.0, 12.0, 220.0),
    NutritionEntry::new("frites", 312.0, 3.4, 41.0, 15.0, 180.0),
    NutritionEntry::new("chocolat", 546.0, 4.9, 61.0, 31.0, 30.0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn lookup(keyword: &str) -> Option<&'static NutritionEntry> {
        NUTRITION_TABLE.iter().find(|entry| entry.keyword == keyword)
    }

    #[test]
    fn test_keywords_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for entry in NUTRITION_TABLE.iter() {
            assert!(seen.insert(entry.keyword), "duplicate keyword {}", entry.keyword);
            assert_eq!(entry.keyword, entry.keyword.to_lowercase());
            assert!(entry.default_portion_grams > 0.0);
        }
    }

    #[test]
    fn test_portion_kcal() {
        let saumon = lookup("saumon").unwrap();
        assert_eq!(saumon.default_portion_grams, 140.0);
        assert!((saumon.portion_kcal() - 291.2).abs() < 1e-9);
        assert!(lookup("quinoa").is_none());
    }
}
