//! Built-in food table consulted before the external estimator.

use crate::models::FoodHit;

pub const COMMON_FOODS: &[(&str, u32)] = &[
    ("Apple (Medium)", 95),
    ("Banana (Medium)", 105),
    ("Chicken Breast (100g)", 165),
    ("Egg (Large)", 78),
    ("White Rice (1 cup cooked)", 205),
    ("Brown Rice (1 cup cooked)", 216),
    ("Oatmeal (1 cup cooked)", 158),
    ("Greek Yogurt (1 cup)", 150),
    ("Almonds (1 oz / 28g)", 164),
    ("Peanut Butter (1 tbsp)", 94),
    ("Avocado (Medium)", 240),
    ("Whole Wheat Bread (1 slice)", 69),
    ("Salmon (100g)", 208),
    ("Black Coffee", 2),
    ("Orange Juice (1 cup)", 112),
];

/// Case-insensitive substring match over the built-in table, in table order.
#[must_use]
pub fn search_local(query: &str) -> Vec<FoodHit> {
    let needle = query.to_lowercase();
    COMMON_FOODS
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains(&needle))
        .map(|&(name, calories)| FoodHit {
            name: name.to_string(),
            calories,
        })
        .collect()
}
