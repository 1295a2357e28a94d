use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nutri-Score grade, when the upstream supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutriScore {
    A,
    B,
    C,
    D,
    E,
}

impl NutriScore {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "a" => Some(NutriScore::A),
            "b" => Some(NutriScore::B),
            "c" => Some(NutriScore::C),
            "d" => Some(NutriScore::D),
            "e" => Some(NutriScore::E),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            NutriScore::A => 'A',
            NutriScore::B => 'B',
            NutriScore::C => 'C',
            NutriScore::D => 'D',
            NutriScore::E => 'E',
        }
    }
}

/// Canonical food product with per-100g nutrition facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub nutri_score: Option<NutriScore>,
}

// Nested nutriments block in the OpenFoodFacts-style payload.
#[derive(Deserialize, Default)]
struct RawNutriments {
    #[serde(alias = "energy-kcal")]
    energy_kcal: Option<f64>,
    proteins: Option<f64>,
    carbohydrates: Option<f64>,
    fat: Option<f64>,
}

#[derive(Deserialize)]
struct RawProduct {
    name: Option<String>,
    product_name: Option<String>,
    brand: Option<String>,
    image_url: Option<String>,
    image: Option<String>,
    calories: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fats: Option<f64>,
    nutriments: Option<RawNutriments>,
    nutri_score: Option<String>,
}

/// Map one raw product record to the canonical shape. Nutrition fields come
/// from the flat form when present, otherwise from the `nutriments` block;
/// anything still missing reads as 0.
pub fn normalize_product(raw: &Value) -> Option<Product> {
    let p: RawProduct = serde_json::from_value(raw.clone()).ok()?;
    let nutriments = p.nutriments.unwrap_or_default();
    Some(Product {
        name: p
            .name
            .or(p.product_name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown Product".to_string()),
        brand: p.brand.unwrap_or_default(),
        image_url: p.image_url.or(p.image).unwrap_or_default(),
        calories: p.calories.or(nutriments.energy_kcal).unwrap_or(0.0),
        protein: p.protein.or(nutriments.proteins).unwrap_or(0.0),
        carbs: p.carbs.or(nutriments.carbohydrates).unwrap_or(0.0),
        fats: p.fats.or(nutriments.fat).unwrap_or(0.0),
        nutri_score: p.nutri_score.as_deref().and_then(NutriScore::parse),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_fields_take_priority_over_nutriments() {
        let product = normalize_product(&json!({
            "name": "Oat Bar",
            "calories": 210.0,
            "nutriments": { "energy_kcal": 999.0, "proteins": 6.5 }
        }))
        .unwrap();
        assert_eq!(product.calories, 210.0);
        assert_eq!(product.protein, 6.5);
    }

    #[test]
    fn openfoodfacts_shape_is_accepted() {
        let product = normalize_product(&json!({
            "product_name": "Greek Yogurt",
            "image_url": "https://example.com/y.jpg",
            "nutriments": {
                "energy_kcal": 59.0,
                "proteins": 10.0,
                "carbohydrates": 3.6,
                "fat": 0.4
            },
            "nutri_score": "a"
        }))
        .unwrap();
        assert_eq!(product.name, "Greek Yogurt");
        assert_eq!(product.fats, 0.4);
        assert_eq!(product.nutri_score, Some(NutriScore::A));
    }

    #[test]
    fn missing_values_default_and_bad_scores_drop() {
        let product = normalize_product(&json!({ "nutri_score": "x" })).unwrap();
        assert_eq!(product.name, "Unknown Product");
        assert_eq!(product.calories, 0.0);
        assert_eq!(product.nutri_score, None);
    }
}
