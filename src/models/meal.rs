use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One ingredient line of a recipe. Order is meaningful and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient: String,
    #[serde(default)]
    pub measure: String,
}

/// Instructions arrive either as one newline-delimited string or as a list
/// of step strings. Both shapes are kept as received; splitting a text blob
/// into steps is a rendering concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Text(String),
    Steps(Vec<String>),
}

impl Default for Instructions {
    fn default() -> Self {
        Instructions::Text(String::new())
    }
}

impl Instructions {
    pub fn is_empty(&self) -> bool {
        match self {
            Instructions::Text(t) => t.trim().is_empty(),
            Instructions::Steps(s) => s.is_empty(),
        }
    }
}

/// Canonical meal shape used everywhere downstream of normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub instructions: Instructions,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Canonical meal category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    List(Vec<String>),
    Csv(String),
}

impl RawTags {
    fn into_vec(self) -> Vec<String> {
        match self {
            RawTags::List(tags) => tags,
            RawTags::Csv(csv) => csv
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

// Convention A: the proxy API already speaks the canonical field names.
#[derive(Deserialize)]
struct ProxyMeal {
    id: Option<Value>,
    name: Option<String>,
    category: Option<String>,
    area: Option<String>,
    thumbnail: Option<String>,
    instructions: Option<Instructions>,
    ingredients: Option<Vec<IngredientLine>>,
    youtube: Option<String>,
    tags: Option<RawTags>,
}

// Convention B: TheMealDB's `str*` naming with 20 positional ingredient slots.
#[derive(Deserialize)]
struct MealDbMeal {
    #[serde(rename = "idMeal")]
    id: Option<String>,
    #[serde(rename = "strMeal")]
    name: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strArea")]
    area: Option<String>,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(rename = "strYoutube")]
    youtube: Option<String>,
    #[serde(rename = "strTags")]
    tags: Option<String>,
    #[serde(flatten)]
    slots: serde_json::Map<String, Value>,
}

impl MealDbMeal {
    /// Scan strIngredient1..20 in order, keeping slots whose ingredient name
    /// is non-blank. Slot order is the recipe's display order.
    fn slot_ingredients(&self) -> Vec<IngredientLine> {
        let mut lines = Vec::new();
        for i in 1..=20 {
            let ingredient = self
                .slots
                .get(&format!("strIngredient{i}"))
                .and_then(Value::as_str)
                .unwrap_or("");
            if ingredient.trim().is_empty() {
                continue;
            }
            let measure = self
                .slots
                .get(&format!("strMeasure{i}"))
                .and_then(Value::as_str)
                .unwrap_or("");
            lines.push(IngredientLine {
                ingredient: ingredient.to_string(),
                measure: measure.to_string(),
            });
        }
        lines
    }
}

enum RawMeal {
    ConventionA(ProxyMeal),
    ConventionB(MealDbMeal),
}

impl RawMeal {
    /// Tag a raw record by its discriminating field. `idMeal` only ever
    /// appears in convention B.
    fn classify(raw: &Value) -> Option<RawMeal> {
        if raw.get("idMeal").is_some() {
            serde_json::from_value(raw.clone()).ok().map(RawMeal::ConventionB)
        } else {
            serde_json::from_value(raw.clone()).ok().map(RawMeal::ConventionA)
        }
    }
}

fn id_string(raw: Option<Value>) -> Option<String> {
    match raw? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_null(raw: Option<String>) -> String {
    raw.unwrap_or_default()
}

/// Map one raw upstream record to the canonical meal shape. Records without
/// an id are rejected: the id is the join key for detail lookups and food-log
/// linkage.
pub fn normalize_meal(raw: &Value) -> Option<Meal> {
    match RawMeal::classify(raw)? {
        RawMeal::ConventionA(m) => {
            let id = id_string(m.id)?;
            Some(Meal {
                id,
                name: non_null(m.name),
                category: non_null(m.category),
                area: non_null(m.area),
                thumbnail: non_null(m.thumbnail),
                instructions: m.instructions.unwrap_or_default(),
                ingredients: m.ingredients.unwrap_or_default(),
                youtube: non_null(m.youtube),
                tags: m.tags.map(RawTags::into_vec).unwrap_or_default(),
            })
        }
        RawMeal::ConventionB(m) => {
            let id = m.id.as_deref().filter(|s| !s.trim().is_empty())?.to_string();
            let ingredients = m.slot_ingredients();
            Some(Meal {
                id,
                name: non_null(m.name),
                category: non_null(m.category),
                area: non_null(m.area),
                thumbnail: non_null(m.thumbnail),
                instructions: Instructions::Text(non_null(m.instructions)),
                ingredients,
                youtube: non_null(m.youtube),
                tags: m
                    .tags
                    .map(|csv| RawTags::Csv(csv).into_vec())
                    .unwrap_or_default(),
            })
        }
    }
}

#[derive(Deserialize)]
struct ProxyCategory {
    id: Option<Value>,
    name: Option<String>,
    thumbnail: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct MealDbCategory {
    #[serde(rename = "idCategory")]
    id: Option<String>,
    #[serde(rename = "strCategory")]
    name: Option<String>,
    #[serde(rename = "strCategoryThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription")]
    description: Option<String>,
}

/// Map a raw category record (either convention) to the canonical shape.
pub fn normalize_category(raw: &Value) -> Option<Category> {
    if raw.get("idCategory").is_some() {
        let c: MealDbCategory = serde_json::from_value(raw.clone()).ok()?;
        let id = c.id.filter(|s| !s.trim().is_empty())?;
        Some(Category {
            id,
            name: c.name?,
            thumbnail: non_null(c.thumbnail),
            description: non_null(c.description),
        })
    } else {
        let c: ProxyCategory = serde_json::from_value(raw.clone()).ok()?;
        let id = id_string(c.id)?;
        Some(Category {
            id,
            name: c.name?,
            thumbnail: non_null(c.thumbnail),
            description: non_null(c.description),
        })
    }
}

/// Areas reduce to a plain cuisine name. The proxy returns bare strings or
/// `{ name }` objects; TheMealDB returns `{ strArea }` rows.
pub fn normalize_area(raw: &Value) -> Option<String> {
    let name = match raw {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map
            .get("name")
            .or_else(|| map.get("strArea"))
            .and_then(Value::as_str)?,
        _ => return None,
    };
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn convention_b_skips_blank_ingredient_slots() {
        let raw = json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strIngredient1": "Flour",
            "strMeasure1": "2 cups",
            "strIngredient2": "",
            "strMeasure2": "1 tsp",
            "strIngredient3": "Salt",
            "strMeasure3": "a pinch"
        });
        let meal = normalize_meal(&raw).unwrap();
        assert_eq!(
            meal.ingredients,
            vec![
                IngredientLine {
                    ingredient: "Flour".into(),
                    measure: "2 cups".into()
                },
                IngredientLine {
                    ingredient: "Salt".into(),
                    measure: "a pinch".into()
                },
            ]
        );
    }

    #[test]
    fn convention_b_splits_comma_tags_and_keeps_instruction_text() {
        let raw = json!({
            "idMeal": "1",
            "strMeal": "Stew",
            "strInstructions": "Chop.\nSimmer.",
            "strTags": "Meat, Winter ,Comfort"
        });
        let meal = normalize_meal(&raw).unwrap();
        assert_eq!(meal.tags, vec!["Meat", "Winter", "Comfort"]);
        assert_eq!(meal.instructions, Instructions::Text("Chop.\nSimmer.".into()));
    }

    #[test]
    fn normalizing_canonical_input_is_idempotent() {
        let meal = Meal {
            id: "42".into(),
            name: "Gazpacho".into(),
            category: "Starter".into(),
            area: "Spanish".into(),
            thumbnail: "https://example.com/g.jpg".into(),
            instructions: Instructions::Steps(vec!["Blend.".into(), "Chill.".into()]),
            ingredients: vec![IngredientLine {
                ingredient: "Tomato".into(),
                measure: "6".into(),
            }],
            youtube: String::new(),
            tags: vec!["Cold".into()],
        };
        let raw = serde_json::to_value(&meal).unwrap();
        assert_eq!(normalize_meal(&raw).unwrap(), meal);
    }

    #[test]
    fn missing_id_rejects_the_record() {
        assert!(normalize_meal(&json!({ "name": "Nameless" })).is_none());
        assert!(normalize_meal(&json!({ "idMeal": "", "strMeal": "Blank" })).is_none());
        assert!(normalize_meal(&json!({ "id": null, "name": "Null id" })).is_none());
    }

    #[test]
    fn missing_name_keeps_the_record_with_an_empty_name() {
        let a = normalize_meal(&json!({ "id": "52772" })).unwrap();
        assert_eq!(a.id, "52772");
        assert_eq!(a.name, "");

        let b = normalize_meal(&json!({ "idMeal": "52804" })).unwrap();
        assert_eq!(b.id, "52804");
        assert_eq!(b.name, "");
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let meal = normalize_meal(&json!({ "id": 7, "name": "Seven" })).unwrap();
        assert_eq!(meal.id, "7");
    }

    #[test]
    fn categories_accept_both_conventions() {
        let a = normalize_category(&json!({
            "id": "1", "name": "Beef", "thumbnail": "t.png", "description": "Cow."
        }))
        .unwrap();
        let b = normalize_category(&json!({
            "idCategory": "1",
            "strCategory": "Beef",
            "strCategoryThumb": "t.png",
            "strCategoryDescription": "Cow."
        }))
        .unwrap();
        assert_eq!(a, b);
        assert!(normalize_category(&json!({ "name": "No id" })).is_none());
    }

    #[test]
    fn areas_reduce_to_names() {
        assert_eq!(normalize_area(&json!("Italian")).unwrap(), "Italian");
        assert_eq!(normalize_area(&json!({ "name": "Thai" })).unwrap(), "Thai");
        assert_eq!(normalize_area(&json!({ "strArea": "French" })).unwrap(), "French");
        assert!(normalize_area(&json!({ "strArea": "  " })).is_none());
        assert!(normalize_area(&json!(12)).is_none());
    }
}
