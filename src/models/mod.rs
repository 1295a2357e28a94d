pub mod meal;
pub mod product;

pub use meal::{normalize_area, normalize_category, normalize_meal, Category, IngredientLine, Instructions, Meal};
pub use product::{normalize_product, NutriScore, Product};
