pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod nutrition;
pub mod storage;

// Re-export commonly used items
pub use api::{Envelope, NutriApi, ProductSource, RecipeSource};
pub use config::AppConfig;
pub use models::{Category, Meal, Product};
pub use nutrition::{progress_percent, totals, DailyLimits, NutritionTotals};
pub use storage::{FoodLogEntry, FoodLogStore, LogDraft};
