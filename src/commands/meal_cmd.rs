use colored::Colorize;

use super::print_error;
use crate::api::NutriApi;
use crate::models::{Instructions, Meal};

pub async fn list_meals(api: &NutriApi) {
    let result = api.get_meals().await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    print_meal_rows(&result.data);
}

pub async fn meal_details(api: &NutriApi, id: &str) {
    if id.is_empty() {
        println!("Usage: meal <id>");
        return;
    }
    let result = api.get_meal_details(id).await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    if let Some(meal) = result.data {
        print_meal(&meal);
    }
}

pub async fn list_categories(api: &NutriApi) {
    let result = api.get_categories().await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    println!("\n📂 Categories:");
    for category in &result.data {
        println!("  {} {}", category.name.bold(), format!("[{}]", category.id).dimmed());
    }
    println!();
}

pub async fn list_areas(api: &NutriApi) {
    let result = api.get_areas().await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    println!("\n🌍 Cuisines:");
    for area in &result.data {
        println!("  {area}");
    }
    println!();
}

pub async fn filter_by_category(api: &NutriApi, category: &str) {
    if category.is_empty() {
        println!("Usage: category <name>");
        return;
    }
    let result = api.filter_by_category(category).await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    print_meal_rows(&result.data);
}

pub async fn filter_by_area(api: &NutriApi, area: &str) {
    if area.is_empty() {
        println!("Usage: area <name>");
        return;
    }
    let result = api.filter_by_area(area).await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    print_meal_rows(&result.data);
}

pub async fn search(api: &NutriApi, query: &str) {
    let result = api.search_meals(query).await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    print_meal_rows(&result.data);
}

fn print_meal_rows(meals: &[Meal]) {
    println!();
    for meal in meals {
        let mut line = format!("  {} {}", meal.name.bold(), format!("[{}]", meal.id).dimmed());
        if !meal.category.is_empty() {
            line.push_str(&format!(" · {}", meal.category));
        }
        if !meal.area.is_empty() {
            line.push_str(&format!(" · {}", meal.area));
        }
        println!("{line}");
    }
    println!("\n  {} meal(s)\n", meals.len());
}

fn print_meal(meal: &Meal) {
    println!("\n🍳 {} {}", meal.name.bold(), format!("[{}]", meal.id).dimmed());
    if !meal.category.is_empty() || !meal.area.is_empty() {
        println!("   {} · {}", meal.category, meal.area);
    }
    if !meal.tags.is_empty() {
        println!("   🏷  {}", meal.tags.join(", "));
    }

    if !meal.ingredients.is_empty() {
        println!("\n📝 Ingredients:");
        for line in &meal.ingredients {
            if line.measure.trim().is_empty() {
                println!("  • {}", line.ingredient);
            } else {
                println!("  • {} — {}", line.ingredient, line.measure);
            }
        }
    }

    if !meal.instructions.is_empty() {
        println!("\n📋 Instructions:");
        // a text blob is split into steps only here, at render time
        match &meal.instructions {
            Instructions::Text(text) => {
                for (i, step) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
                    println!("  {}. {}", i + 1, step.trim());
                }
            }
            Instructions::Steps(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    println!("  {}. {step}", i + 1);
                }
            }
        }
    }

    if !meal.youtube.is_empty() {
        println!("\n▶️  {}", meal.youtube.underline());
    }
    println!();
}
