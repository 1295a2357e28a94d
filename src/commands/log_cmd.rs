use colored::Colorize;

use super::print_error;
use crate::api::NutriApi;
use crate::nutrition::{progress_percent, totals, DailyLimits};
use crate::storage::{today, FoodLogStore, LogDraft};

pub async fn handle(api: &NutriApi, store: &FoodLogStore, limits: &DailyLimits, rest: &str) {
    let (sub, args) = match rest.split_once(char::is_whitespace) {
        Some((sub, args)) => (sub, args.trim()),
        None => (rest, ""),
    };
    match sub {
        "" => show(store, limits),
        "meal" => log_meal(api, store, args).await,
        "product" => log_product(api, store, args).await,
        "custom" => log_custom(store, args),
        "remove" => remove(store, args),
        "clear" => {
            store.clear(today());
            println!("🗑  Cleared today's log.");
        }
        other => {
            println!("Unknown log subcommand '{other}'. Try: log, log meal, log product, log custom, log remove, log clear");
        }
    }
}

fn show(store: &FoodLogStore, limits: &DailyLimits) {
    let log = store.get(today());
    if log.is_empty() {
        println!("\n📋 Food log is empty for today.\n");
        return;
    }

    println!("\n📋 Today's Food Log:");
    for entry in &log {
        println!(
            "  {} {} — {:.0} kcal  {}",
            format!("[{}]", entry.id).dimmed(),
            entry.name.bold(),
            entry.calories,
            entry.entry_type.label().dimmed()
        );
    }

    let t = totals(&log);
    println!("\n🥗 Totals:");
    print_progress("Calories", t.calories, limits.calories, "kcal");
    print_progress("Protein", t.protein, limits.protein, "g");
    print_progress("Carbs", t.carbs, limits.carbs, "g");
    print_progress("Fats", t.fats, limits.fats, "g");
    println!();
}

fn print_progress(label: &str, current: f64, limit: f64, unit: &str) {
    let pct = progress_percent(current, limit);
    let filled = (pct / 5.0).round() as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled));
    let bar = if pct >= 100.0 { bar.red() } else { bar.green() };
    println!("  {label:<9} {bar} {:.0} / {:.0} {unit}", current, limit);
}

async fn log_meal(api: &NutriApi, store: &FoodLogStore, id: &str) {
    if id.is_empty() {
        println!("Usage: log meal <id>");
        return;
    }
    let result = api.get_meal_details(id).await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    if let Some(meal) = result.data {
        store.add(meal.to_log_draft(), today());
        println!("✅ {} added to today's log.", meal.name.bold());
        println!("   (recipe upstreams carry no nutrition facts; edit with 'log custom' if needed)");
    }
}

// Barcodes are all digits and at least 8 long; anything else is a name query.
fn looks_like_barcode(term: &str) -> bool {
    term.len() >= 8 && term.chars().all(|c| c.is_ascii_digit())
}

async fn log_product(api: &NutriApi, store: &FoodLogStore, term: &str) {
    if term.is_empty() {
        println!("Usage: log product <barcode or name>");
        return;
    }
    let product = if looks_like_barcode(term) {
        let result = api.get_product_by_barcode(term).await;
        if let Some(err) = result.error {
            print_error(&err);
            return;
        }
        result.data
    } else {
        let result = api.search_products(term, 1, 1).await;
        if let Some(err) = result.error {
            print_error(&err);
            return;
        }
        result.data.into_iter().next()
    };
    if let Some(product) = product {
        store.add(product.to_log_draft(), today());
        println!(
            "✅ {} added to today's log ({:.0} kcal).",
            product.name.bold(),
            product.calories
        );
    }
}

fn log_custom(store: &FoodLogStore, args: &str) {
    // trailing four words are numbers, everything before them is the name
    let words: Vec<&str> = args.split_whitespace().collect();
    if words.len() < 5 {
        println!("Usage: log custom <name> <kcal> <protein> <carbs> <fats>");
        return;
    }
    let numbers: Vec<f64> = words[words.len() - 4..]
        .iter()
        .filter_map(|w| w.parse().ok())
        .collect();
    if numbers.len() != 4 {
        println!("Usage: log custom <name> <kcal> <protein> <carbs> <fats>");
        return;
    }
    let name = words[..words.len() - 4].join(" ");
    store.add(
        LogDraft::custom(&name, numbers[0], numbers[1], numbers[2], numbers[3]),
        today(),
    );
    println!("✅ {} added to today's log.", name.bold());
}

fn remove(store: &FoodLogStore, id: &str) {
    if id.is_empty() {
        println!("Usage: log remove <id>");
        return;
    }
    let before = store.get(today()).len();
    let after = store.remove(id, today()).len();
    if after < before {
        println!("🗑  Entry removed.");
    } else {
        println!("No entry with id {id}.");
    }
}

pub fn add_favorite(store: &FoodLogStore, meal_id: &str) {
    if meal_id.is_empty() {
        println!("Usage: fav <meal-id>");
        return;
    }
    store.add_favorite(meal_id);
    println!("⭐ Meal {meal_id} favorited.");
}

pub fn remove_favorite(store: &FoodLogStore, meal_id: &str) {
    if meal_id.is_empty() {
        println!("Usage: unfav <meal-id>");
        return;
    }
    store.remove_favorite(meal_id);
    println!("Meal {meal_id} unfavorited.");
}

pub fn list_favorites(store: &FoodLogStore) {
    let favorites = store.favorites();
    if favorites.is_empty() {
        println!("No favorites yet. Use 'fav <meal-id>' while browsing.");
        return;
    }
    println!("\n⭐ Favorite meals:");
    for id in favorites {
        println!("  {id}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::looks_like_barcode;

    #[test]
    fn barcode_terms_are_digit_runs_of_at_least_eight() {
        assert!(looks_like_barcode("40111445"));
        assert!(looks_like_barcode("5000112637922"));
        assert!(!looks_like_barcode("4011144"));
        assert!(!looks_like_barcode("greek yogurt"));
        assert!(!looks_like_barcode("4011a445"));
    }
}
