use colored::Colorize;

use crate::api::NutriApi;
use crate::nutrition::DailyLimits;
use crate::storage::FoodLogStore;

mod log_cmd;
mod meal_cmd;
mod product_cmd;

/// Whether the REPL should keep running after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct CommandHandler {
    api: NutriApi,
    store: FoodLogStore,
    limits: DailyLimits,
}

impl CommandHandler {
    pub fn new(api: NutriApi, store: FoodLogStore, limits: DailyLimits) -> Self {
        Self { api, store, limits }
    }

    pub async fn handle_command(&self, input: &str) -> Flow {
        let input = input.trim();
        if input.is_empty() {
            return Flow::Continue;
        }

        match input.to_lowercase().as_str() {
            "help" => {
                print_help();
                return Flow::Continue;
            }
            "exit" | "quit" => {
                println!("👋 Goodbye!");
                return Flow::Exit;
            }
            _ => {}
        }

        let (first, rest) = match input.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest.trim()),
            None => (input, ""),
        };
        let command = first.to_lowercase();

        match command.as_str() {
            "meals" => meal_cmd::list_meals(&self.api).await,
            "meal" => meal_cmd::meal_details(&self.api, rest).await,
            "categories" => meal_cmd::list_categories(&self.api).await,
            "areas" => meal_cmd::list_areas(&self.api).await,
            "category" => meal_cmd::filter_by_category(&self.api, rest).await,
            "area" => meal_cmd::filter_by_area(&self.api, rest).await,
            "search" => meal_cmd::search(&self.api, rest).await,
            "product" => product_cmd::search(&self.api, rest).await,
            "barcode" => product_cmd::barcode(&self.api, rest).await,
            "log" => log_cmd::handle(&self.api, &self.store, &self.limits, rest).await,
            "fav" => log_cmd::add_favorite(&self.store, rest),
            "unfav" => log_cmd::remove_favorite(&self.store, rest),
            "favs" => log_cmd::list_favorites(&self.store),
            _ => {
                println!(
                    "{} unknown command '{}'. Type 'help' for available commands.",
                    "⚠".yellow(),
                    command
                );
            }
        }
        Flow::Continue
    }
}

/// Print an envelope error without disturbing anything already on screen.
pub(crate) fn print_error(message: &str) {
    println!("{} {}", "⚠".yellow(), message.red());
}

fn print_help() {
    println!("\n🍽️  Meal Commands:");
    println!("  meals              - Browse the meal catalog");
    println!("  meal <id>          - Show one recipe in full");
    println!("  categories         - List meal categories");
    println!("  areas              - List cuisines");
    println!("  category <name>    - Meals in a category");
    println!("  area <name>        - Meals from a cuisine");
    println!("  search <query>     - Search meals by name");
    println!();

    println!("🛒 Product Commands (need USDA_API_KEY):");
    println!("  product <query>    - Search nutrition facts by name");
    println!("  barcode <code>     - Look a product up by barcode");
    println!();

    println!("📋 Food Log Commands:");
    println!("  log                - Today's log, totals, and progress");
    println!("  log meal <id>      - Log a meal from the catalog");
    println!("  log product <barcode or name> - Log a product with its nutrition");
    println!("  log custom <name> <kcal> <protein> <carbs> <fats>");
    println!("  log remove <id>    - Remove one entry");
    println!("  log clear          - Clear today's log");
    println!();

    println!("⭐ Favorites:");
    println!("  fav <meal-id> | unfav <meal-id> | favs");
    println!();

    println!("⚙️  System:");
    println!("  help | exit");
    println!();
}
