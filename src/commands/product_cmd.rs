use colored::Colorize;

use super::print_error;
use crate::api::NutriApi;
use crate::models::Product;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 24;

pub async fn search(api: &NutriApi, query: &str) {
    let result = api.search_products(query, DEFAULT_PAGE, DEFAULT_LIMIT).await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    println!();
    for product in &result.data {
        print_product_row(product);
    }
    println!("\n  {} product(s)\n", result.data.len());
}

pub async fn barcode(api: &NutriApi, code: &str) {
    let result = api.get_product_by_barcode(code).await;
    if let Some(err) = result.error {
        print_error(&err);
        return;
    }
    if let Some(product) = &result.data {
        println!();
        print_product_row(product);
        println!();
    }
}

fn print_product_row(product: &Product) {
    let score = product
        .nutri_score
        .map(|s| format!(" [Nutri-Score {}]", s.letter()))
        .unwrap_or_default();
    let brand = if product.brand.is_empty() {
        String::new()
    } else {
        format!(" ({})", product.brand)
    };
    println!(
        "  {}{} — {:.0} kcal · {:.1}g protein · {:.1}g carbs · {:.1}g fat{}",
        product.name.bold(),
        brand.dimmed(),
        product.calories,
        product.protein,
        product.carbs,
        product.fats,
        score.green()
    );
}
