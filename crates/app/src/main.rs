use anyhow::Context;

use pantry_app::{Kitchen, KitchenConfig};
use pantry_mealplan::{Day, MealTime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pantry_observability::init();

    let config = KitchenConfig::from_env();
    tracing::info!(?config, "starting kitchen");
    let kitchen = Kitchen::from_config(&config);

    let term = std::env::args().nth(1).unwrap_or_default();
    for group in kitchen.categorize(&kitchen.search(&term)) {
        println!("{}", group.category.label());
        for item in &group.items {
            println!(
                "  {:<16} {} {:<6} [{}] {}",
                item.name(),
                item.quantity(),
                item.unit(),
                item.status(),
                kitchen.expiry_label(item)
            );
        }
    }

    for barcode in ["123456789012", "000000000000"] {
        match kitchen.scan(barcode).await {
            Ok(item) => println!("Added {} to your inventory!", item.name()),
            Err(err) => println!("{barcode}: {err}"),
        }
    }

    let toast = kitchen
        .recipes()
        .find_by_title("Avocado Toast")
        .cloned()
        .context("demo recipe book has no Avocado Toast")?;
    let missing = kitchen.plan_slot(Day::Monday, MealTime::Breakfast, toast);
    tracing::info!(?missing, "planned monday breakfast");

    kitchen.record_cooked("Avocado Toast")?;
    for dish in kitchen.search_cooked(&term) {
        println!(
            "{:<24} cooked {}x, last {} ({})",
            dish.name,
            dish.times_cooked,
            kitchen.last_cooked_label(&dish),
            dish.rating
        );
    }

    println!("{}", serde_json::to_string_pretty(&kitchen.snapshot())?);
    Ok(())
}
