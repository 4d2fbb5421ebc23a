//! Report generation example backed by JSON files

use bigdecimal::BigDecimal;
use khata_core::utils::{format_currency, format_date};
use khata_core::{ExpenseCategory, Khata, KhataConfig, ShopProfile, TabularRow, TimeWindow};
use tracing_subscriber::EnvFilter;

fn print_table<R: TabularRow>(rows: &[R]) {
    println!("  {}", R::headers().join(" | "));
    for row in rows {
        println!("  {}", row.cells().join(" | "));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut config = KhataConfig::load()?;
    config.data_dir = std::env::temp_dir().join("khata-demo");
    let currency = config.default_currency.clone();

    println!("📂 Khata Core - Shop Reports Example");
    println!("   data dir: {}\n", config.data_dir.display());

    let mut khata = Khata::open(config);
    if !khata.is_setup().await? {
        khata
            .setup_shop(ShopProfile::new(
                "Gupta General Store".to_string(),
                "Mohan Gupta".to_string(),
                "9811122233".to_string(),
                "Station Road, Kanpur".to_string(),
            ))
            .await?;
    }

    let customer = khata
        .add_customer("Pooja Mishra".to_string(), "9123456789".to_string())
        .await?;
    khata
        .record_give(&customer.id, BigDecimal::from(2500), None, Some("Monthly ration".to_string()))
        .await?;
    khata
        .record_get(&customer.id, BigDecimal::from(1000), None, None)
        .await?;
    khata
        .add_expense_input(ExpenseCategory::RentAndBills, "4000", Some("Shop rent".to_string()))
        .await?;

    let day_book = khata.day_book(TimeWindow::Today).await?;
    println!("📘 Day book ({}):", day_book.window.label());
    print_table(&day_book.rows);
    println!("  Net: {}\n", format_currency(&day_book.net_total, &currency));

    let outstanding = khata.outstanding_report().await?;
    println!("📋 Outstanding:");
    print_table(&outstanding.rows);
    println!("  Net: {}\n", format_currency(&outstanding.net_total, &currency));

    let expenses = khata.expense_report(TimeWindow::ThisMonth).await?;
    println!("🧾 Expenses ({}):", expenses.window.label());
    print_table(&expenses.rows);
    println!("  Total: {}\n", format_currency(&expenses.total, &currency));

    for entry in khata.expense_breakdown(TimeWindow::All).await? {
        println!("  {:<14} {}", entry.category.label(), format_currency(&entry.total, &currency));
    }

    println!("\n✅ Reports generated on {}", format_date(khata_core::now_millis()));
    Ok(())
}
