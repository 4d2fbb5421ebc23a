//! Basic khata usage example

use bigdecimal::BigDecimal;
use khata_core::utils::{format_currency, format_date, format_time, MemoryStorage};
use khata_core::{ExpenseCategory, Khata, ShopProfile, TransactionType};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("📒 Khata Core - Basic Khata Example\n");

    // Create a new khata with in-memory storage
    let mut khata = Khata::new(MemoryStorage::new());

    // 1. Set up the shop
    let mut profile = ShopProfile::new(
        "Sharma Kirana Store".to_string(),
        "Ravi Sharma".to_string(),
        "9876543210".to_string(),
        "12 MG Road, Jaipur".to_string(),
    );
    profile.phone_pe_number = Some("9876500001".to_string());
    khata.setup_shop(profile).await?;
    println!("🏪 Shop set up\n");

    // 2. Add customers
    let asha = khata
        .add_customer("Asha Patel".to_string(), "9811100001".to_string())
        .await?;
    let vikram = khata
        .add_customer("Vikram Singh".to_string(), "9811100002".to_string())
        .await?;
    println!("👥 Added {} and {}\n", asha.name, vikram.name);

    // 3. Record entries
    khata
        .record_give(&asha.id, BigDecimal::from(1200), None, Some("Rice and dal".to_string()))
        .await?;
    khata
        .record_get(&asha.id, BigDecimal::from(500), None, None)
        .await?;
    khata
        .record_entry_input(
            &vikram.id,
            TransactionType::Get,
            "300",
            None,
            Some("Advance".to_string()),
        )
        .await?;

    // An invalid amount is rejected before anything is stored
    if let Err(err) = khata
        .record_entry_input(&vikram.id, TransactionType::Give, "abc", None, None)
        .await
    {
        println!("  ✗ Rejected entry: {}\n", err);
    }

    // 4. Customer balances
    println!("📊 Customer Balances:");
    for entry in khata.customers_with_balances("").await? {
        println!(
            "  {:<15} {:<14} {}",
            entry.customer.name,
            entry.balance.label(),
            format_currency(&entry.balance.magnitude(), "INR")
        );
    }
    println!();

    // 5. Expenses
    khata
        .add_expense(
            ExpenseCategory::Transport,
            BigDecimal::from(150),
            Some("Auto to mandi".to_string()),
        )
        .await?;

    // 6. Dashboard
    let stats = khata.dashboard().await?;
    println!("📈 Dashboard:");
    println!("  To receive:       {}", format_currency(&stats.total_receivable, "INR"));
    println!("  To pay:           {}", format_currency(&stats.total_payable, "INR"));
    println!("  Net balance:      {}", format_currency(&stats.net_balance, "INR"));
    println!("  Today collection: {}", format_currency(&stats.today_collection, "INR"));
    println!();

    println!("🕑 Recent activity:");
    for recent in khata.recent_transactions(None).await? {
        println!(
            "  {} {} {:<15} {:<4} {}",
            format_date(recent.transaction.date),
            format_time(recent.transaction.date),
            recent.customer_name,
            recent.transaction.transaction_type,
            format_currency(&recent.transaction.amount, "INR")
        );
    }
    println!();

    // 7. Reminder
    if let Some(message) = khata.reminder_message(&asha.id).await? {
        println!("💬 Reminder for {}:\n{}\n", asha.name, message);
    }

    println!("✅ Done");
    Ok(())
}
