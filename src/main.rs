use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use bank_ledger::{BankService, LedgerConfig};

fn main() -> Result<()> {
    let config = LedgerConfig::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut bank = BankService::with_config(&config).context("Invalid interest rate")?;

    run_demo(&mut bank);

    println!("\n📊 Snapshot");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", bank.snapshot_json().context("Failed to serialize accounts")?);

    Ok(())
}

/// Replays the demonstration script: every call prints its outcome
fn run_demo(bank: &mut BankService) {
    let savings1 = bank.create_savings_account("Peter Parker");
    let savings2 = bank.create_savings_account("Rick Grimes");

    let checking1 = bank.create_checking_account("Peter Parker", 500.0);
    let checking2 = bank.create_checking_account("Rick Grimes", 120.0);

    println!("=== CHECKING ACCOUNTS ===");
    report(bank.deposit_money(checking1, 100.0));
    print_details(bank, checking1);

    report(bank.withdraw_money(checking1, 100.0));
    print_details(bank, checking1);

    report(bank.transfer_money(checking1, savings2, 100.0));
    print_details(bank, checking1);
    print_details(bank, savings2);

    report(bank.change_checking_account_limit(checking2, 200.0));
    print_details(bank, checking2);

    // Errors
    report(bank.withdraw_money(checking1, 1000.0));
    report(bank.withdraw_money(checking1, 0.0));
    report(bank.withdraw_money(checking1, -1000.0));

    report(bank.deposit_money(checking1, 0.0));
    report(bank.deposit_money(checking1, -1000.0));

    report(bank.transfer_money(savings2, savings1, 1000.0));

    println!("=== SAVINGS ACCOUNTS ===");
    report(bank.deposit_money(savings1, 200.0));
    print_details(bank, savings1);

    report(bank.withdraw_money(savings1, 100.0));
    print_details(bank, savings1);

    bank.provide_interest_to_all_users();
    print_details(bank, savings1);
    print_details(bank, savings2);

    report(bank.update_interest_rate(0.3));
    bank.provide_interest_to_all_users();
    print_details(bank, savings1);
    print_details(bank, savings2);

    // Errors
    report(bank.withdraw_money(savings2, 1000.0));
    report(bank.withdraw_money(savings2, 0.0));
    report(bank.withdraw_money(savings2, -1000.0));

    report(bank.deposit_money(savings2, 0.0));
    report(bank.deposit_money(savings2, -1000.0));
}

fn report(result: bank_ledger::Result<()>) {
    if let Err(e) = result {
        println!("Error: {}", e);
    }
}

fn print_details(bank: &BankService, id: Uuid) {
    match bank.get_account_details(id) {
        Ok(details) => println!("{}", details),
        Err(e) => println!("Error: {}", e),
    }
}
