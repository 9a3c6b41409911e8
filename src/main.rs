use anyhow::Context;
use cart_sync::core::ConfigProvider;
use cart_sync::utils::logger::{self, LogFormat};
use cart_sync::utils::validation::Validate;
use cart_sync::{
    Cart, CartManager, CartSnapshotStore, CliConfig, Command, ConsoleNotifier, HttpStockClient,
    LocalStorage, Outcome,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, config.verbose);

    tracing::info!("Starting cart-sync CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let code = match run(&config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("❌ Startup failed: {:#}", e);
            if let Some(cart_error) = e.downcast_ref::<cart_sync::CartError>() {
                eprintln!("❌ {}", cart_error.user_friendly_message());
            } else {
                eprintln!("❌ {:#}", e);
            }
            3
        }
    };

    std::process::exit(code);
}

async fn run(config: &CliConfig) -> anyhow::Result<i32> {
    let settings = config.settings()?;
    settings.validate()?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let store = CartSnapshotStore::new(LocalStorage::from_config(&settings));
    let api = HttpStockClient::from_config(&settings)?;
    let manager = CartManager::load(store, api, ConsoleNotifier)
        .await
        .with_context(|| format!("loading cart from {}", settings.storage_dir()))?;

    let outcome = match config.command {
        Command::Show => {
            print_cart(&manager.snapshot());
            return Ok(0);
        }
        Command::Add { id } => manager.add_product(id).await,
        Command::Remove { id } => manager.remove_product(id).await,
        Command::Update { id, amount } => manager.update_product_amount(id, amount).await,
    };

    let code = match &outcome {
        Outcome::Committed(_) | Outcome::Ignored => 0,
        Outcome::Rejected { .. } => 2,
        Outcome::Failed { .. } => 1,
    };

    print_cart(&manager.snapshot());
    Ok(code)
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    for product in cart {
        println!(
            "{:>6}  {:<40} {:>4} x {:>9.2} = {:>10.2}",
            product.id(),
            product.metadata.title().unwrap_or("-"),
            product.amount,
            product.metadata.price().unwrap_or(0.0),
            product.subtotal()
        );
    }
    println!(
        "🛒 {} items, total {:.2}",
        cart.total_items(),
        cart.total_price()
    );
}
