use clap::Parser;
use miette::{IntoDiagnostic, Result};
use order_tx::application::boundary::RollbackPolicy;
use order_tx::application::order_service::OrderService;
use order_tx::domain::payment::ScenarioPaymentGateway;
use order_tx::domain::ports::OrderStoreBox;
use order_tx::error::OrderError;
use order_tx::infrastructure::in_memory::InMemoryOrderStore;
#[cfg(feature = "storage-rocksdb")]
use order_tx::infrastructure::rocksdb::RocksDBOrderStore;
use order_tx::interfaces::csv::order_reader::OrderReader;
use order_tx::interfaces::csv::order_writer::OrderWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input orders CSV file (a `username` column, one order per row)
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Roll back declined orders as well instead of keeping them pending
    #[arg(long)]
    rollback_on_business_error: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn setup_tracing(default_directive: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .compact()
        .init();
}

fn open_store(db_path: Option<PathBuf>) -> Result<OrderStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBOrderStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryOrderStore::new()))
        }
        None => Ok(Box::new(InMemoryOrderStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_level);

    let policy = if cli.rollback_on_business_error {
        RollbackPolicy::rollback_all()
    } else {
        RollbackPolicy::default()
    };
    debug!(?policy, "rollback policy");

    let store = open_store(cli.db_path)?;
    let service = OrderService::with_policy(store, Box::new(ScenarioPaymentGateway::new()), policy);

    // Place orders
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = OrderReader::new(file);
    for request in reader.orders() {
        match request {
            Ok(request) => match service.order(request).await {
                Ok(_) => {}
                Err(OrderError::NotEnoughMoney { order_id, message }) => {
                    eprintln!("Payment declined for order {}: {}", order_id, message);
                }
                Err(e) => {
                    eprintln!("Order failed: {}", e);
                }
            },
            Err(e) => {
                eprintln!("Error reading order: {}", e);
            }
        }
    }

    // Output committed orders
    let orders = service.into_orders().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());
    writer.write_orders(orders).into_diagnostic()?;

    Ok(())
}
