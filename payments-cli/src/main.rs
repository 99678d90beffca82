//! Payments CLI
//!
//! Command-line interface for the payments API client.

mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use payments_service::{CustomerService, DestroySchedulesReport};
use payments_types::{ChargeId, CustomerId, Order, PaginationParams, ScheduleId};

use config::Config;

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payments API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the payments API (overrides PAYMENTS_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Secret key (overrides PAYMENTS_SECRET_KEY)
    #[arg(long)]
    secret_key: Option<String>,

    /// Log request and step details
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer operations
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Charge operations
    Charge {
        #[command(subcommand)]
        action: ChargeCommands,
    },
    /// Schedule operations
    Schedule {
        #[command(subcommand)]
        action: ScheduleCommands,
    },
}

/// List options shared by list commands.
#[derive(clap::Args)]
struct ListArgs {
    /// Maximum number of records to return
    #[arg(long)]
    limit: Option<u32>,
    /// Number of records to skip
    #[arg(long)]
    offset: Option<u64>,
    /// Newest first
    #[arg(long)]
    newest_first: bool,
}

impl ListArgs {
    fn params(&self) -> Option<PaginationParams> {
        if self.limit.is_none() && self.offset.is_none() && !self.newest_first {
            return None;
        }
        let mut params = PaginationParams::new();
        params.limit = self.limit;
        params.offset = self.offset;
        if self.newest_first {
            params.order = Some(Order::ReverseChronological);
        }
        Some(params)
    }
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Get customer details
    Get { id: String },
    /// List customers
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Attach a card token and make the card the default
    AddCardDefault {
        id: String,
        /// Card token
        #[arg(long)]
        token: String,
    },
    /// List the customer's schedules
    Schedules {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Delete every active schedule of the customer
    DestroySchedules { id: String },
}

#[derive(Subcommand)]
enum ChargeCommands {
    /// Get charge details
    Get { id: String },
    /// List charges
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Capture an authorized charge
    Capture { id: String },
    /// Reverse an uncaptured charge
    Reverse { id: String },
    /// Expire a pending charge
    Expire { id: String },
}

#[derive(Subcommand)]
enum ScheduleCommands {
    /// Get schedule details
    Get { id: String },
    /// List schedules
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Delete a schedule
    Destroy { id: String },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,payments_client=debug,payments_service=debug"
    } else {
        "warn,payments_service=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_json(report: &DestroySchedulesReport) -> serde_json::Value {
    serde_json::json!({
        "outcome": report.outcome(),
        "deleted": report.deleted,
        "failed": report
            .failed
            .iter()
            .map(|f| serde_json::json!({ "id": f.id, "error": f.error.to_string() }))
            .collect::<Vec<_>>(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env(cli.api_url.as_deref(), cli.secret_key.as_deref())?;
    tracing::debug!("Using API at {}", config.api_url);

    let client = config.client();

    match cli.command {
        Commands::Customer { action } => {
            let customers = client.customers();
            match action {
                CustomerCommands::Get { id } => {
                    print_json(&customers.retrieve(&CustomerId::from(id)).await?)?;
                }
                CustomerCommands::List { list } => {
                    print_json(&customers.list(list.params()).await?)?;
                }
                CustomerCommands::AddCardDefault { id, token } => {
                    let service = CustomerService::new(customers, client.schedules());
                    let customer = service
                        .add_card_as_default(&CustomerId::from(id), &token)
                        .await?;
                    print_json(&customer)?;
                }
                CustomerCommands::Schedules { id, list } => {
                    let schedules = customers
                        .list_schedules(&CustomerId::from(id), list.params())
                        .await?;
                    print_json(&schedules)?;
                }
                CustomerCommands::DestroySchedules { id } => {
                    let service = CustomerService::new(customers, client.schedules());
                    let report = service
                        .destroy_active_schedules(&CustomerId::from(id))
                        .await?;
                    print_json(&report_json(&report))?;
                    if !report.is_complete() {
                        std::process::exit(1);
                    }
                }
            }
        }

        Commands::Charge { action } => {
            let charges = client.charges();
            match action {
                ChargeCommands::Get { id } => {
                    print_json(&charges.retrieve(&ChargeId::from(id)).await?)?;
                }
                ChargeCommands::List { list } => {
                    print_json(&charges.list(list.params()).await?)?;
                }
                ChargeCommands::Capture { id } => {
                    print_json(&charges.capture(&ChargeId::from(id)).await?)?;
                }
                ChargeCommands::Reverse { id } => {
                    print_json(&charges.reverse(&ChargeId::from(id)).await?)?;
                }
                ChargeCommands::Expire { id } => {
                    print_json(&charges.expire(&ChargeId::from(id)).await?)?;
                }
            }
        }

        Commands::Schedule { action } => {
            let schedules = client.schedules();
            match action {
                ScheduleCommands::Get { id } => {
                    print_json(&schedules.retrieve(&ScheduleId::from(id)).await?)?;
                }
                ScheduleCommands::List { list } => {
                    print_json(&schedules.list(list.params()).await?)?;
                }
                ScheduleCommands::Destroy { id } => {
                    print_json(&schedules.destroy(&ScheduleId::from(id)).await?)?;
                }
            }
        }
    }

    Ok(())
}
