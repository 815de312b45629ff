use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use elevator_console::analytics::{
    customer_history, dashboard_counters, mtbf_days, order_board, site_status, stock_summary,
    technician_distribution, BoardFilter, HistoryFilter, Metric,
};
use elevator_console::clients::ActorClient;
use elevator_console::config::load_settings;
use elevator_console::lifecycle::{setup_tracing, ConsoleSystem};
use elevator_console::model::{CustomerId, EquipmentId, OrderId, OrderStatus, TechnicianId};
use std::path::PathBuf;
use tracing::Instrument;

#[derive(Parser)]
#[command(
    name = "elevator-console",
    about = "Back-office console for elevator maintenance",
    version
)]
struct Cli {
    /// Settings file. Defaults to ./console.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard counters, stock health and the state of every site.
    Summary,
    /// The service order board, newest first.
    Orders {
        /// open, in-progress, pending-parts, completed or cancelled
        #[arg(long)]
        status: Option<OrderStatus>,
        /// all, emergency, today or pending
        #[arg(long, default_value = "all")]
        metric: Metric,
        /// Matches customer, equipment, order number and description.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Move an open order to in-progress.
    Start { id: String },
    /// Complete an order and debit its reserved parts.
    Finalize { id: String },
    Cancel { id: String },
    /// Stock levels.
    Stock {
        /// Only items at or below their minimum.
        #[arg(long)]
        critical: bool,
    },
    /// Maintenance history of one customer.
    History {
        customer_id: String,
        #[arg(long)]
        day: Option<NaiveDate>,
        #[arg(long)]
        technician: Option<String>,
        #[arg(long)]
        equipment: Option<String>,
    },
    /// Place every customer on the map, geocoding the addresses that have no coordinates yet.
    Geocode,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    let system = ConsoleSystem::connect(&settings).context("failed to build the HTTP client")?;

    let outcome = run(&system, cli.command)
        .instrument(tracing::info_span!("command"))
        .await;

    system.shutdown().await?;
    outcome
}

async fn run(system: &ConsoleSystem, command: Commands) -> Result<()> {
    system
        .load_all()
        .await
        .context("failed to load the console data")?;
    let today = Utc::now().date_naive();

    match command {
        Commands::Summary => summary(system, today).await,
        Commands::Orders {
            status,
            metric,
            search,
        } => {
            let orders = system.order_client.list().await?;
            let directory = system.directory().await?;
            let filter = BoardFilter {
                status,
                metric,
                query: search,
            };
            let rows = order_board(&orders, &directory, &filter, today);
            for row in &rows {
                println!("{row}");
            }
            println!("{} order(s)", rows.len());
            Ok(())
        }
        Commands::Start { id } => {
            system.order_client.start_order(OrderId::from(id)).await?;
            print_notification(system);
            Ok(())
        }
        Commands::Finalize { id } => {
            system.order_client.finalize_order(OrderId::from(id)).await?;
            print_notification(system);
            Ok(())
        }
        Commands::Cancel { id } => {
            system.order_client.cancel_order(OrderId::from(id)).await?;
            print_notification(system);
            Ok(())
        }
        Commands::Stock { critical } => stock(system, critical).await,
        Commands::History {
            customer_id,
            day,
            technician,
            equipment,
        } => {
            let filter = HistoryFilter {
                day,
                technician: technician.map(TechnicianId::from),
                equipment: equipment.map(EquipmentId::from),
            };
            history(system, CustomerId::from(customer_id), filter).await
        }
        Commands::Geocode => geocode(system).await,
    }
}

fn print_notification(system: &ConsoleSystem) {
    if let Some(notification) = system.notifier.current() {
        println!("{notification}");
    }
}

async fn summary(system: &ConsoleSystem, today: NaiveDate) -> Result<()> {
    let orders = system.order_client.list().await?;
    let items = system.stock_client.list().await?;
    let directory = system.directory().await?;

    let counters = dashboard_counters(&orders, today);
    println!("Pending orders     {}", counters.pending);
    println!("Emergencies        {}", counters.emergency);
    println!("Opened today       {}", counters.today);

    let stock = stock_summary(&items);
    println!("Stock value        R$ {:.2}", stock.total_value);
    println!("Critical items     {}", stock.critical_count());
    println!("Healthy stock      {}%", stock.healthy_percent);

    println!();
    let mut customers: Vec<_> = directory.customers().collect();
    customers.sort_by(|a, b| a.name.cmp(&b.name));
    for customer in customers {
        println!("{:<32} {}", customer.name, site_status(&orders, &customer.id));
    }

    println!();
    for (technician, count) in technician_distribution(&orders, &directory) {
        println!("{technician:<32} {count}");
    }
    Ok(())
}

async fn stock(system: &ConsoleSystem, critical_only: bool) -> Result<()> {
    let items = if critical_only {
        system.stock_client.list_critical().await?
    } else {
        system.stock_client.list().await?
    };
    for item in &items {
        println!(
            "{:<10} {:<32} {:>5} / {:<5} {:<4}{}",
            item.code,
            item.name,
            item.current_quantity,
            item.min_quantity,
            item.unit,
            if item.is_critical() { " CRITICAL" } else { "" },
        );
    }
    println!("{} item(s)", items.len());
    Ok(())
}

async fn history(
    system: &ConsoleSystem,
    customer_id: CustomerId,
    filter: HistoryFilter,
) -> Result<()> {
    let directory = system.directory().await?;
    let Some(customer) = directory.customer(&customer_id) else {
        bail!("unknown customer {customer_id}");
    };
    let orders = system.order_client.list_by_customer(customer_id.clone()).await?;

    println!("{} ({})", customer.name, customer.address);
    for order in customer_history(&orders, &customer_id, &filter) {
        println!(
            "{:<12} {} {:<14} {:<20} {:<20} {}",
            order.order_number,
            order.created_at.format("%d/%m/%Y"),
            order.status,
            directory.equipment_name(&order.equipment_id),
            directory.technician_name(order.technician_id.as_ref()),
            order.description,
        );
    }
    match mtbf_days(&orders) {
        Some(days) => println!("MTBF {days} day(s)"),
        None => println!("MTBF n/a"),
    }
    Ok(())
}

async fn geocode(system: &ConsoleSystem) -> Result<()> {
    let (placed, unplaced) = system.place_customers().await?;
    for pin in &placed {
        println!(
            "{:<32} {:>10.5} {:>10.5} {}",
            pin.name, pin.lat, pin.lng, pin.status
        );
    }
    for customer in &unplaced {
        println!("{:<32} address not found: {}", customer.name, customer.address);
    }
    print_notification(system);
    Ok(())
}
