//! Park demo binary
//!
//! Seeds the demo attractions, walks through one sale and one admission,
//! optionally sells a batch of random baskets, and prints the report.

use anyhow::Context;
use clap::Parser;
use park::{
    AttractionList, ParkConfig, ParkEnvironment, ParkService, TicketType, seed,
    simulation::{self, DEFAULT_RNG_SEED},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Park demo - scripted ticket sale and admission walkthrough
#[derive(Parser, Debug)]
#[command(name = "park-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Random baskets to sell after the walkthrough
    #[arg(long, default_value_t = 0)]
    baskets: usize,

    /// Seed for the random baskets
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    rng_seed: u64,

    /// Tickets sold in the walkthrough, by name or menu digit (e.g. `adult,2`)
    #[arg(long, value_delimiter = ',', default_value = "adult")]
    basket: Vec<TicketType>,

    /// Cash offered for the walkthrough basket
    #[arg(long, default_value_t = 100.0)]
    cash: f64,

    /// Attraction id base override, takes precedence over `PARK_ATTRACTION_ID_BASE`
    #[arg(long)]
    id_base: Option<u32>,

    /// Skip creating the default attractions
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = ParkConfig::from_env();
    if let Some(base) = cli.id_base {
        config.attraction_id_base = base;
    }
    if cli.no_seed {
        config.seed_defaults = false;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        attraction_id_base = config.attraction_id_base,
        seed_defaults = config.seed_defaults,
        "Configuration loaded"
    );

    let park = ParkService::with_config(&config, ParkEnvironment::production());
    if config.seed_defaults {
        seed(&park).await.context("seeding default attractions")?;
    }

    println!("=== Park Demo ===\n");
    let attractions = park.list_attractions().await;
    println!("{}\n", AttractionList(attractions.clone()));

    // The walkthrough basket, then a ride on the second attraction
    match park.sell_tickets(&cli.basket, cli.cash).await {
        Ok(sale) => {
            println!("TOTAL: {:.2} | Payment OK. Change: {:.2}", sale.total, sale.change);
            println!("Tickets issued:");
            for ticket in &sale.tickets {
                println!(" - {} ({})", ticket.id, ticket.ticket_type);
            }

            if let (Some(ticket), Some(ride)) = (sale.tickets.first(), attractions.get(1)) {
                match park.enter(&ticket.id, ride.id).await {
                    Ok(admission) => println!(
                        "Entry to '{}' OK. Slots left: {}",
                        admission.attraction_name, admission.remaining
                    ),
                    Err(error) => println!("Entry refused: {error}"),
                }
            }
        },
        Err(error) => println!("Sale refused: {error}"),
    }

    if cli.baskets > 0 {
        if let Some(target) = attractions.first() {
            let summary = simulation::run_orders(&park, cli.baskets, cli.rng_seed, target.id)
                .await
                .context("running random baskets")?;
            println!(
                "\nRandom baskets: {} | tickets: {} | admitted: {} | refused: {}",
                summary.orders, summary.tickets_sold, summary.admissions, summary.refused_entries
            );
        } else {
            println!("\nNo attractions to run random baskets against.");
        }
    }

    println!("\n{}", park.report().await);

    park.shutdown();
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn basket_accepts_names_and_menu_digits() {
        let cli = Cli::try_parse_from(["park-demo", "--basket", "adult,2,Senior", "--cash", "120"])
            .unwrap();
        assert_eq!(
            cli.basket,
            vec![TicketType::Adult, TicketType::Child, TicketType::Senior]
        );
        assert!((cli.cash - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn walkthrough_defaults_to_one_adult_for_100() {
        let cli = Cli::try_parse_from(["park-demo"]).unwrap();
        assert_eq!(cli.basket, vec![TicketType::Adult]);
        assert!((cli.cash - 100.0).abs() < f64::EPSILON);
        assert_eq!(cli.id_base, None);
    }

    #[test]
    fn unknown_ticket_type_is_refused() {
        let error = Cli::try_parse_from(["park-demo", "--basket", "adult,vip"]).unwrap_err();
        assert!(error.to_string().contains("unknown ticket type 'VIP'"));
    }
}
