mod browse;
mod places;
mod state;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use scrolleats_places::{GeocodeQuery, DEFAULT_NEARBY_RADIUS_METERS};

use crate::places::{build_aggregator, print_json, OriginArgs};
use crate::state::{record_rating, StateFile};

#[derive(Debug, Parser)]
#[command(name = "scrolleats")]
#[command(about = "Discover restaurants one at a time")]
struct Cli {
    /// Overrides SCROLLEATS_STATE_PATH
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Restaurants around a point, nearest first
    Nearby {
        #[command(flatten)]
        origin: OriginArgs,
        /// Search radius in meters (capped at 50000)
        #[arg(long, default_value_t = DEFAULT_NEARBY_RADIUS_METERS)]
        radius: i64,
        /// Place category to search, e.g. cafe
        #[arg(long)]
        category: Option<String>,
    },
    /// Free-text restaurant search, optionally biased to a location
    Search {
        query: String,
        #[command(flatten)]
        origin: OriginArgs,
        #[arg(long)]
        radius: Option<i64>,
    },
    /// Full details for one place
    Details { place_id: String },
    /// Reviews for one place
    Reviews { place_id: String },
    /// Resolve an address or place id to coordinates
    Geocode {
        #[arg(long, required_unless_present = "place_id", conflicts_with = "place_id")]
        address: Option<String>,
        #[arg(long)]
        place_id: Option<String>,
    },
    /// City suggestions for partial input
    Autocomplete { input: String },
    /// Rate a restaurant (boom 0-5, stars 1-5)
    Rate {
        restaurant_id: String,
        #[arg(long)]
        boom: u8,
        #[arg(long)]
        stars: u8,
        #[arg(long)]
        review: Option<String>,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Add or remove a favorite
    Favorite { restaurant_id: String },
    /// Show saved ratings and favorites
    Ratings,
    /// Step through nearby restaurants one at a time
    Browse {
        #[command(flatten)]
        origin: OriginArgs,
        #[arg(long, default_value_t = DEFAULT_NEARBY_RADIUS_METERS)]
        radius: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = scrolleats_core::load_app_config()?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state_file = StateFile::new(cli.state.unwrap_or_else(|| config.state_path.clone()));

    let Some(command) = cli.command else {
        println!("scrolleats: run with --help to list commands");
        return Ok(());
    };

    match command {
        Commands::Nearby {
            origin,
            radius,
            category,
        } => {
            let aggregator = build_aggregator(&config)?;
            let origin = origin
                .resolve(&aggregator)
                .await?
                .ok_or_else(|| anyhow::anyhow!("nearby needs --lat/--lng or --near"))?;
            places::run_nearby(&aggregator, origin, radius, category.as_deref()).await?;
        }
        Commands::Search {
            query,
            origin,
            radius,
        } => {
            let aggregator = build_aggregator(&config)?;
            let origin = origin.resolve(&aggregator).await?;
            places::run_search(&aggregator, &query, origin, radius).await?;
        }
        Commands::Details { place_id } => {
            places::run_details(&build_aggregator(&config)?, &place_id).await?;
        }
        Commands::Reviews { place_id } => {
            places::run_reviews(&build_aggregator(&config)?, &place_id).await?;
        }
        Commands::Geocode { address, place_id } => {
            let query = match (place_id, address) {
                (Some(id), _) => GeocodeQuery::PlaceId(id),
                (None, Some(address)) => GeocodeQuery::Address(address),
                (None, None) => anyhow::bail!("geocode needs --address or --place-id"),
            };
            places::run_geocode(&build_aggregator(&config)?, query).await?;
        }
        Commands::Autocomplete { input } => {
            places::run_autocomplete(&build_aggregator(&config)?, &input).await?;
        }
        Commands::Rate {
            restaurant_id,
            boom,
            stars,
            review,
            user,
        } => {
            let mut store = state_file.load()?;
            let rating = record_rating(&mut store, &user, &restaurant_id, boom, stars, review)?;
            state_file.save(&store)?;
            print_json(&rating)?;
        }
        Commands::Favorite { restaurant_id } => {
            let mut store = state_file.load()?;
            let now_favorite = store.toggle_favorite(&restaurant_id);
            state_file.save(&store)?;
            println!(
                "{restaurant_id} {}",
                if now_favorite { "added to favorites" } else { "removed from favorites" }
            );
        }
        Commands::Ratings => {
            let store = state_file.load()?;
            print_json(&store.persisted())?;
        }
        Commands::Browse { origin, radius } => {
            let aggregator = build_aggregator(&config)?;
            let mut store = state_file.load()?;
            let origin = match origin.resolve(&aggregator).await? {
                Some(coords) => coords,
                None => store.current_location().ok_or_else(|| {
                    anyhow::anyhow!("no saved location; pass --lat/--lng or --near")
                })?,
            };
            store.set_current_location(origin);
            state_file.save(&store)?;
            tracing::debug!(path = %state_file.path().display(), "location saved");

            let restaurants = aggregator.fetch_nearby(origin, radius, None).await?;
            let started = Instant::now();
            let stdin = std::io::stdin();
            browse::run_browse(
                restaurants.to_vec(),
                stdin.lock(),
                std::io::stdout().lock(),
                move || u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            )?;
        }
    }

    Ok(())
}
