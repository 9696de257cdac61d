//! Seeded synthetic dataset generator for local development.
//!
//! Produces the three CSVs the training binaries consume (rentals, tenants,
//! properties) so the whole pipeline runs without access to production data.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rows to generate per dataset
    #[arg(short, long, default_value_t = 600)]
    rows: usize,

    /// Output directory for the CSVs
    #[arg(long, default_value = "data/training")]
    out_dir: PathBuf,

    /// Generator seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct RentalRow {
    surface: f64,
    rooms: u32,
    location_score: f64,
    distance_center: f64,
    season_index: f64,
    price: f64,
}

#[derive(Serialize)]
struct TenantRow {
    late_payments: u32,
    disputes: u32,
    rental_duration: u32,
    #[serde(rename = "default")]
    defaulted: u32,
}

#[derive(Serialize)]
struct PropertyRow {
    price: f64,
    surface: f64,
    rooms: u32,
    location_score: f64,
    lifestyle_score: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn write_rentals(path: &Path, rows: usize, rng: &mut StdRng) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for _ in 0..rows {
        let surface = rng.random_range(22.0..140.0);
        let rooms = (surface / 28.0).floor() as u32 + rng.random_range(0..2);
        let location_score = rng.random_range(1.0..10.0);
        let distance_center = rng.random_range(0.2..24.0);
        let season_index = rng.random_range(0.8..1.2);

        let noise = rng.random_range(-90.0..90.0);
        let price = 9.2 * surface + 38.0 * rooms as f64 + 52.0 * location_score
            - 17.0 * distance_center
            + 310.0 * season_index
            + noise;

        wtr.serialize(RentalRow {
            surface: round2(surface),
            rooms,
            location_score: round2(location_score),
            distance_center: round2(distance_center),
            season_index: round2(season_index),
            price: round2(price.max(150.0)),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_tenants(path: &Path, rows: usize, rng: &mut StdRng) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for _ in 0..rows {
        let late_payments = rng.random_range(0..8u32);
        let disputes = rng.random_range(0..4u32);
        let rental_duration = rng.random_range(3..96u32);

        let logit = 0.9 * late_payments as f64 + 1.4 * disputes as f64
            - 0.04 * rental_duration as f64
            - 1.5;
        let p_default = (1.0 / (1.0 + (-logit).exp())).clamp(0.02, 0.98);
        let defaulted = u32::from(rng.random_bool(p_default));

        wtr.serialize(TenantRow {
            late_payments,
            disputes,
            rental_duration,
            defaulted,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

// Five property archetypes, from compact city studios to family houses, so
// the clustering step has structure to recover.
const ARCHETYPES: [(f64, f64, u32, f64, f64); 5] = [
    (95_000.0, 32.0, 1, 7.5, 8.0),
    (160_000.0, 55.0, 2, 6.0, 6.0),
    (240_000.0, 85.0, 3, 5.5, 5.0),
    (340_000.0, 120.0, 4, 4.5, 4.0),
    (520_000.0, 95.0, 3, 9.0, 9.0),
];

fn write_properties(path: &Path, rows: usize, rng: &mut StdRng) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for _ in 0..rows {
        let (price, surface, rooms, location, lifestyle) =
            ARCHETYPES[rng.random_range(0..ARCHETYPES.len())];

        wtr.serialize(PropertyRow {
            price: round2(price * rng.random_range(0.85..1.15)),
            surface: round2(surface * rng.random_range(0.85..1.15)),
            rooms: rooms + rng.random_range(0..2),
            location_score: round2((location + rng.random_range(-1.0..1.0)).clamp(1.0, 10.0)),
            lifestyle_score: round2((lifestyle + rng.random_range(-1.0..1.0)).clamp(0.0, 10.0)),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.out_dir)?;

    let mut rng = StdRng::seed_from_u64(cli.seed);

    let rentals = cli.out_dir.join("rentals.csv");
    write_rentals(&rentals, cli.rows, &mut rng)?;
    info!("Wrote {} rentals to {:?}", cli.rows, rentals);

    let tenants = cli.out_dir.join("tenants.csv");
    write_tenants(&tenants, cli.rows, &mut rng)?;
    info!("Wrote {} tenants to {:?}", cli.rows, tenants);

    let properties = cli.out_dir.join("properties.csv");
    write_properties(&properties, cli.rows, &mut rng)?;
    info!("Wrote {} properties to {:?}", cli.rows, properties);

    info!("All datasets generated.");
    Ok(())
}
