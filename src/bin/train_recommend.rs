use clap::Parser;
use serde::Deserialize;
use smartcore::api::{Transformer, UnsupervisedEstimator};
use smartcore::cluster::kmeans::{KMeans, KMeansParameters};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::preprocessing::numerical::{StandardScaler, StandardScalerParameters};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use estateml::application::ml::smartcore_models::FittedKMeans;
use estateml::domain::ml::FeatureSchema;
use estateml::domain::ml::feature_schema::RECOMMEND_CLUSTERS;
use estateml::infrastructure::model_store::{write_artifact, write_schema};

#[derive(Debug, Deserialize)]
struct PropertyRecord {
    price: f64,
    surface: f64,
    rooms: f64,
    location_score: f64,
    lifestyle_score: f64,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the properties training CSV
    #[arg(long, default_value = "data/training/properties.csv")]
    input: PathBuf,

    /// Path to the output clustering artifact
    #[arg(long, default_value = "data/models/recommend_model.json")]
    output: PathBuf,

    /// Path to the output scaler artifact
    #[arg(long, default_value = "data/models/recommend_scaler.json")]
    scaler_output: PathBuf,

    /// Number of clusters
    #[arg(long, default_value_t = RECOMMEND_CLUSTERS)]
    clusters: usize,

    /// Maximum k-means iterations
    #[arg(long, default_value_t = 100)]
    max_iter: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if !args.input.exists() {
        println!(
            "Training data not found at {:?}. Run the datagen binary or point --input at a properties CSV.",
            args.input
        );
        return Ok(());
    }

    println!("Loading training data from {:?}", args.input);
    let file = File::open(&args.input)?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut x: Vec<Vec<f64>> = Vec::new();
    for result in rdr.deserialize() {
        let record: PropertyRecord = result?;
        // Column order must match FeatureSchema::recommend().
        x.push(vec![
            record.price,
            record.surface,
            record.rooms,
            record.location_score,
            record.lifestyle_score,
        ]);
    }

    let n = x.len();
    if n < args.clusters {
        println!(
            "Not enough rows to form {} clusters ({} found).",
            args.clusters, n
        );
        return Ok(());
    }

    let x_matrix = DenseMatrix::from_2d_vec(&x).map_err(|e| format!("Matrix error: {}", e))?;

    // Center and scale with training-time statistics; the scaler ships with
    // the model so serving applies the exact same transform.
    let scaler = StandardScaler::fit(&x_matrix, StandardScalerParameters::default())
        .map_err(|e| format!("Scaler error: {}", e))?;
    let x_scaled = scaler
        .transform(&x_matrix)
        .map_err(|e| format!("Scaler error: {}", e))?;

    println!(
        "Clustering {} properties into {} groups (max {} iterations)...",
        n, args.clusters, args.max_iter
    );

    let kmeans: FittedKMeans = KMeans::fit(
        &x_scaled,
        KMeansParameters::default()
            .with_k(args.clusters)
            .with_max_iter(args.max_iter),
    )
    .map_err(|e| format!("Clustering error: {}", e))?;

    let labels = kmeans
        .predict(&x_scaled)
        .map_err(|e| format!("Predict error: {}", e))?;
    let mut counts = vec![0usize; args.clusters];
    for label in &labels {
        if let Some(count) = counts.get_mut(*label as usize) {
            *count += 1;
        }
    }
    for (cluster, count) in counts.iter().enumerate() {
        println!(
            "  Cluster {}: {:>5} properties ({:.1}%)",
            cluster,
            count,
            *count as f64 / n as f64 * 100.0
        );
    }

    println!(
        "Saving model to {:?} and scaler to {:?}",
        args.output, args.scaler_output
    );
    write_artifact(&args.output, &kmeans)?;
    write_schema(&args.output, &FeatureSchema::recommend())?;
    write_artifact(&args.scaler_output, &scaler)?;
    write_schema(&args.scaler_output, &FeatureSchema::recommend())?;

    println!("Done. Recommendation model and scaler saved successfully.");
    Ok(())
}
