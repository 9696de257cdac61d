use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use estateml::domain::ml::FeatureSchema;
use estateml::infrastructure::model_store::{write_artifact, write_schema};

#[derive(Debug, Deserialize)]
struct RentalRecord {
    surface: f64,
    rooms: f64,
    location_score: f64,
    distance_center: f64,
    season_index: f64,
    price: f64,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the rentals training CSV
    #[arg(long, default_value = "data/training/rentals.csv")]
    input: PathBuf,

    /// Path to the output model artifact
    #[arg(long, default_value = "data/models/price_model.json")]
    output: PathBuf,

    /// Candidate tree counts for the grid search (comma separated)
    #[arg(long, default_value = "100,150", value_delimiter = ',')]
    n_trees: Vec<usize>,

    /// Candidate maximum tree depths for the grid search (comma separated)
    #[arg(long, default_value = "3,4", value_delimiter = ',')]
    max_depth: Vec<u16>,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 2)]
    min_split: usize,

    /// Held-out fraction for the final evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Cross-validation folds used to score each grid point
    #[arg(long, default_value_t = 3)]
    cv_folds: usize,

    /// Seed for the shuffle and the forests
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn mae(predictions: &[f64], actuals: &[f64]) -> f64 {
    predictions
        .iter()
        .zip(actuals.iter())
        .map(|(p, t)| (p - t).abs())
        .sum::<f64>()
        / predictions.len() as f64
}

fn r2(predictions: &[f64], actuals: &[f64]) -> f64 {
    let n = actuals.len() as f64;
    let mean = actuals.iter().sum::<f64>() / n;
    let ss_res: f64 = predictions
        .iter()
        .zip(actuals.iter())
        .map(|(p, t)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = actuals.iter().map(|t| (t - mean).powi(2)).sum();
    if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 }
}

fn fit_forest(
    x: &[Vec<f64>],
    y: &[f64],
    n_trees: usize,
    max_depth: u16,
    min_split: usize,
    seed: u64,
) -> Result<RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>, Box<dyn Error>> {
    let x_matrix = DenseMatrix::from_2d_vec(&x.to_vec()).map_err(|e| format!("Matrix error: {}", e))?;
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(n_trees)
        .with_max_depth(max_depth)
        .with_min_samples_split(min_split)
        .with_seed(seed);
    RandomForestRegressor::fit(&x_matrix, &y.to_vec(), params)
        .map_err(|e| format!("Training error: {}", e).into())
}

fn predict(
    model: &RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
    x: &[Vec<f64>],
) -> Result<Vec<f64>, Box<dyn Error>> {
    let x_matrix = DenseMatrix::from_2d_vec(&x.to_vec()).map_err(|e| format!("Matrix error: {}", e))?;
    model
        .predict(&x_matrix)
        .map_err(|e| format!("Predict error: {}", e).into())
}

/// Mean cross-validated MAE for one grid point, folds taken as contiguous
/// chunks of the (already shuffled) training rows.
fn cv_mae(
    x: &[Vec<f64>],
    y: &[f64],
    folds: usize,
    n_trees: usize,
    max_depth: u16,
    min_split: usize,
    seed: u64,
) -> Result<f64, Box<dyn Error>> {
    let n = x.len();
    let fold_size = n / folds;
    let mut scores = Vec::with_capacity(folds);

    for fold in 0..folds {
        let lo = fold * fold_size;
        let hi = if fold == folds - 1 { n } else { lo + fold_size };

        let mut x_train: Vec<Vec<f64>> = Vec::with_capacity(n - (hi - lo));
        let mut y_train: Vec<f64> = Vec::with_capacity(n - (hi - lo));
        x_train.extend_from_slice(&x[..lo]);
        x_train.extend_from_slice(&x[hi..]);
        y_train.extend_from_slice(&y[..lo]);
        y_train.extend_from_slice(&y[hi..]);

        let model = fit_forest(&x_train, &y_train, n_trees, max_depth, min_split, seed)?;
        let pred = predict(&model, &x[lo..hi])?;
        scores.push(mae(&pred, &y[lo..hi]));
    }

    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if !args.input.exists() {
        println!(
            "Training data not found at {:?}. Run the datagen binary or point --input at a rentals CSV.",
            args.input
        );
        return Ok(());
    }

    println!("Loading training data from {:?}", args.input);
    let file = File::open(&args.input)?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut x: Vec<Vec<f64>> = Vec::new();
    let mut y: Vec<f64> = Vec::new();

    for result in rdr.deserialize() {
        let record: RentalRecord = result?;
        // Column order must match FeatureSchema::price().
        x.push(vec![
            record.surface,
            record.rooms,
            record.location_score,
            record.distance_center,
            record.season_index,
        ]);
        y.push(record.price);
    }

    let n = x.len();
    if n < 20 {
        println!("Not enough rows to train ({} found).", n);
        return Ok(());
    }

    // Shuffled 80/20 split
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    let x: Vec<Vec<f64>> = indices.iter().map(|&i| x[i].clone()).collect();
    let y: Vec<f64> = indices.iter().map(|&i| y[i]).collect();

    let split = ((n as f64) * (1.0 - args.test_size)).floor() as usize;
    let (x_train, x_test) = x.split_at(split);
    let (y_train, y_test) = y.split_at(split);

    println!(
        "Grid search over {} tree counts x {} depths ({}-fold CV, {} training rows)...",
        args.n_trees.len(),
        args.max_depth.len(),
        args.cv_folds,
        x_train.len()
    );

    let mut best: Option<(usize, u16, f64)> = None;
    for &n_trees in &args.n_trees {
        for &max_depth in &args.max_depth {
            let score = cv_mae(
                x_train,
                y_train,
                args.cv_folds,
                n_trees,
                max_depth,
                args.min_split,
                args.seed,
            )?;
            println!(
                "  n_trees={:<4} max_depth={:<2} CV MAE={:.4}",
                n_trees, max_depth, score
            );
            if best.is_none_or(|(_, _, best_score)| score < best_score) {
                best = Some((n_trees, max_depth, score));
            }
        }
    }

    let (n_trees, max_depth, cv_score) = best.ok_or("Empty hyperparameter grid")?;
    println!(
        "Best parameters: n_trees={}, max_depth={} (CV MAE={:.4})",
        n_trees, max_depth, cv_score
    );

    let model = fit_forest(x_train, y_train, n_trees, max_depth, args.min_split, args.seed)?;

    let pred = predict(&model, x_test)?;
    println!("MAE: {:.2}", mae(&pred, y_test));
    println!("R² score: {:.2}", r2(&pred, y_test));

    println!("Saving model to {:?}", args.output);
    write_artifact(&args.output, &model)?;
    write_schema(&args.output, &FeatureSchema::price())?;

    println!("Done. Price model saved successfully.");
    Ok(())
}
