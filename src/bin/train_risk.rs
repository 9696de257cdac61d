use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use estateml::domain::ml::FeatureSchema;
use estateml::infrastructure::model_store::{write_artifact, write_schema};

#[derive(Debug, Deserialize)]
struct TenantRecord {
    late_payments: f64,
    disputes: f64,
    rental_duration: f64,
    /// 1 = defaulted, 0 = reliable
    #[serde(rename = "default")]
    defaulted: i32,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the tenants training CSV
    #[arg(long, default_value = "data/training/tenants.csv")]
    input: PathBuf,

    /// Path to the output model artifact
    #[arg(long, default_value = "data/models/risk_model.json")]
    output: PathBuf,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: u16,

    /// Maximum depth of trees
    #[arg(long, default_value_t = 6)]
    max_depth: u16,

    /// Held-out fraction for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Seed for the shuffle and the forest
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Precision/recall/F1 for one class against predictions.
fn class_report(predictions: &[i32], actuals: &[i32], class: i32) -> (f64, f64, f64, usize) {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    let mut support = 0usize;

    for (p, t) in predictions.iter().zip(actuals.iter()) {
        if *t == class {
            support += 1;
        }
        match (*p == class, *t == class) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, true) => fn_ += 1,
            (false, false) => {}
        }
    }

    let precision = if tp + fp > 0 {
        tp as f64 / (tp + fp) as f64
    } else {
        0.0
    };
    let recall = if tp + fn_ > 0 {
        tp as f64 / (tp + fn_) as f64
    } else {
        0.0
    };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    (precision, recall, f1, support)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if !args.input.exists() {
        println!(
            "Training data not found at {:?}. Run the datagen binary or point --input at a tenants CSV.",
            args.input
        );
        return Ok(());
    }

    println!("Loading training data from {:?}", args.input);
    let file = File::open(&args.input)?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut x: Vec<Vec<f64>> = Vec::new();
    let mut y: Vec<i32> = Vec::new();

    for result in rdr.deserialize() {
        let record: TenantRecord = result?;
        // Column order must match FeatureSchema::risk().
        x.push(vec![
            record.late_payments,
            record.disputes,
            record.rental_duration,
        ]);
        y.push(record.defaulted);
    }

    let n = x.len();
    if n < 20 {
        println!("Not enough rows to train ({} found).", n);
        return Ok(());
    }

    let defaulters = y.iter().filter(|&&label| label == 1).count();
    println!(
        "Loaded {} tenants ({} defaulted, {:.1}%)",
        n,
        defaulters,
        defaulters as f64 / n as f64 * 100.0
    );

    // Shuffled 80/20 split
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    let x: Vec<Vec<f64>> = indices.iter().map(|&i| x[i].clone()).collect();
    let y: Vec<i32> = indices.iter().map(|&i| y[i]).collect();

    let split = ((n as f64) * (1.0 - args.test_size)).floor() as usize;
    let x_train = x[..split].to_vec();
    let y_train = y[..split].to_vec();
    let x_test = x[split..].to_vec();
    let y_test = y[split..].to_vec();

    println!(
        "Training Random Forest Classifier (Trees: {}, Depth: {}) on {} samples...",
        args.n_trees,
        args.max_depth,
        x_train.len()
    );

    let x_matrix = DenseMatrix::from_2d_vec(&x_train).map_err(|e| format!("Matrix error: {}", e))?;
    let params = RandomForestClassifierParameters::default()
        .with_n_trees(args.n_trees)
        .with_max_depth(args.max_depth)
        .with_seed(args.seed);
    let model = RandomForestClassifier::fit(&x_matrix, &y_train, params)
        .map_err(|e| format!("Training error: {}", e))?;

    if !x_test.is_empty() {
        let x_test_m =
            DenseMatrix::from_2d_vec(&x_test).map_err(|e| format!("Matrix error: {}", e))?;
        let pred: Vec<i32> = model
            .predict(&x_test_m)
            .map_err(|e| format!("Predict error: {}", e))?;

        let correct = pred
            .iter()
            .zip(y_test.iter())
            .filter(|(p, t)| p == t)
            .count();
        println!(
            "Accuracy: {:.4} ({}/{})",
            correct as f64 / pred.len() as f64,
            correct,
            pred.len()
        );

        for class in [0, 1] {
            let (precision, recall, f1, support) = class_report(&pred, &y_test, class);
            println!(
                "  Class {}: precision={:.2} recall={:.2} f1={:.2} support={}",
                class, precision, recall, f1, support
            );
        }
    }

    println!("Saving model to {:?}", args.output);
    write_artifact(&args.output, &model)?;
    write_schema(&args.output, &FeatureSchema::risk())?;

    println!("Done. Risk model saved successfully.");
    Ok(())
}
