#![allow(dead_code)]

use estateml::application::ml::smartcore_models::{
    FittedClassifier, FittedKMeans, FittedRegressor, FittedScaler, ForestClassifier,
    ForestRegressor, ScaledKMeans,
};
use estateml::application::scoring::ScoringService;
use smartcore::api::{Transformer, UnsupervisedEstimator};
use smartcore::cluster::kmeans::{KMeans, KMeansParameters};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::preprocessing::numerical::{StandardScaler, StandardScalerParameters};

/// Rentals with a simple linear price structure, enough rows for a forest to
/// pick up the trend.
pub fn price_training_data() -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for i in 0..40 {
        let surface = 30.0 + 2.5 * i as f64;
        let rooms = (surface / 30.0).floor();
        let location_score = 3.0 + (i % 7) as f64;
        let distance_center = 1.0 + (i % 10) as f64;
        let season_index = if i % 2 == 0 { 0.9 } else { 1.1 };

        let price = 9.0 * surface + 40.0 * rooms + 50.0 * location_score
            - 15.0 * distance_center
            + 300.0 * season_index;

        x.push(vec![surface, rooms, location_score, distance_center, season_index]);
        y.push(price);
    }
    (x, y)
}

pub fn fit_price_model() -> FittedRegressor {
    let (x, y) = price_training_data();
    let x_matrix = DenseMatrix::from_2d_vec(&x).unwrap();
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(30)
        .with_max_depth(6)
        .with_seed(7);
    RandomForestRegressor::fit(&x_matrix, &y, params).unwrap()
}

/// Tenants with clearly separable risk: clean payment history and long
/// tenure vs. repeated late payments and disputes.
pub fn risk_training_data() -> (Vec<Vec<f64>>, Vec<i32>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for i in 0..12 {
        x.push(vec![(i % 2) as f64, 0.0, 24.0 + 6.0 * i as f64]);
        y.push(0);
    }
    for i in 0..12 {
        x.push(vec![4.0 + (i % 4) as f64, 2.0 + (i % 2) as f64, 3.0 + i as f64]);
        y.push(1);
    }
    (x, y)
}

pub fn fit_risk_model() -> FittedClassifier {
    let (x, y) = risk_training_data();
    fit_classifier(&x, &y)
}

/// A classifier that only ever saw one class; its probability output has a
/// single column.
pub fn fit_single_class_risk_model() -> FittedClassifier {
    let (x, _) = risk_training_data();
    let y = vec![0; x.len()];
    fit_classifier(&x, &y)
}

fn fit_classifier(x: &[Vec<f64>], y: &[i32]) -> FittedClassifier {
    let x_matrix = DenseMatrix::from_2d_vec(&x.to_vec()).unwrap();
    let params = RandomForestClassifierParameters::default()
        .with_n_trees(30)
        .with_max_depth(4)
        .with_seed(7);
    RandomForestClassifier::fit(&x_matrix, &y.to_vec(), params).unwrap()
}

/// Properties drawn from five distinct archetypes, matching the configured
/// cluster count.
pub fn property_training_data() -> Vec<Vec<f64>> {
    let centers = [
        (95_000.0, 32.0, 1.0, 7.5, 8.0),
        (160_000.0, 55.0, 2.0, 6.0, 6.0),
        (240_000.0, 85.0, 3.0, 5.5, 5.0),
        (340_000.0, 120.0, 4.0, 4.5, 4.0),
        (520_000.0, 95.0, 3.0, 9.0, 9.0),
    ];

    let mut x = Vec::new();
    for (price, surface, rooms, location, lifestyle) in centers {
        for i in 0..6 {
            let wiggle = 0.95 + 0.02 * i as f64;
            x.push(vec![
                price * wiggle,
                surface * wiggle,
                rooms,
                location,
                lifestyle,
            ]);
        }
    }
    x
}

pub fn fit_recommend_pair() -> (FittedScaler, FittedKMeans) {
    let x = property_training_data();
    let x_matrix = DenseMatrix::from_2d_vec(&x).unwrap();

    let scaler = StandardScaler::fit(&x_matrix, StandardScalerParameters::default()).unwrap();
    let x_scaled = scaler.transform(&x_matrix).unwrap();

    let kmeans: FittedKMeans = KMeans::fit(
        &x_scaled,
        KMeansParameters::default().with_k(5).with_max_iter(100),
    )
    .unwrap();

    (scaler, kmeans)
}

pub fn service() -> ScoringService {
    let (scaler, kmeans) = fit_recommend_pair();
    ScoringService::new(
        Box::new(ForestRegressor::new(fit_price_model())),
        Box::new(ForestClassifier::new(fit_risk_model())),
        Box::new(ScaledKMeans::new(scaler, kmeans)),
    )
}

pub fn single_class_service() -> ScoringService {
    let (scaler, kmeans) = fit_recommend_pair();
    ScoringService::new(
        Box::new(ForestRegressor::new(fit_price_model())),
        Box::new(ForestClassifier::new(fit_single_class_risk_model())),
        Box::new(ScaledKMeans::new(scaler, kmeans)),
    )
}
