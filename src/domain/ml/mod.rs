pub mod feature_schema;

pub use feature_schema::FeatureSchema;
