// Feature-schema contracts shared by the trainers and the serving layer
pub mod ml;

// Request/response types and feature encoding
pub mod scoring;

// Domain-specific error types
pub mod errors;
