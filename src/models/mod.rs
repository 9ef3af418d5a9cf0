pub mod classifier_trait;
pub mod ensemble;
pub mod factory;
pub mod logistic;
pub mod random_forest;

pub use classifier_trait::SiteClassifier;
pub use factory::{build_model, ArtifactSpec};
