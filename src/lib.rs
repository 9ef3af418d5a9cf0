//! minado-classifiers: pre-trained site-presence classifiers for demining
//! decision support.
//!
//! This crate provides the prediction core behind a confirmed-site mapping
//! tool: schema validation of incoming tabular or geospatial records against
//! the feature contract the models were trained on, preprocessing into the
//! exact numeric feature matrix each model expects, and invocation of one or
//! more pre-trained classifiers (MaxEnt/logistic, a bagged ensemble, and a
//! random forest) to produce per-record probabilities.
//!
//! The design favors small, testable modules. Model artifacts are opaque,
//! read-only parameter files loaded lazily through a process-wide registry;
//! training, file export, and map/chart rendering live outside this crate.
pub mod config;
pub mod contract;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod models;
pub mod predictor;
pub mod preprocessing;
pub mod registry;
pub mod report;
