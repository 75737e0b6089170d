//! Prediction API client.

mod client;

pub use client::PredictClient;
