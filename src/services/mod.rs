//! Planning services

pub mod comparison;
pub mod cost;
pub mod dataset;
pub mod engine;
pub mod geo;
pub mod network;
pub mod report;
pub mod tour;
