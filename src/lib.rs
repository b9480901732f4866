//! Acordos - installment parser for Brazilian settlement agreements
//!
//! This library extracts structured installments from free-text Portuguese
//! payment-plan descriptions, normalizes Brazilian currency strings, and
//! reconciles extracted totals against agreement figures.

pub mod config;
pub mod currency;
pub mod error;
pub mod installments;
pub mod reconcile;
pub mod utils;
