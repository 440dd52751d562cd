//! # Rates Types
//!
//! Domain types and port traits for the currency-rates service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Currency, CurrencyPair, MoneyAmount, rate rows)
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Service and repository error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Currency, CurrencyPair, MoneyAmount, NewCurrencyRate};
pub use error::{RepoError, ServiceError};
pub use ports::{LiveRateProvider, RateSource, RateStore};
