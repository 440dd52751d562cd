//! # Rates Hex
//!
//! Application core and HTTP adapter for the currency-rates service.
//!
//! ## Architecture
//!
//! - `codec` - currency-pair codec for the provider's flat quote format
//! - `cache` - hour-aligned memoization cache with single-flight guards
//! - `resolver` - the rate resolution fallback chain
//! - `buffer` / `conversion` - the conversion engine
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The resolver is generic over `S: RateStore` and `P: LiveRateProvider`,
//! and the conversion engine over `S: RateSource`, so adapters are
//! injected at compile time.

pub mod buffer;
pub mod cache;
pub mod codec;
pub mod conversion;
pub mod inbound;
pub mod resolver;

#[cfg(test)]
mod conversion_tests;

pub use buffer::ConversionBuffers;
pub use conversion::ConversionService;
pub use resolver::{RateResolver, ResolverOptions};
