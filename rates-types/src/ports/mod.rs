//! Port traits implemented by the adapters.

mod provider;
mod source;
mod store;

pub use provider::LiveRateProvider;
pub use source::RateSource;
pub use store::RateStore;
