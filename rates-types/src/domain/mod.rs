//! Pure domain types.

mod currency;
mod money;
mod rate;

pub use currency::{Currency, CurrencyPair};
pub use money::MoneyAmount;
pub use rate::NewCurrencyRate;
