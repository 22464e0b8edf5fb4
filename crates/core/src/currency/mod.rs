//! Two-currency handling: pair convention, descriptors, and rounding.

pub mod conversion;
pub mod error;
pub mod exchange;
pub mod pair;
pub mod service;

#[cfg(test)]
mod props;

pub use conversion::{DisplayConverter, INTERNAL_SCALE, to_display};
pub use error::CurrencyError;
pub use exchange::ExchangeRate;
pub use pair::{ConversionDescriptor, CurrencyPair};
pub use service::CurrencyService;
