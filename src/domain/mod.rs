//! Domain types: zip codes and weather results.

pub mod weather;
pub mod zipcode;

pub use weather::WeatherResult;
pub use zipcode::{is_valid, InvalidZipCode, ZipCode, ZipCodeRequest};
