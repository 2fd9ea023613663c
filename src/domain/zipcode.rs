//! Zip code (CEP) validation.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Number of digits in a zip code.
pub const ZIPCODE_LEN: usize = 8;

/// Returns true iff `code` is exactly eight ASCII digits.
pub fn is_valid(code: &str) -> bool {
    code.len() == ZIPCODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// The input did not look like a zip code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid zipcode")]
pub struct InvalidZipCode;

/// A syntactically valid zip code. Can only be built through [`ZipCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn parse(code: &str) -> Result<Self, InvalidZipCode> {
        if is_valid(code) {
            Ok(Self(code.to_owned()))
        } else {
            Err(InvalidZipCode)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body accepted by `POST /`. A missing `cep` decodes as empty and then
/// fails validation, rather than failing to decode.
#[derive(Debug, Deserialize)]
pub struct ZipCodeRequest {
    #[serde(rename = "cep", default)]
    pub zipcode: String,
}
