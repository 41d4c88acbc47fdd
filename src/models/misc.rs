use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, new)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, new)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "u16")]
pub struct PaginationOffset(u16);
impl PaginationOffset {
    pub fn as_uint(&self) -> u16 {
        self.0
    }
}

impl Default for PaginationOffset {
    fn default() -> Self {
        PaginationOffset(0)
    }
}

impl TryFrom<u16> for PaginationOffset {
    type Error = String;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= 2500 {
            Ok(PaginationOffset(value))
        } else {
            Err("offset must be between 0 and 2500".to_owned())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "u16")]
pub struct PaginationLimit(u16);
impl PaginationLimit {
    pub fn as_uint(&self) -> u16 {
        self.0
    }
}

impl Default for PaginationLimit {
    fn default() -> Self {
        PaginationLimit(super::defaults::DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<u16> for PaginationLimit {
    type Error = String;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= 50 {
            Ok(PaginationLimit(value))
        } else {
            Err("limit must be between 0 and 50".to_owned())
        }
    }
}
