//! Errors
//!
//! Handlers answer with a plain [`StatusError`] except for stock shortages,
//! whose counts are returned as fields next to the usual error envelope so
//! clients can adjust the quantity without parsing the message.

use std::fmt;

use salvo::{
    http::{StatusCode, StatusError},
    oapi::{Components, EndpointOutRegister, Operation},
    prelude::*,
    writing::Scribe,
};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub(crate) enum ApiError {
    Status(StatusError),
    Shortage(StockShortage),
}

/// A line that asked for more units than the variant holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StockShortage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    pub size: String,
    pub available: u32,
    pub requested: u32,
}

impl StockShortage {
    fn brief(&self) -> String {
        format!(
            "Only {} left in stock for size {}",
            self.available, self.size
        )
    }
}

/// Conflict body: `{"error": {"code", "name", "brief", ...shortage}}`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ShortageBody {
    pub error: ShortageDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ShortageDetails {
    pub code: u16,
    pub name: String,
    pub brief: String,
    #[serde(flatten)]
    pub shortage: StockShortage,
}

impl From<StockShortage> for ShortageBody {
    fn from(shortage: StockShortage) -> Self {
        ShortageBody {
            error: ShortageDetails {
                code: StatusCode::CONFLICT.as_u16(),
                name: "Conflict".to_string(),
                brief: shortage.brief(),
                shortage,
            },
        }
    }
}

impl From<StatusError> for ApiError {
    fn from(error: StatusError) -> Self {
        ApiError::Status(error)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status(error) => fmt::Display::fmt(error, f),
            ApiError::Shortage(shortage) => write!(
                f,
                "only {} in stock for size {}, {} requested",
                shortage.available, shortage.size, shortage.requested
            ),
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        match self {
            ApiError::Status(error) => res.render(error),
            ApiError::Shortage(shortage) => {
                res.status_code(StatusCode::CONFLICT);
                res.render(Json(ShortageBody::from(shortage)));
            }
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        StatusError::register(components, operation);
    }
}
