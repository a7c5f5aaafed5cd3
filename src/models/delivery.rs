use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::DeliveryStatus;

/// A request for a community volunteer to bring a medication from a pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    pub id: String,
    pub medication_name: String,
    pub pharmacy: String,
    pub request_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    pub status: DeliveryStatus,
    /// Weak reference to a volunteer user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volunteer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Delivery form values as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequestInput {
    pub medication_name: String,
    pub pharmacy: String,
    #[serde(default)]
    pub notes: String,
}
