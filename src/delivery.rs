//! Delivery status engine: status → label, color tone, advisory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DeliveryRequest, DeliveryStatus};

const IN_TRANSIT_ADVISORY: &str =
    "Your medication is on the way! The volunteer will contact you when they arrive.";

/// Badge color for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Yellow,
    Blue,
    Purple,
    Green,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub status: DeliveryStatus,
    pub label: &'static str,
    pub tone: StatusTone,
    pub advisory: Option<&'static str>,
}

/// A delivery request card for the tracker view.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryCard {
    pub id: String,
    pub medication_name: String,
    pub pharmacy: String,
    pub request_date: NaiveDate,
    pub delivery_date: Option<NaiveDate>,
    pub display: StatusDisplay,
    pub volunteer_label: Option<String>,
    pub notes: Option<String>,
}

pub fn describe_status(status: DeliveryStatus) -> StatusDisplay {
    let (label, tone) = match status {
        DeliveryStatus::Pending => ("Waiting for volunteer", StatusTone::Yellow),
        DeliveryStatus::Assigned => ("Volunteer assigned", StatusTone::Blue),
        DeliveryStatus::InTransit => ("On the way", StatusTone::Purple),
        DeliveryStatus::Delivered => ("Delivered", StatusTone::Green),
    };
    let advisory = (status == DeliveryStatus::InTransit).then_some(IN_TRANSIT_ADVISORY);
    StatusDisplay {
        status,
        label,
        tone,
        advisory,
    }
}

pub fn delivery_card(request: &DeliveryRequest) -> DeliveryCard {
    DeliveryCard {
        id: request.id.clone(),
        medication_name: request.medication_name.clone(),
        pharmacy: request.pharmacy.clone(),
        request_date: request.request_date,
        delivery_date: request.delivery_date,
        display: describe_status(request.status),
        volunteer_label: request
            .volunteer_id
            .as_ref()
            .map(|id| format!("Community Helper #{id}")),
        notes: request.notes.clone(),
    }
}
