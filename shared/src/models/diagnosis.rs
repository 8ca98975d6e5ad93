//! Diagnosis capture payloads
//!
//! `POST /patients/{id}/save_diagnosis` persists a medical record.
//! When the visit included a laser session, the nested consumable
//! usage drives the per-item stock deduction flow on the client.

use serde::{Deserialize, Serialize};

/// One consumable used during a laser session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableUse {
    pub item_id: String,
    /// Name snapshot for display and failure reporting
    pub name: String,
    /// Positive amount consumed
    pub quantity: f64,
}

/// Laser session details attached to a diagnosis
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LaserSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_count: Option<i32>,
    /// Supplies consumed; each entry triggers a use-stock call
    #[serde(default)]
    pub consumables: Vec<ConsumableUse>,
}

/// Diagnosis/medical record payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisPayload {
    pub complaint: String,
    pub diagnosis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laser_session: Option<LaserSession>,
}
