// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the website.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier assigned by the store to an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub i64);

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Chat,
}

/// Topic a prospective client picks on the contact form.
///
/// Parsing accepts the canonical slug as well as the Dutch option values
/// posted by the site's form. `Display` always yields the canonical slug.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    #[strum(to_string = "network-security", serialize = "netwerk-security", serialize = "netwerk")]
    NetworkSecurity,
    #[strum(
        to_string = "website-design",
        serialize = "website-ontwerp",
        serialize = "website-logo",
        serialize = "website"
    )]
    WebsiteDesign,
    #[strum(to_string = "iot-ai")]
    IotAi,
    #[strum(to_string = "computer-help", serialize = "computerhulp")]
    ComputerHelp,
    #[strum(to_string = "quote-request", serialize = "offerte")]
    QuoteRequest,
    #[strum(to_string = "support", serialize = "ondersteuning")]
    Support,
    #[strum(to_string = "other", serialize = "anders", serialize = "overig")]
    Other,
}

/// Coarse priority hint supplied by the submitter. Advisory only.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[strum(to_string = "low", serialize = "laag")]
    Low,
    #[default]
    #[strum(to_string = "normal", serialize = "normaal")]
    Normal,
    #[strum(to_string = "high", serialize = "hoog")]
    High,
    #[strum(to_string = "urgent", serialize = "spoed")]
    Urgent,
}

/// A validated contact submission that has not been stored yet.
///
/// Only [`crate::validation::ContactForm::validate`] constructs these, so
/// every value reaching the store has passed the required-field and consent
/// checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Subject,
    pub urgency: Urgency,
    pub message: String,
    pub privacy_consent: bool,
    pub newsletter_opt_in: bool,
    pub created_at: DateTime<Utc>,
}

impl NewContact {
    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: SubmissionId) -> ContactSubmission {
        ContactSubmission {
            id,
            name: self.name,
            company: self.company,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            urgency: self.urgency,
            message: self.message,
            privacy_consent: self.privacy_consent,
            newsletter_opt_in: self.newsletter_opt_in,
            created_at: self.created_at,
        }
    }
}

/// A persisted contact-form entry. Write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub id: SubmissionId,
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Subject,
    pub urgency: Urgency,
    pub message: String,
    pub privacy_consent: bool,
    pub newsletter_opt_in: bool,
    pub created_at: DateTime<Utc>,
}
