// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact-form parsing and validation.
//!
//! The request body is first decoded into [`ContactForm`] (a
//! [`ValidationError::MalformedInput`] on failure), then checked field by
//! field. Checks short-circuit in a fixed order: required fields, privacy
//! consent, enumerated values. Only a fully accepted form becomes a
//! [`NewContact`], stamped with the server's clock.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::types::{NewContact, Subject, Urgency};

/// Contact-form fields, named by their JSON key on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum FormField {
    Naam,
    Bedrijf,
    Email,
    Telefoon,
    Onderwerp,
    Urgentie,
    Bericht,
    Privacy,
    Nieuwsbrief,
}

impl FormField {
    /// The JSON key for this field.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// Reasons a contact submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The body could not be decoded into the expected field shape.
    #[error("malformed request body: {0}")]
    MalformedInput(String),

    /// A required field was absent or blank.
    #[error("missing required field `{0}`")]
    MissingField(FormField),

    /// The privacy policy was not affirmatively accepted.
    #[error("privacy consent is required")]
    ConsentRequired,

    /// An enumerated field carried a value outside its allowed set.
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidChoice { field: FormField, value: String },
}

impl ValidationError {
    /// Machine-readable kind, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MalformedInput(_) => "malformed_input",
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::ConsentRequired => "consent_required",
            ValidationError::InvalidChoice { .. } => "invalid_choice",
        }
    }

    /// The offending field, when one can be named.
    pub fn field(&self) -> Option<FormField> {
        match self {
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::ConsentRequired => Some(FormField::Privacy),
            ValidationError::InvalidChoice { field, .. } => Some(*field),
            ValidationError::MalformedInput(_) => None,
        }
    }
}

/// Raw contact form as posted by the site.
///
/// Every key is optional at this level so that an absent, `null` or empty
/// key is reported as [`ValidationError::MissingField`]. Unknown keys
/// (a client-supplied `created_at`, for instance) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "null_as_default")]
    pub naam: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bedrijf: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub telefoon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub onderwerp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub urgentie: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bericht: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub privacy: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nieuwsbrief: bool,
}

impl ContactForm {
    /// Decode a JSON request body. Anything but a JSON object is malformed.
    pub fn parse(body: &[u8]) -> Result<Self, ValidationError> {
        let value: serde_json::Value = serde_json::from_slice(body).map_err(malformed)?;
        if !value.is_object() {
            return Err(ValidationError::MalformedInput(
                "expected a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(malformed)
    }

    /// Validate the form, stamping acceptance with the current time.
    pub fn validate(self) -> Result<NewContact, ValidationError> {
        self.validate_at(Utc::now())
    }

    /// Validate the form with an explicit acceptance time.
    pub fn validate_at(self, now: DateTime<Utc>) -> Result<NewContact, ValidationError> {
        let (subject, urgency) = self.check()?;
        Ok(self.accept(subject, urgency, now))
    }

    fn check(&self) -> Result<(Subject, Urgency), ValidationError> {
        for (field, value) in [
            (FormField::Naam, &self.naam),
            (FormField::Email, &self.email),
            (FormField::Onderwerp, &self.onderwerp),
            (FormField::Bericht, &self.bericht),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        if !self.privacy {
            return Err(ValidationError::ConsentRequired);
        }

        let subject = parse_choice::<Subject>(FormField::Onderwerp, &self.onderwerp)?;
        let urgency = if self.urgentie.trim().is_empty() {
            Urgency::default()
        } else {
            parse_choice::<Urgency>(FormField::Urgentie, &self.urgentie)?
        };

        Ok((subject, urgency))
    }

    fn accept(self, subject: Subject, urgency: Urgency, now: DateTime<Utc>) -> NewContact {
        NewContact {
            name: self.naam.trim().to_string(),
            company: non_blank(self.bedrijf),
            email: self.email.trim().to_string(),
            phone: non_blank(self.telefoon),
            subject,
            urgency,
            message: self.bericht.trim().to_string(),
            privacy_consent: self.privacy,
            newsletter_opt_in: self.nieuwsbrief,
            created_at: now,
        }
    }
}

fn malformed(e: serde_json::Error) -> ValidationError {
    ValidationError::MalformedInput(e.to_string())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn parse_choice<T: FromStr>(field: FormField, raw: &str) -> Result<T, ValidationError> {
    T::from_str(raw.trim()).map_err(|_| ValidationError::InvalidChoice {
        field,
        value: raw.trim().to_string(),
    })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
