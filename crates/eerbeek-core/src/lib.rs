// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the ICT Eerbeek website.
//!
//! Provides the contact submission domain types, the parse-then-validate
//! boundary for the contact form, the shared error type and the adapter
//! traits implemented by the storage and chat crates.

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::EerbeekError;
pub use types::{
    AdapterType, ContactSubmission, HealthStatus, NewContact, Subject, SubmissionId, Urgency,
};
pub use validation::{ContactForm, FormField, ValidationError};

pub use traits::{ChatAdapter, PluginAdapter, StorageAdapter};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn eerbeek_error_variants() {
        let _config = EerbeekError::Config("test".into());
        let storage = EerbeekError::Storage {
            source: Box::new(std::io::Error::other("disk full")),
        };
        let _provider = EerbeekError::Provider {
            message: "test".into(),
            source: None,
        };
        let _internal = EerbeekError::Internal("test".into());

        assert!(storage.to_string().contains("disk full"));
        assert!(!storage.is_client_error());
    }

    #[test]
    fn validation_errors_convert_transparently() {
        let err: EerbeekError = ValidationError::ConsentRequired.into();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "privacy consent is required");
    }

    #[test]
    fn adapter_type_round_trips() {
        for variant in [AdapterType::Storage, AdapterType::Chat] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn subject_accepts_dutch_form_values() {
        assert_eq!(Subject::from_str("offerte").unwrap(), Subject::QuoteRequest);
        assert_eq!(Subject::from_str("Computerhulp").unwrap(), Subject::ComputerHelp);
        assert_eq!(Subject::from_str("website-ontwerp").unwrap(), Subject::WebsiteDesign);
        assert_eq!(Subject::from_str("anders").unwrap(), Subject::Other);
        assert!(Subject::from_str("pizza").is_err());
    }

    #[test]
    fn canonical_slugs_are_displayed() {
        assert_eq!(Subject::QuoteRequest.to_string(), "quote-request");
        assert_eq!(Subject::IotAi.to_string(), "iot-ai");
        assert_eq!(Urgency::default().to_string(), "normal");
        assert_eq!(Urgency::Urgent.to_string(), "urgent");
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        assert_ne!(HealthStatus::Degraded("slow".into()), healthy);
        assert_ne!(HealthStatus::Unhealthy("down".into()), healthy);
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
        fn _assert_chat_adapter<T: ChatAdapter>() {}
    }
}
