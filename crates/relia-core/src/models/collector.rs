//! Record collector configuration.
//!
//! The collectors themselves (VAT/company registry clients) live outside
//! this module; here we manage only their settings-panel state. Settings
//! arrive as an immutable [`CollectorSettings`] input which is validated
//! up front into a [`CollectorConfigUpdate`] persist command — a rejected
//! input leaves no half-applied state behind.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ReliaError;

/// The closed set of known record collectors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CollectorKind {
    /// EU VIES VAT number validation.
    Vies,
    /// Danish CVR company registry.
    DkCvr,
    /// Swiss Zefix commercial registry.
    ChZefix,
    /// French enterprise registry (entreprise.data.gouv.fr).
    FrEnterpriseGouv,
    /// UK VAT payer status verification.
    UkVatVerification,
    /// Polish VAT payer status (white list).
    PlVatStatus,
    /// Brazilian ReceitaWS CNPJ lookup.
    BrReceitaCnpj,
}

impl CollectorKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollectorKind::Vies => "Vies",
            CollectorKind::DkCvr => "DkCvr",
            CollectorKind::ChZefix => "ChZefix",
            CollectorKind::FrEnterpriseGouv => "FrEnterpriseGouv",
            CollectorKind::UkVatVerification => "UkVatVerification",
            CollectorKind::PlVatStatus => "PlVatStatus",
            CollectorKind::BrReceitaCnpj => "BrReceitaCnpj",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Vies" => Some(CollectorKind::Vies),
            "DkCvr" => Some(CollectorKind::DkCvr),
            "ChZefix" => Some(CollectorKind::ChZefix),
            "FrEnterpriseGouv" => Some(CollectorKind::FrEnterpriseGouv),
            "UkVatVerification" => Some(CollectorKind::UkVatVerification),
            "PlVatStatus" => Some(CollectorKind::PlVatStatus),
            "BrReceitaCnpj" => Some(CollectorKind::BrReceitaCnpj),
            _ => None,
        }
    }

    /// CRM modules this collector may be attached to.
    pub fn allowed_modules(&self) -> &'static [&'static str] {
        match self {
            CollectorKind::Vies | CollectorKind::PlVatStatus | CollectorKind::UkVatVerification => {
                &["Accounts", "Leads", "Vendors", "Partners", "Competition"]
            }
            CollectorKind::DkCvr | CollectorKind::ChZefix | CollectorKind::FrEnterpriseGouv => {
                &["Accounts", "Leads", "Vendors", "Partners", "Competition", "Contacts"]
            }
            CollectorKind::BrReceitaCnpj => &["Accounts", "Leads", "Vendors"],
        }
    }
}

/// Stored configuration of one collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    pub kind: CollectorKind,
    pub enabled: bool,
    pub api_key: Option<String>,
    pub modules: Vec<String>,
    pub parameters: Map<String, Value>,
}

impl CollectorConfig {
    /// Defaults for a collector that has never been configured.
    pub fn disabled(kind: CollectorKind) -> Self {
        Self {
            kind,
            enabled: false,
            api_key: None,
            modules: Vec::new(),
            parameters: Map::new(),
        }
    }
}

/// Immutable settings-panel input. `None` fields are left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorSettings {
    pub kind: CollectorKind,
    pub enabled: Option<bool>,
    pub api_key: Option<String>,
    pub modules: Option<Vec<String>>,
    pub parameters: Option<Map<String, Value>>,
}

/// Validated persist command produced from [`CollectorSettings`].
#[derive(Debug, Clone)]
pub struct CollectorConfigUpdate {
    pub kind: CollectorKind,
    pub enabled: Option<bool>,
    pub api_key: Option<String>,
    pub modules: Option<Vec<String>>,
    pub parameters: Option<Map<String, Value>>,
}

impl CollectorSettings {
    /// Validate the input, producing a persist command or a typed error.
    pub fn validate(self) -> Result<CollectorConfigUpdate, ReliaError> {
        if self.enabled.is_none()
            && self.api_key.is_none()
            && self.modules.is_none()
            && self.parameters.is_none()
        {
            return Err(ReliaError::Validation {
                message: format!("empty settings update for {}", self.kind.name()),
            });
        }

        if let Some(key) = &self.api_key {
            if key.trim().is_empty() {
                return Err(ReliaError::Validation {
                    message: "api_key must not be blank".into(),
                });
            }
        }

        if let Some(modules) = &self.modules {
            let allowed = self.kind.allowed_modules();
            for module in modules {
                if !allowed.contains(&module.as_str()) {
                    return Err(ReliaError::Validation {
                        message: format!(
                            "module {module} is not supported by {}",
                            self.kind.name()
                        ),
                    });
                }
            }
        }

        Ok(CollectorConfigUpdate {
            kind: self.kind,
            enabled: self.enabled,
            api_key: self.api_key,
            modules: self.modules,
            parameters: self.parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_rejected() {
        let settings = CollectorSettings {
            kind: CollectorKind::Vies,
            enabled: None,
            api_key: None,
            modules: None,
            parameters: None,
        };
        assert!(matches!(
            settings.validate(),
            Err(ReliaError::Validation { .. })
        ));
    }

    #[test]
    fn unknown_module_is_rejected() {
        let settings = CollectorSettings {
            kind: CollectorKind::Vies,
            enabled: Some(true),
            api_key: None,
            modules: Some(vec!["Accounts".into(), "Invoices".into()]),
            parameters: None,
        };
        let err = settings.validate().unwrap_err();
        match err {
            ReliaError::Validation { message } => {
                assert!(message.contains("Invoices"), "got: {message}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let settings = CollectorSettings {
            kind: CollectorKind::BrReceitaCnpj,
            enabled: None,
            api_key: Some("   ".into()),
            modules: None,
            parameters: None,
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn valid_input_becomes_update() {
        let settings = CollectorSettings {
            kind: CollectorKind::DkCvr,
            enabled: Some(true),
            api_key: Some("secret".into()),
            modules: Some(vec!["Accounts".into(), "Contacts".into()]),
            parameters: None,
        };
        let update = settings.validate().unwrap();
        assert_eq!(update.kind, CollectorKind::DkCvr);
        assert_eq!(update.enabled, Some(true));
        assert_eq!(update.modules.as_deref().map(<[String]>::len), Some(2));
    }

    #[test]
    fn kind_name_roundtrip() {
        for kind in [
            CollectorKind::Vies,
            CollectorKind::DkCvr,
            CollectorKind::ChZefix,
            CollectorKind::FrEnterpriseGouv,
            CollectorKind::UkVatVerification,
            CollectorKind::PlVatStatus,
            CollectorKind::BrReceitaCnpj,
        ] {
            assert_eq!(CollectorKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(CollectorKind::from_name("Nope"), None);
    }
}
