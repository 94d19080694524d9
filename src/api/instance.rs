//
//  homebox-cli
//  api/instance.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Server-level information: status summary and currency list.

use serde::{Deserialize, Serialize};

use super::HomeboxClient;
use crate::Result;

/// Build information embedded in the status summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Server version string.
    #[serde(default)]
    pub version: String,

    /// Git commit the server was built from.
    #[serde(default)]
    pub commit: String,

    /// Build timestamp.
    #[serde(default, rename = "buildTime")]
    pub build_time: String,
}

/// The server status summary. `GET /status`.
///
/// This endpoint does not require authentication, which makes it useful for
/// checking connectivity before logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSummary {
    /// Whether the server reports itself healthy.
    #[serde(default)]
    pub health: bool,

    /// Instance title.
    #[serde(default)]
    pub title: String,

    /// Instance message of the day.
    #[serde(default)]
    pub message: String,

    /// Whether the server runs in demo mode.
    #[serde(default)]
    pub demo: bool,

    /// Whether new-user registration is open.
    #[serde(default, rename = "allowRegistration")]
    pub allow_registration: bool,

    /// Build details.
    #[serde(default)]
    pub build: BuildInfo,
}

/// A currency the server supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code, e.g. `USD`.
    #[serde(default)]
    pub code: String,

    /// English name.
    #[serde(default)]
    pub name: String,

    /// Locale identifier.
    #[serde(default)]
    pub local: String,

    /// Display symbol.
    #[serde(default)]
    pub symbol: String,
}

impl HomeboxClient {
    /// Fetches the server status summary. `GET /status`.
    ///
    /// Sent without credentials so it works before the first login.
    pub async fn status(&self) -> Result<ApiSummary> {
        self.get_public("/status").await
    }

    /// Fetches the list of supported currencies. `GET /currency`.
    pub async fn currencies(&self) -> Result<Vec<Currency>> {
        self.get("/currency").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tolerates_missing_fields() {
        let summary: ApiSummary = serde_json::from_str(r#"{"health":true}"#).unwrap();
        assert!(summary.health);
        assert!(summary.title.is_empty());
        assert!(summary.build.version.is_empty());
    }

    #[test]
    fn currency_decodes() {
        let json = r#"[{"code":"USD","name":"US Dollar","local":"en-US","symbol":"$"}]"#;
        let currencies: Vec<Currency> = serde_json::from_str(json).unwrap();
        assert_eq!(currencies[0].symbol, "$");
    }
}
