//! HTTPS settings.
//!
//! The certificate is carried through extraction untouched. Whether it
//! describes files to load or a self-signed certificate to generate is only
//! decided when a caller asks for [`HttpsSettings::certificate_options`].

use serde::Serialize;

use crate::config::reader::{ConfigError, ConfigReader, Result};
use crate::config::tree::ConfigTree;
use crate::config::value::ConfigValue;

/// HTTPS settings from the `https` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HttpsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<ConfigValue>,
}

/// PEM key and certificate, inline or as file paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateFileOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
}

/// Parameters for generating a self-signed certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CertificateSigningOptions {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_number"
    )]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_number"
    )]
    pub days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<CertificateAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
}

/// Typed view of the certificate value.
#[derive(Debug, Clone, PartialEq)]
pub enum CertificateOptions {
    Signing(CertificateSigningOptions),
    File(CertificateFileOptions),
}

/// Read HTTPS settings from the `https` section of a backend config.
///
/// Returns `Ok(None)` without an `https` section. A section without a
/// `certificate` is an error.
pub fn read_https_settings<R: ConfigReader>(config: &R) -> Result<Option<HttpsSettings>> {
    let Some(cc) = config.get_optional_config("https")? else {
        return Ok(None);
    };

    let certificate = cc.get("certificate")?.clone();
    Ok(Some(HttpsSettings {
        certificate: Some(certificate),
    }))
}

impl HttpsSettings {
    /// Interpret the certificate. A section with `key` or `cert` is file
    /// options, any other section is signing options.
    pub fn certificate_options(&self) -> Result<Option<CertificateOptions>> {
        let Some(certificate) = &self.certificate else {
            return Ok(None);
        };
        let ConfigValue::Section(data) = certificate else {
            return Err(ConfigError::type_mismatch(
                "https.certificate".into(),
                "section",
                certificate,
            ));
        };

        let cc = ConfigTree::with_prefix(data.clone(), "https.certificate");
        if data.contains_key("key") || data.contains_key("cert") {
            return Ok(Some(CertificateOptions::File(CertificateFileOptions {
                key: cc.get_optional_string("key")?,
                cert: cc.get_optional_string("cert")?,
            })));
        }

        let attributes = cc
            .get_optional_config("attributes")?
            .map(|attrs| {
                Ok::<_, ConfigError>(CertificateAttributes {
                    common_name: attrs.get_optional_string("commonName")?,
                })
            })
            .transpose()?;

        Ok(Some(CertificateOptions::Signing(CertificateSigningOptions {
            size: cc.get_optional_number("size")?,
            algorithm: cc.get_optional_string("algorithm")?,
            days: cc.get_optional_number("days")?,
            attributes,
        })))
    }
}
