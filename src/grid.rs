//! Grid-operator ("netselskab") lookup through the optional elnet proxy.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::LookupError;
use crate::statics;

/// Proxy autocomplete hit. Only the external supplier id is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OperatorCandidate {
    #[serde(
        rename = "ExternalSupplierId",
        default,
        deserialize_with = "id_or_none"
    )]
    pub external_supplier_id: Option<String>,
}

/// Supplier detail for a grid operator. Empty strings in the wire data count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GridOperator {
    #[serde(rename = "Name", default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(rename = "PhoneNumber", default, deserialize_with = "text_or_none")]
    pub phone_number: Option<String>,
    #[serde(rename = "Website", default, deserialize_with = "text_or_none")]
    pub website_url: Option<String>,
    #[serde(rename = "LogoUrl", default, deserialize_with = "text_or_none")]
    pub logo_url: Option<String>,
}

/// Grid-operator lookup. A disabled lookup answers every call with an empty list.
pub trait GridOperatorLookup: Send + Sync + 'static {
    fn is_enabled(&self) -> bool;

    fn autocomplete_operator(
        &self,
        full_address_text: &str,
    ) -> Result<Vec<OperatorCandidate>, LookupError>;

    fn supplier_by_external_id(&self, external_id: &str)
    -> Result<Vec<GridOperator>, LookupError>;
}

fn text_or_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

// The proxy has been seen to send the id both as a string and as a number.
fn id_or_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub fn parse_candidates(body: &str) -> Result<Vec<OperatorCandidate>, LookupError> {
    Ok(serde_json::from_str(body)?)
}

pub fn parse_suppliers(body: &str) -> Result<Vec<GridOperator>, LookupError> {
    Ok(serde_json::from_str(body)?)
}

/// HTTP client for the elnet proxy. Built without a base URL it never touches the network.
#[derive(Clone)]
pub struct ProxyClient {
    http: Client,
    base: Option<String>,
}

impl ProxyClient {
    pub fn new(http: Client, base: Option<String>) -> Self {
        Self { http, base }
    }

    fn get_text(
        &self,
        base: &str,
        service: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<String, LookupError> {
        let url = format!("{base}{path}");
        debug!(%url, ?query, "proxy request");
        let response = self
            .http
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::status(service, status));
        }
        Ok(response.text()?)
    }
}

impl GridOperatorLookup for ProxyClient {
    fn is_enabled(&self) -> bool {
        self.base.is_some()
    }

    fn autocomplete_operator(
        &self,
        full_address_text: &str,
    ) -> Result<Vec<OperatorCandidate>, LookupError> {
        let Some(base) = self.base.as_deref() else {
            return Ok(Vec::new());
        };
        let body = self.get_text(
            base,
            "elnet autocomplete",
            statics::PATH_ELNET_AUTOCOMPLETE,
            &[(statics::QUERY_Q, full_address_text)],
        )?;
        parse_candidates(&body)
    }

    fn supplier_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Vec<GridOperator>, LookupError> {
        let Some(base) = self.base.as_deref() else {
            return Ok(Vec::new());
        };
        let body = self.get_text(
            base,
            "elnet supplier",
            statics::PATH_ELNET_SUPPLIER,
            &[(statics::QUERY_EXTERNAL_ID, external_id)],
        )?;
        parse_suppliers(&body)
    }
}
