//! Address registry (DAWA) client: text autocomplete and lookup by id.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::LookupError;
use crate::statics;

/// One autocomplete hit. Only lives while the dropdown is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSuggestion {
    pub id: String,
    pub display_text: String,
}

impl AddressSuggestion {
    pub fn new(id: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_text: display_text.into(),
        }
    }
}

/// WGS84 position in (latitude, longitude) order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The registry reports points as `[x, y]` = `[longitude, latitude]`.
    pub const fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    pub fn position(self) -> walkers::Position {
        walkers::lat_lon(self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    pub id: String,
    pub coordinates: Coordinates,
}

/// An address registry.
pub trait AddressLookup: Send + Sync + 'static {
    /// Fuzzy text autocomplete. Results come back in registry relevance order.
    fn autocomplete(&self, query: &str) -> Result<Vec<AddressSuggestion>, LookupError>;

    /// Full record for an address id, reduced to what the map needs.
    fn get_by_id(&self, id: &str) -> Result<ResolvedAddress, LookupError>;
}

#[derive(Deserialize)]
struct AutocompleteHit {
    tekst: String,
    adresse: HitAddress,
}

#[derive(Deserialize)]
struct HitAddress {
    id: String,
}

#[derive(Deserialize)]
struct AddressRecord {
    adgangsadresse: AccessAddress,
}

#[derive(Deserialize)]
struct AccessAddress {
    adgangspunkt: AccessPoint,
}

#[derive(Deserialize)]
struct AccessPoint {
    #[serde(default)]
    koordinater: Vec<f64>,
}

pub fn parse_autocomplete(body: &str) -> Result<Vec<AddressSuggestion>, LookupError> {
    let hits: Vec<AutocompleteHit> = serde_json::from_str(body)?;
    Ok(hits
        .into_iter()
        .map(|h| AddressSuggestion {
            id: h.adresse.id,
            display_text: h.tekst,
        })
        .collect())
}

pub fn parse_address(id: &str, body: &str) -> Result<ResolvedAddress, LookupError> {
    let record: AddressRecord = serde_json::from_str(body)?;
    let &[lon, lat, ..] = record.adgangsadresse.adgangspunkt.koordinater.as_slice() else {
        return Err(LookupError::MissingCoordinates { id: id.to_string() });
    };
    Ok(ResolvedAddress {
        id: id.to_string(),
        coordinates: Coordinates::from_lon_lat(lon, lat),
    })
}

/// HTTP client for Dataforsyningen's `/adresser` endpoints.
#[derive(Clone)]
pub struct DawaClient {
    http: Client,
    base: String,
}

impl DawaClient {
    pub fn new(http: Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    fn get_text(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, LookupError> {
        debug!(%url, ?query, "registry request");
        let response = self
            .http
            .get(url)
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

impl AddressLookup for DawaClient {
    fn autocomplete(&self, query: &str) -> Result<Vec<AddressSuggestion>, LookupError> {
        let url = format!("{}{}", self.base, statics::PATH_ADDRESS_AUTOCOMPLETE);
        let body = self.get_text(
            "address autocomplete",
            &url,
            &[(statics::QUERY_Q, query), (statics::QUERY_FUZZY, "")],
        )?;
        parse_autocomplete(&body)
    }

    fn get_by_id(&self, id: &str) -> Result<ResolvedAddress, LookupError> {
        let url = format!("{}{}{}", self.base, statics::PATH_ADDRESS_BY_ID, id);
        let body = self.get_text("address lookup", &url, &[])?;
        parse_address(id, &body)
    }
}
