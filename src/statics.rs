// Central place for UI strings, endpoints and other non-localized constants.
// Keep these out of gui.rs/session.rs to reduce duplication and make tweaks safer.

// External services
pub const DAWA_BASE_URL: &str = "https://api.dataforsyningen.dk";
pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap-bidragydere";
pub const OSM_ATTRIBUTION_URL: &str = "https://www.openstreetmap.org/copyright";
pub const USER_AGENT: &str = concat!("danmarkskort/", env!("CARGO_PKG_VERSION"));

// Registry/proxy paths and query keys.
pub const PATH_ADDRESS_AUTOCOMPLETE: &str = "/adresser/autocomplete";
pub const PATH_ADDRESS_BY_ID: &str = "/adresser/";
pub const PATH_ELNET_AUTOCOMPLETE: &str = "/elnet/autocomplete";
pub const PATH_ELNET_SUPPLIER: &str = "/elnet/supplier";
pub const QUERY_Q: &str = "q";
pub const QUERY_FUZZY: &str = "fuzzy";
pub const QUERY_EXTERNAL_ID: &str = "externalId";

// Map view.
pub const DENMARK_CENTER: (f64, f64) = (56.2639, 9.5018);
pub const DENMARK_ZOOM: f64 = 7.0;
pub const ADDRESS_ZOOM: f64 = 16.0;
pub const MAX_TILE_ZOOM: u8 = 19;
pub const POPUP_MAX_WIDTH: f32 = 320.0;

// Search behavior.
pub const SEARCH_DEBOUNCE_MS: u64 = 250;
pub const SEARCH_MIN_CHARS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 12;

// Danish UI strings (DA_ prefix, the app has a single locale)
pub const DA_APP_TITLE: &str = "Brand – Danmarkskort";
pub const DA_LABEL_SEARCH: &str = "Adresse:";
pub const DA_HINT_SEARCH: &str = "Søg adresse (fx Rådhuspladsen 1, København)";
pub const DA_PHONE_PREFIX: &str = "Tlf.: ";
pub const DA_GRID_HEADING: &str = "Netselskab";
pub const DA_GRID_PLACEHOLDER: &str = "( slået fra eller ikke fundet )";
pub const DA_ALERT_LOOKUP_FAILED: &str = "Der opstod en fejl under opslag. Se loggen for detaljer.";
pub const DA_BTN_OK: &str = "OK";
pub const DA_BTN_CLOSE: &str = "Luk";
pub const DA_BTN_COPY_HTML: &str = "Kopiér HTML";
pub const DA_STATUS_GRID_DISABLED: &str = "Netselskab-opslag slået fra";
pub const DA_STATUS_SEARCHING: &str = "Søger…";
pub const DA_STATUS_RESOLVING: &str = "Slår adresse op…";
pub const DA_STATUS_OPERATOR: &str = "Slår netselskab op…";

// Scheme used when a supplier website comes without one.
pub const WEBSITE_SCHEME: &str = "https://";
