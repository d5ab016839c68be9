// Reporter and location defaults

pub const ANONYMOUS_REPORTER: &str = "Anonymous";
pub const TOP_LOCATIONS_LIMIT: usize = 5;

/// ATMs offered by the reporting form. The store accepts any non-empty location.
pub const DEFAULT_KNOWN_LOCATIONS: [&str; 4] = [
    "ATM Banco Azteca - Main Plaza",
    "ATM BBVA - Las Americas Mall",
    "ATM Santander - Central Metro Station",
    "ATM Banorte - North Supermarket",
];

pub fn default_known_locations() -> Vec<String> {
    DEFAULT_KNOWN_LOCATIONS
        .iter()
        .map(|location| location.to_string())
        .collect()
}
