pub mod address;
pub mod app_config;
pub mod config;
pub mod geo;
pub mod restaurant;
pub mod store;

pub use address::{extract_cuisine, parse_address, AddressParts};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, Coordinates, EARTH_RADIUS_KM};
pub use restaurant::{sort_by_distance, PriceRange, Restaurant};
pub use store::{AppStore, PersistedState, User, UserPreferences, UserRating};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinates out of range: lat={lat}, lng={lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("rating out of range: {0}")]
    InvalidRating(String),

    #[error("persisted state could not be decoded: {0}")]
    PersistedState(#[from] serde_json::Error),
}
