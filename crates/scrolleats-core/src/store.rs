//! Application state owned by the composition root.
//!
//! [`AppStore`] holds everything the UI mutates. Only [`PersistedState`] is
//! written to durable storage; transient fields (the restaurant list, loading
//! and error flags, the cursor) are rebuilt on every launch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinates;
use crate::restaurant::Restaurant;
use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub cuisines: Vec<String>,
    pub price_ranges: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub max_distance_km: f64,
    pub favorite_neighborhoods: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            cuisines: Vec::new(),
            price_ranges: Vec::new(),
            dietary_restrictions: Vec::new(),
            max_distance_km: 10.0,
            favorite_neighborhoods: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRating {
    pub id: Uuid,
    pub user_id: String,
    pub restaurant_id: String,
    /// Enthusiasm on a 0–5 scale.
    pub boom_score: u8,
    /// Stars, 1–5.
    pub rating: u8,
    pub review: Option<String>,
    pub photos: Vec<String>,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub special_boom: bool,
    pub special_boom_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRating {
    /// Builds a public rating stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRating`] if `boom_score > 5` or `rating`
    /// is outside `1..=5`.
    pub fn new(
        user_id: impl Into<String>,
        restaurant_id: impl Into<String>,
        boom_score: u8,
        rating: u8,
    ) -> Result<Self, CoreError> {
        if boom_score > 5 {
            return Err(CoreError::InvalidRating(format!(
                "boom score {boom_score} exceeds 5"
            )));
        }
        if !(1..=5).contains(&rating) {
            return Err(CoreError::InvalidRating(format!(
                "star rating {rating} not in 1..=5"
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            restaurant_id: restaurant_id.into(),
            boom_score,
            rating,
            review: None,
            photos: Vec::new(),
            tags: Vec::new(),
            is_public: true,
            special_boom: false,
            special_boom_used_at: None,
            created_at: now,
            updated_at: now,
        })
    }
}

/// The whitelisted slice of [`AppStore`] that survives restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub user: Option<User>,
    pub user_ratings: Vec<UserRating>,
    pub favorites: Vec<String>,
    pub current_location: Option<Coordinates>,
    pub last_special_boom_used: Option<DateTime<Utc>>,
}

impl PersistedState {
    /// # Errors
    ///
    /// Returns [`CoreError::PersistedState`] if `raw` is not a valid snapshot.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::PersistedState`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone)]
pub struct AppStore {
    user: Option<User>,
    current_location: Option<Coordinates>,
    restaurants: Vec<Restaurant>,
    user_ratings: Vec<UserRating>,
    favorites: Vec<String>,
    is_loading: bool,
    error: Option<String>,
    current_index: usize,
    has_more: bool,
    last_special_boom_used: Option<DateTime<Utc>>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self {
            user: None,
            current_location: None,
            restaurants: Vec::new(),
            user_ratings: Vec::new(),
            favorites: Vec::new(),
            is_loading: false,
            error: None,
            current_index: 0,
            has_more: true,
            last_special_boom_used: None,
        }
    }
}

impl AppStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a persisted snapshot; transient fields start fresh.
    #[must_use]
    pub fn restore(state: PersistedState) -> Self {
        Self {
            user: state.user,
            current_location: state.current_location,
            user_ratings: state.user_ratings,
            favorites: state.favorites,
            last_special_boom_used: state.last_special_boom_used,
            ..Self::default()
        }
    }

    /// Snapshot of the fields that are persisted.
    #[must_use]
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            user: self.user.clone(),
            user_ratings: self.user_ratings.clone(),
            favorites: self.favorites.clone(),
            current_location: self.current_location,
            last_special_boom_used: self.last_special_boom_used,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    #[must_use]
    pub fn current_location(&self) -> Option<Coordinates> {
        self.current_location
    }

    pub fn set_current_location(&mut self, location: Coordinates) {
        self.current_location = Some(location);
    }

    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Replaces the list wholesale and resets the cursor to the first item.
    pub fn set_restaurants(&mut self, restaurants: Vec<Restaurant>) {
        self.restaurants = restaurants;
        self.current_index = 0;
    }

    pub fn add_restaurants(&mut self, restaurants: impl IntoIterator<Item = Restaurant>) {
        self.restaurants.extend(restaurants);
    }

    pub fn clear_restaurants(&mut self) {
        self.restaurants.clear();
        self.current_index = 0;
    }

    #[must_use]
    pub fn user_ratings(&self) -> &[UserRating] {
        &self.user_ratings
    }

    /// Stores `rating`, replacing any earlier rating for the same restaurant.
    pub fn add_user_rating(&mut self, rating: UserRating) {
        if rating.special_boom {
            self.last_special_boom_used = Some(rating.special_boom_used_at.unwrap_or_else(Utc::now));
        }
        self.user_ratings
            .retain(|r| r.restaurant_id != rating.restaurant_id);
        self.user_ratings.push(rating);
    }

    #[must_use]
    pub fn rating_for(&self, restaurant_id: &str) -> Option<&UserRating> {
        self.user_ratings
            .iter()
            .find(|r| r.restaurant_id == restaurant_id)
    }

    #[must_use]
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    #[must_use]
    pub fn is_favorite(&self, restaurant_id: &str) -> bool {
        self.favorites.iter().any(|id| id == restaurant_id)
    }

    /// Adds or removes `restaurant_id`; returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, restaurant_id: &str) -> bool {
        if self.is_favorite(restaurant_id) {
            self.favorites.retain(|id| id != restaurant_id);
            false
        } else {
            self.favorites.push(restaurant_id.to_string());
            true
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn set_current_index(&mut self, index: usize) {
        self.current_index = index;
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    #[must_use]
    pub fn last_special_boom_used(&self) -> Option<DateTime<Utc>> {
        self.last_special_boom_used
    }

    /// Drops everything, persisted fields included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
