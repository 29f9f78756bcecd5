//! Synthetic restaurants served when live nearby data is unavailable.

use scrolleats_core::{sort_by_distance, Coordinates, PriceRange, Restaurant};

/// Prefix shared by every fallback id.
pub const FALLBACK_ID_PREFIX: &str = "fallback";

/// Number of entries in the fallback set.
pub const FALLBACK_LEN: usize = 5;

struct Seed {
    name: &'static str,
    description: &'static str,
    cuisine: &'static str,
    price_range: PriceRange,
    rating: f64,
    review_count: u32,
    address: &'static str,
    phone: &'static str,
    image: &'static str,
    tags: [&'static str; 3],
    delivery: bool,
    dine_in: bool,
}

const SEEDS: [Seed; FALLBACK_LEN] = [
    Seed {
        name: "Local Bistro",
        description: "A cozy local bistro serving fresh, seasonal dishes",
        cuisine: "American",
        price_range: PriceRange::Moderate,
        rating: 4.2,
        review_count: 45,
        address: "123 Main St",
        phone: "(555) 123-4567",
        image: "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=800",
        tags: ["Local", "American", "Casual"],
        delivery: true,
        dine_in: true,
    },
    Seed {
        name: "Pizza Palace",
        description: "Authentic Italian pizza and pasta made with fresh ingredients",
        cuisine: "Italian",
        price_range: PriceRange::Moderate,
        rating: 4.5,
        review_count: 78,
        address: "456 Oak Ave",
        phone: "(555) 987-6543",
        image: "https://images.unsplash.com/photo-1513104890138-7c749659a591?w=800",
        tags: ["Italian", "Pizza", "Pasta"],
        delivery: true,
        dine_in: true,
    },
    Seed {
        name: "Sushi Master",
        description: "Premium sushi and sashimi with the freshest fish",
        cuisine: "Japanese",
        price_range: PriceRange::Expensive,
        rating: 4.7,
        review_count: 156,
        address: "789 Pine St",
        phone: "(555) 456-7890",
        image: "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?w=800",
        tags: ["Japanese", "Sushi", "Fine Dining"],
        delivery: false,
        dine_in: true,
    },
    Seed {
        name: "Taco Truck",
        description: "Authentic Mexican street food with bold flavors",
        cuisine: "Mexican",
        price_range: PriceRange::Budget,
        rating: 4.3,
        review_count: 92,
        address: "321 Food Truck Lane",
        phone: "(555) 321-6540",
        image: "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=800",
        tags: ["Mexican", "Street Food", "Tacos"],
        delivery: true,
        dine_in: false,
    },
    Seed {
        name: "Burger Joint",
        description: "Classic American burgers with hand-cut fries",
        cuisine: "American",
        price_range: PriceRange::Moderate,
        rating: 4.1,
        review_count: 67,
        address: "654 Burger Blvd",
        phone: "(555) 654-3210",
        image: "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=800",
        tags: ["American", "Burgers", "Casual"],
        delivery: true,
        dine_in: true,
    },
];

/// Builds the fallback set around `origin`.
///
/// Every entry sits at the origin and gets a random distance in
/// `[0.1, 2.1)` km, then the set is sorted by that distance.
#[must_use]
pub fn fallback_restaurants(origin: Coordinates) -> Vec<Restaurant> {
    let mut restaurants: Vec<Restaurant> = SEEDS
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let mut r = Restaurant::new(
                format!("{FALLBACK_ID_PREFIX}{}", i + 1),
                seed.name,
                origin,
            );
            r.description = seed.description.to_owned();
            r.cuisine = seed.cuisine.to_owned();
            r.price_range = seed.price_range;
            r.rating = seed.rating;
            r.review_count = seed.review_count;
            r.address = seed.address.to_owned();
            r.city = "Your City".to_owned();
            r.state = "CA".to_owned();
            r.zip_code = "12345".to_owned();
            r.phone = seed.phone.to_owned();
            r.images = vec![seed.image.to_owned()];
            r.tags = seed.tags.iter().map(|t| (*t).to_owned()).collect();
            r.distance_km = Some(rand::random_range(0.1..2.1));
            r.is_open = true;
            r.delivery_available = seed.delivery;
            r.takeout_available = true;
            r.dine_in_available = seed.dine_in;
            r
        })
        .collect();
    sort_by_distance(&mut restaurants);
    restaurants
}

/// Whether `restaurant` came from the fallback set.
#[must_use]
pub fn is_fallback(restaurant: &Restaurant) -> bool {
    restaurant.id.starts_with(FALLBACK_ID_PREFIX)
}
