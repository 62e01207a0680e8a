//! Restaurant catalog
//!
//! Static, read-only reference data with index maps for dish and
//! restaurant lookup. Built once at startup; no mutation surface.

mod data;

use std::collections::HashMap;
use std::sync::Arc;

use shared::models::{Dish, Restaurant};

/// Catalog service for restaurant and dish lookup
#[derive(Clone, Debug)]
pub struct CatalogService {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    restaurants: Vec<Restaurant>,
    dishes: Vec<Dish>,
    restaurant_index: HashMap<String, usize>,
    dish_index: HashMap<String, usize>,
}

impl CatalogService {
    /// Build the catalog from the seed dataset
    pub fn new() -> Self {
        let restaurants = data::restaurants();
        let dishes = data::dishes();

        let restaurant_index = restaurants
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        let dish_index = dishes
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();

        Self {
            inner: Arc::new(CatalogInner {
                restaurants,
                dishes,
                restaurant_index,
                dish_index,
            }),
        }
    }

    /// All restaurants
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.inner.restaurants
    }

    /// Restaurant by id
    pub fn restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.inner
            .restaurant_index
            .get(id)
            .map(|&i| &self.inner.restaurants[i])
    }

    /// Menu for a restaurant, in seed order
    pub fn menu(&self, restaurant_id: &str) -> Vec<&Dish> {
        self.inner
            .dishes
            .iter()
            .filter(|d| d.restaurant_id == restaurant_id)
            .collect()
    }

    /// Dish by id
    pub fn dish(&self, id: &str) -> Option<&Dish> {
        self.inner.dish_index.get(id).map(|&i| &self.inner.dishes[i])
    }

    /// Search restaurants by name or cuisine, optionally veg-only
    pub fn search(&self, query: &str, veg_only: bool) -> Vec<&Restaurant> {
        let needle = query.trim().to_lowercase();
        self.inner
            .restaurants
            .iter()
            .filter(|r| !veg_only || r.is_veg)
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r.cuisines.iter().any(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn restaurant_count(&self) -> usize {
        self.inner.restaurants.len()
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_catalog_is_consistent() {
        let catalog = CatalogService::new();
        assert_eq!(catalog.restaurant_count(), 6);

        // Every dish points at a seeded restaurant
        for restaurant in catalog.restaurants() {
            assert!(!catalog.menu(&restaurant.id).is_empty());
        }
        let total_dishes: usize = catalog
            .restaurants()
            .iter()
            .map(|r| catalog.menu(&r.id).len())
            .sum();
        assert_eq!(total_dishes, 28);

        let dosa = catalog.dish("dish-6").unwrap();
        assert_eq!(dosa.name, "Masala Dosa");
        assert_eq!(dosa.restaurant_id, "rest-2");
    }

    #[test]
    fn search_matches_name_and_cuisine() {
        let catalog = CatalogService::new();

        let by_name = catalog.search("biryani", false);
        assert!(by_name.iter().any(|r| r.id == "rest-3"));

        let veg = catalog.search("", true);
        assert_eq!(veg.len(), 2);
        assert!(veg.iter().all(|r| r.is_veg));

        assert!(catalog.search("sushi", false).is_empty());
    }
}
