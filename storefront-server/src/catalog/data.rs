//! Seed catalog data
//!
//! The static restaurant and dish reference set. Loaded once at
//! startup and never mutated.

use shared::models::{Dish, GeoPoint, Restaurant};

pub(super) fn restaurants() -> Vec<Restaurant> {
    vec![
        restaurant(
            "rest-1",
            "Punjabi Dhaba",
            &["North Indian", "Punjabi", "Tandoor"],
            4.3,
            2500,
            30,
            300.0,
            false,
            "Connaught Place, New Delhi",
            28.6304,
            77.2177,
        ),
        restaurant(
            "rest-2",
            "Spice Garden",
            &["South Indian", "Kerala", "Vegetarian"],
            4.5,
            1800,
            25,
            250.0,
            true,
            "Koramangala, Bangalore",
            12.9352,
            77.6245,
        ),
        restaurant(
            "rest-3",
            "Biryani Paradise",
            &["Hyderabadi", "Biryani", "Mughlai"],
            4.6,
            3200,
            35,
            350.0,
            false,
            "Banjara Hills, Hyderabad",
            17.4239,
            78.4738,
        ),
        restaurant(
            "rest-4",
            "Coastal Curry",
            &["Coastal", "Seafood", "Goan"],
            4.4,
            1500,
            40,
            400.0,
            false,
            "Bandra West, Mumbai",
            19.0596,
            72.8295,
        ),
        restaurant(
            "rest-5",
            "Rajasthani Rasoi",
            &["Rajasthani", "Thali", "Vegetarian"],
            4.2,
            980,
            28,
            280.0,
            true,
            "Pink City, Jaipur",
            26.9124,
            75.7873,
        ),
        restaurant(
            "rest-6",
            "Bengal Bites",
            &["Bengali", "Fish", "Sweets"],
            4.3,
            1200,
            32,
            320.0,
            false,
            "Park Street, Kolkata",
            22.5726,
            88.3639,
        ),
    ]
}

pub(super) fn dishes() -> Vec<Dish> {
    vec![
        // Punjabi Dhaba
        dish("dish-1", "rest-1", "Butter Chicken", "Creamy tomato curry with tender chicken pieces", 320.0, "Main Course", "North Indian", false, 4.5, true),
        dish("dish-2", "rest-1", "Paneer Tikka", "Grilled cottage cheese marinated in spices", 280.0, "Main Course", "North Indian", true, 4.3, false),
        dish("dish-3", "rest-1", "Dal Makhani", "Black lentils cooked in butter and cream", 240.0, "Main Course", "North Indian", true, 4.4, false),
        dish("dish-4", "rest-1", "Tandoori Roti", "Whole wheat bread from clay oven", 30.0, "Breads", "North Indian", true, 4.2, false),
        dish("dish-5", "rest-1", "Chicken Tikka", "Grilled chicken pieces in yogurt marinade", 300.0, "Starters", "North Indian", false, 4.6, true),
        // Spice Garden
        dish("dish-6", "rest-2", "Masala Dosa", "Crispy rice crepe with spiced potato filling", 120.0, "Breakfast", "South Indian", true, 4.6, true),
        dish("dish-7", "rest-2", "Idli Sambar", "Steamed rice cakes with lentil soup", 100.0, "Breakfast", "South Indian", true, 4.5, false),
        dish("dish-8", "rest-2", "Kerala Thali", "Traditional Kerala meal platter", 300.0, "Thali", "South Indian", true, 4.7, true),
        dish("dish-9", "rest-2", "Uttapam", "Thick rice pancake with vegetables", 130.0, "Breakfast", "South Indian", true, 4.4, false),
        dish("dish-10", "rest-2", "Filter Coffee", "Traditional South Indian coffee", 50.0, "Beverages", "South Indian", true, 4.8, false),
        // Biryani Paradise
        dish("dish-11", "rest-3", "Chicken Biryani", "Fragrant basmati rice with tender chicken", 350.0, "Biryani", "Hyderabadi", false, 4.8, true),
        dish("dish-12", "rest-3", "Mutton Biryani", "Slow-cooked mutton with aromatic rice", 400.0, "Biryani", "Hyderabadi", false, 4.7, true),
        dish("dish-13", "rest-3", "Veg Biryani", "Mixed vegetable biryani with raita", 280.0, "Biryani", "Hyderabadi", true, 4.4, false),
        dish("dish-14", "rest-3", "Mirchi Ka Salan", "Spicy pepper curry", 180.0, "Curry", "Hyderabadi", true, 4.3, false),
        dish("dish-15", "rest-3", "Double Ka Meetha", "Bread pudding dessert", 120.0, "Desserts", "Hyderabadi", true, 4.5, false),
        // Coastal Curry
        dish("dish-16", "rest-4", "Goan Fish Curry", "Coconut-based fish curry", 380.0, "Seafood", "Goan", false, 4.6, true),
        dish("dish-17", "rest-4", "Prawn Balchao", "Spicy prawn pickle curry", 420.0, "Seafood", "Goan", false, 4.5, false),
        dish("dish-18", "rest-4", "Chicken Xacuti", "Chicken in coconut curry", 350.0, "Curry", "Goan", false, 4.4, false),
        dish("dish-19", "rest-4", "Bebinca", "Traditional layered pudding", 150.0, "Desserts", "Goan", true, 4.3, false),
        // Rajasthani Rasoi
        dish("dish-20", "rest-5", "Rajasthani Thali", "Traditional Rajasthani meal platter", 350.0, "Thali", "Rajasthani", true, 4.7, true),
        dish("dish-21", "rest-5", "Dal Baati Churma", "Lentils with baked wheat balls", 280.0, "Main Course", "Rajasthani", true, 4.6, false),
        dish("dish-22", "rest-5", "Gatte Ki Sabzi", "Gram flour dumplings curry", 220.0, "Curry", "Rajasthani", true, 4.4, false),
        dish("dish-23", "rest-5", "Ghevar", "Sweet honeycomb dessert", 130.0, "Desserts", "Rajasthani", true, 4.5, false),
        // Bengal Bites
        dish("dish-24", "rest-6", "Macher Jhol", "Traditional Bengali fish curry", 340.0, "Fish", "Bengali", false, 4.6, true),
        dish("dish-25", "rest-6", "Prawn Malai Curry", "Prawns in coconut milk", 390.0, "Fish", "Bengali", false, 4.7, false),
        dish("dish-26", "rest-6", "Aloo Posto", "Potatoes in poppy seed paste", 180.0, "Vegetarian", "Bengali", true, 4.3, false),
        dish("dish-27", "rest-6", "Mishti Doi", "Sweet yogurt dessert", 80.0, "Sweets", "Bengali", true, 4.8, false),
        dish("dish-28", "rest-6", "Rosogolla", "Spongy cottage cheese balls in syrup", 100.0, "Sweets", "Bengali", true, 4.9, true),
    ]
}

#[allow(clippy::too_many_arguments)]
fn restaurant(
    id: &str,
    name: &str,
    cuisines: &[&str],
    rating: f64,
    total_reviews: u32,
    delivery_time: u32,
    avg_price: f64,
    is_veg: bool,
    address: &str,
    lat: f64,
    lng: f64,
) -> Restaurant {
    Restaurant {
        id: id.into(),
        name: name.into(),
        cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
        rating,
        total_reviews,
        delivery_time,
        avg_price,
        is_veg,
        address: address.into(),
        location: Some(GeoPoint { lat, lng }),
        is_open: true,
    }
}

#[allow(clippy::too_many_arguments)]
fn dish(
    id: &str,
    restaurant_id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    cuisine: &str,
    is_veg: bool,
    rating: f64,
    is_popular: bool,
) -> Dish {
    Dish {
        id: id.into(),
        restaurant_id: restaurant_id.into(),
        name: name.into(),
        description: description.into(),
        price,
        category: category.into(),
        cuisine: cuisine.into(),
        is_veg,
        rating,
        is_popular,
    }
}
