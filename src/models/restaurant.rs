//! Modelo de Restaurant
//!
//! La ciudad del restaurante determina el grupo de drivers elegibles.

use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_phone};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Restaurant {
    #[sqlx(rename = "restaurant_id")]
    pub id: i32,
    #[sqlx(rename = "restaurant_name")]
    pub name: String,
    #[sqlx(rename = "restaurant_phone_num")]
    pub phone: Option<String>,
    #[sqlx(rename = "restaurant_city")]
    pub city: String,
}

#[derive(Debug, Clone, Validate)]
pub struct NewRestaurant {
    #[validate(custom = "validate_not_blank", length(max = 150))]
    pub name: String,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantField {
    Name,
    Phone,
    City,
}

impl RestaurantField {
    pub const ALL: [RestaurantField; 3] =
        [RestaurantField::Name, RestaurantField::Phone, RestaurantField::City];

    pub fn column(&self) -> &'static str {
        match self {
            RestaurantField::Name => "restaurant_name",
            RestaurantField::Phone => "restaurant_phone_num",
            RestaurantField::City => "restaurant_city",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RestaurantField::Name => "Restaurant Name",
            RestaurantField::Phone => "Restaurant Phone Number",
            RestaurantField::City => "Restaurant City",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, RestaurantField::Phone)
    }

    pub fn max_len(&self) -> u64 {
        match self {
            RestaurantField::Name => 150,
            RestaurantField::Phone => 20,
            RestaurantField::City => 100,
        }
    }
}
