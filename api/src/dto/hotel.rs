//! Hotel DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use hotel_core::domain::Hotel;

use super::country::CountrySummaryDto;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelDto {
    #[validate(length(min = 1, max = 150, message = "Hotel Name Is Too Long"))]
    #[schema(example = "Sandals Resort and Spa", max_length = 150)]
    pub name: String,

    #[validate(length(min = 1, max = 250, message = "Hotel Address Is Too Long"))]
    #[schema(example = "Negril", max_length = 250)]
    pub address: String,

    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4.5, minimum = 1.0, maximum = 5.0)]
    pub rating: f64,

    /// Ignored when the hotel is nested in a country update
    #[validate(range(min = 1, message = "A hotel must belong to a country"))]
    #[serde(default)]
    pub country_id: i64,
}

impl CreateHotelDto {
    pub fn into_entity(self) -> Hotel {
        Hotel::new(self.name, self.address, self.rating, self.country_id)
    }

    pub fn apply_to(&self, hotel: &mut Hotel) {
        hotel.name = self.name.clone();
        hotel.address = self.address.clone();
        hotel.rating = self.rating;
        hotel.country_id = self.country_id;
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i64,

    /// Present when the country was loaded
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country: Option<CountrySummaryDto>,
}

impl From<Hotel> for HotelDto {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name,
            address: hotel.address,
            rating: hotel.rating,
            country_id: hotel.country_id,
            country: hotel.country.map(|c| CountrySummaryDto::from(*c)),
        }
    }
}
