//! Country DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use hotel_core::domain::Country;
use hotel_shared::PaginatedResponse;

use super::hotel::{CreateHotelDto, HotelDto};

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCountryDto {
    #[validate(length(min = 1, max = 100, message = "Country Name Is Too Long"))]
    #[schema(example = "Jamaica", max_length = 100)]
    pub name: String,

    #[validate(length(min = 1, max = 2, message = "Short Country Name Is Too Long"))]
    #[schema(example = "JM", max_length = 2)]
    pub short_name: String,
}

impl CreateCountryDto {
    pub fn into_entity(self) -> Country {
        Country::new(self.name, self.short_name)
    }
}

/// Replacement fields for a country, plus hotels to add under it
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCountryDto {
    #[validate(length(min = 1, max = 100, message = "Country Name Is Too Long"))]
    pub name: String,

    #[validate(length(min = 1, max = 2, message = "Short Country Name Is Too Long"))]
    pub short_name: String,

    #[validate(nested)]
    #[serde(default)]
    pub hotels: Option<Vec<CreateHotelDto>>,
}

impl UpdateCountryDto {
    /// Point every nested hotel at `country_id`
    pub fn assign_country(&mut self, country_id: i64) {
        for hotel in self.hotels.iter_mut().flatten() {
            hotel.country_id = country_id;
        }
    }

    pub fn apply_to(&self, country: &mut Country) {
        country.name = self.name.clone();
        country.short_name = self.short_name.clone();
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryDto {
    pub id: i64,
    pub name: String,
    pub short_name: String,

    /// Present when the hotels were loaded
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hotels: Option<Vec<HotelDto>>,
}

impl From<Country> for CountryDto {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
            short_name: country.short_name,
            hotels: country
                .hotels
                .map(|hotels| hotels.into_iter().map(HotelDto::from).collect()),
        }
    }
}

/// Country embedded in a hotel response, without its hotels
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummaryDto {
    pub id: i64,
    pub name: String,
    pub short_name: String,
}

impl From<Country> for CountrySummaryDto {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
            short_name: country.short_name,
        }
    }
}

/// One page of countries
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryPageDto {
    pub data: Vec<CountryDto>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PaginatedResponse<Country>> for CountryPageDto {
    fn from(page: PaginatedResponse<Country>) -> Self {
        let page = page.map(CountryDto::from);
        Self {
            data: page.data,
            page_number: page.page_number,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_prev: page.has_prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_core::domain::Hotel;

    #[test]
    fn test_create_country_rules() {
        let ok = CreateCountryDto {
            name: "Jamaica".into(),
            short_name: "JM".into(),
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateCountryDto {
            name: "Jamaica".into(),
            short_name: "JAM".into(),
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("short_name"));
    }

    #[test]
    fn test_update_assigns_nested_hotels() {
        let mut dto: UpdateCountryDto = serde_json::from_str(
            r#"{"name":"Bahamas","shortName":"BS","hotels":[{"name":"Atlantis","address":"Paradise Island","rating":4.8}]}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());

        dto.assign_country(2);
        assert!(dto.validate().is_ok());
        assert_eq!(dto.hotels.as_ref().unwrap()[0].country_id, 2);
    }

    #[test]
    fn test_country_dto_serializes_camel_case() {
        let mut country = Country::new("Jamaica", "JM").with_id(1);
        country.hotels = Some(vec![Hotel::new("Sandals", "Negril", 4.5, 1).with_id(7)]);

        let json = serde_json::to_value(CountryDto::from(country)).unwrap();
        assert_eq!(json["shortName"], "JM");
        assert_eq!(json["hotels"][0]["countryId"], 1);

        let bare = serde_json::to_value(CountryDto::from(Country::new("Aruba", "AW"))).unwrap();
        assert!(bare.get("hotels").is_none());
    }
}
