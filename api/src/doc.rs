//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every route and DTO schema and registers the bearer
//! JWT scheme used by the protected operations. Swagger UI serves it at
//! `/swagger/`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::dto::{
    CountryDto, CountryPageDto, CountrySummaryDto, CreateCountryDto, CreateHotelDto, ErrorBody,
    HotelDto, LoginUserDto, TokenRequestDto, UpdateCountryDto, UserDto,
};
use crate::routes::{account, country, health, hotel};

/// Enrich the generated document with the bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token from POST /api/account/login"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hotel Listing API",
        description = "Countries, hotels and the accounts that manage them."
    ),
    paths(
        country::get_countries,
        country::get_country,
        country::create_country,
        country::update_country,
        country::delete_country,
        hotel::get_hotels,
        hotel::get_hotel,
        hotel::create_hotel,
        hotel::update_hotel,
        hotel::delete_hotel,
        account::register,
        account::login,
        account::refresh_token,
        health::health,
    ),
    components(schemas(
        CountryDto,
        CountrySummaryDto,
        CountryPageDto,
        CreateCountryDto,
        UpdateCountryDto,
        HotelDto,
        CreateHotelDto,
        UserDto,
        LoginUserDto,
        TokenRequestDto,
        ErrorBody,
    )),
    tags(
        (name = "country", description = "Countries and their hotels"),
        (name = "hotel", description = "Hotels"),
        (name = "account", description = "Registration, login and token refresh"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/country",
            "/api/country/{id}",
            "/api/hotel",
            "/api/hotel/{id}",
            "/api/account/register",
            "/api/account/login",
            "/api/account/refreshtoken",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_and_schemas_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        for schema in ["CountryDto", "HotelDto", "TokenRequestDto", "ErrorBody"] {
            assert!(components.schemas.contains_key(schema), "missing schema {}", schema);
        }
    }
}
