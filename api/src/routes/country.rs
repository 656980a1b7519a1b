//! Country endpoints under `/api/country`

use actix_web::{guard, http::header, web, HttpRequest, HttpResponse};
use validator::Validate;

use hotel_core::domain::entities::role;
use hotel_core::domain::{Country, CountryRelation};
use hotel_core::errors::DomainError;
use hotel_core::repositories::{Query, UnitOfWork};
use hotel_core::services::cache::keys;
use hotel_shared::RequestParams;

use super::valid_id;
use crate::dto::{CountryDto, CountryPageDto, CreateCountryDto, ErrorBody, UpdateCountryDto};
use crate::handlers::{invalidate, respond_cached, ApiResult};
use crate::middleware::JwtAuth;
use crate::state::AppState;

/// Header selecting the unpaged listing
pub const API_VERSION_HEADER: &str = "api-version";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/country")
            .route(
                web::get()
                    .guard(guard::Header(API_VERSION_HEADER, "2.0"))
                    .to(get_countries_v2),
            )
            .route(web::get().to(get_countries))
            .route(
                web::post()
                    .to(create_country)
                    .wrap(JwtAuth::require_role(role::ADMINISTRATOR)),
            ),
    )
    .service(
        web::resource("/api/country/{id}")
            .route(web::get().to(get_country))
            .route(web::put().to(update_country).wrap(JwtAuth::authenticated()))
            .route(
                web::delete()
                    .to(delete_country)
                    .wrap(JwtAuth::require_role(role::ADMINISTRATOR)),
            ),
    );
}

/// List countries one page at a time
///
/// Sending `api-version: 2.0` returns every country as a plain array instead.
#[utoipa::path(
    get,
    path = "/api/country",
    tag = "country",
    params(
        ("pageNumber" = Option<u32>, Query, description = "1-based page number, default 1"),
        ("pageSize" = Option<u32>, Query, description = "Items per page, default 10, at most 50"),
        ("api-version" = Option<String>, Header, description = "`2.0` returns the unpaged list")
    ),
    responses(
        (status = 200, description = "A page of countries", body = CountryPageDto),
        (status = 400, description = "Malformed paging parameters", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded", body = ErrorBody)
    )
)]
pub async fn get_countries(
    state: web::Data<AppState>,
    params: web::Query<RequestParams>,
) -> ApiResult<HttpResponse> {
    let mut uow = state.unit_of_work();
    let page = uow
        .countries()
        .get_paged(Query::new(), params.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(CountryPageDto::from(page)))
}

pub async fn get_countries_v2(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let mut uow = state.unit_of_work();
    let countries: Vec<Country> = uow.countries().get_all(Query::new()).await?;
    Ok(HttpResponse::Ok().json(countries))
}

/// Fetch one country with its hotels
#[utoipa::path(
    get,
    path = "/api/country/{id}",
    tag = "country",
    params(("id" = i64, Path, description = "Country identifier, at least 1")),
    responses(
        (status = 200, description = "The country and its hotels", body = CountryDto),
        (status = 304, description = "Unchanged since the supplied ETag"),
        (status = 400, description = "Identifier below 1", body = ErrorBody),
        (status = 404, description = "No such country", body = ErrorBody)
    )
)]
pub async fn get_country(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = valid_id(path.into_inner())?;
    respond_cached(
        &req,
        state.cache.as_ref(),
        &keys::country(id),
        state.cache_ttl(),
        || load_country(state.unit_of_work(), id),
    )
    .await
}

async fn load_country(mut uow: UnitOfWork, id: i64) -> ApiResult<CountryDto> {
    let country = uow
        .countries()
        .get_single(Query::by_id(id).include(CountryRelation::Hotels))
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Country {}", id)))?;
    Ok(CountryDto::from(country))
}

/// Create a country
#[utoipa::path(
    post,
    path = "/api/country",
    tag = "country",
    request_body = CreateCountryDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = CountryDto,
            headers(("Location" = String, description = "URL of the new country"))),
        (status = 400, description = "Submitted data is invalid", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Administrator role required", body = ErrorBody)
    )
)]
pub async fn create_country(
    state: web::Data<AppState>,
    body: web::Json<CreateCountryDto>,
) -> ApiResult<HttpResponse> {
    let dto = body.into_inner();
    dto.validate()?;

    let mut uow = state.unit_of_work();
    let ticket = uow.countries().insert(dto.into_entity());
    let receipt = uow.save().await?;
    let id = receipt
        .id_of(ticket)
        .ok_or_else(|| DomainError::internal("Saved country has no identifier"))?;

    let country = uow
        .countries()
        .get_single(Query::by_id(id))
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Country {}", id)))?;

    tracing::info!(country_id = id, "Country created");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, keys::country(id)))
        .json(CountryDto::from(country)))
}

/// Replace a country's fields and add hotels under it
#[utoipa::path(
    put,
    path = "/api/country/{id}",
    tag = "country",
    params(("id" = i64, Path, description = "Country identifier, at least 1")),
    request_body = UpdateCountryDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Submitted data is invalid", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No such country", body = ErrorBody)
    )
)]
pub async fn update_country(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateCountryDto>,
) -> ApiResult<HttpResponse> {
    let id = valid_id(path.into_inner())?;
    let mut dto = body.into_inner();
    dto.assign_country(id);
    dto.validate()?;

    let mut uow = state.unit_of_work();
    let mut country = uow
        .countries()
        .get_single(Query::by_id(id).include(CountryRelation::Hotels))
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Country {}", id)))?;

    // Cached hotel bodies embed the country summary
    let mut stale = vec![keys::country(id)];
    stale.extend(country.hotels.take().into_iter().flatten().map(|hotel| keys::hotel(hotel.id)));

    dto.apply_to(&mut country);
    uow.countries().update(country);

    let mut added = 0;
    if let Some(hotels) = dto.hotels {
        added = hotels.len();
        uow.hotels()
            .insert_many(hotels.into_iter().map(|hotel| hotel.into_entity()));
    }
    uow.save().await?;

    invalidate(state.cache.as_ref(), &stale).await;
    tracing::info!(country_id = id, hotels_added = added, "Country updated");
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a country and, with it, its hotels
#[utoipa::path(
    delete,
    path = "/api/country/{id}",
    tag = "country",
    params(("id" = i64, Path, description = "Country identifier, at least 1")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Identifier below 1", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Administrator role required", body = ErrorBody),
        (status = 404, description = "No such country", body = ErrorBody)
    )
)]
pub async fn delete_country(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = valid_id(path.into_inner())?;

    let mut uow = state.unit_of_work();
    let country = uow
        .countries()
        .get_single(Query::by_id(id).include(CountryRelation::Hotels))
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Country {}", id)))?;

    uow.countries().delete_by_id(id);
    uow.save().await?;

    let mut stale = vec![keys::country(id)];
    stale.extend(country.hotels.iter().flatten().map(|hotel| keys::hotel(hotel.id)));
    invalidate(state.cache.as_ref(), &stale).await;

    tracing::info!(country_id = id, "Country deleted");
    Ok(HttpResponse::NoContent().finish())
}
