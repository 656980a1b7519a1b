//! Hotel endpoints under `/api/hotel`

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use validator::Validate;

use hotel_core::domain::entities::role;
use hotel_core::domain::{HotelField, HotelRelation};
use hotel_core::errors::DomainError;
use hotel_core::repositories::{Query, UnitOfWork};
use hotel_core::services::cache::keys;
use hotel_shared::SortOrder;

use super::valid_id;
use crate::dto::{CreateHotelDto, ErrorBody, HotelDto};
use crate::handlers::{invalidate, respond_cached, ApiResult};
use crate::middleware::JwtAuth;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/hotel")
            .route(web::get().to(get_hotels))
            .route(
                web::post()
                    .to(create_hotel)
                    .wrap(JwtAuth::require_role(role::ADMINISTRATOR)),
            ),
    )
    .service(
        web::resource("/api/hotel/{id}")
            .route(web::get().to(get_hotel))
            .route(web::put().to(update_hotel).wrap(JwtAuth::authenticated()))
            .route(
                web::delete()
                    .to(delete_hotel)
                    .wrap(JwtAuth::require_role(role::ADMINISTRATOR)),
            ),
    );
}

/// List every hotel
#[utoipa::path(
    get,
    path = "/api/hotel",
    tag = "hotel",
    responses(
        (status = 200, description = "All hotels", body = [HotelDto]),
        (status = 429, description = "Rate limit exceeded", body = ErrorBody)
    )
)]
pub async fn get_hotels(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let mut uow = state.unit_of_work();
    let hotels = uow
        .hotels()
        .get_all(Query::new().order_by(HotelField::Id, SortOrder::Asc))
        .await?;
    let body: Vec<HotelDto> = hotels.into_iter().map(HotelDto::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one hotel with its country
#[utoipa::path(
    get,
    path = "/api/hotel/{id}",
    tag = "hotel",
    params(("id" = i64, Path, description = "Hotel identifier, at least 1")),
    responses(
        (status = 200, description = "The hotel and its country", body = HotelDto),
        (status = 304, description = "Unchanged since the supplied ETag"),
        (status = 400, description = "Identifier below 1", body = ErrorBody),
        (status = 404, description = "No such hotel", body = ErrorBody)
    )
)]
pub async fn get_hotel(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = valid_id(path.into_inner())?;
    respond_cached(
        &req,
        state.cache.as_ref(),
        &keys::hotel(id),
        state.cache_ttl(),
        || load_hotel(state.unit_of_work(), id),
    )
    .await
}

async fn load_hotel(mut uow: UnitOfWork, id: i64) -> ApiResult<HotelDto> {
    let hotel = uow
        .hotels()
        .get_single(Query::by_id(id).include(HotelRelation::Country))
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Hotel {}", id)))?;
    Ok(HotelDto::from(hotel))
}

/// Fails with a validation error when the country is absent
async fn ensure_country(uow: &mut UnitOfWork, country_id: i64) -> ApiResult<()> {
    if uow.countries().get_single(Query::by_id(country_id)).await?.is_none() {
        return Err(DomainError::Validation {
            message: format!("Country {} does not exist", country_id),
        }
        .into());
    }
    Ok(())
}

/// Create a hotel
#[utoipa::path(
    post,
    path = "/api/hotel",
    tag = "hotel",
    request_body = CreateHotelDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = HotelDto,
            headers(("Location" = String, description = "URL of the new hotel"))),
        (status = 400, description = "Submitted data is invalid or the country is unknown", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Administrator role required", body = ErrorBody)
    )
)]
pub async fn create_hotel(
    state: web::Data<AppState>,
    body: web::Json<CreateHotelDto>,
) -> ApiResult<HttpResponse> {
    let dto = body.into_inner();
    dto.validate()?;

    let mut uow = state.unit_of_work();
    let country_id = dto.country_id;
    ensure_country(&mut uow, country_id).await?;

    let ticket = uow.hotels().insert(dto.into_entity());
    let receipt = uow.save().await?;
    let id = receipt
        .id_of(ticket)
        .ok_or_else(|| DomainError::internal("Saved hotel has no identifier"))?;

    let hotel = uow
        .hotels()
        .get_single(Query::by_id(id))
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Hotel {}", id)))?;

    invalidate(state.cache.as_ref(), &[keys::country(country_id)]).await;
    tracing::info!(hotel_id = id, country_id, "Hotel created");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, keys::hotel(id)))
        .json(HotelDto::from(hotel)))
}

/// Replace a hotel's fields
#[utoipa::path(
    put,
    path = "/api/hotel/{id}",
    tag = "hotel",
    params(("id" = i64, Path, description = "Hotel identifier, at least 1")),
    request_body = CreateHotelDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Submitted data is invalid or the country is unknown", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "No such hotel", body = ErrorBody)
    )
)]
pub async fn update_hotel(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<CreateHotelDto>,
) -> ApiResult<HttpResponse> {
    let id = valid_id(path.into_inner())?;
    let dto = body.into_inner();
    dto.validate()?;

    let mut uow = state.unit_of_work();
    let mut hotel = uow
        .hotels()
        .get_single(Query::by_id(id))
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Hotel {}", id)))?;

    let previous_country = hotel.country_id;
    if dto.country_id != previous_country {
        ensure_country(&mut uow, dto.country_id).await?;
    }

    dto.apply_to(&mut hotel);
    uow.hotels().update(hotel);
    uow.save().await?;

    let mut stale = vec![keys::hotel(id), keys::country(previous_country)];
    if dto.country_id != previous_country {
        stale.push(keys::country(dto.country_id));
    }
    invalidate(state.cache.as_ref(), &stale).await;

    tracing::info!(hotel_id = id, "Hotel updated");
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a hotel
#[utoipa::path(
    delete,
    path = "/api/hotel/{id}",
    tag = "hotel",
    params(("id" = i64, Path, description = "Hotel identifier, at least 1")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Identifier below 1", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Administrator role required", body = ErrorBody),
        (status = 404, description = "No such hotel", body = ErrorBody)
    )
)]
pub async fn delete_hotel(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = valid_id(path.into_inner())?;

    let mut uow = state.unit_of_work();
    let hotel = uow
        .hotels()
        .get_single(Query::by_id(id))
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Hotel {}", id)))?;

    uow.hotels().delete_by_id(id);
    uow.save().await?;

    invalidate(state.cache.as_ref(), &[keys::hotel(id), keys::country(hotel.country_id)]).await;
    tracing::info!(hotel_id = id, "Hotel deleted");
    Ok(HttpResponse::NoContent().finish())
}
