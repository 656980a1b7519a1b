//! Request and response bodies
//!
//! Every body is camelCase JSON. Request DTOs carry `validator` rules;
//! response DTOs convert from the domain entities.

pub mod account;
pub mod country;
pub mod error;
pub mod hotel;

pub use account::{LoginUserDto, TokenRequestDto, UserDto};
pub use country::{CountryDto, CountryPageDto, CountrySummaryDto, CreateCountryDto, UpdateCountryDto};
pub use error::ErrorBody;
pub use hotel::{CreateHotelDto, HotelDto};
