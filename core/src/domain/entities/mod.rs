//! Domain entities representing core business objects.

pub mod country;
pub mod hotel;
pub mod role;
pub mod token;
pub mod user;

pub use country::{Country, CountryField, CountryRelation};
pub use hotel::{Hotel, HotelField, HotelRelation};
pub use token::{Claims, RefreshToken, TokenPair, REFRESH_TOKEN_NAME, REFRESH_TOKEN_PROVIDER};
pub use user::ApiUser;
