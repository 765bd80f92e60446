//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - session validators (HS256 JWT, mock)
//! - `clock` - system and manual clocks
//! - `http` - axum REST API
//! - `memory` - in-memory repositories
//! - `postgres` - sqlx repositories and migrations

pub mod auth;
pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::{JwtConfig, JwtSessionValidator, MockSessionValidator};
pub use clock::{ManualClock, SystemClock};
pub use memory::{InMemoryClassRoomRepository, InMemoryCourseRepository};
pub use postgres::{PostgresClassRoomRepository, PostgresCourseRepository};
