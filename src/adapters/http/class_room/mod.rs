//! HTTP adapter for class room endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangePhaseRequest, ClassRoomResponse, EventResponse, KickOffRequest, UserResponse,
};
pub use handlers::ClassRoomHandlers;
pub use routes::class_room_routes;
