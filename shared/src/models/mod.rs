//! Entity models
//!
//! Each entity follows the same triple: the row model, a `…Create`
//! payload and a `…Update` payload with optional fields.

mod client;
mod layout;
mod profile;
mod reservation;
mod room;
mod service;

pub use client::Client;
pub use layout::{Layout, LayoutCreate, LayoutUpdate};
pub use profile::{Account, Profile, Role};
pub use reservation::{
    Reservation, ReservationInput, ReservationService, ReservationStatus, ReservationWithNames,
    ServiceLine, ServiceLineInput,
};
pub use room::{Room, RoomCreate, RoomUpdate};
pub use service::{
    Service, ServiceCategory, ServiceCategoryCreate, ServiceCategoryUpdate, ServiceCreate,
    ServiceUpdate,
};
