//! Typed entity views for the Traviax collections.
//!
//! Every view keeps fields it does not name in a flattened `extra` record,
//! so reading a record through a view and writing it back loses nothing.

mod booking;
mod checkin;
mod event;
mod itinerary;
mod place;
mod reel;
mod social;
mod trip;
mod user;

pub use booking::Booking;
pub use checkin::Checkin;
pub use event::Event;
pub use itinerary::Itinerary;
pub use place::{Coordinates, Place};
pub use reel::Reel;
pub use social::{Comment, Post};
pub use trip::{Trip, TripActivity, TripDay};
pub use user::User;
