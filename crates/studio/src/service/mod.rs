pub mod bookings;
pub mod classes;
pub mod forum;
pub mod newsletter;
pub mod reviews;
pub mod testimonials;
pub mod trainers;
pub mod users;
