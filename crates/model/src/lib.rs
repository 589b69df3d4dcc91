pub mod booking;
pub mod class;
pub mod errors;
pub mod forum;
pub mod review;
pub mod session;
pub mod subscriber;
pub mod testimonial;
pub mod trainer;
pub mod user;
