pub mod kitchen;
pub mod reservation;
