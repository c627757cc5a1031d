pub mod health;
pub mod kitchen;
pub mod reservation;
pub mod v1;
