pub mod id;
pub mod kitchen;
pub mod policy;
pub mod reservation;
pub mod time;
