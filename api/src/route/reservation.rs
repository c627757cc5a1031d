use axum::routing::{delete, get, post};
use axum::Router;
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, register_reservation, show_my_reservations,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservations_routers = Router::new()
        .route("/", post(register_reservation))
        .route("/me", get(show_my_reservations))
        .route("/:reservation_id", delete(cancel_reservation));

    Router::new().nest("/reservations", reservations_routers)
}
