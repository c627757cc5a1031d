use axum::routing::get;
use axum::Router;
use registry::AppRegistry;

use crate::handler::kitchen::{
    show_availability, show_kitchen, show_kitchen_appliances, show_kitchen_list,
};

pub fn build_kitchen_routers() -> Router<AppRegistry> {
    let kitchens_routers = Router::new()
        .route("/", get(show_kitchen_list))
        .route("/:kitchen_id", get(show_kitchen))
        .route("/:kitchen_id/appliances", get(show_kitchen_appliances));

    Router::new()
        .nest("/kitchens", kitchens_routers)
        .route("/availability", get(show_availability))
}
