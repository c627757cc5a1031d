use axum::Router;
use registry::AppRegistry;

use super::kitchen::build_kitchen_routers;
use super::reservation::build_reservation_routers;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_kitchen_routers())
        .merge(build_reservation_routers());
    Router::new().nest("/api/v1", router)
}
