use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::catalog::CatalogRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use kernel::model::policy::OperatingPolicy;
use kernel::repository::catalog::CatalogRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::reservation::ReservationRepository;

/// Wires every repository implementation to its trait and carries the
/// operating policy. Cloned freely into handlers as axum state.
#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    catalog_repository: Arc<dyn CatalogRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    operating_policy: OperatingPolicy,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, operating_policy: OperatingPolicy) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let catalog_repository = Arc::new(CatalogRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            catalog_repository,
            reservation_repository,
            operating_policy,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn catalog_repository(&self) -> Arc<dyn CatalogRepository> {
        self.catalog_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn operating_policy(&self) -> OperatingPolicy {
        self.operating_policy
    }
}
