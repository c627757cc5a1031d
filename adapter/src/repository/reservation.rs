use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::id::{KitchenId, ReservationId, UserId};
use kernel::model::reservation::event::{CancelReservation, CreateReservation};
use kernel::model::reservation::Reservation;
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::reservation::{ConflictRow, ReservationRow};
use crate::database::ConnectionPool;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // The conflict check and the insert must be one atomic step,
        // otherwise two requests can both observe a free slot and both
        // land. SERIALIZABLE makes the check-then-insert race abort on
        // one side; the exclusion constraint on the table backstops it.
        self.set_transaction_serializable(&mut tx).await?;

        // The scheduler consulted the catalog before building the
        // event, but the appliance row is re-checked inside the
        // transaction so the insert can never reference a vanished one.
        let appliance: Option<String> = sqlx::query_scalar(
            r#"
                SELECT id
                FROM appliances
                WHERE id = $1 AND kitchen_id = $2
            "#,
        )
        .bind(event.appliance_id.as_str())
        .bind(event.kitchen_id.raw())
        .fetch_optional(&mut *tx)
        .await
        .map_err(booking_error)?;

        if appliance.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "appliance {} in kitchen {}",
                event.appliance_id, event.kitchen_id
            )));
        }

        // half-open overlap: existing.start < new.end AND new.start < existing.end
        let conflict: Option<ConflictRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, starts_at_min, ends_at_min
                FROM reservations
                WHERE appliance_id = $1
                  AND reserved_on = $2
                  AND status = 'confirmed'
                  AND starts_at_min < $4
                  AND $3 < ends_at_min
                ORDER BY starts_at_min
                LIMIT 1
            "#,
        )
        .bind(event.appliance_id.as_str())
        .bind(event.reserved_on)
        .bind(i32::from(event.starts_at.minutes()))
        .bind(i32::from(event.ends_at.minutes()))
        .fetch_optional(&mut *tx)
        .await
        .map_err(booking_error)?;

        if let Some(row) = conflict {
            return Err(AppError::TimeConflict(Some(
                row.into_conflicting_interval()?,
            )));
        }

        let reservation_id = ReservationId::new();
        let inserted: ReservationRow = sqlx::query_as(
            r#"
                INSERT INTO reservations
                    (reservation_id, reserved_on, starts_at_min, ends_at_min,
                     kitchen_id, appliance_id, user_id, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, 'confirmed')
                RETURNING reservation_id, reserved_on, starts_at_min, ends_at_min,
                          kitchen_id, appliance_id, user_id, status,
                          created_at, cancelled_at
            "#,
        )
        .bind(reservation_id.raw())
        .bind(event.reserved_on)
        .bind(i32::from(event.starts_at.minutes()))
        .bind(i32::from(event.ends_at.minutes()))
        .bind(event.kitchen_id.raw())
        .bind(event.appliance_id.as_str())
        .bind(event.reserved_by.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(booking_error)?;

        tx.commit().await.map_err(|err| {
            if lost_booking_race(&err) {
                AppError::TimeConflict(None)
            } else {
                AppError::TransactionError(err)
            }
        })?;

        Reservation::try_from(inserted)
    }

    async fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        // No serializable scope here: a cancellation only frees
        // capacity, so a race with a concurrent booking is benign.
        let mut tx = self.db.begin().await?;

        let row: Option<(String, String)> = sqlx::query_as(
            r#"
                SELECT user_id, status
                FROM reservations
                WHERE reservation_id = $1
            "#,
        )
        .bind(event.reservation_id.raw())
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some((owner, status)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "reservation {}",
                event.reservation_id
            )));
        };
        if owner != event.requested_by.as_str() {
            return Err(AppError::ForbiddenOperation(
                "only the owner can cancel a reservation".into(),
            ));
        }
        if status == "cancelled" {
            return Err(AppError::AlreadyCancelled(event.reservation_id.raw()));
        }

        // cancelled rows are kept for history, never deleted
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET status = 'cancelled', cancelled_at = now()
                WHERE reservation_id = $1 AND status = 'confirmed'
            "#,
        )
        .bind(event.reservation_id.raw())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // a concurrent cancel can slip in between the status read and
        // the guarded update; zero affected rows means it already won
        if res.rows_affected() < 1 {
            return Err(AppError::AlreadyCancelled(event.reservation_id.raw()));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_confirmed_by_kitchen_on(
        &self,
        kitchen_id: KitchenId,
        reserved_on: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, reserved_on, starts_at_min, ends_at_min,
                       kitchen_id, appliance_id, user_id, status,
                       created_at, cancelled_at
                FROM reservations
                WHERE kitchen_id = $1
                  AND reserved_on = $2
                  AND status = 'confirmed'
                ORDER BY appliance_id, starts_at_min, reservation_id
            "#,
        )
        .bind(kitchen_id.raw())
        .bind(reserved_on)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, reserved_on, starts_at_min, ends_at_min,
                       kitchen_id, appliance_id, user_id, status,
                       created_at, cancelled_at
                FROM reservations
                WHERE user_id = $1
                ORDER BY reserved_on DESC, starts_at_min DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }
}

impl ReservationRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(booking_error)?;
        Ok(())
    }
}

/// 23P01 is the table's no-overlap exclusion constraint, 40001 a
/// serialization failure; either way a concurrent booking won the
/// slot, which the caller must see as an ordinary conflict.
fn lost_booking_race(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error()
            .and_then(|db_err| db_err.code())
            .as_deref(),
        Some("23P01") | Some("40001")
    )
}

/// Applied to every statement of the booking transaction. Under
/// serializable isolation PostgreSQL may abort on any of them once a
/// concurrent booking commits, reads included, so the race check must
/// not be limited to the insert.
fn booking_error(err: sqlx::Error) -> AppError {
    if lost_booking_race(&err) {
        AppError::TimeConflict(None)
    } else {
        AppError::SpecificOperationError(err)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;
    use std::sync::Arc;

    use kernel::model::id::ApplianceId;
    use kernel::model::reservation::ReservationStatus;
    use kernel::model::time::TimeOfDay;
    use sqlx::error::{DatabaseError, ErrorKind};
    use tokio::sync::Barrier;

    use super::*;

    #[derive(Debug)]
    struct SqlStateError(&'static str);

    impl fmt::Display for SqlStateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    impl StdError for SqlStateError {}

    impl DatabaseError for SqlStateError {
        fn message(&self) -> &str {
            "database rejected the statement"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn db_error(sqlstate: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlStateError(sqlstate)))
    }

    #[test]
    fn any_statement_losing_the_booking_race_reports_a_conflict() {
        // serialization failure, raised on a read or the insert alike
        assert!(matches!(
            booking_error(db_error("40001")),
            AppError::TimeConflict(None)
        ));
        // exclusion constraint backstop
        assert!(matches!(
            booking_error(db_error("23P01")),
            AppError::TimeConflict(None)
        ));
        // anything else stays a storage failure
        assert!(matches!(
            booking_error(db_error("23505")),
            AppError::SpecificOperationError(_)
        ));
        assert!(matches!(
            booking_error(sqlx::Error::RowNotFound),
            AppError::SpecificOperationError(_)
        ));
    }

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booking(starts_at: &str, ends_at: &str, user: &str) -> CreateReservation {
        CreateReservation::new(
            d("2025-06-01"),
            t(starts_at),
            t(ends_at),
            KitchenId::new(1),
            ApplianceId::new("k1-microwave1"),
            UserId::new(user),
        )
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn booking_and_conflict_round_trip(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        let first = repo.create(booking("10:00", "10:30", "user-a")).await?;
        assert_eq!(first.status, ReservationStatus::Confirmed);
        assert_eq!(first.starts_at, t("10:00"));

        // back-to-back slot is free
        repo.create(booking("10:30", "11:00", "user-b")).await?;

        // the exact same slot is not
        let err = repo
            .create(booking("10:00", "10:30", "user-c"))
            .await
            .unwrap_err();
        match err {
            AppError::TimeConflict(Some(conflict)) => {
                assert_eq!(conflict.reservation_id, first.reservation_id.raw());
                assert_eq!(conflict.starts_at, "10:00");
                assert_eq!(conflict.ends_at, "10:30");
            }
            other => panic!("expected TimeConflict, got {other}"),
        }
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn unknown_appliance_is_rejected_before_insert(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        let event = CreateReservation::new(
            d("2025-06-01"),
            t("10:00"),
            t("10:30"),
            KitchenId::new(1),
            ApplianceId::new("k2-oven3"), // exists, but under kitchen 2
            UserId::new("user-a"),
        );
        let err = repo.create(event).await.unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn cancellation_state_machine(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));
        let created = repo.create(booking("10:00", "10:30", "user-a")).await?;

        let err = repo
            .cancel(CancelReservation::new(
                created.reservation_id,
                UserId::new("user-b"),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation(_)));

        repo.cancel(CancelReservation::new(
            created.reservation_id,
            UserId::new("user-a"),
        ))
        .await?;

        let err = repo
            .cancel(CancelReservation::new(
                created.reservation_id,
                UserId::new("user-a"),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyCancelled(_)));

        // the freed slot is bookable again, and the cancelled row stays
        // in the owner's history
        repo.create(booking("10:00", "10:30", "user-b")).await?;
        let history = repo.find_by_user(&UserId::new("user-a")).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, ReservationStatus::Cancelled);
        assert!(history[0].cancelled_at.is_some());
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn racing_cancels_admit_one_winner(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = Arc::new(ReservationRepositoryImpl::new(ConnectionPool::new(pool)));
        let created = repo.create(booking("10:00", "10:30", "user-a")).await?;

        let barrier = Arc::new(Barrier::new(2));
        let mut handles = Vec::new();
        for _ in 0..2 {
            let repo = Arc::clone(&repo);
            let barrier = Arc::clone(&barrier);
            let reservation_id = created.reservation_id;
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                repo.cancel(CancelReservation::new(reservation_id, UserId::new("user-a")))
                    .await
            }));
        }

        let mut released = 0;
        let mut already_cancelled = 0;
        for handle in handles {
            match handle.await? {
                Ok(()) => released += 1,
                Err(AppError::AlreadyCancelled(_)) => already_cancelled += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(released, 1);
        assert_eq!(already_cancelled, 1);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn kitchen_view_excludes_cancelled_and_sorts_by_start(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = ReservationRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(booking("14:00", "14:45", "user-a")).await?;
        repo.create(booking("09:00", "09:15", "user-b")).await?;
        let cancelled = repo.create(booking("10:00", "10:30", "user-c")).await?;
        repo.cancel(CancelReservation::new(
            cancelled.reservation_id,
            UserId::new("user-c"),
        ))
        .await?;

        let rows = repo
            .find_confirmed_by_kitchen_on(KitchenId::new(1), d("2025-06-01"))
            .await?;
        let bounds: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.starts_at.to_string(), r.ends_at.to_string()))
            .collect();
        assert_eq!(
            bounds,
            vec![
                ("09:00".to_owned(), "09:15".to_owned()),
                ("14:00".to_owned(), "14:45".to_owned()),
            ]
        );
        Ok(())
    }
}
