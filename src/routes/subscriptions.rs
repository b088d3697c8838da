use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::new_subscriber::{NewSubscriber, SubscribeBody};

#[tracing::instrument(
    name = "Creating a new subscriber handler",
    skip(body, db_pool),
    fields(
        subscriber_email = %body.email,
        latitude = %body.latitude,
        longitude = %body.longitude
    )
)]
pub async fn handle_subscribe(
    body: web::Json<SubscribeBody>,
    db_pool: web::Data<PgPool>,
) -> impl Responder {
    let new_subscriber: NewSubscriber = match body.try_into() {
        Ok(subscriber) => subscriber,
        Err(err) => {
            tracing::error!("Validation error: {:?}", err);
            return HttpResponse::BadRequest().finish();
        }
    };

    match insert_subscriber(&new_subscriber, &db_pool).await {
        Ok(_) => HttpResponse::Created().finish(),
        Err(err) if is_unique_violation(&err) => {
            tracing::warn!(
                "Email {} is already subscribed",
                new_subscriber.email.as_ref()
            );
            HttpResponse::Conflict().finish()
        }
        Err(err) => {
            tracing::error!("Failed to insert new subscriber: {:?}", err);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[tracing::instrument(
    name = "Insert a new subscriber into the database",
    skip(new_subscriber, db_pool)
)]
async fn insert_subscriber(
    new_subscriber: &NewSubscriber,
    db_pool: &PgPool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO subscribers (id, email, latitude, longitude, location_name, subscribed_at, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new_subscriber.email.as_ref())
    .bind(new_subscriber.coordinates.latitude())
    .bind(new_subscriber.coordinates.longitude())
    .bind(new_subscriber.location_name.as_deref())
    .bind(Utc::now())
    .execute(db_pool)
    .await?;

    Ok(())
}

/// Postgres unique_violation, i.e. the email is already taken. Creation must
/// fail rather than overwrite the existing record.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
