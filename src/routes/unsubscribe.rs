use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Deserialize)]
pub struct UnsubscribeBody {
    pub email: String,
}

/// Soft delete: the row stays (audit trail, no id reuse), only `is_active`
/// flips.
#[tracing::instrument(
    name = "Unsubscribe handler",
    skip(body, db_pool),
    fields(subscriber_email = %body.email)
)]
pub async fn handle_unsubscribe(
    body: web::Json<UnsubscribeBody>,
    db_pool: web::Data<PgPool>,
) -> impl Responder {
    let result = sqlx::query(
        r#"
        UPDATE subscribers
        SET is_active = FALSE
        WHERE email = $1 AND is_active = TRUE
        "#,
    )
    .bind(&body.email)
    .execute(db_pool.get_ref())
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => HttpResponse::NotFound().finish(),
        Ok(_) => HttpResponse::Ok().finish(),
        Err(err) => {
            tracing::error!("Failed to unsubscribe: {:?}", err);
            HttpResponse::InternalServerError().finish()
        }
    }
}
