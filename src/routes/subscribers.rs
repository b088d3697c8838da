use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;

use crate::domain::subscriber::Subscriber;
use crate::storage::{PgSubscriberStore, SubscriberStore};

#[derive(Serialize)]
struct SubscriberList {
    subscribers: Vec<Subscriber>,
    total: usize,
}

#[derive(Serialize)]
struct SubscriberCount {
    count: i64,
}

/// Admin view: every active subscriber.
#[tracing::instrument(name = "List subscribers handler", skip(db_pool))]
pub async fn handle_list_subscribers(db_pool: web::Data<PgPool>) -> impl Responder {
    let store = PgSubscriberStore::new(db_pool.get_ref().clone());

    match store.list_active().await {
        Ok(subscribers) => {
            let total = subscribers.len();
            HttpResponse::Ok().json(SubscriberList { subscribers, total })
        }
        Err(err) => {
            tracing::error!("Failed to list subscribers: {:?}", err);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[tracing::instrument(name = "Subscriber count handler", skip(db_pool))]
pub async fn handle_subscriber_count(db_pool: web::Data<PgPool>) -> impl Responder {
    let result: Result<i64, sqlx::Error> =
        sqlx::query_scalar("SELECT COUNT(*) FROM subscribers WHERE is_active = TRUE")
            .fetch_one(db_pool.get_ref())
            .await;

    match result {
        Ok(count) => HttpResponse::Ok().json(SubscriberCount { count }),
        Err(err) => {
            tracing::error!("Failed to count subscribers: {:?}", err);
            HttpResponse::InternalServerError().finish()
        }
    }
}
