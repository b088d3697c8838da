mod health_check;
mod helpers;
mod subscribers;
mod subscriptions;
mod unsubscribe;
