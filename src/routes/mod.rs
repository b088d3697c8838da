mod health_check;
mod subscribers;
mod subscriptions;
mod unsubscribe;

pub use health_check::health_check;
pub use subscribers::{handle_list_subscribers, handle_subscriber_count};
pub use subscriptions::handle_subscribe;
pub use unsubscribe::handle_unsubscribe;
