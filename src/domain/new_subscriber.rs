use actix_web::web;
use serde::Deserialize;

use crate::domain::coordinates::Coordinates;
use crate::domain::subscriber_email::SubscriberEmail;

pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub coordinates: Coordinates,
    pub location_name: Option<String>,
}

#[derive(Deserialize)]
pub struct SubscribeBody {
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: Option<String>,
}

impl TryFrom<web::Json<SubscribeBody>> for NewSubscriber {
    type Error = String;

    fn try_from(body: web::Json<SubscribeBody>) -> Result<Self, Self::Error> {
        let email = SubscriberEmail::parse(body.email.clone())?;
        let coordinates = Coordinates::parse(body.latitude, body.longitude)?;

        Ok(NewSubscriber {
            email,
            coordinates,
            location_name: body.location_name.clone(),
        })
    }
}
