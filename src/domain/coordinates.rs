/// A validated geographic point. Latitude and longitude are decimal degrees;
/// anything non-finite or out of range is rejected at the boundary so the
/// rest of the system can assume a plausible coordinate.
#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn parse(latitude: f64, longitude: f64) -> Result<Coordinates, String> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err("coordinates must be finite numbers".to_string());
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("{} is not a valid latitude", latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("{} is not a valid longitude", longitude));
        }

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}
