use reqwest::Client;
use std::time;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// Open-Meteo forecast client. Weather is the one mandatory content block of
/// a digest, so callers retry this client; the client itself makes a single
/// attempt per call.
pub struct WeatherClient {
    http_client: Client,
    base_url: String,
}

/// The weather figures a digest needs, flattened from the current/daily
/// split of the forecast response.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub temperature: f64,
    pub windspeed: f64,
    pub min: f64,
    pub max: f64,
    pub feels_like: f64,
    /// Time of day only, e.g. "06:58"
    pub sunrise: String,
    pub sunset: String,
    pub cloudcover: f64,
    pub precipitation: f64,
    pub uv_index: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("forecast response is missing daily field {0}")]
    MissingDaily(&'static str),
}

#[derive(serde::Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
    daily: DailyForecast,
}

#[derive(serde::Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
}

#[derive(serde::Deserialize)]
struct DailyForecast {
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    apparent_temperature_max: Vec<f64>,
    apparent_temperature_min: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
    precipitation_sum: Vec<f64>,
    uv_index_max: Vec<f64>,
    cloudcover_mean: Vec<f64>,
}

impl WeatherClient {
    pub fn new(base_url: String, timeout: Option<time::Duration>) -> WeatherClient {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .unwrap();

        WeatherClient {
            http_client,
            base_url,
        }
    }

    pub async fn current_and_daily(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            (
                "daily",
                "temperature_2m_max,temperature_2m_min,\
                 apparent_temperature_max,apparent_temperature_min,\
                 sunrise,sunset,precipitation_sum,uv_index_max,cloudcover_mean"
                    .to_string(),
            ),
            ("timezone", "auto".to_string()),
        ];

        let response: ForecastResponse = self
            .http_client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.try_into()
    }
}

impl TryFrom<ForecastResponse> for WeatherReport {
    type Error = WeatherError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let daily = &response.daily;

        let first = |values: &[f64], field: &'static str| {
            values
                .first()
                .copied()
                .ok_or(WeatherError::MissingDaily(field))
        };

        let apparent_max = first(&daily.apparent_temperature_max, "apparent_temperature_max")?;
        let apparent_min = first(&daily.apparent_temperature_min, "apparent_temperature_min")?;
        let feels_like = ((apparent_max + apparent_min) / 2.0 * 10.0).round() / 10.0;

        Ok(WeatherReport {
            temperature: response.current_weather.temperature,
            windspeed: response.current_weather.windspeed,
            min: first(&daily.temperature_2m_min, "temperature_2m_min")?,
            max: first(&daily.temperature_2m_max, "temperature_2m_max")?,
            feels_like,
            sunrise: time_of_day(daily.sunrise.first(), "sunrise")?,
            sunset: time_of_day(daily.sunset.first(), "sunset")?,
            cloudcover: first(&daily.cloudcover_mean, "cloudcover_mean")?,
            precipitation: first(&daily.precipitation_sum, "precipitation_sum")?,
            uv_index: first(&daily.uv_index_max, "uv_index_max")?,
        })
    }
}

/// Open-Meteo returns ISO timestamps like "2024-08-10T06:58"; the digest only
/// shows the time part.
fn time_of_day(
    timestamp: Option<&String>,
    field: &'static str,
) -> Result<String, WeatherError> {
    let timestamp = timestamp.ok_or(WeatherError::MissingDaily(field))?;

    Ok(timestamp
        .split('T')
        .nth(1)
        .unwrap_or(timestamp)
        .to_string())
}
