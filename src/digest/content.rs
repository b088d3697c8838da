use chrono::NaiveDate;

use crate::news_client::Headline;
use crate::weather_client::WeatherReport;

/// Sentinel block used whenever no usable headlines are available, either
/// because the news fetch failed or because it came back empty.
pub const NO_NEWS_SENTINEL: &str = "No major news today.";

pub fn subject_line(local_date: NaiveDate) -> String {
    format!("SmartBrief — {}", local_date.format("%A, %B %d"))
}

/// The structured prompt for the generation collaborator. Carries every
/// weather figure and headline so the model has nothing to invent.
pub fn build_prompt(
    weather: &WeatherReport,
    location: &str,
    local_date: NaiveDate,
    headlines: &[Headline],
) -> String {
    format!(
        "You are a calm, premium AI evening assistant.\n\
         \n\
         Generate a clean, readable HTML email.\n\
         \n\
         STRUCTURE EXACTLY AS BELOW:\n\
         \n\
         1) A warm Good Evening greeting\n\
         2) A bold \"Weather Snapshot\" section with bullet points:\n\
            - Min\n\
            - Max\n\
            - Feels Like\n\
            - Sunrise\n\
            - Sunset\n\
         3) A 2-3 line short weather summary\n\
         4) A bold \"Top News\" section with bullet points (1-2 sentences each)\n\
         \n\
         Keep spacing clean. Use proper HTML tags only (<b>, <ul>, <li>, <p>).\n\
         \n\
         Location: {location}\n\
         Date: {date}\n\
         \n\
         Weather details:\n\
         Min: {min}°C\n\
         Max: {max}°C\n\
         Feels Like: {feels_like}°C\n\
         Sunrise: {sunrise}\n\
         Sunset: {sunset}\n\
         Wind: {windspeed} km/h\n\
         Cloud cover: {cloudcover}%\n\
         Precipitation: {precipitation} mm\n\
         \n\
         News:\n\
         {news}",
        location = location,
        date = local_date.format("%A, %d %B %Y"),
        min = weather.min,
        max = weather.max,
        feels_like = weather.feels_like,
        sunrise = weather.sunrise,
        sunset = weather.sunset,
        windspeed = weather.windspeed,
        cloudcover = weather.cloudcover,
        precipitation = weather.precipitation,
        news = news_text(headlines),
    )
}

/// Deterministic briefing used when the generation collaborator is down.
/// Same data, same sections, no prose.
pub fn fallback_digest(
    weather: &WeatherReport,
    location: &str,
    headlines: &[Headline],
) -> String {
    let news_block = if headlines.is_empty() {
        format!("<p>{}</p>", NO_NEWS_SENTINEL)
    } else {
        let items: String = headlines
            .iter()
            .map(|headline| format!("<li>{} — {}</li>", headline.title, headline.description))
            .collect();
        format!("<ul>{}</ul>", items)
    };

    format!(
        "<p>Good evening! Here is your briefing for {location}.</p>\
         <p><b>Weather Snapshot</b></p>\
         <ul>\
         <li>Min: {min}°C</li>\
         <li>Max: {max}°C</li>\
         <li>Feels Like: {feels_like}°C</li>\
         <li>Sunrise: {sunrise}</li>\
         <li>Sunset: {sunset}</li>\
         </ul>\
         <p>Currently {temperature}°C with wind at {windspeed} km/h, \
         {cloudcover}% cloud cover and {precipitation} mm of precipitation. \
         UV index peaks at {uv_index}.</p>\
         <p><b>Top News</b></p>\
         {news_block}",
        location = location,
        min = weather.min,
        max = weather.max,
        feels_like = weather.feels_like,
        sunrise = weather.sunrise,
        sunset = weather.sunset,
        temperature = weather.temperature,
        windspeed = weather.windspeed,
        cloudcover = weather.cloudcover,
        precipitation = weather.precipitation,
        uv_index = weather.uv_index,
        news_block = news_block,
    )
}

/// Wrap a briefing body in the branded email shell.
pub fn render_shell(inner_html: &str) -> String {
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; background:#f5f5f5; padding:20px;">
  <div style="max-width:600px;margin:auto;background:white;border-radius:12px;overflow:hidden;">
    <div style="background:#6b73ff;color:white;padding:20px;text-align:center;">
      <h1 style="margin:0;">SmartBrief</h1>
      <p style="margin:5px 0 0;">Your AI Evening Briefing</p>
    </div>
    <div style="padding:25px;color:#333;line-height:1.6;">
      {inner_html}
    </div>
    <div style="background:#fafafa;padding:15px;text-align:center;font-size:12px;color:#888;">
      You are receiving this because you subscribed to SmartBrief.
    </div>
  </div>
</body>
</html>"#
    )
}

fn news_text(headlines: &[Headline]) -> String {
    if headlines.is_empty() {
        return NO_NEWS_SENTINEL.to_string();
    }

    headlines
        .iter()
        .map(|headline| format!("{} - {}", headline.title, headline.description))
        .collect::<Vec<_>>()
        .join("\n")
}
