//! Weather provider (Meteosource `point` endpoint)

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::{Provider, UpstreamClient, UpstreamError};

/// Wind at a point in time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wind {
    /// Metres per second
    pub speed: f64,
    /// Degrees, meteorological convention
    pub angle: f64,
}

/// Cloud cover comes as a bare percentage for `current` and as an object with
/// a `total` field for hourly records on the free tier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
enum CloudCover {
    Percent(f64),
    Layers { total: f64 },
}

impl CloudCover {
    fn percent(self) -> f64 {
        match self {
            CloudCover::Percent(p) | CloudCover::Layers { total: p } => p,
        }
    }
}

fn deserialize_cloud_cover<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    CloudCover::deserialize(deserializer).map(CloudCover::percent)
}

/// Temperature, summary, wind and cloud cover at one moment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherConditions {
    /// Degrees Celsius
    pub temperature: f64,
    pub summary: String,
    pub wind: Wind,
    /// Percent
    #[serde(deserialize_with = "deserialize_cloud_cover")]
    pub cloud_cover: f64,
}

impl WeatherConditions {
    /// Multi-line description used by the "current" and "by city" replies.
    pub fn describe(&self) -> String {
        format!(
            "🌡 Temperature: {}°C\n📝 Summary: {}\n💨 Wind: {} m/s, {}°\n☁ Cloud cover: {}%",
            self.temperature, self.summary, self.wind.speed, self.wind.angle, self.cloud_cover
        )
    }
}

/// One hourly forecast entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyRecord {
    /// Local time as sent by the provider, e.g. `2024-05-01T14:00:00`
    pub date: String,
    #[serde(flatten)]
    pub conditions: WeatherConditions,
}

impl HourlyRecord {
    /// `HH:MM` when the timestamp parses, the raw value otherwise.
    fn time_label(&self) -> String {
        NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S")
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }

    pub fn describe_line(&self) -> String {
        let c = &self.conditions;
        format!(
            "{} | {}°C | {} | 💨 {} m/s {}° | ☁ {}%",
            self.time_label(),
            c.temperature,
            c.summary,
            c.wind.speed,
            c.wind.angle,
            c.cloud_cover
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct HourlySection {
    data: Vec<HourlyRecord>,
}

/// Current conditions plus the hourly forecast for one place.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    pub current: WeatherConditions,
    #[serde(deserialize_with = "deserialize_hourly", default)]
    pub hourly: Vec<HourlyRecord>,
}

fn deserialize_hourly<'de, D>(deserializer: D) -> Result<Vec<HourlyRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<HourlySection>::deserialize(deserializer).map(|section| section.map(|s| s.data).unwrap_or_default())
}

impl WeatherReport {
    /// Full day forecast, one line per hourly record.
    pub fn forecast_text(&self, place_name: &str) -> String {
        if self.hourly.is_empty() {
            return format!("No hourly forecast available for {}.", place_name);
        }
        let mut text = format!("📅 Forecast for {}:\n", place_name);
        let lines: Vec<String> = self.hourly.iter().map(HourlyRecord::describe_line).collect();
        text.push_str(&lines.join("\n"));
        text
    }
}

/// Turns free text typed by a user into a provider place slug.
///
/// `"  New   York "` becomes `"new-york"`.
pub fn place_slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Human-readable place name from a slug: `"ivano-frankivsk"` → `"Ivano Frankivsk"`.
pub fn display_place(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl UpstreamClient {
    /// Fetches current conditions and the hourly forecast for a place.
    ///
    /// # Arguments
    /// * `place` - Provider place slug (see [`place_slug`])
    ///
    /// # Returns
    /// * `Ok(WeatherReport)` - Parsed report
    /// * `Err(UpstreamError)` - Network failure, unknown place (non-2xx) or bad body
    pub async fn fetch_weather(&self, place: &str) -> Result<WeatherReport, UpstreamError> {
        let endpoints = self.endpoints();
        let url = format!("{}/point", endpoints.weather_url.trim_end_matches('/'));
        log::debug!("Fetching weather for place {:?}", place);

        self.get_json(
            Provider::Weather,
            &url,
            &[
                ("key", endpoints.weather_token.as_str()),
                ("place_id", place),
                ("sections", "current,hourly"),
                ("units", "metric"),
            ],
        )
        .await
    }
}
