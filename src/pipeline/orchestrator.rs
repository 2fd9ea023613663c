//! Sequential city and weather lookups behind one call.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{WeatherResult, ZipCode};
use crate::lookup::{CityResolver, WeatherLookup};

/// Why a weather request could not be answered.
///
/// The underlying [`LookupError`](crate::lookup::LookupError) is not carried:
/// callers only ever see these messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("can not find city")]
    CityNotFound,

    #[error("unable to fetch the current temperature for city: {city}")]
    WeatherUnavailable { city: String },
}

/// Resolves a zip code to a city, then fetches that city's temperature.
#[derive(Clone)]
pub struct WeatherOrchestrator {
    cities: Arc<dyn CityResolver>,
    weather: Arc<dyn WeatherLookup>,
}

impl WeatherOrchestrator {
    pub fn new(cities: Arc<dyn CityResolver>, weather: Arc<dyn WeatherLookup>) -> Self {
        Self { cities, weather }
    }

    #[tracing::instrument(name = "GetWeatherByZipcode", skip_all, fields(zipcode = %code))]
    pub async fn weather_by_zipcode(&self, code: &ZipCode) -> Result<WeatherResult, WeatherError> {
        let city = match self.cities.resolve(code).await {
            Ok(city) => city,
            Err(e) => {
                tracing::debug!(zipcode = %code, error = %e, "City resolution failed");
                return Err(WeatherError::CityNotFound);
            }
        };

        let temp_c = match self.weather.fetch(&city).await {
            Ok(temp_c) => temp_c,
            Err(e) => {
                tracing::debug!(city = %city, error = %e, "Weather lookup failed");
                return Err(WeatherError::WeatherUnavailable { city });
            }
        };

        Ok(WeatherResult::from_celsius(city, temp_c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubCities {
        city: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CityResolver for StubCities {
        async fn resolve(&self, _code: &ZipCode) -> Result<String, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.city.map(str::to_string).ok_or(LookupError::MissingField {
                service: "stub",
                field: "localidade",
            })
        }
    }

    struct StubWeather {
        temp_c: Option<f64>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherLookup for StubWeather {
        async fn fetch(&self, city: &str) -> Result<f64, LookupError> {
            self.seen.lock().unwrap().push(city.to_string());
            self.temp_c.ok_or(LookupError::Status {
                service: "stub",
                status: StatusCode::BAD_REQUEST,
            })
        }
    }

    fn orchestrator(
        city: Option<&'static str>,
        temp_c: Option<f64>,
    ) -> (WeatherOrchestrator, Arc<StubCities>, Arc<StubWeather>) {
        let cities = Arc::new(StubCities { city, calls: AtomicUsize::new(0) });
        let weather = Arc::new(StubWeather { temp_c, seen: Mutex::new(Vec::new()) });
        (
            WeatherOrchestrator::new(cities.clone(), weather.clone()),
            cities,
            weather,
        )
    }

    fn code() -> ZipCode {
        ZipCode::parse("12345678").unwrap()
    }

    #[tokio::test]
    async fn test_springfield_round_trip() {
        let (orch, _, weather) = orchestrator(Some("Springfield"), Some(25.0));

        let result = orch.weather_by_zipcode(&code()).await.unwrap();
        assert_eq!(result.city, "Springfield");
        assert_eq!(result.temp_c, 25.0);
        assert!((result.temp_f - 45.0).abs() < 1e-9);
        assert!((result.temp_k - 298.15).abs() < 1e-9);
        assert_eq!(*weather.seen.lock().unwrap(), vec!["Springfield".to_string()]);
    }

    #[tokio::test]
    async fn test_city_failure_skips_weather() {
        let (orch, cities, weather) = orchestrator(None, Some(25.0));

        let err = orch.weather_by_zipcode(&code()).await.unwrap_err();
        assert_eq!(err, WeatherError::CityNotFound);
        assert_eq!(err.to_string(), "can not find city");
        assert_eq!(cities.calls.load(Ordering::SeqCst), 1);
        assert!(weather.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_weather_failure_names_city() {
        let (orch, _, _) = orchestrator(Some("Springfield"), None);

        let err = orch.weather_by_zipcode(&code()).await.unwrap_err();
        assert_eq!(
            err,
            WeatherError::WeatherUnavailable { city: "Springfield".into() }
        );
        assert!(err.to_string().ends_with("Springfield"));
    }
}
