//! Fetches the current synoptic readings from the IMGW public data API.

use crate::error::SynopError;
use crate::stations::error::FetchError;
use crate::types::station::{RawStation, StationRecord};
use bon::bon;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// The IMGW endpoint listing the latest reading of every synoptic station.
pub const DATA_URL: &str = "https://danepubliczne.imgw.pl/api/data/synop/";

/// Upper bound for one fetch, connection and body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can produce a fresh, complete list of station records.
///
/// Every call is a full replace: no paging, no incremental updates.
pub trait StationSource {
    fn fetch(&self) -> Result<Vec<StationRecord>, FetchError>;
}

/// Blocking HTTP client for the IMGW synop endpoint.
///
/// # Examples
///
/// ```no_run
/// use synop::{ImgwClient, StationSource, SynopError};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), SynopError> {
/// let client = ImgwClient::builder()
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// let stations = client.fetch()?;
/// println!("{} stations", stations.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImgwClient {
    client: Client,
    url: String,
    timeout: Duration,
}

#[bon]
impl ImgwClient {
    /// Creates a client.
    ///
    /// * `.url(..)`: endpoint to query. Defaults to [`DATA_URL`].
    /// * `.timeout(..)`: bound for the whole request. Defaults to [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`SynopError::ClientBuild`] if the TLS backend cannot be initialised.
    #[builder]
    pub fn new(
        #[builder(into, default = DATA_URL.to_string())] url: String,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Result<Self, SynopError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SynopError::ClientBuild)?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: self.url.clone(),
                timeout: self.timeout,
                source: error,
            }
        } else {
            FetchError::NetworkRequest(self.url.clone(), error)
        }
    }
}

impl StationSource for ImgwClient {
    fn fetch(&self) -> Result<Vec<StationRecord>, FetchError> {
        info!("Fetching station list from {}", self.url);
        let started = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| self.transport_error(e))?;

        // Anything outside 2xx is a failure, including redirects that weren't followed
        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for {}: status {}", self.url, status);
            return Err(FetchError::HttpStatus {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.text().map_err(|e| self.transport_error(e))?;
        debug!("Received {} bytes from {}", body.len(), self.url);

        let stations = parse_station_list(&body).map_err(|source| FetchError::JsonParse {
            url: self.url.clone(),
            source,
        })?;
        info!(
            "Fetched {} stations from {} in {:?}",
            stations.len(),
            self.url,
            started.elapsed()
        );
        Ok(stations)
    }
}

/// Decodes the endpoint's JSON array into records.
///
/// Only a body that is not a JSON array fails as a whole. Elements that are not objects,
/// have no usable station name or repeat an earlier name are dropped one by one.
pub(crate) fn parse_station_list(body: &str) -> Result<Vec<StationRecord>, serde_json::Error> {
    let elements: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = elements.len();

    let mut seen = HashSet::with_capacity(total);
    let mut stations = Vec::with_capacity(total);
    for (index, element) in elements.into_iter().enumerate() {
        let raw = match serde_json::from_value::<RawStation>(element) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Dropping station element {}: {}", index, e);
                continue;
            }
        };
        let Some(record) = raw.into_record() else {
            warn!("Dropping station element {}: no station name", index);
            continue;
        };
        if !seen.insert(record.name.clone()) {
            warn!("Dropping duplicate station '{}'", record.name);
            continue;
        }
        stations.push(record);
    }

    if stations.len() < total {
        debug!("Kept {} of {} station elements", stations.len(), total);
    }
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::column::{Column, PLACEHOLDER};
    use crate::types::station::Measurement;
    use mockito::Server;
    use std::net::TcpListener;

    const BODY: &str = r#"[
        {"id_stacji":"12375","stacja":"Warszawa","data_pomiaru":"2025-10-19","godzina_pomiaru":"14",
         "temperatura":"15.2","predkosc_wiatru":"3","kierunek_wiatru":"250",
         "wilgotnosc_wzgledna":"71.4","suma_opadu":"0","cisnienie":"1012.3"},
        {"id_stacji":"12566","stacja":"Kraków","data_pomiaru":"2025-10-19","godzina_pomiaru":"14",
         "temperatura":"9.8","predkosc_wiatru":null,"kierunek_wiatru":"180",
         "wilgotnosc_wzgledna":"80.0","suma_opadu":"0.4","cisnienie":null}
    ]"#;

    fn client_for(url: String) -> ImgwClient {
        ImgwClient::builder()
            .url(url)
            .timeout(Duration::from_millis(500))
            .build()
            .expect("client should build")
    }

    #[test]
    fn test_fetch_parses_station_list() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/api/data/synop/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create();

        let client = client_for(format!("{}/api/data/synop/", server.url()));
        let stations = client.fetch().expect("fetch should succeed");

        mock.assert();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "Warszawa");
        assert_eq!(stations[0].temperature_c, Some(Measurement::Value(15.2)));
        assert_eq!(stations[1].name, "Kraków");
        assert_eq!(stations[1].wind_speed_mps, None);
    }

    #[test]
    fn test_fetch_maps_non_success_status() {
        let mut server = Server::new();
        let mock = server.mock("GET", "/").with_status(503).create();

        let result = client_for(format!("{}/", server.url())).fetch();

        mock.assert();
        match result {
            Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 503),
            other => panic!("Expected HttpStatus error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_treats_not_modified_as_status_error() {
        let mut server = Server::new();
        let mock = server.mock("GET", "/").with_status(304).create();

        let result = client_for(format!("{}/", server.url())).fetch();

        mock.assert();
        match result {
            Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 304),
            other => panic!("Expected HttpStatus error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_maps_malformed_body() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"{"error":"not a list"}"#)
            .create();

        let result = client_for(format!("{}/", server.url())).fetch();
        assert!(matches!(result, Err(FetchError::JsonParse { .. })));
    }

    #[test]
    fn test_fetch_times_out_on_silent_server() {
        // Accepts connections into the backlog but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
        let url = format!("http://{}/", listener.local_addr().unwrap());

        let result = client_for(url).fetch();

        match result {
            Err(error @ FetchError::Timeout { .. }) => {
                assert!(error.to_string().contains("timed out"));
            }
            other => panic!("Expected Timeout error, got {:?}", other),
        }
        drop(listener);
    }

    #[test]
    fn test_fetch_maps_connection_failure() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
            listener.local_addr().unwrap().port()
        };

        let result = client_for(format!("http://127.0.0.1:{}/", port)).fetch();
        assert!(matches!(result, Err(FetchError::NetworkRequest(..))));
    }

    #[test]
    fn test_parse_drops_unusable_elements() {
        let body = r#"[
            {"stacja":"Hel","temperatura":"11.0"},
            {"temperatura":"5.0"},
            {"stacja":""},
            "not an object",
            {"stacja":"Łeba","temperatura":["bad"]},
            {"stacja":"Hel","temperatura":"99.0"},
            {"stacja":"Łeba","temperatura":"10.1"}
        ]"#;

        let stations = parse_station_list(body).expect("array body should parse");
        let names: Vec<_> = stations.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, ["Hel", "Łeba"]);
        assert_eq!(stations[0].temperature_c, Some(Measurement::Value(11.0)));
        // The first Łeba wins; its odd temperature is kept as unparsed text.
        assert_eq!(
            stations[1].temperature_c,
            Some(Measurement::Unparsed(r#"["bad"]"#.into()))
        );
        assert_eq!(Column::Temperature.cell(&stations[1]), PLACEHOLDER);
    }

    #[test]
    fn test_parse_keeps_named_stations_with_odd_field_types() {
        let body = r#"[
            {"stacja":"Hel","temperatura":"11.0","cisnienie":true},
            {"stacja":"Łeba","temperatura":{"v":"10.1"}},
            {"stacja":"Kraków","id_stacji":false}
        ]"#;

        let stations = parse_station_list(body).expect("array body should parse");
        let names: Vec<_> = stations.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, ["Hel", "Łeba", "Kraków"]);
        assert_eq!(stations[0].temperature_c, Some(Measurement::Value(11.0)));
        assert_eq!(Column::Pressure.cell(&stations[0]), PLACEHOLDER);
        assert_eq!(Column::Temperature.cell(&stations[1]), PLACEHOLDER);
        assert_eq!(stations[2].id, None);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_station_list("").is_err());
        assert!(parse_station_list("{}").is_err());
        assert!(parse_station_list("[]").expect("empty list is fine").is_empty());
    }

    #[test]
    fn test_builder_defaults() {
        let client = ImgwClient::builder().build().expect("client should build");
        assert_eq!(client.url(), DATA_URL);
    }
}
