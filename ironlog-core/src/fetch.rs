//! Remote sources: official hiscores, TempleOSRS and the OSRS Wiki price API.
//!
//! Every request degrades to `None` on failure; callers skip that source.

use crate::error::Result;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "OSRS-Ironman-Tracker/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint URLs, overridable from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub temple_stats: String,
    pub temple_collection_log: String,
    pub temple_gains: String,
    pub hiscores: String,
    pub ge_prices: String,
    pub item_mapping: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            temple_stats: "https://templeosrs.com/api/player_stats.php".to_string(),
            temple_collection_log:
                "https://templeosrs.com/api/collection-log/player_collection_log.php".to_string(),
            temple_gains: "https://templeosrs.com/api/player_gains.php".to_string(),
            hiscores: "https://secure.runescape.com/m=hiscore_oldschool_ironman/index_lite.json"
                .to_string(),
            ge_prices: "https://prices.runescape.wiki/api/v1/osrs/latest".to_string(),
            item_mapping: "https://prices.runescape.wiki/api/v1/osrs/mapping".to_string(),
        }
    }
}

/// High/low instant-trade quotes for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PriceQuote {
    #[serde(default)]
    pub high: Option<u64>,
    #[serde(default)]
    pub low: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct MappingEntry {
    id: u32,
    name: String,
}

pub struct Fetcher {
    client: Client,
    user_agent: String,
    endpoints: Endpoints,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Duration, endpoints: Endpoints) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET `url` with query `params` and decode the body as JSON.
    pub fn get_json(&self, url: &str, params: &[(&str, String)]) -> Option<Value> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send();

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Error fetching {}: HTTP {}", url, status);
            return None;
        }

        match response.json::<Value>() {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Error decoding {}: {}", url, e);
                None
            }
        }
    }

    /// `data` object of the aggregator's player stats, bosses included.
    pub fn temple_stats(&self, rsn: &str) -> Option<Value> {
        let params = [("player", rsn.to_string()), ("bosses", "1".to_string())];
        self.get_json(&self.endpoints.temple_stats, &params)
            .and_then(take_data)
    }

    /// Raw collection log response; its shape varies and is interpreted by the merge.
    pub fn temple_collection_log(&self, rsn: &str) -> Option<Value> {
        let params = [("player", rsn.to_string())];
        self.get_json(&self.endpoints.temple_collection_log, &params)
    }

    /// `data` object of the aggregator's gains over the last `days` days.
    pub fn temple_gains(&self, rsn: &str, days: u32) -> Option<Value> {
        let params = [
            ("player", rsn.to_string()),
            ("time", (u64::from(days) * 86_400).to_string()),
            ("bosses", "1".to_string()),
        ];
        self.get_json(&self.endpoints.temple_gains, &params)
            .and_then(take_data)
    }

    /// Hiscores JSON with `skills` and `activities` arrays.
    pub fn official_hiscores(&self, rsn: &str) -> Option<Value> {
        let params = [("player", rsn.to_string())];
        self.get_json(&self.endpoints.hiscores, &params)
    }

    /// Latest GE quotes keyed by item id. Empty when unavailable.
    pub fn ge_prices(&self) -> HashMap<String, PriceQuote> {
        let Some(data) = self.get_json(&self.endpoints.ge_prices, &[]).and_then(take_data) else {
            return HashMap::new();
        };
        serde_json::from_value(data).unwrap_or_else(|e| {
            tracing::warn!("Unexpected price data: {}", e);
            HashMap::new()
        })
    }

    /// Item name to id. Empty when unavailable.
    pub fn item_mapping(&self) -> HashMap<String, u32> {
        let Some(data) = self.get_json(&self.endpoints.item_mapping, &[]) else {
            return HashMap::new();
        };
        match serde_json::from_value::<Vec<MappingEntry>>(data) {
            Ok(entries) => entries.into_iter().map(|e| (e.name, e.id)).collect(),
            Err(e) => {
                tracing::warn!("Unexpected item mapping: {}", e);
                HashMap::new()
            }
        }
    }
}

fn take_data(mut value: Value) -> Option<Value> {
    match value.get_mut("data") {
        Some(data) if !data.is_null() => Some(data.take()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn spawn_server(
        routes: Vec<(&'static str, u16, &'static str)>,
    ) -> (String, mpsc::Sender<()>, thread::JoinHandle<()>) {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base_url = format!("http://{}", server.server_addr());
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }
                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };
                let url = request.url().to_string();
                let path = url.split('?').next().unwrap_or(&url).to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, s, b)| (*s, *b))
                    .unwrap_or((404, "not found"));
                let _ = request.respond(
                    tiny_http::Response::from_string(body).with_status_code(status),
                );
            }
        });

        (base_url, shutdown_tx, handle)
    }

    fn fetcher(base: &str, timeout: Duration) -> Fetcher {
        let endpoints = Endpoints {
            temple_stats: format!("{base}/stats"),
            temple_collection_log: format!("{base}/clog"),
            temple_gains: format!("{base}/gains"),
            hiscores: format!("{base}/hiscores"),
            ge_prices: format!("{base}/latest"),
            item_mapping: format!("{base}/mapping"),
        };
        Fetcher::new(DEFAULT_USER_AGENT, timeout, endpoints).unwrap()
    }

    #[test]
    fn test_fetch_success_and_failures() {
        let (base, shutdown, handle) = spawn_server(vec![
            ("/hiscores", 200, r#"{"skills":[{"name":"Overall","level":1500}]}"#),
            ("/stats", 200, r#"{"data":{"attack":{"ehp":1.5}}}"#),
            ("/gains", 200, r#"{"error":"player not found"}"#),
            ("/clog", 500, r#"{"data":{}}"#),
            ("/latest", 200, r#"{"data":{"4151":{"high":1500000,"low":1400000},"995":{"high":null,"low":null}}}"#),
            ("/mapping", 200, "this is not json"),
        ]);
        let f = fetcher(&base, Duration::from_secs(5));

        let hiscores = f.official_hiscores("someone").unwrap();
        assert_eq!(hiscores["skills"][0]["level"], 1500);
        assert_eq!(f.temple_stats("someone").unwrap()["attack"]["ehp"], 1.5);
        assert!(f.temple_gains("someone", 30).is_none());
        assert!(f.temple_collection_log("someone").is_none());

        let prices = f.ge_prices();
        assert_eq!(prices["4151"], PriceQuote { high: Some(1_500_000), low: Some(1_400_000) });
        assert_eq!(prices["995"], PriceQuote::default());
        assert!(f.item_mapping().is_empty());

        let _ = shutdown.send(());
        handle.join().unwrap();
    }

    #[test]
    fn test_fetch_timeout_is_absent() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            // Accept and never answer.
            if let Ok((stream, _)) = listener.accept() {
                thread::sleep(Duration::from_millis(1500));
                drop(stream);
            }
        });

        let f = fetcher(&format!("http://{addr}"), Duration::from_millis(200));
        assert!(f.official_hiscores("someone").is_none());
        handle.join().unwrap();
    }

    #[test]
    fn test_unreachable_host_is_absent() {
        // Bind then drop to get a port with nothing listening.
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let f = fetcher(&format!("http://{addr}"), Duration::from_secs(2));
        assert!(f.get_json(&f.endpoints().hiscores, &[]).is_none());
        assert!(f.ge_prices().is_empty());
    }
}
