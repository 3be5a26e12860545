//! External GeoIP API lookups (ip-api.com style) with a TTL cache
//!
//! Cache entries include negative results so a failing IP is not re-queried
//! on every click; `get_with` gives singleflight semantics for concurrent
//! lookups of the same address.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{trace, warn};
use ureq::Agent;

use super::{GeoInfo, GeoIpLookup};

const GEOIP_CACHE_TTL_SECS: u64 = 15 * 60;
const GEOIP_CACHE_MAX_CAPACITY: u64 = 10_000;
const HTTP_TIMEOUT_SECS: u64 = 2;

static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

pub struct ExternalApiProvider {
    /// URL template with `{ip}` placeholder
    api_url_template: String,
    cache: Cache<String, Option<GeoInfo>>,
}

impl ExternalApiProvider {
    pub fn new(api_url_template: &str) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(GEOIP_CACHE_TTL_SECS))
            .max_capacity(GEOIP_CACHE_MAX_CAPACITY)
            .build();

        Self {
            api_url_template: api_url_template.to_string(),
            cache,
        }
    }

    fn fetch_from_api_sync(url: String) -> Option<GeoInfo> {
        let agent = get_agent();

        let resp = match agent.get(&url).call() {
            Ok(r) => r,
            Err(e) => {
                warn!("GeoIP API request to \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let json: serde_json::Value = match resp.into_body().read_json() {
            Ok(j) => j,
            Err(e) => {
                warn!("GeoIP API response from \"{}\" parse failed: {}", url, e);
                return None;
            }
        };

        // ip-api.com answers {"countryCode": "US", "city": "..."} and
        // {"status": "fail", ...} for unroutable addresses
        if json["status"].as_str() == Some("fail") {
            trace!("GeoIP API returned fail status");
            return None;
        }

        let country = json["countryCode"]
            .as_str()
            .or_else(|| json["country_code"].as_str())
            .or_else(|| json["country"].as_str())
            .map(String::from);

        let city = json["city"].as_str().map(String::from);

        Some(GeoInfo { country, city })
    }

    async fn fetch_from_api(&self, ip: &str) -> Option<GeoInfo> {
        let url = self.api_url_template.replace("{ip}", ip);

        // ureq is blocking, keep it off the async workers
        tokio::task::spawn_blocking(move || Self::fetch_from_api_sync(url))
            .await
            .unwrap_or_else(|e| {
                warn!("GeoIP spawn_blocking failed: {}", e);
                None
            })
    }
}

#[async_trait]
impl GeoIpLookup for ExternalApiProvider {
    async fn lookup(&self, ip: &str) -> Option<GeoInfo> {
        let ip_key = ip.to_string();

        self.cache
            .get_with(ip_key, async {
                trace!("GeoIP cache miss for {}, fetching from API", ip);
                self.fetch_from_api(ip).await
            })
            .await
    }

    fn name(&self) -> &'static str {
        "ExternalAPI"
    }
}
