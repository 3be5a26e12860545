//! GeoIP lookup, used to stamp a country onto sessions and clicks
//!
//! Provider selection at startup: a configured and readable MaxMind
//! database wins, otherwise lookups go to the external HTTP API with a
//! local TTL cache. Lookup failures degrade to no country.

mod external_api;
mod maxmind;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::AnalyticsConfig;

use external_api::ExternalApiProvider;
use maxmind::MaxMindProvider;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeoInfo {
    /// ISO 3166-1 alpha-2 country code (e.g. "US")
    pub country: Option<String>,
    pub city: Option<String>,
}

#[async_trait]
pub trait GeoIpLookup: Send + Sync {
    async fn lookup(&self, ip: &str) -> Option<GeoInfo>;

    /// Provider name for log output
    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct GeoIpProvider {
    inner: Arc<dyn GeoIpLookup>,
}

impl GeoIpProvider {
    pub fn new(config: &AnalyticsConfig) -> Self {
        let inner: Arc<dyn GeoIpLookup> = if let Some(ref path) = config.maxminddb_path {
            match MaxMindProvider::new(path) {
                Ok(provider) => {
                    info!("GeoIP: using MaxMind database at {}", path);
                    Arc::new(provider)
                }
                Err(e) => {
                    warn!(
                        "GeoIP: failed to load MaxMind database at {}: {}, falling back to external API",
                        path, e
                    );
                    Arc::new(ExternalApiProvider::new(&config.geoip_api_url))
                }
            }
        } else {
            debug!("GeoIP: no MaxMind database configured, using external API");
            Arc::new(ExternalApiProvider::new(&config.geoip_api_url))
        };

        info!("GeoIP: initialized with {} provider", inner.name());
        Self { inner }
    }

    pub async fn lookup(&self, ip: &str) -> Option<GeoInfo> {
        self.inner.lookup(ip).await
    }

    pub async fn lookup_country(&self, ip: Option<&str>) -> Option<String> {
        match ip {
            Some(ip) => self.lookup(ip).await.and_then(|info| info.country),
            None => None,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }
}
