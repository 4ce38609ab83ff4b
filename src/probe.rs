//! Map asset probe
//!
//! Checks from the host that every external resource the event map needs is
//! reachable: the mapping library stylesheet and script, and the tile under
//! each event pin. Each request goes through [`CapabilityLoader`], so the
//! probe honours the same timeout and backoff the browser does.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::capability::{
    CapabilityError, CapabilityLoader, CapabilitySource, LoadPolicy, TokioTimer,
};
use crate::map::{EventPin, MapAssets, MapError, TileCoord};

/// Errors that stop the probe before any request is made
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid probe target: {0}")]
    Target(#[from] MapError),
}

/// One URL to check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeTarget {
    pub label: String,
    pub url: String,
}

/// Successful response details
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetStatus {
    pub status: u16,
    pub content_type: Option<String>,
}

/// Outcome for one target
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub target: ProbeTarget,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Fetches a single asset URL
struct HttpAsset<'a> {
    client: &'a Client,
    target: &'a ProbeTarget,
}

#[async_trait(?Send)]
impl CapabilitySource for HttpAsset<'_> {
    type Output = AssetStatus;

    fn name(&self) -> &str {
        &self.target.label
    }

    async fn request(&self) -> Result<AssetStatus, CapabilityError> {
        let response = self
            .client
            .get(&self.target.url)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "request timed out".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    e.to_string()
                };
                CapabilityError::unavailable(self.target.label.clone(), reason)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CapabilityError::unavailable(
                self.target.label.clone(),
                format!("HTTP {}", status.as_u16()),
            ));
        }

        Ok(AssetStatus {
            status: status.as_u16(),
            content_type: response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        })
    }
}

/// Runs reachability checks for the map's external assets
pub struct AssetProbe {
    client: Client,
    policy: LoadPolicy,
}

impl AssetProbe {
    pub fn new(policy: LoadPolicy) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .user_agent(concat!("events-palour/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, policy })
    }

    /// Stylesheet, script and one tile per pin at `zoom`
    pub fn targets(
        assets: &MapAssets,
        pins: &[EventPin],
        zoom: u8,
    ) -> Result<Vec<ProbeTarget>, ProbeError> {
        let mut targets = vec![
            ProbeTarget {
                label: "stylesheet".to_string(),
                url: assets.stylesheet_href.clone(),
            },
            ProbeTarget {
                label: "script".to_string(),
                url: assets.script_src.clone(),
            },
        ];

        for pin in pins {
            let coord = TileCoord::containing(pin.position, zoom)?;
            targets.push(ProbeTarget {
                label: format!("tile {} ({})", coord, pin.name),
                url: assets.tiles.tile_url(coord)?,
            });
        }

        Ok(targets)
    }

    /// Check each target in turn
    pub async fn run(&self, targets: &[ProbeTarget]) -> Vec<ProbeReport> {
        let mut reports = Vec::with_capacity(targets.len());

        for target in targets {
            let source = HttpAsset {
                client: &self.client,
                target,
            };
            let loader = CapabilityLoader::new(source, TokioTimer, self.policy);

            let report = match loader.load().await {
                Ok(status) => {
                    tracing::info!(target = %target.label, status = status.status, "Asset reachable");
                    ProbeReport {
                        target: target.clone(),
                        ok: true,
                        status: Some(status),
                        error: None,
                    }
                }
                Err(e) => ProbeReport {
                    target: target.clone(),
                    ok: false,
                    status: None,
                    error: Some(e.to_string()),
                },
            };
            reports.push(report);
        }

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample::EVENT_PINS;
    use axum::{http::StatusCode, routing::get, Router};

    #[test]
    fn test_targets_cover_assets_and_pins() {
        let targets = AssetProbe::targets(&MapAssets::default(), &EVENT_PINS, 2).unwrap();

        assert_eq!(targets.len(), 5);
        assert_eq!(
            targets[0].url,
            "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
        );
        assert_eq!(targets[1].url, "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js");
        assert_eq!(targets[2].url, "https://c.tile.openstreetmap.org/2/1/1.png");
        assert!(targets[2].label.contains("Summer Music Festival"));
    }

    #[test]
    fn test_targets_reject_zoom_past_tile_limit() {
        let err = AssetProbe::targets(&MapAssets::default(), &EVENT_PINS, 25).unwrap_err();
        assert!(matches!(err, ProbeError::Target(_)));
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/ok.css", get(|| async { ([("content-type", "text/css")], "body {}") }))
            .route("/missing.js", get(|| async { StatusCode::NOT_FOUND }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_run_reports_each_target() {
        let base = spawn_server().await;
        let policy = LoadPolicy {
            timeout_ms: 2_000,
            max_attempts: 2,
            initial_backoff_ms: 1,
            max_backoff_ms: 1,
            multiplier: 2,
        };
        let probe = AssetProbe::new(policy).unwrap();
        let targets = vec![
            ProbeTarget {
                label: "stylesheet".to_string(),
                url: format!("{}/ok.css", base),
            },
            ProbeTarget {
                label: "script".to_string(),
                url: format!("{}/missing.js", base),
            },
        ];

        let reports = probe.run(&targets).await;

        assert!(reports[0].ok);
        let status = reports[0].status.as_ref().unwrap();
        assert_eq!(status.status, 200);
        assert_eq!(status.content_type.as_deref(), Some("text/css"));

        assert!(!reports[1].ok);
        let error = reports[1].error.as_ref().unwrap();
        assert!(error.contains("failed after 2 attempts"));
        assert!(error.contains("HTTP 404"));
    }
}
