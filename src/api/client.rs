//! HTTP client for the statistics compute API

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{ApiError, ApiResult};
use crate::models::{HistComputeResponse, HistPlayerStatsResponse};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Season used when the previous season is not a positive year
pub const FALLBACK_SEASON: i64 = 2020;

/// Team/season/replaced-player triple behind a rankings request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComputeTarget {
    pub team_name: String,
    pub season_year: i64,
    pub player_id: i64,
}

/// Comparison player lookup for the breakdown screen
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerStatsTarget {
    pub player_name: String,
    pub prev_team_name: String,
    /// Season the comparison was computed for; stats come from the one before
    pub season_year: i64,
}

/// The API expects underscores instead of spaces in names
pub fn api_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

pub fn comparison_season(season_year: i64) -> i64 {
    match season_year - 1 {
        prev if prev > 0 => prev,
        _ => FALLBACK_SEASON,
    }
}

#[derive(Debug, Clone)]
pub struct ComputeClient {
    http: Client,
    base_url: Url,
}

impl ComputeClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::Url(format!("{base_url}: {e}")))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn hist_compute_url(&self, target: &ComputeTarget) -> ApiResult<Url> {
        let mut url = self.endpoint("histcompute")?;
        url.query_pairs_mut()
            .append_pair("team_name", &api_name(&target.team_name))
            .append_pair("season_year", &target.season_year.to_string())
            .append_pair("player_id_to_replace", &target.player_id.to_string());
        Ok(url)
    }

    pub fn hist_player_stats_url(&self, target: &PlayerStatsTarget) -> ApiResult<Url> {
        let mut url = self.endpoint("histplayerstats")?;
        url.query_pairs_mut()
            .append_pair("player_name", &api_name(&target.player_name))
            .append_pair("prev_team_name", &api_name(&target.prev_team_name))
            .append_pair("season_year", &comparison_season(target.season_year).to_string());
        Ok(url)
    }

    pub async fn hist_compute(&self, target: &ComputeTarget) -> ApiResult<HistComputeResponse> {
        let url = self.hist_compute_url(target)?;
        self.get_json(url).await
    }

    pub async fn hist_player_stats(&self, target: &PlayerStatsTarget) -> ApiResult<HistPlayerStatsResponse> {
        let url = self.hist_player_stats_url(target)?;
        self.get_json(url).await
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let mut base = self.base_url.clone();
        // Keep any path prefix on the base URL
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        base.join(path).map_err(|e| ApiError::Url(format!("{path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        tracing::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Compute API returned {}", status);
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ComputeClient {
        ComputeClient::new(base, Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(api_name("North Carolina State"), "North_Carolina_State");
        assert_eq!(api_name("Duke"), "Duke");
    }

    #[test]
    fn comparison_season_falls_back() {
        assert_eq!(comparison_season(2024), 2023);
        assert_eq!(comparison_season(1), FALLBACK_SEASON);
        assert_eq!(comparison_season(0), FALLBACK_SEASON);
    }

    #[test]
    fn builds_compute_url() {
        let url = client(DEFAULT_BASE_URL)
            .hist_compute_url(&ComputeTarget {
                team_name: "Saint Marys".into(),
                season_year: 2024,
                player_id: 4521,
            })
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/histcompute?team_name=Saint_Marys&season_year=2024&player_id_to_replace=4521"
        );
    }

    #[test]
    fn builds_player_stats_url_with_previous_season() {
        let url = client("http://stats.local/api")
            .hist_player_stats_url(&PlayerStatsTarget {
                player_name: "Caleb Love".into(),
                prev_team_name: "Arizona".into(),
                season_year: 2025,
            })
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://stats.local/api/histplayerstats?player_name=Caleb_Love&prev_team_name=Arizona&season_year=2024"
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(matches!(
            ComputeClient::new("not a url", Duration::from_secs(1)),
            Err(ApiError::Url(_))
        ));
    }
}
