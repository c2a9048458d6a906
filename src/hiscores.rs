/*
    The web front end should never query the hiscores directly. It only
    reads the cache artifacts this pipeline writes.
*/

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::settings::Settings;

pub mod skill;
pub mod stats;

#[derive(Error, Debug)]
pub enum HiscoresError {
    #[error("request to the hiscores failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("no hiscore entry for player {0}")]
    UnknownPlayer(String),
    #[error("hiscores returned an empty response")]
    EmptyResponse,
}

pub struct HiscoresClient {
    client: Client,
    url: String,
}

impl HiscoresClient {
    pub fn new(settings: &Settings) -> Result<HiscoresClient, HiscoresError> {
        let client = Client::builder()
            .user_agent(concat!("osrs_stats_rust/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(HiscoresClient {
            client,
            url: settings.hiscores_url.clone(),
        })
    }

    /// Fetches the raw positional stats body for one player. The player
    /// name goes into the query verbatim, reqwest handles the encoding.
    pub fn fetch_raw(&self, player: &str) -> Result<String, HiscoresError> {
        tracing::info!("Requesting hiscores for {}", player);

        let response = self
            .client
            .request(reqwest::Method::GET, &self.url)
            .query(&[("player", player)])
            .send()?;

        // The hiscores answer 404 for names they have never seen
        if !response.status().is_success() {
            return Err(HiscoresError::UnknownPlayer(player.to_string()));
        }

        let body = response.text()?;
        if body.trim().is_empty() {
            return Err(HiscoresError::EmptyResponse);
        }

        Ok(body)
    }
}
