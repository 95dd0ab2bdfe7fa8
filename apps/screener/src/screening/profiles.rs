//! Profile enrichment — finds LinkedIn / GitHub links in resume text and
//! verifies GitHub accounts against the public REST API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::screening::patterns::{GITHUB_URL_PATTERN, LINKEDIN_URL_PATTERN};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileLinks {
    pub linkedin: Vec<String>,
    pub github: Vec<String>,
}

/// Full profile URLs in order of first appearance, without duplicates.
pub fn extract_profile_links(text: &str) -> ProfileLinks {
    let collect = |pattern: &regex::Regex| {
        let mut urls: Vec<String> = Vec::new();
        for m in pattern.find_iter(text) {
            if !urls.iter().any(|u| u == m.as_str()) {
                urls.push(m.as_str().to_string());
            }
        }
        urls
    };

    ProfileLinks {
        linkedin: collect(&*LINKEDIN_URL_PATTERN),
        github: collect(&*GITHUB_URL_PATTERN),
    }
}

fn username_from_url(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedinProfile {
    pub url: String,
    pub username: String,
    /// LinkedIn has no public profile API, so this is always false.
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubProfile {
    pub url: String,
    pub username: String,
    pub name: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileEnrichment {
    pub linkedin_profiles: Vec<LinkedinProfile>,
    /// Only accounts the GitHub API confirmed.
    pub github_profiles: Vec<GithubProfile>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    name: Option<String>,
    public_repos: Option<u64>,
    followers: Option<u64>,
    following: Option<u64>,
    bio: Option<String>,
}

#[derive(Clone)]
pub struct ProfileVerifier {
    client: Client,
    github_api_url: String,
}

impl ProfileVerifier {
    pub fn new(github_api_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent(USER_AGENT)
                .build()?,
            github_api_url: github_api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn enrich(&self, text: &str) -> ProfileEnrichment {
        let links = extract_profile_links(text);

        let linkedin_profiles = links
            .linkedin
            .iter()
            .map(|url| LinkedinProfile {
                url: url.clone(),
                username: username_from_url(url).to_string(),
                verified: false,
            })
            .collect();

        let mut github_profiles = Vec::new();
        for url in &links.github {
            if let Some(profile) = self.verify_github(url).await {
                github_profiles.push(profile);
            }
        }

        ProfileEnrichment {
            linkedin_profiles,
            github_profiles,
        }
    }

    /// `None` for anything but a 200 with a readable body.
    pub async fn verify_github(&self, url: &str) -> Option<GithubProfile> {
        let username = username_from_url(url);
        let api_url = format!("{}/users/{}", self.github_api_url, username);

        let response = match self.client.get(&api_url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("GitHub lookup for {username} failed: {e}");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!("GitHub lookup for {username} returned {}", response.status());
            return None;
        }

        let user: GithubUser = response
            .json()
            .await
            .map_err(|e| warn!("GitHub response for {username} unreadable: {e}"))
            .ok()?;

        Some(GithubProfile {
            url: url.to_string(),
            username: username.to_string(),
            name: user.name,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            bio: user.bio,
        })
    }
}
