//! YTS movie catalogue API client module.
//!
//! Looks up parsed titles on YTS so duplicate grouping can merge
//! cosmetically different folder names for the same movie.
//!
//! Documentation:
//! <https://yts.mx/api>

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use regex::Regex;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::normalize::TitleNormalizer;
use crate::print_warning;

static RE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[._]+").expect("Invalid separator regex"));

/// YTS API client used as a title normalizer for duplicate grouping.
#[derive(Debug)]
pub struct YtsNormalizer {
    client: Client,
    base_url: String,
}

/// Response envelope from the YTS `list_movies` endpoint.
#[derive(Debug, Deserialize)]
struct ListMoviesResponse {
    status: String,
    data: Option<MovieData>,
}

#[derive(Debug, Deserialize)]
struct MovieData {
    movies: Option<Vec<Movie>>,
}

/// Movie entry from the YTS API, reduced to the fields used here.
#[derive(Debug, Deserialize)]
struct Movie {
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: u16,
}

impl YtsNormalizer {
    /// Create a new YTS client with the given per-request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: "https://yts.mx".to_string(),
        }
    }

    /// Search the catalogue and pick the best match for a title and year.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be parsed.
    fn lookup(&self, title: &str, year: Option<u16>) -> Result<Option<(String, Option<u16>)>> {
        let url = self.build_url("list_movies.json");
        let query_term = build_query(title, year);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query_term", query_term.as_str()),
                ("limit", "10"),
                ("sort_by", "year"),
                ("order_by", "desc"),
            ])
            .send()
            .context("Failed to send list movies request")?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!("Movie lookup failed: HTTP {status}");
        }

        let body: ListMoviesResponse = response.json().context("Failed to parse list movies JSON")?;
        Ok(best_match(body, year))
    }

    /// Build full API url from the base url and given endpoint.
    fn build_url(&self, url: &str) -> String {
        format!("{}/api/v2/{url}", self.base_url)
    }
}

impl TitleNormalizer for YtsNormalizer {
    /// Lookup failures and misses fall back to the input unchanged,
    /// so a flaky network can never fail the scan.
    fn normalize(&self, title: &str, year: Option<u16>) -> (String, Option<u16>) {
        match self.lookup(title, year) {
            Ok(Some(matched)) => matched,
            Ok(None) => (title.to_string(), year),
            Err(error) => {
                print_warning!("Lookup failed for '{title}': {error}");
                (title.to_string(), year)
            }
        }
    }
}

/// Query string sent to the API: sanitized title plus year when known.
fn build_query(title: &str, year: Option<u16>) -> String {
    let title = RE_SEPARATORS.replace_all(title, " ").trim().to_string();
    match year {
        Some(year) => format!("{title} {year}"),
        None => title,
    }
}

/// Pick the best search result: first exact year match when a year was
/// queried, otherwise the first returned movie. A zero year from the API
/// counts as unknown.
fn best_match(response: ListMoviesResponse, year: Option<u16>) -> Option<(String, Option<u16>)> {
    if response.status != "ok" {
        return None;
    }
    let movies = response.data.and_then(|data| data.movies).unwrap_or_default();
    let index = year
        .and_then(|wanted| movies.iter().position(|movie| movie.year == wanted))
        .unwrap_or(0);
    let movie = movies.into_iter().nth(index)?;
    let year = (movie.year != 0).then_some(movie.year);
    Some((movie.title, year))
}
