//! stats.nba.com REST adapter (native Rust, no external SDK dependency).
//!
//! The stats API wraps every endpoint in the same envelope: a list of
//! `resultSets`, each carrying a `headers` array and a `rowSet` of
//! heterogeneous JSON values. Columns are resolved by header name, never
//! by position.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{Player, RawGameRow};
use crate::error::{Result, SwishError};

const DEFAULT_STATS_API_BASE: &str = "https://stats.nba.com/stats";

/// Browser-like UA; stats.nba.com rejects requests without one.
const STATS_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// One result set from the stats API envelope.
#[derive(Debug, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Index of a column by header name, case-insensitive. The API mixes
    /// casings across endpoints ("PLAYER_ID" vs "Player_ID").
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                SwishError::Api(format!("column {} missing from result set {}", name, self.name))
            })
    }
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

impl StatsResponse {
    fn first_set(self, endpoint: &str) -> Result<ResultSet> {
        self.result_sets
            .into_iter()
            .next()
            .ok_or_else(|| SwishError::Api(format!("{} returned no result sets", endpoint)))
    }
}

/// Abstraction over game-log retrieval so the pipeline can run against a
/// stub in tests. One network request per call; failures are not retried.
#[async_trait]
pub trait GameLogSource {
    /// All player game-log rows league-wide for one season.
    async fn league_game_log(&self, season: &str) -> Result<Vec<RawGameRow>>;

    /// One player's game-log rows for one season. May be empty.
    async fn player_game_log(&self, player: &Player, season: &str) -> Result<Vec<RawGameRow>>;

    /// Directory of currently active players.
    async fn active_players(&self) -> Result<Vec<Player>>;
}

/// HTTP client for the public stats API.
#[derive(Clone)]
pub struct NbaStatsClient {
    http: Client,
    base_url: String,
    season_type: String,
    /// Season the roster endpoint is queried against.
    roster_season: String,
}

impl NbaStatsClient {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let base_url = base_url
            .unwrap_or(DEFAULT_STATS_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(STATS_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, HeaderValue::from_static("https://stats.nba.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://stats.nba.com"));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SwishError::Api(format!("failed to build stats HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            season_type: "Regular Season".to_string(),
            roster_season: String::new(),
        })
    }

    /// Season label the active-player directory is resolved for,
    /// normally the most recent configured season.
    pub fn with_roster_season(mut self, season: &str) -> Self {
        self.roster_season = season.to_string();
        self
    }

    async fn get_result_set(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<ResultSet> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SwishError::Api(format!("{} returned {}", endpoint, status)));
        }

        let body: StatsResponse = response.json().await?;
        body.first_set(endpoint)
    }

    fn parse_log_rows(
        set: &ResultSet,
        season: &str,
        player: Option<&Player>,
    ) -> Result<Vec<RawGameRow>> {
        let id_col = set.column("PLAYER_ID")?;
        // League log carries a name column; the per-player endpoint does not.
        let name_col = match player {
            Some(_) => None,
            None => Some(set.column("PLAYER_NAME")?),
        };
        let date_col = set.column("GAME_DATE")?;
        let min_col = set.column("MIN")?;
        let pts_col = set.column("PTS")?;

        let mut rows = Vec::with_capacity(set.row_set.len());
        for row in &set.row_set {
            let player_id = match player {
                Some(p) => p.id,
                None => value_as_i64(row.get(id_col)).ok_or_else(|| {
                    SwishError::Api(format!("non-numeric PLAYER_ID in {}", set.name))
                })?,
            };
            let player_name = match (player, name_col) {
                (Some(p), _) => p.name.clone(),
                (None, Some(col)) => value_as_string(row.get(col)),
                (None, None) => String::new(),
            };

            rows.push(RawGameRow {
                player_id,
                player_name,
                season: season.to_string(),
                game_date: value_as_string(row.get(date_col)),
                minutes: row.get(min_col).cloned().unwrap_or(Value::Null),
                points: row.get(pts_col).cloned().unwrap_or(Value::Null),
            });
        }
        Ok(rows)
    }
}

#[async_trait]
impl GameLogSource for NbaStatsClient {
    async fn league_game_log(&self, season: &str) -> Result<Vec<RawGameRow>> {
        let set = self
            .get_result_set(
                "leaguegamelog",
                &[
                    ("LeagueID", "00"),
                    ("Season", season),
                    ("SeasonType", &self.season_type),
                    // P = player logs (as opposed to team logs)
                    ("PlayerOrTeam", "P"),
                    ("Sorter", "DATE"),
                    ("Direction", "ASC"),
                    ("Counter", "1000"),
                    ("DateFrom", ""),
                    ("DateTo", ""),
                ],
            )
            .await?;

        let rows = Self::parse_log_rows(&set, season, None)?;
        debug!("league log {}: {} rows", season, rows.len());
        Ok(rows)
    }

    async fn player_game_log(&self, player: &Player, season: &str) -> Result<Vec<RawGameRow>> {
        let set = self
            .get_result_set(
                "playergamelog",
                &[
                    ("PlayerID", &player.id.to_string()),
                    ("Season", season),
                    ("SeasonType", &self.season_type),
                    ("DateFrom", ""),
                    ("DateTo", ""),
                ],
            )
            .await?;

        let rows = Self::parse_log_rows(&set, season, Some(player))?;
        debug!("player log {} {}: {} rows", player.name, season, rows.len());
        Ok(rows)
    }

    async fn active_players(&self) -> Result<Vec<Player>> {
        let set = self
            .get_result_set(
                "commonallplayers",
                &[
                    ("LeagueID", "00"),
                    ("IsOnlyCurrentSeason", "1"),
                    ("Season", &self.roster_season),
                ],
            )
            .await?;

        let id_col = set.column("PERSON_ID")?;
        let name_col = set.column("DISPLAY_FIRST_LAST")?;
        let status_col = set.column("ROSTERSTATUS")?;

        let mut players = Vec::new();
        for row in &set.row_set {
            if value_as_i64(row.get(status_col)) != Some(1) {
                continue;
            }
            let id = match value_as_i64(row.get(id_col)) {
                Some(id) => id,
                None => continue,
            };
            players.push(Player {
                id,
                name: value_as_string(row.get(name_col)),
            });
        }
        debug!("active players: {}", players.len());
        Ok(players)
    }
}

fn value_as_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
