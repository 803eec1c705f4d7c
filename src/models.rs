//! Typed response payloads.
//!
//! The upstream schema is loose: most fields may be missing or `null` depending
//! on whether a match was parsed, a profile is public, and so on. Models
//! therefore keep identifiers required and everything else optional, and
//! collect unknown fields in `extra` where the payload is large.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single match, as returned by `/matches/{match_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: u64,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub radiant_win: Option<bool>,
    #[serde(default)]
    pub radiant_score: Option<u32>,
    #[serde(default)]
    pub dire_score: Option<u32>,
    #[serde(default)]
    pub game_mode: Option<u32>,
    #[serde(default)]
    pub lobby_type: Option<u32>,
    #[serde(default)]
    pub players: Vec<Value>,
    /// Fields not modelled explicitly.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A player summary, as returned by `/players/{account_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub rank_tier: Option<u32>,
    #[serde(default)]
    pub leaderboard_rank: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Steam profile details of a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub account_id: u64,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plus: Option<bool>,
    #[serde(default)]
    pub avatarfull: Option<String>,
    #[serde(default)]
    pub profileurl: Option<String>,
    #[serde(default)]
    pub loccountrycode: Option<String>,
}

/// Win/loss totals for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    pub win: u32,
    pub lose: u32,
}

/// Static hero data, as returned by `/heroes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub localized_name: String,
    #[serde(default)]
    pub primary_attr: Option<String>,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Hero performance against another hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroMatchup {
    pub hero_id: u32,
    pub games_played: u32,
    pub wins: u32,
}

/// Hero performance bucketed by match duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDuration {
    pub duration_bin: u32,
    pub games_played: u32,
    pub wins: u32,
}

/// A professional player listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProPlayer {
    pub account_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_tag: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub is_pro: Option<bool>,
}

/// A professional match listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProMatch {
    pub match_id: u64,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub radiant_team_id: Option<u64>,
    #[serde(default)]
    pub radiant_name: Option<String>,
    #[serde(default)]
    pub dire_team_id: Option<u64>,
    #[serde(default)]
    pub dire_name: Option<String>,
    #[serde(default)]
    pub leagueid: Option<u64>,
    #[serde(default)]
    pub league_name: Option<String>,
    #[serde(default)]
    pub radiant_win: Option<bool>,
}

/// A public match listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicMatch {
    pub match_id: u64,
    #[serde(default)]
    pub match_seq_num: Option<u64>,
    #[serde(default)]
    pub radiant_win: Option<bool>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub avg_rank_tier: Option<f64>,
    #[serde(default)]
    pub lobby_type: Option<u32>,
    #[serde(default)]
    pub game_mode: Option<u32>,
    #[serde(default)]
    pub radiant_team: Vec<u32>,
    #[serde(default)]
    pub dire_team: Vec<u32>,
}

/// A team, as returned by `/teams`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub last_match_time: Option<i64>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A player who has played for a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPlayer {
    pub account_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub games_played: Option<u32>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub is_current_team_member: Option<bool>,
}

/// A match played by a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMatch {
    pub match_id: u64,
    #[serde(default)]
    pub radiant: Option<bool>,
    #[serde(default)]
    pub radiant_win: Option<bool>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub leagueid: Option<u64>,
    #[serde(default)]
    pub league_name: Option<String>,
    #[serde(default)]
    pub opposing_team_id: Option<u64>,
    #[serde(default)]
    pub opposing_team_name: Option<String>,
}

/// A hero played by a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHero {
    pub hero_id: u32,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub games_played: Option<u32>,
    #[serde(default)]
    pub wins: Option<u32>,
}

/// A league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub leagueid: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
}

/// A player search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub account_id: u64,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub avatarfull: Option<String>,
    #[serde(default)]
    pub last_match_time: Option<String>,
    #[serde(default)]
    pub similarity: Option<f64>,
}

/// Result of an explorer SQL query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerResult {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(rename = "rowCount", default)]
    pub row_count: u64,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub fields: Vec<ExplorerField>,
    #[serde(default)]
    pub err: Option<String>,
}

/// Column description of an explorer result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerField {
    pub name: String,
    #[serde(rename = "dataTypeID", default)]
    pub data_type_id: Option<u32>,
}

/// A record entry, as returned by `/records/{field}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub match_id: u64,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub hero_id: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Top players of a hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroRankings {
    pub hero_id: u32,
    #[serde(default)]
    pub rankings: Vec<Value>,
}

/// Performance percentiles of a hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroBenchmarks {
    pub hero_id: u32,
    #[serde(default)]
    pub result: Map<String, Value>,
}
