//! News and live-score handlers
//!
//! `/news` reads through the shared TTL cache; `/scores` hits its feed
//! directly on every request, as live scores go stale in minutes. Both
//! degrade to an empty list rather than an error page.

use crate::AppState;
use axum::{extract::State, response::Json};
use pitchside_core::FeedItem;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// Number of news items served
const NEWS_LIMIT: usize = 8;
/// Number of live matches served
const SCORES_LIMIT: usize = 5;

/// News feed response
#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub news: Vec<FeedItem>,
}

/// One live match entry. The score feed carries no imagery, so captain
/// avatars are generated placeholders.
#[derive(Debug, Serialize)]
pub struct ScoreMatch {
    pub title: String,
    /// State of play as the feed reports it
    pub description: String,
    pub link: String,
    pub team1_img: String,
    pub team2_img: String,
}

/// Cached news feed endpoint
pub async fn news(State(state): State<AppState>) -> Json<NewsResponse> {
    let items = state
        .news_cache
        .get_items(&*state.feed_source, &state.config.news_feed_url, NEWS_LIMIT)
        .await;

    debug!(count = items.len(), "Serving news items");
    Json(NewsResponse { news: items })
}

/// Live cricket scores endpoint (uncached)
pub async fn scores(State(state): State<AppState>) -> Json<Value> {
    let matches = match state.feed_source.fetch(&state.config.scores_feed_url).await {
        Ok(mut items) => {
            items.truncate(SCORES_LIMIT);
            items.into_iter().map(to_score_match).collect::<Vec<_>>()
        }
        Err(e) => {
            e.log();
            Vec::new()
        }
    };

    Json(json!({ "matches": matches }))
}

fn to_score_match(item: FeedItem) -> ScoreMatch {
    ScoreMatch {
        title: item.title,
        description: item.description,
        link: item.link,
        team1_img: avatar_url("Captain 1"),
        team2_img: avatar_url("Captain 2"),
    }
}

fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random&color=fff",
        name.replace(' ', "+")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_url_is_query_safe() {
        let url = avatar_url("Captain 1");
        assert!(url.contains("name=Captain+1"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn score_match_carries_the_feed_description() {
        let entry = to_score_match(FeedItem {
            title: "AUS v ENG".into(),
            link: "https://example.com/m1".into(),
            published: String::new(),
            description: "AUS 310/4 (82 ov)".into(),
        });

        assert_eq!(entry.description, "AUS 310/4 (82 ov)");
        assert!(entry.team1_img.contains("Captain+1"));
        assert!(entry.team2_img.contains("Captain+2"));
    }
}
