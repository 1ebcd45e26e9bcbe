/// Daily limit applied when DAILY_VOTE_LIMIT is unset or unparseable.
pub const DEFAULT_DAILY_VOTE_LIMIT: i64 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub daily_vote_limit: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            daily_vote_limit: parse_limit(dotenv::var("DAILY_VOTE_LIMIT").ok()),
        }
    }
}

fn parse_limit(raw: Option<String>) -> i64 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_DAILY_VOTE_LIMIT)
}
