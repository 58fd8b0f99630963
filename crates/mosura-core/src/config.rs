use std::{env, fs, path::Path, time::Duration};

use reqwest::Url;

use crate::{errors::Error, http::RetryPolicy, Result};

const DEFAULT_API_URL: &str = "https://graphql.anilist.co";
const DEFAULT_LANGUAGES: &str = "en,pt,es";

/// Typed configuration, loaded from the environment (plus `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,

    /// Base URL all AniList requests are resolved against.
    pub api_url: Url,
    /// Cumulative wall-clock budget for transport-level retries.
    pub retry_budget: Duration,
    /// Per-attempt transport timeout, so one slow attempt cannot eat the
    /// whole retry budget.
    pub request_timeout: Duration,

    /// Items per pagination page.
    pub page_size: usize,

    /// Language codes offered by `/language`; the first one is the default.
    pub available_languages: Vec<String>,
    pub default_language: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let api_url_raw = env_str("ANILIST_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url_raw)
            .map_err(|e| Error::Config(format!("invalid ANILIST_API_URL {api_url_raw:?}: {e}")))?;

        let retry_budget = Duration::from_secs(env_u64("RETRY_BUDGET_SECS").unwrap_or(60));
        let request_timeout = Duration::from_secs(env_u64("REQUEST_TIMEOUT_SECS").unwrap_or(30));
        let page_size = env_usize("PAGE_SIZE").unwrap_or(8).max(1);

        let mut available_languages = parse_csv_lower(
            env_str("AVAILABLE_LANGUAGES").or_else(|| Some(DEFAULT_LANGUAGES.to_string())),
        );
        if available_languages.is_empty() {
            available_languages = parse_csv_lower(Some(DEFAULT_LANGUAGES.to_string()));
        }
        let default_language = available_languages[0].clone();

        Ok(Self {
            bot_token,
            api_url,
            retry_budget,
            request_timeout,
            page_size,
            available_languages,
            default_language,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_budget(self.retry_budget)
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn parse_csv_lower(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_parsing_lowercases_and_skips_blanks() {
        let langs = parse_csv_lower(Some("EN, pt ,, es".to_string()));
        assert_eq!(langs, vec!["en", "pt", "es"]);
        assert!(parse_csv_lower(None).is_empty());
    }

    #[test]
    fn dotenv_sets_only_missing_vars() {
        let path = std::path::PathBuf::from(format!(
            "/tmp/mosura-dotenv-{}.env",
            std::process::id()
        ));
        std::fs::write(&path, "MOSURA_TEST_NEW=\"quoted\"\n# comment\nPATH=ignored\n").unwrap();

        load_dotenv_if_present(&path);
        assert_eq!(env::var("MOSURA_TEST_NEW").unwrap(), "quoted");
        assert_ne!(env::var("PATH").unwrap(), "ignored");

        env::remove_var("MOSURA_TEST_NEW");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn non_empty_filters_whitespace() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("x".to_string()).as_deref(), Some("x"));
    }
}
