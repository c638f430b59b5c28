const DEFAULT_API_BASE_URL: &str = "http://localhost:8888";
const API_BASE_META: &str = "meta[name=\"expense-api-base\"]";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: log::Level::Info,
        }
    }
}

impl AppConfig {
    /// Resolves the configuration once, at startup.
    ///
    /// The base address comes from the host page's `expense-api-base` meta
    /// tag, then the `EXPENSE_API_BASE_URL` build variable, then the default.
    pub fn resolve() -> Self {
        Self::from_sources(
            meta_api_base(),
            option_env!("EXPENSE_API_BASE_URL"),
            option_env!("EXPENSE_LOG_LEVEL"),
        )
    }

    fn from_sources(meta: Option<String>, build_env: Option<&str>, level: Option<&str>) -> Self {
        let defaults = Self::default();
        let api_base_url = meta
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                build_env
                    .filter(|url| !url.trim().is_empty())
                    .map(str::to_string)
            })
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let log_level = level
            .and_then(|raw| raw.trim().parse::<log::Level>().ok())
            .unwrap_or(defaults.log_level);
        Self {
            api_base_url,
            log_level,
        }
    }
}

fn meta_api_base() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document.query_selector(API_BASE_META).ok().flatten()?;
    meta.get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, "http://localhost:8888")]
    #[case(None, Some("https://api.example.com/"), "https://api.example.com")]
    #[case(Some("http://meta.local:9000/".to_string()), Some("https://api.example.com"), "http://meta.local:9000")]
    #[case(Some("  ".to_string()), Some("https://api.example.com"), "https://api.example.com")]
    fn base_url_precedence(
        #[case] meta: Option<String>,
        #[case] build_env: Option<&str>,
        #[case] expected: &str,
    ) {
        let config = AppConfig::from_sources(meta, build_env, None);
        assert_eq!(config.api_base_url, expected);
    }

    #[rstest]
    #[case(Some("debug"), log::Level::Debug)]
    #[case(Some("WARN"), log::Level::Warn)]
    #[case(Some("loud"), log::Level::Info)]
    #[case(None, log::Level::Info)]
    fn log_level_parsing(#[case] raw: Option<&str>, #[case] expected: log::Level) {
        assert_eq!(AppConfig::from_sources(None, None, raw).log_level, expected);
    }
}
