use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct App {
    pub system: System,
    pub upstream: Upstream,
}

const SYSTEM_HOST: &str = "SYSTEM_HOST";
const SYSTEM_PORT: &str = "SYSTEM_PORT";
const SYSTEM_SERVICE_NAME: &str = "SYSTEM_SERVICE_NAME";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct System {
    pub host: String,
    pub port: u16,
    /// `GET /` 回報的服務名稱
    pub service_name: String,
}

impl Default for System {
    fn default() -> Self {
        System {
            host: "0.0.0.0".to_string(),
            port: 8000,
            service_name: "gold_quote".to_string(),
        }
    }
}

const UPSTREAM_NAME: &str = "UPSTREAM_NAME";
const UPSTREAM_URL: &str = "UPSTREAM_URL";
const UPSTREAM_SYMBOL: &str = "UPSTREAM_SYMBOL";
const UPSTREAM_USER_AGENT: &str = "UPSTREAM_USER_AGENT";
const UPSTREAM_ACCEPT_LANGUAGE: &str = "UPSTREAM_ACCEPT_LANGUAGE";
const UPSTREAM_ACCEPT: &str = "UPSTREAM_ACCEPT";
const UPSTREAM_TIMEOUT_MS: &str = "UPSTREAM_TIMEOUT_MS";
const UPSTREAM_CONNECT_TIMEOUT_MS: &str = "UPSTREAM_CONNECT_TIMEOUT_MS";

/// 報價來源網站的連線設定
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Upstream {
    /// 錯誤訊息中顯示的來源名稱
    pub name: String,
    pub url: String,
    pub symbol: String,
    pub user_agent: String,
    pub accept_language: String,
    pub accept: String,
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for Upstream {
    fn default() -> Self {
        Upstream {
            name: "investing.com".to_string(),
            url: "https://th.investing.com/commodities/gold".to_string(),
            symbol: "XAUUSD".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.6943.60 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8".to_string(),
            timeout_ms: 15_000,
            connect_timeout_ms: 8_000,
        }
    }
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| {
    App::get().unwrap_or_else(|why| {
        logging::error_file_async(format!(
            "I can't read the config context because {:?}",
            why
        ));
        App::default().override_with_env()
    })
});

impl App {
    pub fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::default().override_with_env())
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(self) -> Self {
        self.override_with(|key| env::var(key).ok())
    }

    fn override_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(SYSTEM_HOST) {
            self.system.host = host;
        }

        if let Some(port) = lookup(SYSTEM_PORT) {
            self.system.port = parse_or_keep(SYSTEM_PORT, &port, self.system.port);
        }

        if let Some(service_name) = lookup(SYSTEM_SERVICE_NAME) {
            self.system.service_name = service_name;
        }

        if let Some(name) = lookup(UPSTREAM_NAME) {
            self.upstream.name = name;
        }

        if let Some(url) = lookup(UPSTREAM_URL) {
            self.upstream.url = url;
        }

        if let Some(symbol) = lookup(UPSTREAM_SYMBOL) {
            self.upstream.symbol = symbol;
        }

        if let Some(user_agent) = lookup(UPSTREAM_USER_AGENT) {
            self.upstream.user_agent = user_agent;
        }

        if let Some(accept_language) = lookup(UPSTREAM_ACCEPT_LANGUAGE) {
            self.upstream.accept_language = accept_language;
        }

        if let Some(accept) = lookup(UPSTREAM_ACCEPT) {
            self.upstream.accept = accept;
        }

        if let Some(timeout) = lookup(UPSTREAM_TIMEOUT_MS) {
            self.upstream.timeout_ms =
                parse_or_keep(UPSTREAM_TIMEOUT_MS, &timeout, self.upstream.timeout_ms);
        }

        if let Some(timeout) = lookup(UPSTREAM_CONNECT_TIMEOUT_MS) {
            self.upstream.connect_timeout_ms = parse_or_keep(
                UPSTREAM_CONNECT_TIMEOUT_MS,
                &timeout,
                self.upstream.connect_timeout_ms,
            );
        }

        self
    }
}

/// 無法解析時保留原本的值並記錄下來
fn parse_or_keep<T: FromStr + Copy>(key: &str, value: &str, current: T) -> T {
    match T::from_str(value.trim()) {
        Ok(v) => v,
        Err(_) => {
            logging::warn_file_async(format!("Ignore {}={} because it is not a number", key, value));
            current
        }
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default() {
        let app = App::default();
        assert_eq!(app.system.port, 8000);
        assert_eq!(app.upstream.symbol, "XAUUSD");
        assert_eq!(app.upstream.url, "https://th.investing.com/commodities/gold");
        assert_eq!(app.upstream.timeout_ms, 15_000);
        assert!(app.upstream.user_agent.starts_with("Mozilla/5.0 (Windows NT 10.0"));
    }

    #[test]
    fn test_override_with() {
        let env: HashMap<&str, &str> = HashMap::from([
            (SYSTEM_PORT, "9000"),
            (UPSTREAM_URL, "http://127.0.0.1:3000/gold"),
            (UPSTREAM_TIMEOUT_MS, "not-a-number"),
            (UPSTREAM_CONNECT_TIMEOUT_MS, " 500 "),
        ]);
        let app = App::default().override_with(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(app.system.port, 9000);
        assert_eq!(app.system.host, "0.0.0.0");
        assert_eq!(app.upstream.url, "http://127.0.0.1:3000/gold");
        assert_eq!(app.upstream.timeout_ms, 15_000);
        assert_eq!(app.upstream.connect_timeout_ms, 500);
    }

    #[test]
    fn test_partial_json() {
        let app: App = serde_json::from_str(r#"{"upstream":{"symbol":"GOLD"}}"#).unwrap();
        assert_eq!(app.upstream.symbol, "GOLD");
        assert_eq!(app.upstream.name, "investing.com");
        assert_eq!(app.system.service_name, "gold_quote");
    }
}
