use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent on every outbound request, e.g. `survey-notify/0.1.0`
pub fn user_agent() -> String {
    format!("survey-notify/{}", crate::pkg_version())
}

/// Global HTTP client instance
///
/// Initialized lazily on first access and reused across the application so
/// every provider call shares one connection pool.
///
/// # Features
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// use survey_notify::external::client::HTTP_CLIENT;
///
/// async fn fetch_data() -> Result<String, reqwest::Error> {
///     HTTP_CLIENT.get("https://api.example.com/data").send().await?.text().await
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    build_client().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build tuned HTTP client, using defaults");
        reqwest::Client::new()
    })
});

fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .user_agent(user_agent())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        let _ = &*HTTP_CLIENT;
    }

    #[test]
    fn test_user_agent_carries_version() {
        assert_eq!(
            user_agent(),
            format!("survey-notify/{}", crate::pkg_version())
        );
    }

    #[test]
    fn test_build_client_succeeds() {
        assert!(build_client().is_ok());
    }
}
