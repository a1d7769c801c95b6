//! API endpoint configuration. The backend base URL comes from the
//! embedding environment; sensible localhost defaults keep development
//! running without any setup.

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_APP_BASE_URL: &str = "http://localhost:3000";

const ENV_API_BASE_URL: &str = "WORKFLOW_API_BASE_URL";
const ENV_APP_BASE_URL: &str = "WORKFLOW_APP_BASE_URL";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_base_url: String,
    app_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApiConfig {
    pub fn new(api_base_url: impl Into<String>, app_base_url: impl Into<String>) -> Self {
        ApiConfig {
            api_base_url: trim_trailing_slash(api_base_url.into()),
            app_base_url: trim_trailing_slash(app_base_url.into()),
        }
    }

    pub fn from_env() -> Self {
        let api = std::env::var(ENV_API_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let app = std::env::var(ENV_APP_BASE_URL)
            .unwrap_or_else(|_| DEFAULT_APP_BASE_URL.to_string());
        ApiConfig::new(api, app)
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// Public URL of a minted form trigger, served by the app frontend.
    pub fn form_url(&self, form_id: &str) -> String {
        format!("{}/forms/{}", self.app_base_url, form_id)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slashes() {
        let config = ApiConfig::new("https://api.example.com/", "https://app.example.com/");
        assert_eq!(
            config.api_url("/workflow/abc"),
            "https://api.example.com/workflow/abc"
        );
        assert_eq!(
            config.form_url("f-1"),
            "https://app.example.com/forms/f-1"
        );
    }
}
