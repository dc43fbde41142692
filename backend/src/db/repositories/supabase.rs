//! Supabase repository implementation.
//!
//! Talks to the project's PostgREST endpoint (`{url}/rest/v1/{table}`)
//! with the service-role key. Row-level security is bypassed by that key, so
//! every query filters on `user_id` explicitly.

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::api::JournalLogRecord;
use crate::config::StoreSettings;
use crate::db::models::StoredJournalLog;
use crate::db::repository::{ErrorContext, JournalRepository, RepositoryError, RepositoryResult};
use crate::services::build_http_client;

/// Supabase connection parameters.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub url: String,
    pub service_key: String,
    pub table: String,
    pub timeout_secs: Option<u64>,
}

impl SupabaseConfig {
    /// Build from store settings plus the service-role key.
    pub fn from_settings(
        settings: &StoreSettings,
        service_key: impl Into<String>,
    ) -> RepositoryResult<Self> {
        let url = settings
            .url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                RepositoryError::configuration(
                    "Supabase repository requires SUPABASE_URL; \
                     set REPOSITORY_TYPE=local for the in-memory store",
                )
            })?;

        Ok(Self {
            url,
            service_key: service_key.into(),
            table: settings.table.clone(),
            timeout_secs: settings.timeout_secs,
        })
    }
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("table", &self.table)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// Journal repository backed by a Supabase table.
pub struct SupabaseRepository {
    client: Client,
    table_url: String,
    table: String,
    service_key: String,
}

impl SupabaseRepository {
    pub fn new(config: &SupabaseConfig) -> RepositoryResult<Self> {
        let client = build_http_client(config.timeout_secs).map_err(|e| {
            RepositoryError::configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            table_url: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            table: config.table.clone(),
            service_key: config.service_key.clone(),
        })
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Turn a non-2xx response into a query error carrying the body.
    async fn check_status(
        &self,
        response: Response,
        operation: &str,
    ) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<empty response>".to_string());
        Err(RepositoryError::query_with_context(
            format!("Store returned {}", status),
            ErrorContext::new(operation)
                .with_table(self.table.clone())
                .with_status(status.as_u16())
                .with_details(body.trim().to_string()),
        ))
    }
}

#[async_trait]
impl JournalRepository for SupabaseRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let response = self
            .authorized(self.client.get(&self.table_url))
            .query(&[("select", "user_id"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("health_check"))?;

        Ok(response.status().is_success())
    }

    async fn insert_journal_log(&self, record: &JournalLogRecord) -> RepositoryResult<()> {
        let response = self
            .authorized(self.client.post(&self.table_url))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| {
                RepositoryError::from(e)
                    .with_operation("insert_journal_log")
                    .with_table(self.table.clone())
            })?;

        self.check_status(response, "insert_journal_log").await?;
        Ok(())
    }

    async fn list_journal_logs(&self, user_id: &str) -> RepositoryResult<Vec<StoredJournalLog>> {
        let user_filter = format!("eq.{}", user_id);
        let response = self
            .authorized(self.client.get(&self.table_url))
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await
            .map_err(|e| {
                RepositoryError::from(e)
                    .with_operation("list_journal_logs")
                    .with_table(self.table.clone())
            })?;

        let response = self.check_status(response, "list_journal_logs").await?;
        let body = response.text().await?;
        let logs: Vec<StoredJournalLog> = serde_json::from_str(&body)?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: Option<&str>) -> StoreSettings {
        StoreSettings {
            url: url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_requires_url() {
        let err = SupabaseConfig::from_settings(&settings(None), "key").unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));

        let err = SupabaseConfig::from_settings(&settings(Some("  ")), "key").unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }

    #[test]
    fn test_table_url() {
        let settings = settings(Some("https://abc.supabase.co/"));
        let config = SupabaseConfig::from_settings(&settings, "key").unwrap();
        let repo = SupabaseRepository::new(&config).unwrap();
        assert_eq!(repo.table_url(), "https://abc.supabase.co/rest/v1/journal_logs");
    }

    #[test]
    fn test_config_debug_hides_key() {
        let settings = settings(Some("https://abc.supabase.co"));
        let config = SupabaseConfig::from_settings(&settings, "super-secret").unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
