//! # Hosted Table over HTTP
//!
//! A [`RemoteTable`] that talks to a PostgREST-style endpoint
//! (`{base}/rest/v1/{table}`) using [`reqwest`]. The access key is sent both
//! as the `apikey` header and as a bearer token.

use crate::framework::error::StoreError;
use crate::framework::remote::RemoteTable;
use crate::framework::row::TableRow;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, instrument, warn};

/// HTTP client for one hosted table.
pub struct RestTable<T> {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    _row: PhantomData<fn() -> T>,
}

impl<T: TableRow> RestTable<T> {
    /// Create a client for the project at `base_url`, e.g.
    /// `https://project.supabase.co`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            _row: PhantomData,
        }
    }

    /// Full URL of the table resource.
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), T::TABLE)
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.endpoint())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`StoreError::Api`] carrying the body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_rows(response: reqwest::Response) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let values = Self::ensure_success(response)
            .await?
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(decode_rows(values))
    }
}

/// Decodes rows one by one. A row that does not fit `T` is logged and
/// skipped so it cannot hide the rest of the table.
pub(crate) fn decode_rows<T: DeserializeOwned>(values: Vec<serde_json::Value>) -> Vec<T> {
    let total = values.len();
    let rows: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect();
    if rows.len() < total {
        warn!(skipped = total - rows.len(), total, "Some rows could not be read");
    }
    rows
}

/// `eq.` filter value for a single id.
pub(crate) fn eq_filter(id: &impl std::fmt::Display) -> String {
    format!("eq.{id}")
}

/// `in.(...)` filter value for an id set. Ids holding reserved characters are
/// double-quoted.
pub(crate) fn in_filter<I: std::fmt::Display>(ids: &[I]) -> String {
    let items: Vec<String> = ids
        .iter()
        .map(|id| {
            let raw = id.to_string();
            if raw
                .chars()
                .any(|c| matches!(c, ',' | '(' | ')' | '"' | '\\') || c.is_whitespace())
            {
                format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
            } else {
                raw
            }
        })
        .collect();
    format!("in.({})", items.join(","))
}

#[async_trait]
impl<T> RemoteTable<T> for RestTable<T>
where
    T: TableRow + DeserializeOwned,
    T::Insert: Serialize,
    T::Patch: Serialize,
{
    #[instrument(skip(self), fields(table = T::TABLE))]
    async fn select(&self, limit: Option<usize>) -> Result<Vec<T>, StoreError> {
        let mut request = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        debug!("Sending request");
        Self::parse_rows(request.send().await?).await
    }

    #[instrument(skip(self, rows), fields(table = T::TABLE, count = rows.len()))]
    async fn insert(&self, rows: Vec<T::Insert>) -> Result<Vec<T>, StoreError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Sending request");
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;
        Self::parse_rows(response).await
    }

    #[instrument(skip(self), fields(table = T::TABLE))]
    async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError> {
        debug!("Sending request");
        let response = self
            .request(Method::PATCH)
            .query(&[("id", eq_filter(&id))])
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        Self::parse_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    #[instrument(skip(self), fields(table = T::TABLE))]
    async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        debug!("Sending request");
        let response = self
            .request(Method::DELETE)
            .query(&[("id", eq_filter(&id))])
            .send()
            .await?;
        Self::ensure_success(response).await.map(|_| ())
    }

    #[instrument(skip(self), fields(table = T::TABLE))]
    async fn delete_many(&self, ids: Vec<T::Id>) -> Result<(), StoreError> {
        if ids.is_empty() {
            return Ok(());
        }
        debug!("Sending request");
        let response = self
            .request(Method::DELETE)
            .query(&[("id", in_filter(&ids))])
            .send()
            .await?;
        Self::ensure_success(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InventoryRow;
    use serde_json::json;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let table = RestTable::<InventoryRow>::new("https://placeholder.supabase.co/", "key");
        assert_eq!(
            table.endpoint(),
            "https://placeholder.supabase.co/rest/v1/inventory"
        );
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let rows: Vec<InventoryRow> = decode_rows(vec![
            json!({"id": 1, "category": "INK", "material": "Tinta"}),
            json!({"id": 2, "category": "FIBER", "material": null}),
            json!({"id": 3, "category": null, "material": "Caixa"}),
            json!({"id": 4, "category": "PAPER", "material": "Folha"}),
            json!({"category": "INK", "material": "Sem id"}),
        ]);

        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(rows[1].material, "");
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq_filter(&42), "eq.42");
    }

    #[test]
    fn test_in_filter_quotes_reserved_characters() {
        assert_eq!(in_filter(&["1", "2"]), "in.(1,2)");
        assert_eq!(in_filter(&["a,b", "c"]), "in.(\"a,b\",c)");
        assert_eq!(in_filter(&["say \"hi\""]), "in.(\"say \\\"hi\\\"\")");
    }
}
