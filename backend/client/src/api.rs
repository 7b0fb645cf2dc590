use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use terms::{Entry, WorkingSet};

const DICTIONARY_PATH: &str = "/api/dictionary";

#[derive(Serialize)]
struct UpsertPayload<'a> {
    name: &'a str,
    description: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

pub struct Api {
    client: Client,
    base_url: String,
}

impl Api {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn fetch_all(&self) -> Result<WorkingSet> {
        let entries: Vec<Entry> = self
            .client
            .get(self.url(DICTIONARY_PATH))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?
            .error_for_status()?
            .json()
            .await
            .context("Server sent an unreadable entry list")?;

        Ok(WorkingSet::new(entries))
    }

    /// Returns the server's confirmation message.
    pub async fn upsert(&self, name: &str, description: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url(DICTIONARY_PATH))
            .json(&UpsertPayload {
                name,
                description,
                password,
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;

        let status = res.status();
        let body: MessageBody = res
            .json()
            .await
            .with_context(|| format!("Server answered {status} without a message"))?;

        match status {
            StatusCode::CREATED => Ok(body.message),
            _ => bail!("{} ({status})", body.message),
        }
    }
}
