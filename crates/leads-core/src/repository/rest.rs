//! REST Lead Repository
//!
//! PostgREST reads over `reqwest`. Rows are decoded one by one so a single
//! malformed row is skipped rather than blanking the whole dashboard.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;

use super::traits::LeadRepository;
use crate::config::DashboardConfig;
use crate::domain::{Lead, LeadStats, LeadStatus};
use crate::error::{DashboardError, DashboardResult};
use crate::realtime::LEADS_TABLE;

/// Repository backed by the hosted REST endpoint
#[derive(Debug, Clone)]
pub struct RestLeadRepository {
    client: Client,
    config: DashboardConfig,
}

/// Projection used by the stats query
#[derive(Debug, Deserialize)]
struct StatsRow {
    status: LeadStatus,
    #[serde(rename = "respondeu", default)]
    responded: Option<bool>,
}

impl RestLeadRepository {
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: DashboardConfig) -> Self {
        Self { client, config }
    }

    fn get(&self, query: &[(&str, &str)]) -> RequestBuilder {
        let key = self.config.anon_key();
        self.client
            .get(self.config.rest_endpoint(LEADS_TABLE))
            .query(query)
            .header("apikey", key)
            .bearer_auth(key)
            .header("Accept", "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> DashboardResult<Vec<Value>> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Vec<Value>>().await?)
    }

    pub async fn try_fetch_all(&self) -> DashboardResult<Vec<Lead>> {
        let rows = self
            .send(self.get(&[("select", "*"), ("order", "created_at.desc")]))
            .await?;
        Ok(decode_rows(rows))
    }

    pub async fn try_fetch_stats(&self) -> DashboardResult<LeadStats> {
        let rows = self.send(self.get(&[("select", "status,respondeu")])).await?;
        Ok(tally_rows(rows))
    }
}

#[async_trait(?Send)]
impl LeadRepository for RestLeadRepository {
    async fn fetch_all(&self) -> Vec<Lead> {
        match self.try_fetch_all().await {
            Ok(leads) => {
                log::info!("[REPO] Fetched {} leads", leads.len());
                leads
            }
            Err(e) => {
                log::error!("[REPO] Error fetching leads: {e}");
                Vec::new()
            }
        }
    }

    async fn fetch_stats(&self) -> LeadStats {
        self.try_fetch_stats().await.unwrap_or_else(|e| {
            log::error!("[REPO] Error fetching stats: {e}");
            LeadStats::default()
        })
    }
}

/// Decode full rows, skipping (and logging) the ones that do not fit
pub fn decode_rows(rows: Vec<Value>) -> Vec<Lead> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match Lead::from_row(row) {
            Ok(lead) => Some(lead),
            Err(e) => {
                log::warn!("[REPO] Skipping lead row {index}: {e}");
                None
            }
        })
        .collect()
}

/// Count `status,respondeu` projections, skipping rows that do not decode
pub fn tally_rows(rows: Vec<Value>) -> LeadStats {
    LeadStats::tally(rows.into_iter().filter_map(|row| {
        match serde_json::from_value::<StatsRow>(row) {
            Ok(row) => Some((row.status, row.responded.unwrap_or_default())),
            Err(e) => {
                log::warn!("[REPO] Skipping stats row: {e}");
                None
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str, status: &str, responded: bool) -> Value {
        json!({
            "id": id,
            "nome": format!("Lead {id}"),
            "telefone": "11987654321",
            "interesse": "Casa",
            "status": status,
            "origem": "site",
            "mensagem_enviada": true,
            "respondeu": responded,
            "created_at": "2025-01-09T12:00:00Z",
            "updated_at": "2025-01-09T12:00:00Z"
        })
    }

    #[test]
    fn test_decode_rows_skips_bad_rows() {
        let rows = vec![
            row("a", "novo", false),
            json!({"id": "broken"}),
            row("b", "arquivado", false),
            row("c", "ganho", true),
        ];
        let leads = decode_rows(rows);
        let ids: Vec<&str> = leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_decode_rows_keeps_naive_and_null_timestamps() {
        let mut naive = row("a", "novo", false);
        naive["created_at"] = json!("2025-01-09T12:00:00.123456");
        naive["updated_at"] = json!("2025-01-09 12:05:00");
        let mut untouched = row("b", "ganho", true);
        untouched["updated_at"] = Value::Null;

        let leads = decode_rows(vec![naive, untouched]);
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[1].updated_at, leads[1].created_at);
    }

    #[test]
    fn test_tally_rows() {
        let rows = vec![
            json!({"status": "novo", "respondeu": false}),
            json!({"status": "aguardando_resposta", "respondeu": true}),
            json!({"status": "aguardando_resposta", "respondeu": null}),
            json!({"status": "bogus", "respondeu": true}),
        ];
        assert_eq!(
            tally_rows(rows),
            LeadStats {
                total: 3,
                new_leads: 1,
                awaiting: 2,
                responded: 1
            }
        );
    }

    #[test]
    fn test_request_shape() {
        let config = DashboardConfig::from_parts(Some("https://abc.supabase.co"), Some("anon")).unwrap();
        let repo = RestLeadRepository::new(config);
        let request = repo
            .get(&[("select", "*"), ("order", "created_at.desc")])
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://abc.supabase.co/rest/v1/leads?select=*&order=created_at.desc"
        );
        assert_eq!(request.headers()["apikey"], "anon");
        assert_eq!(request.headers()["authorization"], "Bearer anon");
    }
}
