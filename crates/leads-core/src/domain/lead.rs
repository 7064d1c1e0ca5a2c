//! Lead Entity
//!
//! One prospect row from the `leads` table. Field names are English; the
//! serde renames carry the backend's Portuguese column names.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::status::LeadStatus;

/// A prospective client tracked through the sales pipeline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LeadRow")]
pub struct Lead {
    /// Stable unique identifier
    pub id: String,
    pub name: String,
    pub phone: String,
    pub interest: String,
    pub status: LeadStatus,
    /// Channel the lead came from (site, portal, referral...)
    pub source: String,
    /// Whether the first outbound message went out
    pub message_sent: bool,
    pub responded: bool,
    pub created_at: DateTime<Utc>,
    /// Equals `created_at` for rows that were never touched
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of a `leads` row
#[derive(Deserialize)]
struct LeadRow {
    #[serde(deserialize_with = "nullable::id")]
    id: String,
    #[serde(rename = "nome", default, deserialize_with = "nullable::string")]
    name: String,
    #[serde(rename = "telefone", default, deserialize_with = "nullable::string")]
    phone: String,
    #[serde(rename = "interesse", default, deserialize_with = "nullable::string")]
    interest: String,
    status: LeadStatus,
    #[serde(rename = "origem", default, deserialize_with = "nullable::string")]
    source: String,
    #[serde(rename = "mensagem_enviada", default, deserialize_with = "nullable::boolean")]
    message_sent: bool,
    #[serde(rename = "respondeu", default, deserialize_with = "nullable::boolean")]
    responded: bool,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Lead {
            id: row.id,
            name: row.name,
            phone: row.phone,
            interest: row.interest,
            status: row.status,
            source: row.source,
            message_sent: row.message_sent,
            responded: row.responded,
            created_at: row.created_at,
            updated_at: row.updated_at.unwrap_or(row.created_at),
        }
    }
}

impl Lead {
    /// Decode one backend row, e.g. a PostgREST array element or a
    /// realtime `record` object
    pub fn from_row(row: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(row)
    }
}

mod nullable {
    use serde::{de, Deserialize, Deserializer};

    /// Primary keys are UUID text, but bigint tables send numbers
    pub fn id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        match serde_json::Value::deserialize(de)? {
            serde_json::Value::String(id) => Ok(id),
            serde_json::Value::Number(id) => Ok(id.to_string()),
            other => Err(de::Error::custom(format!("invalid lead id {other}"))),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
    }

    pub fn boolean<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
        Ok(Option::<bool>::deserialize(de)?.unwrap_or_default())
    }
}

/// Timestamps arrive as RFC 3339 from the REST API and sometimes in the
/// Postgres text form (`2025-01-09 12:00:00.123+00`) from the change feed.
/// `timestamp without time zone` columns carry no offset and are read as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    const PG_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];
    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .or_else(|| {
                PG_FORMATS
                    .iter()
                    .find_map(|fmt| DateTime::<FixedOffset>::parse_from_str(raw, fmt).ok())
            })
            .map(|ts| ts.with_timezone(&Utc))
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(de)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp {raw:?}")))
    }

    /// `null` and a missing column both decode to `None`
    pub fn optional<'de, D: Deserializer<'de>>(de: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(de)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp {raw:?}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn row() -> serde_json::Value {
        json!({
            "id": "6f1c2a7e-0b7a-4c55-a0a4-1d2d9c1e0f11",
            "nome": "Maria Souza",
            "telefone": "5511987654321",
            "interesse": "Apartamento 2 quartos",
            "status": "aguardando_resposta",
            "origem": "instagram",
            "mensagem_enviada": true,
            "respondeu": false,
            "created_at": "2025-01-09T12:30:00.123456+00:00",
            "updated_at": "2025-01-09T13:00:00+00:00"
        })
    }

    #[test]
    fn test_decode_rest_row() {
        let lead = Lead::from_row(row()).expect("row should decode");
        assert_eq!(lead.name, "Maria Souza");
        assert_eq!(lead.status, LeadStatus::AwaitingReply);
        assert!(lead.message_sent);
        assert!(!lead.responded);
        assert_eq!(lead.updated_at, Utc.with_ymd_and_hms(2025, 1, 9, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_nulls_and_missing_optional_columns() {
        let mut value = row();
        value["interesse"] = serde_json::Value::Null;
        value["respondeu"] = serde_json::Value::Null;
        value.as_object_mut().unwrap().remove("mensagem_enviada");
        value.as_object_mut().unwrap().remove("origem");

        let lead = Lead::from_row(value).expect("row should decode");
        assert_eq!(lead.interest, "");
        assert_eq!(lead.source, "");
        assert!(!lead.responded);
        assert!(!lead.message_sent);
    }

    #[test]
    fn test_postgres_text_timestamp() {
        let parsed = timestamp::parse("2025-01-09 12:30:00.5+00").expect("pg timestamp");
        assert_eq!(parsed.timestamp(), Utc.with_ymd_and_hms(2025, 1, 9, 12, 30, 0).unwrap().timestamp());

        let shifted = timestamp::parse("2025-01-09T09:30:00-03:00").unwrap();
        assert_eq!(shifted, Utc.with_ymd_and_hms(2025, 1, 9, 12, 30, 0).unwrap());

        assert!(timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn test_timestamp_without_time_zone() {
        let mut value = row();
        value["created_at"] = json!("2025-01-09T12:30:00.123456");
        value["updated_at"] = json!("2025-01-09 13:00:00");

        let lead = Lead::from_row(value).expect("naive timestamps should decode");
        assert_eq!(lead.created_at.timestamp(), Utc.with_ymd_and_hms(2025, 1, 9, 12, 30, 0).unwrap().timestamp());
        assert_eq!(lead.updated_at, Utc.with_ymd_and_hms(2025, 1, 9, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_null_or_missing_updated_at_uses_created_at() {
        let mut value = row();
        value["updated_at"] = serde_json::Value::Null;
        let lead = Lead::from_row(value).expect("null updated_at should decode");
        assert_eq!(lead.updated_at, lead.created_at);

        let mut value = row();
        value.as_object_mut().unwrap().remove("updated_at");
        let lead = Lead::from_row(value).expect("missing updated_at should decode");
        assert_eq!(lead.updated_at, lead.created_at);
    }

    #[test]
    fn test_numeric_id() {
        let mut value = row();
        value["id"] = json!(42);
        assert_eq!(Lead::from_row(value).unwrap().id, "42");
    }

    #[test]
    fn test_unknown_status_is_decode_error() {
        let mut value = row();
        value["status"] = json!("arquivado");
        assert!(Lead::from_row(value).is_err());
    }
}
