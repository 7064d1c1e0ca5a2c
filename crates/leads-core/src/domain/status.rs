//! Lead Status
//!
//! Pipeline stage of a lead and the filter built on top of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pipeline stage of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    /// Not contacted yet
    #[default]
    #[serde(rename = "novo")]
    New,
    /// First message sent, waiting for the prospect
    #[serde(rename = "aguardando_resposta")]
    AwaitingReply,
    /// Conversation ongoing
    #[serde(rename = "em_atendimento")]
    InProgress,
    #[serde(rename = "ganho")]
    Won,
    #[serde(rename = "perdido")]
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::AwaitingReply,
        LeadStatus::InProgress,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    /// Value stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "novo",
            LeadStatus::AwaitingReply => "aguardando_resposta",
            LeadStatus::InProgress => "em_atendimento",
            LeadStatus::Won => "ganho",
            LeadStatus::Lost => "perdido",
        }
    }

    /// Badge label shown in the table
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::New => "Novo",
            LeadStatus::AwaitingReply => "Aguardando",
            LeadStatus::InProgress => "Em Atendimento",
            LeadStatus::Won => "Ganho",
            LeadStatus::Lost => "Perdido",
        }
    }

    /// CSS modifier used for the badge colour
    pub fn tone(&self) -> &'static str {
        match self {
            LeadStatus::New => "primary",
            LeadStatus::AwaitingReply => "warning",
            LeadStatus::InProgress => "info",
            LeadStatus::Won => "success",
            LeadStatus::Lost => "destructive",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown status filter {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for LeadStatus {
    type Err = UnknownStatus;

    /// Accepts the column values and their English aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "novo" | "new" => Ok(LeadStatus::New),
            "aguardando_resposta" | "awaiting_reply" => Ok(LeadStatus::AwaitingReply),
            "em_atendimento" | "in_progress" => Ok(LeadStatus::InProgress),
            "ganho" | "won" => Ok(LeadStatus::Won),
            "perdido" | "lost" => Ok(LeadStatus::Lost),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Status selector value: everything, or one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LeadStatus),
}

impl StatusFilter {
    /// The six selector options in display order
    pub fn options() -> impl Iterator<Item = StatusFilter> {
        std::iter::once(StatusFilter::All).chain(LeadStatus::ALL.into_iter().map(StatusFilter::Only))
    }

    pub fn matches(&self, status: LeadStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// Value used for the `<option>` element
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "todos",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    /// Plural label shown in the selector
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Todos",
            StatusFilter::Only(LeadStatus::New) => "Novos",
            StatusFilter::Only(LeadStatus::AwaitingReply) => "Aguardando",
            StatusFilter::Only(LeadStatus::InProgress) => "Em Atendimento",
            StatusFilter::Only(LeadStatus::Won) => "Ganhos",
            StatusFilter::Only(LeadStatus::Lost) => "Perdidos",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todos" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&LeadStatus::AwaitingReply).unwrap();
        assert_eq!(json, "\"aguardando_resposta\"");
        let parsed: LeadStatus = serde_json::from_str("\"em_atendimento\"").unwrap();
        assert_eq!(parsed, LeadStatus::InProgress);
        assert!(serde_json::from_str::<LeadStatus>("\"arquivado\"").is_err());
    }

    #[test]
    fn test_filter_parses_six_values() {
        let values: Vec<&str> = StatusFilter::options().map(|f| f.as_str()).collect();
        assert_eq!(values, ["todos", "novo", "aguardando_resposta", "em_atendimento", "ganho", "perdido"]);
        for value in values {
            assert_eq!(value.parse::<StatusFilter>().unwrap().as_str(), value);
        }
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("won".parse::<StatusFilter>(), Ok(StatusFilter::Only(LeadStatus::Won)));
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        assert!(StatusFilter::All.matches(LeadStatus::Lost));
        assert!(StatusFilter::Only(LeadStatus::Won).matches(LeadStatus::Won));
        assert!(!StatusFilter::Only(LeadStatus::Won).matches(LeadStatus::New));
    }
}
