//! Maglo table row types
//!
//! Invoice and transaction rows as served by the Maglo API and fixtures,
//! with the field projections their tables search over.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::search::{FieldValue, RankOptions, Searchable, SynonymMap, Weights};

/// Field holding the row status in every Maglo table
pub const STATUS_FIELD: &str = "status";

/// Invoice row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub invoice_number: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub status: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", (&self.name).into()),
            ("invoiceNumber", (&self.invoice_number).into()),
            ("email", self.email.clone().into()),
            ("type", self.kind.clone().into()),
            (STATUS_FIELD, (&self.status).into()),
        ]
    }
}

/// Transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub name: String,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Searchable for Transaction {
    fn search_fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", (&self.name).into()),
            ("business", self.business.clone().into()),
            ("type", self.kind.clone().into()),
            ("amount", self.amount.into()),
            ("date", searchable_date(self.date).into()),
            ("invoiceId", self.invoice_id.clone().into()),
            (STATUS_FIELD, self.status.clone().into()),
        ]
    }
}

/// ISO date followed by the form the tables display ("14 Apr 2022")
fn searchable_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%Y-%m-%d"), date.format("%-d %b %Y"))
}

/// Which Maglo table a set of rows belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Invoices,
    Transactions,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::Invoices => "invoices",
            Entity::Transactions => "transactions",
        }
    }

    /// Field weights the table ships with
    pub fn default_weights(self) -> Weights {
        match self {
            Entity::Invoices => Weights::new()
                .with("name", 3.0)
                .with("invoiceNumber", 2.0)
                .with("email", 2.0),
            Entity::Transactions => Weights::new().with("name", 3.0).with("business", 2.0),
        }
    }

    /// Ranking options the table ships with
    pub fn default_options(self) -> RankOptions {
        RankOptions::new()
            .with_synonyms(SynonymMap::maglo_defaults())
            .with_weights(self.default_weights())
            .with_status_field_key(STATUS_FIELD)
    }
}

/// Fixture payload: a bare array, or an API response wrapping it in `data`
#[derive(Deserialize)]
#[serde(untagged)]
enum Fixture<T> {
    Rows(Vec<T>),
    Wrapped { data: Vec<T> },
}

/// Load rows from a JSON fixture file
pub fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    let data = fs::read_to_string(path).map_err(|e| {
        AppError::InvalidInput(format!("Failed to read fixture {}: {}", path.display(), e))
    })?;

    let rows = parse_fixture(&data)
        .map_err(|e| AppError::FixtureParseFailed(format!("{}: {}", path.display(), e)))?;

    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse rows from fixture JSON text
pub fn parse_rows<T: DeserializeOwned>(data: &str) -> Result<Vec<T>, AppError> {
    Ok(parse_fixture(data)?)
}

fn parse_fixture<T: DeserializeOwned>(data: &str) -> serde_json::Result<Vec<T>> {
    let fixture: Fixture<T> = serde_json::from_str(data)?;
    Ok(match fixture {
        Fixture::Rows(rows) => rows,
        Fixture::Wrapped { data } => data,
    })
}
