//! Command line definition and execution.
//!
//! Each subcommand maps onto exactly one gateway operation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use search_index_gateway::{
    EngineClient, SearchIndexGateway, SearchRequest, SearchableId, UpsertSubject,
};
use serde_json::{json, Value};
use tracing::info;

use crate::AdminError;

#[derive(Debug, Parser)]
#[command(name = "search-index-admin")]
#[command(about = "Index, remove and query searchable documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Index name, overrides SEARCH_INDEX_NAME
    #[arg(long, global = true)]
    pub index: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upsert documents from a JSON file holding one {id, type, body} object or an array of them
    Upsert {
        /// Path to the JSON file
        path: PathBuf,
    },
    /// Remove one document by type and id
    Remove {
        /// Searchable type of the document
        searchable_type: String,
        /// Document id; canonical integers such as 42 are sent as numbers
        id: SearchableId,
    },
    /// Delete the whole index
    Clear {
        /// Confirm deleting every document in the index
        #[arg(long)]
        yes: bool,
    },
    /// Run a raw query and print the engine response
    Search {
        /// Query body as JSON
        #[arg(long)]
        body: String,
        /// Index to search, repeatable; defaults to the configured index
        #[arg(long = "target")]
        targets: Vec<String>,
    },
}

/// Run one command against `gateway`.
///
/// Returns the JSON to print, if the command produces any.
pub async fn run<C: EngineClient>(
    gateway: &SearchIndexGateway<C>,
    command: Command,
) -> Result<Option<Value>, AdminError> {
    match command {
        Command::Upsert { path } => {
            let contents = tokio::fs::read_to_string(&path).await?;
            let subject = UpsertSubject::from_json(serde_json::from_str(&contents)?)?;
            let count = subject.len();

            gateway.upsert_to_index(subject).await?;

            info!(index = %gateway.index_name(), count, "Upserted documents");
            Ok(Some(json!({ "index": gateway.index_name(), "upserted": count })))
        }
        Command::Remove {
            searchable_type,
            id,
        } => {
            gateway
                .remove_from_index_by_type_and_id(&searchable_type, id.clone())
                .await?;

            info!(
                index = %gateway.index_name(),
                searchable_type = %searchable_type,
                id = %id,
                "Removed document"
            );
            Ok(None)
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(AdminError::ConfirmationRequired(format!(
                    "pass --yes to delete index '{}'",
                    gateway.index_name()
                )));
            }

            gateway.clear_index().await?;

            info!(index = %gateway.index_name(), "Cleared index");
            Ok(None)
        }
        Command::Search { body, targets } => {
            let mut query = SearchRequest::new(serde_json::from_str(&body)?);
            query.indices = if targets.is_empty() {
                vec![gateway.index_name().to_string()]
            } else {
                targets
            };

            Ok(Some(gateway.get_results(query).await?))
        }
    }
}
