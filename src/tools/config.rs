//! Config command implementation
//!
//! Shows the ranking options a table ends up with after the config file is
//! merged over the built-in defaults.

use serde_json::{json, Map, Value};

use crate::cli::ConfigArgs;
use crate::config::load_config;
use crate::error::AppError;
use crate::records::Entity;
use crate::search::RankOptions;

pub fn execute_config(args: ConfigArgs) -> Result<String, AppError> {
    let config = load_config(args.config.as_deref())?;
    let options = config.rank_options(args.entity);

    serde_json::to_string_pretty(&describe_options(args.entity, &options))
        .map_err(|e| AppError::Internal(format!("Failed to serialize config: {}", e)))
}

fn describe_options(entity: Entity, options: &RankOptions) -> Value {
    let weights: Map<String, Value> = options
        .weights
        .iter()
        .map(|(field, weight)| (field.to_string(), json!(weight)))
        .collect();

    let synonyms: Map<String, Value> = options
        .synonyms
        .iter()
        .map(|(token, synonyms)| (token.to_string(), json!(synonyms)))
        .collect();

    json!({
        "entity": entity.as_str(),
        "status_field_key": options.status_field_key,
        "max_query_tokens": options.max_query_tokens,
        "weights": weights,
        "synonyms": synonyms,
    })
}
