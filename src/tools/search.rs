//! Search command implementation
//!
//! Loads a table fixture, ranks its rows and renders the result as markdown
//! or JSON.

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::cli::{OutputFormat, SearchArgs};
use crate::config::load_config;
use crate::error::{validate_query, AppError};
use crate::records::{load_rows, Entity, Invoice, Transaction};
use crate::search::normalize;
use crate::search::{RankOptions, Ranked, SearchEngine, SearchParams, Searchable};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

/// Query and status after merging URL params with explicit flags
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub status: Option<String>,
    pub limit: usize,
}

impl SearchRequest {
    pub fn from_args(args: &SearchArgs) -> Result<Self, AppError> {
        let params = args
            .params
            .as_deref()
            .map(SearchParams::from_query_string)
            .unwrap_or_default();

        let merged = SearchParams::new(
            args.query.clone().unwrap_or(params.search),
            args.status.clone().unwrap_or(params.status),
        );
        validate_query(&merged.search)?;

        let limit = args.limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 || limit > MAX_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "Limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        Ok(Self {
            status: merged.status_filter().map(str::to_string),
            query: merged.search,
            limit,
        })
    }
}

/// Shared implementation for the search command
pub fn execute_search(args: SearchArgs) -> Result<String, AppError> {
    let request = SearchRequest::from_args(&args)?;
    let config = load_config(args.config.as_deref())?;
    let options = config.rank_options(args.entity);

    debug!(
        "Search request for {}: query '{}', status {:?}",
        args.entity.as_str(),
        request.query,
        request.status
    );

    match args.entity {
        Entity::Invoices => {
            let rows: Vec<Invoice> = load_rows(&args.input)?;
            run_search_on_rows(&rows, args.entity, &request, options, args.format)
        }
        Entity::Transactions => {
            let rows: Vec<Transaction> = load_rows(&args.input)?;
            run_search_on_rows(&rows, args.entity, &request, options, args.format)
        }
    }
}

/// Run search + formatting on rows that are already loaded
pub(crate) fn run_search_on_rows<T>(
    rows: &[T],
    entity: Entity,
    request: &SearchRequest,
    mut options: RankOptions,
    format: OutputFormat,
) -> Result<String, AppError>
where
    T: Searchable + Serialize,
{
    options.status = request.status.clone();

    // One-shot command: a single version, built once
    let mut engine = SearchEngine::searchable(options);
    let ranked = engine.search(rows, 0, &request.query, None);
    info!("{} of {} {} matched", ranked.len(), rows.len(), entity.as_str());

    if ranked.is_empty() {
        return Err(AppError::NotFound(format!(
            "No {} found matching query '{}'{}",
            entity.as_str(),
            request.query,
            request
                .status
                .as_deref()
                .map(|s| format!(" with status '{}'", s))
                .unwrap_or_default()
        )));
    }

    let shown = &ranked[..ranked.len().min(request.limit)];
    match format {
        OutputFormat::Markdown => Ok(format_search_results(shown, entity, request, rows.len())),
        OutputFormat::Json => format_json_results(shown),
    }
}

/// Render ranked rows as a markdown table of their searchable fields
pub fn format_search_results<T: Searchable>(
    results: &[Ranked<'_, T>],
    entity: Entity,
    request: &SearchRequest,
    total: usize,
) -> String {
    let mut md = String::new();
    md.push_str(&format!(
        "# {} · {} of {} rows\n\n",
        title_case(entity.as_str()),
        results.len(),
        total
    ));

    if !request.query.is_empty() || request.status.is_some() {
        md.push_str(&format!(
            "Query: `{}` · Status: `{}`\n\n",
            request.query,
            request.status.as_deref().unwrap_or("all")
        ));
    }

    let Some(first) = results.first() else {
        return md;
    };

    let columns: Vec<&'static str> = first.row.search_fields().into_iter().map(|(key, _)| key).collect();

    md.push_str("| # | Score |");
    for column in &columns {
        md.push_str(&format!(" {} |", column));
    }
    md.push_str("\n|---|---|");
    md.push_str(&"---|".repeat(columns.len()));
    md.push('\n');

    for (position, result) in results.iter().enumerate() {
        let score = if request.query.is_empty() {
            "-".to_string()
        } else {
            format!("{:.2}", result.score)
        };
        md.push_str(&format!("| {} | {} |", position + 1, score));

        for (_, value) in result.row.search_fields() {
            let cell = escape_cell(&value.to_string());
            md.push_str(&format!(" {} |", highlight(&cell, &request.query)));
        }
        md.push('\n');
    }

    md
}

/// Render ranked rows as a JSON array of `{rank, score, row}`
pub fn format_json_results<T: Serialize>(results: &[Ranked<'_, T>]) -> Result<String, AppError> {
    let items: Vec<serde_json::Value> = results
        .iter()
        .enumerate()
        .map(|(position, result)| {
            json!({
                "rank": position + 1,
                "score": result.score,
                "row": result.row,
            })
        })
        .collect();

    serde_json::to_string_pretty(&items)
        .map_err(|e| AppError::Internal(format!("Failed to serialize results: {}", e)))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Wrap occurrences of the query words in **bold**
///
/// Matching runs on folded text (see [`normalize`]), so `cafe` bolds `Café`.
/// Overlapping and adjacent matches merge into one bold run.
fn highlight(text: &str, query: &str) -> String {
    let folded_query = normalize(query);
    if folded_query.is_empty() {
        return text.to_string();
    }

    // Folded cell text plus, per folded byte, the source char span it came from
    let mut folded = String::with_capacity(text.len());
    let mut origins: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let piece = if c.is_whitespace() {
            " ".to_string()
        } else {
            normalize(c.encode_utf8(&mut [0u8; 4]))
        };
        let span = (start, start + c.len_utf8());
        origins.extend(std::iter::repeat(span).take(piece.len()));
        folded.push_str(&piece);
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in folded_query.split(' ') {
        let mut idx = 0usize;
        while let Some(pos) = folded[idx..].find(term) {
            let abs = idx + pos;
            let last = abs + term.len() - 1;
            ranges.push((origins[abs].0, origins[last].1));
            idx = abs + term.len();
        }
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        match merged.last_mut() {
            Some(last) if s <= last.1 => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }

    let mut res = String::with_capacity(text.len() + merged.len() * 4);
    let mut last_idx = 0usize;
    for (s, e) in merged {
        res.push_str(&text[last_idx..s]);
        res.push_str("**");
        res.push_str(&text[s..e]);
        res.push_str("**");
        last_idx = e;
    }
    res.push_str(&text[last_idx..]);

    res
}
