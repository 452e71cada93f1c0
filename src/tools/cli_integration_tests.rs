//! Integration tests for CLI tool execution
//!
//! Exercise the full pipeline (fixture → index → rank → output) through the
//! execute_* functions and the public search API.

#[cfg(test)]
mod cli_integration_tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use crate::cli::{OutputFormat, SearchArgs};
    use crate::error::AppError;
    use crate::records::Entity;
    use crate::search::{build_index, filter_and_rank, rank, FieldValue, RankOptions, SynonymMap};
    use crate::tools::search::execute_search;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        status: &'static str,
    }

    fn fields(row: &Row) -> Vec<(&'static str, FieldValue)> {
        vec![("name", row.name.into()), ("status", row.status.into())]
    }

    // Test fixture: an invoice table as exported by the dashboard
    fn invoice_fixture() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
            {"name": "Gadget Gallery LTD", "email": "gadget@gallery.com", "invoiceNumber": "MGL524874", "type": "Service", "status": "Paid"},
            {"name": "Jack Sparrow", "email": "jack@sparrow.io", "invoiceNumber": "MGL524250", "type": "Design", "status": "Unpaid"},
            {"name": "Iconic Studio", "email": "hello@iconic.studio", "invoiceNumber": "MGL524124", "type": "Design", "status": "Pending"}
        ]"#,
        )
        .unwrap();
        file
    }

    fn search_args(input: PathBuf, query: Option<&str>, status: Option<&str>) -> SearchArgs {
        SearchArgs {
            entity: Entity::Invoices,
            input,
            query: query.map(str::to_string),
            status: status.map(str::to_string),
            params: None,
            limit: None,
            format: OutputFormat::Json,
            config: None,
        }
    }

    #[test]
    fn test_status_filter_without_query() {
        let rows = vec![Row { name: "a", status: "Paid" }, Row { name: "b", status: "Pending" }];
        let index = build_index(rows, fields);
        let options = RankOptions::new().with_status("paid").with_status_field_key("status");

        let results = filter_and_rank(&index, "", &options);
        assert_eq!(results, vec![&Row { name: "a", status: "Paid" }]);
    }

    #[test]
    fn test_substring_match_selects_single_row() {
        let rows = vec![Row { name: "Acme Corp", status: "" }, Row { name: "Bravo LLC", status: "" }];
        let index = build_index(rows, fields);

        let ranked = rank(&index, "acme", &RankOptions::new());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].row.name, "Acme Corp");
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transposed_match_ranks_below_exact() {
        let rows = vec![Row { name: "acem", status: "" }, Row { name: "acme", status: "" }];
        let index = build_index(rows, fields);

        let ranked = rank(&index, "acme", &RankOptions::new());
        assert_eq!(ranked.iter().map(|r| r.row.name).collect::<Vec<_>>(), vec!["acme", "acem"]);
        assert!((ranked[1].score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_query_returns_nothing() {
        let rows = vec![Row { name: "Acme Corp", status: "Paid" }, Row { name: "Bravo LLC", status: "Pending" }];
        let index = build_index(rows, fields);
        assert!(filter_and_rank(&index, "qqqq", &RankOptions::new()).is_empty());
    }

    #[test]
    fn test_two_token_query_prefers_row_matching_both() {
        let rows = vec![Row { name: "john only", status: "" }, Row { name: "john doe smith", status: "" }];
        let index = build_index(rows, fields);

        let ranked = rank(&index, "john doe", &RankOptions::new());
        assert_eq!(ranked[0].row.name, "john doe smith");
        assert!((ranked[0].score - 2.0).abs() < 1e-9);
        assert!(ranked[1].score < ranked[0].score);
    }

    #[test]
    fn test_synonym_contributes_full_score() {
        let rows = vec![Row { name: "", status: "settled" }];
        let index = build_index(rows, fields);
        let options = RankOptions::new().with_synonyms(SynonymMap::new().with_entry("paid", ["settled"]));

        let ranked = rank(&index, "paid", &options);
        assert_eq!(ranked.len(), 1);
        // "paid" vs "settled" is worth 1 - 6/7 on its own, the synonym adds 1
        assert!((ranked[0].score - (1.0 + 1.0 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_execute_search_json_output() {
        let fixture = invoice_fixture();
        let out = execute_search(search_args(fixture.path().to_path_buf(), Some("iconic"), None)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["row"]["name"], "Iconic Studio");
        assert_eq!(value[0]["rank"], 1);
    }

    #[test]
    fn test_execute_search_status_from_params() {
        let fixture = invoice_fixture();
        let mut args = search_args(fixture.path().to_path_buf(), None, None);
        args.params = Some("?status=pending".to_string());

        let out = execute_search(args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["row"]["status"], "Pending");
    }

    #[test]
    fn test_execute_search_not_found() {
        let fixture = invoice_fixture();
        let result = execute_search(search_args(fixture.path().to_path_buf(), None, Some("refunded")));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_execute_search_missing_fixture() {
        let result = execute_search(search_args(PathBuf::from("/nonexistent/maglo/rows.json"), Some("a"), None));
        match result {
            Err(e) => assert_eq!(e.exit_code(), 1),
            Ok(_) => panic!("expected an error for a missing fixture"),
        }
    }
}
