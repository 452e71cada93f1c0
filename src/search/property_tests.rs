use proptest::prelude::*;

use super::fuzzy::{edit_distance, fuzzy_score};
use super::index::{build_index, FieldValue, IndexedRow};
use super::normalize::normalize;
use super::ranking::{rank, RankOptions, Weights};
use super::synonyms::SynonymMap;

fn short_word() -> impl Strategy<Value = String> {
    "[a-e]{0,6}"
}

fn field_text() -> impl Strategy<Value = String> {
    "[a-eA-E ]{0,16}"
}

fn index_of(texts: &[(String, String)]) -> Vec<IndexedRow<usize>> {
    build_index(0..texts.len(), |i: &usize| {
        vec![
            ("name", FieldValue::from(&texts[*i].0)),
            ("status", FieldValue::from(&texts[*i].1)),
        ]
    })
}

// Property test: normalization is a fixed point and ignores case
proptest! {
    #[test]
    fn normalize_is_idempotent(s in any::<String>()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_ignores_case(s in "[a-zA-Z0-9 .@-]{0,24}") {
        prop_assert_eq!(normalize(&s.to_uppercase()), normalize(&s.to_lowercase()));
    }

    #[test]
    fn normalize_output_alphabet(s in any::<String>()) {
        let out = normalize(&s);
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' ') && !out.contains("  "));
        prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "@.- ".contains(c)));
    }
}

// Property test: edit distance is a metric
proptest! {
    #[test]
    fn edit_distance_identity(a in short_word()) {
        prop_assert_eq!(edit_distance(&a, &a), 0);
    }

    #[test]
    fn edit_distance_symmetric(a in short_word(), b in short_word()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn edit_distance_triangle(a in short_word(), b in short_word(), c in short_word()) {
        prop_assert!(edit_distance(&a, &c) <= edit_distance(&a, &b) + edit_distance(&b, &c));
    }

    #[test]
    fn edit_distance_bounded_by_longer(a in short_word(), b in short_word()) {
        let d = edit_distance(&a, &b);
        prop_assert!(d <= a.len().max(b.len()));
        prop_assert!(d >= a.len().abs_diff(b.len()));
    }
}

// Property test: fuzzy score bounds and the substring short-circuit
proptest! {
    #[test]
    fn fuzzy_score_in_unit_range(token in short_word(), text in field_text()) {
        let score = fuzzy_score(&token, &normalize(&text));
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn fuzzy_score_substring_is_one(prefix in short_word(), token in "[a-e]{1,6}", suffix in short_word()) {
        let text = format!("{}{}{}", prefix, token, suffix);
        prop_assert_eq!(fuzzy_score(&token, &text), 1.0);
    }

    #[test]
    fn fuzzy_score_empty_is_zero(s in short_word()) {
        prop_assert_eq!(fuzzy_score("", &s), 0.0);
        prop_assert_eq!(fuzzy_score(&s, ""), 0.0);
    }
}

// Property test: ranking output is a filtered, descending view of the index
proptest! {
    #[test]
    fn index_preserves_length(texts in proptest::collection::vec((field_text(), field_text()), 0..12)) {
        prop_assert_eq!(index_of(&texts).len(), texts.len());
    }

    #[test]
    fn empty_query_returns_everything_in_order(texts in proptest::collection::vec((field_text(), field_text()), 0..12)) {
        let index = index_of(&texts);
        let ranked = rank(&index, "", &RankOptions::new());
        let rows: Vec<usize> = ranked.iter().map(|r| *r.row).collect();
        prop_assert_eq!(rows, (0..texts.len()).collect::<Vec<_>>());
    }

    #[test]
    fn ranking_is_sorted_and_nonzero(
        texts in proptest::collection::vec((field_text(), field_text()), 0..12),
        query in "[a-e ]{1,10}",
        name_weight in 1.0f64..5.0,
    ) {
        let index = index_of(&texts);
        let options = RankOptions::new()
            .with_weights(Weights::new().with("name", name_weight))
            .with_synonyms(SynonymMap::new().with_entry("ab", ["cd"]));
        let ranked = rank(&index, &query, &options);

        prop_assert!(ranked.iter().all(|r| r.score > 0.0));
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        // Equal scores keep index order
        prop_assert!(ranked.windows(2).all(|w| w[0].score != w[1].score || w[0].position < w[1].position));
    }

    #[test]
    fn status_filter_only_keeps_matching_rows(
        texts in proptest::collection::vec((field_text(), "(Paid|Pending|Unpaid|Overdue)"), 0..12),
        status in "(paid|pending|due)",
    ) {
        let index = index_of(&texts);
        let options = RankOptions::new().with_status(status.clone()).with_status_field_key("status");
        let ranked = rank(&index, "", &options);

        for r in &ranked {
            prop_assert!(normalize(&texts[*r.row].1).contains(&status));
        }
        let expected = texts.iter().filter(|(_, s)| normalize(s).contains(&status)).count();
        prop_assert_eq!(ranked.len(), expected);
    }
}
