//! View engine integration tests.
//!
//! These tests load the sample inventory fixture and drive the view
//! controller the way a dashboard screen would.

use cbom_explorer::model::{CryptoAsset, CryptoKey};
use cbom_explorer::view::{FilterValue, SearchField, SortDirection, ViewConfig, ViewController};
use cbom_explorer::{
    CbomDocument, CbomError, Certificate, FieldValue, Record, RecordSchema, load_document_at,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn sample_document() -> CbomDocument {
    load_document_at(&fixture_path("sample.cbom.json"), reference_date())
        .expect("fixture should load")
}

fn certificate_view() -> ViewController<Certificate> {
    ViewController::new(sample_document().certificates, Certificate::view_config())
        .expect("preset config is valid")
}

fn ids<T: Record>(records: &[&T]) -> Vec<String> {
    records.iter().map(|r| r.field("id").to_string()).collect()
}

fn days<T: Record>(records: &[&T]) -> Vec<FieldValue> {
    records.iter().map(|r| r.field("daysUntilExpiry")).collect()
}

// ============================================================================
// Loading
// ============================================================================

mod loading {
    use super::*;

    #[test]
    fn fixture_counts() {
        let doc = sample_document();
        assert_eq!(doc.certificates.len(), 5);
        assert_eq!(doc.keys.len(), 3);
        assert_eq!(doc.assets.len(), 4);
        assert_eq!(doc.applications.len(), 3);
    }

    #[test]
    fn expiry_is_derived_from_reference_date() {
        let doc = sample_document();
        let expiry: Vec<Option<i64>> = doc
            .certificates
            .iter()
            .map(|c| c.days_until_expiry)
            .collect();
        assert_eq!(expiry, vec![Some(-10), Some(-3), Some(20), Some(180), None]);

        let status: Vec<String> = doc
            .certificates
            .iter()
            .map(|c| c.field("status").to_string())
            .collect();
        assert_eq!(status, vec!["expired", "expired", "expiring", "valid", ""]);
    }

    #[test]
    fn application_counts_are_filled_in() {
        let doc = sample_document();
        let crm = &doc.applications[0];
        assert_eq!(crm.certificate_count, Some(2));
        assert_eq!(crm.key_count, Some(2));
        // Explicit counts from the document are kept.
        assert_eq!(doc.applications[2].algorithm_count, Some(7));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn filter_expired_certificates() {
        let mut view = certificate_view();
        view.set_filter("status", "expired");

        let derived = view.derived_view();
        assert_eq!(derived.total_count(), 2);
        assert_eq!(ids(&derived.filtered_sorted_records), vec!["c1", "c2"]);
    }

    #[test]
    fn sort_expired_by_days_both_directions() {
        let mut view = certificate_view();
        view.set_filter("status", "expired");

        view.set_sort("daysUntilExpiry", Some(SortDirection::Asc));
        assert_eq!(
            days(&view.derived_view().filtered_sorted_records),
            vec![FieldValue::Integer(-10), FieldValue::Integer(-3)]
        );

        view.set_sort("daysUntilExpiry", Some(SortDirection::Desc));
        assert_eq!(
            days(&view.derived_view().filtered_sorted_records),
            vec![FieldValue::Integer(-3), FieldValue::Integer(-10)]
        );
    }

    #[test]
    fn page_size_two_over_five_records() {
        let config = ViewConfig::builder()
            .sortable(["commonName"])
            .page_size(2)
            .build();
        let mut view = ViewController::new(sample_document().certificates, config).unwrap();

        assert_eq!(view.derived_view().total_pages(), 3);

        view.set_page(3);
        let derived = view.derived_view();
        assert_eq!(derived.visible_page.len(), 1);
        assert!(!derived.page.has_next);
        assert!(derived.page.has_prev);
        assert_eq!(derived.summary(), "Showing 5-5 of 5 (page 3/3)");
    }

    #[test]
    fn search_all_fields_is_case_insensitive() {
        let mut view = certificate_view();
        view.set_search("digicert", SearchField::All);

        let derived = view.derived_view();
        assert_eq!(ids(&derived.filtered_sorted_records), vec!["c1"]);
    }

    #[test]
    fn search_single_field() {
        let mut view = certificate_view();
        view.set_search("example.com", SearchField::Field("issuer".to_string()));
        assert_eq!(view.derived_view().total_count(), 0);

        view.set_search("example.com", SearchField::Field("commonName".to_string()));
        assert_eq!(view.derived_view().total_count(), 5);
    }
}

// ============================================================================
// Sorting
// ============================================================================

mod sorting {
    use super::*;

    #[test]
    fn preset_sorts_by_days_until_expiry() {
        let view = certificate_view();
        assert_eq!(
            ids(&view.derived_view().filtered_sorted_records),
            vec!["c1", "c2", "c3", "c4", "c5"]
        );
    }

    #[test]
    fn absent_values_last_in_both_directions() {
        let mut view = certificate_view();
        view.set_sort("daysUntilExpiry", Some(SortDirection::Desc));
        assert_eq!(
            ids(&view.derived_view().filtered_sorted_records),
            vec!["c4", "c3", "c2", "c1", "c5"]
        );
    }

    #[test]
    fn reselecting_field_toggles_direction() {
        let mut view = certificate_view();
        view.set_sort("keySize", None);
        let asc = days(&view.derived_view().filtered_sorted_records);
        view.set_sort("keySize", None);
        let desc = days(&view.derived_view().filtered_sorted_records);
        assert_ne!(asc, desc);
        assert_eq!(
            view.state().sort.as_ref().map(|s| s.direction),
            Some(SortDirection::Desc)
        );
    }

    #[test]
    fn text_sort_orders_alphabetically() {
        let mut view = certificate_view();
        view.set_sort("issuer", Some(SortDirection::Asc));
        let issuers: Vec<String> = view
            .derived_view()
            .filtered_sorted_records
            .iter()
            .map(|c| c.field("issuer").to_string())
            .collect();
        assert_eq!(
            issuers,
            vec![
                "DigiCert Global G2",
                "Let's Encrypt R3",
                "Let's Encrypt R3",
                "Sectigo RSA Domain Validation",
                "",
            ]
        );
    }

    #[test]
    fn equal_keys_fall_back_to_id() {
        let mut view = certificate_view();
        view.set_sort("issuer", Some(SortDirection::Desc));
        let derived = view.derived_view();
        // c2 and c4 share an issuer; the tie-breaker follows the direction.
        assert_eq!(ids(&derived.filtered_sorted_records), vec!["c3", "c4", "c2", "c1", "c5"]);
    }
}

// ============================================================================
// Filtering
// ============================================================================

mod filtering {
    use super::*;

    #[test]
    fn list_fields_match_any_element() {
        let mut view = certificate_view();
        view.set_filter("applications", "crm");
        assert_eq!(ids(&view.derived_view().filtered_sorted_records), vec!["c1", "c3"]);
    }

    #[test]
    fn filters_combine_with_and() {
        let mut view = certificate_view();
        view.set_filter("keyAlgorithm", "RSA");
        assert_eq!(view.derived_view().total_count(), 3);
        view.set_filter("status", "expired");
        assert_eq!(ids(&view.derived_view().filtered_sorted_records), vec!["c1"]);
    }

    #[test]
    fn all_clears_a_filter() {
        let mut view = certificate_view();
        view.set_filter("status", "expired");
        view.set_filter("status", FilterValue::All);
        assert_eq!(view.derived_view().total_count(), 5);
        assert!(view.state().filters.is_empty());
    }

    #[test]
    fn text_filter_on_keys() {
        let mut view = ViewController::new(sample_document().keys, CryptoKey::view_config()).unwrap();
        view.set_filter("storage", "kms");
        assert_eq!(ids(&view.derived_view().filtered_sorted_records), vec!["k3"]);
    }

    #[test]
    fn parsed_text_matches_numbers() {
        let mut view = certificate_view();
        view.set_filter("keySize", FilterValue::parse("4096"));
        assert_eq!(ids(&view.derived_view().filtered_sorted_records), vec!["c3"]);
    }

    #[test]
    fn boolean_filter_on_assets() {
        let mut view =
            ViewController::new(sample_document().assets, CryptoAsset::view_config()).unwrap();
        view.set_filter("quantumSafe", true);
        assert_eq!(ids(&view.derived_view().filtered_sorted_records), vec!["a3"]);
    }

    #[test]
    fn clear_filters_restores_everything() {
        let mut view = certificate_view();
        view.set_filter("status", "expired");
        view.set_search("api", SearchField::All);
        assert_eq!(view.derived_view().total_count(), 1);

        view.clear_filters();
        assert_eq!(view.derived_view().total_count(), 5);
        assert!(!view.state().is_filtered());
    }

    #[test]
    fn unknown_filter_field_matches_nothing() {
        let mut view = certificate_view();
        view.set_filter("owner", "it-ops");
        assert_eq!(view.derived_view().total_count(), 0);
    }
}

// ============================================================================
// Paging
// ============================================================================

mod paging {
    use super::*;

    fn paged(size: usize) -> ViewController<Certificate> {
        let config = Certificate::view_config();
        let config = ViewConfig { page_size: size, ..config };
        ViewController::new(sample_document().certificates, config).unwrap()
    }

    #[test]
    fn filter_change_resets_page() {
        let mut view = paged(2);
        view.set_page(3);
        assert_eq!(view.derived_view().current_page(), 3);

        view.set_filter("keyAlgorithm", "RSA");
        assert_eq!(view.derived_view().current_page(), 1);
    }

    #[test]
    fn sort_change_keeps_page() {
        let mut view = paged(2);
        view.set_page(2);
        view.set_sort("commonName", None);
        assert_eq!(view.derived_view().current_page(), 2);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let mut view = paged(2);
        view.set_page(99);
        assert_eq!(view.derived_view().current_page(), 3);
        view.set_page(0);
        assert_eq!(view.derived_view().current_page(), 1);
    }

    #[test]
    fn next_and_prev_stop_at_bounds() {
        let mut view = paged(2);
        view.prev_page();
        assert_eq!(view.derived_view().current_page(), 1);
        for _ in 0..5 {
            view.next_page();
        }
        assert_eq!(view.derived_view().current_page(), 3);
    }

    #[test]
    fn shrinking_result_clamps_page() {
        let mut view = paged(1);
        view.set_page(5);
        view.set_search("mail", SearchField::All);
        let derived = view.derived_view();
        assert_eq!(ids(&derived.visible_page), vec!["c4"]);
        assert_eq!(derived.current_page(), 1);
        assert_eq!(derived.total_pages(), 1);
    }

    #[test]
    fn empty_result_has_one_empty_page() {
        let mut view = paged(2);
        view.set_search("no-such-host", SearchField::All);
        let derived = view.derived_view();
        assert_eq!(derived.total_count(), 0);
        assert_eq!(derived.total_pages(), 1);
        assert!(derived.visible_page.is_empty());
        assert_eq!(derived.summary(), "Showing 0-0 of 0 (page 1/1)");
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut view = paged(2);
        view.set_page(2);
        view.set_page_size(4);
        let derived = view.derived_view();
        assert_eq!(derived.current_page(), 1);
        assert_eq!(derived.visible_page.len(), 4);
    }
}

// ============================================================================
// Filter options and configuration
// ============================================================================

mod options_and_config {
    use super::*;

    #[test]
    fn filter_options_follow_first_appearance() {
        let view = certificate_view();
        assert_eq!(
            view.options_for("status").unwrap(),
            &[FieldValue::from("expired"), FieldValue::from("expiring"), FieldValue::from("valid")]
        );
        assert_eq!(
            view.options_for("applications").unwrap(),
            &[
                FieldValue::from("crm"),
                FieldValue::from("blog"),
                FieldValue::from("app-vpn"),
            ]
        );
        assert!(view.options_for("commonName").is_none());
    }

    #[test]
    fn filter_options_ignore_active_filters() {
        let mut view = certificate_view();
        view.set_filter("status", "expired");
        assert_eq!(view.derived_view().filter_options["status"].len(), 3);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = ViewConfig::builder().page_size(0).build();
        let err = ViewController::new(Vec::<Certificate>::new(), config).unwrap_err();
        assert!(matches!(err, CbomError::Config(_)));
    }

    #[test]
    fn invalid_field_name_is_rejected() {
        let config = ViewConfig::builder().filterable(["key size"]).build();
        let err = ViewController::new(Vec::<Certificate>::new(), config).unwrap_err();
        assert!(err.to_string().contains("key size"));
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            Certificate::view_config(),
            CryptoKey::view_config(),
            CryptoAsset::view_config(),
            cbom_explorer::Application::view_config(),
        ] {
            assert!(config.ensure_valid().is_ok(), "{config:?}");
        }
    }

    #[test]
    fn set_source_keeps_criteria() {
        let mut view = certificate_view();
        view.set_filter("status", "expired");
        let mut certs = sample_document().certificates;
        certs.truncate(1);
        view.set_source(certs);
        assert_eq!(ids(&view.derived_view().filtered_sorted_records), vec!["c1"]);
        assert_eq!(view.options_for("status").unwrap().len(), 1);
    }
}
