//! Property-Based Tests for storagewiz
//!
//! Uses proptest for testing invariants over generated form input.
//!
//! These tests verify:
//! - Destination URLs never keep template placeholders
//! - URL building is a pure function
//! - Any bucket containing the letter "a" fails client validation
//! - Enum string round-trips (parse → to_string → parse)

use proptest::prelude::*;

use storagewiz::providers::schema::MSG_BUCKET_LETTER_A;
use storagewiz::providers::AWS_REGIONS;
use storagewiz::{
    build_destination_url, validate, FieldName, ProviderCatalog, ProviderFormValues, ProviderId,
};

// =============================================================================
// Strategies
// =============================================================================

fn catalog() -> ProviderCatalog {
    ProviderCatalog::standard().expect("standard catalog builds")
}

fn provider_strategy() -> impl Strategy<Value = ProviderId> {
    prop_oneof![Just(ProviderId::Aws), Just(ProviderId::Gcp)]
}

fn region_strategy() -> impl Strategy<Value = String> {
    (0..AWS_REGIONS.len()).prop_map(|i| AWS_REGIONS[i].0.to_string())
}

/// Buckets that pass the client rules: non-empty, no letter "a"
fn bucket_strategy() -> impl Strategy<Value = String> {
    "[b-zB-Z0-9.-]{1,24}"
}

fn valid_values_strategy() -> impl Strategy<Value = ProviderFormValues> {
    (
        provider_strategy(),
        bucket_strategy(),
        "[ /]{0,2}[a-z0-9/._-]{0,30}[ ]{0,2}",
        region_strategy(),
        "[A-Z0-9]{1,20}",
        "[a-zA-Z0-9+/]{1,40}",
    )
        .prop_map(|(provider, bucket, path, region, key, secret)| ProviderFormValues {
            provider: provider.to_string(),
            bucket,
            path,
            region,
            key,
            secret,
        })
}

// =============================================================================
// URL Builder Properties
// =============================================================================

proptest! {
    /// Valid input never leaves a placeholder in the URL
    #[test]
    fn url_has_no_placeholders(values in valid_values_strategy()) {
        let catalog = catalog();
        let form = validate(&values, &catalog).expect("strategy only yields valid input");
        let url = build_destination_url(&form, catalog.url_template(form.provider()));
        prop_assert!(!url.contains("[bucket]"));
        prop_assert!(!url.contains("[region]"));
        prop_assert!(url.starts_with("s3://"));
    }

    /// Building twice yields the same string
    #[test]
    fn url_building_is_idempotent(values in valid_values_strategy()) {
        let catalog = catalog();
        let form = validate(&values, &catalog).expect("strategy only yields valid input");
        let template = catalog.url_template(form.provider());
        prop_assert_eq!(build_destination_url(&form, template), build_destination_url(&form, template));
    }
}

// =============================================================================
// Validator Properties
// =============================================================================

proptest! {
    /// Any "a" in the bucket fails client validation with the demo message
    #[test]
    fn letter_a_always_rejected(
        values in valid_values_strategy(),
        prefix in "[b-z]{0,5}",
        a in prop_oneof![Just('a'), Just('A')],
        suffix in "[b-z]{0,5}",
    ) {
        let values = ProviderFormValues {
            bucket: format!("{}{}{}", prefix, a, suffix),
            ..values
        };
        let errors = validate(&values, &catalog()).unwrap_err();
        prop_assert_eq!(errors.get(&FieldName::Bucket).map(String::as_str), Some(MSG_BUCKET_LETTER_A));
    }

    /// GCP never requires a region
    #[test]
    fn gcp_region_is_optional(values in valid_values_strategy(), region in "[a-z0-9-]{0,12}") {
        let values = ProviderFormValues {
            provider: "gcp".to_string(),
            region,
            ..values
        };
        prop_assert!(validate(&values, &catalog()).is_ok());
    }

    /// AWS rejects any region outside the fixed list
    #[test]
    fn aws_rejects_unknown_region(values in valid_values_strategy(), region in "[a-z]{0,3}-moon-[0-9]") {
        let values = ProviderFormValues {
            provider: "aws".to_string(),
            region,
            ..values
        };
        let errors = validate(&values, &catalog()).unwrap_err();
        prop_assert!(errors.contains_key(&FieldName::Region));
    }
}

// =============================================================================
// Enum Properties
// =============================================================================

proptest! {
    /// ProviderId: to_string → parse round-trip is identity
    #[test]
    fn provider_roundtrip(provider in provider_strategy()) {
        let s = provider.to_string();
        let parsed: ProviderId = s.parse().expect("Should parse");
        prop_assert_eq!(provider, parsed);
        prop_assert_eq!(s.to_lowercase(), s);
    }
}
