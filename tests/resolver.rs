use proptest::prelude::*;
use vitibrasil::catalog::{CATEGORIES, Category};
use vitibrasil::params::{QueryParameters, ResolvedParameters, ValidationError};

fn resolve(
    option: &str,
    year: Option<&str>,
    sub_option: Option<&str>,
) -> Result<ResolvedParameters, ValidationError> {
    QueryParameters {
        option: Some(option.to_owned()),
        year: year.map(str::to_owned),
        sub_option: sub_option.map(str::to_owned),
    }
    .resolve()
}

#[test]
fn every_category_encodes_its_code() {
    let expected = [
        ("producao", "opcao=opt_02"),
        ("processamento", "opcao=opt_03"),
        ("comercializacao", "opcao=opt_04"),
        ("importacao", "opcao=opt_05"),
        ("exportacao", "opcao=opt_06"),
    ];
    for (key, code) in expected {
        let resolved = resolve(key, None, None).unwrap();
        assert_eq!(resolved.option(), code);
        assert_eq!(resolved.original_option(), key);
    }
}

#[test]
fn omitted_year_defaults_to_2023_for_every_option() {
    for category in CATEGORIES {
        let resolved = resolve(category.key, None, None).unwrap();
        assert_eq!(resolved.original_year(), "2023");
        assert_eq!(resolved.year(), "ano=2023");
    }
}

#[test]
fn non_numeric_year_fails_for_every_option() {
    for category in CATEGORIES {
        let err = resolve(category.key, Some("abc"), None).unwrap_err();
        assert_eq!(err, ValidationError::YearNotInteger("abc".into()), "{}", category.key);
    }
}

#[test]
fn padded_and_grouped_years_are_integers() {
    let resolved = resolve("exportacao", Some(" 2_024\n"), None).unwrap();
    assert_eq!(resolved.original_year(), " 2_024\n");
    assert_eq!(resolved.year(), "ano= 2_024\n");

    let err = resolve("exportacao", Some("2__024"), None).unwrap_err();
    assert_eq!(err, ValidationError::YearNotInteger("2__024".into()));
}

#[test]
fn trade_categories_accept_2024() {
    assert_eq!(resolve("exportacao", Some("2024"), None).unwrap().year(), "ano=2024");
    assert_eq!(resolve("importacao", Some("1970"), None).unwrap().year(), "ano=1970");

    let err = resolve("exportacao", Some("2025"), None).unwrap_err();
    assert_eq!(err.to_string(), "year must be between 1970 and 2024");
}

#[test]
fn production_categories_stop_at_2023() {
    assert_eq!(resolve("producao", Some("2023"), None).unwrap().year(), "ano=2023");

    let err = resolve("producao", Some("2024"), None).unwrap_err();
    assert_eq!(err.to_string(), "year must be between 1970 and 2023");

    let err = resolve("comercializacao", Some("1969"), None).unwrap_err();
    assert_eq!(err, ValidationError::YearOutOfRange { first: 1970, last: 2023 });
}

#[test]
fn processing_defaults_to_viniferas() {
    let resolved = resolve("processamento", None, None).unwrap();
    assert_eq!(resolved.original_sub_option(), Some("viniferas"));
    assert_eq!(resolved.sub_option(), Some("subopcao=subopt_01"));
}

#[test]
fn processing_accepts_explicit_sub_option() {
    let resolved = resolve("processamento", None, Some("sem_classificacao")).unwrap();
    assert_eq!(resolved.original_sub_option(), Some("sem_classificacao"));
    assert_eq!(resolved.sub_option(), Some("subopcao=subopt_04"));
}

#[test]
fn processing_rejects_unknown_sub_option() {
    let err = resolve("processamento", None, Some("bogus")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'processamento'"), "{message}");
    for key in ["viniferas", "americanas_e_hibridas", "uvas_de_mesa", "sem_classificacao"] {
        assert!(message.contains(key), "{message}");
    }
}

#[test]
fn production_rejects_any_sub_option() {
    let err = resolve("producao", None, Some("anything")).unwrap_err();
    assert_eq!(err, ValidationError::SubOptionNotAllowed { option: "producao" });

    // Even one that is valid elsewhere.
    let err = resolve("comercializacao", Some("2000"), Some("viniferas")).unwrap_err();
    assert_eq!(err, ValidationError::SubOptionNotAllowed { option: "comercializacao" });
}

#[test]
fn categories_without_vocabulary_leave_sub_option_unset() {
    let resolved = resolve("producao", Some("1999"), None).unwrap();
    assert_eq!(resolved.sub_option(), None);
    assert_eq!(resolved.original_sub_option(), None);
}

fn any_valid_request() -> impl Strategy<Value = QueryParameters> {
    let category = 0..CATEGORIES.len();
    let year = proptest::option::of(1970i64..=2024);
    (category, year, any::<prop::sample::Index>(), any::<bool>())
        .prop_map(|(i, year, sub, explicit_sub)| {
            let category = &CATEGORIES[i];
            let year = year.map(|y| y.min(category.years.last).to_string());
            let subs = category.sub_options;
            let sub_option = (explicit_sub && !subs.is_empty())
                .then(|| subs[sub.index(subs.len())].key.to_owned());
            QueryParameters {
                option: Some(category.key.to_owned()),
                year,
                sub_option,
            }
        })
}

proptest! {
    #[test]
    fn unknown_options_are_rejected(option in "[a-z_]{0,20}") {
        prop_assume!(Category::lookup(&option).is_none());
        let err = resolve(&option, None, None).unwrap_err();
        prop_assert_eq!(err, ValidationError::UnknownOption);
    }

    #[test]
    fn originals_resolve_to_the_same_encoding(request in any_valid_request()) {
        let first = request.resolve().unwrap();
        let again = resolve(
            first.original_option(),
            Some(first.original_year()),
            first.original_sub_option(),
        )
        .unwrap();
        prop_assert_eq!(first, again);
    }
}
