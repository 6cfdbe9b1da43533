use super::*;

#[test]
fn test_from_name_championgg() {
    let source = SourceKind::from_name("championgg").unwrap().create(&HttpConfig::default());
    assert_eq!(source.name(), "championgg");
    assert!(source.supports_roles());
}

#[test]
fn test_from_name_probuilds_has_no_roles() {
    let source = SourceKind::from_name("probuilds").unwrap().create(&HttpConfig::default());
    assert_eq!(source.name(), "probuilds");
    assert!(!source.supports_roles());
}

#[test]
fn test_from_name_case_insensitive() {
    let source = SourceKind::from_name(" OPGG ").unwrap().create(&HttpConfig::default());
    assert_eq!(source.name(), "opgg");
}

#[test]
fn test_from_name_unknown() {
    let result = SourceKind::from_name(" metasrc ");
    assert!(matches!(result, Err(LbError::SourceNotFound(name)) if name == "metasrc"));
}

#[test]
fn test_all_sources() {
    let sources = all_sources(&HttpConfig::default());
    let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["championgg", "probuilds", "opgg"]);
    assert_eq!(names, source_names());
}

#[test]
fn test_source_kind_name_matches_impl() {
    for kind in SourceKind::ALL {
        let source = kind.create(&HttpConfig::default());
        assert_eq!(source.name(), kind.as_str());
        assert_eq!(kind.to_string(), kind.as_str());
    }
}

#[test]
fn test_fetched_into_inner() {
    let found = Fetched::Found(vec![1, 2]);
    assert!(found.is_found());
    assert_eq!(found.into_inner(), vec![1, 2]);

    let missing = Fetched::not_found(vec![3], "starters missing");
    assert!(!missing.is_found());
    assert_eq!(missing.into_inner(), vec![3]);
}
