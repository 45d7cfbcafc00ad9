use super::*;

#[test]
fn test_string_id_rejects_empty_value() {
    assert!(LabelName::new("").is_none());
    assert!(RuleKey::new(String::new()).is_none());
}

#[test]
fn test_string_id_preserves_value_verbatim() {
    let label = LabelName::new("Type: Feature").unwrap();
    assert_eq!(label.as_str(), "Type: Feature");
    assert_eq!(label.to_string(), "Type: Feature");
}

#[test]
fn test_issue_number_display_is_prefixed() {
    assert_eq!(IssueNumber::new(42).to_string(), "#42");
    assert_eq!(IssueNumber::new(42).as_u64(), 42);
}

#[test]
fn test_delivery_id_parses_header_guid() {
    let id = DeliveryId::parse(" 72d3162e-cc78-11e3-81ab-4c9367dc0958 ").unwrap();
    assert_eq!(id.to_string(), "72d3162e-cc78-11e3-81ab-4c9367dc0958");
}

#[test]
fn test_delivery_id_rejects_garbage() {
    assert!(DeliveryId::parse("not-a-guid").is_none());
}
