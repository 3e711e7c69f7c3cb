// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use procura_domain::{Page, ServiceType, Version};
use procura_persistence::PersistenceError;

use crate::{
    ApiError, EditTenderRequest, parse_page, parse_service_types, parse_tender_id, parse_version,
    required, translate_persistence_error,
};

#[test]
fn test_required_rejects_absent_and_blank() {
    assert_eq!(required("username", Some("alice")).unwrap(), "alice");
    assert!(matches!(
        required("username", None),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "username"
    ));
    assert!(required("username", Some("   ")).is_err());
}

#[test]
fn test_page_defaults_and_rejects_negative_values() {
    assert_eq!(parse_page(None, None).unwrap(), Page::default());
    assert_eq!(
        parse_page(Some("10"), Some("20")).unwrap(),
        Page {
            limit: 10,
            offset: 20
        }
    );
    assert!(matches!(
        parse_page(Some("-1"), None),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "limit"
    ));
    assert!(matches!(
        parse_page(None, Some("ten")),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "offset"
    ));
}

#[test]
fn test_empty_service_type_filter_selects_all() {
    let none: [&str; 0] = [];
    assert_eq!(parse_service_types(&none).unwrap(), ServiceType::ALL.to_vec());
    assert_eq!(
        parse_service_types(&["Delivery", "Manufacture"]).unwrap(),
        vec![ServiceType::Delivery, ServiceType::Manufacture]
    );
    assert!(parse_service_types(&["Delivery", "Catering"]).is_err());
}

#[test]
fn test_version_must_be_a_positive_integer() {
    assert_eq!(parse_version("3").unwrap(), Version::new(3).unwrap());
    assert!(parse_version("0").is_err());
    assert!(parse_version("-2").is_err());
    assert!(parse_version("latest").is_err());
}

#[test]
fn test_tender_id_must_be_a_uuid() {
    assert!(parse_tender_id("0f8fad5b-d9cb-469f-a165-70867728950e").is_ok());
    assert!(matches!(
        parse_tender_id("42"),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "tender"
    ));
}

#[test]
fn test_storage_failure_detail_is_not_leaked() {
    let err: ApiError =
        translate_persistence_error(PersistenceError::DatabaseError(String::from("table locked")));

    let ApiError::Internal { message } = err else {
        panic!("expected an internal error");
    };
    assert!(!message.contains("table locked"));
}

#[test]
fn test_edit_request_accepts_snake_case_service_type() {
    let camel: EditTenderRequest =
        serde_json::from_str(r#"{"serviceType":"Delivery"}"#).unwrap();
    let snake: EditTenderRequest =
        serde_json::from_str(r#"{"service_type":"Delivery"}"#).unwrap();

    assert_eq!(camel.service_type.as_deref(), Some("Delivery"));
    assert_eq!(camel, snake);
}
