// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Page};

#[test]
fn test_page_defaults_when_absent() {
    let page: Page = Page::parse(None, None).unwrap();
    assert_eq!(page, Page { limit: 5, offset: 0 });
    assert_eq!(page, Page::default());
}

#[test]
fn test_page_parses_explicit_values() {
    let page: Page = Page::parse(Some("10"), Some("20")).unwrap();
    assert_eq!(page.limit, 10);
    assert_eq!(page.offset, 20);
}

#[test]
fn test_page_rejects_negative_limit() {
    assert_eq!(
        Page::parse(Some("-1"), None),
        Err(DomainError::InvalidPaging {
            param: "limit",
            value: String::from("-1"),
        })
    );
}

#[test]
fn test_page_rejects_non_integer_offset() {
    assert!(matches!(
        Page::parse(None, Some("two")),
        Err(DomainError::InvalidPaging { param: "offset", .. })
    ));
}
