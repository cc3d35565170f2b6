use stock_sweep::notify::{is_valid_address, resolve_recipient};

#[test]
fn configured_address_wins() {
    assert_eq!(
        resolve_recipient("ops@example.com", "shop@example.com"),
        "ops@example.com"
    );
}

#[test]
fn unusable_configured_address_falls_back_to_system_address() {
    assert_eq!(resolve_recipient("", "shop@example.com"), "shop@example.com");
    assert_eq!(
        resolve_recipient("not-an-address", "shop@example.com"),
        "shop@example.com"
    );
    assert_eq!(
        resolve_recipient("a b@example.com", "shop@example.com"),
        "shop@example.com"
    );
}

#[test]
fn fallback_is_returned_verbatim() {
    // Resolution never fails; a broken system address surfaces later.
    assert_eq!(resolve_recipient("", ""), "");
}

#[test]
fn address_validation() {
    assert!(is_valid_address("ops@example.com"));
    assert!(is_valid_address("a.b+tag@mail.example.co"));
    assert!(!is_valid_address(""));
    assert!(!is_valid_address("user@localhost"));
    assert!(!is_valid_address("@example.com"));
    assert!(!is_valid_address("ops@example.com "));
    assert!(!is_valid_address("zwei@wörter.de"));
}
