use orders_ingest::domain::money::{Currency, Money, CANONICAL_CURRENCY};

#[test]
fn major_units_become_integer_cents() {
    let m = Money::from_major_units(99.90, Currency::Brl);
    assert_eq!(m.amount_in_cents, 9990);

    let m = Money::from_major_units(0.0, Currency::Usd);
    assert_eq!(m.amount_in_cents, 0);

    let m = Money::from_major_units(80.33, Currency::Eur);
    assert_eq!(m.amount_in_cents, 8033);
}

#[test]
fn currency_codes_round_trip() {
    for c in [Currency::Brl, Currency::Usd, Currency::Eur] {
        assert_eq!(Currency::parse(c.as_str()), Some(c));
    }
    assert_eq!(Currency::parse("GBP"), None);
}

#[test]
fn canonical_currency_is_brl() {
    assert_eq!(CANONICAL_CURRENCY, Currency::Brl);
}
