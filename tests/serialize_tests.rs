use structured_fields::{
    parse_item, serialize, serialize_dictionary, serialize_item, serialize_list, BareItem, Decimal,
    Dictionary, Error, InnerList, Item, ListEntry, Token, Value,
};

fn item_text(bare_item: impl Into<BareItem>) -> Result<String, Error> {
    serialize_item(&Item::new(bare_item))
}

#[test]
fn test_integer_boundaries() {
    assert_eq!(item_text(999_999_999_999_999i64).unwrap(), "999999999999999");
    assert_eq!(
        item_text(1_000_000_000_000_000i64),
        Err(Error::IntegerOutOfRange(1_000_000_000_000_000))
    );
    assert_eq!(
        item_text(-1_000_000_000_000_000i64),
        Err(Error::IntegerOutOfRange(-1_000_000_000_000_000))
    );

    assert!(parse_item(b"999999999999999").is_ok());
    assert!(matches!(
        parse_item(b"1000000000000000"),
        Err(Error::IntegerTooLong { .. })
    ));
    assert!(matches!(
        parse_item(b"-1000000000000000"),
        Err(Error::IntegerTooLong { .. })
    ));
}

#[test]
fn test_decimal_rounding_from_floats() {
    let text = |v: f64| item_text(Decimal::try_from(v).unwrap()).unwrap();

    assert_eq!(text(1.123), "1.123");
    // Ties go to the even thousandth.
    assert_eq!(text(1.0005), "1.0");
    assert_eq!(text(1.0015), "1.002");
    assert_eq!(text(2.0025), "2.002");
    assert_eq!(text(-1.0035), "-1.004");
    // Above the tie.
    assert_eq!(text(1.00051), "1.001");
    assert_eq!(text(0.1), "0.1");
    assert_eq!(text(10.0), "10.0");
}

#[test]
fn test_decimal_integer_part_limit() {
    let max = Decimal::try_from(999_999_999_999.999).unwrap();
    assert_eq!(item_text(max).unwrap(), "999999999999.999");

    // Rounding pushes the integer part to 13 digits.
    let rounded = Decimal::try_from(999_999_999_999.9996).unwrap();
    assert!(matches!(
        item_text(rounded),
        Err(Error::DecimalOutOfRange(_))
    ));
}

#[test]
fn test_string_escaping() {
    let text = item_text("\"\\").unwrap();
    assert_eq!(text, r#""\"\\""#);

    let parsed = parse_item(text.as_bytes()).unwrap();
    assert_eq!(parsed.bare_item.as_str(), Some("\"\\"));
}

#[test]
fn test_unserializable_strings_and_tokens() {
    assert!(matches!(
        item_text("line\nbreak"),
        Err(Error::NonSerializableCharacter(_))
    ));
    assert!(matches!(
        item_text("\u{2603}"),
        Err(Error::NonSerializableCharacter(_))
    ));
    assert!(matches!(
        item_text(Token::new("a,b")),
        Err(Error::InvalidToken(_))
    ));
    assert!(matches!(
        item_text(Token::new("-a")),
        Err(Error::InvalidToken(_))
    ));
}

#[test]
fn test_empty_containers_are_absent() {
    assert_eq!(serialize_list(&[]), Ok(None));
    assert_eq!(serialize_dictionary(&Dictionary::new()), Ok(None));
    assert_eq!(serialize(&Value::List(Vec::new())), Ok(None));
    assert_eq!(serialize(&Value::Dictionary(Dictionary::new())), Ok(None));
}

#[test]
fn test_item_with_decimal_parameter() {
    let item = Item::new(Token::new("text/html")).with_param("q", Decimal::from_thousandths(1000));
    assert_eq!(
        serialize(&Value::Item(item)).unwrap(),
        Some(b"text/html;q=1.0".to_vec())
    );
}

#[test]
fn test_list_with_inner_lists() {
    let list = vec![
        ListEntry::from(
            InnerList::new(vec![
                Item::new("foo").with_param("a", 1),
                Item::new(Token::new("bar")),
            ])
            .with_param("lvl", 5),
        ),
        ListEntry::from(Item::new(b"\x00\xff".to_vec())),
        ListEntry::from(InnerList::default()),
    ];
    assert_eq!(
        serialize_list(&list).unwrap().as_deref(),
        Some(r#"("foo";a=1 bar);lvl=5, :AP8=:, ()"#)
    );
}

#[test]
fn test_dictionary_true_members_drop_value() {
    let mut dict = Dictionary::new();
    dict.insert("a".to_string(), Item::new(true).into());
    dict.insert("b".to_string(), Item::new(true).with_param("c", false).into());
    dict.insert("d".to_string(), InnerList::new(vec![]).with_param("e", true).into());
    assert_eq!(
        serialize_dictionary(&dict).unwrap().as_deref(),
        Some("a, b;c=?0, d=();e")
    );
}

#[test]
fn test_parameter_key_validation() {
    let item = Item::new(1).with_param("ok", 1).with_param("not ok", 2);
    assert_eq!(
        serialize_item(&item),
        Err(Error::InvalidKey("not ok".to_string()))
    );
}
