use serde_json::json;
use structured_fields::{parse, FieldType};

fn json_of(raw: &str, field_type: FieldType) -> serde_json::Value {
    let value = parse(raw.as_bytes(), field_type).unwrap();
    serde_json::to_value(&value).unwrap()
}

#[test]
fn test_item_json() {
    assert_eq!(json_of("42", FieldType::Item), json!([42, []]));
    assert_eq!(json_of("?0", FieldType::Item), json!([false, []]));
    assert_eq!(json_of("\"hi\"", FieldType::Item), json!(["hi", []]));
    assert_eq!(json_of("1.5", FieldType::Item), json!([1.5, []]));
}

#[test]
fn test_token_and_binary_json() {
    assert_eq!(
        json_of("text/html;q=1.0", FieldType::Item),
        json!([{"__type": "token", "value": "text/html"}, [["q", 1.0]]])
    );
    assert_eq!(
        json_of(":aGVsbG8=:", FieldType::Item),
        json!([{"__type": "binary", "value": "aGVsbG8="}, []])
    );
}

#[test]
fn test_list_json() {
    assert_eq!(
        json_of("1, (2 3);a", FieldType::List),
        json!([[1, []], [[[2, []], [3, []]], [["a", true]]]])
    );
}

#[test]
fn test_dictionary_json_keeps_order() {
    assert_eq!(
        json_of("b=1, a, b=2", FieldType::Dictionary),
        json!([["b", [2, []]], ["a", [true, []]]])
    );
}
