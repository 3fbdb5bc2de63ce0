use super::*;

#[test]
fn prim_of_values() {
    assert_eq!(Value::Int64(1).prim(), Some(Prim::Int64));
    assert_eq!(Value::String("a".into()).prim(), Some(Prim::String));
    assert_eq!(Value::Null.prim(), None);
}

#[test]
fn integral_checks_range() {
    assert_eq!(Value::integral(Prim::Byte, 255), Some(Value::Byte(255)));
    assert_eq!(Value::integral(Prim::Byte, 256), None);
    assert_eq!(Value::integral(Prim::Int32, -4), Some(Value::Int32(-4)));
    assert_eq!(Value::integral(Prim::Double, 1), None);
}

#[test]
fn integral_reinterprets_unsigned_64_bit() {
    assert_eq!(
        Value::integral(Prim::UInt64, -1),
        Some(Value::UInt64(u64::MAX))
    );
}

#[test]
fn display_quotes_text() {
    assert_eq!(Value::String("a\\b".into()).to_string(), r#""a\\b""#);
    assert_eq!(Value::Char('x').to_string(), "'x'");
    assert_eq!(Value::Null.to_string(), "null");
}
