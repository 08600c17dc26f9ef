use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_text_protocol_integers() {
    let value = mysql_value_to_value(
        mysql_async::Value::Bytes(b"3306".to_vec()),
        ColumnType::MYSQL_TYPE_LONG,
    );
    assert_eq!(value, Value::Int64(3306));

    let value = mysql_value_to_value(
        mysql_async::Value::Bytes(b"18446744073709551615".to_vec()),
        ColumnType::MYSQL_TYPE_LONGLONG,
    );
    assert_eq!(value, Value::UInt64(u64::MAX));
}

#[test]
fn test_text_protocol_strings() {
    // SHOW SLAVE STATUS reports numeric columns as VARCHAR
    let value = mysql_value_to_value(
        mysql_async::Value::Bytes(b"500".to_vec()),
        ColumnType::MYSQL_TYPE_VAR_STRING,
    );
    assert_eq!(value, Value::from("500"));
    assert_eq!(value.to_u64_lenient(), 500);
}

#[test]
fn test_non_utf8_bytes_stay_bytes() {
    let value = mysql_value_to_value(
        mysql_async::Value::Bytes(vec![0xff, 0xfe]),
        ColumnType::MYSQL_TYPE_BLOB,
    );
    assert_eq!(value, Value::Bytes(vec![0xff, 0xfe]));
}

#[test]
fn test_binary_protocol_values() {
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::NULL, ColumnType::MYSQL_TYPE_LONG),
        Value::Null
    );
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::Int(-1), ColumnType::MYSQL_TYPE_LONG),
        Value::Int64(-1)
    );
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::UInt(7), ColumnType::MYSQL_TYPE_LONGLONG),
        Value::UInt64(7)
    );
    assert_eq!(
        mysql_value_to_value(mysql_async::Value::Double(0.5), ColumnType::MYSQL_TYPE_DOUBLE),
        Value::Float64(0.5)
    );
}

#[test]
fn test_temporal_values() {
    assert_eq!(
        mysql_value_to_value(
            mysql_async::Value::Date(2016, 6, 14, 0, 0, 0, 0),
            ColumnType::MYSQL_TYPE_DATE
        ),
        Value::from("2016-06-14")
    );
    assert_eq!(
        mysql_value_to_value(
            mysql_async::Value::Date(2016, 6, 14, 10, 12, 31, 0),
            ColumnType::MYSQL_TYPE_DATETIME
        ),
        Value::from("2016-06-14 10:12:31")
    );
    assert_eq!(
        mysql_value_to_value(
            mysql_async::Value::Time(true, 1, 2, 3, 4, 5),
            ColumnType::MYSQL_TYPE_TIME
        ),
        Value::from("-26:03:04.000005")
    );
}

#[test]
fn test_execution_time_saturates() {
    assert_eq!(saturating_millis(Duration::from_micros(2_500)), 2);
    assert_eq!(saturating_millis(Duration::from_secs(u64::MAX)), u64::MAX);
    assert_eq!(saturating_millis(Duration::MAX), u64::MAX);
}
