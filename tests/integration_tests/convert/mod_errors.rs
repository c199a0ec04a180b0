use crate::integration_tests::_support::{FailAt, FailingCursor, FailingWriter, people};
use rowcsv::{ConvertError, Converter, MemoryCursor, Value};

#[test]
fn advance_failure_keeps_rows_already_written() {
    let mut buf = Vec::new();
    let err = Converter::new(FailingCursor::new(5, FailAt::Advance(2))).write_to(&mut buf).unwrap_err();
    assert!(matches!(err, ConvertError::CursorRead(_)));
    assert_eq!(String::from_utf8(buf).unwrap(), "n\n1\n2\n");
}

#[test]
fn scan_failure_is_cursor_read_error() {
    let err = Converter::new(FailingCursor::new(5, FailAt::Scan(1))).into_string().unwrap_err();
    match err {
        ConvertError::CursorRead(source) => assert_eq!(source.to_string(), "bad column value"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn column_failure_writes_nothing() {
    let mut buf = Vec::new();
    let err = Converter::new(FailingCursor::new(1, FailAt::Columns)).write_to(&mut buf).unwrap_err();
    assert!(matches!(err, ConvertError::CursorRead(_)));
    assert!(buf.is_empty());
}

#[test]
fn into_string_returns_no_partial_output() {
    let res = Converter::new(FailingCursor::new(100, FailAt::Advance(50))).into_string();
    assert!(res.is_err());
}

#[test]
fn invalid_time_format_fails_before_output() {
    let mut buf = Vec::new();
    let err = Converter::new(people()).time_format("%Y-%").write_to(&mut buf).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidTimeFormat(_)));
    assert!(buf.is_empty());
}

#[test]
fn non_utf8_bytes_are_encoding_error() {
    let rows = MemoryCursor::new(["blob"]).with_row([Value::Bytes(vec![0xc3, 0x28])]);
    let err = Converter::new(rows).into_string().unwrap_err();
    assert!(matches!(err, ConvertError::Encoding(_)));
    assert!(err.to_string().contains("bytes value is not UTF-8"), "{err}");
}

#[test]
fn invalid_delimiter_rejected() {
    let err = Converter::new(people()).delimiter('"').into_string().unwrap_err();
    assert!(matches!(err, ConvertError::InvalidDelimiter('"')));
}

#[test]
fn sink_failure_is_sink_write_error() {
    let writer = FailingWriter { accepted: Vec::new(), budget: 0 };
    let err = Converter::new(people()).write_to(writer).unwrap_err();
    assert!(matches!(err, ConvertError::SinkWrite(_)));
}

#[test]
fn sink_failure_mid_stream() {
    let mut rows = MemoryCursor::new(["pad"]);
    for _ in 0..2_000 {
        rows.push_row(["x".repeat(64)]);
    }
    let mut writer = FailingWriter { accepted: Vec::new(), budget: 16 * 1024 };
    let err = Converter::new(rows).write_to(&mut writer).unwrap_err();
    assert!(matches!(err, ConvertError::SinkWrite(_)));
    assert!(!writer.accepted.is_empty());
    assert!(writer.accepted.len() <= 16 * 1024);
}
