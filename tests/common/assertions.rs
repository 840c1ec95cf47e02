//! Domain-specific assertion macros for netnorm harnesses.
//!
//! These add context-rich failure messages that make it clear *which* row of
//! the unified table broke an expectation.

/// Assert the `unified_protocol` column of a row slice, in order.
///
/// ```rust
/// assert_protocols!(rows, ["http", "ssl"]);
/// ```
#[macro_export]
macro_rules! assert_protocols {
    ($rows:expr, $expected:expr) => {{
        let actual: Vec<&str> = $rows.iter().map(|r| r.unified_protocol.as_str()).collect();
        let expected: Vec<&str> = $expected.iter().copied().collect();
        if actual != expected {
            panic!(
                "assert_protocols! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

/// Assert one unified row by its formatted datetime, protocol and byte count.
/// `event_count` is always checked to be 1.
///
/// ```rust
/// assert_row!(rows[0], "2023-11-14T22:13:20Z", "http", 150);
/// ```
#[macro_export]
macro_rules! assert_row {
    ($row:expr, $datetime:expr, $protocol:expr, $bytes:expr) => {{
        let row: &netnorm::UnifiedRecord = &$row;
        let datetime = netnorm::netnorm_core::types::format_datetime(&row.datetime);
        let ok = datetime == $datetime
            && row.unified_protocol == $protocol
            && row.total_bytes == $bytes
            && row.event_count == 1;
        if !ok {
            panic!(
                "assert_row! failed:\n  expected: ({}, {}, {}, 1)\n  actual:   ({}, {}, {}, {})",
                $datetime,
                $protocol,
                $bytes,
                datetime,
                row.unified_protocol,
                row.total_bytes,
                row.event_count
            );
        }
    }};
}

/// Every row of an expansion shares datetime and bytes with the first.
pub fn assert_shared_fields(rows: &[netnorm::UnifiedRecord]) {
    let Some(first) = rows.first() else {
        return;
    };
    for row in rows {
        assert_eq!(row.datetime, first.datetime, "expanded rows must share datetime");
        assert_eq!(row.total_bytes, first.total_bytes, "expanded rows must share total_bytes");
        assert_eq!(row.event_count, 1, "event_count is always 1");
    }
}
