//! # Byte-Layout and Round-Trip Scenarios
//!
//! Source of truth for the on-disk format: exact byte images for small
//! tables, the lock and width invariants, memo heap behaviour, and full
//! write-then-read round-trips. Expected byte values come from the xBase
//! format itself; if a test fails, fix the codec, not the expectation.

use xbase::dbt::{blocks_merged, blocks_unmerged, read_memo, BLOCK_SIZE};
use xbase::table::convert;
use xbase::{ColumnType, Reader, ReadError, RowAddError, Table, Writer};

fn column(table: &mut Table, name: &str, ty: ColumnType, width: usize) {
    table.add_column(name, ty, width).unwrap();
}

mod byte_layout {
    use super::*;

    #[test]
    fn minimal_single_column_write() {
        let mut table = Table::new();
        column(&mut table, "u", ColumnType::Character, 2);
        table.lock();
        table.add_row(vec!["gg".into()]).unwrap();

        let dbf = Writer::new().write(&table).unwrap().dbf;

        // 32 header + 32 descriptor + 1 terminator + 3 record + 1 EOF.
        assert_eq!(dbf.len(), 69);
        assert_eq!(dbf[0], 0x03);
        assert_eq!(&dbf[4..8], &[1, 0, 0, 0]);
        assert_eq!(&dbf[8..10], &[0x41, 0x00]);
        assert_eq!(&dbf[10..12], &[0x03, 0x00]);
        assert_eq!(dbf[64], 0x0D);
        assert_eq!(&dbf[65..68], &[0x20, b'g', b'g']);
        assert_eq!(dbf[68], 0x1A);
    }

    #[test]
    fn deleted_records_follow_live_records() {
        let mut table = Table::new();
        column(&mut table, "u", ColumnType::Character, 2);
        table.lock();
        table.add_row(vec!["aa".into()]).unwrap();
        table.add_row_deleted(vec!["xx".into()]).unwrap();

        let dbf = Writer::new().write(&table).unwrap().dbf;
        assert_eq!(
            &dbf[65..],
            &[0x20, b'a', b'a', 0x2A, b'x', b'x', 0x1A]
        );
    }

    #[test]
    fn numeric_fields_are_right_justified() {
        let mut table = Table::new();
        column(&mut table, "num", ColumnType::Numeric, 1);
        column(&mut table, "score", ColumnType::Float, 4);
        table.lock();
        table.add_row(vec!["1".into(), "2.50".into()]).unwrap();

        let dbf = Writer::new().write(&table).unwrap().dbf;
        let record_start = 32 + 2 * 32 + 1;
        assert_eq!(
            &dbf[record_start..record_start + 6],
            &[0x20, b'1', b'2', b'.', b'5', b'0']
        );

        // A narrower value picks up left space padding.
        let mut table = Table::new();
        column(&mut table, "n", ColumnType::Numeric, 4);
        table.lock();
        table.add_row(vec!["37".into()]).unwrap();
        let dbf = Writer::new().write(&table).unwrap().dbf;
        let record_start = 32 + 32 + 1;
        assert_eq!(
            &dbf[record_start..record_start + 5],
            &[0x20, b' ', b' ', b'3', b'7']
        );
    }

    #[test]
    fn header_version_flags_memo_presence() {
        let mut table = Table::new();
        column(&mut table, "note", ColumnType::Memo, 10);
        table.lock();

        let image = Writer::new().write(&table).unwrap();
        assert_eq!(image.dbf[0], 0x83);

        let mut table = Table::new();
        column(&mut table, "name", ColumnType::Character, 10);
        table.lock();
        let image = Writer::new().write(&table).unwrap();
        assert_eq!(image.dbf[0], 0x03);
    }

    #[test]
    fn record_area_is_record_aligned() {
        let mut table = Table::new();
        column(&mut table, "id", ColumnType::Long, 4);
        column(&mut table, "name", ColumnType::Character, 7);
        table.lock();
        for i in 0..5 {
            table.add_row(vec![i.to_string(), format!("row{i}")]).unwrap();
        }

        let dbf = Writer::new().write(&table).unwrap().dbf;
        let record_start = 32 + 2 * 32 + 1;
        let record_len = 1 + 4 + 7;
        assert_eq!(*dbf.last().unwrap(), 0x1A);
        assert_eq!((dbf.len() - 1 - record_start) % record_len, 0);
    }
}

mod memo_heap {
    use super::*;

    #[test]
    fn spanning_payload_occupies_two_blocks() {
        let payload = "A".repeat(800);
        let mut table = Table::new();
        column(&mut table, "body", ColumnType::Memo, 10);
        table.lock();
        table.add_row(vec![payload.clone()]).unwrap();

        let image = Writer::new().write(&table).unwrap();
        let dbt = image.dbt.unwrap();

        assert_eq!(dbt.len(), 512 + 1024);
        assert_eq!(&dbt[..4], &[3, 0, 0, 0]);
        assert!(dbt[512..1312].iter().all(|&b| b == b'A'));
        assert_eq!(&dbt[1534..], &[0x1A, 0x1A]);

        // The record's memo field carries the 1-based block index.
        let record_start = 32 + 32 + 1;
        assert_eq!(
            &image.dbf[record_start + 1..record_start + 11],
            b"0000000001"
        );
    }

    #[test]
    fn memo_content_resolves_through_the_index() {
        let mut table = Table::new();
        column(&mut table, "id", ColumnType::Numeric, 2);
        column(&mut table, "body", ColumnType::Memo, 10);
        table.lock();
        table
            .add_row(vec!["1".into(), "first note".into()])
            .unwrap();

        let image = Writer::new().write(&table).unwrap();
        let dbt = image.dbt.unwrap();

        let decoded = Reader::new().read(&image.dbf).unwrap();
        let index: u32 = decoded.rows()[0][1].parse().unwrap();
        assert_eq!(index, 1);

        let content = read_memo(&dbt, index).unwrap();
        assert_eq!(content.trim_end_matches('\0'), "first note");
    }

    #[test]
    fn successive_payloads_get_successive_spans() {
        let mut table = Table::new();
        column(&mut table, "body", ColumnType::Memo, 10);
        table.lock();
        table.add_row(vec!["B".repeat(700)]).unwrap();
        table.add_row(vec!["short".into()]).unwrap();

        let image = Writer::new().write(&table).unwrap();
        let decoded = Reader::new().read(&image.dbf).unwrap();
        assert_eq!(decoded.rows()[0][0], "0000000001");
        assert_eq!(decoded.rows()[1][0], "0000000003");

        let dbt = image.dbt.unwrap();
        assert_eq!(dbt.len() % BLOCK_SIZE, 0);
        assert_eq!(&dbt[..4], &[4, 0, 0, 0]);
    }

    #[test]
    fn merged_and_unmerged_enumeration() {
        let mut table = Table::new();
        column(&mut table, "body", ColumnType::Memo, 10);
        table.lock();
        table.add_row(vec!["hello".into()]).unwrap();

        let dbt = Writer::new().write(&table).unwrap().dbt.unwrap();

        let merged = blocks_merged(&dbt).unwrap();
        assert_eq!(merged[&0], "2");
        assert_eq!(merged[&1].trim_end_matches('\0'), "hello");

        let unmerged = blocks_unmerged(&dbt).unwrap();
        assert_eq!(unmerged[0], "2");
        assert!(unmerged[1].starts_with("hello"));
        assert_eq!(unmerged[1].len(), 511);
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn all_field_types_survive_write_then_read() {
        let mut table = Table::new();
        column(&mut table, "name", ColumnType::Character, 8);
        column(&mut table, "born", ColumnType::Date, 8);
        column(&mut table, "score", ColumnType::Float, 5);
        column(&mut table, "count", ColumnType::Numeric, 3);
        column(&mut table, "ok", ColumnType::Logical, 1);
        column(&mut table, "id", ColumnType::Long, 4);
        column(&mut table, "serial", ColumnType::Autoincrement, 4);
        column(&mut table, "ratio", ColumnType::Double, 8);
        column(&mut table, "seen", ColumnType::Timestamp, 8);
        table.lock();

        let row = vec![
            "karin".to_string(),
            "20241219".to_string(),
            "12.25".to_string(),
            "107".to_string(),
            "T".to_string(),
            "90210".to_string(),
            "7".to_string(),
            "2.5".to_string(),
            "2460664 26706000".to_string(),
        ];
        table.add_row(row.clone()).unwrap();
        table.add_row_deleted(row.clone()).unwrap();

        let image = Writer::new().write(&table).unwrap();
        let decoded = Reader::new().read(&image.dbf).unwrap();

        let expect_columns: Vec<_> = table
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.column_type(), c.width()))
            .collect();
        let got_columns: Vec<_> = decoded
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.column_type(), c.width()))
            .collect();
        assert_eq!(got_columns, expect_columns);

        assert_eq!(decoded.record_count(), 2);
        let trim = |values: &[String]| -> Vec<String> {
            values
                .iter()
                .map(|v| v.trim_end_matches('\0').to_string())
                .collect()
        };
        assert_eq!(trim(&decoded.rows()[0]), row);
        assert_eq!(trim(&decoded.deleted_rows()[0]), row);
    }

    #[test]
    fn timestamp_field_bytes_and_inverse() {
        let datetime = convert::timestamp_to_date("2460664 26706000").unwrap();
        assert_eq!(
            datetime,
            chrono::NaiveDate::from_ymd_opt(2024, 12, 19)
                .unwrap()
                .and_hms_opt(7, 25, 6)
                .unwrap()
        );
        let encoded = convert::date_to_timestamp(datetime);
        assert_eq!(encoded, "2460664 26706000");

        let mut table = Table::new();
        column(&mut table, "seen", ColumnType::Timestamp, 8);
        table.lock();
        table.add_row(vec![encoded]).unwrap();

        let dbf = Writer::new().write(&table).unwrap().dbf;
        let record_start = 32 + 32 + 1;
        assert_eq!(
            &dbf[record_start + 1..record_start + 9],
            &[
                2460664u32.to_le_bytes(),
                26706000u32.to_le_bytes()
            ]
            .concat()[..]
        );

        let decoded = Reader::new().read(&dbf).unwrap();
        assert_eq!(decoded.rows()[0][0], "2460664 26706000");
    }

    #[test]
    fn negative_long_reads_back_unsigned() {
        let mut table = Table::new();
        column(&mut table, "id", ColumnType::Long, 4);
        table.lock();
        table.add_row(vec!["-1".into()]).unwrap();

        let image = Writer::new().write(&table).unwrap();
        let decoded = Reader::new().read(&image.dbf).unwrap();
        // Written as signed, surfaced as unsigned.
        assert_eq!(decoded.rows()[0][0], u32::MAX.to_string());
    }

    #[test]
    fn tampered_record_length_is_rejected() {
        let mut table = Table::new();
        column(&mut table, "name", ColumnType::Character, 6);
        column(&mut table, "num", ColumnType::Numeric, 3);
        table.lock();
        table.add_row(vec!["abc".into(), "1".into()]).unwrap();

        let mut dbf = Writer::new().write(&table).unwrap().dbf;
        // Drop the marker byte from the declared record length.
        dbf[10..12].copy_from_slice(&9u16.to_le_bytes());

        let err = Reader::new().read(&dbf).unwrap_err();
        assert_eq!(
            err,
            ReadError::RecordLengthMismatch {
                described: 10,
                declared: 9
            }
        );
        assert!(err.to_string().contains("record length mismatch"));
    }
}

mod invariants {
    use super::*;

    #[test]
    fn lock_gates_columns_and_rows() {
        let mut table = Table::new();
        column(&mut table, "a", ColumnType::Character, 1);
        assert!(matches!(
            table.add_row(vec!["x".into()]),
            Err(RowAddError::ColumnsNotLocked)
        ));
        table.lock();
        assert!(table.add_column("b", ColumnType::Character, 1).is_err());
        assert!(table.add_row(vec!["x".into()]).is_ok());
    }

    #[test]
    fn fixed_width_types_are_normalised() {
        let mut table = Table::new();
        column(&mut table, "d", ColumnType::Date, 99);
        column(&mut table, "l", ColumnType::Logical, 99);
        column(&mut table, "m", ColumnType::Memo, 99);
        column(&mut table, "i", ColumnType::Long, 99);
        column(&mut table, "o", ColumnType::Double, 99);
        column(&mut table, "t", ColumnType::Timestamp, 99);

        let widths: Vec<u8> = table.columns().iter().map(|c| c.width()).collect();
        assert_eq!(widths, vec![8, 1, 10, 4, 8, 8]);
    }
}
