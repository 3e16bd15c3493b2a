use super::*;
use crate::model::RecordId;

#[test]
fn test_parse_line_with_single_score() {
    let record = parse_line("Bob, 72").unwrap();
    assert_eq!(record, StoredRecord::new("Bob", vec![72]));
}

#[test]
fn test_parse_line_with_trailing_empty_field() {
    assert_eq!(parse_line("Eve,").unwrap(), StoredRecord::new("Eve", vec![]));
    assert_eq!(parse_line("Eve, ").unwrap(), StoredRecord::new("Eve", vec![]));
}

#[test]
fn test_parse_line_without_score_field() {
    assert_eq!(parse_line("Eve").unwrap(), StoredRecord::new("Eve", vec![]));
}

#[test]
fn test_parse_line_accepts_placeholder() {
    assert_eq!(
        parse_line("Carol, N/A").unwrap(),
        StoredRecord::new("Carol", vec![])
    );
    assert_eq!(
        parse_line("Carol, n/a").unwrap(),
        StoredRecord::new("Carol", vec![])
    );
}

#[test]
fn test_parse_line_multiple_scores_with_loose_spacing() {
    let record = parse_line("Alice Smith,95,  88 ,100").unwrap();
    assert_eq!(record, StoredRecord::new("Alice Smith", vec![95, 88, 100]));
}

#[test]
fn test_parse_line_keeps_out_of_range_values_for_the_record_to_filter() {
    let record = parse_line("Dan, 120, -3, 50").unwrap();
    assert_eq!(record.scores, vec![120, -3, 50]);
}

#[test]
fn test_parse_line_rejects_malformed_token() {
    assert_eq!(
        parse_line("Bob, 72, abc"),
        Err(FormatError::InvalidScore("abc".to_string()))
    );
    assert_eq!(
        parse_line("Bob, 7.5"),
        Err(FormatError::InvalidScore("7.5".to_string()))
    );
}

#[test]
fn test_parse_line_rejects_blank_name() {
    assert_eq!(parse_line(", 90"), Err(FormatError::BlankName));
}

#[test]
fn test_parse_roster_skips_lines_without_a_name() {
    let records = parse_roster("Bob, 72\n, 5\n   ,\nEve, 90\n").unwrap();
    assert_eq!(
        records,
        vec![
            StoredRecord::new("Bob", vec![72]),
            StoredRecord::new("Eve", vec![90]),
        ]
    );
}

#[test]
fn test_parse_roster_skips_blank_lines() {
    let text = "Alice, 95, 88\n\n   \nBob, 72\nEve,\n";
    let records = parse_roster(text).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "Alice");
    assert_eq!(records[1].scores, vec![72]);
    assert!(records[2].scores.is_empty());
}

#[test]
fn test_parse_roster_reports_first_bad_line() {
    let text = "Alice, 95\n\nBob, seventy\nEve, 1\n";
    let (line, err) = parse_roster(text).unwrap_err();
    assert_eq!(line, 3);
    assert_eq!(err, FormatError::InvalidScore("seventy".to_string()));
}

#[test]
fn test_format_record() {
    let mut record = ScoreRecord::new(RecordId(1), "Alice Smith");
    record.set_scores(vec![95, 88]);
    assert_eq!(format_record(&record), "Alice Smith, 95, 88");

    let empty = ScoreRecord::new(RecordId(2), "Eve");
    assert_eq!(format_record(&empty), "Eve, ");
    assert!(!format_record(&empty).contains(NO_SCORES_PLACEHOLDER));
}

#[test]
fn test_formatted_records_parse_back() {
    let mut alice = ScoreRecord::new(RecordId(1), "Alice");
    alice.set_scores(vec![0, 100, 42]);
    let eve = ScoreRecord::new(RecordId(2), "Eve");

    for record in [alice, eve] {
        let parsed = parse_line(&format_record(&record)).unwrap();
        assert_eq!(parsed.name, record.name());
        let expected = record.scores().iter().map(|&s| i64::from(s)).collect::<Vec<_>>();
        assert_eq!(parsed.scores, expected);
    }
}
