//! Backup export and import format.
//!
//! A backup is the live document serialized as pretty JSON. Import requires
//! a top-level `history` object and the document fields; unknown top-level
//! keys (older backups carried `config`) are ignored.

use chrono::NaiveDate;

use crate::error::{ImportError, Result};
use crate::model::Document;

/// Suggested file name for a backup taken on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("habit-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Serialize a document in backup form.
pub fn export_document(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Validate and decode a backup.
pub fn parse_document(serialized: &str) -> Result<Document, ImportError> {
    let value: serde_json::Value = serde_json::from_str(serialized)?;
    let fields = value.as_object().ok_or(ImportError::NotAnObject)?;
    if !fields.contains_key("history") {
        return Err(ImportError::MissingField("history"));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DayRecord;
    use crate::storage::Config;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn filename_embeds_date() {
        assert_eq!(export_filename(day(2026, 10, 8)), "habit-backup-2026-10-08.json");
    }

    #[test]
    fn export_parses_back_to_same_document() {
        let mut doc = Document::new(day(2026, 9, 1));
        let mut record = DayRecord::new(&Config::default());
        record.comment = "rainy".into();
        record.tasks.get_mut(&2).unwrap().time = 20;
        doc.history.insert(day(2026, 9, 1), record);

        let json = export_document(&doc).unwrap();
        assert_eq!(parse_document(&json).unwrap(), doc);
    }

    #[test]
    fn config_field_is_not_required() {
        let json = r#"{"startDate":"2026-09-01","lastVisit":"2026-09-01","history":{}}"#;
        assert!(parse_document(json).is_ok());
    }

    #[test]
    fn stray_config_field_is_ignored() {
        let json = r#"{"startDate":"2026-09-01","lastVisit":"2026-09-01","history":{},"config":{"tasks":[]}}"#;
        let doc = parse_document(json).unwrap();
        assert!(doc.history.is_empty());
    }

    #[test]
    fn missing_history_is_rejected() {
        let json = r#"{"startDate":"2026-09-01","lastVisit":"2026-09-01"}"#;
        assert!(matches!(
            parse_document(json),
            Err(ImportError::MissingField("history"))
        ));
    }

    #[test]
    fn non_object_and_garbage_are_rejected() {
        assert!(matches!(parse_document("[1,2]"), Err(ImportError::NotAnObject)));
        assert!(matches!(parse_document("not json"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn malformed_date_key_is_rejected() {
        let json = r#"{"startDate":"2026-09-01","lastVisit":"2026-09-01","history":{"yesterday":{"tasks":{}}}}"#;
        assert!(matches!(parse_document(json), Err(ImportError::Parse(_))));
    }
}
