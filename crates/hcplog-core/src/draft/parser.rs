use crate::domain::DraftRecord;
use crate::draft::key::DraftKey;
use crate::draft::EMPHASIS;
use crate::time::NOT_AVAILABLE;

/// Parses `Key: Value` draft text into a partial record.
///
/// Never fails: lines without a colon and unknown labels are skipped, and a
/// repeated label overwrites the earlier value.
pub fn parse_draft(text: &str) -> DraftRecord {
    let mut draft = DraftRecord::default();

    for line in text.lines() {
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            continue;
        };
        let key = raw_key.replace(EMPHASIS, "");
        let value = raw_value.replace(EMPHASIS, "");
        let value = match value.trim() {
            NOT_AVAILABLE => "",
            other => other,
        };

        if let Some(key) = DraftKey::from_label(key.trim()) {
            key.assign(&mut draft, value);
        }
    }

    draft
}
