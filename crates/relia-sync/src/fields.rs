//! WAPRO column → CRM contact field mapping.

use relia_core::models::contact::ContactUpsert;

use crate::source::SourceContact;

/// Map one source row to a contact upsert.
///
/// Returns `None` when the row cannot become a CRM contact — a contact
/// without a last name is skipped, not an error.
pub fn map_contact(row: &SourceContact) -> Option<ContactUpsert> {
    let last_name = row.last_name.as_deref().map(str::trim).filter(|s| !s.is_empty())?;

    Some(ContactUpsert {
        wapro_id: row.id,
        parent_id: row.counterparty_id,
        first_name: clean(row.first_name.as_deref()),
        last_name: last_name.to_string(),
        job_title: clean(row.job_title.as_deref()),
        phone: row.phone.as_deref().and_then(normalize_phone),
        mobile: row.mobile.as_deref().and_then(normalize_phone),
        email: clean(row.email.as_deref()),
        secondary_email: clean(row.secondary_email.as_deref()),
        description: clean(row.notes.as_deref()),
    })
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Normalize an ERP phone number: keep a leading `+` and digits, drop
/// spaces, dashes and parentheses. Anything left without digits is
/// dropped entirely.
fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.chars().enumerate() {
        match c {
            '+' if i == 0 => out.push('+'),
            '0'..='9' => out.push(c),
            ' ' | '-' | '(' | ')' | '.' | '/' => {}
            _ => return None,
        }
    }
    if out.chars().any(|c| c.is_ascii_digit()) {
        Some(out)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_without_last_name_is_skipped() {
        let row = SourceContact {
            id: 7,
            first_name: Some("Jan".into()),
            last_name: Some("   ".into()),
            ..Default::default()
        };
        assert!(map_contact(&row).is_none());
    }

    #[test]
    fn full_row_maps_every_field() {
        let row = SourceContact {
            id: 12,
            counterparty_id: Some(3),
            first_name: Some("Jan".into()),
            last_name: Some("Kowalski".into()),
            job_title: Some("Kierownik".into()),
            phone: Some("(22) 123-45-67".into()),
            mobile: Some("+48 600 700 800".into()),
            email: Some("jan@example.com".into()),
            secondary_email: None,
            notes: Some("VIP".into()),
        };
        let upsert = map_contact(&row).unwrap();
        assert_eq!(upsert.wapro_id, 12);
        assert_eq!(upsert.parent_id, Some(3));
        assert_eq!(upsert.last_name, "Kowalski");
        assert_eq!(upsert.phone.as_deref(), Some("221234567"));
        assert_eq!(upsert.mobile.as_deref(), Some("+48600700800"));
        assert_eq!(upsert.description.as_deref(), Some("VIP"));
    }

    #[test]
    fn blank_fields_become_none() {
        let row = SourceContact {
            id: 1,
            last_name: Some("Nowak".into()),
            email: Some("  ".into()),
            ..Default::default()
        };
        let upsert = map_contact(&row).unwrap();
        assert!(upsert.email.is_none());
        assert!(upsert.first_name.is_none());
    }

    #[test]
    fn garbage_phone_is_dropped() {
        assert_eq!(normalize_phone("brak"), None);
        assert_eq!(normalize_phone("---"), None);
        assert_eq!(normalize_phone("+48 601-602-603"), Some("+48601602603".into()));
    }
}
