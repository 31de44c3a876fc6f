// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact submission queries. Append and point lookups only.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use eerbeek_core::{ContactSubmission, EerbeekError, NewContact, Subject, SubmissionId, Urgency};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Insert a validated submission and return it with its assigned id.
pub async fn insert_contact(
    db: &Database,
    contact: NewContact,
) -> Result<ContactSubmission, EerbeekError> {
    let row = contact.clone();
    let id = db
        .connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                "INSERT INTO contact_submissions
                    (name, company, email, phone, subject, urgency, message,
                     privacy_consent, newsletter_opt_in, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    row.name,
                    row.company,
                    row.email,
                    row.phone,
                    row.subject.to_string(),
                    row.urgency.to_string(),
                    row.message,
                    row.privacy_consent,
                    row.newsletter_opt_in,
                    format_timestamp(&row.created_at),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(contact.with_id(SubmissionId(id)))
}

/// Fetch a submission by id.
pub async fn get_contact(
    db: &Database,
    id: SubmissionId,
) -> Result<Option<ContactSubmission>, EerbeekError> {
    db.connection()
        .call(move |conn| -> Result<Option<ContactSubmission>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, name, company, email, phone, subject, urgency, message,
                        privacy_consent, newsletter_opt_in, created_at
                 FROM contact_submissions WHERE id = ?1",
            )?;
            let mut rows = stmt.query(params![id.0])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_contact(row)?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Count stored submissions.
pub async fn count_contacts(db: &Database) -> Result<i64, EerbeekError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM contact_submissions", [], |row| row.get(0))
        })
        .await
        .map_err(map_tr_err)
}

fn row_to_contact(row: &rusqlite::Row<'_>) -> Result<ContactSubmission, rusqlite::Error> {
    let subject: String = row.get(5)?;
    let urgency: String = row.get(6)?;
    let created_at: String = row.get(10)?;

    Ok(ContactSubmission {
        id: SubmissionId(row.get(0)?),
        name: row.get(1)?,
        company: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        subject: Subject::from_str(&subject).map_err(|e| conversion_error(5, e))?,
        urgency: Urgency::from_str(&urgency).map_err(|e| conversion_error(6, e))?,
        message: row.get(7)?,
        privacy_consent: row.get(8)?,
        newsletter_opt_in: row.get(9)?,
        created_at: parse_timestamp(&created_at).map_err(|e| conversion_error(10, e))?,
    })
}

fn conversion_error<E>(column: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

/// RFC 3339 with as many fractional digits as needed, so reads round-trip exactly.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("contacts.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn sample(name: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            company: Some("Papierfabriek BV".to_string()),
            email: "jan@example.com".to_string(),
            phone: None,
            subject: Subject::QuoteRequest,
            urgency: Urgency::High,
            message: "Kunnen jullie ons netwerk beveiligen?".to_string(),
            privacy_consent: true,
            newsletter_opt_in: true,
            created_at: Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
                + chrono::Duration::nanoseconds(123_456_789),
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let (db, _dir) = setup_db().await;
        let stored = insert_contact(&db, sample("Jan Jansen")).await.unwrap();
        assert!(stored.id.0 > 0);

        let fetched = get_contact(&db, stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.created_at.timestamp_subsec_nanos(), 123_456_789);
    }

    #[tokio::test]
    async fn ids_increase_monotonically() {
        let (db, _dir) = setup_db().await;
        let a = insert_contact(&db, sample("A")).await.unwrap();
        let b = insert_contact(&db, sample("B")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(count_contacts(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_contact(&db, SubmissionId(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn schema_rejects_updates_and_deletes() {
        let (db, _dir) = setup_db().await;
        let stored = insert_contact(&db, sample("Jan")).await.unwrap();
        let id = stored.id.0;

        let update = db
            .connection()
            .call(move |conn| -> Result<usize, rusqlite::Error> {
                conn.execute(
                    "UPDATE contact_submissions SET name = 'x' WHERE id = ?1",
                    params![id],
                )
            })
            .await;
        assert!(update.is_err());

        let delete = db
            .connection()
            .call(move |conn| -> Result<usize, rusqlite::Error> {
                conn.execute("DELETE FROM contact_submissions WHERE id = ?1", params![id])
            })
            .await;
        assert!(delete.is_err());
        assert_eq!(count_contacts(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn schema_rejects_rows_without_consent() {
        let (db, _dir) = setup_db().await;
        let mut contact = sample("Jan");
        contact.privacy_consent = false;
        assert!(insert_contact(&db, contact).await.is_err());
        assert_eq!(count_contacts(&db).await.unwrap(), 0);
    }
}
