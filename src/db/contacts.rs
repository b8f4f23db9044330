use crate::db::connection::Database;
use crate::domain::contact::{ContactInput, ContactSubmission};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Row};

fn row_to_submission(row: &Row) -> rusqlite::Result<ContactSubmission> {
    Ok(ContactSubmission {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        message: row.get(4)?,
        property_id: row.get(5)?,
        interest_type: row.get(6)?,
        submission_type: row.get(7)?,
        preferred_date: row.get(8)?,
        preferred_time: row.get(9)?,
        submitted_at: row.get(10)?,
    })
}

pub fn insert_submission(
    db: &Database,
    input: &ContactInput,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO contact_submissions (
                name, email, phone, message, property_id,
                interest_type, submission_type, preferred_date, preferred_time,
                submitted_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                input.name,
                input.email,
                input.phone,
                input.message,
                input.property_id,
                input.interest_type,
                input.submission_type,
                input.preferred_date,
                input.preferred_time,
                now,
            ],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(conn.last_insert_rowid())
    })
}

pub fn find_submission(db: &Database, id: i64) -> Result<Option<ContactSubmission>, ServerError> {
    db.with_conn(|conn| {
        conn.query_row(
            r#"
            SELECT id, name, email, phone, message, property_id,
                   interest_type, submission_type, preferred_date, preferred_time,
                   submitted_at
            FROM contact_submissions WHERE id = ?1
            "#,
            params![id],
            row_to_submission,
        )
        .optional()
        .map_err(|e| ServerError::DbError(e.to_string()))
    })
}

pub fn list_submissions(db: &Database) -> Result<Vec<ContactSubmission>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, name, email, phone, message, property_id,
                       interest_type, submission_type, preferred_date, preferred_time,
                       submitted_at
                FROM contact_submissions
                ORDER BY submitted_at DESC, id DESC
                "#,
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_submission)
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut submissions = Vec::new();
        for row in rows {
            submissions.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(submissions)
    })
}
