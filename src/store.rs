// 🗄️ Submission Store - SQLite persistence + CSV import
// The persistence collaborator: holds raw submissions and filters them by cohort.

use crate::error::SourceError;
use crate::source::RecordSource;
use crate::submission::{CohortKey, NewSubmission, PayKind, SubmissionRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Outcome of a batch import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

/// A CSV row together with where it came from.
#[derive(Debug, Clone)]
pub struct ImportedRow {
    pub submission: NewSubmission,
    pub source_file: String,
    pub line_number: u64,
}

impl ImportedRow {
    /// Fingerprint used to make re-imports of the same file idempotent.
    pub fn fingerprint(&self) -> String {
        let s = &self.submission;
        let mut hasher = Sha256::new();
        hasher.update(format!(
            "{}|{}|{}|{}|{}|{}|{:?}|{:?}|{:?}",
            self.source_file,
            self.line_number,
            s.region,
            s.category,
            s.years_experience,
            s.pay_type,
            s.hourly_rate,
            s.annual_salary,
            s.employer
        ));
        format!("{:x}", hasher.finalize())
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS salary_submissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            submission_uuid TEXT UNIQUE NOT NULL,
            import_fingerprint TEXT UNIQUE,
            category TEXT NOT NULL,
            region TEXT NOT NULL,
            years_experience REAL NOT NULL,
            pay_type TEXT NOT NULL,
            hourly_rate REAL,
            annual_salary REAL,
            employer TEXT,
            submitted_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_submissions_cohort
         ON salary_submissions(region, category)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// WRITES
// ============================================================================

fn insert_record(
    conn: &Connection,
    record: &SubmissionRecord,
    fingerprint: Option<&str>,
) -> rusqlite::Result<String> {
    let id = uuid::Uuid::new_v4().to_string();

    conn.execute(
        "INSERT INTO salary_submissions (
            submission_uuid, import_fingerprint, category, region, years_experience,
            pay_type, hourly_rate, annual_salary, employer, submitted_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            fingerprint,
            record.category,
            record.region,
            record.years_experience,
            record.pay_kind.as_str(),
            record.hourly_rate,
            record.annual_salary,
            record.employer,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(id)
}

/// Validate and store one new submission. Returns its generated id.
pub fn insert_submission(conn: &Connection, submission: NewSubmission) -> Result<String> {
    submission.validate()?;
    let record = submission.into_record();

    let id = insert_record(conn, &record, None).context("Failed to store submission")?;
    debug!(cohort = %record.cohort_key(), %id, "submission stored");

    Ok(id)
}

/// Store imported rows, skipping invalid rows and rows already imported.
pub fn insert_imported(conn: &Connection, rows: &[ImportedRow]) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for row in rows {
        if let Err(e) = row.submission.validate() {
            debug!(line = row.line_number, error = %e, "skipping invalid row");
            summary.rejected += 1;
            continue;
        }

        let fingerprint = row.fingerprint();
        let record = row.submission.clone().into_record();

        match insert_record(conn, &record, Some(&fingerprint)) {
            Ok(_) => summary.inserted += 1,
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                summary.duplicates += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        rejected = summary.rejected,
        "import finished"
    );

    Ok(summary)
}

// ============================================================================
// CSV IMPORT
// ============================================================================

/// Rows read from a CSV export, plus how many lines could not be parsed.
#[derive(Debug, Clone, Default)]
pub struct CsvBatch {
    pub rows: Vec<ImportedRow>,
    pub malformed: usize,
}

/// Read a CSV export with columns
/// `category,region,years_experience,pay_type,hourly_rate,annual_salary,employer`.
///
/// Rows that fail to parse are skipped and counted in `malformed`.
pub fn load_csv(csv_path: &Path) -> Result<CsvBatch> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    let source_file = csv_path.display().to_string();

    let mut batch = CsvBatch::default();
    for (index, result) in rdr.deserialize::<NewSubmission>().enumerate() {
        let line_number = index as u64 + 2; // header is line 1
        match result {
            Ok(submission) => batch.rows.push(ImportedRow {
                submission,
                source_file: source_file.clone(),
                line_number,
            }),
            Err(e) => {
                warn!(line = line_number, error = %e, "skipping malformed CSV row");
                batch.malformed += 1;
            }
        }
    }

    Ok(batch)
}

// ============================================================================
// READS
// ============================================================================

/// All stored submissions for one cohort.
pub fn query_submissions(conn: &Connection, key: &CohortKey) -> rusqlite::Result<Vec<SubmissionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT category, region, years_experience, pay_type,
                hourly_rate, annual_salary, employer
         FROM salary_submissions
         WHERE region = ?1 AND category = ?2
         ORDER BY id",
    )?;

    let records = stmt
        .query_map(params![key.region, key.category], |row| {
            let pay_type: String = row.get(3)?;
            Ok(SubmissionRecord {
                category: row.get(0)?,
                region: row.get(1)?,
                years_experience: row.get(2)?,
                pay_kind: PayKind::parse(&pay_type),
                hourly_rate: row.get(4)?,
                annual_salary: row.get(5)?,
                employer: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

pub fn count_submissions(conn: &Connection) -> Result<i64> {
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM salary_submissions", [], |row| row.get(0))?;

    Ok(count)
}

// ============================================================================
// RECORD SOURCE
// ============================================================================

/// Shared SQLite connection usable as a record source.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {:?}", path))?;
        setup_database(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        SqliteStore {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn submit(&self, submission: NewSubmission) -> Result<String> {
        let conn = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        insert_submission(&conn, submission)
    }

    pub fn import(&self, rows: &[ImportedRow]) -> Result<ImportSummary> {
        let conn = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        insert_imported(&conn, rows)
    }

    /// Load a CSV export and store it; unparseable lines count as rejected.
    pub fn import_csv(&self, csv_path: &Path) -> Result<ImportSummary> {
        let batch = load_csv(csv_path)?;
        let mut summary = self.import(&batch.rows)?;
        summary.rejected += batch.malformed;
        Ok(summary)
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        count_submissions(&conn)
    }

    fn fetch_blocking(&self, key: &CohortKey) -> Result<Vec<SubmissionRecord>, SourceError> {
        let conn = self.db.lock().map_err(|_| SourceError::Poisoned)?;
        Ok(query_submissions(&conn, key)?)
    }
}

// Runs the query inline on the polling thread; concurrent fetches serialize on the mutex.
#[async_trait]
impl RecordSource for SqliteStore {
    async fn fetch(&self, key: &CohortKey) -> Result<Vec<SubmissionRecord>, SourceError> {
        self.fetch_blocking(key)
    }
}

// ============================================================================
// TESTS
// ============================================================================
