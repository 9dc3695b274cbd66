/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates without a time component (`YYYY-MM-DD`).
pub type CalendarDate = chrono::NaiveDate;
