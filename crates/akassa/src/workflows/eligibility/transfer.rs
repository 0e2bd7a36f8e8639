use std::collections::BTreeSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::domain::{InvalidMonth, MonthlyIncomeRecord, YearMonth};
use super::repository::ProfileSnapshot;

/// Rejected income history.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistoryError {
    #[error("income for {month} must be a non-negative number (found {income})")]
    InvalidIncome { month: YearMonth, income: f64 },
    #[error("month {0} appears more than once")]
    DuplicateMonth(YearMonth),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode profile: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv buffer: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {source}")]
    Month { line: usize, source: InvalidMonth },
    #[error("line {line}: income must not be negative (found {income})")]
    NegativeIncome { line: usize, income: f64 },
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Checks that incomes are finite and non-negative and months are unique.
pub fn validate_history(history: &[MonthlyIncomeRecord]) -> Result<(), HistoryError> {
    let mut seen = BTreeSet::new();
    for record in history {
        if !record.income.is_finite() || record.income < 0.0 {
            return Err(HistoryError::InvalidIncome {
                month: record.month,
                income: record.income,
            });
        }
        if !seen.insert(record.month) {
            return Err(HistoryError::DuplicateMonth(record.month));
        }
    }
    Ok(())
}

impl ProfileSnapshot {
    pub fn export_json(&self) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn export_history_csv(&self) -> Result<Vec<u8>, ExportError> {
        export_history_csv(&self.history)
    }
}

/// Writes `month,income,notes` rows with a header.
pub fn export_history_csv(history: &[MonthlyIncomeRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in history {
        writer.serialize(record)?;
    }
    if history.is_empty() {
        writer.write_record(["month", "income", "notes"])?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    month: String,
    #[serde(default)]
    income: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Reads the format written by [`export_history_csv`]. Blank or unreadable
/// incomes count as zero; negative incomes are rejected.
pub fn import_history_csv<R: Read>(reader: R) -> Result<Vec<MonthlyIncomeRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut history = Vec::new();
    for (index, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let line = index + 2;
        let row = row?;

        let month = row
            .month
            .parse::<YearMonth>()
            .map_err(|source| ImportError::Month { line, source })?;
        let income = row
            .income
            .as_deref()
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|income| income.is_finite())
            .unwrap_or(0.0);
        if income < 0.0 {
            return Err(ImportError::NegativeIncome { line, income });
        }

        history.push(MonthlyIncomeRecord {
            month,
            income,
            notes: row.notes.unwrap_or_default(),
        });
    }

    validate_history(&history)?;
    Ok(history)
}
