use crate::domain::loan::{AmortizationEntry, LoanSummary};
use crate::error::Result;
use crate::format::round_cents;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ScheduleRow {
    payment: u32,
    monthly_payment: Decimal,
    interest_payment: Decimal,
    principal_payment: Decimal,
    remaining_balance: Decimal,
}

impl From<&AmortizationEntry> for ScheduleRow {
    fn from(entry: &AmortizationEntry) -> Self {
        Self {
            payment: entry.payment_index,
            monthly_payment: round_cents(entry.monthly_payment),
            interest_payment: round_cents(entry.interest_payment),
            principal_payment: round_cents(entry.principal_payment),
            remaining_balance: round_cents(entry.remaining_balance),
        }
    }
}

/// Writes an amortization schedule as CSV, one row per payment.
///
/// Money columns are rounded to cents for export; the in-memory schedule
/// keeps full precision.
pub struct ScheduleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScheduleWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_schedule(&mut self, schedule: &[AmortizationEntry]) -> Result<()> {
        for entry in schedule {
            self.writer.serialize(ScheduleRow::from(entry))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SummaryRow {
    principal: Decimal,
    annual_rate_percent: f64,
    term_years: f64,
    number_of_payments: u32,
    monthly_payment: Decimal,
    total_payment: Decimal,
    total_interest: Decimal,
}

impl From<&LoanSummary> for SummaryRow {
    fn from(summary: &LoanSummary) -> Self {
        Self {
            principal: round_cents(summary.principal),
            annual_rate_percent: summary.annual_rate_percent,
            term_years: summary.term_years,
            number_of_payments: summary.number_of_payments,
            monthly_payment: round_cents(summary.monthly_payment),
            total_payment: round_cents(summary.total_payment),
            total_interest: round_cents(summary.total_interest),
        }
    }
}

/// Writes loan summaries as CSV, one row per calculation.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_summary(&mut self, summary: &LoanSummary) -> Result<()> {
        self.writer.serialize(SummaryRow::from(summary))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::loan::{compute_loan_summary, generate_schedule};

    #[test]
    fn test_schedule_csv_export() {
        let schedule = generate_schedule(12_000.0, 0.0, 1.0).unwrap();
        let mut buffer = Vec::new();
        ScheduleWriter::new(&mut buffer)
            .write_schedule(&schedule)
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "payment,monthly_payment,interest_payment,principal_payment,remaining_balance"
        );
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[1], "1,1000.00,0.00,1000.00,11000.00");
        assert_eq!(lines[12], "12,1000.00,0.00,1000.00,0.00");
    }

    #[test]
    fn test_schedule_csv_rounds_to_cents() {
        let schedule = generate_schedule(100_000.0, 5.0, 30.0).unwrap();
        let mut buffer = Vec::new();
        ScheduleWriter::new(&mut buffer)
            .write_schedule(&schedule)
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let first = output.lines().nth(1).unwrap();
        assert!(first.starts_with("1,536.82,416.67,120.15,"));
        assert!(output.lines().last().unwrap().ends_with(",0.00"));
    }

    #[test]
    fn test_summary_csv() {
        let summary = compute_loan_summary(50_000.0, 12.0, 5.0).unwrap();
        let mut buffer = Vec::new();
        {
            let mut writer = SummaryWriter::new(&mut buffer);
            writer.write_summary(&summary).unwrap();
            writer.flush().unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "principal,annual_rate_percent,term_years,number_of_payments,monthly_payment,total_payment,total_interest"
        );
        assert_eq!(
            lines.next().unwrap(),
            "50000.00,12.0,5.0,60,1112.22,66733.34,16733.34"
        );
    }
}
