use crate::domain::validation::LoanInput;
use crate::error::{LoanError, Result};
use std::io::Read;

/// Reads loan requests from a CSV source with `amount,rate,term` columns.
///
/// Fields are kept as text so each row goes through the same validation as
/// interactive input. Whitespace is trimmed and short rows are tolerated;
/// missing fields become empty strings and fail validation as "required".
pub struct LoanRequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LoanRequestReader<R> {
    /// Creates a new `LoanRequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<LoanInput>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LoanError::from))
    }
}
