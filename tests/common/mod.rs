use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a batch request file with an `amount,rate,term` header.
pub fn write_requests(path: &Path, rows: &[[&str; 3]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["amount", "rate", "term"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `count` valid requests with varying principal.
pub fn write_generated_requests(path: &Path, count: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["amount", "rate", "term"])?;

    for i in 1..=count {
        let amount = (i * 1_000).to_string();
        wtr.write_record([amount.as_str(), "6.5", "15"])?;
    }

    wtr.flush()?;
    Ok(())
}
