pub mod request_reader;
pub mod schedule_writer;
