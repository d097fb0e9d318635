use crate::error::CsvError;

pub type ItemWriterResult = Result<(), CsvError>;

/// Destination receiving records chunk by chunk.
///
/// `open` is called once before the first chunk and `close` once after the
/// last one; `write` may be called any number of times in between.
pub trait ItemWriter<W> {
    fn write(&self, items: &[W]) -> ItemWriterResult;

    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    fn open(&self) -> ItemWriterResult {
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}
