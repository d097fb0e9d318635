use std::{
    cell::{Cell, RefCell},
    fs::File,
    io::{BufWriter, Write},
    marker::PhantomData,
    path::Path,
};

use log::{debug, info};
use serde::Serialize;

use crate::{
    core::{
        encoder::{render_header, render_row},
        field::{CsvRecord, RecordLayout},
        introspect::describe,
        item::{ItemWriter, ItemWriterResult},
    },
    error::CsvError,
};

const LINE_SEPARATOR: &[u8] = b"\n";

/// A writer streaming records into any [`Write`] sink as quoted CSV.
///
/// The header is followed by a newline, rows are separated by newlines and
/// the last row is not terminated. Each row is fully rendered before any of
/// its bytes reach the sink.
///
/// # Examples
///
/// ```
/// use records2csv::core::{field::CsvRecord, item::ItemWriter};
/// use records2csv::item::csv::csv_writer::CsvItemWriterBuilder;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Person {
///     name: String,
///     age: u8,
/// }
///
/// impl CsvRecord for Person {}
///
/// let people = vec![
///     Person { name: "Alice".to_string(), age: 28 },
///     Person { name: "Bob".to_string(), age: 35 },
/// ];
///
/// let writer = CsvItemWriterBuilder::new().from_writer::<Person, _>(Vec::new());
///
/// writer.open().unwrap();
/// writer.write(&people[..1]).unwrap();
/// writer.write(&people[1..]).unwrap();
/// writer.close().unwrap();
///
/// let csv = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(csv, "\"name\",\"age\"\n\"Alice\",\"28\"\n\"Bob\",\"35\"");
/// ```
pub struct CsvItemWriter<T, W: Write> {
    stream: RefCell<W>,
    layout: RefCell<Option<RecordLayout>>,
    has_headers: bool,
    header_written: Cell<bool>,
    row_count: Cell<usize>,
    _phantom: PhantomData<T>,
}

impl<T, W: Write> CsvItemWriter<T, W> {
    /// Number of rows written so far.
    pub fn row_count(&self) -> usize {
        self.row_count.get()
    }

    /// Layout in use, once known.
    pub fn layout(&self) -> Option<RecordLayout> {
        self.layout.borrow().clone()
    }

    pub fn into_inner(self) -> W {
        self.stream.into_inner()
    }

    fn write_header(&self, layout: &RecordLayout) -> ItemWriterResult {
        if !self.has_headers || self.header_written.get() {
            return Ok(());
        }

        let mut stream = self.stream.borrow_mut();
        stream.write_all(render_header(layout.descriptors()).as_bytes())?;
        stream.write_all(LINE_SEPARATOR)?;
        self.header_written.set(true);
        Ok(())
    }
}

impl<T, W> ItemWriter<T> for CsvItemWriter<T, W>
where
    T: Serialize + CsvRecord,
    W: Write,
{
    fn write(&self, items: &[T]) -> ItemWriterResult {
        let Some(first) = items.first() else {
            return Ok(());
        };

        if self.layout.borrow().is_none() {
            let layout = describe(first)?;
            *self.layout.borrow_mut() = Some(layout);
        }

        let layout = self.layout.borrow();
        let Some(layout) = layout.as_ref() else {
            return Err(CsvError::EmptyInput);
        };

        self.write_header(layout)?;

        for item in items {
            let row = render_row(item, layout.descriptors())?;

            let mut stream = self.stream.borrow_mut();
            if self.row_count.get() > 0 {
                stream.write_all(LINE_SEPARATOR)?;
            }
            stream.write_all(row.as_bytes())?;
            self.row_count.set(self.row_count.get() + 1);
        }

        debug!("Wrote chunk of {} records", items.len());
        Ok(())
    }

    /// Flush the sink.
    fn flush(&self) -> ItemWriterResult {
        self.stream.borrow_mut().flush()?;
        Ok(())
    }

    /// Writes the header right away when the layout was given up front.
    fn open(&self) -> ItemWriterResult {
        match self.layout.borrow().as_ref() {
            Some(layout) => self.write_header(layout),
            None => Ok(()),
        }
    }

    /// Fails with [`CsvError::EmptyInput`] when no layout was given and no
    /// record was ever written, then flushes the sink.
    fn close(&self) -> ItemWriterResult {
        match self.layout.borrow().as_ref() {
            Some(layout) => self.write_header(layout)?,
            None => return Err(CsvError::EmptyInput),
        }

        self.stream.borrow_mut().flush()?;
        info!("CSV writer closed after {} rows", self.row_count.get());
        Ok(())
    }
}

/// Configuration for [`CsvItemWriter`].
///
/// ```
/// use records2csv::core::{field::CsvRecord, introspect::describe_type, item::ItemWriter};
/// use records2csv::item::csv::csv_writer::CsvItemWriterBuilder;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct City {
///     city: String,
///     pop: u64,
/// }
///
/// impl CsvRecord for City {}
///
/// let writer = CsvItemWriterBuilder::new()
///     .layout(describe_type::<City>().unwrap())
///     .from_writer::<City, _>(Vec::new());
///
/// writer.open().unwrap();
/// writer.close().unwrap();
///
/// assert_eq!(writer.into_inner(), b"\"city\",\"pop\"\n");
/// ```
#[derive(Debug, Clone)]
pub struct CsvItemWriterBuilder {
    has_headers: bool,
    layout: Option<RecordLayout>,
}

impl Default for CsvItemWriterBuilder {
    fn default() -> Self {
        CsvItemWriterBuilder::new()
    }
}

impl CsvItemWriterBuilder {
    pub fn new() -> CsvItemWriterBuilder {
        CsvItemWriterBuilder {
            has_headers: true,
            layout: None,
        }
    }

    /// Whether the header line is written. Defaults to `true`.
    pub fn has_headers(mut self, yes: bool) -> CsvItemWriterBuilder {
        self.has_headers = yes;
        self
    }

    /// Uses `layout` instead of describing the first written record.
    pub fn layout(mut self, layout: RecordLayout) -> CsvItemWriterBuilder {
        self.layout = Some(layout);
        self
    }

    pub fn from_path<T, P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<CsvItemWriter<T, BufWriter<File>>, CsvError> {
        let file = File::create(path.as_ref())?;
        debug!("Writing CSV to {}", path.as_ref().display());

        Ok(self.from_writer(BufWriter::new(file)))
    }

    pub fn from_writer<T, W: Write>(self, wtr: W) -> CsvItemWriter<T, W> {
        CsvItemWriter {
            stream: RefCell::new(wtr),
            layout: RefCell::new(self.layout),
            has_headers: self.has_headers,
            header_written: Cell::new(false),
            row_count: Cell::new(0),
            _phantom: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        error::Error,
        fs,
        io::{self, ErrorKind, Write},
    };

    use serde::{Deserialize, Serialize};

    use crate::{
        core::{field::CsvRecord, introspect::describe_type, item::ItemWriter},
        error::CsvError,
        item::csv::csv_writer::CsvItemWriterBuilder,
    };

    #[derive(Serialize, Deserialize)]
    struct Row {
        city: String,
        country: String,
        #[serde(rename = "popcount")]
        population: u64,
    }

    impl CsvRecord for Row {}

    fn row(city: &str, population: u64) -> Row {
        Row {
            city: city.to_string(),
            country: "United States".to_string(),
            population,
        }
    }

    fn rows() -> Vec<Row> {
        vec![row("Boston", 4628910), row("Concord", 42695)]
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn this_test_will_pass() -> Result<(), Box<dyn Error>> {
        let wtr = CsvItemWriterBuilder::new().from_writer::<Row, _>(Vec::new());

        wtr.open()?;
        wtr.write(&rows())?;
        wtr.close()?;

        let data = String::from_utf8(wtr.into_inner())?;
        assert_eq!(
            data,
            "\"city\",\"country\",\"popcount\"
\"Boston\",\"United States\",\"4628910\"
\"Concord\",\"United States\",\"42695\""
        );

        Ok(())
    }

    #[test]
    fn chunks_are_separated_by_a_single_newline() -> Result<(), Box<dyn Error>> {
        let records = rows();
        let wtr = CsvItemWriterBuilder::new().from_writer::<Row, _>(Vec::new());

        wtr.write(&records[..1])?;
        wtr.write(&[])?;
        wtr.write(&records[1..])?;
        wtr.close()?;

        assert_eq!(wtr.row_count(), 2);
        let data = String::from_utf8(wtr.into_inner())?;
        assert_eq!(data.lines().count(), 3);
        assert!(!data.ends_with('\n'));

        Ok(())
    }

    #[test]
    fn headers_can_be_disabled() -> Result<(), Box<dyn Error>> {
        let wtr = CsvItemWriterBuilder::new()
            .has_headers(false)
            .from_writer::<Row, _>(Vec::new());

        wtr.open()?;
        wtr.write(&rows())?;
        wtr.close()?;

        let data = String::from_utf8(wtr.into_inner())?;
        assert_eq!(
            data,
            "\"Boston\",\"United States\",\"4628910\"
\"Concord\",\"United States\",\"42695\""
        );

        Ok(())
    }

    #[test]
    fn explicit_layout_writes_header_without_records() -> Result<(), Box<dyn Error>> {
        let wtr = CsvItemWriterBuilder::new()
            .layout(describe_type::<Row>()?)
            .from_writer::<Row, _>(Vec::new());

        wtr.close()?;

        let data = String::from_utf8(wtr.into_inner())?;
        assert_eq!(data, "\"city\",\"country\",\"popcount\"\n");

        Ok(())
    }

    #[test]
    fn closing_without_layout_fails() {
        let wtr = CsvItemWriterBuilder::new().from_writer::<Row, _>(Vec::new());

        assert!(matches!(wtr.close(), Err(CsvError::EmptyInput)));
        assert!(wtr.into_inner().is_empty());
    }

    #[test]
    fn sink_errors_are_propagated() {
        let wtr = CsvItemWriterBuilder::new().from_writer::<Row, _>(BrokenSink);

        let result = wtr.write(&rows());

        assert!(matches!(result, Err(CsvError::Sink(ref e)) if e.kind() == ErrorKind::BrokenPipe));
        assert_eq!(wtr.row_count(), 0);
    }

    #[test]
    fn records_should_be_written_to_a_file() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cities.csv");

        let wtr = CsvItemWriterBuilder::new().from_path::<Row, _>(&path)?;
        wtr.write(&rows())?;
        wtr.close()?;
        drop(wtr);

        let content = fs::read_to_string(&path)?;
        assert!(content.starts_with("\"city\",\"country\",\"popcount\"\n\"Boston\""));

        Ok(())
    }
}
