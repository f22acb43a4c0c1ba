use crate::domain::order::NewOrder;
use crate::error::Result;
use csv::StringRecord;
use std::io::Read;

const USERNAME_COLUMN: &str = "username";

/// Reads order requests from a CSV source.
///
/// The source must have a `username` header; each following row is one order.
/// Whitespace around fields is trimmed and extra columns are ignored.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes order requests.
    ///
    /// Only the `username` column is read, so rows shorter or longer than the
    /// header are accepted as long as they carry a username.
    pub fn orders(mut self) -> impl Iterator<Item = Result<NewOrder>> {
        let headers = self.reader.headers().ok().cloned();
        let column = headers
            .as_ref()
            .and_then(|headers| headers.iter().position(|name| name == USERNAME_COLUMN));
        let projection = StringRecord::from(vec![USERNAME_COLUMN]);

        self.reader.into_records().map(move |result| -> Result<NewOrder> {
            let record = result?;
            let request: NewOrder = match column {
                Some(index) => {
                    let field: StringRecord = record.get(index).into_iter().collect();
                    field.deserialize(Some(&projection))?
                }
                // Without a username header this reports the missing field.
                None => record.deserialize(headers.as_ref())?,
            };
            Ok(request)
        })
    }
}
