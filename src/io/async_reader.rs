//! Asynchronous CSV reader with batch interface
//!
//! Streams purchase requests from any `futures::io::AsyncRead` source
//! and hands them to the caller a batch at a time, which is the unit the
//! owner-partitioned processor works in. Row shape and conversion stay
//! in `csv_format`; csv-async does the streaming parse.

use crate::io::csv_format::{convert_purchase_record, PurchaseCsvRecord};
use crate::types::PurchaseRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Batch reader over a purchase-request CSV source
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Wrap an async CSV source for batch reading
    ///
    /// Fields are trimmed and flexible field counts are tolerated, the
    /// same configuration the synchronous reader uses.
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read up to `batch_size` purchase records
    ///
    /// Rows that fail to parse or convert are reported on stderr and
    /// skipped; they do not count toward the batch size. An empty vector
    /// means the source is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<PurchaseRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<PurchaseCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_purchase_record(csv_record) {
                    Ok(purchase_record) => batch.push(purchase_record),
                    Err(e) => eprintln!("Record conversion error: {}", e),
                },
                Some(Err(e)) => eprintln!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InstrumentTab;
    use futures::io::Cursor;

    const HEADER: &str =
        "owner_id,owner_name,owner_email,pass_type,home_zone,destination_zone,method,instrument\n";

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = format!(
            "{}\
             u01,Asha Verma,asha@example.com,Basic Pass,Rajiv Chowk,Hauz Khas,upi,asha@okhdfcbank\n\
             u02,,,Basic Pass,Hauz Khas,Hauz Khas,card,4111111111111111\n\
             u01,Asha Verma,asha@example.com,Premium Pass,Rajiv Chowk,Hauz Khas,wallet,PhonePe\n",
            HEADER
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await;

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].owner_id, "u01");
        assert_eq!(batch[0].tab, InstrumentTab::Upi);
        assert_eq!(batch[1].tab, InstrumentTab::Cards);
        assert_eq!(batch[2].tab, InstrumentTab::Wallets);
    }

    #[tokio::test]
    async fn test_async_reader_respects_batch_size() {
        let mut csv_content = String::from(HEADER);
        for i in 0..5 {
            csv_content.push_str(&format!(
                "u{:02},,,Basic Pass,Rajiv Chowk,Hauz Khas,upi,a@oksbi\n",
                i
            ));
        }
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let first = async_reader.read_batch(2).await;
        assert_eq!(first.len(), 2);

        let second = async_reader.read_batch(2).await;
        assert_eq!(second.len(), 2);

        let third = async_reader.read_batch(2).await;
        assert_eq!(third.len(), 1);

        let done = async_reader.read_batch(2).await;
        assert!(done.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let csv_content = format!(
            "{}\
             u01,,,Basic Pass,Rajiv Chowk,Hauz Khas,paylater,x\n\
             u02,,,Basic Pass,Rajiv Chowk,Hauz Khas,upi,b@oksbi\n",
            HEADER
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].owner_id, "u02");
    }
}
