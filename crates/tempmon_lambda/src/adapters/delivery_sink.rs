pub trait DeliverySink {
    fn append_record(&self, record: &[u8]) -> Result<(), String>;
}
