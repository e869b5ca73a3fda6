pub mod file_output_adapter;
pub mod json_file_source;
pub mod sheets_client;

pub use file_output_adapter::FileOutputAdapter;
pub use json_file_source::JsonFileSource;
pub use sheets_client::SheetsClient;
