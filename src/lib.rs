//! xlsxjson - Excel workbook to JSON conversion service
//!
//! This crate fetches an XLSX workbook (from a URL or an inline base64
//! payload), flattens every sheet into an ordered list of records keyed by
//! header names, and optionally reshapes survey-style sheets into
//! question/answer items. It ships as a library and as an HTTP service.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxjson::{ConversionRequest, ConverterBuilder};
//!
//! # async fn run() -> Result<(), xlsxjson::XlsxJsonError> {
//! let converter = ConverterBuilder::new().build()?;
//!
//! let request = ConversionRequest::from_url("https://example.com/scores.xlsx")
//!     .with_sheet_name("Sheet1");
//!
//! // シート名 → レコード列
//! let result = converter.convert(&request).await?;
//! for (sheet, records) in &result {
//!     println!("{}: {} records", sheet, records.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # In-memory Conversion
//!
//! ```rust,no_run
//! use xlsxjson::{ConverterBuilder, SheetSelector};
//!
//! # fn main() -> Result<(), xlsxjson::XlsxJsonError> {
//! let converter = ConverterBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // Your Excel file bytes
//! let result = converter.convert_bytes(&excel_data, &SheetSelector::All, true)?;
//! println!("{}", xlsxjson::to_json_string(&result)?);
//! # Ok(())
//! # }
//! ```
//!
//! # HTTP Service
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xlsxjson::{server, ConverterBuilder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = Arc::new(ConverterBuilder::new().build()?);
//! let app = server::build_router(converter);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
pub mod config;
mod error;
pub mod flatten;
pub mod parser;
pub mod qa;
mod security;
pub mod server;
mod source;
mod types;

// 公開API
pub use api::{ContentSource, ConversionRequest, SheetSelector};
pub use builder::{to_json_string, Converter, ConverterBuilder, DEFAULT_DOWNLOAD_TIMEOUT};
pub use config::ServerConfig;
pub use error::XlsxJsonError;
pub use qa::QaFields;
pub use security::{SecurityConfig, DEFAULT_MAX_INPUT_BYTES};
pub use source::decode_base64;
pub use types::{CellValue, ConversionResult, FlatRecord, QaItem, Row, Sheet, Workbook};
