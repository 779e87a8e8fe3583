//! Output generation modules for JSON and Markdown.
//!
//! This module contains submodules responsible for writing a finished
//! [`crate::models::Edition`] to disk:
//!
//! # Submodules
//!
//! - [`json`]: Writes the edition to JSON files for API consumption
//! - [`markdown`]: Converts the edition to Markdown for reading
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── 2025-05-06/
//! │   ├── morning.json
//! │   ├── afternoon.json
//! │   └── evening.json
//!
//! markdown_output_dir/
//! └── 2025-05-06_morning.md  # Full edition
//! ```

pub mod json;
pub mod markdown;
