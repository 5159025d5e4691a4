//! Core plumbing for vaultic.
//!
//! This crate provides the foundational components shared by the vaultic
//! adapter layer:
//!
//! - **Signal/Slot System**: Type-safe event routing between the database
//!   client and its observers
//! - **Identifiers**: Fixed-length database identifiers, hex conversion,
//!   and the reserved scope sentinels
//! - **Errors**: Error types for identifier handling
//!
//! # Signal/Slot Example
//!
//! ```
//! use vaultic_core::Signal;
//!
//! let item_deleted = Signal::<String>::new();
//!
//! let conn_id = item_deleted.connect(|item_id| {
//!     println!("deleted {item_id}");
//! });
//!
//! item_deleted.emit("00112233445566778899aabbccddeeff".to_string());
//! item_deleted.disconnect(conn_id);
//! ```

mod error;
mod id;
pub mod logging;
pub mod signal;

pub use error::{CoreError, IdParseError, Result};
pub use id::{DIALOG_MODEL_ID, DatabaseId, ID_LENGTH, ROOT_MODEL_ID, SEARCH_MODEL_ID};
pub use signal::{ConnectionId, Signal};
