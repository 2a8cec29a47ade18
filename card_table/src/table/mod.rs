//! Table module: seat assignment and buy-in validation for one table.
//!
//! The [`Table`] is transport independent. It guards its [`SeatMap`] with an
//! async mutex because seat requests arrive on request/response calls rather
//! than through the hub's mailbox.
//!
//! ## Example
//!
//! ```
//! use card_table::table::{Table, TableConfig};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let table = Table::new(TableConfig::default());
//! let player = table.add_player("alice", None, 500).await.unwrap();
//! assert_eq!(player.seat, 1);
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod seats;

pub use config::TableConfig;
pub use errors::{SeatError, SeatResult};
pub use seats::{Player, SeatMap, Table};
