//! Discord command implementations organized by record type.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Apartment management commands
pub mod apartment;

/// Charge commands
pub mod charge;

/// General utility commands and the dashboard
pub mod general;

/// Payout and payout settings commands
pub mod payout;

/// Reservation commands
pub mod reservation;

/// Service type commands
pub mod service;

/// Argument parsing shared by commands
pub mod utils;

/// Wallet and reimbursement commands
pub mod wallet;

// Export commands
pub use apartment::*;
pub use charge::*;
pub use general::*;
pub use payout::*;
pub use reservation::*;
pub use service::*;
pub use wallet::*;
