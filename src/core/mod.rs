//! Core business logic - framework-agnostic bookkeeping operations.
//!
//! Nothing in here knows about Discord. Every operation takes a database
//! connection and returns structured data or an [`crate::errors::Error`].

/// Apartment registration, update and cascading removal
pub mod apartment;
/// Charge recording with wallet effects
pub mod charge;
/// Commission split of reservation revenue
pub mod commission;
/// Dashboard statistics and activity feed
pub mod dashboard;
/// Partner, payer and liability vocabularies
pub mod partner;
/// Profit payout records
pub mod payout;
/// Period profit calculation
pub mod profit;
/// Reservation bookkeeping
pub mod reservation;
/// Service types and their liability
pub mod service_type;
/// Payout frequency settings
pub mod settings;
/// Partner wallets and reimbursements
pub mod wallet;
