//! Unified error type for the ledger.
//!
//! Every core operation returns [`Result`]. Storage failures are wrapped as
//! [`Error::Database`]; everything else is a recoverable, per-operation condition
//! that the bot layer reports back to the user.

use chrono::NaiveDate;
use thiserror::Error;

/// All errors produced by the ledger and its bot interface.
#[derive(Debug, Error)]
pub enum Error {
    /// A SeaORM query, insert, update or transaction failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// A required field was missing or malformed
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the problem
        message: String,
    },

    /// Amount is negative where it must not be, zero where it must be positive, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Commission rate outside of 0-100
    #[error("Invalid commission rate: {rate} (expected a percentage between 0 and 100)")]
    InvalidCommissionRate {
        /// The rejected rate
        rate: f64,
    },

    /// Payout frequency must be a positive number of months
    #[error("Invalid payment frequency: {months} months")]
    InvalidFrequency {
        /// The rejected frequency
        months: i32,
    },

    /// Period start is after period end
    #[error("Invalid period: {start} is after {end}")]
    InvalidPeriod {
        /// Period start
        start: NaiveDate,
        /// Period end
        end: NaiveDate,
    },

    /// Check-out must be strictly after check-in
    #[error("Invalid stay: check-out {check_out} must be after check-in {check_in}")]
    InvalidStay {
        /// Arrival date
        check_in: NaiveDate,
        /// Departure date
        check_out: NaiveDate,
    },

    /// A payout already exists for exactly this period
    #[error("Period {start} to {end} has already been paid out")]
    PeriodAlreadyPaid {
        /// Period start
        start: NaiveDate,
        /// Period end
        end: NaiveDate,
    },

    /// The partner's wallet holds nothing to pay back
    #[error("Nothing to reimburse: {partner}'s wallet balance is {balance:.2}")]
    NothingToReimburse {
        /// Partner whose wallet was targeted
        partner: String,
        /// Current wallet balance
        balance: f64,
    },

    /// Apartment not found
    #[error("Apartment not found: {id}")]
    ApartmentNotFound {
        /// Apartment identifier or name
        id: String,
    },

    /// Service type not found
    #[error("Service type not found: {id}")]
    ServiceTypeNotFound {
        /// Service type identifier or name
        id: String,
    },

    /// Service type cannot be deleted while charges still reference it
    #[error("Service type {id} is still used by {charges} charge(s)")]
    ServiceTypeInUse {
        /// Service type identifier
        id: i64,
        /// Number of referencing charges
        charges: u64,
    },

    /// Reservation not found
    #[error("Reservation not found: {id}")]
    ReservationNotFound {
        /// Reservation identifier
        id: i64,
    },

    /// Charge not found
    #[error("Charge not found: {id}")]
    ChargeNotFound {
        /// Charge identifier
        id: i64,
    },

    /// Profit payment not found
    #[error("Profit payment not found: {id}")]
    PayoutNotFound {
        /// Payout identifier
        id: i64,
    },

    /// Wallet row missing for a partner
    #[error("Wallet not found for {partner}")]
    WalletNotFound {
        /// Partner name
        partner: String,
    },

    /// Name is not one of the two partners
    #[error("Unknown partner: {name} (expected imad or jassem)")]
    UnknownPartner {
        /// The rejected name
        name: String,
    },

    /// Name is not a valid charge payer
    #[error("Unknown payer: {name} (expected imad, jassem or company)")]
    UnknownPayer {
        /// The rejected name
        name: String,
    },

    /// Value is not a valid service liability
    #[error("Unknown paid-by value: {value} (expected company or owner)")]
    UnknownPaidBy {
        /// The rejected value
        value: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Failure while building a text reply
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
