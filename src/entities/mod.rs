//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod apartment;
pub mod charge;
pub mod payment_settings;
pub mod profit_payment;
pub mod reservation;
pub mod service_type;
pub mod wallet;
pub mod wallet_reimbursement;

// Re-export specific types to avoid conflicts
pub use apartment::{Column as ApartmentColumn, Entity as Apartment, Model as ApartmentModel};
pub use charge::{Column as ChargeColumn, Entity as Charge, Model as ChargeModel};
pub use payment_settings::{
    Column as PaymentSettingsColumn, Entity as PaymentSettings, Model as PaymentSettingsModel,
};
pub use profit_payment::{
    Column as ProfitPaymentColumn, Entity as ProfitPayment, Model as ProfitPaymentModel,
};
pub use reservation::{
    Column as ReservationColumn, Entity as Reservation, Model as ReservationModel,
};
pub use service_type::{
    Column as ServiceTypeColumn, Entity as ServiceType, Model as ServiceTypeModel,
};
pub use wallet::{Column as WalletColumn, Entity as Wallet, Model as WalletModel};
pub use wallet_reimbursement::{
    Column as WalletReimbursementColumn, Entity as WalletReimbursement,
    Model as WalletReimbursementModel,
};
