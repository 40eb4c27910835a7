//! Wallet ledger - Tracks what the company owes each partner.
//!
//! When a partner pays a charge out of pocket, their wallet grows by the charge
//! amount; when the company pays them back, a reimbursement is recorded and the
//! wallet shrinks. At any time a wallet balance equals the partner's charges
//! minus their reimbursements, which [`reconcile_wallet`] recomputes.
//!
//! Balance changes are a single `UPDATE ... SET balance = balance + ?` so
//! concurrent charge entry cannot lose updates, and they always run on the
//! caller's connection so they share the caller's transaction.

use crate::{
    core::partner::{Partner, Payer},
    entities::{Charge, Wallet, WalletReimbursement, charge, wallet, wallet_reimbursement},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{debug, info, instrument, warn};

/// Creates a zero-balance wallet for each partner that does not have one yet.
pub async fn ensure_wallets<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    for partner in Partner::ALL {
        let existing = Wallet::find()
            .filter(wallet::Column::PersonName.eq(partner.as_str()))
            .one(db)
            .await?;

        if existing.is_none() {
            wallet::ActiveModel {
                person_name: Set(partner.as_str().to_string()),
                balance: Set(0.0),
                updated_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            info!("Created wallet for {}", partner);
        }
    }
    Ok(())
}

/// Retrieves a partner's wallet.
pub async fn get_wallet<C>(db: &C, partner: Partner) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    Wallet::find()
        .filter(wallet::Column::PersonName.eq(partner.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| Error::WalletNotFound {
            partner: partner.as_str().to_string(),
        })
}

/// Retrieves both wallets ordered by partner name.
pub async fn get_all_wallets(db: &DatabaseConnection) -> Result<Vec<wallet::Model>> {
    Wallet::find()
        .order_by_asc(wallet::Column::PersonName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Current balance of a partner's wallet.
pub async fn get_wallet_balance(db: &DatabaseConnection, partner: Partner) -> Result<f64> {
    Ok(get_wallet(db, partner).await?.balance)
}

/// Atomically adds `amount_delta` to a partner's wallet balance.
///
/// Uses a single SQL update, `balance = balance + amount_delta`, instead of a
/// read-modify-write. Pass a negative delta to decrease the balance.
pub async fn adjust_wallet_balance_atomic<C>(
    db: &C,
    partner: Partner,
    amount_delta: f64,
) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    if !amount_delta.is_finite() {
        return Err(Error::InvalidAmount {
            amount: amount_delta,
        });
    }

    let result = Wallet::update_many()
        .col_expr(
            wallet::Column::Balance,
            Expr::col(wallet::Column::Balance).add(amount_delta),
        )
        .col_expr(wallet::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(wallet::Column::PersonName.eq(partner.as_str()))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::WalletNotFound {
            partner: partner.as_str().to_string(),
        });
    }

    debug!("Adjusted {} wallet by {:.2}", partner, amount_delta);
    get_wallet(db, partner).await
}

/// Credits a partner's wallet for a charge they paid personally.
///
/// Company-paid charges leave the wallets untouched and return `None`. Call this
/// on the same transaction that inserts the charge.
pub async fn record_charge<C>(db: &C, payer: Payer, amount: f64) -> Result<Option<wallet::Model>>
where
    C: ConnectionTrait,
{
    match payer.partner() {
        Some(partner) => adjust_wallet_balance_atomic(db, partner, amount)
            .await
            .map(Some),
        None => Ok(None),
    }
}

/// Records a reimbursement to a partner and decreases their wallet.
///
/// The amount must be positive and the wallet must hold a positive balance.
/// Paying back more than a positive balance is allowed but logged. The reimbursement
/// insert and the balance decrement commit together.
#[instrument(skip(db, notes))]
pub async fn record_reimbursement(
    db: &DatabaseConnection,
    partner: Partner,
    amount: f64,
    notes: Option<String>,
) -> Result<wallet_reimbursement::Model> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let txn = db.begin().await?;

    let current = get_wallet(&txn, partner).await?;
    if current.balance <= 0.0 {
        return Err(Error::NothingToReimburse {
            partner: partner.as_str().to_string(),
            balance: current.balance,
        });
    }
    if amount > current.balance {
        warn!(
            "Reimbursing {:.2} to {} exceeds wallet balance {:.2}",
            amount, partner, current.balance
        );
    }

    let reimbursement = wallet_reimbursement::ActiveModel {
        person_name: Set(partner.as_str().to_string()),
        amount: Set(amount),
        payment_date: Set(Utc::now()),
        notes: Set(notes.filter(|n| !n.trim().is_empty())),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    adjust_wallet_balance_atomic(&txn, partner, -amount).await?;

    txn.commit().await?;

    info!("Reimbursed {:.2} to {}", amount, partner);
    Ok(reimbursement)
}

/// Reimbursements, newest payment first, optionally for one partner.
pub async fn get_reimbursements(
    db: &DatabaseConnection,
    partner: Option<Partner>,
) -> Result<Vec<wallet_reimbursement::Model>> {
    let mut query = WalletReimbursement::find();
    if let Some(partner) = partner {
        query = query.filter(wallet_reimbursement::Column::PersonName.eq(partner.as_str()));
    }
    query
        .order_by_desc(wallet_reimbursement::Column::PaymentDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Charges paid personally by partners, newest date first, optionally for one partner.
pub async fn get_wallet_charges(
    db: &DatabaseConnection,
    partner: Option<Partner>,
) -> Result<Vec<charge::Model>> {
    let names: Vec<&str> = match partner {
        Some(partner) => vec![partner.as_str()],
        None => Partner::ALL.iter().map(|p| p.as_str()).collect(),
    };
    Charge::find()
        .filter(charge::Column::PaidByPerson.is_in(names))
        .order_by_desc(charge::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Comparison between a stored wallet balance and the one implied by history.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletReconciliation {
    /// Partner reconciled
    pub partner: Partner,
    /// Balance stored on the wallet row
    pub recorded_balance: f64,
    /// Sum of charges the partner paid
    pub charged_total: f64,
    /// Sum of reimbursements the partner received
    pub reimbursed_total: f64,
}

impl WalletReconciliation {
    /// Balance implied by charges minus reimbursements.
    #[must_use]
    pub fn expected_balance(&self) -> f64 {
        self.charged_total - self.reimbursed_total
    }

    /// Whether the stored balance matches history to the cent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        (self.recorded_balance - self.expected_balance()).abs() < 0.005
    }
}

/// Recomputes a partner's balance from charges and reimbursements.
pub async fn reconcile_wallet(
    db: &DatabaseConnection,
    partner: Partner,
) -> Result<WalletReconciliation> {
    let recorded_balance = get_wallet(db, partner).await?.balance;
    let charged_total = get_wallet_charges(db, Some(partner))
        .await?
        .iter()
        .map(|c| c.amount)
        .sum();
    let reimbursed_total = get_reimbursements(db, Some(partner))
        .await?
        .iter()
        .map(|r| r.amount)
        .sum();

    let reconciliation = WalletReconciliation {
        partner,
        recorded_balance,
        charged_total,
        reimbursed_total,
    };
    if !reconciliation.is_consistent() {
        warn!(
            "{} wallet drifted: recorded {:.2}, expected {:.2}",
            partner,
            recorded_balance,
            reconciliation.expected_balance()
        );
    }
    Ok(reconciliation)
}
