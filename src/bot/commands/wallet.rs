//! Wallet Discord commands - balances, reimbursements and history.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{dashboard::format_amount, partner::Partner, wallet},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    const HISTORY_LIMIT: usize = 10;

    /// Shows what the company owes each partner.
    #[poise::command(slash_command, prefix_command)]
    pub async fn wallets(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let mut response = String::from("💼 **Wallets**\n\n");
        for partner in Partner::ALL {
            let reconciliation = wallet::reconcile_wallet(db, partner).await?;
            write!(
                &mut response,
                "**{}**: {}",
                partner.display_name(),
                format_amount(reconciliation.recorded_balance)
            )?;
            if !reconciliation.is_consistent() {
                write!(
                    &mut response,
                    " ⚠️ history says {}",
                    format_amount(reconciliation.expected_balance())
                )?;
            }
            writeln!(&mut response)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Records that the company paid a partner back.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reimburse(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Partner reimbursed"]
        #[autocomplete = "autocomplete::autocomplete_partner"]
        partner: String,
        #[description = "Amount paid back"] amount: f64,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let partner: Partner = partner.parse()?;

        let balance_before = wallet::get_wallet_balance(db, partner).await?;
        let reimbursement = match wallet::record_reimbursement(db, partner, amount, notes).await {
            Ok(reimbursement) => reimbursement,
            Err(Error::NothingToReimburse { balance, .. }) => {
                ctx.say(format!(
                    "❌ Nothing to reimburse: {}'s wallet is at {}.",
                    partner.display_name(),
                    format_amount(balance)
                ))
                .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let balance_after = wallet::get_wallet_balance(db, partner).await?;

        let mut response = format!(
            "✅ Reimbursed {} to {}. Wallet: {} → {}",
            format_amount(reimbursement.amount),
            partner.display_name(),
            format_amount(balance_before),
            format_amount(balance_after)
        );
        if balance_after < 0.0 {
            response.push_str("\n⚠️ The company has now paid back more than it owed.");
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows a partner's personally paid charges and reimbursements.
    #[poise::command(slash_command, prefix_command)]
    pub async fn wallet_history(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Partner (default: you)"]
        #[autocomplete = "autocomplete::autocomplete_partner"]
        partner: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let author_id = ctx.author().id.to_string();
        let partner = utils::resolve_partner(&author_id, partner.as_deref())?;

        let balance = wallet::get_wallet_balance(db, partner).await?;
        let charges = wallet::get_wallet_charges(db, Some(partner)).await?;
        let reimbursements = wallet::get_reimbursements(db, Some(partner)).await?;

        let mut response = format!(
            "💼 **{}** - balance {}\n\n**Paid out of pocket**\n",
            partner.display_name(),
            format_amount(balance)
        );
        if charges.is_empty() {
            response.push_str("_None_\n");
        }
        for chg in charges.iter().take(HISTORY_LIMIT) {
            writeln!(
                &mut response,
                "• #{} {} - {}{}",
                chg.id,
                chg.date,
                format_amount(chg.amount),
                chg.description
                    .as_deref()
                    .map(|d| format!(" ({d})"))
                    .unwrap_or_default()
            )?;
        }

        response.push_str("\n**Reimbursed**\n");
        if reimbursements.is_empty() {
            response.push_str("_None_\n");
        }
        for r in reimbursements.iter().take(HISTORY_LIMIT) {
            writeln!(
                &mut response,
                "• {} - {}",
                r.payment_date.format("%Y-%m-%d"),
                format_amount(r.amount)
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
