//! General Discord commands - ping, help and the dashboard.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{
            dashboard::{self, Activity, format_amount},
            partner::Partner,
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Concierge Ledger Help**\n\
        Dates are written `YYYY-MM-DD`, amounts are in TND.\n\n\
        **Apartments & Services**\n\
        • `/add_apartment`, `/apartments`, `/update_apartment`, `/delete_apartment`\n\
        • `/add_service`, `/services`, `/update_service`, `/delete_service`\n\n\
        **Bookkeeping**\n\
        • `/add_reservation`, `/reservations`, `/update_reservation`, `/delete_reservation`\n\
        • `/add_charge`, `/charges`, `/update_charge`, `/delete_charge`\n\n\
        **Wallets**\n\
        • `/wallets` - What the company owes each partner.\n\
        • `/reimburse <partner> <amount>` - Records a reimbursement.\n\
        • `/wallet_history [partner]` - Charges and reimbursements.\n\n\
        **Profit**\n\
        • `/payout_preview <start> <end>` - Profit of a period before paying it.\n\
        • `/generate_payout <start> <end>` - Records the payout for a period.\n\
        • `/add_payout <start> <end> <profit>` - Records a payout with a hand-entered profit.\n\
        • `/payouts`, `/mark_paid <payout_id> [partner]`, `/payout_settings [months]`\n\n\
        **Utility**\n\
        • `/dashboard` - Overall statistics and recent activity.\n\
        • `/ping`, `/help`";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows overall statistics, top apartments and recent activity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        use poise::serenity_prelude as serenity;

        let db = &ctx.data().database;
        ctx.defer().await?;

        let stats = dashboard::generate_dashboard_stats(db).await?;
        let performance = dashboard::apartment_performance(db).await?;
        let activity = dashboard::recent_activity(db, 5).await?;

        let mut totals = String::new();
        writeln!(&mut totals, "**Revenue:** {}", format_amount(stats.total_revenue))?;
        writeln!(
            &mut totals,
            "**Commission:** {}",
            format_amount(stats.total_commission)
        )?;
        writeln!(
            &mut totals,
            "**Company charges:** {}",
            format_amount(stats.company_charges)
        )?;
        writeln!(
            &mut totals,
            "**Owner charges:** {}",
            format_amount(stats.owner_charges)
        )?;
        write!(&mut totals, "**Net profit:** {}", format_amount(stats.net_profit))?;

        let mut wallets = String::new();
        for wallet in &stats.wallets {
            let name = wallet
                .person_name
                .parse::<Partner>()
                .map_or_else(|_| wallet.person_name.clone(), |p| p.display_name().to_string());
            writeln!(&mut wallets, "{name}: {}", format_amount(wallet.balance))?;
        }
        if wallets.is_empty() {
            wallets.push_str("_No wallets_");
        }

        let mut top = String::new();
        for perf in performance.iter().take(5) {
            writeln!(
                &mut top,
                "**{}** - {} ({} stays, commission {})",
                perf.apartment.name,
                format_amount(perf.revenue),
                perf.reservations,
                format_amount(perf.commission)
            )?;
        }
        if top.is_empty() {
            top.push_str("_No apartments yet_");
        }

        let mut recent = String::new();
        for entry in &activity {
            match entry {
                Activity::Reservation {
                    apartment,
                    client_name,
                    check_in,
                    amount,
                    ..
                } => writeln!(
                    &mut recent,
                    "🛏️ {client_name} at {} from {check_in} - {}",
                    apartment.as_deref().unwrap_or("?"),
                    format_amount(*amount)
                )?,
                Activity::Charge {
                    apartment,
                    service,
                    amount,
                    paid_by,
                    ..
                } => writeln!(
                    &mut recent,
                    "🧾 {} at {} - {} (paid by {paid_by})",
                    service.as_deref().unwrap_or("Charge"),
                    apartment.as_deref().unwrap_or("?"),
                    format_amount(*amount)
                )?,
            }
        }
        if recent.is_empty() {
            recent.push_str("_Nothing recorded yet_");
        }

        let embed = serenity::CreateEmbed::default()
            .title("📊 Dashboard")
            .color(0x0034_98DB)
            .field("Totals", totals, false)
            .field("Wallets", wallets, true)
            .field("Top apartments", top, false)
            .field("Recent activity", recent, false)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} apartment{}",
                stats.apartments_count,
                if stats.apartments_count == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
