//! Payout Discord commands - preview, generate, list and settle profit payouts.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{
            dashboard::format_amount,
            partner::Partner,
            payout, profit, settings,
        },
        entities::profit_payment,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    const LIST_LIMIT: usize = 10;

    fn paid_marker(payout: &profit_payment::Model, partner: Partner) -> String {
        match payout::partner_status(payout, partner) {
            (true, Some(date)) => format!("✅ {}", date.format("%Y-%m-%d")),
            (true, None) => "✅".to_string(),
            (false, _) => "⏳".to_string(),
        }
    }

    async fn resolve_period(
        db: &sea_orm::DatabaseConnection,
        start: Option<String>,
        end: Option<String>,
    ) -> Result<(chrono::NaiveDate, chrono::NaiveDate)> {
        match (start, end) {
            (Some(start), Some(end)) => Ok((utils::parse_date(&start)?, utils::parse_date(&end)?)),
            (None, None) => settings::suggest_next_period(db).await,
            (Some(start), None) => {
                let months = settings::get_payment_frequency(db).await?;
                settings::period_from(utils::parse_date(&start)?, months)
            }
            (None, Some(_)) => Err(Error::Validation {
                message: "An end date needs a start date".to_string(),
            }),
        }
    }

    /// Shows the profit of a period without recording anything.
    #[poise::command(slash_command, prefix_command)]
    pub async fn payout_preview(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Period start (YYYY-MM-DD, default: next unpaid period)"] start: Option<
            String,
        >,
        #[description = "Period end (YYYY-MM-DD)"] end: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let (start, end) = resolve_period(db, start, end).await?;

        let preview = match profit::preview_period_profit(db, start, end).await {
            Ok(preview) => preview,
            Err(Error::PeriodAlreadyPaid { start, end }) => {
                ctx.say(format!(
                    "❌ The period {start} → {end} has already been paid out."
                ))
                .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let mut response = format!("🔎 **Profit preview {start} → {end}**\n\n");
        writeln!(
            &mut response,
            "Commission: {} from {} reservation(s)",
            format_amount(preview.total_commission),
            preview.reservation_ids.len()
        )?;
        writeln!(
            &mut response,
            "Company charges: {} from {} charge(s)",
            format_amount(preview.total_charges),
            preview.charge_ids.len()
        )?;
        writeln!(
            &mut response,
            "**Profit: {}**",
            format_amount(preview.total_profit)
        )?;
        for partner in Partner::ALL {
            writeln!(
                &mut response,
                "{}: {}",
                partner.display_name(),
                format_amount(preview.share_for(partner))
            )?;
        }

        let overlapping = payout::find_overlapping_payouts(db, start, end).await?;
        if !overlapping.is_empty() {
            write!(
                &mut response,
                "\n⚠️ Overlaps {} existing payout(s); their reservations are excluded.",
                overlapping.len()
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Records the payout for a period, splitting its profit 50/50.
    #[poise::command(slash_command, prefix_command)]
    pub async fn generate_payout(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Period start (YYYY-MM-DD)"] start: String,
        #[description = "Period end (YYYY-MM-DD)"] end: String,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let start = utils::parse_date(&start)?;
        let end = utils::parse_date(&end)?;

        match payout::generate_payout(db, start, end, notes).await {
            Ok((created, computed)) => {
                ctx.say(format!(
                    "✅ Payout #{} for {} → {}: profit {} from {} reservation(s).\n\
                     Imad: {} | Jassem: {}",
                    created.id,
                    created.period_start,
                    created.period_end,
                    format_amount(created.total_profit),
                    computed.reservation_ids.len(),
                    format_amount(created.imad_share),
                    format_amount(created.jassem_share)
                ))
                .await?;
            }
            Err(Error::PeriodAlreadyPaid { start, end }) => {
                ctx.say(format!(
                    "❌ The period {start} → {end} has already been paid out."
                ))
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Records a payout with a profit figure entered by hand.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_payout(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Period start (YYYY-MM-DD)"] start: String,
        #[description = "Period end (YYYY-MM-DD)"] end: String,
        #[description = "Total profit of the period"] total_profit: f64,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let start = utils::parse_date(&start)?;
        let end = utils::parse_date(&end)?;

        match payout::create_payout(db, start, end, total_profit, notes).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Payout #{} for {} → {}: profit {}.\n\
                     Imad: {} | Jassem: {}",
                    created.id,
                    created.period_start,
                    created.period_end,
                    format_amount(created.total_profit),
                    format_amount(created.imad_share),
                    format_amount(created.jassem_share)
                ))
                .await?;
            }
            Err(Error::PeriodAlreadyPaid { start, end }) => {
                ctx.say(format!(
                    "❌ The period {start} → {end} has already been paid out."
                ))
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Lists recorded payouts, latest period first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn payouts(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let all = payout::get_all_payouts(db).await?;
        if all.is_empty() {
            ctx.say("💸 No payouts yet. Preview one with `/payout_preview`.")
                .await?;
            return Ok(());
        }

        let mut response = String::from("💸 **Payouts**\n\n");
        for p in all.iter().take(LIST_LIMIT) {
            writeln!(
                &mut response,
                "#{} {} → {} | {} | Imad {} | Jassem {}",
                p.id,
                p.period_start,
                p.period_end,
                format_amount(p.total_profit),
                paid_marker(p, Partner::Imad),
                paid_marker(p, Partner::Jassem)
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Marks a partner's share of a payout as paid.
    #[poise::command(slash_command, prefix_command)]
    pub async fn mark_paid(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Payout id"] payout_id: i64,
        #[description = "Partner paid (default: you)"]
        #[autocomplete = "autocomplete::autocomplete_partner"]
        partner: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let author_id = ctx.author().id.to_string();
        let partner = utils::resolve_partner(&author_id, partner.as_deref())?;

        let updated = payout::mark_paid(db, payout_id, partner).await?;
        let mut response = format!(
            "✅ {}'s share of payout #{} ({}) is {}.",
            partner.display_name(),
            updated.id,
            format_amount(match partner {
                Partner::Imad => updated.imad_share,
                Partner::Jassem => updated.jassem_share,
            }),
            paid_marker(&updated, partner)
        );
        if payout::is_fully_paid(&updated) {
            response.push_str("\n🎉 Both partners have been paid.");
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows or changes how many months a payout period usually spans.
    #[poise::command(slash_command, prefix_command)]
    pub async fn payout_settings(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "New frequency in months"] months: Option<i32>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        if let Some(months) = months {
            settings::set_payment_frequency(db, months).await?;
        }
        let frequency = settings::get_payment_frequency(db).await?;
        let (next_start, next_end) = settings::suggest_next_period(db).await?;

        ctx.say(format!(
            "⚙️ Payouts every **{frequency}** month(s). Next suggested period: {next_start} → {next_end}."
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
