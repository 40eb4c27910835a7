//! Reservation Discord commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{
            commission,
            dashboard::format_amount,
            reservation::{self, ReservationDetails},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    const LIST_LIMIT: usize = 20;

    /// Records a guest stay.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_reservation(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Apartment rented"]
        #[autocomplete = "autocomplete::autocomplete_apartment_name"]
        apartment_name: String,
        #[description = "Guest name"] client_name: String,
        #[description = "Check-in date (YYYY-MM-DD)"] check_in: String,
        #[description = "Check-out date (YYYY-MM-DD)"] check_out: String,
        #[description = "Amount paid by the guest"] total_amount: f64,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let apt = utils::find_apartment(db, &apartment_name).await?;
        let created = reservation::create_reservation(
            db,
            ReservationDetails {
                apartment_id: apt.id,
                client_name,
                check_in: utils::parse_date(&check_in)?,
                check_out: utils::parse_date(&check_out)?,
                total_amount,
                notes,
            },
        )
        .await?;

        let split = commission::commission(created.total_amount, apt.commission_rate);
        ctx.say(format!(
            "✅ Reservation #{} at **{}** for {} ({} → {}): {} | commission {} | owner {}",
            created.id,
            apt.name,
            created.client_name,
            created.check_in,
            created.check_out,
            format_amount(created.total_amount),
            format_amount(split.company_share),
            format_amount(split.owner_share)
        ))
        .await?;
        Ok(())
    }

    /// Lists the latest reservations, optionally for one apartment.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reservations(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only this apartment"]
        #[autocomplete = "autocomplete::autocomplete_apartment_name"]
        apartment_name: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let mut rows = reservation::get_reservations_with_apartments(db).await?;
        if let Some(name) = &apartment_name {
            let apt = utils::find_apartment(db, name).await?;
            rows.retain(|(res, _)| res.apartment_id == apt.id);
        }

        if rows.is_empty() {
            ctx.say("🛏️ No reservations found.").await?;
            return Ok(());
        }

        let mut response = String::from("🛏️ **Reservations**\n\n");
        for (res, apt) in rows.iter().take(LIST_LIMIT) {
            writeln!(
                &mut response,
                "#{} **{}** - {} | {} → {} | {}",
                res.id,
                apt.as_ref().map_or("?", |a| a.name.as_str()),
                res.client_name,
                res.check_in,
                res.check_out,
                format_amount(res.total_amount)
            )?;
        }
        if rows.len() > LIST_LIMIT {
            writeln!(&mut response, "_…and {} more_", rows.len() - LIST_LIMIT)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Edits a reservation. Omitted fields keep their current value.
    #[poise::command(slash_command, prefix_command)]
    pub async fn update_reservation(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Reservation id"] reservation_id: i64,
        #[description = "New apartment"]
        #[autocomplete = "autocomplete::autocomplete_apartment_name"]
        apartment_name: Option<String>,
        #[description = "New guest name"] client_name: Option<String>,
        #[description = "New check-in date (YYYY-MM-DD)"] check_in: Option<String>,
        #[description = "New check-out date (YYYY-MM-DD)"] check_out: Option<String>,
        #[description = "New amount paid by the guest"] total_amount: Option<f64>,
        #[description = "New notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let existing = reservation::get_reservation_by_id(db, reservation_id)
            .await?
            .ok_or(Error::ReservationNotFound { id: reservation_id })?;
        let mut details = ReservationDetails::from(&existing);
        if let Some(name) = apartment_name {
            details.apartment_id = utils::find_apartment(db, &name).await?.id;
        }
        if let Some(client_name) = client_name {
            details.client_name = client_name;
        }
        if let Some(check_in) = check_in {
            details.check_in = utils::parse_date(&check_in)?;
        }
        if let Some(check_out) = check_out {
            details.check_out = utils::parse_date(&check_out)?;
        }
        if let Some(total_amount) = total_amount {
            details.total_amount = total_amount;
        }
        if notes.is_some() {
            details.notes = notes;
        }

        let updated = reservation::update_reservation(db, reservation_id, details).await?;
        ctx.say(format!(
            "✅ Updated reservation #{}: {} ({} → {}), {}.",
            updated.id,
            updated.client_name,
            updated.check_in,
            updated.check_out,
            format_amount(updated.total_amount)
        ))
        .await?;
        Ok(())
    }

    /// Deletes a reservation by id.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_reservation(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Reservation id"] reservation_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        reservation::delete_reservation(db, reservation_id).await?;
        ctx.say(format!("✅ Deleted reservation #{reservation_id}."))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
