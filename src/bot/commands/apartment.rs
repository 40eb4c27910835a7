//! Apartment Discord commands - register, list, update and delete apartments.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{
            apartment::{self, ApartmentDetails, ApartmentUpdate},
            commission,
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Registers a new apartment.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_apartment(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the apartment"] name: String,
        #[description = "Street address"] address: String,
        #[description = "Owner name"] owner_name: String,
        #[description = "Owner phone or email"] owner_contact: Option<String>,
        #[description = "Commission percentage (default: 25)"] commission_rate: Option<f64>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        if apartment::get_apartment_by_name(db, &name).await?.is_some() {
            ctx.say(format!("❌ Apartment '{name}' already exists."))
                .await?;
            return Ok(());
        }

        let created = apartment::create_apartment(
            db,
            ApartmentDetails {
                name,
                address,
                owner_name,
                owner_contact,
                commission_rate,
                notes,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ Registered **{}** (owner: {}) at {:.0}% commission.",
            created.name,
            created.owner_name,
            commission::effective_rate(created.commission_rate)
        ))
        .await?;
        Ok(())
    }

    /// Lists all apartments.
    #[poise::command(slash_command, prefix_command)]
    pub async fn apartments(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let all = apartment::get_all_apartments(db).await?;
        if all.is_empty() {
            ctx.say("🏠 No apartments yet. Add one with `/add_apartment`.")
                .await?;
            return Ok(());
        }

        let mut response = String::from("🏠 **Apartments**\n\n");
        for apt in all {
            write!(
                &mut response,
                "**{}** - {} | owner {}",
                apt.name, apt.address, apt.owner_name
            )?;
            if let Some(contact) = &apt.owner_contact {
                write!(&mut response, " ({contact})")?;
            }
            writeln!(
                &mut response,
                " | {:.0}%",
                commission::effective_rate(apt.commission_rate)
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Updates an apartment's details.
    #[poise::command(slash_command, prefix_command)]
    pub async fn update_apartment(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Apartment to update"]
        #[autocomplete = "autocomplete::autocomplete_apartment_name"]
        apartment_name: String,
        #[description = "New name"] new_name: Option<String>,
        #[description = "New address"] address: Option<String>,
        #[description = "New owner name"] owner_name: Option<String>,
        #[description = "New owner contact"] owner_contact: Option<String>,
        #[description = "New commission percentage"] commission_rate: Option<f64>,
        #[description = "New notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let update = ApartmentUpdate {
            name: new_name,
            address,
            owner_name,
            owner_contact,
            commission_rate,
            notes,
        };
        if update.name.is_none()
            && update.address.is_none()
            && update.owner_name.is_none()
            && update.owner_contact.is_none()
            && update.commission_rate.is_none()
            && update.notes.is_none()
        {
            ctx.say("❌ Please specify at least one field to update.")
                .await?;
            return Ok(());
        }

        let existing = utils::find_apartment(db, &apartment_name).await?;
        let updated = apartment::update_apartment(db, existing.id, update).await?;

        ctx.say(format!("✅ Updated apartment **{}**.", updated.name))
            .await?;
        Ok(())
    }

    /// Deletes an apartment with all of its reservations and charges.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_apartment(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Apartment to delete"]
        #[autocomplete = "autocomplete::autocomplete_apartment_name"]
        apartment_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let existing = utils::find_apartment(db, &apartment_name).await?;
        let deletion = apartment::delete_apartment(db, existing.id).await?;

        ctx.say(format!(
            "✅ Deleted **{}** along with {} reservation(s) and {} charge(s).",
            existing.name, deletion.reservations_removed, deletion.charges_removed
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
