//! Charge Discord commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{
            charge::{self, ChargeDetails},
            dashboard::format_amount,
            partner::Payer,
            wallet,
        },
        entities::Apartment,
        errors::{Error, Result},
    };
    use sea_orm::EntityTrait;
    use std::{collections::HashMap, fmt::Write};

    const LIST_LIMIT: usize = 20;

    /// Records a service charge. Partner-paid charges credit that partner's wallet.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_charge(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Apartment concerned"]
        #[autocomplete = "autocomplete::autocomplete_apartment_name"]
        apartment_name: String,
        #[description = "Service type"]
        #[autocomplete = "autocomplete::autocomplete_service_name"]
        service_name: String,
        #[description = "Amount"] amount: f64,
        #[description = "Who paid: imad, jassem or company"]
        #[autocomplete = "autocomplete::autocomplete_payer"]
        paid_by: String,
        #[description = "Date of the service (YYYY-MM-DD, default: today)"] date: Option<String>,
        #[description = "Description"] description: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let apt = utils::find_apartment(db, &apartment_name).await?;
        let svc = utils::find_service_type(db, &service_name).await?;
        let payer: Payer = paid_by.parse()?;
        let date = match date {
            Some(d) => utils::parse_date(&d)?,
            None => chrono::Local::now().date_naive(),
        };

        let created = charge::create_charge(
            db,
            ChargeDetails {
                apartment_id: apt.id,
                service_type_id: svc.id,
                amount,
                date,
                description,
                paid_by: payer,
                notes,
            },
        )
        .await?;

        let mut response = format!(
            "✅ Charge #{}: {} for **{}** at **{}** on {}, paid by {}.",
            created.id,
            format_amount(created.amount),
            svc.name,
            apt.name,
            created.date,
            payer
        );
        if let Some(partner) = payer.partner() {
            let balance = wallet::get_wallet_balance(db, partner).await?;
            write!(
                &mut response,
                "\n💼 {} wallet: {}",
                partner.display_name(),
                format_amount(balance)
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Lists the latest charges, optionally for one apartment.
    #[poise::command(slash_command, prefix_command)]
    pub async fn charges(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only this apartment"]
        #[autocomplete = "autocomplete::autocomplete_apartment_name"]
        apartment_name: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let mut rows = charge::get_charges_with_service_types(db).await?;
        if let Some(name) = &apartment_name {
            let apt = utils::find_apartment(db, name).await?;
            rows.retain(|(chg, _)| chg.apartment_id == apt.id);
        }

        if rows.is_empty() {
            ctx.say("🧾 No charges found.").await?;
            return Ok(());
        }

        let apartment_names: HashMap<i64, String> = Apartment::find()
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect();

        let mut response = String::from("🧾 **Charges**\n\n");
        for (chg, svc) in rows.iter().take(LIST_LIMIT) {
            writeln!(
                &mut response,
                "#{} {} | **{}** | {} | {} | paid by {}",
                chg.id,
                chg.date,
                apartment_names
                    .get(&chg.apartment_id)
                    .map_or("?", String::as_str),
                svc.as_ref().map_or("?", |s| s.name.as_str()),
                format_amount(chg.amount),
                chg.paid_by_person
            )?;
        }
        if rows.len() > LIST_LIMIT {
            writeln!(&mut response, "_…and {} more_", rows.len() - LIST_LIMIT)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Edits a charge. Wallets follow any change of amount or payer.
    #[poise::command(slash_command, prefix_command)]
    pub async fn update_charge(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Charge id"] charge_id: i64,
        #[description = "New apartment"]
        #[autocomplete = "autocomplete::autocomplete_apartment_name"]
        apartment_name: Option<String>,
        #[description = "New service type"]
        #[autocomplete = "autocomplete::autocomplete_service_name"]
        service_name: Option<String>,
        #[description = "New amount"] amount: Option<f64>,
        #[description = "New payer: imad, jassem or company"]
        #[autocomplete = "autocomplete::autocomplete_payer"]
        paid_by: Option<String>,
        #[description = "New date (YYYY-MM-DD)"] date: Option<String>,
        #[description = "New description"] description: Option<String>,
        #[description = "New notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let existing = charge::get_charge_by_id(db, charge_id)
            .await?
            .ok_or(Error::ChargeNotFound { id: charge_id })?;
        let mut details = ChargeDetails::try_from(&existing)?;
        if let Some(name) = apartment_name {
            details.apartment_id = utils::find_apartment(db, &name).await?.id;
        }
        if let Some(name) = service_name {
            details.service_type_id = utils::find_service_type(db, &name).await?.id;
        }
        if let Some(amount) = amount {
            details.amount = amount;
        }
        if let Some(paid_by) = paid_by {
            details.paid_by = paid_by.parse()?;
        }
        if let Some(date) = date {
            details.date = utils::parse_date(&date)?;
        }
        if description.is_some() {
            details.description = description;
        }
        if notes.is_some() {
            details.notes = notes;
        }

        let updated = charge::update_charge(db, charge_id, details).await?;
        ctx.say(format!(
            "✅ Updated charge #{}: {} on {}, paid by {}.",
            updated.id,
            format_amount(updated.amount),
            updated.date,
            updated.paid_by_person
        ))
        .await?;
        Ok(())
    }

    /// Deletes a charge by id and reverses its wallet credit.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_charge(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Charge id"] charge_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        charge::delete_charge(db, charge_id).await?;
        ctx.say(format!("✅ Deleted charge #{charge_id}.")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
