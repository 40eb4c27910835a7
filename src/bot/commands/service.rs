//! Service type Discord commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{partner::PaidBy, service_type},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Creates a service type and sets who is liable for its charges.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_service(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the service"] name: String,
        #[description = "Who is liable: company or owner"]
        #[autocomplete = "autocomplete::autocomplete_paid_by"]
        paid_by: String,
        #[description = "Description"] description: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let paid_by: PaidBy = paid_by.parse()?;

        if service_type::get_service_type_by_name(db, &name)
            .await?
            .is_some()
        {
            ctx.say(format!("❌ Service '{name}' already exists."))
                .await?;
            return Ok(());
        }

        let created = service_type::create_service_type(db, name, description, paid_by).await?;
        ctx.say(format!(
            "✅ Created service **{}**, paid by {}.",
            created.name, paid_by
        ))
        .await?;
        Ok(())
    }

    /// Lists all service types.
    #[poise::command(slash_command, prefix_command)]
    pub async fn services(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let all = service_type::get_all_service_types(db).await?;
        if all.is_empty() {
            ctx.say("🧰 No services yet. Add one with `/add_service`.")
                .await?;
            return Ok(());
        }

        let mut response = String::from("🧰 **Services**\n\n");
        for svc in all {
            write!(&mut response, "**{}** - paid by {}", svc.name, svc.paid_by)?;
            if let Some(description) = &svc.description {
                write!(&mut response, " - {description}")?;
            }
            writeln!(&mut response)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Renames a service type or changes who is liable for it.
    #[poise::command(slash_command, prefix_command)]
    pub async fn update_service(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Service to edit"]
        #[autocomplete = "autocomplete::autocomplete_service_name"]
        service_name: String,
        #[description = "New name"] new_name: Option<String>,
        #[description = "Who is liable: company or owner"]
        #[autocomplete = "autocomplete::autocomplete_paid_by"]
        paid_by: Option<String>,
        #[description = "New description"] description: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let existing = utils::find_service_type(db, &service_name).await?;
        let paid_by: Option<PaidBy> = paid_by.map(|p| p.parse()).transpose()?;
        if let Some(name) = new_name.as_deref().map(str::trim) {
            let taken = name != existing.name
                && service_type::get_service_type_by_name(db, name)
                    .await?
                    .is_some();
            if taken {
                ctx.say(format!("❌ Service '{name}' already exists."))
                    .await?;
                return Ok(());
            }
        }

        let updated =
            service_type::update_service_type(db, existing.id, new_name, description, paid_by)
                .await?;
        ctx.say(format!(
            "✅ Updated service **{}**, paid by {}.",
            updated.name, updated.paid_by
        ))
        .await?;
        Ok(())
    }

    /// Deletes a service type no charge uses.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_service(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Service to delete"]
        #[autocomplete = "autocomplete::autocomplete_service_name"]
        service_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let existing = utils::find_service_type(db, &service_name).await?;
        match service_type::delete_service_type(db, existing.id).await {
            Ok(()) => {
                ctx.say(format!("✅ Deleted service **{}**.", existing.name))
                    .await?;
            }
            Err(Error::ServiceTypeInUse { charges, .. }) => {
                ctx.say(format!(
                    "❌ **{}** is used by {charges} charge(s). Delete or reassign them first.",
                    existing.name
                ))
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
