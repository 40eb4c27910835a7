//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are case-insensitive substring matches, capped at Discord's
//! limit of 25 and sorted alphabetically.

use crate::{
    bot::BotData,
    core::{apartment, partner::Partner, service_type},
    errors::Error,
};

const DISCORD_CHOICE_LIMIT: usize = 25;

fn matching_names(names: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(DISCORD_CHOICE_LIMIT)
        .collect();
    matching.sort();
    matching
}

/// Provides autocomplete suggestions for apartment names.
pub async fn autocomplete_apartment_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(apartments) = apartment::get_all_apartments(db).await else {
        return Vec::new();
    };

    matching_names(apartments.into_iter().map(|apt| apt.name), partial)
}

/// Provides autocomplete suggestions for service type names.
pub async fn autocomplete_service_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(services) = service_type::get_all_service_types(db).await else {
        return Vec::new();
    };

    matching_names(services.into_iter().map(|svc| svc.name), partial)
}

/// Provides autocomplete suggestions for partner names.
pub async fn autocomplete_partner(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_names(
        Partner::ALL.iter().map(|p| p.as_str().to_string()),
        partial,
    )
}

/// Provides autocomplete suggestions for who paid a charge.
pub async fn autocomplete_payer(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_names(
        Partner::ALL
            .iter()
            .map(|p| p.as_str().to_string())
            .chain(std::iter::once("company".to_string())),
        partial,
    )
}

/// Provides autocomplete suggestions for service liability.
pub async fn autocomplete_paid_by(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_names(["company".to_string(), "owner".to_string()], partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_names_is_case_insensitive_and_sorted() {
        let names = ["Sousse Beach", "La Marsa", "Marsa Plage"].map(String::from);
        assert_eq!(
            matching_names(names, "MARSA"),
            vec!["La Marsa".to_string(), "Marsa Plage".to_string()]
        );
    }

    #[test]
    fn test_matching_names_caps_at_discord_limit() {
        let names = (0..40).map(|i| format!("Apartment {i:02}"));
        assert_eq!(matching_names(names, "apartment").len(), DISCORD_CHOICE_LIMIT);
    }
}
