//! Partner identity configuration.
//!
//! Maps Discord user IDs to the two partners so that wallet and payout commands
//! can default to whoever invoked them. Configured through `IMAD_DISCORD_ID` and
//! `JASSEM_DISCORD_ID` in the `.env` file; both are optional.

use crate::core::partner::Partner;

/// Environment variable holding the Discord user ID for a partner.
#[must_use]
pub const fn discord_id_var(partner: Partner) -> &'static str {
    match partner {
        Partner::Imad => "IMAD_DISCORD_ID",
        Partner::Jassem => "JASSEM_DISCORD_ID",
    }
}

/// Resolves a Discord user ID to a partner, if that user is configured as one.
#[must_use]
pub fn partner_for_discord_user(user_id: &str) -> Option<Partner> {
    Partner::ALL.into_iter().find(|partner| {
        std::env::var(discord_id_var(*partner)).is_ok_and(|configured| configured == user_id)
    })
}
