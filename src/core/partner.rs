//! Partner and liability vocabularies.
//!
//! The business has exactly two profit-sharing partners. Charges record who paid
//! them ([`Payer`]) and service types record who is liable for them ([`PaidBy`]).
//! All three are stored as lowercase strings and parsed back at the boundaries.

use crate::errors::Error;
use std::fmt;
use std::str::FromStr;

/// One of the two profit-sharing partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partner {
    /// Imad
    Imad,
    /// Jassem
    Jassem,
}

impl Partner {
    /// Both partners, in display order.
    pub const ALL: [Self; 2] = [Self::Imad, Self::Jassem];

    /// Storage key used in `person_name` and `paid_by_person` columns.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imad => "imad",
            Self::Jassem => "jassem",
        }
    }

    /// Capitalized name for messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Imad => "Imad",
            Self::Jassem => "Jassem",
        }
    }
}

impl fmt::Display for Partner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Partner {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "imad" => Ok(Self::Imad),
            "jassem" => Ok(Self::Jassem),
            _ => Err(Error::UnknownPartner {
                name: s.to_string(),
            }),
        }
    }
}

/// Who actually paid a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payer {
    /// Paid from the company account
    Company,
    /// Paid personally by a partner, to be reimbursed through their wallet
    Partner(Partner),
}

impl Payer {
    /// Storage key used in the `paid_by_person` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Partner(partner) => partner.as_str(),
        }
    }

    /// The partner whose wallet this payment goes to, if any.
    #[must_use]
    pub const fn partner(self) -> Option<Partner> {
        match self {
            Self::Company => None,
            Self::Partner(partner) => Some(partner),
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Company => f.write_str("Company"),
            Self::Partner(partner) => partner.fmt(f),
        }
    }
}

impl FromStr for Payer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "company" | "société" | "societe" => Ok(Self::Company),
            other => other
                .parse::<Partner>()
                .map(Self::Partner)
                .map_err(|_| Error::UnknownPayer {
                    name: s.to_string(),
                }),
        }
    }
}

impl From<Partner> for Payer {
    fn from(partner: Partner) -> Self {
        Self::Partner(partner)
    }
}

/// Who is liable for charges of a service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaidBy {
    /// Deducted from partner profit
    Company,
    /// Billed to the apartment owner, not deducted from profit
    Owner,
}

impl PaidBy {
    /// Storage key used in the `paid_by` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for PaidBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Company => f.write_str("Company"),
            Self::Owner => f.write_str("Owner"),
        }
    }
}

impl FromStr for PaidBy {
    type Err = Error;

    // "Société" and "Propriétaire" are the labels older records were saved with.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "company" | "société" | "societe" => Ok(Self::Company),
            "owner" | "propriétaire" | "proprietaire" => Ok(Self::Owner),
            _ => Err(Error::UnknownPaidBy {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_partner_parsing_is_case_insensitive() {
        assert_eq!("imad".parse::<Partner>().unwrap(), Partner::Imad);
        assert_eq!(" Jassem ".parse::<Partner>().unwrap(), Partner::Jassem);
        assert!(matches!(
            "company".parse::<Partner>(),
            Err(Error::UnknownPartner { .. })
        ));
    }

    #[test]
    fn test_payer_parsing() {
        assert_eq!("company".parse::<Payer>().unwrap(), Payer::Company);
        assert_eq!(
            "IMAD".parse::<Payer>().unwrap(),
            Payer::Partner(Partner::Imad)
        );
        assert!(matches!(
            "owner".parse::<Payer>(),
            Err(Error::UnknownPayer { .. })
        ));
    }

    #[test]
    fn test_payer_partner() {
        assert_eq!(Payer::Company.partner(), None);
        assert_eq!(Payer::from(Partner::Jassem).partner(), Some(Partner::Jassem));
        assert_eq!(Payer::from(Partner::Jassem).as_str(), "jassem");
    }

    #[test]
    fn test_paid_by_accepts_legacy_labels() {
        assert_eq!("Société".parse::<PaidBy>().unwrap(), PaidBy::Company);
        assert_eq!("owner".parse::<PaidBy>().unwrap(), PaidBy::Owner);
        assert_eq!("Propriétaire".parse::<PaidBy>().unwrap(), PaidBy::Owner);
        assert!(matches!(
            "imad".parse::<PaidBy>(),
            Err(Error::UnknownPaidBy { .. })
        ));
    }
}
