//! Saved payment cards.
//!
//! Only the brand, last four digits, holder and expiry are kept. The store is plain owned state
//! handed to whoever needs it.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::Date;
use thiserror::Error;
use zeroize::Zeroize;

const MAX_YEARS_AHEAD: i16 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentsError {
    #[error("card number is invalid")]
    InvalidNumber,

    #[error("cardholder name must be at least three letters")]
    InvalidHolder,

    #[error("expiry must be a month 01-12 and a two digit year")]
    InvalidExpiry,

    #[error("card has expired")]
    Expired,

    #[error("expiry year is too far in the future")]
    ExpiryTooFar,

    #[error("card {0} is already saved")]
    Duplicate(String),

    #[error("no saved card ending in {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Unknown,
}

impl CardBrand {
    fn detect(digits: &[u8]) -> Self {
        match digits {
            [4, ..] => Self::Visa,
            [5, 1..=5, ..] => Self::Mastercard,
            [3, 4 | 7, ..] => Self::Amex,
            _ => Self::Unknown,
        }
    }

    const fn length(self) -> usize {
        match self {
            Self::Amex => 15,
            Self::Visa | Self::Mastercard | Self::Unknown => 16,
        }
    }
}

impl Display for CardBrand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Unknown => "Card",
        })
    }
}

/// A card as remembered after entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCard {
    brand: CardBrand,
    last4: String,
    holder: String,
    expiry_month: i8,
    expiry_year: i16,
}

impl SavedCard {
    /// Validate card details entered by the user and keep the displayable parts.
    ///
    /// Spaces and dashes in the number are ignored. `expiry_year` is two digits.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentsError`] naming the first field that fails validation.
    pub fn from_input(
        number: &str,
        holder: &str,
        expiry_month: &str,
        expiry_year: &str,
        today: Date,
    ) -> Result<Self, PaymentsError> {
        let mut digits = parse_digits(number)?;

        let brand = CardBrand::detect(&digits);
        let valid = digits.len() == brand.length() && luhn_valid(&digits);
        let last4: String = digits
            .iter()
            .skip(digits.len().saturating_sub(4))
            .map(|digit| char::from(b'0' + digit))
            .collect();

        digits.zeroize();

        if !valid {
            return Err(PaymentsError::InvalidNumber);
        }

        let holder = holder.trim().to_uppercase();

        if holder.chars().count() < 3
            || !holder.chars().all(|c| c.is_ascii_uppercase() || c == ' ')
        {
            return Err(PaymentsError::InvalidHolder);
        }

        let (expiry_month, expiry_year) = parse_expiry(expiry_month, expiry_year)?;

        if (expiry_year, expiry_month) < (today.year(), today.month()) {
            return Err(PaymentsError::Expired);
        }

        if expiry_year > today.year().saturating_add(MAX_YEARS_AHEAD) {
            return Err(PaymentsError::ExpiryTooFar);
        }

        Ok(Self {
            brand,
            last4,
            holder,
            expiry_month,
            expiry_year,
        })
    }

    #[must_use]
    pub fn brand(&self) -> CardBrand {
        self.brand
    }

    #[must_use]
    pub fn last4(&self) -> &str {
        &self.last4
    }

    #[must_use]
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// `•••• •••• •••• 1234`
    #[must_use]
    pub fn masked_number(&self) -> String {
        format!("•••• •••• •••• {}", self.last4)
    }

    /// `MM/YY`
    #[must_use]
    pub fn expiry(&self) -> String {
        format!("{:02}/{:02}", self.expiry_month, self.expiry_year % 100)
    }
}

fn parse_digits(number: &str) -> Result<Vec<u8>, PaymentsError> {
    number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| {
            c.to_digit(10)
                .and_then(|digit| u8::try_from(digit).ok())
                .ok_or(PaymentsError::InvalidNumber)
        })
        .collect()
}

fn parse_expiry(month: &str, year: &str) -> Result<(i8, i16), PaymentsError> {
    let month = month.trim();
    let year = year.trim();

    if month.len() != 2 || year.len() != 2 {
        return Err(PaymentsError::InvalidExpiry);
    }

    match (month.parse::<i8>().ok(), year.parse::<i16>().ok()) {
        (Some(month @ 1..=12), Some(year @ 0..=99)) => Ok((month, 2000 + year)),
        _ => Err(PaymentsError::InvalidExpiry),
    }
}

fn luhn_valid(digits: &[u8]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &digit)| {
            let digit = u32::from(digit);

            if position % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

/// Cards the user has saved, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct SavedCards {
    cards: Vec<SavedCard>,
}

impl SavedCards {
    /// Save a card.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::Duplicate`] when a card with the same brand, last four digits
    /// and expiry is already saved.
    pub fn add(&mut self, card: SavedCard) -> Result<(), PaymentsError> {
        let duplicate = self.cards.iter().any(|saved| {
            saved.brand == card.brand
                && saved.last4 == card.last4
                && saved.expiry() == card.expiry()
        });

        if duplicate {
            return Err(PaymentsError::Duplicate(card.masked_number()));
        }

        self.cards.push(card);

        Ok(())
    }

    /// Forget the first card ending in `last4`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::NotFound`] when no card matches.
    pub fn remove(&mut self, last4: &str) -> Result<SavedCard, PaymentsError> {
        let index = self
            .cards
            .iter()
            .position(|card| card.last4 == last4)
            .ok_or_else(|| PaymentsError::NotFound(last4.to_string()))?;

        Ok(self.cards.remove(index))
    }

    #[must_use]
    pub fn list(&self) -> &[SavedCard] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    const TODAY: Date = date(2025, 6, 15);

    #[test]
    fn valid_visa_is_masked() -> TestResult {
        let card = SavedCard::from_input("4532 0151 1283 0366", "asha rao", "12", "27", TODAY)?;

        assert_eq!(card.brand(), CardBrand::Visa);
        assert_eq!(card.masked_number(), "•••• •••• •••• 0366");
        assert_eq!(card.holder(), "ASHA RAO");
        assert_eq!(card.expiry(), "12/27");

        Ok(())
    }

    #[test]
    fn amex_needs_fifteen_digits() -> TestResult {
        let card = SavedCard::from_input("374245455400126", "Dev Patel", "01", "30", TODAY)?;

        assert_eq!(card.brand(), CardBrand::Amex);

        assert_eq!(
            SavedCard::from_input("3742454554001260", "Dev Patel", "01", "30", TODAY),
            Err(PaymentsError::InvalidNumber)
        );

        Ok(())
    }

    #[test]
    fn failing_checksum_is_rejected() {
        assert_eq!(
            SavedCard::from_input("4532015112830367", "Asha Rao", "12", "27", TODAY),
            Err(PaymentsError::InvalidNumber)
        );
        assert_eq!(
            SavedCard::from_input("4532x15112830366", "Asha Rao", "12", "27", TODAY),
            Err(PaymentsError::InvalidNumber)
        );
    }

    #[test]
    fn expiry_is_checked_against_today() {
        let check = |month: &str, year: &str| {
            SavedCard::from_input("4532015112830366", "Asha Rao", month, year, TODAY)
        };

        assert_eq!(check("05", "25"), Err(PaymentsError::Expired));
        assert!(check("06", "25").is_ok(), "current month is still valid");
        assert_eq!(check("01", "36"), Err(PaymentsError::ExpiryTooFar));
        assert_eq!(check("13", "26"), Err(PaymentsError::InvalidExpiry));
        assert_eq!(check("1", "26"), Err(PaymentsError::InvalidExpiry));
    }

    #[test]
    fn holder_must_be_letters() {
        assert_eq!(
            SavedCard::from_input("4532015112830366", "A1", "12", "27", TODAY),
            Err(PaymentsError::InvalidHolder)
        );
    }

    #[test]
    fn store_rejects_duplicates_and_removes_by_last_four() -> TestResult {
        let mut cards = SavedCards::default();
        let card = SavedCard::from_input("4532015112830366", "Asha Rao", "12", "27", TODAY)?;

        cards.add(card.clone())?;

        assert_eq!(
            cards.add(card),
            Err(PaymentsError::Duplicate("•••• •••• •••• 0366".to_string()))
        );
        assert_eq!(cards.len(), 1);

        let removed = cards.remove("0366")?;

        assert_eq!(removed.last4(), "0366");
        assert!(cards.is_empty(), "store should be empty");
        assert_eq!(
            cards.remove("0366"),
            Err(PaymentsError::NotFound("0366".to_string()))
        );

        Ok(())
    }
}
