//! Validation for tier edits before they reach the ladder.
//!
//! Whatever UI the tiers are edited in binds its fields to a plain
//! [TierForm], calls [TierForm::validate], and shows the per-field messages.
//! The ladder and the conversion engine never reject bad names or rates
//! themselves, so this is the place to catch them.

use crate::{
    error::{Error, Result},
    models::tier::{CurrencyTier, TierID, TierPatch},
};
use std::collections::BTreeMap;
use std::fmt;

/// The editable fields on a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TierField {
    Name,
    ConversionToNext,
}

impl fmt::Display for TierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TierField::Name => "name",
            TierField::ConversionToNext => "conversionToNext",
        };
        write!(f, "{}", name)
    }
}

/// A set of field -> message failures. Empty means the form is good to go.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<TierField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<T: Into<String>>(&mut self, field: TierField, message: T) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: TierField) -> Option<&str> {
        self.errors.get(&field).map(|x| x.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TierField, &String)> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// The fields a user fills out when creating or editing a tier.
#[derive(Clone, Debug, PartialEq)]
pub struct TierForm {
    pub name: String,
    pub conversion_to_next: f64,
}

impl Default for TierForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            conversion_to_next: 1.0,
        }
    }
}

impl TierForm {
    pub fn new<T: Into<String>>(name: T, conversion_to_next: f64) -> Self {
        Self { name: name.into(), conversion_to_next }
    }

    /// Fill a form in from an existing tier, ie for an edit dialog.
    pub fn from_tier(tier: &CurrencyTier) -> Self {
        Self::new(tier.name().clone(), *tier.conversion_to_next())
    }

    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add(TierField::Name, "name is required");
        }
        // NaN fails this too
        if !(self.conversion_to_next.is_finite() && self.conversion_to_next >= 1.0) {
            errors.add(TierField::ConversionToNext, "conversion rate must be at least 1");
        }
        errors
    }

    fn check(&self) -> Result<()> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        Ok(())
    }

    /// Validate, then turn this form into a brand new tier with a fresh id,
    /// ready for `TierLadder::add`.
    pub fn into_tier(self) -> Result<CurrencyTier> {
        self.check()?;
        CurrencyTier::builder()
            .id(TierID::create())
            .name(self.name.trim())
            .conversion_to_next(self.conversion_to_next)
            .build()
            .map_err(|e| Error::BuilderFailed(e))
    }

    /// Validate, then turn this form into a patch for `TierLadder::update`.
    pub fn into_patch(self) -> Result<TierPatch> {
        self.check()?;
        Ok(TierPatch {
            name: Some(self.name.trim().to_string()),
            conversion_to_next: Some(self.conversion_to_next),
            order: None,
        })
    }
}
