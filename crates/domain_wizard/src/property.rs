//! Property Record Editor
//!
//! A request lists one or more insured properties. The list is edited in
//! place: properties are added with defaults, patched field by field, removed
//! while at least one remains, and browsed through an "active" pointer that
//! drives which card the form shows.
//!
//! # Invariants
//!
//! - The list is never empty
//! - Property identifiers are unique within the list
//! - The active pointer always designates an existing entry

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::PropertyId;

use crate::error::WizardError;

/// Country every property is located in; not editable from the form
pub const DEFAULT_COUNTRY: &str = "Saudi Arabia";

/// Number of calendar years (counting the current one) offered for year of construction
pub const CONSTRUCTION_YEAR_SPAN: i32 = 75;

macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All values in picker order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label shown in the picker
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

labelled_enum!(
    /// Industry segment the insured activity belongs to
    IndustrySegment {
        Residential => "Residential",
        Commercial => "Commercial",
        Industrial => "Industrial",
        Hospitality => "Hospitality",
        Educational => "Educational",
        Healthcare => "Healthcare",
    }
);

labelled_enum!(
    /// What is being insured at the location
    InterestType {
        Building => "Building",
        Contents => "Contents",
        Machinery => "Machinery",
        Stocks => "Stocks",
        FixturesAndFittings => "Fixtures & Fittings",
    }
);

labelled_enum!(
    RiskCategory {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        SpecialRisk => "Special Risk",
    }
);

labelled_enum!(
    ConstructionMaterial {
        Concrete => "Concrete",
        SteelFrame => "Steel Frame",
        Masonry => "Masonry",
        Wood => "Wood",
        Other => "Other",
    }
);

labelled_enum!(
    City {
        Riyadh => "Riyadh",
        Jeddah => "Jeddah",
        Dammam => "Dammam",
        Khobar => "Khobar",
        Mecca => "Mecca",
        Medina => "Medina",
        Tabuk => "Tabuk",
        Abha => "Abha",
    }
);

/// Whether the property has a claims history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClaimsHistory {
    Yes,
    #[default]
    No,
}

/// Installed safety systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SafetySystems {
    pub fire_alarm: bool,
    pub burglar_alarm: bool,
    pub cctv: bool,
    pub sprinkler: bool,
}

/// One insured asset or location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    id: PropertyId,
    pub interest_description: String,
    /// Free text, not validated as a coordinate
    pub longitude: String,
    /// Free text, not validated as a coordinate
    pub latitude: String,
    pub interest_effective_date: Option<NaiveDate>,
    pub industry_segment: Option<IndustrySegment>,
    /// Share of the property used for the insured activity (0-100)
    pub usage_percent: u8,
    pub interest_type: Option<InterestType>,
    pub risk_category: Option<RiskCategory>,
    /// Total area in square metres, as entered
    pub total_area_sqm: String,
    pub year_of_construction: Option<i32>,
    pub floors: Option<u32>,
    pub construction_material: Option<ConstructionMaterial>,
    pub min_deductible: Option<Decimal>,
    pub safety: SafetySystems,
    pub location_name: String,
    country: String,
    pub city: Option<City>,
    pub claims_history: ClaimsHistory,
    /// Only meaningful when `claims_history` is `Yes`; see [`Property::reported_claim_amount`]
    pub claim_amount: Option<Decimal>,
}

impl Property {
    /// Creates a property with a fresh identifier and the form defaults
    pub fn new() -> Self {
        Self {
            id: PropertyId::new(),
            interest_description: String::new(),
            longitude: String::new(),
            latitude: String::new(),
            interest_effective_date: None,
            industry_segment: None,
            usage_percent: 0,
            interest_type: None,
            risk_category: None,
            total_area_sqm: String::new(),
            year_of_construction: None,
            floors: None,
            construction_material: None,
            min_deductible: None,
            safety: SafetySystems::default(),
            location_name: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            city: None,
            claims_history: ClaimsHistory::No,
            claim_amount: None,
        }
    }

    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// The claim amount, if the property declares a claims history
    pub fn reported_claim_amount(&self) -> Option<Decimal> {
        match self.claims_history {
            ClaimsHistory::Yes => self.claim_amount,
            ClaimsHistory::No => None,
        }
    }

    /// Heading for the property card, e.g. "Main Warehouse" or "Property #2"
    pub fn heading(&self, position: usize) -> String {
        let description = self.interest_description.trim();
        if description.is_empty() {
            format!("Property #{}", position)
        } else {
            description.to_string()
        }
    }

    /// Merges a patch into this property
    ///
    /// The patch is validated as a whole before any field is written, so a
    /// rejected patch leaves the property untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` for a usage percentage above 100 or a year of
    /// construction outside the offered range.
    pub fn apply(&mut self, patch: PropertyPatch) -> Result<(), WizardError> {
        patch.validate()?;

        let PropertyPatch {
            interest_description,
            longitude,
            latitude,
            interest_effective_date,
            industry_segment,
            usage_percent,
            interest_type,
            risk_category,
            total_area_sqm,
            year_of_construction,
            floors,
            construction_material,
            min_deductible,
            fire_alarm,
            burglar_alarm,
            cctv,
            sprinkler,
            location_name,
            city,
            claims_history,
            claim_amount,
        } = patch;

        assign(&mut self.interest_description, interest_description);
        assign(&mut self.longitude, longitude);
        assign(&mut self.latitude, latitude);
        assign_some(&mut self.interest_effective_date, interest_effective_date);
        assign_some(&mut self.industry_segment, industry_segment);
        assign(&mut self.usage_percent, usage_percent);
        assign_some(&mut self.interest_type, interest_type);
        assign_some(&mut self.risk_category, risk_category);
        assign(&mut self.total_area_sqm, total_area_sqm);
        assign_some(&mut self.year_of_construction, year_of_construction);
        assign_some(&mut self.floors, floors);
        assign_some(&mut self.construction_material, construction_material);
        assign_some(&mut self.min_deductible, min_deductible);
        assign(&mut self.safety.fire_alarm, fire_alarm);
        assign(&mut self.safety.burglar_alarm, burglar_alarm);
        assign(&mut self.safety.cctv, cctv);
        assign(&mut self.safety.sprinkler, sprinkler);
        assign(&mut self.location_name, location_name);
        assign_some(&mut self.city, city);
        assign(&mut self.claims_history, claims_history);
        assign_some(&mut self.claim_amount, claim_amount);

        Ok(())
    }
}

impl Default for Property {
    fn default() -> Self {
        Self::new()
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn assign_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Years offered for year of construction, newest first
pub fn construction_years(current_year: i32) -> impl Iterator<Item = i32> {
    (0..CONSTRUCTION_YEAR_SPAN).map(move |offset| current_year - offset)
}

/// Partial update of a property; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyPatch {
    pub interest_description: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub interest_effective_date: Option<NaiveDate>,
    pub industry_segment: Option<IndustrySegment>,
    pub usage_percent: Option<u8>,
    pub interest_type: Option<InterestType>,
    pub risk_category: Option<RiskCategory>,
    pub total_area_sqm: Option<String>,
    pub year_of_construction: Option<i32>,
    pub floors: Option<u32>,
    pub construction_material: Option<ConstructionMaterial>,
    pub min_deductible: Option<Decimal>,
    pub fire_alarm: Option<bool>,
    pub burglar_alarm: Option<bool>,
    pub cctv: Option<bool>,
    pub sprinkler: Option<bool>,
    pub location_name: Option<String>,
    pub city: Option<City>,
    pub claims_history: Option<ClaimsHistory>,
    pub claim_amount: Option<Decimal>,
}

impl PropertyPatch {
    fn validate(&self) -> Result<(), WizardError> {
        if let Some(usage) = self.usage_percent {
            if usage > 100 {
                return Err(WizardError::invalid_field(
                    "usage_percent",
                    format!("{} is outside 0-100", usage),
                ));
            }
        }

        if let Some(year) = self.year_of_construction {
            let current = Utc::now().year();
            let oldest = current - (CONSTRUCTION_YEAR_SPAN - 1);
            if year > current || year < oldest {
                return Err(WizardError::invalid_field(
                    "year_of_construction",
                    format!("{} is outside {}-{}", year, oldest, current),
                ));
            }
        }

        Ok(())
    }
}

/// The repeatable property list of a request draft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyList {
    entries: Vec<Property>,
    #[serde(skip)]
    active: usize,
}

impl PropertyList {
    /// Creates a list holding one default property, which is active
    pub fn new() -> Self {
        Self {
            entries: vec![Property::new()],
            active: 0,
        }
    }

    /// Creates a standalone property with defaults (not yet listed)
    pub fn create() -> Property {
        Property::new()
    }

    /// Appends a new default property and makes it active
    pub fn add(&mut self) -> PropertyId {
        let property = Property::new();
        let id = property.id();
        self.entries.push(property);
        self.active = self.entries.len() - 1;
        debug!(property_id = %id, count = self.entries.len(), "Property added");
        id
    }

    /// Removes a property while at least one other remains
    ///
    /// Returns `false` (and changes nothing) for the last remaining entry or an
    /// unknown id. Removing the active entry activates the first remaining one.
    pub fn remove(&mut self, id: PropertyId) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };

        self.entries.remove(index);
        if index == self.active {
            self.active = 0;
        } else if index < self.active {
            self.active -= 1;
        }
        debug!(property_id = %id, count = self.entries.len(), "Property removed");
        true
    }

    /// Merges a patch into the property with the given id
    ///
    /// Returns `Ok(false)` when no property has this id.
    pub fn update(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<bool, WizardError> {
        match self.entries.iter_mut().find(|p| p.id() == id) {
            Some(property) => {
                property.apply(patch)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Makes the property with the given id active
    pub fn select(&mut self, id: PropertyId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    /// Moves the active pointer one entry back; no-op on the first entry
    pub fn select_previous(&mut self) -> bool {
        if self.active == 0 {
            return false;
        }
        self.active -= 1;
        true
    }

    /// Moves the active pointer one entry forward; no-op on the last entry
    pub fn select_next(&mut self) -> bool {
        if self.active + 1 >= self.entries.len() {
            return false;
        }
        self.active += 1;
        true
    }

    pub fn active(&self) -> &Property {
        &self.entries[self.active]
    }

    pub fn active_id(&self) -> PropertyId {
        self.active().id()
    }

    /// 1-based position of the active property
    pub fn position(&self) -> usize {
        self.active + 1
    }

    pub fn has_previous(&self) -> bool {
        self.active > 0
    }

    pub fn has_next(&self) -> bool {
        self.active + 1 < self.entries.len()
    }

    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.entries.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Property] {
        &self.entries
    }

    fn index_of(&self, id: PropertyId) -> Option<usize> {
        self.entries.iter().position(|p| p.id() == id)
    }
}

impl Default for PropertyList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let property = Property::new();
        assert_eq!(property.usage_percent, 0);
        assert_eq!(property.claims_history, ClaimsHistory::No);
        assert_eq!(property.country(), "Saudi Arabia");
        assert_eq!(property.safety, SafetySystems::default());
        assert!(property.interest_description.is_empty());
        assert!(property.city.is_none());
    }

    #[test]
    fn test_remove_active_falls_back_to_first() {
        let mut list = PropertyList::new();
        let first = list.active_id();
        let second = list.add();
        let third = list.add();
        assert_eq!(list.active_id(), third);

        assert!(list.remove(third));
        assert_eq!(list.active_id(), first);
        assert!(list.get(second).is_some());
    }

    #[test]
    fn test_remove_before_active_keeps_same_entry_active() {
        let mut list = PropertyList::new();
        let first = list.active_id();
        let second = list.add();

        assert!(list.remove(first));
        assert_eq!(list.active_id(), second);
        assert_eq!(list.position(), 1);
    }

    #[test]
    fn test_claim_amount_gated_by_history() {
        let mut property = Property::new();
        property.claim_amount = Some(Decimal::new(1500, 0));
        assert_eq!(property.reported_claim_amount(), None);

        property.claims_history = ClaimsHistory::Yes;
        assert_eq!(property.reported_claim_amount(), Some(Decimal::new(1500, 0)));
    }

    #[test]
    fn test_heading_falls_back_to_position() {
        let mut property = Property::new();
        assert_eq!(property.heading(2), "Property #2");
        property.interest_description = "  Main Warehouse Facility A ".to_string();
        assert_eq!(property.heading(2), "Main Warehouse Facility A");
    }

    #[test]
    fn test_construction_years_window() {
        let years: Vec<i32> = construction_years(2026).collect();
        assert_eq!(years.len(), 75);
        assert_eq!(years.first(), Some(&2026));
        assert_eq!(years.last(), Some(&1952));
    }

    #[test]
    fn test_labels() {
        assert_eq!(InterestType::FixturesAndFittings.label(), "Fixtures & Fittings");
        assert_eq!(RiskCategory::SpecialRisk.label(), "Special Risk");
        assert_eq!(City::ALL.len(), 8);
    }
}
