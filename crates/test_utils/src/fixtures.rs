//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the policy console. Policy fixtures are taken
//! from the demo catalog so that scenario sentinels ("1", "5", "6", "7")
//! line up with the default scenario table.

use chrono::NaiveDate;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{Currency, Money, PropertyId};
use domain_policy::{Policy, PolicyKey, PolicySource, PolicyStatus, StaticPolicyCatalog};
use domain_wizard::{
    City, ClaimsHistory, IndustrySegment, PaymentMethod, PaymentPatch, PropertyPatch,
    WizardSettings,
};

static CATALOG: Lazy<StaticPolicyCatalog> = Lazy::new(StaticPolicyCatalog::demo);

/// Fixture for policy records
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// The demo catalog (15 policies, 12 of them active)
    pub fn catalog() -> StaticPolicyCatalog {
        CATALOG.clone()
    }

    /// Looks up a demo policy by key; panics for keys outside the catalog
    pub fn by_key(key: &str) -> Policy {
        CATALOG
            .find(&PolicyKey::from(key))
            .unwrap_or_else(|| panic!("demo catalog has no policy {}", key))
    }

    /// Active policy with no scenario sentinel (issues directly)
    pub fn plain_active() -> Policy {
        Self::by_key("8")
    }

    /// Active policy that asks for payment details on acceptance
    pub fn payment_required() -> Policy {
        Self::by_key("1")
    }

    /// Active policy whose generation ends in the error screen
    pub fn generation_error() -> Policy {
        Self::by_key("5")
    }

    /// Active policy whose generation ends in the delayed screen
    pub fn generation_delayed() -> Policy {
        Self::by_key("6")
    }

    /// Active policy whose acceptance expires
    pub fn expires_on_acceptance() -> Policy {
        Self::by_key("7")
    }

    /// Expired policy (offers renewal only)
    pub fn expired() -> Policy {
        Self::by_key("4")
    }

    /// A policy outside the demo catalog
    pub fn custom(key: &str, status: PolicyStatus) -> Policy {
        Policy {
            id: PolicyKey::from(key),
            reference_no: format!("POL-{:0>5}-TS", key),
            cr_number: "CR-12345-6".to_string(),
            name: "Test Holdings Co.".to_string(),
            status,
            updated_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }
}

/// Fixture for wizard settings
pub struct SettingsFixtures;

impl SettingsFixtures {
    /// Default scenario table with the production 2 s minimum delay
    pub fn standard() -> WizardSettings {
        WizardSettings::default()
    }

    /// Default scenario table without a minimum delay
    pub fn instant() -> WizardSettings {
        WizardSettings {
            min_loading_ms: 0,
            ..WizardSettings::default()
        }
    }
}

/// Fixture for property and payment edits
pub struct PatchFixtures;

impl PatchFixtures {
    /// A patch that only changes the city
    pub fn city(city: City) -> PropertyPatch {
        PropertyPatch {
            city: Some(city),
            ..Default::default()
        }
    }

    /// A fully described warehouse with a claims history
    pub fn warehouse() -> PropertyPatch {
        PropertyPatch {
            interest_description: Some("Main Warehouse Facility A".to_string()),
            longitude: Some("46.6753".to_string()),
            latitude: Some("24.7136".to_string()),
            industry_segment: Some(IndustrySegment::Industrial),
            usage_percent: Some(80),
            total_area_sqm: Some("12500".to_string()),
            floors: Some(2),
            min_deductible: Some(dec!(5000)),
            fire_alarm: Some(true),
            sprinkler: Some(true),
            location_name: Some("Second Industrial City".to_string()),
            city: Some(City::Riyadh),
            claims_history: Some(ClaimsHistory::Yes),
            claim_amount: Some(dec!(12000)),
            ..Default::default()
        }
    }

    /// A payment patch with every input filled in, using generated contact data
    pub fn complete_payment() -> PaymentPatch {
        let name: String = Name().fake();
        let mobile: String = PhoneNumber().fake();
        let national_id: u64 = (1_000_000_000u64..2_000_000_000u64).fake();
        let account: u64 = (1_000_000_000u64..9_999_999_999u64).fake();
        PaymentPatch {
            contact_name: Some(name),
            contact_id: Some(national_id.to_string()),
            mobile: Some(mobile),
            iban: Some(format!("SA03800000000{}", account)),
            method: Some(PaymentMethod::Online),
        }
    }
}

/// Fixture for identifiers and amounts
pub struct IdFixtures;

impl IdFixtures {
    /// A property id that no list contains
    pub fn unknown_property() -> PropertyId {
        PropertyId::from_uuid(Uuid::parse_str("018f2b3c-0000-7000-8000-000000000001").unwrap())
    }

    pub fn sar(amount: i64) -> Money {
        Money::from_minor(amount * 100, Currency::SAR)
    }
}
