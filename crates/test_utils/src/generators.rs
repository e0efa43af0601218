//! Property-Based Test Generators
//!
//! Proptest strategies for wizard inputs that respect the domain ranges.

use chrono::{Datelike, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_policy::{EndorsementAction, RequestType};
use domain_wizard::{
    City, ClaimsHistory, ConstructionMaterial, IndustrySegment, InterestType, PropertyPatch,
    RiskCategory,
};

pub fn request_type_strategy() -> impl Strategy<Value = RequestType> {
    prop_oneof![
        Just(RequestType::Quotation),
        Just(RequestType::Renewal),
        Just(RequestType::Endorsement),
    ]
}

pub fn endorsement_action_strategy() -> impl Strategy<Value = EndorsementAction> {
    prop_oneof![
        Just(EndorsementAction::Add),
        Just(EndorsementAction::Update),
        Just(EndorsementAction::Cancel),
    ]
}

pub fn city_strategy() -> impl Strategy<Value = City> {
    proptest::sample::select(City::ALL.to_vec())
}

fn optional<T: Clone + std::fmt::Debug + 'static>(
    values: &'static [T],
) -> impl Strategy<Value = Option<T>> {
    proptest::option::of(proptest::sample::select(values.to_vec()))
}

/// Strategy for a year of construction inside the offered window
pub fn construction_year_strategy() -> impl Strategy<Value = i32> {
    let current = Utc::now().year();
    (current - 74)..=current
}

/// Strategy for patches that pass validation
pub fn valid_property_patch_strategy() -> impl Strategy<Value = PropertyPatch> {
    (
        proptest::option::of("[A-Za-z ]{0,24}"),
        optional(IndustrySegment::ALL),
        proptest::option::of(0u8..=100u8),
        optional(InterestType::ALL),
        optional(RiskCategory::ALL),
        proptest::option::of(construction_year_strategy()),
        optional(ConstructionMaterial::ALL),
        proptest::option::of(city_strategy()),
        proptest::option::of(any::<bool>()),
        proptest::option::of((0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))),
    )
        .prop_map(
            |(
                description,
                industry_segment,
                usage_percent,
                interest_type,
                risk_category,
                year_of_construction,
                construction_material,
                city,
                has_claims,
                claim_amount,
            )| PropertyPatch {
                interest_description: description,
                industry_segment,
                usage_percent,
                interest_type,
                risk_category,
                year_of_construction,
                construction_material,
                city,
                claims_history: has_claims.map(|yes| if yes { ClaimsHistory::Yes } else { ClaimsHistory::No }),
                claim_amount,
                ..Default::default()
            },
        )
}

/// Operations applied to a property list in state-machine style tests
#[derive(Debug, Clone)]
pub enum ListOp {
    Add,
    /// Removes the entry at this index (modulo the current length)
    Remove(usize),
    /// Selects the entry at this index (modulo the current length)
    Select(usize),
    Previous,
    Next,
}

pub fn list_op_strategy() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        3 => Just(ListOp::Add),
        2 => (0usize..16).prop_map(ListOp::Remove),
        1 => (0usize..16).prop_map(ListOp::Select),
        1 => Just(ListOp::Previous),
        1 => Just(ListOp::Next),
    ]
}

pub fn list_ops_strategy(max: usize) -> impl Strategy<Value = Vec<ListOp>> {
    proptest::collection::vec(list_op_strategy(), 0..max)
}
