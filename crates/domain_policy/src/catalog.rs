//! Policy source port and the static demo catalog
//!
//! The dashboard and the policy-selection step both read from a
//! `PolicySource`. The console ships with a static catalog; a real system
//! would back the same trait with the policy administration system.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::sync::Arc;

use core_kernel::ports::DomainPort;

use crate::error::PolicyError;
use crate::policy::{Policy, PolicyKey, PolicyStatus};

/// Read-only, ordered source of policy records
pub trait PolicySource: DomainPort {
    /// All policies in dashboard order
    fn policies(&self) -> Vec<Policy>;

    /// Looks up a policy by key
    fn find(&self, key: &PolicyKey) -> Option<Policy> {
        self.policies().into_iter().find(|p| &p.id == key)
    }

    /// Policies offered by the policy-selection step (status = Active)
    fn active_policies(&self) -> Vec<Policy> {
        self.policies().into_iter().filter(Policy::is_active).collect()
    }

    /// Resolves a key to a policy that may be selected as a request target
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown key, `NotSelectable` for a policy that is
    /// not active.
    fn selectable(&self, key: &PolicyKey) -> Result<Policy, PolicyError> {
        let policy = self.find(key).ok_or_else(|| PolicyError::not_found(key))?;
        if !policy.is_active() {
            return Err(PolicyError::NotSelectable {
                key: policy.id,
                status: policy.status,
            });
        }
        Ok(policy)
    }
}

/// In-memory policy source
#[derive(Debug, Clone)]
pub struct StaticPolicyCatalog {
    policies: Arc<Vec<Policy>>,
}

impl StaticPolicyCatalog {
    /// Creates a catalog over the given policies, preserving their order
    pub fn new(policies: Vec<Policy>) -> Self {
        Self {
            policies: Arc::new(policies),
        }
    }

    /// The demo portfolio the console ships with
    pub fn demo() -> Self {
        Self::new(DEMO_POLICIES.clone())
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl DomainPort for StaticPolicyCatalog {}

impl PolicySource for StaticPolicyCatalog {
    fn policies(&self) -> Vec<Policy> {
        self.policies.as_ref().clone()
    }

    fn find(&self, key: &PolicyKey) -> Option<Policy> {
        self.policies.iter().find(|p| &p.id == key).cloned()
    }
}

static DEMO_POLICIES: Lazy<Vec<Policy>> = Lazy::new(|| {
    [
        ("1", "POL-88291-XA", "CR-99210-9", "Al Rajhi Trading Co.", PolicyStatus::Active, 24),
        ("2", "POL-11203-BC", "CR-44567-2", "Saudi Gulf Logistics Ltd.", PolicyStatus::Renewal, 22),
        ("3", "POL-77612-PP", "CR-10293-4", "Najd Industrial Services Co.", PolicyStatus::Pending, 21),
        ("4", "POL-99342-LQ", "CR-00129-8", "Red Sea Hospitality Group", PolicyStatus::Expired, 19),
        ("5", "POL-44102-ZX", "CR-77621-0", "Eastern Petrochem Supplies", PolicyStatus::Active, 18),
        ("6", "POL-22341-MK", "CR-88123-1", "Riyadh Construction Partners", PolicyStatus::Active, 25),
        ("7", "POL-55672-RE", "CR-33421-5", "Al Noor Manufacturing Co.", PolicyStatus::Active, 24),
        ("8", "POL-33019-UI", "CR-11982-3", "Jeddah Retail Holdings", PolicyStatus::Active, 23),
        ("9", "POL-10293-MN", "CR-55610-7", "Dammam Cold Storage Co.", PolicyStatus::Active, 23),
        ("10", "POL-88172-GH", "CR-99201-4", "Gulf Medical Supplies Co.", PolicyStatus::Active, 22),
        ("11", "POL-44510-PL", "CR-11223-9", "Najran Food Industries", PolicyStatus::Active, 21),
        ("12", "POL-99001-AS", "CR-77881-2", "Qassim Agriculture Co.", PolicyStatus::Active, 20),
        ("13", "POL-11223-SD", "CR-44551-0", "Tabuk Energy Solutions", PolicyStatus::Active, 19),
        ("14", "POL-77341-WQ", "CR-00192-8", "Makkah Facilities Management", PolicyStatus::Active, 18),
        ("15", "POL-55612-VB", "CR-33210-6", "Khobar IT Services LLC", PolicyStatus::Active, 17),
    ]
    .into_iter()
    .filter_map(|(id, reference_no, cr_number, name, status, day)| {
        Some(Policy {
            id: PolicyKey::from(id),
            reference_no: reference_no.to_string(),
            cr_number: cr_number.to_string(),
            name: name.to_string(),
            status,
            updated_on: NaiveDate::from_ymd_opt(2023, 10, day)?,
        })
    })
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_has_fifteen_policies_in_order() {
        let catalog = StaticPolicyCatalog::demo();
        assert_eq!(catalog.len(), 15);
        let keys: Vec<String> = catalog.policies().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(keys.first().map(String::as_str), Some("1"));
        assert_eq!(keys.last().map(String::as_str), Some("15"));
    }

    #[test]
    fn test_active_filter() {
        let catalog = StaticPolicyCatalog::demo();
        let active = catalog.active_policies();
        assert_eq!(active.len(), 12);
        assert!(active.iter().all(Policy::is_active));
    }

    #[test]
    fn test_selectable_rejects_inactive_and_unknown() {
        let catalog = StaticPolicyCatalog::demo();

        assert!(catalog.selectable(&PolicyKey::from("1")).is_ok());
        assert_eq!(
            catalog.selectable(&PolicyKey::from("4")),
            Err(PolicyError::NotSelectable {
                key: PolicyKey::from("4"),
                status: PolicyStatus::Expired,
            })
        );
        assert_eq!(
            catalog.selectable(&PolicyKey::from("99")),
            Err(PolicyError::NotFound(PolicyKey::from("99")))
        );
    }
}
