//! Membership upgrade advisory.
//!
//! This check compares the raw membership string against the premium tier
//! names. It does not consult the membership discount table, so a tier that
//! earns a discount under a different spelling still triggers the advisory.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning};

/// Subtotal above which non-premium customers are advised to upgrade.
pub const UPGRADE_ADVISORY_THRESHOLD: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Membership strings that suppress the upgrade advisory.
pub const PREMIUM_TIERS: [&str; 2] = ["gold", "platinum"];

/// The result of the upgrade advisory check.
#[derive(Debug, Clone)]
pub struct UpgradeAdvisoryResult {
    /// The advisory, when it applies.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Advises a membership upgrade for large orders from non-premium customers.
///
/// # Examples
///
/// ```
/// use invoice_engine::calculation::check_membership_upgrade;
/// use rust_decimal::Decimal;
///
/// let none = check_membership_upgrade("none", Decimal::new(15000, 0), 1);
/// assert_eq!(none.warning.unwrap().message, "Consider membership upgrade");
///
/// let gold = check_membership_upgrade("gold", Decimal::new(15000, 0), 1);
/// assert!(gold.warning.is_none());
/// ```
pub fn check_membership_upgrade(
    membership: &str,
    subtotal: Decimal,
    step_number: u32,
) -> UpgradeAdvisoryResult {
    let premium = PREMIUM_TIERS.contains(&membership);
    let large_order = subtotal > UPGRADE_ADVISORY_THRESHOLD;

    let warning = (large_order && !premium).then(AuditWarning::membership_upgrade);

    let reasoning = match (large_order, premium) {
        (true, false) => format!(
            "Subtotal ${} > ${} and membership '{}' is not premium: advise upgrade",
            subtotal, UPGRADE_ADVISORY_THRESHOLD, membership
        ),
        (true, true) => format!("Membership '{}' is already premium", membership),
        (false, _) => format!(
            "Subtotal ${} <= ${}: no advisory",
            subtotal, UPGRADE_ADVISORY_THRESHOLD
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "membership_upgrade_advisory".to_string(),
        rule_name: "Membership Upgrade Advisory".to_string(),
        input: serde_json::json!({
            "membership": membership,
            "subtotal": subtotal.to_string()
        }),
        output: serde_json::json!({
            "advise_upgrade": warning.is_some()
        }),
        reasoning,
    };

    UpgradeAdvisoryResult {
        warning,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn advised(membership: &str, subtotal: &str) -> bool {
        check_membership_upgrade(membership, dec(subtotal), 1)
            .warning
            .is_some()
    }

    #[test]
    fn test_large_non_member_order_is_advised() {
        assert!(advised("none", "15000"));
        assert!(advised("", "10000.01"));
    }

    #[test]
    fn test_premium_members_are_not_advised() {
        assert!(!advised("gold", "15000"));
        assert!(!advised("platinum", "15000"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!advised("none", "10000"));
    }

    #[test]
    fn test_other_spellings_are_still_advised() {
        assert!(advised("Gold", "15000"));
        assert!(advised("PLATINUM", "15000"));
        assert!(advised("silver", "15000"));
    }

    #[test]
    fn test_audit_step_output() {
        let result = check_membership_upgrade("none", dec("20000"), 8);
        assert_eq!(result.audit_step.step_number, 8);
        assert_eq!(result.audit_step.output["advise_upgrade"], true);
    }
}
