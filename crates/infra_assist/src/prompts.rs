//! Prompts sent to the text backend

use std::fmt;

/// What the backend is asked to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTask {
    EndorsementRemark {
        reason: String,
        policy_reference: String,
    },
    QuotationSummary {
        policy_reference: String,
        property_count: usize,
    },
}

impl TextTask {
    /// Short name used in logs and timeout errors
    pub fn operation(&self) -> &'static str {
        match self {
            TextTask::EndorsementRemark { .. } => "endorsement remark",
            TextTask::QuotationSummary { .. } => "quotation summary",
        }
    }

    pub fn prompt(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TextTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextTask::EndorsementRemark {
                reason,
                policy_reference,
            } => write!(
                f,
                "You are an insurance underwriter assistant. Generate a professional description \
                 (approx 2-3 sentences) for an insurance endorsement with the reason \"{}\" for \
                 policy {}. Be concise and technical.",
                reason, policy_reference
            ),
            TextTask::QuotationSummary {
                policy_reference,
                property_count,
            } => write!(
                f,
                "Generate a professional insurance quotation summary for policy {} covering {} \
                 propert{}. List the amounts in SAR for: Current Premium, Endorsement Additional \
                 Premium, Admin Fees, VAT (15%), Total Adjusted Premium. Close with a 1-sentence \
                 risk assessment summary.",
                policy_reference,
                property_count,
                if *property_count == 1 { "y" } else { "ies" }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remark_prompt_names_reason_and_policy() {
        let prompt = TextTask::EndorsementRemark {
            reason: "Address Change".to_string(),
            policy_reference: "POL-88291-XA".to_string(),
        }
        .prompt();
        assert!(prompt.contains("\"Address Change\""));
        assert!(prompt.contains("policy POL-88291-XA."));
    }

    #[test]
    fn test_summary_prompt_pluralizes() {
        let task = TextTask::QuotationSummary {
            policy_reference: "New Quotation".to_string(),
            property_count: 2,
        };
        assert!(task.prompt().contains("covering 2 properties"));
        assert_eq!(task.operation(), "quotation summary");
    }
}
