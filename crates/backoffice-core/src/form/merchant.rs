//! Merchant onboarding: Personal Details → Financial Profile → Review & Submit.

use super::schema::{FieldDefinition, FormSchema, Step};
use crate::primitives::PHONE_PATTERN;
use crate::Result;

/// Build the three-step merchant onboarding schema.
pub fn merchant_onboarding() -> Result<FormSchema> {
    let personal = Step::new(
        "Personal Details",
        vec![
            FieldDefinition::text("fullName", "Full Name").required("Full name is required"),
            FieldDefinition::text("dateOfBirth", "Date of Birth")
                .required("Date of birth is required"),
            FieldDefinition::text("email", "Email").required("Email is required"),
            FieldDefinition::text("phone", "Phone")
                .required("Phone number is required")
                .pattern(PHONE_PATTERN, "Phone number is invalid")?,
            FieldDefinition::text("address", "Address").required("Address is required"),
            FieldDefinition::text("city", "City").required("City is required"),
            FieldDefinition::text("postalCode", "Postal Code").required("Postal code is required"),
            FieldDefinition::text("nationality", "Nationality")
                .required("Nationality is required"),
            FieldDefinition::text("idType", "ID Type").required("ID type is required"),
            FieldDefinition::text("idNumber", "ID Number").required("ID number is required"),
        ],
    );

    let financial = Step::new(
        "Financial Profile",
        vec![
            FieldDefinition::text("income", "Income Range").required("Income range is required"),
            FieldDefinition::text("sourceOfFunds", "Source of Funds")
                .required("Source of funds is required"),
            FieldDefinition::text("employmentStatus", "Employment Status")
                .required("Employment status is required"),
            FieldDefinition::text("employerName", "Employer"),
            FieldDefinition::text("investmentExperience", "Investment Experience")
                .required("Investment experience is required"),
            FieldDefinition::text("riskTolerance", "Risk Tolerance")
                .required("Risk tolerance is required"),
            FieldDefinition::flag("isPoliticallyExposed", "Politically Exposed Person"),
            FieldDefinition::flag("acceptedTerms", "Terms Accepted")
                .required("You must accept the terms and conditions"),
        ],
    );

    FormSchema::new(vec![personal, financial, Step::new("Review & Submit", Vec::new())])
}
