//! Field value resolution for loosely-named custom fields.
//!
//! Field names on the CRUD screens are free text, so the same logical
//! field shows up as "Claim Amount", "claim_amount", or "CLAIM AMOUNT"
//! depending on who typed it. [`resolve`] tolerates those variants;
//! [`KnownField`] pins each logical field to a canonical name with a
//! fixed alias table so the rest of the engine never does fuzzy matching.

use rust_decimal::Decimal;
use serde::Serialize;

use billing_core::utils::numeric::parse_amount;

use crate::models::FieldMap;

/// Look up a field value, tolerating naming variants.
///
/// Order: exact key, case-insensitive key, then three normalized variants
/// (underscores as spaces, spaces as underscores, underscores stripped and
/// lowercased), each matched case-insensitively. Returns `None` when no
/// variant matches. Pure and total.
pub fn resolve<'a>(values: &'a FieldMap, field_name: &str) -> Option<&'a str> {
    if let Some(value) = values.get(field_name) {
        return Some(value.as_str());
    }

    if let Some(value) = lookup_ci(values, field_name) {
        return Some(value);
    }

    let spaced = field_name.replace('_', " ");
    if let Some(value) = lookup_ci(values, &spaced) {
        return Some(value);
    }

    let underscored = field_name.replace(' ', "_");
    if let Some(value) = lookup_ci(values, &underscored) {
        return Some(value);
    }

    let squashed = field_name.replace('_', "").to_lowercase();
    values
        .iter()
        .find(|(key, _)| key.replace('_', "").to_lowercase() == squashed)
        .map(|(_, value)| value.as_str())
}

fn lookup_ci<'a>(values: &'a FieldMap, field_name: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(field_name))
        .map(|(_, value)| value.as_str())
}

/// Canonical names for the known custom fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownField {
    ClaimAmount,
    Quantity,
    CaCertCount,
    CeCertCount,
    ApplicationFees,
    ExemptionAmount,
    ActualExemptionAmount,
    DutyCreditAmount,
    ActualDutyCreditAmount,
    LicenseAmount,
    ActualLicenseAmount,
    RefundAmount,
    ActualRefundAmount,
    SanctionedAmount,
    ActualSanctionedAmount,
    AuthorisationNo,
    AuthorisationDate,
    DutyCreditScripNo,
    DutyCreditScripDate,
    LicenseNo,
    LicenseDate,
    CertificateNo,
    CertificateDate,
    RefundOrderNo,
    RefundOrderDate,
    SanctionOrderNo,
    SanctionOrderDate,
    BrandRateLetterNo,
    BrandRateLetterDate,
}

impl KnownField {
    /// Historical aliases for this field, tried in order through
    /// [`resolve`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            KnownField::ClaimAmount => &[
                "Claim Amount after Finalization",
                "Claim Amount",
                "claim_amount",
            ],
            KnownField::Quantity => &["Quantity", "No of SHB", "No of Shipping Bills"],
            KnownField::CaCertCount => &["No of CAC", "no_of_cac", "No of CA Certificates"],
            KnownField::CeCertCount => &["No of CEC", "no_of_cec", "No of CE Certificates"],
            KnownField::ApplicationFees => &[
                "Application Fees",
                "Application Fee",
                "Application Fees Paid",
                "Govt Application Fees",
            ],
            KnownField::ExemptionAmount => &["Exemption Amount"],
            KnownField::ActualExemptionAmount => &["Actual Exemption Amount"],
            KnownField::DutyCreditAmount => &["Duty Credit Amount", "Duty Credit Scrip Amount"],
            KnownField::ActualDutyCreditAmount => &["Actual Duty Credit Amount"],
            KnownField::LicenseAmount => &["License Amount", "Licence Amount"],
            KnownField::ActualLicenseAmount => &["Actual License Amount", "Actual Licence Amount"],
            KnownField::RefundAmount => &["Refund Amount"],
            KnownField::ActualRefundAmount => &["Actual Refund Amount"],
            KnownField::SanctionedAmount => &["Sanctioned Amount", "Sanction Amount"],
            KnownField::ActualSanctionedAmount => &["Actual Sanctioned Amount"],
            KnownField::AuthorisationNo => &["Authorisation No", "Authorization No"],
            KnownField::AuthorisationDate => &["Authorisation Date", "Authorization Date"],
            KnownField::DutyCreditScripNo => &["Duty Credit Scrip No", "Duty Credit Scrip Number"],
            KnownField::DutyCreditScripDate => &["Duty Credit Scrip Date"],
            KnownField::LicenseNo => &["License No", "Licence No"],
            KnownField::LicenseDate => &["License Date", "Licence Date"],
            KnownField::CertificateNo => &["Certificate No", "Certificate Number"],
            KnownField::CertificateDate => &["Certificate Date"],
            KnownField::RefundOrderNo => &["Refund Order No", "Refund Order Number"],
            KnownField::RefundOrderDate => &["Refund Order Date"],
            KnownField::SanctionOrderNo => &["Sanction Order No", "Sanction Order Number"],
            KnownField::SanctionOrderDate => &["Sanction Order Date"],
            KnownField::BrandRateLetterNo => &["Brand Rate Letter No", "Brand Rate Letter Number"],
            KnownField::BrandRateLetterDate => &["Brand Rate Letter Date"],
        }
    }

    /// Display label, used for annexure column headers.
    pub fn label(&self) -> &'static str {
        self.aliases()[0]
    }
}

/// Resolve a known field for a job, trying each alias in order.
pub fn resolve_known<'a>(values: &'a FieldMap, field: KnownField) -> Option<&'a str> {
    field
        .aliases()
        .iter()
        .find_map(|alias| resolve(values, alias))
}

/// Dynamic amount columns the annexure may discover.
pub const DYNAMIC_AMOUNT_FIELDS: &[KnownField] = &[
    KnownField::ExemptionAmount,
    KnownField::ActualExemptionAmount,
    KnownField::DutyCreditAmount,
    KnownField::ActualDutyCreditAmount,
    KnownField::LicenseAmount,
    KnownField::ActualLicenseAmount,
    KnownField::RefundAmount,
    KnownField::ActualRefundAmount,
    KnownField::SanctionedAmount,
    KnownField::ActualSanctionedAmount,
];

/// Combined reference number and date column pairs.
pub const NO_DATE_FIELDS: &[(KnownField, KnownField)] = &[
    (KnownField::AuthorisationNo, KnownField::AuthorisationDate),
    (KnownField::DutyCreditScripNo, KnownField::DutyCreditScripDate),
    (KnownField::LicenseNo, KnownField::LicenseDate),
    (KnownField::CertificateNo, KnownField::CertificateDate),
    (KnownField::RefundOrderNo, KnownField::RefundOrderDate),
    (KnownField::SanctionOrderNo, KnownField::SanctionOrderDate),
    (KnownField::BrandRateLetterNo, KnownField::BrandRateLetterDate),
];

/// Strongly-typed field values resolved once per job.
///
/// Missing or unparseable values coerce to zero; `quantity` and
/// `application_fees` stay `None` when absent so callers can apply their
/// fallbacks (the job's baseline quantity, the static fee).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedJobFields {
    pub claim_amount: Decimal,
    pub quantity: Option<Decimal>,
    pub ca_cert_count: Decimal,
    pub ce_cert_count: Decimal,
    pub application_fees: Option<Decimal>,
}

impl ResolvedJobFields {
    pub fn resolve(values: &FieldMap) -> Self {
        Self {
            claim_amount: resolve_known(values, KnownField::ClaimAmount)
                .map(parse_amount)
                .unwrap_or_default(),
            quantity: resolve_known(values, KnownField::Quantity).map(parse_amount),
            ca_cert_count: resolve_known(values, KnownField::CaCertCount)
                .map(parse_amount)
                .unwrap_or_default(),
            ce_cert_count: resolve_known(values, KnownField::CeCertCount)
                .map(parse_amount)
                .unwrap_or_default(),
            application_fees: resolve_known(values, KnownField::ApplicationFees).map(parse_amount),
        }
    }
}
