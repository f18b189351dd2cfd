//! The fixed Co-op report layout: an ordered association list from report
//! column to the rule that fills it. Column order is a public contract with
//! the downstream report, so the list is positional, not a map.

/// How a report column gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    /// No export equivalent; the column is always empty.
    Blank,
    /// Whitespace-trimmed copy of one named export field.
    Source(&'static str),
    /// Computed from the parsed visit date rather than copied.
    Synthesized(DatePart),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Month,
    Year,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportColumn {
    pub name: &'static str,
    pub mapping: Mapping,
}

// Export columns the pipeline addresses by name.
pub const INTERNAL_ID: &str = "internal_id";
pub const SITE_CODE: &str = "site_code";
pub const DATE_OF_VISIT: &str = "date_of_visit";
pub const TIME_OF_VISIT: &str = "time_of_visit";
pub const CLIENT_NAME: &str = "client_name";
pub const PRIMARY_RESULT: &str = "primary_result";
/// Derived field materialized by the transform; overwrites any export column
/// of the same name.
pub const RETAILER: &str = "Retailer";

/// Site codes of audits belonging to the Co-op trading-compliance programme.
pub const COOP_SITE_PREFIX: &str = "CoopTCG";
/// The client appears as "Juul" in the export but the report names the
/// retailer under audit.
pub const JUUL_CLIENT: &str = "Juul";
pub const COOP_RETAILER: &str = "Co-operative Group Limited";

const fn keep(name: &'static str) -> ReportColumn {
    ReportColumn {
        name,
        mapping: Mapping::Source(name),
    }
}

const fn renamed(name: &'static str, source: &'static str) -> ReportColumn {
    ReportColumn {
        name,
        mapping: Mapping::Source(source),
    }
}

const fn blank(name: &'static str) -> ReportColumn {
    ReportColumn {
        name,
        mapping: Mapping::Blank,
    }
}

/// The report layout, in emission order. Survey-question headers are carried
/// verbatim from the export, quirks included (doubled apostrophes, a stray
/// double quote, "If yes ," spacing); the client's template expects them
/// byte-for-byte.
pub const REPORT_COLUMNS: &[ReportColumn] = &[
    renamed("ID", INTERNAL_ID),
    renamed("Retailer", RETAILER),
    blank("Hub"),
    blank("Location Name"),
    renamed("Premises Name", "site_name"),
    renamed("Address", "site_address_1"),
    renamed("Post Code", "site_post_code"),
    renamed("Date of visit", DATE_OF_VISIT),
    renamed("Time of visit", TIME_OF_VISIT),
    renamed("Site Code", SITE_CODE),
    renamed("Pass/Fail", PRIMARY_RESULT),
    keep("Were you able to successfully conduct this audit?"),
    renamed("Abort Reason", "What was the reason for aborting this audit?"),
    blank("Abort Category"),
    blank("Fail Counter"),
    blank("Pass After Fail"),
    blank("Pass Counter"),
    blank("Fail After Pass"),
    keep("Please detail why you were unable to conduct this audit:"),
    blank("How long have you been a mystery shopper? (for this company, or another company)"),
    keep("Please enter your age:"),
    keep("Please enter your gender:"),
    keep("Did you have a beard at the time of the audit?"),
    keep("Were you wearing any facial cosmetic products at the time of the audit?"),
    keep("Did the store sell Juul products?"),
    keep("Where were the Juul products located in the store?"),
    keep(
        r#"Did you see any non-Juul branded items that were labelled ''JUUL compatible pods" in the store during your audit?"#,
    ),
    keep("If so, please give details:"),
    keep("Did you see 'Challenge 25' signage in the store?"),
    keep("Was the signage JUUL branded?"),
    keep(
        "Please detail the store employee's name (if wearing a name badge). If there was no name badge please record an accurate description of the employee:",
    ),
    keep("What was the gender of the employee who served you?"),
    keep("In which age group was the employee?"),
    keep("Were Juul pods available to purchase?"),
    keep("Please detail the product you attempted to purchase:"),
    keep("Did the person who served you ask for ID?"),
    keep("Please confirm that you did not present any ID:"),
    keep("Did the store colleague allow you to purchase the restricted item without providing ID?"),
    keep("At what point were you asked for ID?"),
    blank("Were you wearing a protective face covering?"),
    blank(
        "Did the employee request your ID when you asked to purchase Juul pods with your face covering on or off?",
    ),
    keep("Did the employee who served you make eye contact with you?"),
    keep("When was eye contact first made?"),
    keep("Were you given a receipt?"),
    keep("From the receipt, please enter any visible codes and employee name if any:"),
    keep(
        "Did you see any JUUL branded adverts/posters visible from the outside of the store? If yes , please make sure you upload photo",
    ),
    keep("Was there anything about the interaction that you think JUUL should take note of?"),
    keep("If so, please detail the interaction:"),
    ReportColumn {
        name: "Month",
        mapping: Mapping::Synthesized(DatePart::Month),
    },
    ReportColumn {
        name: "Year",
        mapping: Mapping::Synthesized(DatePart::Year),
    },
];
