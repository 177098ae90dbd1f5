//! Open Payments column layouts
//!
//! The detailed-payment files changed their identifier column names in program
//! year 2016, when "Physician" recipients of general payments became
//! "Covered_Recipient" and NPI columns were added to every category.

use std::ops::RangeInclusive;

use super::Category;
use super::registry::SchemaRegistry;

/// Program years published with the 2013 launch layout
pub const LEGACY_YEARS: RangeInclusive<u16> = 2013..=2015;

/// Program years published with the covered-recipient layout
pub const CURRENT_YEARS: RangeInclusive<u16> = 2016..=2022;

const PAYER_NAME: &str = "Applicable_Manufacturer_or_Applicable_GPO_Making_Payment_Name";

/// General payments, program years 2013-2015
pub const LEGACY_GENERAL_COLUMNS: &[&str] = &[
    "Physician_Profile_ID",
    "Physician_First_Name",
    "Physician_Middle_Name",
    "Physician_Last_Name",
    PAYER_NAME,
    "Total_Amount_of_Payment_USDollars",
    "Form_of_Payment_or_Transfer_of_Value",
    "Nature_of_Payment_or_Transfer_of_Value",
    "Product_Indicator",
    "Name_of_Associated_Covered_Drug_or_Biological1",
    "Name_of_Associated_Covered_Device_or_Medical_Supply1",
    "Program_Year",
];

/// Research payments, program years 2013-2015
pub const LEGACY_RESEARCH_COLUMNS: &[&str] = &[
    "Principal_Investigator_1_Profile_ID",
    "Principal_Investigator_1_First_Name",
    "Principal_Investigator_1_Middle_Name",
    "Principal_Investigator_1_Last_Name",
    PAYER_NAME,
    "Product_Indicator",
    "Name_of_Associated_Covered_Drug_or_Biological1",
    "Name_of_Associated_Covered_Device_or_Medical_Supply1",
    "Total_Amount_of_Payment_USDollars",
    "Form_of_Payment_or_Transfer_of_Value",
    "Name_of_Study",
    "Program_Year",
];

/// Ownership interests, program years 2013-2015
pub const LEGACY_OWNERSHIP_COLUMNS: &[&str] = &[
    "Physician_Profile_ID",
    "Physician_First_Name",
    "Physician_Middle_Name",
    "Physician_Last_Name",
    "Program_Year",
    "Total_Amount_Invested_USDollars",
    "Value_of_Interest",
    "Terms_of_Interest",
    PAYER_NAME,
];

/// General payments, program years 2016-2022
pub const CURRENT_GENERAL_COLUMNS: &[&str] = &[
    "Covered_Recipient_Profile_ID",
    "Covered_Recipient_NPI",
    "Covered_Recipient_First_Name",
    "Covered_Recipient_Middle_Name",
    "Covered_Recipient_Last_Name",
    PAYER_NAME,
    "Total_Amount_of_Payment_USDollars",
    "Form_of_Payment_or_Transfer_of_Value",
    "Nature_of_Payment_or_Transfer_of_Value",
    "Indicate_Drug_or_Biological_or_Device_or_Medical_Supply_1",
    "Product_Category_or_Therapeutic_Area_1",
    "Name_of_Drug_or_Biological_or_Device_or_Medical_Supply_1",
    "Program_Year",
];

/// Research payments, program years 2016-2022
pub const CURRENT_RESEARCH_COLUMNS: &[&str] = &[
    "Principal_Investigator_1_Profile_ID",
    "Principal_Investigator_1_NPI",
    "Principal_Investigator_1_First_Name",
    "Principal_Investigator_1_Middle_Name",
    "Principal_Investigator_1_Last_Name",
    PAYER_NAME,
    "Indicate_Drug_or_Biological_or_Device_or_Medical_Supply_1",
    "Product_Category_or_Therapeutic_Area_1",
    "Name_of_Drug_or_Biological_or_Device_or_Medical_Supply_1",
    "Total_Amount_of_Payment_USDollars",
    "Form_of_Payment_or_Transfer_of_Value",
    "Name_of_Study",
    "Program_Year",
];

/// Ownership interests, program years 2016-2022
pub const CURRENT_OWNERSHIP_COLUMNS: &[&str] = &[
    "Physician_Profile_ID",
    "Physician_NPI",
    "Physician_First_Name",
    "Physician_Middle_Name",
    "Physician_Last_Name",
    "Program_Year",
    "Total_Amount_Invested_USDollars",
    "Value_of_Interest",
    "Terms_of_Interest",
    PAYER_NAME,
];

const PHYSICIAN_LEGACY_RENAMES: &[(&str, &str)] = &[
    ("Physician_Profile_ID", "Profile_ID"),
    ("Physician_First_Name", "First_Name"),
    ("Physician_Middle_Name", "Middle_Name"),
    ("Physician_Last_Name", "Last_Name"),
];

const INVESTIGATOR_LEGACY_RENAMES: &[(&str, &str)] = &[
    ("Principal_Investigator_1_Profile_ID", "Profile_ID"),
    ("Principal_Investigator_1_First_Name", "First_Name"),
    ("Principal_Investigator_1_Middle_Name", "Middle_Name"),
    ("Principal_Investigator_1_Last_Name", "Last_Name"),
];

const RECIPIENT_CURRENT_RENAMES: &[(&str, &str)] = &[
    ("Covered_Recipient_Profile_ID", "Profile_ID"),
    ("Covered_Recipient_NPI", "NPI"),
    ("Covered_Recipient_First_Name", "First_Name"),
    ("Covered_Recipient_Middle_Name", "Middle_Name"),
    ("Covered_Recipient_Last_Name", "Last_Name"),
];

const INVESTIGATOR_CURRENT_RENAMES: &[(&str, &str)] = &[
    ("Principal_Investigator_1_Profile_ID", "Profile_ID"),
    ("Principal_Investigator_1_NPI", "NPI"),
    ("Principal_Investigator_1_First_Name", "First_Name"),
    ("Principal_Investigator_1_Middle_Name", "Middle_Name"),
    ("Principal_Investigator_1_Last_Name", "Last_Name"),
];

const PHYSICIAN_CURRENT_RENAMES: &[(&str, &str)] = &[
    ("Physician_Profile_ID", "Profile_ID"),
    ("Physician_NPI", "NPI"),
    ("Physician_First_Name", "First_Name"),
    ("Physician_Middle_Name", "Middle_Name"),
    ("Physician_Last_Name", "Last_Name"),
];

/// Build the registry of every published Open Payments layout
#[must_use]
pub fn build_registry() -> SchemaRegistry {
    SchemaRegistry::builder()
        .with_columns(LEGACY_YEARS, Category::General, LEGACY_GENERAL_COLUMNS)
        .with_columns(LEGACY_YEARS, Category::Research, LEGACY_RESEARCH_COLUMNS)
        .with_columns(LEGACY_YEARS, Category::Ownership, LEGACY_OWNERSHIP_COLUMNS)
        .with_columns(CURRENT_YEARS, Category::General, CURRENT_GENERAL_COLUMNS)
        .with_columns(CURRENT_YEARS, Category::Research, CURRENT_RESEARCH_COLUMNS)
        .with_columns(CURRENT_YEARS, Category::Ownership, CURRENT_OWNERSHIP_COLUMNS)
        .with_renames(LEGACY_YEARS, Category::General, PHYSICIAN_LEGACY_RENAMES)
        .with_renames(LEGACY_YEARS, Category::Research, INVESTIGATOR_LEGACY_RENAMES)
        .with_renames(LEGACY_YEARS, Category::Ownership, PHYSICIAN_LEGACY_RENAMES)
        .with_renames(CURRENT_YEARS, Category::General, RECIPIENT_CURRENT_RENAMES)
        .with_renames(CURRENT_YEARS, Category::Research, INVESTIGATOR_CURRENT_RENAMES)
        .with_renames(CURRENT_YEARS, Category::Ownership, PHYSICIAN_CURRENT_RENAMES)
        .build()
}
