// Sales transaction domain model
use chrono::NaiveDate;

/// Text layout of the purchase date as delivered by the sales source.
pub const PURCHASE_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            latitude,
            longitude,
        }
    }
}

/// One sale. Immutable once fetched; every aggregate is derived from these rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub category: String,
    pub price: f64,
    pub purchase_date: NaiveDate,
    pub location: Location,
    pub salesperson: String,
}

impl Transaction {
    pub fn new(
        category: String,
        price: f64,
        purchase_date: NaiveDate,
        location: Location,
        salesperson: String,
    ) -> Self {
        Self {
            category,
            price,
            purchase_date,
            location,
            salesperson,
        }
    }

    pub fn state(&self) -> &str {
        &self.location.name
    }
}

/// Parse a `day/month/year` purchase date such as `"15/01/2023"`.
pub fn parse_purchase_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), PURCHASE_DATE_FORMAT)
}
