//! Defines the core data models and database queries for receipts.

use std::{collections::HashMap, fmt::Display};

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    Error,
    amount::{parse_amount, parse_non_negative_amount},
    database_id::ReceiptId,
};

// ============================================================================
// MODELS
// ============================================================================

/// The fixed set of spending categories a receipt can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Household spending, e.g. groceries for the house, utilities and furniture.
    Home,
    /// Personal spending, e.g. clothes and entertainment.
    Personal,
    /// Eating out and takeaways.
    Food,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Home, Category::Personal, Category::Food];

    /// The label used for the category in receipts and API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Home => "Home",
            Category::Personal => "Personal",
            Category::Food => "Food",
        }
    }

    /// Match a category label, ignoring surrounding whitespace and case.
    ///
    /// Returns `None` for labels that are not one of the known categories.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();

        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(label))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// What was bought.
    pub item_name: String,
    /// The unit price as text, e.g. "$4.50".
    pub item_value: String,
    /// How many units were bought.
    pub item_quantity: u32,
}

impl LineItem {
    /// The unit price multiplied by the quantity.
    ///
    /// A unit price that cannot be parsed counts as zero.
    ///
    /// # Errors
    /// Returns [Error::LineItemTotalOverflow] if the product is too large for a [Decimal].
    pub fn subtotal(&self) -> Result<Decimal, Error> {
        let unit_price = parse_amount(&self.item_value).unwrap_or_else(|error| {
            tracing::debug!("Treating line item \"{}\" as $0: {error}", self.item_name);
            Decimal::ZERO
        });

        unit_price
            .checked_mul(Decimal::from(self.item_quantity))
            .ok_or(Error::LineItemTotalOverflow)
    }
}

/// A receipt for a purchase, as stored in the database.
///
/// The date, total and category are kept exactly as they were given. Use
/// [parse_receipt_date], [Receipt::category] and the aggregation functions to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// The ID of the receipt.
    pub id: ReceiptId,
    /// The name of the store the purchase was made at.
    pub store_name: String,
    /// When the purchase happened, formatted as DD/MM/YYYY.
    pub date: String,
    /// The category label, normally one of [Category::ALL].
    pub category: Option<String>,
    /// A free-text note about the purchase.
    pub description: Option<String>,
    /// The items on the receipt, in the order they appear.
    pub line_items: Vec<LineItem>,
    /// The amount paid as text, e.g. "53.95".
    pub total: Option<String>,
    /// Where the photo of the receipt is stored.
    pub image_url: Option<String>,
}

impl Receipt {
    /// The receipt's category, or `None` if it is missing or not a known category.
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_label)
    }
}

/// The data needed to save a new receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReceipt {
    /// The name of the store the purchase was made at.
    pub store_name: String,
    /// When the purchase happened, formatted as DD/MM/YYYY.
    pub date: String,
    /// The category label.
    #[serde(default)]
    pub category: Option<String>,
    /// A free-text note about the purchase.
    #[serde(default)]
    pub description: Option<String>,
    /// The items on the receipt.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// The amount paid. Calculated from the line items when omitted.
    #[serde(default)]
    pub total: Option<String>,
    /// The GST percentage added on top of the line items, e.g. 15 for 15%.
    #[serde(default)]
    pub gst_percentage: Option<Decimal>,
    /// Where the photo of the receipt is stored.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewReceipt {
    /// Create a receipt with no line items, category or image.
    pub fn new(store_name: &str, date: &str, total: &str) -> Self {
        Self {
            store_name: store_name.to_owned(),
            date: date.to_owned(),
            category: None,
            description: None,
            line_items: Vec::new(),
            total: Some(total.to_owned()),
            gst_percentage: None,
            image_url: None,
        }
    }

    /// Set the category label.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// The total to store: the given total, or the line item total plus GST.
    fn resolved_total(&self) -> Result<String, Error> {
        match &self.total {
            Some(total) => Ok(total.trim().to_owned()),
            None => {
                let total = line_items_total(
                    &self.line_items,
                    self.gst_percentage.unwrap_or(Decimal::ZERO),
                )?;
                Ok(format!("{total:.2}"))
            }
        }
    }

    /// Check the receipt can be saved without touching the database.
    ///
    /// # Errors
    /// Returns the same validation errors as [create_receipt].
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.store_name.trim().is_empty() {
            return Err(Error::EmptyStoreName);
        }

        parse_receipt_date(&self.date)?;

        if let Some(item) = self.line_items.iter().find(|item| item.item_quantity == 0) {
            return Err(Error::InvalidQuantity(item.item_name.clone()));
        }

        match &self.total {
            Some(total) => {
                parse_non_negative_amount(total)?;
            }
            None => {
                self.resolved_total()?;
            }
        }

        Ok(())
    }
}

/// Sum the subtotals of `line_items` and add `gst_percentage` percent on top.
///
/// The result is rounded to the nearest cent.
///
/// # Errors
/// Returns [Error::LineItemTotalOverflow] if the total is too large for a [Decimal].
pub fn line_items_total(
    line_items: &[LineItem],
    gst_percentage: Decimal,
) -> Result<Decimal, Error> {
    let subtotal = line_items.iter().try_fold(Decimal::ZERO, |subtotal, item| {
        subtotal
            .checked_add(item.subtotal()?)
            .ok_or(Error::LineItemTotalOverflow)
    })?;

    let gst_multiplier = Decimal::ONE
        .checked_add(gst_percentage / Decimal::ONE_HUNDRED)
        .ok_or(Error::LineItemTotalOverflow)?;

    subtotal
        .checked_mul(gst_multiplier)
        .map(|total| total.round_dp(2))
        .ok_or(Error::LineItemTotalOverflow)
}

/// Parse a receipt date formatted as DD/MM/YYYY.
///
/// # Errors
/// Returns [Error::InvalidReceiptDate] if `text` does not have exactly three numeric parts
/// separated by slashes, or if the parts do not form a real calendar date (e.g. 31/02/2021).
pub fn parse_receipt_date(text: &str) -> Result<Date, Error> {
    let invalid_date = || Error::InvalidReceiptDate(text.to_owned());

    let parts: Vec<&str> = text.trim().split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid_date());
    };

    if [day, month, year]
        .iter()
        .any(|part| part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid_date());
    }

    let day: u8 = day.parse().map_err(|_| invalid_date())?;
    let month: u8 = month.parse().map_err(|_| invalid_date())?;
    let year: i32 = year.parse().map_err(|_| invalid_date())?;

    let month = Month::try_from(month).map_err(|_| invalid_date())?;

    Date::from_calendar_date(year, month, day).map_err(|_| invalid_date())
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the tables for receipts and their line items.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_receipt_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS receipt (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                store_name TEXT NOT NULL,
                date TEXT NOT NULL,
                category TEXT,
                description TEXT,
                total TEXT,
                image_url TEXT
                )",
        (),
    )?;

    connection.execute(
        "CREATE TABLE IF NOT EXISTS line_item (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                receipt_id INTEGER NOT NULL,
                position INTEGER NOT NULL,
                item_name TEXT NOT NULL,
                item_value TEXT NOT NULL,
                item_quantity INTEGER NOT NULL,
                FOREIGN KEY(receipt_id) REFERENCES receipt(id) ON DELETE CASCADE
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_line_item_receipt ON line_item(receipt_id, position);",
        (),
    )?;

    Ok(())
}

/// Save a new receipt and its line items to the database.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyStoreName] if the store name is blank,
/// - [Error::InvalidReceiptDate] if the date is not a valid DD/MM/YYYY date,
/// - [Error::InvalidQuantity] if a line item has a quantity of zero,
/// - [Error::InvalidAmount] if the total is given but is not a non-negative amount,
/// - [Error::LineItemTotalOverflow] if the total is left out and the line items add up to more
///   than a [Decimal] can hold,
/// - or [Error::SqlError] there is some other SQL error.
pub fn create_receipt(new_receipt: NewReceipt, connection: &Connection) -> Result<Receipt, Error> {
    new_receipt.validate()?;

    let total = new_receipt.resolved_total()?;
    let sql_transaction = connection.unchecked_transaction()?;

    let mut receipt = sql_transaction
        .prepare(
            "INSERT INTO receipt (store_name, date, category, description, total, image_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, store_name, date, category, description, total, image_url",
        )?
        .query_row(
            (
                new_receipt.store_name.trim(),
                new_receipt.date.trim(),
                &new_receipt.category,
                &new_receipt.description,
                total,
                &new_receipt.image_url,
            ),
            map_receipt_row,
        )?;

    {
        let mut statement = sql_transaction.prepare(
            "INSERT INTO line_item (receipt_id, position, item_name, item_value, item_quantity)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for (position, item) in new_receipt.line_items.iter().enumerate() {
            statement.execute((
                receipt.id,
                position as i64,
                &item.item_name,
                &item.item_value,
                item.item_quantity,
            ))?;
        }
    }

    sql_transaction.commit()?;

    receipt.line_items = new_receipt.line_items;

    Ok(receipt)
}

/// Retrieve a receipt and its line items from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid receipt,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_receipt(id: ReceiptId, connection: &Connection) -> Result<Receipt, Error> {
    let mut receipt = connection
        .prepare(
            "SELECT id, store_name, date, category, description, total, image_url
             FROM receipt WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_receipt_row)?;

    receipt.line_items = connection
        .prepare(
            "SELECT item_name, item_value, item_quantity FROM line_item
             WHERE receipt_id = :id ORDER BY position",
        )?
        .query_map(&[(":id", &id)], map_line_item_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(receipt)
}

/// Retrieve every receipt in the database, in the order they were created.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_all_receipts(connection: &Connection) -> Result<Vec<Receipt>, Error> {
    let mut receipts = connection
        .prepare(
            "SELECT id, store_name, date, category, description, total, image_url
             FROM receipt ORDER BY id",
        )?
        .query_map([], map_receipt_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut line_items_by_receipt: HashMap<ReceiptId, Vec<LineItem>> = HashMap::new();
    let mut statement = connection.prepare(
        "SELECT receipt_id, item_name, item_value, item_quantity FROM line_item
         ORDER BY receipt_id, position",
    )?;
    let rows = statement.query_map([], |row| {
        let receipt_id: ReceiptId = row.get(0)?;
        let line_item = LineItem {
            item_name: row.get(1)?,
            item_value: row.get(2)?,
            item_quantity: row.get(3)?,
        };

        Ok((receipt_id, line_item))
    })?;

    for row in rows {
        let (receipt_id, line_item) = row?;
        line_items_by_receipt
            .entry(receipt_id)
            .or_default()
            .push(line_item);
    }

    for receipt in &mut receipts {
        receipt.line_items = line_items_by_receipt
            .remove(&receipt.id)
            .unwrap_or_default();
    }

    Ok(receipts)
}

type RowsAffected = usize;

/// Delete a receipt and its line items.
///
/// Returns the number of receipts deleted, which is zero when `id` is not in the database.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn delete_receipt(id: ReceiptId, connection: &Connection) -> Result<RowsAffected, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    sql_transaction.execute(
        "DELETE FROM line_item WHERE receipt_id = :id",
        &[(":id", &id)],
    )?;
    let rows_affected =
        sql_transaction.execute("DELETE FROM receipt WHERE id = :id", &[(":id", &id)])?;

    sql_transaction.commit()?;

    Ok(rows_affected)
}

/// Map a database row to a Receipt without its line items.
fn map_receipt_row(row: &Row) -> Result<Receipt, rusqlite::Error> {
    Ok(Receipt {
        id: row.get(0)?,
        store_name: row.get(1)?,
        date: row.get(2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        line_items: Vec::new(),
        total: row.get(5)?,
        image_url: row.get(6)?,
    })
}

fn map_line_item_row(row: &Row) -> Result<LineItem, rusqlite::Error> {
    Ok(LineItem {
        item_name: row.get(0)?,
        item_value: row.get(1)?,
        item_quantity: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{Error, db::initialize};

    use super::{
        Category, LineItem, NewReceipt, create_receipt, delete_receipt, get_all_receipts,
        get_receipt, line_items_total, parse_receipt_date,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().expect("Could not open database in memory");
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn line_item(name: &str, value: &str, quantity: u32) -> LineItem {
        LineItem {
            item_name: name.to_owned(),
            item_value: value.to_owned(),
            item_quantity: quantity,
        }
    }

    #[test]
    fn parses_day_month_year() {
        assert_eq!(parse_receipt_date("14/03/2021"), Ok(date!(2021 - 03 - 14)));
        assert_eq!(parse_receipt_date("1/1/2020"), Ok(date!(2020 - 01 - 01)));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(
            parse_receipt_date("31/02/2021"),
            Err(Error::InvalidReceiptDate("31/02/2021".to_owned()))
        );
        assert!(parse_receipt_date("32/01/2021").is_err());
        assert!(parse_receipt_date("01/13/2021").is_err());
        assert!(parse_receipt_date("00/01/2021").is_err());
    }

    #[test]
    fn rejects_dates_without_three_numeric_parts() {
        assert!(parse_receipt_date("2021-03-14").is_err());
        assert!(parse_receipt_date("14/03").is_err());
        assert!(parse_receipt_date("14/03/2021/1").is_err());
        assert!(parse_receipt_date("14/Mar/2021").is_err());
        assert!(parse_receipt_date("//").is_err());
        assert!(parse_receipt_date("+1/03/2021").is_err());
    }

    #[test]
    fn category_labels_ignore_case_and_whitespace() {
        assert_eq!(Category::from_label("Food"), Some(Category::Food));
        assert_eq!(Category::from_label(" home "), Some(Category::Home));
        assert_eq!(Category::from_label("PERSONAL"), Some(Category::Personal));
        assert_eq!(Category::from_label("Travel"), None);
    }

    #[test]
    fn line_items_total_adds_gst() {
        let items = vec![line_item("Milk", "$2.50", 2), line_item("Bread", "4.00", 1)];

        assert_eq!(line_items_total(&items, Decimal::ZERO), Ok(Decimal::new(900, 2)));
        assert_eq!(
            line_items_total(&items, Decimal::new(15, 0)),
            Ok(Decimal::new(1035, 2))
        );
    }

    #[test]
    fn unparsable_line_item_value_counts_as_zero() {
        let items = vec![line_item("Mystery", "??", 3), line_item("Eggs", "6", 1)];

        assert_eq!(line_items_total(&items, Decimal::ZERO), Ok(Decimal::new(6, 0)));
    }

    #[test]
    fn line_items_too_large_for_a_decimal_are_rejected() {
        let doubled = vec![line_item("Yacht", "50000000000000000000000000000", 2)];
        let summed = vec![
            line_item("Yacht", "50000000000000000000000000000", 1),
            line_item("Yacht", "50000000000000000000000000000", 1),
        ];
        let taxed = vec![line_item("Yacht", "50000000000000000000000000000", 1)];

        assert_eq!(
            line_items_total(&doubled, Decimal::ZERO),
            Err(Error::LineItemTotalOverflow)
        );
        assert_eq!(
            line_items_total(&summed, Decimal::ZERO),
            Err(Error::LineItemTotalOverflow)
        );
        assert_eq!(
            line_items_total(&taxed, Decimal::new(100, 0)),
            Err(Error::LineItemTotalOverflow)
        );
    }

    #[test]
    fn create_receipt_rejects_line_items_too_large_for_a_decimal() {
        let connection = get_test_connection();
        let mut new_receipt = NewReceipt::new("Marina", "02/04/2021", "0");
        new_receipt.total = None;
        new_receipt.line_items = vec![line_item("Yacht", "50000000000000000000000000000", 2)];

        assert_eq!(
            create_receipt(new_receipt, &connection),
            Err(Error::LineItemTotalOverflow)
        );
        assert_eq!(get_all_receipts(&connection), Ok(Vec::new()));
    }

    #[test]
    fn create_receipt_succeeds() {
        let connection = get_test_connection();
        let mut new_receipt = NewReceipt::new("Countdown", "14/03/2021", "53.95")
            .category(Category::Food);
        new_receipt.line_items = vec![line_item("Milk", "2.50", 2)];

        let receipt = create_receipt(new_receipt, &connection).expect("Could not create receipt");

        assert!(receipt.id > 0);
        assert_eq!(receipt.store_name, "Countdown");
        assert_eq!(receipt.date, "14/03/2021");
        assert_eq!(receipt.category, Some("Food".to_owned()));
        assert_eq!(receipt.total, Some("53.95".to_owned()));
        assert_eq!(receipt.line_items, vec![line_item("Milk", "2.50", 2)]);
    }

    #[test]
    fn create_receipt_derives_missing_total_from_line_items() {
        let connection = get_test_connection();
        let mut new_receipt = NewReceipt::new("Bunnings", "02/04/2021", "0");
        new_receipt.total = None;
        new_receipt.gst_percentage = Some(Decimal::new(15, 0));
        new_receipt.line_items = vec![line_item("Screws", "$10.00", 2)];

        let receipt = create_receipt(new_receipt, &connection).expect("Could not create receipt");

        assert_eq!(receipt.total, Some("23.00".to_owned()));
    }

    #[test]
    fn create_receipt_rejects_invalid_input() {
        let connection = get_test_connection();

        assert_eq!(
            create_receipt(NewReceipt::new("  ", "14/03/2021", "1.00"), &connection),
            Err(Error::EmptyStoreName)
        );
        assert_eq!(
            create_receipt(NewReceipt::new("Shop", "31/02/2021", "1.00"), &connection),
            Err(Error::InvalidReceiptDate("31/02/2021".to_owned()))
        );
        assert_eq!(
            create_receipt(NewReceipt::new("Shop", "14/03/2021", "-1.00"), &connection),
            Err(Error::InvalidAmount("-1.00".to_owned()))
        );

        let mut zero_quantity = NewReceipt::new("Shop", "14/03/2021", "1.00");
        zero_quantity.line_items = vec![line_item("Nothing", "1.00", 0)];
        assert_eq!(
            create_receipt(zero_quantity, &connection),
            Err(Error::InvalidQuantity("Nothing".to_owned()))
        );

        assert_eq!(get_all_receipts(&connection), Ok(vec![]));
    }

    #[test]
    fn get_receipt_returns_line_items_in_order() {
        let connection = get_test_connection();
        let mut new_receipt = NewReceipt::new("Countdown", "14/03/2021", "12.00");
        new_receipt.line_items = vec![
            line_item("Apples", "3.00", 2),
            line_item("Bananas", "1.00", 3),
            line_item("Cheese", "3.00", 1),
        ];
        let created = create_receipt(new_receipt, &connection).expect("Could not create receipt");

        let got = get_receipt(created.id, &connection).expect("Could not get receipt");

        assert_eq!(got, created);
    }

    #[test]
    fn get_receipt_fails_on_missing_id() {
        let connection = get_test_connection();

        assert_eq!(get_receipt(42, &connection), Err(Error::NotFound));
    }

    #[test]
    fn get_all_receipts_groups_line_items_by_receipt() {
        let connection = get_test_connection();
        let mut first = NewReceipt::new("A", "01/01/2021", "1.00");
        first.line_items = vec![line_item("One", "1.00", 1)];
        let mut second = NewReceipt::new("B", "02/01/2021", "4.00");
        second.line_items = vec![line_item("Two", "2.00", 1), line_item("Three", "2.00", 1)];
        let first = create_receipt(first, &connection).expect("Could not create receipt");
        let second = create_receipt(second, &connection).expect("Could not create receipt");

        let receipts = get_all_receipts(&connection).expect("Could not get receipts");

        assert_eq!(receipts, vec![first, second]);
    }

    #[test]
    fn delete_receipt_removes_receipt_and_line_items() {
        let connection = get_test_connection();
        let mut new_receipt = NewReceipt::new("A", "01/01/2021", "1.00");
        new_receipt.line_items = vec![line_item("One", "1.00", 1)];
        let receipt = create_receipt(new_receipt, &connection).expect("Could not create receipt");

        assert_eq!(delete_receipt(receipt.id, &connection), Ok(1));
        assert_eq!(get_receipt(receipt.id, &connection), Err(Error::NotFound));

        let line_item_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM line_item", [], |row| row.get(0))
            .expect("Could not count line items");
        assert_eq!(line_item_count, 0);
    }

    #[test]
    fn delete_missing_receipt_affects_no_rows() {
        let connection = get_test_connection();

        assert_eq!(delete_receipt(7, &connection), Ok(0));
    }
}
