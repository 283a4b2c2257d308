//! Sales report CSV. Column order is fixed; values are comma-joined with no
//! quoting or escaping, byte-for-byte what the original report produced, so
//! a customer name containing a comma will shift its row. Kept as-is for
//! report compatibility (recorded in DESIGN.md).

use chrono::Utc;

use crate::{common::format::csv_date, models::sales::Sale};

const HEADER: &str = "Date,Shop,Material,Quantity,Unit,Rate,Total,Customer";

/// Renders the full sales snapshot as CSV text, header line first.
pub fn sales_csv(sales: &[Sale]) -> String {
    let mut lines = Vec::with_capacity(sales.len() + 1);
    lines.push(HEADER.to_string());
    for sale in sales {
        lines.push(format!(
            "{},{},{},{},{},{},{},{}",
            csv_date(sale.sale_date),
            sale.shop_name,
            sale.material_name,
            sale.quantity.normalize(),
            sale.unit.as_str(),
            sale.rate.normalize(),
            sale.total_amount.normalize(),
            sale.customer_name,
        ));
    }
    lines.join("\n")
}

/// Attachment name offered to the browser: `sales-report-YYYY-MM-DD.csv`.
pub fn report_filename() -> String {
    format!("sales-report-{}.csv", Utc::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sales::SaleUnit;
    use chrono::{Local, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn empty_snapshot_is_header_only() {
        assert_eq!(sales_csv(&[]), HEADER);
    }

    #[test]
    fn row_follows_fixed_column_order() {
        let at = Local
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let sale = Sale {
            id: Uuid::new_v4(),
            material_name: "Cotton".to_string(),
            rate: dec!(1000),
            quantity: dec!(5),
            unit: SaleUnit::Meters,
            customer_name: "Jane".to_string(),
            total_amount: dec!(5000),
            shop_name: "S1".to_string(),
            user_id: Uuid::new_v4(),
            sale_date: at,
            created_at: at,
            updated_at: at,
        };

        let csv = sales_csv(&[sale]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert_eq!(lines.next(), Some("1/1/2024,S1,Cotton,5,meters,1000,5000,Jane"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn stored_scale_does_not_leak_trailing_zeros() {
        let at = Utc::now();
        let sale = Sale {
            id: Uuid::new_v4(),
            material_name: "Silk".to_string(),
            rate: dec!(1000.00),
            quantity: dec!(2.500),
            unit: SaleUnit::Yards,
            customer_name: "Walk-in Customer".to_string(),
            total_amount: dec!(2500.00),
            shop_name: "Shop 1".to_string(),
            user_id: Uuid::new_v4(),
            sale_date: at,
            created_at: at,
            updated_at: at,
        };
        let row = sales_csv(&[sale]);
        assert!(row.ends_with("2.5,yards,1000,2500,Walk-in Customer"));
    }

    #[test]
    fn filename_is_dated() {
        let name = report_filename();
        assert!(name.starts_with("sales-report-"));
        assert!(name.ends_with(".csv"));
    }
}
