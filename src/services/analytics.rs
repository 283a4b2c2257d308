//! Dashboard aggregation. A pure function of the latest sales snapshot:
//! re-run wholesale on every snapshot update, never incrementally. Expected
//! cardinality is a single shop's daily volume, so a full pass is cheap.

use chrono::NaiveDate;

use crate::{
    common::format::day_key,
    models::{
        analytics::{
            DailyPoint, MaterialAggregate, MaterialSlice, SalesAnalytics, SalesTotals,
            ShopAggregate,
        },
        sales::Sale,
    },
};

/// Slices shown in the material pie chart; anything past the top 6 by revenue
/// is dropped outright (no "other" bucket).
const DISTRIBUTION_LIMIT: usize = 6;

/// Bars in the daily chart: the 7 most recent days that had at least one
/// sale. Zero-sale days produce no bar.
const DAILY_CHART_LIMIT: usize = 7;

/// Rows in the recent-transactions table.
const RECENT_LIMIT: usize = 10;

/// Derives every dashboard aggregate from a sales snapshot. `today` is the
/// local calendar day the "today" cards are measured against; sales are
/// bucketed by their own local calendar day, so two records a millisecond
/// apart can straddle midnight into different buckets.
pub fn calculate(sales: &[Sale], today: NaiveDate) -> SalesAnalytics {
    if sales.is_empty() {
        return SalesAnalytics::empty();
    }

    let mut today_totals = SalesTotals::zero();
    let mut grand_totals = SalesTotals::zero();
    let mut shop_sales: Vec<ShopAggregate> = Vec::new();
    let mut material_sales: Vec<MaterialAggregate> = Vec::new();
    let mut daily: Vec<DailyPoint> = Vec::new();

    for sale in sales {
        let day = day_key(sale.sale_date);

        grand_totals.count += 1;
        grand_totals.total += sale.total_amount;
        if day == today {
            today_totals.count += 1;
            today_totals.total += sale.total_amount;
        }

        // Grouping is by exact string match, in first-seen order.
        match shop_sales.iter_mut().find(|s| s.shop_name == sale.shop_name) {
            Some(entry) => {
                entry.count += 1;
                entry.total += sale.total_amount;
            }
            None => shop_sales.push(ShopAggregate {
                shop_name: sale.shop_name.clone(),
                count: 1,
                total: sale.total_amount,
            }),
        }

        match material_sales
            .iter_mut()
            .find(|m| m.material_name == sale.material_name)
        {
            Some(entry) => {
                entry.total_quantity += sale.quantity;
                entry.total_amount += sale.total_amount;
                entry.count += 1;
            }
            None => material_sales.push(MaterialAggregate {
                material_name: sale.material_name.clone(),
                total_quantity: sale.quantity,
                total_amount: sale.total_amount,
                count: 1,
            }),
        }

        match daily.iter_mut().find(|d| d.date == day) {
            Some(entry) => {
                entry.sales += 1;
                entry.amount += sale.total_amount;
            }
            None => daily.push(DailyPoint {
                date: day,
                sales: 1,
                amount: sale.total_amount,
            }),
        }
    }

    // Sort ascending first, then keep the tail: "last 7" means the 7 most
    // recent days that had sales, not the last 7 calendar days.
    daily.sort_by_key(|d| d.date);
    if daily.len() > DAILY_CHART_LIMIT {
        daily.drain(..daily.len() - DAILY_CHART_LIMIT);
    }

    let mut material_distribution: Vec<MaterialSlice> = material_sales
        .iter()
        .map(|m| MaterialSlice {
            name: m.material_name.clone(),
            value: m.total_amount,
        })
        .collect();
    material_distribution.sort_by(|a, b| b.value.cmp(&a.value));
    material_distribution.truncate(DISTRIBUTION_LIMIT);

    SalesAnalytics {
        today_sales: today_totals,
        total_sales: grand_totals,
        shop_sales,
        material_sales,
        // Snapshot arrives newest first, so the head is the recent slice.
        recent_transactions: sales.iter().take(RECENT_LIMIT).cloned().collect(),
        daily_sales_chart: daily,
        material_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sales::SaleUnit;
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn sale(shop: &str, material: &str, quantity: Decimal, total: Decimal, at: DateTime<Utc>) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            material_name: material.to_string(),
            rate: dec!(1000),
            quantity,
            unit: SaleUnit::Meters,
            customer_name: "Walk-in Customer".to_string(),
            total_amount: total,
            shop_name: shop.to_string(),
            user_id: Uuid::new_v4(),
            sale_date: at,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn empty_snapshot_yields_identity_aggregates() {
        let result = calculate(&[], local_noon(2024, 1, 5).date_naive());
        assert_eq!(result.today_sales, SalesTotals::zero());
        assert_eq!(result.total_sales, SalesTotals::zero());
        assert!(result.shop_sales.is_empty());
        assert!(result.daily_sales_chart.is_empty());
        assert!(result.material_distribution.is_empty());
        assert!(result.recent_transactions.is_empty());
    }

    #[test]
    fn shop_aggregates_sum_to_grand_totals() {
        let at = local_noon(2024, 3, 1);
        let sales = vec![
            sale("Shop 1", "Rotana", dec!(5), dec!(5000), at),
            sale("Shop 2", "Gomesi", dec!(2), dec!(3000), at),
            sale("Shop 1", "Rotana", dec!(1), dec!(1000), at),
        ];
        let result = calculate(&sales, at.with_timezone(&Local).date_naive());

        let count_sum: usize = result.shop_sales.iter().map(|s| s.count).sum();
        let total_sum: Decimal = result.shop_sales.iter().map(|s| s.total).sum();
        assert_eq!(count_sum, result.total_sales.count);
        assert_eq!(total_sum, result.total_sales.total);
        assert_eq!(result.total_sales.count, 3);
        assert_eq!(result.total_sales.total, dec!(9000));
    }

    #[test]
    fn shops_keep_first_seen_order() {
        let at = local_noon(2024, 3, 1);
        let sales = vec![
            sale("Zanzibar", "Rotana", dec!(1), dec!(100), at),
            sale("Arusha", "Rotana", dec!(1), dec!(100), at),
            sale("Zanzibar", "Rotana", dec!(1), dec!(100), at),
        ];
        let result = calculate(&sales, at.with_timezone(&Local).date_naive());
        let names: Vec<&str> = result.shop_sales.iter().map(|s| s.shop_name.as_str()).collect();
        assert_eq!(names, ["Zanzibar", "Arusha"]);
    }

    #[test]
    fn today_filter_uses_local_calendar_day() {
        let today = Local.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        let just_before_midnight = (today - Duration::milliseconds(1)).with_timezone(&Utc);
        let just_after_midnight = today.with_timezone(&Utc);

        let sales = vec![
            sale("Shop 1", "Rotana", dec!(1), dec!(700), just_after_midnight),
            sale("Shop 1", "Rotana", dec!(1), dec!(300), just_before_midnight),
        ];
        let result = calculate(&sales, today.date_naive());

        assert_eq!(result.today_sales.count, 1);
        assert_eq!(result.today_sales.total, dec!(700));
        assert_eq!(result.total_sales.count, 2);
    }

    #[test]
    fn daily_chart_is_ascending_and_capped_at_seven() {
        let mut sales = Vec::new();
        for day in 1..=10 {
            sales.push(sale("Shop 1", "Rotana", dec!(1), dec!(100), local_noon(2024, 5, day)));
        }
        let result = calculate(&sales, local_noon(2024, 5, 10).date_naive());

        assert_eq!(result.daily_sales_chart.len(), 7);
        assert!(result
            .daily_sales_chart
            .windows(2)
            .all(|w| w[0].date < w[1].date));
        assert!(result.daily_sales_chart.iter().all(|d| d.sales >= 1));
        // Truncation happens after sorting: the oldest three days fall off.
        assert_eq!(
            result.daily_sales_chart.first().unwrap().date,
            local_noon(2024, 5, 4).with_timezone(&Local).date_naive()
        );
    }

    #[test]
    fn distribution_is_top_six_by_amount_descending() {
        let at = local_noon(2024, 2, 1);
        let sales: Vec<Sale> = (1..=8)
            .map(|i| {
                sale(
                    "Shop 1",
                    &format!("Material {i}"),
                    dec!(1),
                    Decimal::from(i * 100),
                    at,
                )
            })
            .collect();
        let result = calculate(&sales, at.with_timezone(&Local).date_naive());

        assert_eq!(result.material_distribution.len(), 6);
        assert!(result
            .material_distribution
            .windows(2)
            .all(|w| w[0].value >= w[1].value));
        // The two smallest are dropped silently, not folded into an "other".
        assert_eq!(result.material_distribution[0].value, dec!(800));
        assert_eq!(result.material_distribution[5].value, dec!(300));
        // Full per-material table still holds all eight.
        assert_eq!(result.material_sales.len(), 8);
    }

    #[test]
    fn recent_transactions_keep_snapshot_head() {
        let at = local_noon(2024, 2, 1);
        let sales: Vec<Sale> = (0..12)
            .map(|_| sale("Shop 1", "Rotana", dec!(1), dec!(100), at))
            .collect();
        let result = calculate(&sales, at.with_timezone(&Local).date_naive());
        assert_eq!(result.recent_transactions.len(), 10);
        assert_eq!(result.recent_transactions[0].id, sales[0].id);
    }
}
