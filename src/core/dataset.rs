//! Built-in budget figures and loading of replacement datasets.
use crate::core::analytics::checked_total;
use crate::core::model::{
    BudgetData, CategoryValue, FiscalYear, MetricCard, YearTrend, parse_hex_color,
};
use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Amounts are written in paise so every figure is an exact two-place decimal.
fn cr(paise: i64) -> Decimal {
    Decimal::new(paise, 2)
}

/// The Union Budget figures in crores of rupees.
pub fn builtin() -> BudgetData {
    BudgetData {
        title: "Government of India Budget Dashboard".to_string(),
        fiscal_years: vec![
            FiscalYear::new(2023),
            FiscalYear::new(2024),
            FiscalYear::new(2025),
        ],
        default_fiscal_year: FiscalYear::new(2025),
        summary: vec![
            MetricCard::new("Total Revenue", cr(383526852), cr(1002)),
            MetricCard::new("Tax Revenue", cr(284778889), cr(1096)),
            MetricCard::new("Non-Tax Revenue", cr(98747963), cr(742)),
            MetricCard::new("Fiscal Deficit", cr(52443389), cr(-1413)),
        ],
        revenue: vec![
            CategoryValue::new("Tax Revenue", cr(284778889), "#4f46e5"),
            CategoryValue::new("Non-Tax Revenue", cr(98747963), "#8b5cf6"),
        ],
        tax_revenue: vec![
            CategoryValue::new("GST", cr(118335500), "#4f46e5"),
            CategoryValue::new("Income & Expenditure Tax", cr(244200000), "#8b5cf6"),
            CategoryValue::new("Property & Capital Transaction Tax", cr(7800000), "#a78bfa"),
            CategoryValue::new("Other Commodity & Service Tax", cr(56210000), "#c4b5fd"),
            CategoryValue::new("UT Taxes", cr(477800), "#ddd6fe"),
        ],
        expenditure: vec![
            CategoryValue::new("General Services", cr(218227964), "#ef4444"),
            CategoryValue::new("Social Services", cr(19858018), "#f97316"),
            CategoryValue::new("Economic Services", cr(123561485), "#eab308"),
            CategoryValue::new("Grants-in-Aid", cr(72656755), "#84cc16"),
            CategoryValue::new("UT Expenditure", cr(1666019), "#14b8a6"),
        ],
        capital_expenditure: vec![
            CategoryValue::new("General Services", cr(20908888), "#06b6d4"),
            CategoryValue::new("Social Services", cr(1118630), "#0ea5e9"),
            CategoryValue::new("Economic Services", cr(73122248), "#3b82f6"),
            CategoryValue::new("UT Expenditure", cr(474765), "#6366f1"),
        ],
        trend: vec![
            YearTrend::new("2023-2024", cr(308817464), cr(385408221), cr(76590757)),
            YearTrend::new("2024-2025 (BE)", cr(350433453), cr(408517538), cr(58084085)),
            YearTrend::new("2024-2025 (RE)", cr(348586929), cr(409660707), cr(61073778)),
            YearTrend::new("2025-2026 (BE)", cr(383526852), cr(435970241), cr(52443389)),
        ],
    }
}

/// Loads a dataset from a YAML file and validates it.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<BudgetData> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
    let data: BudgetData = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?;
    validate(&data).with_context(|| format!("Invalid dataset file: {}", path.display()))?;
    debug!(path = %path.display(), "Loaded dataset");
    Ok(data)
}

/// Checks the invariants the renderers rely on.
pub fn validate(data: &BudgetData) -> Result<()> {
    if data.fiscal_years.is_empty() {
        bail!("Dataset has no fiscal years");
    }
    if !data.fiscal_years.contains(&data.default_fiscal_year) {
        bail!(
            "Default fiscal year {} is not one of the fiscal years",
            data.default_fiscal_year
        );
    }

    let card_total = data
        .summary
        .iter()
        .try_fold(Decimal::ZERO, |acc, card| acc.checked_add(card.value));
    if card_total.is_none() {
        bail!("summary: total overflows");
    }

    for card in &data.summary {
        if card.value.is_sign_negative() {
            bail!("Metric '{}' has a negative value", card.title);
        }
        if !card.trend_matches_change() {
            bail!(
                "Metric '{}' has trend '{}' but change {}",
                card.title,
                card.trend,
                card.change
            );
        }
    }

    let sets = [
        ("revenue", &data.revenue),
        ("tax_revenue", &data.tax_revenue),
        ("expenditure", &data.expenditure),
        ("capital_expenditure", &data.capital_expenditure),
    ];
    for (name, values) in sets {
        if checked_total(values).is_none() {
            bail!("{name}: total overflows");
        }
        for item in values {
            if item.value.is_sign_negative() {
                bail!("{name}: '{}' has a negative value", item.category);
            }
            if parse_hex_color(&item.color).is_none() {
                bail!(
                    "{name}: '{}' has an invalid color '{}'",
                    item.category,
                    item.color
                );
            }
        }
    }

    for period in &data.trend {
        if period.revenue.is_sign_negative()
            || period.expenditure.is_sign_negative()
            || period.deficit.is_sign_negative()
        {
            bail!("Trend period '{}' has a negative value", period.year);
        }
        if period.fiscal_year().is_none() {
            bail!("Trend period '{}' does not start with YYYY-YYYY", period.year);
        }
        if period.gap() != period.deficit {
            warn!(
                period = %period.year,
                deficit = %period.deficit,
                gap = %period.gap(),
                "Deficit differs from expenditure minus revenue"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::TrendDirection;
    use std::str::FromStr;

    #[test]
    fn test_builtin_is_valid() {
        validate(&builtin()).expect("builtin dataset should validate");
    }

    #[test]
    fn test_builtin_card_trends_match_changes() {
        for card in builtin().summary {
            assert!(card.trend_matches_change(), "{}", card.title);
        }
        let deficit = &builtin().summary[3];
        assert_eq!(deficit.trend, TrendDirection::Down);
    }

    #[test]
    fn test_builtin_deficit_is_expenditure_gap() {
        for period in builtin().trend {
            assert_eq!(period.gap(), period.deficit, "{}", period.year);
        }
    }

    #[test]
    fn test_builtin_revenue_split_matches_cards() {
        let data = builtin();
        let split: Decimal = data.revenue.iter().map(|c| c.value).sum();
        assert_eq!(split, data.summary[0].value);
        assert_eq!(
            data.trend.last().unwrap().revenue,
            Decimal::from_str("3835268.52").unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_mismatched_trend() {
        let mut data = builtin();
        data.summary[3].trend = TrendDirection::Up;
        let err = validate(&data).unwrap_err();
        assert!(err.to_string().contains("Fiscal Deficit"));
    }

    #[test]
    fn test_validate_rejects_negative_value() {
        let mut data = builtin();
        data.tax_revenue[0].value = Decimal::from(-1);
        assert!(validate(&data).is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_totals() {
        let mut data = builtin();
        data.capital_expenditure[0].value = Decimal::MAX;
        data.capital_expenditure[1].value = Decimal::MAX;
        let err = validate(&data).unwrap_err();
        assert!(err.to_string().contains("capital_expenditure: total overflows"));

        let mut data = builtin();
        data.summary[0].value = Decimal::MAX;
        data.summary[1].value = Decimal::MAX;
        let err = validate(&data).unwrap_err();
        assert!(err.to_string().contains("summary: total overflows"));
    }

    #[test]
    fn test_load_rejects_overflowing_yaml() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let path = temp_dir.path().join("budget.yaml");
        let yaml = r##"
title: "Oversized"
fiscal_years: ["2025-2026"]
default_fiscal_year: "2025-2026"
summary: []
revenue:
  - category: "A"
    value: "50000000000000000000000000000"
    color: "#4f46e5"
  - category: "B"
    value: "50000000000000000000000000000"
    color: "#8b5cf6"
tax_revenue: []
expenditure: []
capital_expenditure: []
trend: []
"##;
        fs::write(&path, yaml)?;

        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("revenue: total overflows"));
        Ok(())
    }

    #[test]
    fn test_validate_rejects_unknown_default_year() {
        let mut data = builtin();
        data.default_fiscal_year = FiscalYear::new(2030);
        assert!(validate(&data).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let mut data = builtin();
        data.capital_expenditure[1].color = "blue".to_string();
        let err = validate(&data).unwrap_err();
        assert!(err.to_string().contains("invalid color"));
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let path = temp_dir.path().join("budget.yaml");
        let yaml = r##"
title: "State Budget"
fiscal_years: ["2024-2025", "2025-2026"]
default_fiscal_year: "2025-2026"
summary:
  - title: "Total Revenue"
    value: 1200.50
    change: 4.5
    trend: up
revenue:
  - category: "Tax"
    value: 1000
    color: "#4f46e5"
  - category: "Non-Tax"
    value: 200.50
    color: "#8b5cf6"
tax_revenue: []
expenditure: []
capital_expenditure: []
trend:
  - year: "2025-2026 (BE)"
    revenue: 1200.50
    expenditure: 1500
    deficit: 299.50
"##;
        fs::write(&path, yaml)?;

        let data = load_from_path(&path)?;
        assert_eq!(data.title, "State Budget");
        assert_eq!(data.fiscal_years.len(), 2);
        assert_eq!(data.revenue[1].value, Decimal::from_str("200.50")?);
        Ok(())
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = load_from_path("/nonexistent/budget.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset file"));
    }
}
