//! Geometry for text charts. The renderers only draw what these return.
use rust_decimal::{Decimal, prelude::*};

const BAR_GLYPH: char = '█';
const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Length of a bar for `value` on a scale where `max` fills `width` cells.
pub fn bar_length(value: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    let ratio = (value / max).min(Decimal::ONE);
    (ratio * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(0)
}

pub fn bar(value: Decimal, max: Decimal, width: usize) -> String {
    BAR_GLYPH.to_string().repeat(bar_length(value, max, width))
}

/// One glyph per value, scaled between the series minimum and maximum.
pub fn sparkline(values: &[Decimal]) -> String {
    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return String::new();
    };
    let span = *max - *min;
    let top = Decimal::from(SPARK_GLYPHS.len() - 1);
    values
        .iter()
        .map(|v| {
            if span.is_zero() {
                return SPARK_GLYPHS[SPARK_GLYPHS.len() / 2];
            }
            let idx = ((*v - *min) / span * top)
                .round()
                .to_usize()
                .unwrap_or(0)
                .min(SPARK_GLYPHS.len() - 1);
            SPARK_GLYPHS[idx]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length() {
        let max = Decimal::from(200);
        assert_eq!(bar_length(Decimal::from(200), max, 40), 40);
        assert_eq!(bar_length(Decimal::from(100), max, 40), 20);
        assert_eq!(bar_length(Decimal::from(1), max, 40), 0);
        assert_eq!(bar_length(Decimal::from(300), max, 40), 40);
        assert_eq!(bar_length(Decimal::ZERO, max, 40), 0);
        assert_eq!(bar_length(Decimal::ONE, Decimal::ZERO, 40), 0);
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(Decimal::from(5), Decimal::from(10), 4), "██");
    }

    #[test]
    fn test_sparkline() {
        let values = [Decimal::from(1), Decimal::from(8), Decimal::from(4)];
        assert_eq!(sparkline(&values), "▁█▄");
        assert_eq!(sparkline(&[Decimal::ONE, Decimal::ONE]), "▅▅");
        assert_eq!(sparkline(&[]), "");
    }
}
