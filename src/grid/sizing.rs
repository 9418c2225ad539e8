//! Column width distribution

use super::column::WidthHint;

/// Width of the synthetic index column when hints are honoured
pub const INDEX_COLUMN_WIDTH: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMode {
    /// Every visible column gets the same width
    #[default]
    Equal,
    /// Fixed hints are honoured, the rest is split by flex weight
    Hinted,
}

/// Split `viewport` cells across columns.
///
/// `padding` is a fixed allowance (borders, selection marker) and `spacing`
/// the gap rendered between adjacent columns.
pub fn column_widths(viewport: u16, padding: u16, spacing: u16, hints: &[WidthHint], mode: SizingMode) -> Vec<u16> {
    let count = hints.len() as u16;
    if count == 0 {
        return Vec::new();
    }

    let gaps = spacing.saturating_mul(count - 1);
    let available = viewport.saturating_sub(padding).saturating_sub(gaps);

    match mode {
        SizingMode::Equal => vec![(available / count).max(1); hints.len()],
        SizingMode::Hinted => hinted_widths(available, hints),
    }
}

fn hinted_widths(available: u16, hints: &[WidthHint]) -> Vec<u16> {
    let fixed: u16 = hints
        .iter()
        .map(|h| match h {
            WidthHint::Fixed(w) => *w,
            _ => 0,
        })
        .fold(0u16, |acc, w| acc.saturating_add(w));
    let weights: u32 = hints
        .iter()
        .map(|h| match h {
            WidthHint::Fixed(_) => 0,
            WidthHint::Flex(w) => u32::from((*w).max(1)),
            WidthHint::Auto => 1,
        })
        .sum();
    let remaining = u32::from(available.saturating_sub(fixed));

    hints
        .iter()
        .map(|h| match h {
            WidthHint::Fixed(w) => *w,
            WidthHint::Flex(w) => share(remaining, u32::from((*w).max(1)), weights),
            WidthHint::Auto => share(remaining, 1, weights),
        })
        .collect()
}

fn share(remaining: u32, weight: u32, total: u32) -> u16 {
    if total == 0 {
        return 1;
    }
    let cells = remaining * weight / total;
    u16::try_from(cells).unwrap_or(u16::MAX).max(1)
}
