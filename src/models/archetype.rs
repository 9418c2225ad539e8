/// One labelled archetype share, in percent
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeShare {
    pub label: String,
    pub percent: f64,
}

const MAX_MAJORITY: f64 = 0.67;
const MIN_MINORITY: f64 = 0.33;

/// Player archetype mix, at most two entries, normalized to 100
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArchetypeSplit {
    pub items: Vec<ArchetypeShare>,
}

impl ArchetypeSplit {
    /// Build from API names and `0..1` fractions
    pub fn from_fractions(names: &[String], fractions: &[f64]) -> Self {
        let items: Vec<ArchetypeShare> = names
            .iter()
            .zip(fractions)
            .take(2)
            .map(|(label, f)| ArchetypeShare {
                label: label.clone(),
                percent: f * 100.0,
            })
            .collect();
        Self { items: normalize(items) }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the larger share
    pub fn majority(&self) -> Option<usize> {
        match self.items.as_slice() {
            [] => None,
            [_] => Some(0),
            [a, b, ..] => Some(if a.percent >= b.percent { 0 } else { 1 }),
        }
    }

    /// Bar ratios; extremes are clamped so neither side gets tiny
    pub fn visual_ratios(&self) -> Vec<f64> {
        match self.items.as_slice() {
            [] => Vec::new(),
            [_] => vec![1.0],
            [a, b, ..] => {
                let (r1, r2) = clamp_visual_split(a.percent, b.percent);
                vec![r1, r2]
            }
        }
    }
}

/// Scale shares so they sum to 100; non-finite shares count as 0
pub fn normalize(items: Vec<ArchetypeShare>) -> Vec<ArchetypeShare> {
    let sum: f64 = items
        .iter()
        .map(|x| if x.percent.is_finite() { x.percent } else { 0.0 })
        .sum();
    let total = if sum == 0.0 { 1.0 } else { sum };
    items
        .into_iter()
        .map(|x| ArchetypeShare {
            percent: x.percent / total * 100.0,
            ..x
        })
        .collect()
}

pub fn clamp_visual_split(p1: f64, p2: f64) -> (f64, f64) {
    let major = p1.max(p2);
    let mut maj = (major / 100.0).min(MAX_MAJORITY);
    let mut min = 1.0 - maj;
    if min < MIN_MINORITY {
        min = MIN_MINORITY;
        maj = 1.0 - min;
    }
    if p1 >= p2 {
        (maj, min)
    } else {
        (min, maj)
    }
}
