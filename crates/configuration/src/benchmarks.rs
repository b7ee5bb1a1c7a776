use std::collections::BTreeMap;
use std::fmt;

/// Display label -> ticker symbol. Labels are unique by construction.
pub type BenchmarkSet = BTreeMap<String, String>;

/// The pre-defined benchmark baskets a user can pick by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkPreset {
    Custom,
    Common,
    Global,
    Resources,
}

impl BenchmarkPreset {
    pub const ALL: [BenchmarkPreset; 4] = [
        BenchmarkPreset::Custom,
        BenchmarkPreset::Common,
        BenchmarkPreset::Global,
        BenchmarkPreset::Resources,
    ];

    /// Used when the requested index does not name a preset.
    pub const FALLBACK: BenchmarkPreset = BenchmarkPreset::Common;

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            BenchmarkPreset::Custom => 0,
            BenchmarkPreset::Common => 1,
            BenchmarkPreset::Global => 2,
            BenchmarkPreset::Resources => 3,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BenchmarkPreset::Custom => "Custom User Benchmarks",
            BenchmarkPreset::Common => "Common Benchmarks (SP500, NASDAQ, Energy, etc.)",
            BenchmarkPreset::Global => "Global Benchmarks (SP500, Canada, China, UK, etc.)",
            BenchmarkPreset::Resources => "Common Resources  (Energy, Gold, Timber, etc.)",
        }
    }

    /// Materializes the preset. `custom` backs the `Custom` preset; when it is
    /// empty the preset falls back to a NASDAQ-only basket.
    pub fn benchmarks(&self, custom: &BenchmarkSet) -> BenchmarkSet {
        let pairs: &[(&str, &str)] = match self {
            BenchmarkPreset::Custom if !custom.is_empty() => return custom.clone(),
            BenchmarkPreset::Custom => &[("NASDAQ", "QQQ")],
            BenchmarkPreset::Common => &[
                ("SP500", "SPY"),
                ("NASDAQ", "QQQ"),
                ("Energy", "USO"),
                ("Gold", "GLD"),
                ("China", "MCHI"),
                ("REITs", "VNQ"),
                ("Bitcoin", "GBTC"),
                ("MJ", "MJ"),
            ],
            BenchmarkPreset::Global => &[
                ("SP500", "SPY"),
                ("Canada", "EWC"),
                ("China", "MCHI"),
                ("UK", "EWU"),
                ("Saudi Arabia", "KSA"),
                ("Turkey", "TUR"),
            ],
            BenchmarkPreset::Resources => &[
                ("Energy", "USO"),
                ("Gold", "GLD"),
                ("REITs", "VNQ"),
                ("Timber", "WOOD"),
            ],
        };

        pairs
            .iter()
            .map(|(label, ticker)| (label.to_string(), ticker.to_string()))
            .collect()
    }
}

impl fmt::Display for BenchmarkPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.index(), self.description())
    }
}

/// Picks a preset by index, falling back to the common basket for unknown indices.
pub fn select_benchmarks(index: usize, custom: &BenchmarkSet) -> (BenchmarkPreset, BenchmarkSet) {
    let preset = BenchmarkPreset::from_index(index).unwrap_or_else(|| {
        tracing::warn!(
            index,
            fallback = %BenchmarkPreset::FALLBACK.description(),
            "Invalid benchmark selection. Using the fallback set."
        );
        BenchmarkPreset::FALLBACK
    });
    (preset, preset.benchmarks(custom))
}

/// Removes every benchmark whose ticker is the instrument under analysis.
pub fn exclude_symbol(benchmarks: BenchmarkSet, symbol: &str) -> BenchmarkSet {
    benchmarks
        .into_iter()
        .filter(|(label, ticker)| {
            let same = ticker.eq_ignore_ascii_case(symbol);
            if same {
                tracing::info!(%label, %ticker, "Dropping benchmark that is the instrument itself.");
            }
            !same
        })
        .collect()
}
