use serde::{Serialize, Serializer};

/// The six currency figures of one stored snapshot. The comparison
/// engine consumes these values only; it never touches the store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapshotFigures {
    pub fixed_deposit: f64,
    pub savings: f64,
    pub loan_balance: f64,
    pub arrears: f64,
    pub fines: f64,
    pub mortuary: f64,
}

impl SnapshotFigures {
    pub fn assets(&self) -> f64 {
        self.fixed_deposit + self.savings
    }

    /// Mortuary and fines count as liabilities alongside the loan
    /// balance and arrears; this mirrors the accounting treatment in the
    /// source data model.
    pub fn liabilities(&self) -> f64 {
        self.loan_balance + self.arrears + self.fines + self.mortuary
    }

    pub fn net_worth(&self) -> f64 {
        self.assets() - self.liabilities()
    }
}

/// Relative change of a field between two periods. A zero baseline has
/// no meaningful percentage, so a value appearing from nothing is `New`
/// and a value vanishing to nothing is `Closed`; both must render
/// distinctly from a literal 0% or any large percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    Ratio(f64),
    New,
    Closed,
}

impl Serialize for PercentChange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Ratio(value) => serializer.serialize_f64(*value),
            Self::New => serializer.serialize_str("new"),
            Self::Closed => serializer.serialize_str("closed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldVariance {
    pub delta: f64,
    pub percent_change: PercentChange,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComparisonFields {
    pub fixed_deposit: FieldVariance,
    pub savings: FieldVariance,
    pub loan_balance: FieldVariance,
    pub arrears: FieldVariance,
    pub fines: FieldVariance,
    pub mortuary: FieldVariance,
    pub net_worth: FieldVariance,
}

pub fn field_variance(current: f64, baseline: f64) -> FieldVariance {
    let delta = current - baseline;

    let percent_change = if baseline == 0.0 {
        if delta == 0.0 {
            PercentChange::Ratio(0.0)
        } else if delta > 0.0 {
            PercentChange::New
        } else {
            PercentChange::Closed
        }
    } else {
        PercentChange::Ratio(delta / baseline.abs() * 100.0)
    };

    FieldVariance {
        delta,
        percent_change,
    }
}

/// Period-to-period variance for every currency field plus the derived
/// net worth. Pure and side-effect free; safe to call repeatedly.
pub fn compare(current: &SnapshotFigures, baseline: &SnapshotFigures) -> ComparisonFields {
    ComparisonFields {
        fixed_deposit: field_variance(current.fixed_deposit, baseline.fixed_deposit),
        savings: field_variance(current.savings, baseline.savings),
        loan_balance: field_variance(current.loan_balance, baseline.loan_balance),
        arrears: field_variance(current.arrears, baseline.arrears),
        fines: field_variance(current.fines, baseline.fines),
        mortuary: field_variance(current.mortuary, baseline.mortuary),
        net_worth: field_variance(current.net_worth(), baseline.net_worth()),
    }
}
