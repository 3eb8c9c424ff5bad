/// Named column positions for the fixed positional input contract.
///
/// The upstream files carry no header schema worth trusting, so column
/// meaning is positional. Keeping the positions as data rather than
/// inline offsets lets an alternate layout be supported without touching
/// validation or coercion.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub fixed_deposit: usize,
    pub savings: usize,
    pub loan_balance: usize,
    pub arrears: usize,
    pub fines: usize,
    pub mortuary: usize,
    pub uploaded_date: usize,
    pub period: usize,
    pub assigned_mediator: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            fixed_deposit: 2,
            savings: 3,
            loan_balance: 4,
            arrears: 5,
            fines: 6,
            mortuary: 7,
            uploaded_date: 8,
            period: 9,
            assigned_mediator: 10,
        }
    }
}
