mod relief;
mod tax_bracket;
mod tax_regime;
mod tax_result;

pub use relief::{ReliefBreakdown, ReliefInputs};
pub use tax_bracket::{BracketTable, TaxBracket};
pub use tax_regime::{TaxRegime, TaxRules};
pub use tax_result::{BracketContribution, RegimeComparison, TaxResult};
