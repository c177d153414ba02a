//! Constants shared by the tokenizer and the transformation engine.

/// Bracketed atom groups: `[C@@H]`, `[nH]`, `[NH2+]`, and also `[]`.
pub const BRACKETS_PATTERN: &str = r"\[[^\]]*\]";

/// Two-digit ring closure labels: `%10` through `%99`.
pub const TWO_RING_NUMS_PATTERN: &str = r"%\d{2}";

/// Two-character halogens that must not be split into `B`/`r` or `C`/`l`.
pub const BRCL_PATTERN: &str = r"Br|Cl";

/// Begin-of-sequence sentinel.
pub const BEGIN_TOKEN: &str = "^";
/// End-of-sequence sentinel. Also the padding token of a [`crate::Vocabulary`].
pub const END_TOKEN: &str = "$";

/// Vocabulary id of [`END_TOKEN`]
pub const END_TOKEN_ID: u32 = 0;
/// Vocabulary id of [`BEGIN_TOKEN`]
pub const BEGIN_TOKEN_ID: u32 = 1;

/// Names of the component-specific parameters.
pub mod params {
    pub const LOW: &str = "low";
    pub const HIGH: &str = "high";
    pub const K: &str = "k";
    pub const TRANSFORMATION: &str = "transformation";
    pub const SCIKIT: &str = "scikit";
    pub const CLAB_INPUT_FILE: &str = "clab_input_file";
    pub const COEF_DIV: &str = "coef_div";
    pub const COEF_SI: &str = "coef_si";
    pub const COEF_SE: &str = "coef_se";
    pub const TRANSFORMATION_TYPE: &str = "transformation_type";
    pub const DESCRIPTOR_TYPE: &str = "descriptor_type";
}

/// Divisor of the double sigmoid's exponents when called directly
/// without a parameter set.
pub const DEFAULT_COEF_DIV: f64 = 100.0;
/// Steepness of the double sigmoid's falling edge at `high` by default.
pub const DEFAULT_COEF_SI: f64 = 150.0;
/// Steepness of the double sigmoid's rising edge at `low` by default.
pub const DEFAULT_COEF_SE: f64 = 150.0;

/// Token sequence produced by the tokenizer.
pub type Tokens = Vec<compact_str::CompactString>;
