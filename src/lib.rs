//! SMILES tokenization and score transformation for generative-molecule
//! reinforcement learning.
//!
//! Two independent engines:
//! - [`SmilesTokenizer`]: lossless SMILES to token sequence conversion, with
//!   bracket atoms, `%NN` ring closures and `Br`/`Cl` kept whole.
//! - [`TransformationFactory`]: maps raw predictions to bounded desirability
//!   scores via a named curve (`sigmoid`, `reverse_sigmoid`,
//!   `double_sigmoid`, `right_step`, `step`, `no_transformation`).

pub mod constants;
pub mod error;
pub mod formulas;
pub mod padding;
pub mod parameters;
pub mod tokenizer;
pub mod transformation;
mod utils;
pub mod vocabulary;

#[cfg(feature = "python")]
mod python;

pub use constants::{params, Tokens, BEGIN_TOKEN, END_TOKEN};
pub use error::{TransformationError, VocabularyError};
pub use formulas::DoubleSigmoidCoefficients;
pub use padding::{pad_sequences, PaddedBatch};
pub use parameters::{ParameterSet, ParameterValue};
pub use tokenizer::{PatternCategory, SmilesTokenizer};
pub use transformation::{TransformFn, TransformationFactory, TransformationKind};
pub use vocabulary::Vocabulary;

/// SMILES tokenization and score transformation with Python bindings
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn molreward(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    use pyo3::prelude::*;

    pyo3_log::init();
    m.add_class::<python::PySmilesTokenizer>()?;
    m.add_class::<python::PyTransformationFactory>()?;
    m.add_class::<python::PyVocabulary>()?;
    Ok(())
}
