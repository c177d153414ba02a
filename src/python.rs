//! Python bindings, compiled with the `python` feature.

use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict};

use crate::error::{TransformationError, VocabularyError};
use crate::parameters::{ParameterSet, ParameterValue};
use crate::tokenizer::SmilesTokenizer;
use crate::transformation::{TransformationFactory, TransformationKind};
use crate::vocabulary::Vocabulary;

fn transformation_err(e: TransformationError) -> PyErr {
    match e {
        TransformationError::InvalidParameterType { .. } | TransformationError::Config(_) => {
            PyValueError::new_err(e.to_string())
        }
        _ => PyKeyError::new_err(e.to_string()),
    }
}

fn vocabulary_err(e: VocabularyError) -> PyErr {
    match e {
        VocabularyError::UnknownToken(_) | VocabularyError::UnknownId(_) => {
            PyKeyError::new_err(e.to_string())
        }
        VocabularyError::Io { .. } => PyIOError::new_err(e.to_string()),
        VocabularyError::InvalidFile { .. } => PyValueError::new_err(e.to_string()),
    }
}

/// Convert a component's parameter dict. Nested settings go through
/// `json.dumps`; values JSON cannot represent are skipped.
fn parameter_set(parameters: &Bound<'_, PyDict>) -> PyResult<ParameterSet> {
    let json = parameters.py().import("json")?;
    let mut set = ParameterSet::new();
    for (key, value) in parameters.iter() {
        let key: String = key.extract()?;
        // bool is an int subclass, so it must be checked before f64
        if value.is_instance_of::<PyBool>() {
            set.insert(&key, value.extract::<bool>()?);
        } else if let Ok(text) = value.extract::<String>() {
            set.insert(&key, text);
        } else if let Ok(number) = value.extract::<f64>() {
            set.insert(&key, number);
        } else if let Ok(dumped) = json.call_method1("dumps", (&value,)) {
            let dumped: String = dumped.extract()?;
            if let Ok(nested) = serde_json::from_str(&dumped) {
                set.insert(&key, ParameterValue::Other(nested));
            } else {
                log::debug!("Skipping parameter '{}' that is not valid JSON", key);
            }
        } else {
            log::debug!("Skipping parameter '{}' that JSON cannot represent", key);
        }
    }
    Ok(set)
}

/// Deals with the tokenization and untokenization of SMILES.
#[pyclass(name = "SMILESTokenizer", module = "molreward", frozen)]
pub struct PySmilesTokenizer {
    inner: SmilesTokenizer,
}

#[pymethods]
impl PySmilesTokenizer {
    #[new]
    fn new() -> Self {
        Self {
            inner: SmilesTokenizer::new(),
        }
    }

    #[pyo3(signature = (smiles, with_begin_and_end=true))]
    fn tokenize(&self, smiles: &str, with_begin_and_end: bool) -> Vec<String> {
        self.inner
            .tokenize(smiles, with_begin_and_end)
            .into_iter()
            .map(|t| t.to_string())
            .collect()
    }

    fn untokenize(&self, tokens: Vec<String>) -> String {
        self.inner.untokenize(&tokens)
    }

    #[pyo3(signature = (smiles_list, with_begin_and_end=true))]
    fn tokenize_batch(
        &self,
        py: Python<'_>,
        smiles_list: Vec<String>,
        with_begin_and_end: bool,
    ) -> Vec<Vec<String>> {
        let inner = &self.inner;
        py.detach(|| {
            inner
                .tokenize_batch(&smiles_list, with_begin_and_end)
                .into_iter()
                .map(|tokens| tokens.into_iter().map(|t| t.to_string()).collect())
                .collect()
        })
    }
}

/// Maps raw predictions to bounded scores.
#[pyclass(name = "TransformationFactory", module = "molreward", frozen)]
pub struct PyTransformationFactory {
    inner: TransformationFactory,
}

#[pymethods]
impl PyTransformationFactory {
    #[new]
    fn new() -> Self {
        Self {
            inner: TransformationFactory::new(),
        }
    }

    /// Apply the transformation named by `parameters["transformation_type"]`.
    fn transform(
        &self,
        predictions: Vec<f64>,
        parameters: &Bound<'_, PyDict>,
    ) -> PyResult<Vec<f32>> {
        let parameters = parameter_set(parameters)?;
        self.inner
            .transform(&predictions, &parameters)
            .map_err(transformation_err)
    }

    /// `(input_score, transformed_score)` pairs for plotting.
    #[pyo3(signature = (parameters, start, stop, n=100))]
    fn curve(
        &self,
        parameters: &Bound<'_, PyDict>,
        start: f64,
        stop: f64,
        n: usize,
    ) -> PyResult<Vec<(f64, f32)>> {
        let parameters = parameter_set(parameters)?;
        self.inner
            .curve(&parameters, start, stop, n)
            .map_err(transformation_err)
    }

    fn transformation_types(&self) -> Vec<&'static str> {
        self.inner
            .kinds()
            .into_iter()
            .map(TransformationKind::name)
            .collect()
    }
}

#[pyclass(name = "Vocabulary", module = "molreward")]
pub struct PyVocabulary {
    inner: Vocabulary,
}

#[pymethods]
impl PyVocabulary {
    #[new]
    fn new() -> Self {
        Self {
            inner: Vocabulary::new(),
        }
    }

    #[staticmethod]
    fn from_smiles(
        py: Python<'_>,
        smiles_list: Vec<String>,
        tokenizer: PyRef<'_, PySmilesTokenizer>,
    ) -> Self {
        let tokenizer = &tokenizer.inner;
        let inner = py.detach(|| Vocabulary::from_smiles(&smiles_list, tokenizer));
        Self { inner }
    }

    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        let inner = Vocabulary::load(path).map_err(vocabulary_err)?;
        Ok(Self { inner })
    }

    fn save(&self, path: &str) -> PyResult<()> {
        self.inner.save(path).map_err(vocabulary_err)
    }

    fn add(&mut self, token: &str) -> u32 {
        self.inner.add(token)
    }

    fn encode(&self, tokens: Vec<String>) -> PyResult<Vec<u32>> {
        self.inner.encode(&tokens).map_err(vocabulary_err)
    }

    fn decode(&self, ids: Vec<u32>) -> PyResult<Vec<String>> {
        let tokens = self.inner.decode(&ids).map_err(vocabulary_err)?;
        Ok(tokens.into_iter().map(|t| t.to_string()).collect())
    }

    fn tokens(&self) -> Vec<String> {
        self.inner.tokens().iter().map(|t| t.to_string()).collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __contains__(&self, token: &str) -> bool {
        self.inner.contains(token)
    }
}
