//! Score transformation registry.
//!
//! Maps raw, unbounded predictions onto a bounded desirability score using
//! one of a closed set of named curves.

use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;

use crate::constants::params;
use crate::error::TransformationError;
use crate::formulas::{self, DoubleSigmoidCoefficients};
use crate::parameters::ParameterSet;

/// A resolved transformation: applied elementwise, output has the length
/// and order of `predictions`.
pub type TransformFn = fn(&[f64], &ParameterSet) -> Result<Vec<f32>, TransformationError>;

/// The closed set of transformation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformationKind {
    Sigmoid,
    ReverseSigmoid,
    DoubleSigmoid,
    NoTransformation,
    RightStep,
    Step,
}

impl TransformationKind {
    pub const ALL: [TransformationKind; 6] = [
        TransformationKind::Sigmoid,
        TransformationKind::ReverseSigmoid,
        TransformationKind::DoubleSigmoid,
        TransformationKind::NoTransformation,
        TransformationKind::RightStep,
        TransformationKind::Step,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformationKind::Sigmoid => "sigmoid",
            TransformationKind::ReverseSigmoid => "reverse_sigmoid",
            TransformationKind::DoubleSigmoid => "double_sigmoid",
            TransformationKind::NoTransformation => "no_transformation",
            TransformationKind::RightStep => "right_step",
            TransformationKind::Step => "step",
        }
    }

    /// Parameter names the kind reads, besides `transformation_type`.
    pub fn required_parameters(self) -> &'static [&'static str] {
        match self {
            TransformationKind::NoTransformation => &[],
            TransformationKind::RightStep => &[params::LOW],
            TransformationKind::Step => &[params::LOW, params::HIGH],
            TransformationKind::Sigmoid | TransformationKind::ReverseSigmoid => {
                &[params::LOW, params::HIGH, params::K]
            }
            TransformationKind::DoubleSigmoid => &[
                params::LOW,
                params::HIGH,
                params::COEF_DIV,
                params::COEF_SI,
                params::COEF_SE,
            ],
        }
    }

    fn function(self) -> TransformFn {
        match self {
            TransformationKind::Sigmoid => sigmoid_transformation,
            TransformationKind::ReverseSigmoid => reverse_sigmoid_transformation,
            TransformationKind::DoubleSigmoid => double_sigmoid_transformation,
            TransformationKind::NoTransformation => no_transformation,
            TransformationKind::RightStep => right_step_transformation,
            TransformationKind::Step => step_transformation,
        }
    }
}

impl fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformationKind {
    type Err = TransformationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformationKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| TransformationError::UnknownTransformationType(s.to_string()))
    }
}

/// Resolves a parameter set to its transformation function.
///
/// The registry is filled once in [`TransformationFactory::new`] and never
/// changes, so a factory can be shared freely between threads.
#[derive(Clone)]
pub struct TransformationFactory {
    registry: AHashMap<TransformationKind, TransformFn>,
}

impl fmt::Debug for TransformationFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformationFactory")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl Default for TransformationFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformationFactory {
    pub fn new() -> Self {
        let registry = TransformationKind::ALL
            .into_iter()
            .map(|k| (k, k.function()))
            .collect();
        Self { registry }
    }

    /// Look up the function named by `parameters["transformation_type"]`.
    pub fn resolve(&self, parameters: &ParameterSet) -> Result<TransformFn, TransformationError> {
        let name = parameters.transformation_type()?;
        let kind: TransformationKind = name.parse()?;
        let function = self
            .registry
            .get(&kind)
            .copied()
            .ok_or_else(|| TransformationError::UnknownTransformationType(name.to_string()))?;
        log::debug!("Resolved transformation '{}'", kind);
        Ok(function)
    }

    /// Resolve and apply in one call.
    pub fn transform(
        &self,
        predictions: &[f64],
        parameters: &ParameterSet,
    ) -> Result<Vec<f32>, TransformationError> {
        let function = self.resolve(parameters)?;
        function(predictions, parameters)
    }

    /// Sample the resolved curve at `n` evenly spaced points of `[start, stop]`.
    ///
    /// Returns `(input_score, transformed_score)` pairs.
    pub fn curve(
        &self,
        parameters: &ParameterSet,
        start: f64,
        stop: f64,
        n: usize,
    ) -> Result<Vec<(f64, f32)>, TransformationError> {
        let xs: Vec<f64> = match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let delta = (stop - start) / (n - 1) as f64;
                (0..n).map(|i| start + delta * i as f64).collect()
            }
        };
        let ys = self.transform(&xs, parameters)?;
        Ok(xs.into_iter().zip(ys).collect())
    }

    /// Registered kinds, in declaration order.
    pub fn kinds(&self) -> Vec<TransformationKind> {
        TransformationKind::ALL
            .into_iter()
            .filter(|k| self.registry.contains_key(k))
            .collect()
    }
}

/// Apply a fallible formula to every prediction, substituting `0.0` for
/// elements whose arithmetic faults.
fn contained<F>(kind: TransformationKind, predictions: &[f64], formula: F) -> Vec<f32>
where
    F: Fn(f64) -> Option<f64>,
{
    let mut faults = 0usize;
    let transformed: Vec<f32> = predictions
        .iter()
        .map(|&value| match formula(value) {
            Some(v) => v as f32,
            None => {
                faults += 1;
                0.0
            }
        })
        .collect();
    if faults > 0 {
        log::debug!(
            "{}: substituted 0.0 for {} of {} predictions",
            kind,
            faults,
            predictions.len()
        );
    }
    transformed
}

pub fn no_transformation(
    predictions: &[f64],
    _parameters: &ParameterSet,
) -> Result<Vec<f32>, TransformationError> {
    Ok(predictions.iter().map(|&v| v as f32).collect())
}

pub fn right_step_transformation(
    predictions: &[f64],
    parameters: &ParameterSet,
) -> Result<Vec<f32>, TransformationError> {
    let kind = TransformationKind::RightStep.name();
    let low = parameters.number(kind, params::LOW)?;
    Ok(predictions
        .iter()
        .map(|&v| formulas::right_step(v, low))
        .collect())
}

pub fn step_transformation(
    predictions: &[f64],
    parameters: &ParameterSet,
) -> Result<Vec<f32>, TransformationError> {
    let kind = TransformationKind::Step.name();
    let low = parameters.number(kind, params::LOW)?;
    let high = parameters.number(kind, params::HIGH)?;
    Ok(predictions
        .iter()
        .map(|&v| formulas::step(v, low, high))
        .collect())
}

pub fn sigmoid_transformation(
    predictions: &[f64],
    parameters: &ParameterSet,
) -> Result<Vec<f32>, TransformationError> {
    let kind = TransformationKind::Sigmoid;
    let low = parameters.number(kind.name(), params::LOW)?;
    let high = parameters.number(kind.name(), params::HIGH)?;
    let k = parameters.number(kind.name(), params::K)?;
    Ok(contained(kind, predictions, |v| {
        formulas::sigmoid(v, low, high, k)
    }))
}

pub fn reverse_sigmoid_transformation(
    predictions: &[f64],
    parameters: &ParameterSet,
) -> Result<Vec<f32>, TransformationError> {
    let kind = TransformationKind::ReverseSigmoid;
    let low = parameters.number(kind.name(), params::LOW)?;
    let high = parameters.number(kind.name(), params::HIGH)?;
    let k = parameters.number(kind.name(), params::K)?;
    Ok(contained(kind, predictions, |v| {
        formulas::reverse_sigmoid(v, low, high, k)
    }))
}

pub fn double_sigmoid_transformation(
    predictions: &[f64],
    parameters: &ParameterSet,
) -> Result<Vec<f32>, TransformationError> {
    let kind = TransformationKind::DoubleSigmoid;
    let low = parameters.number(kind.name(), params::LOW)?;
    let high = parameters.number(kind.name(), params::HIGH)?;
    let coefs = DoubleSigmoidCoefficients {
        coef_div: parameters.number(kind.name(), params::COEF_DIV)?,
        coef_si: parameters.number(kind.name(), params::COEF_SI)?,
        coef_se: parameters.number(kind.name(), params::COEF_SE)?,
    };
    Ok(contained(kind, predictions, |v| {
        formulas::double_sigmoid(v, low, high, coefs)
    }))
}
