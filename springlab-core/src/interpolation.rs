use ndarray::Array1;
use ninterp::{
    error::{InterpolateError, ValidateError},
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpError {
    #[error(transparent)]
    Validation(#[from] ValidateError),
    #[error(transparent)]
    Interpolation(#[from] InterpolateError),
}

/// Extrapolation strategy
///
/// Controls what happens if an input falls outside the interpolation grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Extrapolate {
    /// Continue the end segments beyond the grid.
    Enable,
    /// Restrict the input to the limits of the grid.
    Clamp,
    /// Return an error for inputs beyond the grid.
    #[default]
    Error,
}

impl From<Extrapolate> for ninterp::interpolator::Extrapolate<f64> {
    fn from(value: Extrapolate) -> Self {
        match value {
            Extrapolate::Enable => ninterp::interpolator::Extrapolate::Enable,
            Extrapolate::Clamp => ninterp::interpolator::Extrapolate::Clamp,
            Extrapolate::Error => ninterp::interpolator::Extrapolate::Error,
        }
    }
}

/// Piecewise-linear interpolation over a 1-D grid.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use springlab_core::{Extrapolate, LinearInterp};
///
/// let closure = LinearInterp::new(array![20.0, 60.0], array![1.353, 1.265], Extrapolate::Enable)
///     .unwrap();
/// assert!((closure.interpolate(40.0).unwrap() - 1.309).abs() < 1e-12);
/// ```
pub struct LinearInterp(Interp1DOwned<f64, Linear>);

impl LinearInterp {
    /// Builds an interpolator through the points `(x[i], f_x[i])`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::Validation`] if the grid is unsorted, too short,
    /// or does not match `f_x` in length.
    pub fn new(
        x: Array1<f64>,
        f_x: Array1<f64>,
        extrapolate: Extrapolate,
    ) -> Result<Self, InterpError> {
        Ok(Self(Interp1DOwned::new(
            x,
            f_x,
            Linear,
            extrapolate.into(),
        )?))
    }

    /// Evaluates the interpolant at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::Interpolation`] if `x` is off the grid and the
    /// strategy is [`Extrapolate::Error`].
    pub fn interpolate(&self, x: f64) -> Result<f64, InterpError> {
        self.0.interpolate(&[x]).map_err(Into::into)
    }
}

impl std::fmt::Debug for LinearInterp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearInterp").finish_non_exhaustive()
    }
}
