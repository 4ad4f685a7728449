/// A trait for types that can be stepped using their derivative.
///
/// Generic integrators advance any implementor by a derivative and a step
/// size. The implementor chooses the update rule, so a position/velocity pair
/// can apply a semi-implicit (symplectic) Euler update while a scalar state
/// uses plain forward Euler.
///
/// `Delta` can be a plain scalar like `f64` or a dimensioned type like
/// `uom::Time`.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}
