//! Row activation dispatch

/// Receives row activations from a grid.
///
/// `context` tags which screen/table the row came from; the implementor
/// decides which fields to read and where to go.
pub trait Navigator<R> {
    fn navigate(&mut self, context: &str, row: &R);
}

impl<R, F> Navigator<R> for F
where
    F: FnMut(&str, &R),
{
    fn navigate(&mut self, context: &str, row: &R) {
        self(context, row)
    }
}

/// Navigator for tables whose rows lead nowhere
pub struct NoNavigation;

impl<R> Navigator<R> for NoNavigation {
    fn navigate(&mut self, context: &str, _row: &R) {
        tracing::trace!("Row activated in {} (no route)", context);
    }
}
