//! Boundary to the host's color-spec resolver.

use crate::error::ResolveError;
use crate::paint::PaintSource;

/// Turns a user-facing color spec into a paint source.
///
/// The syntax is owned by the host; the decorator only calls this when a
/// paint property is set from a raw spec.
pub trait ColorResolver {
    fn resolve(&self, spec: &str) -> Result<PaintSource, ResolveError>;
}

impl<F> ColorResolver for F
where
    F: Fn(&str) -> Result<PaintSource, ResolveError>,
{
    fn resolve(&self, spec: &str) -> Result<PaintSource, ResolveError> {
        self(spec)
    }
}
