//! Template rendering facade.

pub mod context;
pub mod engine;

use crate::{config::MissingKey, decode::Mapping, error::Result};
use std::io::Write;

/// Render `template` against `data`, streaming the result into `out`.
pub fn render<W: Write>(
    template: &str,
    data: &Mapping,
    missing: MissingKey,
    out: &mut W,
) -> Result<()> {
    let tmpl = engine::compile(template)?;
    engine::execute(&tmpl, context::build(data, missing), out)
}
