//! Compile and execute a Go-syntax text template.

use crate::error::{Error, Result};
use gtmpl::{Context, Template, Value};
use std::io::Write;

/// Compile `text` into an executable template.
pub fn compile(text: &str) -> Result<Template> {
    let mut tmpl = Template::default();
    tmpl.parse(text).map_err(|e| Error::Render {
        stage: "parse",
        source: e.into(),
    })?;
    Ok(tmpl)
}

/// Execute `tmpl` with `dot` as the top-level scope, writing output to
/// `out` as the engine produces it.
pub fn execute<W: Write>(tmpl: &Template, dot: Value, out: &mut W) -> Result<()> {
    let ctx = Context::from(dot);
    tmpl.execute(out, &ctx).map_err(|e| Error::Render {
        stage: "execute",
        source: e.into(),
    })
}
