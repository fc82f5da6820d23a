//! `tagtree tags` command implementation.

use std::io::{self, Write};

use clap::Args;
use tagtree::TagSpec;
use tagtree::tag::CATALOG;

use crate::error::CliError;

/// Arguments for the tags command.
#[derive(Args)]
pub(crate) struct TagsArgs {
    /// Only list void (self-closing) tags.
    #[arg(long)]
    void_only: bool,
}

impl TagsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let mut out = io::stdout().lock();
        for spec in CATALOG.iter().filter(|s| !self.void_only || s.is_void()) {
            writeln!(out, "{}", describe(spec))?;
        }
        Ok(())
    }
}

/// One catalog line: name, then its rules.
fn describe(spec: &TagSpec) -> String {
    let mut line = format!("{:<10}", spec.name());
    if spec.is_void() {
        line.push_str(" void");
    }
    if !spec.required_attrs().is_empty() {
        line.push_str(" required=");
        line.push_str(&spec.required_attrs().join(","));
    }
    if !spec.escape_text() {
        line.push_str(" raw-text");
    }
    if !spec.indent_text() {
        line.push_str(" no-text-indent");
    }
    line.trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtree::tag;

    #[test]
    fn test_describe() {
        assert_eq!(describe(&tag::DIV), "div");
        assert_eq!(describe(&tag::IMG), "img        void required=src,alt");
        assert_eq!(describe(&tag::SCRIPT), "script     raw-text");
        assert_eq!(describe(&tag::TEXTAREA), "textarea   no-text-indent");
    }
}
