#![warn(clippy::pedantic)]
#![cfg_attr(feature = "precommit-checks", deny(warnings, clippy::pedantic, clippy::dbg_macro))]
#![allow(clippy::needless_pass_by_value, clippy::type_complexity)] // too many false positives from system params.
#![allow(clippy::collapsible_else_if)] // this is usually intentional
#![cfg_attr(not(feature = "precommit-checks"), allow(dead_code, unused_variables, unused_imports))]

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let mut app = blockdrive_client::main_app(blockdrive_client::Options::parse())?;
    app.run();
    Ok(())
}
