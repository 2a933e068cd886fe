//! System info command

use anyhow::Result;

use docdesk_core::system;

use crate::output::Output;

pub fn show(output: &Output) -> Result<()> {
    output.print_system_info(&system::collect());
    Ok(())
}
