//! Interactive file and folder selection

use anyhow::Result;

use docdesk_core::DocumentService;

use crate::output::Output;

/// Run the picker and show the selection; prints nothing when cancelled
pub fn pick(service: &DocumentService, folder: bool, output: &Output) -> Result<()> {
    if folder {
        if let Some(dir) = service.select_folder()? {
            output.print_folder(&dir);
        }
    } else if let Some(doc) = service.select_file()? {
        output.print_document(&doc);
    }
    Ok(())
}
