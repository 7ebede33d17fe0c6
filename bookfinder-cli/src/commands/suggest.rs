//! Suggest command implementation

use anyhow::Result;

/// Print the example searches offered on an empty search
pub fn suggest() -> Result<()> {
    crate::render::print_examples();
    Ok(())
}
