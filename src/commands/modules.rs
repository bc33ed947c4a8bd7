use crate::catalog::available_modules;
use anyhow::Result;

pub fn execute() -> Result<()> {
    for module in available_modules() {
        println!("{:<24} {}", module.token(), module.display_name());
    }
    Ok(())
}
