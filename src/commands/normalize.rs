use crate::cli::NormalizeArgs;
use crate::domain::normalize;
use crate::utils::OutputStyle;
use crate::utils::error::report_error;
use anyhow::{Result, bail};

pub fn handle_normalize_command(args: &NormalizeArgs) -> Result<()> {
    let mut failures = 0;

    for input in &args.inputs {
        match normalize(input) {
            Ok(domain) => println!("{}", OutputStyle::domain(domain.as_str())),
            Err(e) => {
                report_error(&e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} inputs could not be normalized", failures, args.inputs.len());
    }
    Ok(())
}
