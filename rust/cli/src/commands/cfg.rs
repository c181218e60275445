//! The `cfg` command: prints the resolved configuration with the layer each
//! value came from.
//!
//! ```json
//! {
//!   "iterations": { "value": 10000, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "iterations": {
            "value": config.iterations,
            "source": sources.iterations,
        },
        "max_iterations": {
            "value": config.max_iterations,
            "source": sources.max_iterations,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "deadline_ms": {
            "value": config.deadline_ms,
            "source": sources.deadline_ms,
        },
        "strict": {
            "value": config.strict,
            "source": sources.strict,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
