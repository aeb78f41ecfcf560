//! Command-line configuration for the terminal host.

use anyhow::{anyhow, Result};

/// Allowed range for `--cell-width`.
pub const CELL_WIDTH_RANGE: std::ops::RangeInclusive<u16> = 1..=4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    /// Piece randomizer seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Terminal columns per board cell
    pub cell_width: u16,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cell_width: 2,
        }
    }
}

/// Parse host flags (program name already stripped).
///
/// Accepts `--seed <u64>` and `--cell-width <1..=4>`; anything else is an error.
pub fn parse_args(args: &[String]) -> Result<HostConfig> {
    let mut config = HostConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--cell-width" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --cell-width"))?;
                let width = v
                    .parse::<u16>()
                    .map_err(|_| anyhow!("invalid --cell-width value: {}", v))?;
                if !CELL_WIDTH_RANGE.contains(&width) {
                    return Err(anyhow!(
                        "--cell-width must be between {} and {}, got {}",
                        CELL_WIDTH_RANGE.start(),
                        CELL_WIDTH_RANGE.end(),
                        width
                    ));
                }
                config.cell_width = width;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}
